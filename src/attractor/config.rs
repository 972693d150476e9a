use std::collections::BTreeSet;
use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{AttractorError, AttractorResult};

/// Default number of iteration steps per realization.
pub const DEFAULT_PRECISION_POINTS: usize = 1_000_000;

/// Default numerator of the point alpha, `alpha = clamp(K / points, 0, 1)`.
pub const DEFAULT_ALPHA_K: f64 = 60_000.0;

/// Interval the literal coefficients of [`AttractorConfig::random_clifford`] are drawn from.
pub const CLIFFORD_COEFFICIENT_RANGE: Range<f64> = -2.0..2.0;

/// Output channels of the map, in binding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
    /// Depth coordinate.
    Z,
    /// Red color channel.
    Red,
    /// Green color channel.
    Green,
    /// Blue color channel.
    Blue,
}

impl Channel {
    /// All channels; index `i` is the position of the channel's variable.
    pub const ALL: [Channel; 6] = [
        Channel::X,
        Channel::Y,
        Channel::Z,
        Channel::Red,
        Channel::Green,
        Channel::Blue,
    ];

    /// Variable name every channel expression sees for this channel's previous value.
    pub fn variable_name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Position in [`Channel::ALL`] and in the variable values.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::Red => 3,
            Self::Green => 4,
            Self::Blue => 5,
        }
    }

    /// Value held when the channel has no expression; also the value before the first step.
    pub fn default_value(self) -> f64 {
        match self {
            Self::X | Self::Y | Self::Z => 0.0,
            Self::Red | Self::Green | Self::Blue => 1.0,
        }
    }

    /// `true` for the two channels every attractor must define.
    pub fn is_required(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }
}

/// Variable names in binding order.
pub fn variable_names() -> [&'static str; 6] {
    Channel::ALL.map(Channel::variable_name)
}

fn default_constants() -> Vec<String> {
    ["a", "b", "c", "d"].map(str::to_owned).to_vec()
}

fn default_precision_points() -> usize {
    DEFAULT_PRECISION_POINTS
}

fn default_alpha_k() -> f64 {
    DEFAULT_ALPHA_K
}

/// Declarative description of an attractor, loadable from JSON.
///
/// ```json
/// { "x": "sin(a*y) + c*cos(a*x)", "y": "sin(b*x) + d*cos(b*y)", "seed": 7 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttractorConfig {
    /// Expression for the next `x`.
    pub x: String,
    /// Expression for the next `y`.
    pub y: String,
    /// Expression for the next `z`; `z` stays `0` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<String>,
    /// Expression for the next red value; stays `1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<String>,
    /// Expression for the next green value; stays `1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<String>,
    /// Expression for the next blue value; stays `1` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<String>,
    /// Free constant names shared by all channels.
    #[serde(default = "default_constants")]
    pub constants: Vec<String>,
    /// Iteration steps per realization.
    #[serde(default = "default_precision_points")]
    pub precision_points: usize,
    /// Alpha numerator `K`.
    #[serde(default = "default_alpha_k")]
    pub alpha_k: f64,
    /// Seed for constant sampling; OS entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AttractorConfig {
    /// Two-channel config with default constants and settings.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: None,
            red: None,
            green: None,
            blue: None,
            constants: default_constants(),
            precision_points: DEFAULT_PRECISION_POINTS,
            alpha_k: DEFAULT_ALPHA_K,
            seed: None,
        }
    }

    /// Clifford attractor with random `a, b, c, d`.
    pub fn clifford() -> Self {
        Self::new("sin(a * y) + c * cos(a * x)", "sin(b * x) + d * cos(b * y)")
    }

    /// Clifford attractor with fixed coefficients; constants play no part.
    pub fn classic() -> Self {
        let mut cfg = Self::new(
            "sin(-1.4 * y) + cos(-1.4 * x)",
            "sin(1.6 * x) + 0.7 * cos(1.6 * y)",
        );
        cfg.constants.clear();
        cfg
    }

    /// Clifford-form attractor with random literal coefficients and a planar `z` channel.
    ///
    /// The coefficients are written into the expressions, so no constants are declared and the
    /// result can be evolved with literal mutation.
    pub fn random_clifford<R: Rng>(rng: &mut R) -> Self {
        let mut coef = || rng.gen_range(CLIFFORD_COEFFICIENT_RANGE);
        let (a, b, c, d) = (coef(), coef(), coef(), coef());
        let (p, q) = (coef(), coef());
        let mut cfg = Self::new(
            format!("sin({a} * y) + {c} * cos({a} * x)"),
            format!("sin({b} * x) + {d} * cos({b} * y)"),
        )
        .with_channel(Channel::Z, format!("{p} * x + {q} * y"));
        cfg.constants.clear();
        cfg
    }

    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "clifford" => Some(Self::clifford()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Names accepted by [`preset`](Self::preset).
    pub const PRESETS: [&'static str; 2] = ["clifford", "classic"];

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style step count override.
    pub fn with_precision_points(mut self, points: usize) -> Self {
        self.precision_points = points;
        self
    }

    /// Builder-style channel expression override; replaces `x`/`y`, sets the optional ones.
    pub fn with_channel(mut self, channel: Channel, source: impl Into<String>) -> Self {
        let source = source.into();
        match channel {
            Channel::X => self.x = source,
            Channel::Y => self.y = source,
            Channel::Z => self.z = Some(source),
            Channel::Red => self.red = Some(source),
            Channel::Green => self.green = Some(source),
            Channel::Blue => self.blue = Some(source),
        }
        self
    }

    /// Source text for `channel`, if defined.
    pub fn channel_source(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::X => Some(&self.x),
            Channel::Y => Some(&self.y),
            Channel::Z => self.z.as_deref(),
            Channel::Red => self.red.as_deref(),
            Channel::Green => self.green.as_deref(),
            Channel::Blue => self.blue.as_deref(),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> AttractorResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| AttractorError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> AttractorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AttractorError::serde(e.to_string()))
    }

    /// Check settings and constant names; expressions are checked when they are parsed.
    pub fn validate(&self) -> AttractorResult<()> {
        validate_precision_points(self.precision_points)?;
        validate_alpha_k(self.alpha_k)?;

        let vars: BTreeSet<&str> = variable_names().into_iter().collect();
        let mut seen = BTreeSet::new();
        for name in &self.constants {
            if vars.contains(name.as_str()) {
                return Err(AttractorError::config(format!(
                    "constant '{name}' collides with a channel variable"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(AttractorError::config(format!(
                    "constant '{name}' is declared twice"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_precision_points(points: usize) -> AttractorResult<()> {
    if points == 0 {
        return Err(AttractorError::config("precision_points must be > 0"));
    }
    Ok(())
}

pub(crate) fn validate_alpha_k(k: f64) -> AttractorResult<()> {
    if !k.is_finite() || k <= 0.0 {
        return Err(AttractorError::config(format!(
            "alpha_k must be finite and > 0, got {k}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/attractor/config.rs"]
mod tests;
