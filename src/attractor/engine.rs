use std::f64::consts::PI;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::attractor::config::{
    AttractorConfig, Channel, validate_alpha_k, validate_precision_points, variable_names,
};
use crate::expression::error::ExprError;
use crate::expression::program::Expression;
use crate::foundation::core::{BoundingBox, Point3, Rgba};
use crate::foundation::error::{AttractorError, AttractorResult};

/// Interval free constants are drawn from.
pub const CONSTANT_RANGE: Range<f64> = -PI..3.0 * PI;

/// An iterated map over `x, y, z, red, green, blue` and its realized point cloud.
///
/// Two states: *unrealized* (constants drawn, buffers empty) and *realized* (buffers and bounds
/// match the current constants). Sampling constants or changing settings drops back to
/// unrealized; [`calculate`](Self::calculate) or any realizing accessor moves forward again.
#[derive(Debug, Clone)]
pub struct Attractor {
    channels: [Option<Expression>; 6],
    constant_names: Vec<String>,
    constant_values: Vec<f64>,
    precision_points: usize,
    alpha_k: f64,
    rng: StdRng,
    points: Vec<Point3>,
    colors: Vec<Rgba>,
    bounds: BoundingBox,
    realized: bool,
}

impl Attractor {
    /// Parse every channel, seed the generator and draw the first set of constants.
    ///
    /// Fails outright if any channel fails to parse.
    pub fn new(config: &AttractorConfig) -> AttractorResult<Self> {
        config.validate()?;

        let vars = variable_names();
        let mut channels: [Option<Expression>; 6] = Default::default();
        for ch in Channel::ALL {
            if let Some(src) = config.channel_source(ch) {
                let expr = Expression::new(src, &vars, config.constants.as_slice())
                    .map_err(|source| channel_error(ch, source))?;
                channels[ch.index()] = Some(expr);
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut attractor = Self {
            channels,
            constant_names: config.constants.clone(),
            constant_values: Vec::new(),
            precision_points: config.precision_points,
            alpha_k: config.alpha_k,
            rng,
            points: Vec::new(),
            colors: Vec::new(),
            bounds: BoundingBox::empty(),
            realized: false,
        };
        attractor.construct_constants()?;
        Ok(attractor)
    }

    /// Draw fresh constants from the attractor's own generator.
    pub fn construct_constants(&mut self) -> AttractorResult<()> {
        let values = sample_constants(&mut self.rng, self.constant_names.len());
        self.set_constants(values)
    }

    /// Draw fresh constants from a caller-supplied generator.
    pub fn construct_constants_with<R: Rng>(&mut self, rng: &mut R) -> AttractorResult<()> {
        let values = sample_constants(rng, self.constant_names.len());
        self.set_constants(values)
    }

    /// Install explicit constant values, one per declared name, in declaration order.
    ///
    /// Every channel receives the same values; the buffers are invalidated.
    pub fn set_constants(&mut self, values: Vec<f64>) -> AttractorResult<()> {
        if values.len() != self.constant_names.len() {
            return Err(AttractorError::validation(format!(
                "expected {} constant value(s), got {}",
                self.constant_names.len(),
                values.len()
            )));
        }
        for expr in self.channels.iter_mut().flatten() {
            expr.bind_constants(values.clone())?;
        }
        tracing::debug!(
            constants = ?self.constant_names.iter().zip(&values).collect::<Vec<_>>(),
            "bound attractor constants"
        );
        self.constant_values = values;
        self.invalidate();
        Ok(())
    }

    /// Iterate the map `precision_points` times from the origin state, replacing the buffers.
    #[tracing::instrument(skip(self), fields(points = self.precision_points))]
    pub fn calculate(&mut self) -> AttractorResult<()> {
        self.invalidate();

        let var_count = Channel::ALL.len();
        for expr in self.channels.iter().flatten() {
            expr.check_bindings(var_count)?;
        }

        let n = self.precision_points;
        let alpha = self.alpha();
        self.reserve_buffers(n)?;

        let mut state = Channel::ALL.map(Channel::default_value);
        let mut next = state;
        let mut non_finite = 0usize;
        for _ in 0..n {
            for (i, slot) in self.channels.iter().enumerate() {
                next[i] = match slot {
                    Some(expr) => expr.eval_checked(&state),
                    None => Channel::ALL[i].default_value(),
                };
            }
            state = next;

            let p = Point3::new(state[0] as f32, state[1] as f32, state[2] as f32);
            if !p.is_finite() {
                non_finite += 1;
            }
            // Widen with the stored precision so every stored point lies inside the box.
            self.bounds.include(p.to_f64());
            self.points.push(p);
            self.colors.push(Rgba::new(
                state[3] as f32,
                state[4] as f32,
                state[5] as f32,
                alpha,
            ));
        }

        if non_finite > 0 {
            tracing::warn!(non_finite, total = n, "attractor produced non-finite points");
        }
        tracing::debug!(bounds = ?self.bounds, "attractor realized");
        self.realized = true;
        Ok(())
    }

    /// Calculate only if the buffers are stale.
    pub fn realize(&mut self) -> AttractorResult<()> {
        if self.realized {
            return Ok(());
        }
        self.calculate()
    }

    /// Draw fresh constants and recalculate.
    pub fn mutate_constants(&mut self) -> AttractorResult<()> {
        self.construct_constants()?;
        self.calculate()
    }

    /// Fraction of cells in a `grid x grid` raster over the x/y bounds holding at least one
    /// point with finite x and y.
    pub fn occupancy(&mut self, grid: usize) -> AttractorResult<f64> {
        if grid == 0 {
            return Err(AttractorError::config("occupancy grid must be > 0"));
        }
        self.realize()?;

        let bb = self.bounds;
        let cell = |v: f64, axis: usize| -> usize {
            let extent = bb.extent(axis);
            if extent <= 0.0 || !extent.is_finite() {
                return 0;
            }
            let t = (v - bb.min[axis]) / extent;
            ((t * grid as f64) as usize).min(grid - 1)
        };

        let mut occupied = vec![false; grid * grid];
        for p in self.points.iter().filter(|p| p.is_finite_xy()) {
            let [x, y, _] = p.to_f64();
            occupied[cell(y, 1) * grid + cell(x, 0)] = true;
        }
        let hits = occupied.iter().filter(|&&o| o).count();
        Ok(hits as f64 / (grid * grid) as f64)
    }

    /// Mutate until [`occupancy`](Self::occupancy) reaches `min_occupancy`, at most
    /// `max_retries` times. Returns whether the threshold was reached.
    pub fn mutate_until_dense(
        &mut self,
        grid: usize,
        min_occupancy: f64,
        max_retries: usize,
    ) -> AttractorResult<bool> {
        let mut retries = 0;
        loop {
            let occupancy = self.occupancy(grid)?;
            if occupancy >= min_occupancy {
                return Ok(true);
            }
            if retries == max_retries {
                tracing::debug!(occupancy, retries, "giving up on sparse attractor");
                return Ok(false);
            }
            retries += 1;
            self.mutate_constants()?;
        }
    }

    /// Perturb the numeric literals of every channel with the attractor's generator.
    ///
    /// Returns how many literals changed; the buffers are invalidated when any did.
    pub fn mutate_literals(&mut self) -> AttractorResult<usize> {
        let mut changed = 0;
        for (ch, slot) in Channel::ALL.into_iter().zip(self.channels.iter_mut()) {
            if let Some(expr) = slot {
                changed += expr
                    .mutate_literals(&mut self.rng)
                    .map_err(|source| channel_error(ch, source))?;
            }
        }
        if changed > 0 {
            tracing::debug!(changed, "mutated attractor literals");
            self.invalidate();
        }
        Ok(changed)
    }

    /// Swap random subtrees of `channel` between this attractor and `other`.
    ///
    /// Both must define the channel over the same constant names. Returns whether a swap
    /// happened; both attractors are invalidated when it did.
    pub fn cross_channel(&mut self, other: &mut Attractor, channel: Channel) -> AttractorResult<bool> {
        let i = channel.index();
        let (Some(mine), Some(theirs)) = (self.channels[i].as_mut(), other.channels[i].as_mut())
        else {
            return Err(AttractorError::validation(format!(
                "channel '{}' is not defined on both attractors",
                channel.variable_name()
            )));
        };
        let crossed = mine
            .cross(theirs, &mut self.rng)
            .map_err(|source| channel_error(channel, source))?;
        if crossed {
            self.invalidate();
            other.invalidate();
        }
        Ok(crossed)
    }

    /// Change the step count; rejected values leave the previous count in place.
    pub fn set_precision_points(&mut self, points: usize) -> AttractorResult<()> {
        validate_precision_points(points)?;
        if points != self.precision_points {
            self.precision_points = points;
            self.invalidate();
        }
        Ok(())
    }

    /// Change the alpha numerator; rejected values leave the previous value in place.
    pub fn set_alpha_k(&mut self, k: f64) -> AttractorResult<()> {
        validate_alpha_k(k)?;
        if k != self.alpha_k {
            self.alpha_k = k;
            self.invalidate();
        }
        Ok(())
    }

    /// Configured step count.
    pub fn precision_points(&self) -> usize {
        self.precision_points
    }

    /// Per-point alpha, `clamp(K / precision_points, 0, 1)`.
    pub fn alpha(&self) -> f32 {
        (self.alpha_k / self.precision_points as f64).clamp(0.0, 1.0) as f32
    }

    /// `true` when the buffers match the current constants and settings.
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Realized points; empty while unrealized.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Realized colors, aligned with [`points`](Self::points); empty while unrealized.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of realized points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Bounds of the realized points; the empty sentinel while unrealized.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Expression bound to `channel`, if the channel is defined.
    pub fn expression(&self, channel: Channel) -> Option<&Expression> {
        self.channels[channel.index()].as_ref()
    }

    /// Defined channels with their expressions, in binding order.
    pub fn expressions(&self) -> impl Iterator<Item = (Channel, &Expression)> + '_ {
        Channel::ALL
            .into_iter()
            .zip(&self.channels)
            .filter_map(|(ch, slot)| slot.as_ref().map(|e| (ch, e)))
    }

    /// Shared constant names and their current values.
    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.constant_names
            .iter()
            .map(String::as_str)
            .zip(self.constant_values.iter().copied())
    }

    fn reserve_buffers(&mut self, n: usize) -> AttractorResult<()> {
        let reserved = self
            .points
            .try_reserve_exact(n)
            .and_then(|()| self.colors.try_reserve_exact(n));
        if let Err(e) = reserved {
            self.invalidate();
            return Err(anyhow::Error::new(e)
                .context(format!("allocate buffers for {n} points"))
                .into());
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.points.clear();
        self.colors.clear();
        self.bounds = BoundingBox::empty();
        self.realized = false;
    }
}

fn channel_error(channel: Channel, source: ExprError) -> AttractorError {
    AttractorError::Channel {
        channel: channel.variable_name(),
        source,
    }
}

fn sample_constants<R: Rng>(rng: &mut R, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(CONSTANT_RANGE)).collect()
}

/// Realize independent attractors in parallel; each iteration loop stays sequential.
#[tracing::instrument(skip(attractors), fields(count = attractors.len()))]
pub fn calculate_all(attractors: &mut [Attractor]) -> AttractorResult<()> {
    attractors.par_iter_mut().try_for_each(Attractor::calculate)
}

#[cfg(test)]
#[path = "../../tests/unit/attractor/engine.rs"]
mod tests;
