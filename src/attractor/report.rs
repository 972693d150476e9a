use crate::attractor::engine::Attractor;
use crate::foundation::core::BoundingBox;
use crate::foundation::error::AttractorResult;

impl Attractor {
    /// Human-readable description of the realized attractor, one entry per line.
    ///
    /// Realizes the attractor first if needed. Writing the lines anywhere is up to the caller.
    pub fn report(&mut self) -> AttractorResult<Vec<String>> {
        self.realize()?;

        let mut lines = vec![format!(
            "attractor: {} points, {}",
            self.point_count(),
            format_bounds(&self.bounding_box())
        )];
        for (channel, expr) in self.expressions() {
            lines.push(format!("{}: {}", channel.variable_name(), expr.source()));
            lines.push(format!("  rpn: {}", expr.rpn_string()));
            for (name, value) in expr.constants() {
                lines.push(format!("  {name} = {value}"));
            }
        }
        Ok(lines)
    }
}

fn format_bounds(bb: &BoundingBox) -> String {
    if bb.is_empty() {
        return "empty bounds".to_owned();
    }
    let axis = |i: usize, name: &str| {
        if bb.is_axis_empty(i) {
            format!("{name} empty")
        } else {
            format!("{name} [{}, {}]", bb.min[i], bb.max[i])
        }
    };
    format!("{} {} {}", axis(0, "x"), axis(1, "y"), axis(2, "z"))
}

#[cfg(test)]
#[path = "../../tests/unit/attractor/report.rs"]
mod tests;
