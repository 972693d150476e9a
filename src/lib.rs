#![forbid(unsafe_code)]
//! Strange attractors defined by infix expressions.
//!
//! Each channel of an [`Attractor`] (`x`, `y`, `z`, `red`, `green`, `blue`) is an
//! [`Expression`] over the previous state and a set of shared random constants. Iterating the
//! map yields a point cloud with colors and a bounding box, which [`rasterize`] turns into an
//! RGBA frame. Expressions with literal coefficients can be evolved by mutating those literals
//! or crossing subtrees between attractors.

pub(crate) mod attractor;
pub(crate) mod expression;
pub(crate) mod foundation;
pub(crate) mod render;

pub use attractor::config::{
    AttractorConfig, CLIFFORD_COEFFICIENT_RANGE, Channel, DEFAULT_ALPHA_K,
    DEFAULT_PRECISION_POINTS, variable_names,
};
pub use attractor::engine::{Attractor, CONSTANT_RANGE, calculate_all};
pub use expression::ast::{BinaryOp, Leaf, Node, UnaryOp};
pub use expression::error::{ExprError, ExprResult};
pub use expression::evolve::{LITERAL_MUTATION_CHANCE, LITERAL_MUTATION_RANGE};
pub use expression::lexer::{Function, Operator, Token, tokenize};
pub use expression::program::Expression;
pub use expression::rpn::{infix_to_rpn, parse_rpn, rpn_to_string};
pub use foundation::core::{BoundingBox, Point3, Rgba};
pub use foundation::error::{AttractorError, AttractorResult};
pub use render::cpu::{FrameRGBA, RasterOpts, rasterize};
