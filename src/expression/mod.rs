//! Infix expression compiler: tokenize, reorder to RPN, build a tree, evaluate.
//!
//! ```text
//! "sin(a*y) + c*cos(a*x)"
//!   -> tokens (unary minus fused)
//!   -> RPN     a y * sin c a x * cos * +
//!   -> Node tree with names resolved to positional indices
//! ```
//!
//! Trees can also be evolved: literals mutated, subtrees crossed between expressions, and the
//! infix text regenerated from the result.

pub(crate) mod ast;
pub(crate) mod build;
pub(crate) mod error;
pub(crate) mod evolve;
pub(crate) mod lexer;
pub(crate) mod program;
pub(crate) mod rpn;
