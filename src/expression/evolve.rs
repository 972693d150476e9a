use rand::Rng;

use crate::expression::ast::{Leaf, Node};

/// Chance that a single numeric literal is perturbed by a mutation.
pub const LITERAL_MUTATION_CHANCE: f64 = 0.25;

/// Largest shift applied to a perturbed literal, in either direction.
pub const LITERAL_MUTATION_RANGE: f64 = 0.5;

/// Perturb finite numeric literals in place and return how many changed.
///
/// A perturbed value is folded back with `% 2` so repeated mutation cannot drift far from
/// zero.
pub(crate) fn mutate_literals<R: Rng>(node: &mut Node, rng: &mut R) -> usize {
    match node {
        Node::Leaf(Leaf::Number(v)) => {
            if !v.is_finite() || !rng.gen_bool(LITERAL_MUTATION_CHANCE) {
                return 0;
            }
            let shift = rng.gen_range(-LITERAL_MUTATION_RANGE..LITERAL_MUTATION_RANGE);
            *v = (*v + shift) % 2.0;
            1
        }
        Node::Leaf(_) => 0,
        Node::Unary { arg, .. } => mutate_literals(arg, rng),
        Node::Binary { left, right, .. } => {
            mutate_literals(left, rng) + mutate_literals(right, rng)
        }
    }
}

/// Swap one random non-root subtree of `a` with one of `b`.
///
/// Returns `false`, leaving both untouched, when either tree is a single node.
pub(crate) fn cross_subtrees<R: Rng>(a: &mut Node, b: &mut Node, rng: &mut R) -> bool {
    let (na, nb) = (a.node_count(), b.node_count());
    if na < 2 || nb < 2 {
        return false;
    }
    let (i, j) = (rng.gen_range(1..na), rng.gen_range(1..nb));
    match (a.subtree_mut(i), b.subtree_mut(j)) {
        (Some(left), Some(right)) => {
            std::mem::swap(left, right);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/evolve.rs"]
mod tests;
