use std::collections::BTreeSet;

use rand::Rng;

use crate::expression::ast::Node;
use crate::expression::build::{Scope, build_tree};
use crate::expression::error::{ExprError, ExprResult};
use crate::expression::evolve;
use crate::expression::lexer::{Function, Token, is_identifier};
use crate::expression::rpn::{parse_rpn, rpn_to_string};

/// A compiled infix expression with positional variable and constant bindings.
///
/// Variables are supplied on every [`evaluate`](Self::evaluate) call; constants are bound once
/// with [`bind_constants`](Self::bind_constants) and then held fixed. Evaluation only reads
/// `self`, so a bound expression can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    rpn: Vec<Token>,
    root: Node,
    variable_names: Vec<String>,
    constant_names: Vec<String>,
    constant_values: Vec<f64>,
}

impl Expression {
    /// Parse `source` over the given variable and constant names.
    ///
    /// Fails without producing an expression on any parse or name error. Constants start out
    /// unbound.
    pub fn new<V, C>(source: &str, variables: &[V], constants: &[C]) -> ExprResult<Self>
    where
        V: AsRef<str>,
        C: AsRef<str>,
    {
        let variable_names: Vec<String> = variables.iter().map(|v| v.as_ref().to_owned()).collect();
        let constant_names: Vec<String> = constants.iter().map(|c| c.as_ref().to_owned()).collect();
        check_names(variable_names.iter().chain(&constant_names))?;

        let rpn = parse_rpn(source)?;
        let root = build_tree(
            &rpn,
            Scope {
                variables: &variable_names,
                constants: &constant_names,
            },
        )?;

        Ok(Self {
            source: source.to_owned(),
            rpn,
            root,
            variable_names,
            constant_names,
            constant_values: Vec::new(),
        })
    }

    /// Infix text; rewritten from the tree after mutation or crossover.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// RPN token sequence the tree was built from.
    pub fn rpn(&self) -> &[Token] {
        &self.rpn
    }

    /// The RPN sequence joined with spaces.
    pub fn rpn_string(&self) -> String {
        rpn_to_string(&self.rpn)
    }

    /// Postfix walk of the built tree (implicit negation shows as `neg`).
    pub fn to_rpn_string(&self) -> String {
        let mut out = Vec::new();
        self.root
            .write_postfix(&self.variable_names, &self.constant_names, &mut out);
        out.join(" ")
    }

    /// Infix rendering of the tree; parses back to an expression with the same value.
    pub fn to_infix_string(&self) -> String {
        let mut out = String::new();
        self.root
            .write_infix(&self.variable_names, &self.constant_names, true, &mut out);
        out
    }

    /// Root of the expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Variable names; index `i` binds to `values[i]` in [`evaluate`](Self::evaluate).
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    /// Constant names, aligned with [`constant_values`](Self::constant_values).
    pub fn constant_names(&self) -> &[String] {
        &self.constant_names
    }

    /// Bound constant values; empty while unbound.
    pub fn constant_values(&self) -> &[f64] {
        &self.constant_values
    }

    /// `true` once every declared constant has a value.
    pub fn is_resolved(&self) -> bool {
        self.constant_values.len() == self.constant_names.len()
    }

    /// Name/value pairs of the bound constants.
    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.constant_names
            .iter()
            .map(String::as_str)
            .zip(self.constant_values.iter().copied())
    }

    /// Replace all constant values at once.
    ///
    /// `values` must match the declared constant count; on error the previous binding is kept.
    pub fn bind_constants(&mut self, values: Vec<f64>) -> ExprResult<()> {
        if values.len() != self.constant_names.len() {
            return Err(ExprError::UnboundConstants {
                expected: self.constant_names.len(),
                bound: values.len(),
            });
        }
        self.constant_values = values;
        Ok(())
    }

    /// Drop the constant binding, returning the expression to the unresolved state.
    pub fn clear_constants(&mut self) {
        self.constant_values.clear();
    }

    /// Check that constants are bound and `var_count` values cover every variable.
    pub fn check_bindings(&self, var_count: usize) -> ExprResult<()> {
        if !self.is_resolved() {
            return Err(ExprError::UnboundConstants {
                expected: self.constant_names.len(),
                bound: self.constant_values.len(),
            });
        }
        if var_count < self.variable_names.len() {
            return Err(ExprError::VariableArity {
                expected: self.variable_names.len(),
                got: var_count,
            });
        }
        Ok(())
    }

    /// Evaluate with `values[i]` bound to `variable_names()[i]`.
    ///
    /// Pure: identical inputs give bit-identical results. Numeric anomalies come back as
    /// NaN or infinity rather than errors.
    pub fn evaluate(&self, values: &[f64]) -> ExprResult<f64> {
        self.check_bindings(values.len())?;
        Ok(self.eval_checked(values))
    }

    /// Perturb numeric literals and regenerate the source text from the mutated tree.
    ///
    /// Each finite literal changes with probability
    /// [`LITERAL_MUTATION_CHANCE`](evolve::LITERAL_MUTATION_CHANCE). Constant bindings are kept.
    /// Returns how many literals changed.
    pub fn mutate_literals<R: Rng>(&mut self, rng: &mut R) -> ExprResult<usize> {
        let mut root = self.root.clone();
        let changed = evolve::mutate_literals(&mut root, rng);
        if changed > 0 {
            let next = self.regenerate(&root)?;
            self.install(next);
        }
        Ok(changed)
    }

    /// Swap a random subtree of this expression with one of `other`, regenerating both.
    ///
    /// Both must declare the same variable and constant names. Returns `false` and changes
    /// nothing when either tree is a single node.
    pub fn cross<R: Rng>(&mut self, other: &mut Expression, rng: &mut R) -> ExprResult<bool> {
        if self.variable_names != other.variable_names
            || self.constant_names != other.constant_names
        {
            return Err(ExprError::ScopeMismatch);
        }
        let (mut mine, mut theirs) = (self.root.clone(), other.root.clone());
        if !evolve::cross_subtrees(&mut mine, &mut theirs, rng) {
            return Ok(false);
        }
        let mine = self.regenerate(&mine)?;
        let theirs = other.regenerate(&theirs)?;
        self.install(mine);
        other.install(theirs);
        Ok(true)
    }

    // Print `root` as infix and parse it back so source, RPN and tree stay in step.
    fn regenerate(&self, root: &Node) -> ExprResult<Regenerated> {
        let mut source = String::new();
        root.write_infix(&self.variable_names, &self.constant_names, true, &mut source);
        let rpn = parse_rpn(&source)?;
        let root = build_tree(
            &rpn,
            Scope {
                variables: &self.variable_names,
                constants: &self.constant_names,
            },
        )?;
        Ok(Regenerated { source, rpn, root })
    }

    fn install(&mut self, next: Regenerated) {
        self.source = next.source;
        self.rpn = next.rpn;
        self.root = next.root;
    }

    /// Hot-loop evaluation; the caller has already passed [`check_bindings`](Self::check_bindings).
    pub(crate) fn eval_checked(&self, values: &[f64]) -> f64 {
        self.root.eval(values, &self.constant_values)
    }
}

struct Regenerated {
    source: String,
    rpn: Vec<Token>,
    root: Node,
}

fn check_names<'a>(names: impl Iterator<Item = &'a String>) -> ExprResult<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !is_identifier(name) {
            return Err(ExprError::UnexpectedToken(name.clone()));
        }
        if let Some((keyword, _)) = Function::find_in(name) {
            return Err(ExprError::ReservedName {
                name: name.clone(),
                keyword: keyword.to_ascii_lowercase(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ExprError::DuplicateName(name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/expression/program.rs"]
mod tests;
