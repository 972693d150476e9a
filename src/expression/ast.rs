use crate::expression::lexer::{Function, Operator};

/// A leaf, resolved to a value source when the tree is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf {
    /// Numeric literal (including `pi` / `e`).
    Number(f64),
    Var(usize),
    Const(usize),
}

/// One-argument operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Implicit negation fused from a leading `-`.
    Neg,
    Sin,
    Cos,
    Tan,
    Abs,
    Ln,
    Log,
    Exp,
    Sqrt,
}

/// Two-argument operations, evaluated left then right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `%` over truncated operands.
    Rem,
    /// `^` and `pow(a, b)`.
    Pow,
}

/// Expression tree; every subtree is exclusively owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Unary {
        op: UnaryOp,
        arg: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl UnaryOp {
    /// Apply to `x` with IEEE-754 semantics; domain errors yield NaN.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Neg => -x,
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Abs => x.abs(),
            Self::Ln => x.ln(),
            Self::Log => x.log10(),
            Self::Exp => x.exp(),
            Self::Sqrt => x.sqrt(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Abs => "abs",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
        }
    }
}

impl BinaryOp {
    /// Apply to `(a, b)`; division by zero and NaN powers propagate instead of trapping.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Rem => truncated_rem(a, b),
            Self::Pow => a.powf(b),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
        }
    }
}

impl From<Operator> for BinaryOp {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Add => Self::Add,
            Operator::Sub => Self::Sub,
            Operator::Mul => Self::Mul,
            Operator::Div => Self::Div,
            Operator::Rem => Self::Rem,
            Operator::Pow => Self::Pow,
        }
    }
}

/// Unary form of a one-argument function; `None` for `pow`.
pub(crate) fn unary_for(func: Function) -> Option<UnaryOp> {
    match func {
        Function::Sin => Some(UnaryOp::Sin),
        Function::Cos => Some(UnaryOp::Cos),
        Function::Tan => Some(UnaryOp::Tan),
        Function::Abs => Some(UnaryOp::Abs),
        Function::Ln => Some(UnaryOp::Ln),
        Function::Log => Some(UnaryOp::Log),
        Function::Exp => Some(UnaryOp::Exp),
        Function::Sqrt => Some(UnaryOp::Sqrt),
        Function::Pow => None,
    }
}

// Remainder of the truncated operands; a negative dividend is shifted by the divisor.
fn truncated_rem(a: f64, b: f64) -> f64 {
    let (a, b) = (a.trunc(), b.trunc());
    let m = a % b;
    if a < 0.0 && m != 0.0 { b + m } else { m }
}

impl Node {
    pub(crate) fn leaf(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }

    pub(crate) fn unary(op: UnaryOp, arg: Node) -> Self {
        Self::Unary {
            op,
            arg: Box::new(arg),
        }
    }

    pub(crate) fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate against positional bindings.
    ///
    /// Callers guarantee that every `Var`/`Const` index is in range for `vars`/`consts`.
    pub(crate) fn eval(&self, vars: &[f64], consts: &[f64]) -> f64 {
        match self {
            Self::Leaf(Leaf::Number(v)) => *v,
            Self::Leaf(Leaf::Var(i)) => vars[*i],
            Self::Leaf(Leaf::Const(i)) => consts[*i],
            Self::Unary { op, arg } => op.apply(arg.eval(vars, consts)),
            Self::Binary { op, left, right } => {
                let a = left.eval(vars, consts);
                let b = right.eval(vars, consts);
                op.apply(a, b)
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Unary { arg, .. } => 1 + arg.node_count(),
            Self::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Postfix rendering with leaf indices mapped back to their names.
    pub(crate) fn write_postfix(&self, vars: &[String], consts: &[String], out: &mut Vec<String>) {
        match self {
            Self::Leaf(Leaf::Number(v)) => out.push(v.to_string()),
            Self::Leaf(Leaf::Var(i)) => out.push(vars[*i].clone()),
            Self::Leaf(Leaf::Const(i)) => out.push(consts[*i].clone()),
            Self::Unary { op, arg } => {
                arg.write_postfix(vars, consts, out);
                out.push(op.name().to_owned());
            }
            Self::Binary { op, left, right } => {
                left.write_postfix(vars, consts, out);
                right.write_postfix(vars, consts, out);
                out.push(op.symbol().to_owned());
            }
        }
    }
}

impl Node {
    /// Infix rendering that parses back to the same value.
    ///
    /// Binary nodes below `top` level are parenthesised, so no precedence or associativity
    /// knowledge is needed to read the text back.
    pub(crate) fn write_infix(&self, vars: &[String], consts: &[String], top: bool, out: &mut String) {
        match self {
            Self::Leaf(Leaf::Number(v)) => out.push_str(&v.to_string()),
            Self::Leaf(Leaf::Var(i)) => out.push_str(&vars[*i]),
            Self::Leaf(Leaf::Const(i)) => out.push_str(&consts[*i]),
            Self::Unary {
                op: UnaryOp::Neg,
                arg,
            } => {
                out.push('-');
                if arg.fuses_with_sign() {
                    arg.write_infix(vars, consts, false, out);
                } else {
                    out.push('(');
                    arg.write_infix(vars, consts, true, out);
                    out.push(')');
                }
            }
            Self::Unary { op, arg } => {
                out.push_str(op.name());
                out.push('(');
                arg.write_infix(vars, consts, true, out);
                out.push(')');
            }
            Self::Binary { op, left, right } => {
                if !top {
                    out.push('(');
                }
                left.write_infix(vars, consts, false, out);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                right.write_infix(vars, consts, false, out);
                if !top {
                    out.push(')');
                }
            }
        }
    }

    // Names and function calls take a fused `-`; anything else needs `-( ... )`.
    fn fuses_with_sign(&self) -> bool {
        match self {
            Self::Leaf(Leaf::Var(_) | Leaf::Const(_)) => true,
            Self::Unary { op, .. } => *op != UnaryOp::Neg,
            Self::Leaf(Leaf::Number(_)) | Self::Binary { .. } => false,
        }
    }

    /// Subtree at preorder position `index`; `0` is the node itself.
    pub(crate) fn subtree_mut(&mut self, index: usize) -> Option<&mut Node> {
        if index == 0 {
            return Some(self);
        }
        let rest = index - 1;
        match self {
            Self::Leaf(_) => None,
            Self::Unary { arg, .. } => arg.subtree_mut(rest),
            Self::Binary { left, right, .. } => {
                let n = left.node_count();
                if rest < n {
                    left.subtree_mut(rest)
                } else {
                    right.subtree_mut(rest - n)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/ast.rs"]
mod tests;
