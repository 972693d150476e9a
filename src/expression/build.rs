use std::f64::consts::{E, PI};

use crate::expression::ast::{BinaryOp, Leaf, Node, UnaryOp, unary_for};
use crate::expression::error::{ExprError, ExprResult};
use crate::expression::lexer::Token;

/// Names an expression may reference, in binding order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) variables: &'a [String],
    pub(crate) constants: &'a [String],
}

impl Scope<'_> {
    /// Variables win over constants, constants over the `pi` / `e` built-ins.
    fn resolve(&self, name: &str) -> ExprResult<Leaf> {
        if let Some(i) = self.variables.iter().position(|v| v == name) {
            return Ok(Leaf::Var(i));
        }
        if let Some(i) = self.constants.iter().position(|c| c == name) {
            return Ok(Leaf::Const(i));
        }
        if name.eq_ignore_ascii_case("pi") {
            return Ok(Leaf::Number(PI));
        }
        if name.eq_ignore_ascii_case("e") {
            return Ok(Leaf::Number(E));
        }
        Err(ExprError::UnresolvedIdentifier(name.to_owned()))
    }
}

/// Build a tree from an RPN sequence with an explicit node stack.
pub(crate) fn build_tree(rpn: &[Token], scope: Scope<'_>) -> ExprResult<Node> {
    let mut stack: Vec<Node> = Vec::with_capacity(rpn.len());

    for token in rpn {
        let node = match token {
            Token::Number(v) => Node::leaf(Leaf::Number(*v)),
            Token::Ident { name, negated } => {
                negate_if(*negated, Node::leaf(scope.resolve(name)?))
            }
            Token::Operator(op) => {
                let (left, right) = pop_pair(&mut stack, token)?;
                Node::binary(BinaryOp::from(*op), left, right)
            }
            Token::Function { func, negated } => {
                let node = match unary_for(*func) {
                    Some(op) => Node::unary(op, pop_one(&mut stack, token)?),
                    None => {
                        let (left, right) = pop_pair(&mut stack, token)?;
                        Node::binary(BinaryOp::Pow, left, right)
                    }
                };
                negate_if(*negated, node)
            }
            Token::LParen | Token::RParen | Token::Comma => {
                return Err(ExprError::UnexpectedToken(token.to_string()));
            }
        };
        stack.push(node);
    }

    match stack.len() {
        0 => Err(ExprError::Empty),
        1 => stack.pop().ok_or(ExprError::Empty),
        n => Err(ExprError::DanglingOperands(n)),
    }
}

fn negate_if(negated: bool, node: Node) -> Node {
    if negated {
        Node::unary(UnaryOp::Neg, node)
    } else {
        node
    }
}

fn pop_one(stack: &mut Vec<Node>, token: &Token) -> ExprResult<Node> {
    stack.pop().ok_or_else(|| ExprError::MissingOperands {
        op: token.to_string(),
        expected: 1,
        found: 0,
    })
}

// Right operand comes off the stack first.
fn pop_pair(stack: &mut Vec<Node>, token: &Token) -> ExprResult<(Node, Node)> {
    if stack.len() < 2 {
        return Err(ExprError::MissingOperands {
            op: token.to_string(),
            expected: 2,
            found: stack.len(),
        });
    }
    let right = stack.pop().ok_or(ExprError::Empty)?;
    let left = stack.pop().ok_or(ExprError::Empty)?;
    Ok((left, right))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/build.rs"]
mod tests;
