use crate::expression::error::{ExprError, ExprResult};
use crate::expression::lexer::{Token, tokenize};

/// Reorder infix tokens into Reverse Polish Notation (shunting-yard).
///
/// Functions wait on the operator stack until the `)` closing their argument list; `,` flushes
/// the current argument. Both an unmatched `)` and a `(` that is never closed are errors.
pub fn infix_to_rpn(tokens: Vec<Token>) -> ExprResult<Vec<Token>> {
    let len = tokens.len();
    let mut out: Vec<Token> = Vec::with_capacity(len);
    let mut stack: Vec<Token> = Vec::new();

    for (i, token) in tokens.into_iter().enumerate() {
        match token {
            Token::Number(_) | Token::Ident { .. } => out.push(token),
            Token::Function { .. } | Token::LParen => stack.push(token),
            Token::Comma => loop {
                match stack.last() {
                    Some(Token::LParen) => break,
                    Some(_) => out.extend(stack.pop()),
                    None => return Err(ExprError::MismatchedParen { token: i }),
                }
            },
            Token::Operator(o1) => {
                while let Some(Token::Operator(o2)) = stack.last() {
                    let pops = (o1.is_left_assoc() && o1.precedence() <= o2.precedence())
                        || o1.precedence() < o2.precedence();
                    if !pops {
                        break;
                    }
                    out.extend(stack.pop());
                }
                stack.push(token);
            }
            Token::RParen => {
                loop {
                    match stack.pop() {
                        Some(Token::LParen) => break,
                        Some(t) => out.push(t),
                        None => return Err(ExprError::MismatchedParen { token: i }),
                    }
                }
                if matches!(stack.last(), Some(Token::Function { .. })) {
                    out.extend(stack.pop());
                }
            }
        }
    }

    while let Some(t) = stack.pop() {
        if t == Token::LParen {
            return Err(ExprError::MismatchedParen { token: len });
        }
        out.push(t);
    }

    Ok(out)
}

/// Tokenize `text` and convert it to RPN in one step.
pub fn parse_rpn(text: &str) -> ExprResult<Vec<Token>> {
    infix_to_rpn(tokenize(text)?)
}

/// Render an RPN sequence with single spaces, e.g. `3 2 / 4 12 3 + * +`.
pub fn rpn_to_string(rpn: &[Token]) -> String {
    let mut s = String::new();
    for (i, t) in rpn.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        s.push_str(&t.to_string());
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/expression/rpn.rs"]
mod tests;
