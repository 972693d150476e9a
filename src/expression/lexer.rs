use std::fmt;

use crate::expression::error::{ExprError, ExprResult};

/// Characters that always form a token of their own.
const SPECIAL_CHARS: [char; 9] = ['(', ')', '%', '+', '-', '*', '/', '^', ','];

/// Binary infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Rem),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
            Self::Pow => '^',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Pow => 4,
            Self::Mul | Self::Div | Self::Rem => 3,
            Self::Add | Self::Sub => 2,
        }
    }

    /// `^` groups right to left, everything else left to right.
    pub fn is_left_assoc(self) -> bool {
        !matches!(self, Self::Pow)
    }
}

/// Prefix functions recognised by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Abs,
    Ln,
    Log,
    Exp,
    Sqrt,
    /// Two-argument power, `pow(base, exponent)`.
    Pow,
}

/// Keyword table, matched as case-insensitive substrings in this order.
///
/// Substring matching means any identifier containing one of these keywords is read as that
/// function; declared names are checked against this table up front.
pub(crate) const FUNCTION_KEYWORDS: [(&str, Function); 9] = [
    ("SQRT", Function::Sqrt),
    ("SIN", Function::Sin),
    ("COS", Function::Cos),
    ("TAN", Function::Tan),
    ("ABS", Function::Abs),
    ("LN", Function::Ln),
    ("LOG", Function::Log),
    ("EXP", Function::Exp),
    ("POW", Function::Pow),
];

impl Function {
    /// First keyword contained in `word`, ignoring ASCII case.
    pub(crate) fn find_in(word: &str) -> Option<(&'static str, Function)> {
        let upper = word.to_ascii_uppercase();
        FUNCTION_KEYWORDS
            .iter()
            .copied()
            .find(|(kw, _)| upper.contains(kw))
    }

    /// Number of arguments the function consumes.
    pub fn arity(self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Abs => "abs",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Pow => "pow",
        }
    }
}

/// A lexical token.
///
/// `negated` marks an implicit unary minus fused into the token by the rewrite passes.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal (already negated when a minus was fused into it).
    Number(f64),
    /// Variable, constant or built-in (`pi`, `e`) name; resolved when the tree is built.
    Ident {
        name: String,
        /// Implicit negation.
        negated: bool,
    },
    Function {
        func: Function,
        /// Implicit negation of the function's result.
        negated: bool,
    },
    Operator(Operator),
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn is_value(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Ident { .. })
    }

    fn is_minus(&self) -> bool {
        matches!(self, Self::Operator(Operator::Sub))
    }

    /// Tokens after which a `-` can only be a sign, never a subtraction.
    fn opens_operand(&self) -> bool {
        matches!(self, Self::LParen | Self::Comma | Self::Operator(_))
    }

    fn negate(&mut self) {
        match self {
            Self::Number(v) => *v = -*v,
            Self::Ident { negated, .. } | Self::Function { negated, .. } => *negated = !*negated,
            Self::Operator(_) | Self::LParen | Self::RParen | Self::Comma => {}
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |negated: bool| if negated { "-" } else { "" };
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Ident { name, negated } => write!(f, "{}{name}", sign(*negated)),
            Self::Function { func, negated } => write!(f, "{}{}", sign(*negated), func.name()),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
        }
    }
}

/// Split `text` into tokens and apply the unary-minus rewrites.
pub fn tokenize(text: &str) -> ExprResult<Vec<Token>> {
    let mut tokens = split(text)
        .iter()
        .map(|word| classify(word))
        .collect::<ExprResult<Vec<_>>>()?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }

    fuse_leading_minus(&mut tokens);
    fuse_sign_after_operator(&mut tokens);
    expand_negated_group(&mut tokens);
    Ok(tokens)
}

/// Pad every special character with spaces and split on whitespace.
pub(crate) fn split(text: &str) -> Vec<String> {
    let mut padded = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            padded.push(' ');
            padded.push(c);
            padded.push(' ');
        } else {
            padded.push(c);
        }
    }
    padded.split_whitespace().map(str::to_owned).collect()
}

fn classify(word: &str) -> ExprResult<Token> {
    if let Some((_, func)) = Function::find_in(word) {
        return Ok(Token::Function {
            func,
            negated: false,
        });
    }

    let mut chars = word.chars();
    let first = chars.next().ok_or(ExprError::Empty)?;

    if first.is_ascii_digit() || first == '.' {
        return word
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ExprError::MalformedNumber(word.to_owned()));
    }

    if is_identifier(word) {
        return Ok(Token::Ident {
            name: word.to_owned(),
            negated: false,
        });
    }

    if chars.next().is_none() {
        if let Some(op) = Operator::from_char(first) {
            return Ok(Token::Operator(op));
        }
        match first {
            ',' => return Ok(Token::Comma),
            '(' => return Ok(Token::LParen),
            ')' => return Ok(Token::RParen),
            _ => {}
        }
    }

    Err(ExprError::UnexpectedToken(word.to_owned()))
}

pub(crate) fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// `- 3 ...` at the very start becomes `-3 ...`.
fn fuse_leading_minus(tokens: &mut Vec<Token>) {
    let fusable = match tokens.get(1) {
        Some(next) => next.is_value() || matches!(next, Token::Function { .. }),
        None => false,
    };
    if tokens[0].is_minus() && fusable {
        tokens.remove(0);
        tokens[0].negate();
    }
}

/// `( - x`, `* - 3`, `^ - sin` and friends fuse the sign into the following operand.
fn fuse_sign_after_operator(tokens: &mut Vec<Token>) {
    let mut i = 1;
    while i + 1 < tokens.len() {
        let fusable = tokens[i].is_minus()
            && tokens[i - 1].opens_operand()
            && (tokens[i + 1].is_value() || matches!(tokens[i + 1], Token::Function { .. }));
        if fusable {
            tokens.remove(i);
            tokens[i].negate();
        }
        i += 1;
    }
}

/// A sign in front of a parenthesised group becomes `-1 * ( ... )`.
///
/// Only applies where the `-` cannot be a subtraction, so `5 - (1 + 2)` is left alone.
fn expand_negated_group(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 1 < tokens.len() {
        let unary_position = i == 0 || tokens[i - 1].opens_operand();
        if tokens[i].is_minus() && unary_position && tokens[i + 1] == Token::LParen {
            tokens[i] = Token::Number(-1.0);
            tokens.insert(i + 1, Token::Operator(Operator::Mul));
            i += 1;
        }
        i += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
