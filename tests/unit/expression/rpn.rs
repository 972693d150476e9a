use super::*;

fn rpn(text: &str) -> String {
    rpn_to_string(&parse_rpn(text).unwrap())
}

#[test]
fn canonical_expressions_reorder_as_expected() {
    assert_eq!(rpn("3/2 + 4*(12+3)"), "3 2 / 4 12 3 + * +");
    assert_eq!(rpn("(1+2)*(3/4)^(5+6)"), "1 2 + 3 4 / 5 6 + ^ *");
    assert_eq!(
        rpn("cos((1.3+1)^(1/3)) - log(-2*3/-14)"),
        "1.3 1 + 1 3 / ^ cos -2 3 * -14 / log -"
    );
    assert_eq!(rpn("5 + ((1 + 2) * 4) - 3"), "5 1 2 + 4 * + 3 -");
}

#[test]
fn left_associative_operators_pop_equal_precedence() {
    assert_eq!(rpn("8 - 3 - 2"), "8 3 - 2 -");
    assert_eq!(rpn("8 / 4 * 2"), "8 4 / 2 *");
}

#[test]
fn exponent_is_right_associative() {
    assert_eq!(rpn("2^3^2"), "2 3 2 ^ ^");
    assert_eq!(rpn("2^3+1"), "2 3 ^ 1 +");
    assert_eq!(rpn("3 + 4 * 2 / (1 - 5) ^ 2 ^ 3"), "3 4 2 * 1 5 - 2 3 ^ ^ / +");
}

#[test]
fn functions_attach_to_their_argument() {
    assert_eq!(rpn("sin(-1.4*y) + cos(-1.4*x)"), "-1.4 y * sin -1.4 x * cos +");
    assert_eq!(rpn("sin(cos(x))"), "x cos sin");
    assert_eq!(rpn("-sin(x)"), "x -sin");
}

#[test]
fn comma_separates_function_arguments() {
    assert_eq!(rpn("pow(2, 3)"), "2 3 pow");
    assert_eq!(rpn("PI*pow(9/-2,2)"), "PI 9 -2 / 2 pow *");
}

#[test]
fn unmatched_parentheses_fail() {
    assert!(matches!(
        parse_rpn("(2+3"),
        Err(ExprError::MismatchedParen { .. })
    ));
    assert_eq!(
        parse_rpn("2+3)"),
        Err(ExprError::MismatchedParen { token: 3 })
    );
    assert!(matches!(
        parse_rpn("1, 2"),
        Err(ExprError::MismatchedParen { token: 1 })
    ));
}
