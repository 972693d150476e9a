use super::*;
use crate::expression::rpn::parse_rpn;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn build(text: &str, vars: &[&str], consts: &[&str]) -> ExprResult<Node> {
    let variables = names(vars);
    let constants = names(consts);
    let rpn = parse_rpn(text)?;
    build_tree(
        &rpn,
        Scope {
            variables: &variables,
            constants: &constants,
        },
    )
}

#[test]
fn builds_single_connected_tree() {
    let tree = build("3/2 + 4*(12+3)", &[], &[]).unwrap();
    assert_eq!(tree.node_count(), 9);
    assert_eq!(tree.eval(&[], &[]), 61.5);
}

#[test]
fn resolves_variables_before_constants_before_builtins() {
    let tree = build("x", &["x"], &["x"]).unwrap();
    assert_eq!(tree, Node::leaf(Leaf::Var(0)));

    let tree = build("e", &["x"], &["e"]).unwrap();
    assert_eq!(tree, Node::leaf(Leaf::Const(0)));

    let tree = build("E", &["x"], &[]).unwrap();
    assert_eq!(tree, Node::leaf(Leaf::Number(std::f64::consts::E)));

    let tree = build("Pi", &[], &[]).unwrap();
    assert_eq!(tree, Node::leaf(Leaf::Number(std::f64::consts::PI)));
}

#[test]
fn implicit_negation_wraps_leaf_and_function() {
    let tree = build("-x", &["x"], &[]).unwrap();
    assert_eq!(tree, Node::unary(UnaryOp::Neg, Node::leaf(Leaf::Var(0))));
    assert_eq!(tree.eval(&[4.0], &[]), -4.0);

    let tree = build("2*-abs(x)", &["x"], &[]).unwrap();
    assert_eq!(tree.eval(&[-3.0], &[]), -6.0);
}

#[test]
fn pow_function_is_binary() {
    let tree = build("pow(2, 10)", &[], &[]).unwrap();
    assert_eq!(tree.eval(&[], &[]), 1024.0);
}

#[test]
fn unresolved_identifier_fails() {
    assert_eq!(
        build("x + q", &["x"], &[]),
        Err(ExprError::UnresolvedIdentifier("q".to_owned()))
    );
}

#[test]
fn operand_underflow_fails() {
    assert_eq!(
        build("2 *", &[], &[]),
        Err(ExprError::MissingOperands {
            op: "*".to_owned(),
            expected: 2,
            found: 1,
        })
    );
    assert!(matches!(
        build("sin()", &[], &[]),
        Err(ExprError::MissingOperands { expected: 1, .. })
    ));
}

#[test]
fn leftover_operands_fail() {
    assert_eq!(build("2 3", &[], &[]), Err(ExprError::DanglingOperands(2)));
}
