use arbor::{Arbor, ArborError, DataType};

fn eval_double(expr: &str) -> f64 {
    let mut ast = Arbor::new();
    ast.build(expr, DataType::Double).unwrap();
    ast.eval_double(&[]).unwrap()
}

#[test]
fn exponent_forms() {
    assert_eq!(eval_double("1e3"), 1000.0);
    assert_eq!(eval_double("1.5e-2"), 0.015);
    assert_eq!(eval_double("2.5E+1"), 25.0);
}

#[test]
fn bare_fractions() {
    assert_eq!(eval_double(".5 + .25"), 0.75);
    assert_eq!(eval_double("1."), 1.0);
}

#[test]
fn infinities_and_nan() {
    assert_eq!(eval_double("inf"), f64::INFINITY);
    assert_eq!(eval_double("-inf"), f64::NEG_INFINITY);
    assert_eq!(eval_double("Infinity"), f64::INFINITY);
    assert!(eval_double("nan").is_nan());
    // NaN compares unequal to itself.
    assert_eq!(eval_double("nan == nan"), 0.0);
}

#[test]
fn dangling_exponent_is_rejected() {
    // "2" parses as a number; the stray "e" is not a token.
    let mut ast = Arbor::new();
    let err = ast.build("2e", DataType::Double).unwrap_err();
    assert_eq!(
        err,
        ArborError::Token {
            msg: "unrecognised token",
            pos: 1
        }
    );
}

#[test]
fn long_mode_rejects_fractions() {
    let mut ast = Arbor::new();
    let err = ast.build("9.5", DataType::Long).unwrap_err();
    assert!(matches!(
        err,
        ArborError::Token {
            msg: "unrecognised token",
            ..
        }
    ));
}

#[test]
fn long_mode_rejects_inf() {
    let mut ast = Arbor::new();
    let err = ast.build("inf", DataType::Long).unwrap_err();
    assert!(matches!(
        err,
        ArborError::Token {
            msg: "unrecognised token",
            ..
        }
    ));
}

#[test]
fn long_literals() {
    let mut ast = Arbor::new();
    ast.build("12 + 34", DataType::Long).unwrap();
    assert_eq!(ast.eval_long(&[]).unwrap(), 46);
}
