use arbor::{Arbor, ArborError, DataType};

fn build_err(expr: &str) -> (Arbor, ArborError) {
    let mut ast = Arbor::new();
    let err = ast.build(expr, DataType::Long).unwrap_err();
    (ast, err)
}

#[test]
fn unclosed_parenthesis() {
    let (_, err) = build_err("(1+2");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "unclosed parenthesis",
            pos: 4
        }
    );
}

#[test]
fn unclosed_function_scope() {
    let (_, err) = build_err("sqrt(2");
    assert!(matches!(
        err,
        ArborError::Token {
            msg: "unclosed parenthesis",
            ..
        }
    ));
}

#[test]
fn incomplete_expression() {
    let (_, err) = build_err("1+");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "incomplete expression",
            pos: 2
        }
    );
}

#[test]
fn missing_value() {
    let (_, err) = build_err("1++2");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "missing value",
            pos: 2
        }
    );
}

#[test]
fn unbalanced_parenthesis() {
    let (_, err) = build_err("(1+2))");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "unbalanced parenthesis",
            pos: 5
        }
    );
}

#[test]
fn stray_closing_parenthesis() {
    let (_, err) = build_err(")");
    assert!(matches!(
        err,
        ArborError::Token {
            msg: "unbalanced parenthesis",
            ..
        }
    ));
}

#[test]
fn empty_parenthesis() {
    let (_, err) = build_err("()");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "empty parenthesis",
            pos: 1
        }
    );
}

#[test]
fn missing_operator() {
    let (_, err) = build_err("2 3");
    assert_eq!(
        err,
        ArborError::Token {
            msg: "missing operator",
            pos: 2
        }
    );
}

#[test]
fn unrecognised_tokens() {
    for expr in ["2 @", "1 & 2", "1 | 2", "1 = 2", "sqrt 2", "abs(1)"] {
        let (_, err) = build_err(expr);
        assert!(
            matches!(
                err,
                ArborError::Token {
                    msg: "unrecognised token",
                    ..
                }
            ),
            "{expr}: {err:?}"
        );
    }
}

#[test]
fn blank_input() {
    for expr in ["", "   ", "\t\n"] {
        let mut ast = Arbor::new();
        assert_eq!(
            ast.build(expr, DataType::Double).unwrap_err(),
            ArborError::InvalidString
        );
    }
}

#[test]
fn build_twice_fails() {
    let mut ast = Arbor::new();
    ast.build("1+1", DataType::Long).unwrap();
    assert_eq!(
        ast.build("2+2", DataType::Long).unwrap_err(),
        ArborError::AlreadyBuilt
    );
}

#[test]
fn eval_before_build_fails() {
    let mut ast = Arbor::new();
    assert_eq!(ast.eval_double(&[]).unwrap_err(), ArborError::NotBuilt);
}

#[test]
fn wrong_eval_entry_point() {
    let mut ast = Arbor::new();
    ast.build("1+1", DataType::Double).unwrap();
    assert_eq!(
        ast.eval_long(&[]).unwrap_err(),
        ArborError::DataType {
            built: DataType::Double,
            requested: DataType::Long
        }
    );
}

#[test]
fn errors_are_sticky() {
    let (mut ast, err) = build_err("1+");
    // Every later call reports the first error without doing any work.
    assert_eq!(ast.eval_long(&[]).unwrap_err(), err);
    assert_eq!(ast.build("1+1", DataType::Long).unwrap_err(), err);
    assert_eq!(ast.last_error(), Some(&err));
}

#[test]
fn eval_errors_are_sticky_too() {
    let mut ast = Arbor::new();
    ast.build("$2", DataType::Double).unwrap();
    let err = ast.eval_double(&[1.0]).unwrap_err();
    assert_eq!(err, ArborError::ValuesLen { expected: 2, got: 1 });
    // A well-sized slice no longer helps; the handle is poisoned.
    assert_eq!(ast.eval_double(&[1.0, 2.0]).unwrap_err(), err);
}

#[test]
fn caret_diagnostic() {
    let mut ast = Arbor::new();
    assert!(ast.build("1 + @", DataType::Long).is_err());
    let mut out = Vec::new();
    ast.write_error(&mut out, "Error:").unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error: unrecognised token.\n1 + @\n    ^\n"
    );
}

#[test]
fn diagnostic_without_prefix() {
    let mut ast = Arbor::new();
    assert!(ast.build("", DataType::Long).is_err());
    let mut out = Vec::new();
    ast.write_error(&mut out, "").unwrap();
    // Non-token errors carry no caret line.
    assert_eq!(String::from_utf8(out).unwrap(), "invalid expression string.\n");
}

#[test]
fn no_error_writes_nothing() {
    let mut ast = Arbor::new();
    ast.build("1", DataType::Long).unwrap();
    let mut out = Vec::new();
    ast.write_error(&mut out, "Error:").unwrap();
    assert!(out.is_empty());
}
