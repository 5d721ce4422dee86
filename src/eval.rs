use crate::ast::{NodeId, Payload, Tree};
use crate::token::TokenKind;

/// Recursive double-precision evaluator.
///
/// The error flag is threaded through the recursion: once set, every call
/// returns 0 immediately. Operands are evaluated left to right.
pub(crate) fn eval_double(tree: &Tree, id: NodeId, values: &[f64], err: &mut bool) -> f64 {
    if *err {
        return 0.0;
    }
    let node = tree.node(id);
    match node.kind {
        TokenKind::Num => {
            if let Payload::Double(v) = node.value {
                return v;
            }
        }
        TokenKind::Var => {
            if let Payload::Var(idx) = node.value {
                return values[idx as usize];
            }
        }
        _ if node.kind.arity() == 1 => {
            if let Some(left) = node.left {
                let v = eval_double(tree, left, values, err);
                match node.kind {
                    TokenKind::Neg => return -v,
                    TokenKind::Not => return bool_double(v == 0.0),
                    TokenKind::Sqrt => return v.sqrt(),
                    TokenKind::Ln => return v.ln(),
                    TokenKind::Log => return v.log10(),
                    _ => {}
                }
            }
        }
        _ => {
            if let (Some(left), Some(right)) = (node.left, node.right) {
                let v1 = eval_double(tree, left, values, err);
                let v2 = eval_double(tree, right, values, err);
                match node.kind {
                    TokenKind::Plus => return v1 + v2,
                    TokenKind::Minus => return v1 - v2,
                    TokenKind::Mul => return v1 * v2,
                    TokenKind::Div => return v1 / v2,
                    TokenKind::Pow => return v1.powf(v2),
                    TokenKind::And => return bool_double(v1 != 0.0 && v2 != 0.0),
                    TokenKind::Or => return bool_double(v1 != 0.0 || v2 != 0.0),
                    TokenKind::Eq => return bool_double(v1 == v2),
                    TokenKind::Neq => return bool_double(v1 != v2),
                    TokenKind::Gt => return bool_double(v1 > v2),
                    TokenKind::Ge => return bool_double(v1 >= v2),
                    TokenKind::Lt => return bool_double(v1 < v2),
                    TokenKind::Le => return bool_double(v1 <= v2),
                    _ => {}
                }
            }
        }
    }
    *err = true;
    0.0
}

/// Recursive integer evaluator.
///
/// `sqrt`, `ln`, `log`, and `^` route through floating point and truncate
/// toward zero. Addition, subtraction, and multiplication wrap; division
/// truncates toward zero and panics on a zero divisor.
pub(crate) fn eval_long(tree: &Tree, id: NodeId, values: &[i64], err: &mut bool) -> i64 {
    if *err {
        return 0;
    }
    let node = tree.node(id);
    match node.kind {
        TokenKind::Num => {
            if let Payload::Long(v) = node.value {
                return v;
            }
        }
        TokenKind::Var => {
            if let Payload::Var(idx) = node.value {
                return values[idx as usize];
            }
        }
        _ if node.kind.arity() == 1 => {
            if let Some(left) = node.left {
                let v = eval_long(tree, left, values, err);
                match node.kind {
                    TokenKind::Neg => return v.wrapping_neg(),
                    TokenKind::Not => return (v == 0) as i64,
                    TokenKind::Sqrt => return (v as f64).sqrt() as i64,
                    TokenKind::Ln => return (v as f64).ln() as i64,
                    TokenKind::Log => return (v as f64).log10() as i64,
                    _ => {}
                }
            }
        }
        _ => {
            if let (Some(left), Some(right)) = (node.left, node.right) {
                let v1 = eval_long(tree, left, values, err);
                let v2 = eval_long(tree, right, values, err);
                match node.kind {
                    TokenKind::Plus => return v1.wrapping_add(v2),
                    TokenKind::Minus => return v1.wrapping_sub(v2),
                    TokenKind::Mul => return v1.wrapping_mul(v2),
                    TokenKind::Div => return v1 / v2,
                    TokenKind::Pow => return (v1 as f64).powf(v2 as f64) as i64,
                    TokenKind::And => return (v1 != 0 && v2 != 0) as i64,
                    TokenKind::Or => return (v1 != 0 || v2 != 0) as i64,
                    TokenKind::Eq => return (v1 == v2) as i64,
                    TokenKind::Neq => return (v1 != v2) as i64,
                    TokenKind::Gt => return (v1 > v2) as i64,
                    TokenKind::Ge => return (v1 >= v2) as i64,
                    TokenKind::Lt => return (v1 < v2) as i64,
                    TokenKind::Le => return (v1 <= v2) as i64,
                    _ => {}
                }
            }
        }
    }
    *err = true;
    0
}

fn bool_double(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
