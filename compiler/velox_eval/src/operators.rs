//! Binary and unary operators.
//!
//! Dispatch is on the pair of operand kinds. Every pair without a row in
//! these tables is an unsupported operation; there are no implicit
//! conversions beyond integer-to-real promotion and string concatenation.

use std::rc::Rc;

use velox_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, integer_overflow, unsupported_binary, unsupported_unary, EvalResult,
};
use crate::value::{Color, ItemState, Vector2};

/// Apply an arithmetic operator (`+ - * / %`).
pub fn arithmetic(op: BinaryOp, lhs: &ItemState, rhs: &ItemState) -> EvalResult<ItemState> {
    use ItemState::{Color as C, Integer, Real, String as Str, Vector as V};

    let symbol = op.as_symbol();
    match (lhs, rhs) {
        (Integer(a), Integer(b)) => integer_arithmetic(op, *a, *b).map(Integer),
        (Integer(_) | Real(_), Integer(_) | Real(_)) => {
            real_arithmetic(op, lhs.to_real()?, rhs.to_real()?).map(Real)
        }
        (Str(a), other) if op == BinaryOp::Add => {
            Ok(Str(Rc::from(format!("{a}{other}").as_str())))
        }
        (C(a), C(b)) => color_arithmetic(op, *a, *b).map(C),
        (C(color), Integer(_) | Real(_)) => {
            let factor = rhs.to_real()?;
            match op {
                BinaryOp::Mul => Ok(C(color.scale(|c| c * factor))),
                BinaryOp::Div if factor == 0.0 => Err(division_by_zero(symbol)),
                BinaryOp::Div => Ok(C(color.scale(|c| c / factor))),
                _ => Err(unsupported_binary(symbol, lhs.kind(), rhs.kind())),
            }
        }
        (V(a), V(b)) => vector_arithmetic(op, *a, *b).map(V),
        (V(v), Integer(_) | Real(_)) => {
            let factor = rhs.to_real()?;
            match op {
                BinaryOp::Mul => Ok(V(v.map(|c| c * factor))),
                BinaryOp::Div if factor == 0.0 => Err(division_by_zero(symbol)),
                BinaryOp::Div => Ok(V(v.map(|c| c / factor))),
                _ => Err(unsupported_binary(symbol, lhs.kind(), rhs.kind())),
            }
        }
        (Integer(_) | Real(_), V(v)) if op == BinaryOp::Mul => {
            let factor = lhs.to_real()?;
            Ok(V(v.map(|c| c * factor)))
        }
        _ => Err(unsupported_binary(symbol, lhs.kind(), rhs.kind())),
    }
}

fn integer_arithmetic(op: BinaryOp, a: i64, b: i64) -> EvalResult<i64> {
    let symbol = op.as_symbol();
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => return Err(division_by_zero(symbol)),
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod => a.checked_rem(b),
        _ => {
            return Err(unsupported_binary(
                symbol,
                crate::ValueKind::Integer,
                crate::ValueKind::Integer,
            ))
        }
    };
    result.ok_or_else(|| integer_overflow(symbol))
}

fn real_arithmetic(op: BinaryOp, a: f64, b: f64) -> EvalResult<f64> {
    let symbol = op.as_symbol();
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => Err(division_by_zero(symbol)),
        BinaryOp::Div => Ok(a / b),
        BinaryOp::Mod => Ok(a % b),
        _ => Err(unsupported_binary(
            symbol,
            crate::ValueKind::Real,
            crate::ValueKind::Real,
        )),
    }
}

fn color_arithmetic(op: BinaryOp, a: Color, b: Color) -> EvalResult<Color> {
    match op {
        BinaryOp::Add => Ok(a.zip_with(b, |x, y| x + y)),
        BinaryOp::Sub => Ok(a.zip_with(b, |x, y| x - y)),
        BinaryOp::Mul => Ok(a.zip_with(b, |x, y| x * y / 255)),
        BinaryOp::Div if b.has_zero_channel() => Err(division_by_zero(op.as_symbol())),
        BinaryOp::Div => Ok(a.zip_with(b, |x, y| x * 255 / y)),
        _ => Err(unsupported_binary(
            op.as_symbol(),
            crate::ValueKind::Color,
            crate::ValueKind::Color,
        )),
    }
}

fn vector_arithmetic(op: BinaryOp, a: Vector2, b: Vector2) -> EvalResult<Vector2> {
    match op {
        BinaryOp::Add => Ok(a.zip_with(b, |x, y| x + y)),
        BinaryOp::Sub => Ok(a.zip_with(b, |x, y| x - y)),
        BinaryOp::Mul => Ok(a.zip_with(b, |x, y| x * y)),
        BinaryOp::Div if b.x == 0.0 || b.y == 0.0 => Err(division_by_zero(op.as_symbol())),
        BinaryOp::Div => Ok(a.zip_with(b, |x, y| x / y)),
        _ => Err(unsupported_binary(
            op.as_symbol(),
            crate::ValueKind::Vector,
            crate::ValueKind::Vector,
        )),
    }
}

/// Apply a relational operator (`== != < <= > >=`).
pub fn relational(op: BinaryOp, lhs: &ItemState, rhs: &ItemState) -> EvalResult<bool> {
    use std::cmp::Ordering;
    use ItemState::{Boolean, Color as C, Integer, Real, String as Str, Undefined, Vector as V};

    let ordering: Option<Ordering> = match (lhs, rhs) {
        (Integer(a), Integer(b)) => Some(a.cmp(b)),
        (Integer(_) | Real(_), Integer(_) | Real(_)) => lhs.to_real()?.partial_cmp(&rhs.to_real()?),
        (Str(a), Str(b)) => Some(a.cmp(b)),
        (Boolean(a), Boolean(b)) => return equality(op, a == b, lhs, rhs),
        (C(a), C(b)) => return equality(op, a == b, lhs, rhs),
        (V(a), V(b)) => return equality(op, a == b, lhs, rhs),
        (Undefined, Undefined) => return equality(op, true, lhs, rhs),
        _ => return Err(unsupported_binary(op.as_symbol(), lhs.kind(), rhs.kind())),
    };

    // NaN compares unequal to everything, including itself.
    let Some(ordering) = ordering else {
        return Ok(op == BinaryOp::NotEq);
    };
    Ok(match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(unsupported_binary(op.as_symbol(), lhs.kind(), rhs.kind())),
    })
}

/// Kinds with equality but no ordering.
fn equality(op: BinaryOp, equal: bool, lhs: &ItemState, rhs: &ItemState) -> EvalResult<bool> {
    match op {
        BinaryOp::Eq => Ok(equal),
        BinaryOp::NotEq => Ok(!equal),
        _ => Err(unsupported_binary(op.as_symbol(), lhs.kind(), rhs.kind())),
    }
}

/// Apply a prefix unary operator.
pub fn unary(op: UnaryOp, operand: &ItemState) -> EvalResult<ItemState> {
    match (op, operand) {
        (UnaryOp::Neg, ItemState::Integer(i)) => i
            .checked_neg()
            .map(ItemState::Integer)
            .ok_or_else(|| integer_overflow(op.as_symbol())),
        (UnaryOp::Neg, ItemState::Real(r)) => Ok(ItemState::Real(-r)),
        (UnaryOp::Neg, ItemState::Vector(v)) => Ok(ItemState::Vector(v.map(|c| -c))),
        (UnaryOp::Not, ItemState::Boolean(_) | ItemState::Integer(_)) => {
            Ok(ItemState::Boolean(!operand.to_boolean()?))
        }
        _ => Err(unsupported_unary(op.as_symbol(), operand.kind())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::EvalErrorKind;
    use crate::ValueKind;

    fn int(i: i64) -> ItemState {
        ItemState::Integer(i)
    }

    fn real(r: f64) -> ItemState {
        ItemState::Real(r)
    }

    fn text(s: &str) -> ItemState {
        ItemState::String(Rc::from(s))
    }

    #[test]
    fn integer_arithmetic_is_checked() {
        assert_eq!(arithmetic(BinaryOp::Add, &int(2), &int(3)).unwrap().to_string(), "5");
        assert_eq!(arithmetic(BinaryOp::Div, &int(7), &int(2)).unwrap().to_string(), "3");
        assert_eq!(arithmetic(BinaryOp::Mod, &int(-7), &int(3)).unwrap().to_string(), "-1");

        let err = arithmetic(BinaryOp::Add, &int(i64::MAX), &int(1)).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { op: "+" });
        let err = arithmetic(BinaryOp::Div, &int(i64::MIN), &int(-1)).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { op: "/" });
    }

    #[test]
    fn division_by_zero_is_an_error() {
        for op in [BinaryOp::Div, BinaryOp::Mod] {
            let err = arithmetic(op, &int(1), &int(0)).unwrap_err();
            assert!(matches!(err.kind, EvalErrorKind::DivisionByZero { .. }));
            let err = arithmetic(op, &real(1.0), &real(0.0)).unwrap_err();
            assert!(matches!(err.kind, EvalErrorKind::DivisionByZero { .. }));
        }
    }

    #[test]
    fn mixed_numbers_promote_to_real() {
        assert_eq!(arithmetic(BinaryOp::Mul, &int(2), &real(1.5)).unwrap().to_string(), "3.0");
        assert_eq!(arithmetic(BinaryOp::Sub, &real(1.5), &int(1)).unwrap().to_string(), "0.5");
    }

    #[test]
    fn string_concatenates_any_kind() {
        let v = ItemState::Vector(Vector2::new(1.0, 2.0));
        assert_eq!(arithmetic(BinaryOp::Add, &text("v="), &v).unwrap().to_string(), "v=<1.0,2.0>");
        assert_eq!(arithmetic(BinaryOp::Add, &text("n"), &int(4)).unwrap().to_string(), "n4");

        let err = arithmetic(BinaryOp::Add, &int(4), &text("n")).unwrap_err();
        assert_eq!(
            err.message,
            "unsupported operation between types integer and string (`+`)"
        );
        let err = arithmetic(BinaryOp::Mul, &text("a"), &int(2)).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
    }

    #[test]
    fn color_arithmetic_clamps() {
        let a = ItemState::Color(Color::new(200, 10, 0, 255));
        let b = ItemState::Color(Color::new(100, 20, 5, 255));
        assert_eq!(arithmetic(BinaryOp::Add, &a, &b).unwrap().to_string(), "|255,30,5,255|");
        assert_eq!(arithmetic(BinaryOp::Sub, &a, &b).unwrap().to_string(), "|100,0,0,0|");
        assert_eq!(arithmetic(BinaryOp::Mul, &a, &real(0.5)).unwrap().to_string(), "|100,5,0,255|");

        let err = arithmetic(BinaryOp::Mul, &text("s"), &a).unwrap_err();
        assert_eq!(
            err.message,
            "unsupported operation between types string and color (`*`)"
        );
    }

    #[test]
    fn vector_arithmetic() {
        let a = ItemState::Vector(Vector2::new(1.0, 2.0));
        let b = ItemState::Vector(Vector2::new(3.0, 4.0));
        assert_eq!(arithmetic(BinaryOp::Add, &a, &b).unwrap().to_string(), "<4.0,6.0>");
        assert_eq!(arithmetic(BinaryOp::Mul, &int(2), &a).unwrap().to_string(), "<2.0,4.0>");
        assert_eq!(arithmetic(BinaryOp::Div, &b, &int(2)).unwrap().to_string(), "<1.5,2.0>");
        assert!(arithmetic(BinaryOp::Mod, &a, &b).is_err());
    }

    #[test]
    fn relational_table() {
        assert!(relational(BinaryOp::Lt, &int(1), &real(1.5)).unwrap());
        assert!(relational(BinaryOp::GtEq, &text("b"), &text("a")).unwrap());
        assert!(relational(BinaryOp::Eq, &ItemState::Undefined, &ItemState::Undefined).unwrap());
        assert!(!relational(BinaryOp::NotEq, &ItemState::Undefined, &ItemState::Undefined).unwrap());
        assert!(relational(BinaryOp::NotEq, &real(f64::NAN), &real(f64::NAN)).unwrap());
        assert!(!relational(BinaryOp::Eq, &real(f64::NAN), &real(f64::NAN)).unwrap());

        let err = relational(BinaryOp::Lt, &ItemState::Boolean(true), &ItemState::Boolean(false))
            .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
        let err = relational(BinaryOp::Eq, &ItemState::Undefined, &int(0)).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UnsupportedOperation {
                op: "==",
                left: ValueKind::Undefined,
                right: Some(ValueKind::Integer),
            }
        );
    }

    #[test]
    fn unary_operators() {
        assert_eq!(unary(UnaryOp::Neg, &int(3)).unwrap().to_string(), "-3");
        assert_eq!(unary(UnaryOp::Not, &int(0)).unwrap().to_string(), "true");
        assert!(unary(UnaryOp::Neg, &int(i64::MIN)).is_err());
        let err = unary(UnaryOp::Neg, &text("x")).unwrap_err();
        assert_eq!(err.message, "unsupported operation `-` on type string");
    }
}
