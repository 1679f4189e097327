//! Arithmetic operators lifted over [`Value`].
//!
//! Each operator is installed from two ingredients: the plain operation
//! for the scalar fast path, and a chain rule
//! `rule(x, y, dx, dy) -> d(x ∘ y)` for the derivative components. The
//! [`binary`] helper unpacks both operands (a plain scalar contributes a
//! zero derivative of whatever width the other operand carries), applies
//! the operator recursively to the primals, and applies the rule to each
//! component pair:
//!
//! - `add`: `dx + dy`
//! - `sub`: `dx − dy`
//! - `mul`: `x·dy + y·dx` (product rule)
//! - `div`: `(y·dx − x·dy)/y²`, with signed-infinity/NaN sentinels when
//!   the denominator is zero
//!
//! The rules receive *values*, not bare numbers, so they compose: when a
//! primal is itself active (higher-order differentiation), the arithmetic
//! inside the rule propagates the inner derivatives automatically.
//!
//! Plain-scalar operands are accepted on either side (`v * 2.0`,
//! `2.0 * v`) through ordinary `impl` blocks resolved at compile time, so
//! expressions mix literals and augmented values freely.

use num_traits::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::value::Value;

/// Lift a binary operation over augmented values.
///
/// `plain` computes the scalar result when no derivative information is
/// present; `rule` computes one derivative component from the operand
/// primals and the corresponding component pair.
///
/// # Panics
///
/// Panics if both operands are active with different derivative widths.
pub(crate) fn binary<T: Float>(
    x: &Value<T>,
    y: &Value<T>,
    plain: fn(T, T) -> T,
    rule: fn(&Value<T>, &Value<T>, &Value<T>, &Value<T>) -> Value<T>,
) -> Value<T> {
    match (x, y) {
        // Neither operand is active: plain numeric semantics, bit for bit.
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(plain(*a, *b)),
        _ => {
            let (xv, xd) = x.parts();
            let (yv, yd) = y.parts();
            let width = match (xd, yd) {
                (Some(xd), Some(yd)) => {
                    assert_eq!(
                        xd.len(),
                        yd.len(),
                        "operands carry derivative vectors of different widths"
                    );
                    xd.len()
                }
                (Some(xd), None) => xd.len(),
                (None, Some(yd)) => yd.len(),
                (None, None) => unreachable!("handled by the scalar fast path"),
            };
            let zero = Value::Scalar(T::zero());
            let dot: Vec<Value<T>> = (0..width)
                .map(|i| {
                    let dx = xd.map_or(&zero, |d| &d[i]);
                    let dy = yd.map_or(&zero, |d| &d[i]);
                    rule(xv, yv, dx, dy)
                })
                .collect();
            Value::active(binary(xv, yv, plain, rule), dot)
        }
    }
}

fn plain_add<T: Float>(a: T, b: T) -> T {
    a + b
}

fn plain_sub<T: Float>(a: T, b: T) -> T {
    a - b
}

fn plain_mul<T: Float>(a: T, b: T) -> T {
    a * b
}

fn plain_div<T: Float>(a: T, b: T) -> T {
    a / b
}

fn add_rule<T: Float>(_x: &Value<T>, _y: &Value<T>, dx: &Value<T>, dy: &Value<T>) -> Value<T> {
    dx + dy
}

fn sub_rule<T: Float>(_x: &Value<T>, _y: &Value<T>, dx: &Value<T>, dy: &Value<T>) -> Value<T> {
    dx - dy
}

/// Product rule: `d(x·y) = x·dy + y·dx`.
fn mul_rule<T: Float>(x: &Value<T>, y: &Value<T>, dx: &Value<T>, dy: &Value<T>) -> Value<T> {
    x * dy + y * dx
}

/// Quotient rule: `d(x/y) = (y·dx − x·dy)/y²`.
///
/// At `y = 0` the quotient rule has a pole. The derivative becomes a
/// signed infinity following the sign of the resolved numerator, or NaN
/// when the numerator is zero as well. Sentinels, not errors: a
/// singularity in one component must not abort the whole evaluation.
fn div_rule<T: Float>(x: &Value<T>, y: &Value<T>, dx: &Value<T>, dy: &Value<T>) -> Value<T> {
    let numerator = y * dx - x * dy;
    if y.resolve() == T::zero() {
        let n = numerator.resolve();
        if n > T::zero() {
            Value::Scalar(T::infinity())
        } else if n < T::zero() {
            Value::Scalar(T::neg_infinity())
        } else {
            Value::Scalar(T::nan())
        }
    } else {
        numerator / (y * y)
    }
}

macro_rules! lift_operator {
    ($op:ident, $method:ident, $plain:ident, $rule:ident) => {
        impl<T: Float> $op for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: Value<T>) -> Value<T> {
                binary(&self, &rhs, $plain, $rule)
            }
        }

        impl<'a, T: Float> $op<&'a Value<T>> for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: &'a Value<T>) -> Value<T> {
                binary(&self, rhs, $plain, $rule)
            }
        }

        impl<'a, T: Float> $op<Value<T>> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: Value<T>) -> Value<T> {
                binary(self, &rhs, $plain, $rule)
            }
        }

        impl<'a, 'b, T: Float> $op<&'b Value<T>> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: &'b Value<T>) -> Value<T> {
                binary(self, rhs, $plain, $rule)
            }
        }

        impl<T: Float> $op<T> for Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: T) -> Value<T> {
                binary(&self, &Value::Scalar(rhs), $plain, $rule)
            }
        }

        impl<'a, T: Float> $op<T> for &'a Value<T> {
            type Output = Value<T>;

            fn $method(self, rhs: T) -> Value<T> {
                binary(self, &Value::Scalar(rhs), $plain, $rule)
            }
        }
    };
}

lift_operator!(Add, add, plain_add, add_rule);
lift_operator!(Sub, sub, plain_sub, sub_rule);
lift_operator!(Mul, mul, plain_mul, mul_rule);
lift_operator!(Div, div, plain_div, div_rule);

// Scalar-on-the-left forms. These cannot be written generically (the
// uncovered type parameter would fall outside the coherence rules), so
// they are generated per concrete float type.
macro_rules! scalar_operand {
    ($($t:ty)*) => {$(
        impl Add<Value<$t>> for $t {
            type Output = Value<$t>;

            fn add(self, rhs: Value<$t>) -> Value<$t> {
                Value::Scalar(self) + rhs
            }
        }

        impl<'a> Add<&'a Value<$t>> for $t {
            type Output = Value<$t>;

            fn add(self, rhs: &'a Value<$t>) -> Value<$t> {
                Value::Scalar(self) + rhs
            }
        }

        impl Sub<Value<$t>> for $t {
            type Output = Value<$t>;

            fn sub(self, rhs: Value<$t>) -> Value<$t> {
                Value::Scalar(self) - rhs
            }
        }

        impl<'a> Sub<&'a Value<$t>> for $t {
            type Output = Value<$t>;

            fn sub(self, rhs: &'a Value<$t>) -> Value<$t> {
                Value::Scalar(self) - rhs
            }
        }

        impl Mul<Value<$t>> for $t {
            type Output = Value<$t>;

            fn mul(self, rhs: Value<$t>) -> Value<$t> {
                Value::Scalar(self) * rhs
            }
        }

        impl<'a> Mul<&'a Value<$t>> for $t {
            type Output = Value<$t>;

            fn mul(self, rhs: &'a Value<$t>) -> Value<$t> {
                Value::Scalar(self) * rhs
            }
        }

        impl Div<Value<$t>> for $t {
            type Output = Value<$t>;

            fn div(self, rhs: Value<$t>) -> Value<$t> {
                Value::Scalar(self) / rhs
            }
        }

        impl<'a> Div<&'a Value<$t>> for $t {
            type Output = Value<$t>;

            fn div(self, rhs: &'a Value<$t>) -> Value<$t> {
                Value::Scalar(self) / rhs
            }
        }
    )*};
}

scalar_operand!(f32 f64);

/// Negation: primal and every derivative component negated.
impl<T: Float> Neg for Value<T> {
    type Output = Value<T>;

    fn neg(self) -> Value<T> {
        match self {
            Value::Scalar(s) => Value::Scalar(-s),
            Value::Active { value, dot } => Value::Active {
                value: Box::new(-*value),
                dot: dot.into_iter().map(|d| -d).collect(),
            },
        }
    }
}

impl<'a, T: Float> Neg for &'a Value<T> {
    type Output = Value<T>;

    fn neg(self) -> Value<T> {
        -self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(v: f64, pos: usize, width: usize) -> Value<f64> {
        Value::from(v).seeded(pos, width)
    }

    #[test]
    fn plain_operands_keep_plain_semantics() {
        let r = Value::from(1.5) + Value::from(2.25);
        assert!(matches!(r, Value::Scalar(s) if s == 1.5 + 2.25));

        let r = Value::from(7.0) / Value::from(2.0);
        assert!(matches!(r, Value::Scalar(s) if s == 3.5));
    }

    #[test]
    fn addition_and_subtraction_combine_components() {
        let x = seeded(3.0, 0, 2);
        let y = seeded(4.0, 1, 2);

        let sum = &x + &y;
        assert_eq!(sum.resolve(), 7.0);
        assert_eq!(sum.at(&[0]), 1.0);
        assert_eq!(sum.at(&[1]), 1.0);

        let diff = &x - &y;
        assert_eq!(diff.resolve(), -1.0);
        assert_eq!(diff.at(&[0]), 1.0);
        assert_eq!(diff.at(&[1]), -1.0);
    }

    #[test]
    fn multiplication_implements_product_rule() {
        // f(x, y) = x·y at (3, 4)
        let x = seeded(3.0, 0, 2);
        let y = seeded(4.0, 1, 2);

        let product = &x * &y;
        assert_eq!(product.resolve(), 12.0);
        assert_eq!(product.at(&[0]), 4.0); // ∂(xy)/∂x = y
        assert_eq!(product.at(&[1]), 3.0); // ∂(xy)/∂y = x
    }

    #[test]
    fn division_implements_quotient_rule() {
        // f(x, y) = x/y at (6, 2)
        let x = seeded(6.0, 0, 2);
        let y = seeded(2.0, 1, 2);

        let quotient = &x / &y;
        assert_eq!(quotient.resolve(), 3.0);
        assert_eq!(quotient.at(&[0]), 0.5); // 1/y
        assert_eq!(quotient.at(&[1]), -1.5); // -x/y²
    }

    #[test]
    fn division_by_zero_yields_signed_sentinels() {
        // f(y) = 1/y at y = 0: numerator y·dx − x·dy = −1 < 0
        let y = seeded(0.0, 0, 1);
        let r = 1.0 / &y;
        assert_eq!(r.at(&[0]), f64::NEG_INFINITY);

        // f(y) = −1/y at y = 0: numerator +1 > 0
        let r = -1.0 / &y;
        assert_eq!(r.at(&[0]), f64::INFINITY);

        // 0/0 with dx > 0, dy = 0: numerator y·dx − x·dy is exactly 0
        let x = seeded(0.0, 0, 2);
        let y = seeded(0.0, 1, 2);
        let r = &x / &y;
        assert!(r.at(&[0]).is_nan());
        assert!(r.at(&[1]).is_nan());
    }

    #[test]
    fn scalar_operands_work_on_either_side() {
        let x = seeded(4.0, 0, 1);

        assert_eq!((&x + 1.0).resolve(), 5.0);
        assert_eq!((1.0 + &x).resolve(), 5.0);
        assert_eq!((&x * 3.0).at(&[0]), 3.0);
        assert_eq!((3.0 * &x).at(&[0]), 3.0);

        // Non-commutative operators keep their operand order.
        let r = 10.0 - &x;
        assert_eq!(r.resolve(), 6.0);
        assert_eq!(r.at(&[0]), -1.0);

        let r = 8.0 / &x;
        assert_eq!(r.resolve(), 2.0);
        assert_eq!(r.at(&[0]), -0.5); // d(8/x) = −8/x² = −0.5
    }

    #[test]
    fn plain_operand_contributes_zero_derivative() {
        let x = seeded(5.0, 0, 3);
        let r = &x * 2.0;
        assert_eq!(r.dot().len(), 3);
        assert_eq!(r.at(&[0]), 2.0);
        assert_eq!(r.at(&[1]), 0.0);
        assert_eq!(r.at(&[2]), 0.0);
    }

    #[test]
    #[should_panic(expected = "different widths")]
    fn mismatched_widths_panic() {
        let x = seeded(1.0, 0, 2);
        let y = seeded(2.0, 0, 3);
        let _ = &x + &y;
    }

    #[test]
    fn negation_flips_primal_and_components() {
        let x = seeded(3.0, 0, 2);
        let n = -&x;
        assert_eq!(n.resolve(), -3.0);
        assert_eq!(n.at(&[0]), -1.0);
        assert_eq!(n.at(&[1]), 0.0);

        assert!(matches!(-Value::from(2.0), Value::Scalar(s) if s == -2.0));
    }

    #[test]
    fn rules_compose_through_nested_values() {
        // Double seeding: d²/dx² of x² is 2.
        let x = seeded(9.0, 0, 1).seeded(0, 1);
        let sq = &x * &x;
        assert_eq!(sq.resolve(), 81.0);
        assert_eq!(sq.at(&[0]), 18.0);
        assert_eq!(sq.at(&[0, 0]), 2.0);
    }
}
