//! Elementary functions lifted over [`Value`]: a drop-in replacement for
//! plain-math call sites.
//!
//! Every function here is transparent to plain numbers (applied to a
//! [`Value::Scalar`] it returns exactly what the underlying float
//! operation returns, bit for bit) and propagates derivatives through
//! active values. Code written against ordinary math functions becomes
//! differentiable by calling these instead.
//!
//! Each entry is built by [`unary`] from two ingredients: the plain
//! implementation and the derivative formula `g` of the chain rule
//! `d h(u) = g(u)·du`. The formulas are written in terms of the lifted
//! functions themselves (`sin`'s multiplier calls the lifted `cos`), so
//! second and higher derivatives fall out of the same definitions.
//!
//! # Domain edge cases
//!
//! Singular points surface as numeric sentinels in the derivative
//! components, never as errors:
//!
//! - `log(0)` is `−∞` with a NaN derivative; `log` of a negative number
//!   is NaN with a NaN derivative
//! - `sqrt` of a non-positive number has a NaN derivative
//! - `abs` has a NaN derivative at exactly zero (the kink has no unique
//!   slope, and an explicit NaN beats a silently arbitrary subgradient)
//! - `pow` differentiates `x^c` without ever evaluating `ln(x)` when the
//!   exponent carries no derivative, so constant exponents work on
//!   non-positive bases
//!
//! # Example
//!
//! ```
//! use tangent::{derivate, math, Value};
//!
//! // f(x) = sin(x)·exp(x)
//! let f = |args: &[Value<f64>]| math::sin(&args[0]) * math::exp(&args[0]);
//!
//! let df = derivate(f);
//! let r = df(&[Value::from(0.0)]);
//! assert_eq!(r.resolve(), 0.0);
//! assert_eq!(r.at(&[0]), 1.0); // cos(0)·exp(0) + sin(0)·exp(0)
//! ```

use num_traits::{Float, FloatConst};

use crate::ops::binary;
use crate::value::Value;

/// Lift a unary function over augmented values.
///
/// Plain input is a pure pass-through to `plain`. Active input gets its
/// primal transformed recursively (so nesting composes) and each
/// derivative component scaled by `rule` evaluated at the primal.
fn unary<T: Float>(
    x: &Value<T>,
    plain: fn(T) -> T,
    rule: fn(&Value<T>) -> Value<T>,
) -> Value<T> {
    match x {
        Value::Scalar(s) => Value::Scalar(plain(*s)),
        Value::Active { value, dot } => {
            let scale = rule(value);
            Value::active(
                unary(value, plain, rule),
                dot.iter().map(|d| &scale * d).collect(),
            )
        }
    }
}

/// Sine. Derivative: `cos(x)`.
pub fn sin<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::sin, sin_rule)
}

fn sin_rule<T: Float>(x: &Value<T>) -> Value<T> {
    cos(x)
}

/// Cosine. Derivative: `−sin(x)`.
pub fn cos<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::cos, cos_rule)
}

fn cos_rule<T: Float>(x: &Value<T>) -> Value<T> {
    -sin(x)
}

/// Tangent. Derivative: `1/cos²(x)`.
pub fn tan<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::tan, tan_rule)
}

fn tan_rule<T: Float>(x: &Value<T>) -> Value<T> {
    let c = cos(x);
    Value::Scalar(T::one()) / (&c * &c)
}

/// Natural logarithm.
///
/// The plain value is `−∞` at zero and NaN below it (the float `ln`
/// already behaves this way). The derivative `1/x` is guarded to NaN for
/// non-positive plain arguments: `1/x` at a negative `x` looks finite but
/// the logarithm it came from is undefined there.
pub fn log<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::ln, log_rule)
}

fn log_rule<T: Float>(x: &Value<T>) -> Value<T> {
    match x {
        Value::Scalar(s) if *s <= T::zero() => Value::Scalar(T::nan()),
        _ => Value::Scalar(T::one()) / x,
    }
}

/// Base-10 logarithm. Derivative: `log₁₀(e)/x`.
pub fn log10<T: Float + FloatConst>(x: &Value<T>) -> Value<T> {
    unary(x, T::log10, log10_rule)
}

fn log10_rule<T: Float + FloatConst>(x: &Value<T>) -> Value<T> {
    Value::Scalar(T::LOG10_E()) / x
}

/// Square root. Derivative: `1/(2·sqrt(x))`, NaN for non-positive plain
/// arguments (the slope at zero is a pole, and negative arguments are
/// outside the domain).
pub fn sqrt<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::sqrt, sqrt_rule)
}

fn sqrt_rule<T: Float>(x: &Value<T>) -> Value<T> {
    match x {
        Value::Scalar(s) if *s <= T::zero() => Value::Scalar(T::nan()),
        _ => {
            let root = sqrt(x);
            Value::Scalar(T::one()) / (&root + &root)
        }
    }
}

/// Exponential. Its derivative is itself.
pub fn exp<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::exp, exp_rule)
}

fn exp_rule<T: Float>(x: &Value<T>) -> Value<T> {
    exp(x)
}

/// Absolute value. Derivative: the sign of `x`, NaN at exactly zero.
pub fn abs<T: Float>(x: &Value<T>) -> Value<T> {
    unary(x, T::abs, abs_rule)
}

fn abs_rule<T: Float>(x: &Value<T>) -> Value<T> {
    let v = x.resolve();
    if v > T::zero() {
        Value::Scalar(T::one())
    } else if v < T::zero() {
        Value::Scalar(-T::one())
    } else {
        Value::Scalar(T::nan())
    }
}

/// Power `x^y`.
///
/// The derivative is `y·x^(y−1)·dx`, plus `x^y·ln(x)·dy` **only when** the
/// exponent's derivative component resolves nonzero. The short-circuit
/// keeps `x^constant` differentiable for `x ≤ 0`, where the `ln(x)` of
/// the general formula would poison the result with NaN.
pub fn pow<T: Float>(x: &Value<T>, y: &Value<T>) -> Value<T> {
    binary(x, y, T::powf, pow_rule)
}

fn pow_rule<T: Float>(x: &Value<T>, y: &Value<T>, dx: &Value<T>, dy: &Value<T>) -> Value<T> {
    let partial = y * &pow(x, &(y - T::one())) * dx;
    if dy.resolve() == T::zero() {
        partial
    } else {
        partial + pow(x, y) * log(x) * dy
    }
}

impl<T: Float> Value<T> {
    /// Lifted [`sin`](sin()).
    pub fn sin(&self) -> Value<T> {
        sin(self)
    }

    /// Lifted [`cos`](cos()).
    pub fn cos(&self) -> Value<T> {
        cos(self)
    }

    /// Lifted [`tan`](tan()).
    pub fn tan(&self) -> Value<T> {
        tan(self)
    }

    /// Lifted natural [`log`](log()).
    pub fn log(&self) -> Value<T> {
        log(self)
    }

    /// Lifted [`log10`](log10()).
    pub fn log10(&self) -> Value<T>
    where
        T: FloatConst,
    {
        log10(self)
    }

    /// Lifted [`sqrt`](sqrt()).
    pub fn sqrt(&self) -> Value<T> {
        sqrt(self)
    }

    /// Lifted [`exp`](exp()).
    pub fn exp(&self) -> Value<T> {
        exp(self)
    }

    /// Lifted [`abs`](abs()).
    pub fn abs(&self) -> Value<T> {
        abs(self)
    }

    /// Lifted [`pow`](pow()).
    pub fn pow(&self, exponent: &Value<T>) -> Value<T> {
        pow(self, exponent)
    }

    /// Lifted [`pow`](pow()) with a plain exponent.
    pub fn powf(&self, exponent: T) -> Value<T> {
        pow(self, &Value::Scalar(exponent))
    }
}
