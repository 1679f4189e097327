//! # tangent — forward-mode automatic differentiation
//!
//! This crate computes exact derivatives of numeric functions written as
//! ordinary code. Arithmetic operators and elementary functions are
//! overloaded on an augmented value ([`Value`]) that carries a primal and
//! a vector of derivative components; the chain rule is applied at every
//! step of the computation, so the derivative of an arbitrary composition
//! falls out of evaluating it once.
//!
//! This is **forward-mode** AD: derivatives ride along with the values.
//! There is no tape, no computation graph, and no symbolic manipulation,
//! and deliberately no reverse mode, batching, or sparsity handling.
//!
//! # Differentiating a function
//!
//! Write the function over [`Value`]s, using operators freely and the
//! [`math`] module where you would use plain math functions, then hand it
//! to [`derivate()`]:
//!
//! ```
//! use tangent::{derivate, Value};
//!
//! // f(x, y) = x² + y
//! let f = |args: &[Value<f64>]| &args[0] * &args[0] + &args[1];
//!
//! let df = derivate(f);
//! let r = df(&[Value::from(9.0), Value::from(2.0)]);
//!
//! assert_eq!(r.resolve(), 83.0); // the plain result
//! assert_eq!(r.at(&[0]), 18.0);  // ∂f/∂x = 2x
//! assert_eq!(r.at(&[1]), 1.0);   // ∂f/∂y
//! ```
//!
//! # Directional derivatives
//!
//! [`derivate_along`] seeds explicit directions instead of the canonical
//! basis, computing `∇f · d` for each direction `d` without building the
//! full gradient:
//!
//! ```
//! use tangent::{derivate_along, Value};
//!
//! let f = |args: &[Value<f64>]| &args[0] * &args[0] + &args[1];
//!
//! let df = derivate_along(f, &[vec![2.0, 2.0]]);
//! let r = df(&[Value::from(9.0), Value::from(2.0)]);
//! assert_eq!(r.at(&[0]), 38.0); // 2·18 + 2·1
//! ```
//!
//! # Higher-order derivatives
//!
//! A differentiated function is again a function over [`Value`]s, so it
//! can be differentiated once more; the results nest:
//!
//! ```
//! use tangent::{derivate, Value};
//!
//! let f = |args: &[Value<f64>]| &args[0] * &args[0] + &args[1];
//!
//! let d2 = derivate(derivate(f));
//! let r = d2(&[Value::from(9.0), Value::from(2.0)]);
//! assert_eq!(r.at(&[0, 0]), 2.0); // d²f/dx²
//! assert_eq!(r.at(&[0, 1]), 0.0);
//! ```
//!
//! # Singularities
//!
//! Domain edges never abort an evaluation. Dividing by zero, taking the
//! logarithm or square root of a non-positive number, or differentiating
//! `abs` at its kink all surface as `±∞`/NaN in the affected value or
//! derivative component and propagate from there; differentiating a
//! piecewise function reports an undefined slope instead of failing.

pub mod derivate;
pub mod math;
mod ops;
pub mod value;

pub use derivate::{derivate, derivate_along, Outputs};
pub use value::Value;
