//! The derivative driver: seed inputs, invoke, normalize outputs.
//!
//! [`derivate`] turns a function over [`Value`]s into a function that
//! computes the original result *and* its derivatives in one forward
//! pass. With no direction set, argument `i` of `n` is seeded with the
//! `i`-th canonical basis vector, so the result carries the full
//! Jacobian row(s). [`derivate_along`] instead seeds a chosen set of
//! direction vectors and computes the directional derivatives along them.
//!
//! Differentiated functions are ordinary functions over [`Value`]s, so
//! the driver applies to its own output: `derivate(derivate(f))` yields
//! second derivatives, exposed as nested active values inside the outer
//! derivative components.
//!
//! # Example
//!
//! ```
//! use tangent::{derivate, derivate_along, Value};
//!
//! // f(x, y) = x² + y
//! let f = |args: &[Value<f64>]| &args[0] * &args[0] + &args[1];
//!
//! // Full gradient
//! let df = derivate(f);
//! let r = df(&[Value::from(9.0), Value::from(2.0)]);
//! assert_eq!(r.resolve(), 83.0);
//! assert_eq!(r.at(&[0]), 18.0);
//! assert_eq!(r.at(&[1]), 1.0);
//!
//! // One directional derivative along (2, 2)
//! let dir = derivate_along(f, &[vec![2.0, 2.0]]);
//! let r = dir(&[Value::from(9.0), Value::from(2.0)]);
//! assert_eq!(r.dot().len(), 1);
//! assert_eq!(r.at(&[0]), 38.0);
//!
//! // Second order: d²f/dx² = 2
//! let d2 = derivate(derivate(f));
//! let r = d2(&[Value::from(9.0), Value::from(2.0)]);
//! assert_eq!(r.at(&[0, 0]), 2.0);
//! ```

use num_traits::Float;

use crate::value::Value;

/// Function outputs that the driver can normalize.
///
/// A differentiated function must hand back active values even when a
/// result never touched a differentiated input: "the output did not
/// depend on these inputs" is a zero derivative, not a missing one.
/// Implementations wrap any plain output with an all-zero derivative
/// vector of the seeded width and leave active outputs untouched.
///
/// Implemented for a single [`Value`], for tuples of outputs (arity up
/// to four), and for `Vec<Value<T>>`.
pub trait Outputs<T: Float>: Sized {
    /// Wrap every plain output with a zero derivative vector of the
    /// given width.
    fn ensure_active(self, width: usize) -> Self;
}

impl<T: Float> Outputs<T> for Value<T> {
    fn ensure_active(self, width: usize) -> Self {
        self.promote(width)
    }
}

impl<T: Float> Outputs<T> for Vec<Value<T>> {
    fn ensure_active(self, width: usize) -> Self {
        self.into_iter().map(|v| v.promote(width)).collect()
    }
}

macro_rules! impl_outputs_tuple {
    ( $( $name:ident : $idx:tt ),+ ) => {
        impl<T: Float, $( $name: Outputs<T> ),+> Outputs<T> for ( $( $name, )+ ) {
            fn ensure_active(self, width: usize) -> Self {
                (
                    $( self.$idx.ensure_active(width), )+
                )
            }
        }
    };
}

impl_outputs_tuple!(A:0);
impl_outputs_tuple!(A:0, B:1);
impl_outputs_tuple!(A:0, B:1, C:2);
impl_outputs_tuple!(A:0, B:1, C:2, D:3);

/// Differentiate `func` with respect to every argument.
///
/// The returned function seeds its `n` arguments with the canonical
/// basis of width `n`, invokes `func`, and normalizes the result, so
/// each output's derivative vector is a full Jacobian row. Arguments
/// that are already active are nested as primals, which is what makes
/// repeated application compute higher-order derivatives.
///
/// # Example
///
/// ```
/// use tangent::{derivate, math, Value};
///
/// // Multiple outputs normalize independently; the second ignores x.
/// let f = |args: &[Value<f64>]| (math::exp(&args[0]), Value::from(42.0));
///
/// let df = derivate(f);
/// let (a, b) = df(&[Value::from(0.0)]);
/// assert_eq!(a.at(&[0]), 1.0);
/// assert_eq!(b.resolve(), 42.0);
/// assert_eq!(b.at(&[0]), 0.0);
/// ```
pub fn derivate<T, F, R>(func: F) -> impl Fn(&[Value<T>]) -> R
where
    T: Float,
    F: Fn(&[Value<T>]) -> R,
    R: Outputs<T>,
{
    move |args: &[Value<T>]| {
        let width = args.len();
        let seeded: Vec<Value<T>> = args
            .iter()
            .enumerate()
            .map(|(pos, arg)| arg.clone().seeded(pos, width))
            .collect();
        func(&seeded).ensure_active(width)
    }
}

/// Differentiate `func` along the given direction vectors.
///
/// Each of the `m` directions is a vector with one coordinate per
/// argument; the returned function computes all `m` directional
/// derivatives in one pass, so result derivative vectors have width `m`.
/// Internally the direction set is transposed: argument `i` is seeded
/// with the `i`-th coordinate of every direction.
///
/// A directional derivative along `d` equals `∇f · d`; seeding it
/// directly avoids materializing the full gradient.
///
/// # Panics
///
/// The returned function panics if any direction's length differs from
/// the number of arguments it is called with.
pub fn derivate_along<T, F, R>(func: F, directions: &[Vec<T>]) -> impl Fn(&[Value<T>]) -> R
where
    T: Float,
    F: Fn(&[Value<T>]) -> R,
    R: Outputs<T>,
{
    let directions = directions.to_vec();
    move |args: &[Value<T>]| {
        for direction in &directions {
            assert_eq!(
                direction.len(),
                args.len(),
                "direction vector length does not match argument count"
            );
        }
        let width = directions.len();
        let seeded: Vec<Value<T>> = args
            .iter()
            .enumerate()
            .map(|(pos, arg)| {
                let dot = directions
                    .iter()
                    .map(|direction| Value::Scalar(direction[pos]))
                    .collect();
                Value::active(arg.clone(), dot)
            })
            .collect();
        func(&seeded).ensure_active(width)
    }
}
