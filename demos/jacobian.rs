//! Jacobian of a two-output function, three ways: automatic, closed-form,
//! and central differences.
//!
//! Run with: `cargo run --example jacobian`

use tangent::{derivate, math, Value};

/// Integer power by repeated multiplication, deliberately naive, to show
/// that derivatives propagate through ordinary user-written loops.
fn naive_pow(a: &Value<f64>, exponent: u32) -> Value<f64> {
    let mut result = Value::from(1.0);
    for _ in 0..exponent {
        result = result * a;
    }
    result
}

/// f(x, y) = (x⁵ + x·√y, x + y)
fn f(args: &[Value<f64>]) -> (Value<f64>, Value<f64>) {
    let (x, y) = (&args[0], &args[1]);
    let z = naive_pow(x, 5);
    (z + x * math::sqrt(y), x + y)
}

fn main() {
    let (x, y) = (3.0, 6.0);
    let at = |x: f64, y: f64| [Value::from(x), Value::from(y)];

    let (v0, v1) = f(&at(x, y));
    println!("f({}, {}) = ({}, {})", x, y, v0, v1);
    println!();

    let df = derivate(f);
    let (r0, r1) = df(&at(x, y));

    println!("Automatic Jacobian:");
    println!("  row 0: [{}, {}]", r0.at(&[0]), r0.at(&[1]));
    println!("  row 1: [{}, {}]", r1.at(&[0]), r1.at(&[1]));
    println!();

    println!("Closed form:");
    println!(
        "  row 0: [{}, {}]   (5x⁴ + √y, x/(2√y))",
        5.0 * x.powi(4) + y.sqrt(),
        x / (2.0 * y.sqrt())
    );
    println!("  row 1: [1, 1]");
    println!();

    let step = 1e-5;
    let central = |g: &dyn Fn(f64, f64) -> f64| {
        [
            (g(x + step, y) - g(x - step, y)) / (2.0 * step),
            (g(x, y + step) - g(x, y - step)) / (2.0 * step),
        ]
    };
    let row0 = central(&|x, y| f(&at(x, y)).0.resolve());
    let row1 = central(&|x, y| f(&at(x, y)).1.resolve());

    println!("Central differences (step = {}):", step);
    println!("  row 0: [{}, {}]", row0[0], row0[1]);
    println!("  row 1: [{}, {}]", row1[0], row1[1]);
}
