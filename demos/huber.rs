//! Differentiating a piecewise function: the Huber loss.
//!
//! For |a| ≤ δ the loss is quadratic, beyond that linear; the derivative
//! is `a` inside the band and `±δ` outside it. Branching on comparisons
//! works because comparison of augmented values is derivative-blind.
//!
//! Run with: `cargo run --example huber`

use tangent::{derivate, math, Value};

/// Huber loss with threshold `delta`, as a closure over augmented values.
fn huber(delta: f64) -> impl Fn(&[Value<f64>]) -> Value<f64> {
    move |args: &[Value<f64>]| {
        let a = &args[0];
        if math::abs(a) <= delta {
            a * a * 0.5
        } else {
            delta * (math::abs(a) - delta / 2.0)
        }
    }
}

fn main() {
    let delta = 3.0;
    let loss = huber(delta);
    let dloss = derivate(huber(delta));

    let params = [-6.0, -3.00001, -2.9999, 0.0, 2.99999, 3.0, 3.00001, 6.0];
    let step = 1e-5;

    println!("Huber loss, delta = {}", delta);
    println!(
        "{:>10} {:>14} {:>14} {:>14} {:>14}",
        "a", "loss", "automatic", "expected", "numeric"
    );

    for &a in &params {
        let value = loss(&[Value::from(a)]).resolve();
        let automatic = dloss(&[Value::from(a)]).at(&[0]);
        let expected = if a.abs() < delta {
            a
        } else {
            a.signum() * delta
        };
        let numeric = (loss(&[Value::from(a + step)]).resolve()
            - loss(&[Value::from(a - step)]).resolve())
            / (2.0 * step);

        println!(
            "{:>10} {:>14.6} {:>14.6} {:>14.6} {:>14.6}",
            a, value, automatic, expected, numeric
        );
    }
}
