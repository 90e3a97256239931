//! Numeric functions of the `math` library
//!
//! Results follow IEEE-754: a domain error such as `sqrt(-1)` produces NaN
//! rather than a fault.

use crate::model::Value;
use crate::registry::error::RegistryResult;
use crate::registry::function::{NativeFunction, integer_arg, number_arg};
use crate::registry::namespace::Namespace;
use crate::registry::signature::{FunctionSignature, ValueType};

/// Library name
pub const NAME: &str = "math";

/// Build the `math` namespace
pub fn namespace() -> RegistryResult<Namespace> {
    let unary: [(&str, fn(f64) -> f64, &str); 25] = [
        ("abs", f64::abs, "Absolute value"),
        ("acos", f64::acos, "Arc cosine, in radians"),
        ("asin", f64::asin, "Arc sine, in radians"),
        ("atan", f64::atan, "Arc tangent, in radians"),
        ("cbrt", f64::cbrt, "Cube root"),
        ("ceil", f64::ceil, "Smallest integer not less than the argument"),
        ("cos", f64::cos, "Cosine of an angle in radians"),
        ("cosh", f64::cosh, "Hyperbolic cosine"),
        ("exp", f64::exp, "e raised to the argument"),
        ("floor", f64::floor, "Largest integer not greater than the argument"),
        ("getExponent", get_exponent, "Unbiased binary exponent"),
        ("log", f64::ln, "Natural logarithm"),
        ("nextDown", next_down, "Adjacent double towards negative infinity"),
        ("nextUp", next_up, "Adjacent double towards positive infinity"),
        ("rint", f64::round_ties_even, "Nearest integer, ties to even"),
        ("round", round_half_up, "Nearest integer, ties towards positive infinity"),
        ("signum", signum, "-1, 0 or 1 depending on the sign"),
        ("sin", f64::sin, "Sine of an angle in radians"),
        ("sinh", f64::sinh, "Hyperbolic sine"),
        ("sqrt", f64::sqrt, "Square root"),
        ("tan", f64::tan, "Tangent of an angle in radians"),
        ("tanh", f64::tanh, "Hyperbolic tangent"),
        ("toDegrees", f64::to_degrees, "Convert radians to degrees"),
        ("toRadians", f64::to_radians, "Convert degrees to radians"),
        ("ulp", ulp, "Distance to the next larger magnitude double"),
    ];
    let binary: [(&str, fn(f64, f64) -> f64, &str); 7] = [
        ("copySign", f64::copysign, "Magnitude of the first argument, sign of the second"),
        ("IEEEremainder", ieee_remainder, "Remainder with the quotient rounded to even"),
        ("nextAfter", next_after, "Adjacent double in the direction of the second argument"),
        ("hypot", f64::hypot, "sqrt(x² + y²) without intermediate overflow"),
        ("max", max, "Greater of two numbers, NaN if either is NaN"),
        ("min", min, "Smaller of two numbers, NaN if either is NaN"),
        ("pow", f64::powf, "First argument raised to the second"),
    ];

    let mut namespace = Namespace::new(NAME);
    for (name, op, doc) in unary {
        namespace.register(NativeFunction::unary(name, op).with_documentation(doc))?;
    }
    for (name, op, doc) in binary {
        namespace.register(NativeFunction::binary(name, op).with_documentation(doc))?;
    }
    namespace.register(
        NativeFunction::new(
            FunctionSignature::new(
                "scalb",
                vec![ValueType::Number, ValueType::Integer],
                ValueType::Number,
            ),
            |args| Ok(Value::Number(scalb(number_arg(args, 0)?, integer_arg(args, 1)?))),
        )
        .with_documentation("First argument times two to the power of the second"),
    )?;
    Ok(namespace)
}

fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn signum(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() { x } else { x.signum() }
}

fn max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if a == b {
        // Only differs for signed zeros
        if a.is_sign_negative() { b } else { a }
    } else {
        a.max(b)
    }
}

fn min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if a == b {
        if a.is_sign_negative() { a } else { b }
    } else {
        a.min(b)
    }
}

fn ulp(x: f64) -> f64 {
    let magnitude = x.abs();
    if x.is_nan() {
        f64::NAN
    } else if magnitude.is_infinite() {
        f64::INFINITY
    } else if magnitude == f64::MAX {
        2f64.powi(971)
    } else {
        f64::from_bits(magnitude.to_bits() + 1) - magnitude
    }
}

fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        x
    } else if x == 0.0 {
        f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        f64::from_bits(x.to_bits() - 1)
    }
}

fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

fn next_after(start: f64, direction: f64) -> f64 {
    if start.is_nan() || direction.is_nan() {
        f64::NAN
    } else if start == direction {
        direction
    } else if direction > start {
        next_up(start)
    } else {
        next_down(start)
    }
}

fn get_exponent(x: f64) -> f64 {
    (((x.to_bits() >> 52) & 0x7ff) as i32 - 1023) as f64
}

fn ieee_remainder(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r.is_nan() || y.is_infinite() {
        return r;
    }
    let divisor = y.abs();
    let doubled = 2.0 * divisor;
    // Parity of the truncated quotient x / y
    let odd = if doubled.is_finite() {
        (x % doubled).abs() >= divisor
    } else {
        x.abs() >= divisor
    };
    let twice = 2.0 * r.abs();
    if twice > divisor || (twice == divisor && odd) {
        r - divisor.copysign(r)
    } else {
        r
    }
}

/// Scale by a power of two, rounding at most once
fn scalb(x: f64, scale: i64) -> f64 {
    const STEP: i32 = 512;
    fn power_of_two(n: i32) -> f64 {
        f64::from_bits(((n + 1023) as u64) << 52)
    }

    let mut scale = scale.clamp(-2099, 2099) as i32;
    let mut x = x * power_of_two(scale % STEP);
    scale -= scale % STEP;
    let step = if scale < 0 { -STEP } else { STEP };
    while scale != 0 {
        x *= power_of_two(step);
        scale -= step;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::function::Function;
    use rstest::rstest;

    fn call(name: &str, args: &[f64]) -> f64 {
        let ns = namespace().unwrap();
        let args: Vec<Value> = args.iter().copied().map(Value::Number).collect();
        let function = ns.get(name, args.len()).unwrap();
        function.evaluate(&args).unwrap().as_number().unwrap()
    }

    #[rstest]
    #[case("sqrt", &[9.0], 3.0)]
    #[case("abs", &[-2.5], 2.5)]
    #[case("pow", &[2.0, 10.0], 1024.0)]
    #[case("hypot", &[3.0, 4.0], 5.0)]
    #[case("max", &[1.0, 2.0], 2.0)]
    #[case("min", &[1.0, 2.0], 1.0)]
    #[case("round", &[2.5], 3.0)]
    #[case("round", &[-2.5], -2.0)]
    #[case("round", &[0.49999999999999994], 0.0)]
    #[case("rint", &[2.5], 2.0)]
    #[case("rint", &[3.5], 4.0)]
    #[case("signum", &[-7.0], -1.0)]
    #[case("toDegrees", &[0.0], 0.0)]
    #[case("log", &[1.0], 0.0)]
    #[case("ceil", &[1.2], 2.0)]
    #[case("ulp", &[1.0], f64::EPSILON)]
    #[case("copySign", &[3.0, -1.0], -3.0)]
    #[case("IEEEremainder", &[5.0, 2.0], 1.0)]
    #[case("IEEEremainder", &[3.0, 2.0], -1.0)]
    #[case("IEEEremainder", &[10.0, 3.0], 1.0)]
    #[case("IEEEremainder", &[11.0, 3.0], -1.0)]
    #[case("nextUp", &[1.0], 1.0 + f64::EPSILON)]
    #[case("nextDown", &[1.0], 1.0 - f64::EPSILON / 2.0)]
    #[case("nextAfter", &[1.0, 2.0], 1.0 + f64::EPSILON)]
    #[case("nextAfter", &[1.0, 1.0], 1.0)]
    #[case("getExponent", &[8.0], 3.0)]
    #[case("getExponent", &[0.0], -1023.0)]
    #[case("getExponent", &[f64::INFINITY], 1024.0)]
    #[case("scalb", &[3.0, 4.0], 48.0)]
    #[case("scalb", &[1.0, -1074.0], f64::from_bits(1))]
    #[case("scalb", &[1.0, 2000.0], f64::INFINITY)]
    #[case("scalb", &[1.5, -1074.0], f64::from_bits(2))]
    fn test_math_functions(#[case] name: &str, #[case] args: &[f64], #[case] expected: f64) {
        assert_eq!(call(name, args), expected);
    }

    #[test]
    fn test_ieee_edge_cases() {
        assert!(call("sqrt", &[-1.0]).is_nan());
        assert!(call("max", &[f64::NAN, 1.0]).is_nan());
        assert!(call("min", &[1.0, f64::NAN]).is_nan());
        assert!(call("signum", &[-0.0]).is_sign_negative());
        assert_eq!(call("signum", &[0.0]), 0.0);
        assert!(call("max", &[-0.0, 0.0]).is_sign_positive());
        assert!(call("min", &[0.0, -0.0]).is_sign_negative());
        assert_eq!(call("ulp", &[0.0]), f64::from_bits(1));
        assert_eq!(call("ulp", &[f64::NEG_INFINITY]), f64::INFINITY);
        assert_eq!(call("nextUp", &[0.0]), f64::from_bits(1));
        assert_eq!(call("nextDown", &[0.0]), -f64::from_bits(1));
        assert!(call("nextAfter", &[f64::NAN, 1.0]).is_nan());
        assert!(call("IEEEremainder", &[1.0, 0.0]).is_nan());
        assert_eq!(call("IEEEremainder", &[1.5, f64::INFINITY]), 1.5);
        assert!(call("IEEEremainder", &[-4.0, 2.0]).is_sign_negative());
    }

    #[test]
    fn test_namespace_contents() {
        let ns = namespace().unwrap();
        assert_eq!(ns.len(), 33);
        assert!(ns.find_match("scalb", &[Value::Number(1.0), Value::Number(0.5)]).is_none());
        assert!(ns.contains("toRadians"));
        assert!(!ns.contains("random"));
        assert_eq!(ns.get("sqrt", 1).unwrap().documentation(), "Square root");
    }
}
