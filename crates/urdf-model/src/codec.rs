//! Scalar, vector and color decoding from attribute text.
//!
//! All numeric parsing is strict: after trimming, the whole token must be a
//! numeral of the target width. Values that parse but cannot be represented
//! (overflow to infinity, or a non-zero mantissa that underflows to zero)
//! are reported as [`UrdfError::NumberRange`].

use crate::error::{Result, UrdfError};
use crate::math::{Color, Rotation, Vector3};

/// Characters removed by [`trim`].
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0C', '\x0B'];

/// Strip leading and trailing ` \t\n\r\f\v`.
pub fn trim(text: &str) -> &str {
    text.trim_matches(WHITESPACE)
}

/// Split on single spaces without collapsing runs.
///
/// Consecutive spaces produce empty tokens; callers filter them before
/// numeric conversion.
pub fn split_whitespace(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Parse a double-precision value.
///
/// # Errors
///
/// [`UrdfError::NumberFormat`] for non-numerals, [`UrdfError::NumberRange`]
/// for values that do not fit an `f64`.
pub fn parse_double(text: &str) -> Result<f64> {
    let token = trim(text);
    let value: f64 = token.parse().map_err(|_| UrdfError::NumberFormat {
        value: text.to_string(),
        target: "f64",
    })?;
    check_range(token, value.is_infinite(), value == 0.0, "f64")?;
    Ok(value)
}

/// Parse a single-precision value.
///
/// # Errors
///
/// [`UrdfError::NumberFormat`] for non-numerals, [`UrdfError::NumberRange`]
/// for values that do not fit an `f32`.
pub fn parse_float(text: &str) -> Result<f32> {
    let token = trim(text);
    let value: f32 = token.parse().map_err(|_| UrdfError::NumberFormat {
        value: text.to_string(),
        target: "f32",
    })?;
    check_range(token, value.is_infinite(), value == 0.0, "f32")?;
    Ok(value)
}

fn check_range(token: &str, is_infinite: bool, is_zero: bool, target: &'static str) -> Result<()> {
    let out_of_range =
        (is_infinite && !is_infinity_literal(token)) || (is_zero && !mantissa_is_zero(token));
    if out_of_range {
        return Err(UrdfError::NumberRange {
            value: token.to_string(),
            target,
        });
    }
    Ok(())
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// True if every digit before the exponent is zero.
fn mantissa_is_zero(token: &str) -> bool {
    token
        .chars()
        .take_while(|c| !matches!(c, 'e' | 'E'))
        .filter(char::is_ascii_digit)
        .all(|c| c == '0')
}

/// Decode `"x y z"` into a [`Vector3`].
///
/// # Errors
///
/// Codec errors from the components, or [`UrdfError::VectorArity`] unless
/// exactly three values are present.
pub fn parse_vector3(text: &str) -> Result<Vector3> {
    let values = split_whitespace(trim(text))
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(parse_double)
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(UrdfError::VectorArity {
            found: values.len(),
            value: text.to_string(),
        }),
    }
}

/// Decode `"r g b a"` into a [`Color`]. Components are not clamped.
///
/// # Errors
///
/// Codec errors from the components, or [`UrdfError::ColorArity`] unless
/// exactly four values are present.
pub fn parse_color(text: &str) -> Result<Color> {
    let values = split_whitespace(trim(text))
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(parse_float)
        .collect::<Result<Vec<f32>>>()?;

    match values.as_slice() {
        &[r, g, b, a] => Ok(Color::new(r, g, b, a)),
        _ => Err(UrdfError::ColorArity {
            found: values.len(),
            value: text.to_string(),
        }),
    }
}

/// Decode `"roll pitch yaw"` (radians) into a normalized [`Rotation`].
///
/// # Errors
///
/// Same as [`parse_vector3`].
pub fn parse_rpy(text: &str) -> Result<Rotation> {
    let rpy = parse_vector3(text)?;
    Ok(Rotation::from_rpy(rpy.x, rpy.y, rpy.z))
}
