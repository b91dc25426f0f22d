//! `#rrggbb` hex color strings.

use crate::{ColorError, ColorResult};

/// Parses a `#rrggbb` string into normalized RGB in [0, 1].
///
/// Exactly six hex digits are required after the `#`. Shorthand (`#fff`)
/// and alpha (`#rrggbbaa`) forms are rejected.
///
/// # Example
///
/// ```rust
/// use lumen_color::parse_hex_rgb;
///
/// assert_eq!(parse_hex_rgb("#ff0000").unwrap(), [1.0, 0.0, 0.0]);
/// assert!(parse_hex_rgb("#zz0000").is_err());
/// ```
pub fn parse_hex_rgb(input: &str) -> ColorResult<[f32; 3]> {
    let invalid = |reason| ColorError::InvalidHex {
        input: input.to_string(),
        reason,
    };

    let digits = input.strip_prefix('#').ok_or_else(|| invalid("missing '#'"))?;
    if digits.len() != 6 {
        return Err(invalid("expected 6 hex digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("non-hex digit"));
    }

    let mut rgb = [0.0; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        let pair = &digits[i * 2..i * 2 + 2];
        let byte = u8::from_str_radix(pair, 16).map_err(|_| invalid("non-hex digit"))?;
        *c = byte as f32 / 255.0;
    }
    Ok(rgb)
}

/// Formats normalized RGB as a lowercase `#rrggbb` string.
///
/// Components are clamped to [0, 1] and rounded to the nearest byte.
pub fn to_hex_rgb(rgb: [f32; 3]) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(rgb[0]), byte(rgb[1]), byte(rgb[2]))
}
