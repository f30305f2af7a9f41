//! Numeric-literal grammar shared by the format detector and the parsers.
//!
//! Header-row counting and column type classification both reduce to the
//! same question: does this cell read as a floating-point number? The
//! accepted grammar is the full IEEE-754 literal set: optional sign, decimal
//! digits with optional fraction and exponent, `NaN`/`Infinity` words, and
//! hex-float literals such as `0x1.8p3`. Leading and trailing whitespace is
//! ignored. Type-suffixed forms (`1.5f`) are not accepted.

/// Parse a cell as a floating-point literal.
///
/// Returns `None` when the text does not match the grammar. `NaN` parses
/// successfully (to NaN); rejection and NaN are different outcomes here.
pub fn parse_double(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // The std parser covers sign, digits, fraction, exponent, and the
    // NaN/inf/Infinity words (case-insensitive). Hex floats it rejects.
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    parse_hex_float(trimmed)
}

/// True when the cell parses under the numeric grammar.
pub fn is_numeric(text: &str) -> bool {
    parse_double(text).is_some()
}

/// Hex-float literal: `[+-] 0x H [. H] p [+-] D` with a hex mantissa and a
/// mandatory power-of-two exponent.
fn parse_hex_float(text: &str) -> Option<f64> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'+' => (false, &text[1..]),
        b'-' => (true, &text[1..]),
        _ => (false, text),
    };
    let rest = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))?;

    let split = rest.find(|c| c == 'p' || c == 'P')?;
    let (mantissa_text, exponent_text) = (&rest[..split], &rest[split + 1..]);
    let exponent: i32 = exponent_text.parse().ok()?;

    let (int_text, frac_text) = match mantissa_text.find('.') {
        Some(dot) => (&mantissa_text[..dot], &mantissa_text[dot + 1..]),
        None => (mantissa_text, ""),
    };
    if int_text.is_empty() && frac_text.is_empty() {
        return None;
    }

    let mut mantissa = 0.0f64;
    for c in int_text.chars() {
        mantissa = mantissa * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in frac_text.chars() {
        mantissa += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }

    let value = mantissa * 2f64.powi(exponent);
    Some(if negative { -value } else { value })
}
