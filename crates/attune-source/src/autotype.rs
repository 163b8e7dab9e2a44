//! Per-cell type inference for decoded tabular data.
//!
//! Every cell is trimmed and tagged: empty cells are null, `true`/`false` are
//! booleans, anything that reads as a number is a number, and everything
//! else stays text. The numeric grammar is deliberately narrow: `inf`, `nan`
//! and digit separators stay text, while `Infinity`, `NaN` and `0x`/`0o`/`0b`
//! integer literals are numbers.

use attune_core::FieldValue;

/// Infer the tagged value of one raw cell.
pub fn infer(raw: &str) -> FieldValue {
    let cell = raw.trim();
    match cell {
        "" => FieldValue::Null,
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        "NaN" => FieldValue::Number(f64::NAN),
        _ => coerce_number(cell)
            .map_or_else(|| FieldValue::Text(cell.to_string()), FieldValue::Number),
    }
}

fn coerce_number(cell: &str) -> Option<f64> {
    match cell {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = radix_literal(cell) {
        return Some(n);
    }
    if is_decimal_literal(cell) {
        cell.parse().ok()
    } else {
        None
    }
}

#[allow(clippy::cast_precision_loss)]
fn radix_literal(cell: &str) -> Option<f64> {
    let (radix, digits) = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| cell.strip_prefix(prefix).map(|rest| (radix, rest)))?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(cell: &str) -> bool {
    let unsigned = cell.strip_prefix(['+', '-']).unwrap_or(cell);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(whole) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}
