//! Decoding of literal operand text.
//!
//! Shared by the assembler (syntax checks) and the engine (resolution and
//! READ input), so both accept exactly the same forms.

/// Parse an integer literal.
///
/// Accepts an optional sign, then decimal, `0x` hex, `0o` octal or
/// leading-zero octal digits. Single `_` separators between digits are
/// allowed. Returns `None` on any other input or on i64 overflow.
pub fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(rest) = strip_prefix_ci(body, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_prefix_ci(body, "0o") {
        (8, rest)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).ok()?;
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|v| -v)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parse a boolean literal: exactly `true` or `false`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a float literal, either decimal (`1.5`, `-2e3`) or C99 hex
/// (`0x1.8p+1`). Words like `inf` and `NaN` are rejected.
pub fn parse_float(text: &str) -> Option<f64> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match strip_prefix_ci(body, "0x") {
        Some(hex) => parse_hex_float(hex)?,
        None => {
            if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
                || !body.chars().any(|c| c.is_ascii_digit())
            {
                return None;
            }
            body.parse::<f64>().ok()?
        }
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_hex_float(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.find(['p', 'P']) {
        Some(pos) => (&body[..pos], body[pos + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for c in int_part.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in frac_part.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }

    Some(value * 2f64.powi(exponent))
}

/// Replace every `\ddd` escape (backslash plus three decimal digits) with
/// the code point `ddd`. Anything else is copied through unchanged.
pub fn decode_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' && i + 3 < chars.len() {
            let digits = &chars[i + 1..i + 4];
            if digits.iter().all(|c| c.is_ascii_digit()) {
                let code = digits
                    .iter()
                    .filter_map(|c| c.to_digit(10))
                    .fold(0u32, |acc, d| acc * 10 + d);
                if let Some(c) = char::from_u32(code) {
                    out.push(c);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Returns true if every backslash in `text` starts a `\ddd` escape.
pub fn has_valid_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let ok = bytes.len() > i + 3 && bytes[i + 1..i + 4].iter().all(u8::is_ascii_digit);
            if !ok {
                return false;
            }
            i += 4;
        } else {
            i += 1;
        }
    }
    true
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_decimal() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-13"), Some(-13));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("1_000_000"), Some(1_000_000));
    }

    #[test]
    fn int_hex_and_octal() {
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0XfF"), Some(255));
        assert_eq!(parse_int("0o17"), Some(15));
        assert_eq!(parse_int("017"), Some(15));
        assert_eq!(parse_int("-0x10"), Some(-16));
    }

    #[test]
    fn int_rejects_garbage() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("12a"), None);
        assert_eq!(parse_int("08"), None);
        assert_eq!(parse_int("1__0"), None);
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("--1"), None);
    }

    #[test]
    fn int_bounds() {
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775808"), None);
    }

    #[test]
    fn bool_literals() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("TRUE"), None);
        assert_eq!(parse_bool("1"), None);
    }

    #[test]
    fn float_decimal() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float("-2e3"), Some(-2000.0));
        assert_eq!(parse_float(".25"), Some(0.25));
        assert_eq!(parse_float("3"), Some(3.0));
    }

    #[test]
    fn float_hex() {
        assert_eq!(parse_float("0x1.8p+1"), Some(3.0));
        assert_eq!(parse_float("0x1p-2"), Some(0.25));
        assert_eq!(parse_float("-0x2.0p0"), Some(-2.0));
        assert_eq!(parse_float("0x0p+0"), Some(0.0));
    }

    #[test]
    fn float_rejects_words() {
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("0xg"), None);
        assert_eq!(parse_float("0x.p1"), None);
    }

    #[test]
    fn escapes_decoded() {
        assert_eq!(decode_escapes("a\\032b"), "a b");
        assert_eq!(decode_escapes("\\010"), "\n");
        assert_eq!(decode_escapes("\\092"), "\\");
        assert_eq!(decode_escapes("plain"), "plain");
    }

    #[test]
    fn incomplete_escape_copied_through() {
        assert_eq!(decode_escapes("a\\03"), "a\\03");
        assert_eq!(decode_escapes("\\x12z"), "\\x12z");
    }

    #[test]
    fn escape_validity() {
        assert!(has_valid_escapes("a\\032b"));
        assert!(has_valid_escapes("none"));
        assert!(!has_valid_escapes("bad\\"));
        assert!(!has_valid_escapes("bad\\12"));
        assert!(!has_valid_escapes("bad\\a12"));
    }
}
