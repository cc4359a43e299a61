//! Hybrid-36 numbers for fixed-width serial and sequence fields.
//!
//! Values that fit the decimal width are written in decimal. Larger values
//! continue in upper-case base 36 (`A0000` = 100 000 for width 5) and then in
//! lower-case base 36:
//!
//! | Field           | Width | Decimal       | Upper-case      | Lower-case      |
//! |-----------------|-------|---------------|-----------------|-----------------|
//! | Atom serial     |   5   | ..=99 999     | A0000 ..= ZZZZZ | a0000 ..= zzzzz |
//! | Residue seq     |   4   | ..=9 999      | A000 ..= ZZZZ   | a000 ..= zzzz   |
//!
//! Reference: <https://cci.lbl.gov/hybrid_36/>

const DIGITS_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS_LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Largest value representable in decimal for `width`
pub const fn decimal_limit(width: u32) -> i64 {
    10i64.pow(width) - 1
}

/// Count of values in one alphabetic (upper or lower case) block
const fn block_size(width: u32) -> i64 {
    26 * 36i64.pow(width - 1)
}

fn parse_base36(s: &str, digits: &[u8; 36]) -> Option<i64> {
    s.bytes().try_fold(0i64, |acc, b| {
        let d = digits.iter().position(|&c| c == b)?;
        Some(acc * 36 + d as i64)
    })
}

fn format_base36(mut value: i64, width: usize, digits: &[u8; 36]) -> String {
    let mut out = vec![b'0'; width];
    for slot in out.iter_mut().rev() {
        *slot = digits[(value % 36) as usize];
        value /= 36;
    }
    // digits are ASCII
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode a hybrid-36 field of `width` characters.
///
/// Blank fields decode to `Some(0)`. Returns `None` when the text is neither
/// decimal nor valid hybrid-36 (e.g. `*****` or VMD-style hexadecimal).
pub fn hy36decode(width: usize, s: &str) -> Option<i32> {
    let s = s.trim();
    let first = match s.bytes().next() {
        None => return Some(0),
        Some(b) => b,
    };
    let w = width as u32;

    let value = if first.is_ascii_digit() || first == b'+' || first == b'-' {
        return s.parse::<i32>().ok();
    } else if s.len() != width {
        return None;
    } else if first.is_ascii_uppercase() {
        parse_base36(s, DIGITS_UPPER)? - 10 * 36i64.pow(w - 1) + 10i64.pow(w)
    } else if first.is_ascii_lowercase() {
        parse_base36(s, DIGITS_LOWER)? - 10 * 36i64.pow(w - 1) + 10i64.pow(w) + block_size(w)
    } else {
        return None;
    };
    i32::try_from(value).ok()
}

/// Encode `value` as exactly `width` characters.
///
/// Returns `None` when the value is beyond the hybrid-36 range for `width`
/// or too negative to fit in decimal.
pub fn hy36encode(width: usize, value: i32) -> Option<String> {
    let w = width as u32;
    let value = value as i64;

    if value <= decimal_limit(w) {
        let text = format!("{:>width$}", value, width = width);
        return (text.len() == width).then_some(text);
    }

    let offset = value - 10i64.pow(w);
    let block = block_size(w);
    let first_letter = 10 * 36i64.pow(w - 1);
    if offset < block {
        Some(format_base36(offset + first_letter, width, DIGITS_UPPER))
    } else if offset < 2 * block {
        Some(format_base36(offset - block + first_letter, width, DIGITS_LOWER))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_decimal() {
        assert_eq!(hy36decode(5, "    1"), Some(1));
        assert_eq!(hy36decode(5, "99999"), Some(99999));
        assert_eq!(hy36decode(4, "  -1"), Some(-1));
        assert_eq!(hy36decode(4, "    "), Some(0));
    }

    #[test]
    fn test_decode_alphabetic() {
        assert_eq!(hy36decode(5, "A0000"), Some(100_000));
        assert_eq!(hy36decode(5, "A0001"), Some(100_001));
        assert_eq!(hy36decode(4, "A000"), Some(10_000));
        assert_eq!(hy36decode(5, "a0000"), Some(100_000 + 26 * 36i32.pow(4)));
        assert_eq!(hy36decode(4, "a000"), Some(10_000 + 26 * 36i32.pow(3)));
    }

    #[test]
    fn test_decode_rejects_overflow_markers() {
        assert_eq!(hy36decode(5, "*****"), None);
        assert_eq!(hy36decode(5, "A00!0"), None);
        // VMD writes serials above 99999 in hexadecimal
        assert_eq!(hy36decode(5, "186a0"), None);
        assert_eq!(hy36decode(4, "271a"), None);
    }

    #[test]
    fn test_encode() {
        assert_eq!(hy36encode(5, 1).as_deref(), Some("    1"));
        assert_eq!(hy36encode(4, 9999).as_deref(), Some("9999"));
        assert_eq!(hy36encode(4, -999).as_deref(), Some("-999"));
        assert_eq!(hy36encode(4, -1000), None);
        assert_eq!(hy36encode(5, 100_000).as_deref(), Some("A0000"));
        assert_eq!(hy36encode(4, 10_001).as_deref(), Some("A001"));
        assert_eq!(
            hy36encode(4, 10_000 + 26 * 36i32.pow(3)).as_deref(),
            Some("a000")
        );
        let max_5 = 100_000 + 2 * 26 * 36i32.pow(4) - 1;
        assert_eq!(hy36encode(5, max_5).as_deref(), Some("zzzzz"));
        assert_eq!(hy36encode(5, max_5 + 1), None);
    }

    #[test]
    fn test_large_serials_survive_encoding() {
        for v in [100_000, 110_237, 43_770_016, 87_440_031] {
            let text = hy36encode(5, v).unwrap();
            assert_eq!(text.len(), 5);
            assert_eq!(hy36decode(5, &text), Some(v));
        }
    }
}
