//! Text escaping and number formatting shared by elements and attributes.

/// Escapes the five XML special characters of `s` onto `out`.
///
/// `&` is replaced like every other character in a single pass, so the
/// entities produced here are never escaped a second time.
#[inline]
pub(crate) fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

/// Returns `s` with the five XML special characters escaped.
///
/// # Examples
///
/// ```rust
/// assert_eq!(map2xml::escape("a & b < c"), "a &amp; b &lt; c");
/// assert_eq!(map2xml::escape("&amp;"), "&amp;amp;");
/// ```
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(&mut out, s);
    out
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("+Inf")
    } else if value == f64::NEG_INFINITY {
        Some("-Inf")
    } else {
        None
    }
}

/// Splits Rust's `LowerExp` output (`1.5e-7`) into mantissa and exponent.
fn split_exponent(s: &str) -> (&str, i32) {
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// `e+06` style suffix: explicit sign, at least two digits.
fn with_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
}

/// Shortest round-trip form; exponent notation when the decimal exponent
/// is below -4 or at least 6.
pub(crate) fn float_shortest(value: f64) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    let sci = format!("{:e}", value);
    let (mantissa, exp) = split_exponent(&sci);
    if !(-4..6).contains(&exp) {
        with_exponent(mantissa, exp)
    } else {
        value.to_string()
    }
}

pub(crate) fn float_scientific(value: f64) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    let sci = format!("{:.6e}", value);
    let (mantissa, exp) = split_exponent(&sci);
    with_exponent(mantissa, exp)
}

pub(crate) fn float_fixed(value: f64) -> String {
    match non_finite(value) {
        Some(s) => s.to_string(),
        None => format!("{:.6}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_plain_text_untouched() {
        assert_eq!(escape("plain text äöü"), "plain text äöü");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_shortest_plain_range() {
        assert_eq!(float_shortest(23.5), "23.5");
        assert_eq!(float_shortest(100000.0), "100000");
        assert_eq!(float_shortest(0.0001), "0.0001");
        assert_eq!(float_shortest(-2.25), "-2.25");
        assert_eq!(float_shortest(0.0), "0");
        assert_eq!(float_shortest(1.0), "1");
    }

    #[test]
    fn test_shortest_exponent_range() {
        assert_eq!(float_shortest(1e6), "1e+06");
        assert_eq!(float_shortest(1234567.0), "1.234567e+06");
        assert_eq!(float_shortest(0.00001), "1e-05");
        assert_eq!(float_shortest(-1.5e-7), "-1.5e-07");
        assert_eq!(float_shortest(1e100), "1e+100");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(float_scientific(1234567.0), "1.234567e+06");
        assert_eq!(float_scientific(23.5), "2.350000e+01");
        assert_eq!(float_scientific(0.0), "0.000000e+00");
        assert_eq!(float_scientific(-0.001), "-1.000000e-03");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(float_fixed(23.5), "23.500000");
        assert_eq!(float_fixed(1e6), "1000000.000000");
        assert_eq!(float_fixed(-0.1), "-0.100000");
    }

    #[test]
    fn test_non_finite_every_mode() {
        let modes: [fn(f64) -> String; 3] = [float_shortest, float_scientific, float_fixed];
        for render in modes {
            assert_eq!(render(f64::NAN), "NaN");
            assert_eq!(render(f64::INFINITY), "+Inf");
            assert_eq!(render(f64::NEG_INFINITY), "-Inf");
        }
    }
}
