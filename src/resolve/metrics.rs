//! Display strings for impact metrics.
//!
//! The CMS stores a metric as a bare number plus an optional unit hint. The
//! value is already expressed in the unit (`{ value: 12, unit: "k" }` means
//! "12k"), so formatting only decides the suffix or prefix.
//!
//! | unit | example |
//! |---|---|
//! | `k` | `12k` |
//! | `m` | `1.5M` |
//! | `percent` | `98%` |
//! | `x` | `3x` |
//! | `chf` | `CHF 1,200` |
//! | `eur` | `€1,200` |
//! | `usd` | `$1,200` |
//! | `rating` | `4.8/5` |
//! | anything else | `12,345` |

/// Render a metric value for display. Units are matched case-insensitively.
pub fn format_metric_number(value: f64, unit: Option<&str>) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let unit = unit.map(|u| u.trim().to_ascii_lowercase());
    match unit.as_deref() {
        Some("k") => format!("{}k", plain(value)),
        Some("m") => format!("{}M", plain(value)),
        Some("percent") => format!("{}%", plain(value)),
        Some("x") => format!("{}x", plain(value)),
        Some("chf") => format!("CHF {}", grouped(value)),
        Some("eur") => format!("€{}", grouped(value)),
        Some("usd") => format!("${}", grouped(value)),
        Some("rating") => format!("{value:.1}/5"),
        _ => grouped(value),
    }
}

/// Split a value into sign, integer digits, and trimmed fraction digits,
/// rounded to two decimals.
fn parts(value: f64) -> (bool, String, String) {
    let formatted = format!("{:.2}", value.abs());
    let (int, frac) = formatted
        .split_once('.')
        .map(|(i, f)| (i.to_string(), f.trim_end_matches('0').to_string()))
        .unwrap_or((formatted.clone(), String::new()));
    let negative = value < 0.0 && (int != "0" || !frac.is_empty());
    (negative, int, frac)
}

fn assemble(negative: bool, int: &str, frac: &str) -> String {
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

/// Up to two fraction digits, no grouping.
fn plain(value: f64) -> String {
    let (negative, int, frac) = parts(value);
    assemble(negative, &int, &frac)
}

/// English-locale number: comma thousands separators, up to two fraction
/// digits.
fn grouped(value: f64) -> String {
    let (negative, int, frac) = parts(value);
    let digits: Vec<char> = int.chars().collect();
    let mut with_commas = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(*d);
    }
    assemble(negative, &with_commas, &frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_unit_has_its_own_rendering() {
        assert_eq!(format_metric_number(12.0, Some("k")), "12k");
        assert_eq!(format_metric_number(1.5, Some("m")), "1.5M");
        assert_eq!(format_metric_number(98.0, Some("percent")), "98%");
        assert_eq!(format_metric_number(3.0, Some("x")), "3x");
        assert_eq!(format_metric_number(1200.0, Some("chf")), "CHF 1,200");
        assert_eq!(format_metric_number(1200.0, Some("eur")), "€1,200");
        assert_eq!(format_metric_number(1200.5, Some("usd")), "$1,200.5");
        assert_eq!(format_metric_number(4.8, Some("rating")), "4.8/5");
        assert_eq!(format_metric_number(5.0, Some("rating")), "5.0/5");
    }

    #[test]
    fn units_are_case_insensitive() {
        assert_eq!(format_metric_number(250.0, Some("K")), "250k");
        assert_eq!(format_metric_number(10.0, Some(" CHF ")), "CHF 10");
    }

    #[test]
    fn unknown_or_missing_unit_is_grouped_plain_number() {
        assert_eq!(format_metric_number(12345.0, None), "12,345");
        assert_eq!(format_metric_number(1234567.891, Some("people")), "1,234,567.89");
        assert_eq!(format_metric_number(999.0, Some("")), "999");
    }

    #[test]
    fn grouping_edges() {
        assert_eq!(grouped(0.0), "0");
        assert_eq!(grouped(100.0), "100");
        assert_eq!(grouped(1000.0), "1,000");
        assert_eq!(grouped(-45678.1), "-45,678.1");
        assert_eq!(grouped(-0.001), "0");
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        assert_eq!(plain(2.50), "2.5");
        assert_eq!(plain(2.0), "2");
        assert_eq!(plain(0.126), "0.13");
    }
}
