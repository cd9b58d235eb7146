//! Number formatting for reports and spreadsheets
//!
//! Non-finite values (the calculator's `NaN`/`Infinity` sentinels) render as
//! `"N/A"` everywhere.

pub const NOT_AVAILABLE: &str = "N/A";

/// Integer with `,` thousands separators
fn group_thousands(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Compact suffix form (`1.5B`, `2.3M`, `450K`) for magnitudes ≥ 1000
fn scaled(abs: f64) -> Option<String> {
    if abs >= 1e9 {
        Some(format!("{:.1}B", abs / 1e9))
    } else if abs >= 1e6 {
        Some(format!("{:.1}M", abs / 1e6))
    } else if abs >= 1e3 {
        Some(format!("{}K", (abs / 1e3).round()))
    } else {
        None
    }
}

/// `1234567.0` → `"1.2M"`, `999.0` → `"999"`
pub fn format_large_number(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if v < 0.0 { "-" } else { "" };
    match scaled(v.abs()) {
        Some(s) => format!("{}{}", sign, s),
        None => group_thousands(v),
    }
}

/// Whole units with thousands separators: `1234567.4` → `"1,234,567"`
pub fn format_currency_full(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    group_thousands(v)
}

/// `1234567.0` → `"$1.2M"`, `-450.0` → `"-$450"`
pub fn format_compact_currency(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let sign = if v < 0.0 { "-$" } else { "$" };
    let abs = v.abs();
    match scaled(abs) {
        Some(s) => format!("{}{}", sign, s),
        None => format!("{}{}", sign, group_thousands(abs)),
    }
}

/// One decimal and a percent sign
pub fn format_percent(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1}%", v)
}

pub fn format_months(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1} months", v)
}

/// Plain spreadsheet cell with two decimals
pub fn format_cell(v: f64) -> String {
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_number() {
        assert_eq!(format_large_number(1_500_000_000.0), "1.5B");
        assert_eq!(format_large_number(2_340_000.0), "2.3M");
        assert_eq!(format_large_number(-450_400.0), "-450K");
        assert_eq!(format_large_number(999.0), "999");
        assert_eq!(format_large_number(f64::NAN), "N/A");
    }

    #[test]
    fn test_currency_full() {
        assert_eq!(format_currency_full(1_234_567.4), "1,234,567");
        assert_eq!(format_currency_full(-1000.0), "-1,000");
        assert_eq!(format_currency_full(12.0), "12");
        assert_eq!(format_currency_full(f64::INFINITY), "N/A");
    }

    #[test]
    fn test_compact_currency() {
        assert_eq!(format_compact_currency(61_600_000.0), "$61.6M");
        assert_eq!(format_compact_currency(-450.0), "-$450");
        assert_eq!(format_compact_currency(12_000.0), "$12K");
    }

    #[test]
    fn test_percent_months() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_months(3.0), "3.0 months");
        assert_eq!(format_months(f64::NAN), "N/A");
        assert_eq!(format_cell(f64::NEG_INFINITY), "N/A");
    }
}
