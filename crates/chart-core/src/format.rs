// File: crates/chart-core/src/format.rs
// Summary: Rank, date and label formatting for axes, tooltips and titles.

use chrono::NaiveDateTime;

/// Group the integer part with commas and keep up to three fraction digits,
/// trimming trailing zeroes: `1234567.5` -> `1,234,567.5`.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let fixed = trim_trailing_zeroes(format!("{:.3}", value.abs()));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if value < 0.0 && (int_part != "0" || frac_part.is_some()) {
        grouped.push('-');
    }
    let digits = int_part.as_bytes();
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(&f);
    }
    grouped
}

/// Axis tick and tooltip form of a rank: `#12,345`.
pub fn format_rank(value: f64) -> String {
    format!("#{}", format_grouped(value))
}

/// Tooltip body line: `{series label}: #rank`, or the rank alone when the
/// series has no label.
pub fn tooltip_label(series_label: &str, value: f64) -> String {
    if series_label.is_empty() {
        format_rank(value)
    } else {
        format!("{series_label}: {}", format_rank(value))
    }
}

/// Day-unit time axis label and tooltip title: `Jan 5, 2024`.
pub fn format_day(x: &NaiveDateTime) -> String {
    x.format("%b %-d, %Y").to_string()
}

/// Coarser label used when ticks are a month or more apart: `Jan 2024`.
pub fn format_month(x: &NaiveDateTime) -> String {
    x.format("%b %Y").to_string()
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
