//! Number formatting applied at render time.

use depreport_types::{FormatOptions, TotalsAccumulator};

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Integer with grouping every three digits: `1234567` -> `1,234,567`.
pub fn format_count(n: u64, opts: &FormatOptions) -> String {
    group_digits(&n.to_string(), opts.grouping_separator)
}

/// Byte size in KB, MB or GB (1024-based) with two decimals.
///
/// Anything up to 1 MB is shown in KB, anything up to 1 GB in MB.
pub fn format_size(bytes: u64, opts: &FormatOptions) -> String {
    let (value, unit) = if bytes > GB {
        (bytes as f64 / GB as f64, "GB")
    } else if bytes > MB {
        (bytes as f64 / MB as f64, "MB")
    } else {
        (bytes as f64 / KB as f64, "KB")
    };
    format!("{} {}", format_fixed(value, 2, opts), unit)
}

/// Highest JDK revision: shortest form with at least one decimal (`1.8`, `21.0`, `0.0`).
pub fn format_revision(value: f64, opts: &FormatOptions) -> String {
    let text = if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    };
    text.replace('.', &opts.decimal_separator.to_string())
}

pub fn format_totals(totals: &TotalsAccumulator, opts: &FormatOptions) -> String {
    totals.render_with(|n| format_count(n, opts))
}

pub fn format_size_totals(totals: &TotalsAccumulator, opts: &FormatOptions) -> String {
    totals.render_with(|n| format_size(n, opts))
}

fn format_fixed(value: f64, decimals: usize, opts: &FormatOptions) -> String {
    let text = format!("{value:.decimals$}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let grouped = group_digits(int_part, opts.grouping_separator);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped}{}{frac_part}", opts.decimal_separator)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
