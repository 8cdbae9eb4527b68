//! Lox number formatting.

/// Format a Lox number the way the language prints it: integral values
/// drop the decimal point, everything else uses the shortest roundtrip
/// form.
#[expect(
    clippy::float_cmp,
    reason = "trunc comparison is exact for every non-integral input"
)]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value == value.trunc() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
