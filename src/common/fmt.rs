/// Format a metric value for tooltips and table cells: integral values print
/// bare, everything else keeps up to two decimals with trailing zeros removed.
/// Non-finite values degrade to "n/a" instead of leaking "NaN" into labels.
pub(crate) fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
