use leanval_db::growth::models::MetricUnit;

/// Render a numeric metric value for display in its unit.
pub fn format_metric_value(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Currency => format_currency(value),
        MetricUnit::Percentage => format!("{}%", trim_decimal(value)),
        MetricUnit::Ratio => format!("{value:.1}x"),
        MetricUnit::Count => group_thousands(value.round() as i64),
        MetricUnit::Days => {
            let n = trim_decimal(value);
            if n == "1" {
                "1 day".to_string()
            } else {
                format!("{n} days")
            }
        }
    }
}

fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let cents = (abs * 100.0).round() as i64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}${whole}"),
        frac => format!("{sign}${whole}.{frac:02}"),
    }
}

/// One decimal place at most, with a trailing `.0` dropped.
fn trim_decimal(value: f64) -> String {
    let s = format!("{value:.1}");
    match s.strip_suffix(".0") {
        Some(whole) if whole == "-0" => "0".to_string(),
        Some(whole) => whole.to_string(),
        None => s,
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency() {
        assert_eq!(format_metric_value(1234.0, MetricUnit::Currency), "$1,234");
        assert_eq!(format_metric_value(1234.5, MetricUnit::Currency), "$1,234.50");
        assert_eq!(format_metric_value(0.0, MetricUnit::Currency), "$0");
        assert_eq!(format_metric_value(-35.25, MetricUnit::Currency), "-$35.25");
        assert_eq!(format_metric_value(1_000_000.0, MetricUnit::Currency), "$1,000,000");
    }

    #[test]
    fn percentage() {
        assert_eq!(format_metric_value(45.0, MetricUnit::Percentage), "45%");
        assert_eq!(format_metric_value(12.5, MetricUnit::Percentage), "12.5%");
    }

    #[test]
    fn ratio() {
        assert_eq!(format_metric_value(3.0, MetricUnit::Ratio), "3.0x");
        assert_eq!(format_metric_value(1.54, MetricUnit::Ratio), "1.5x");
    }

    #[test]
    fn count_and_days() {
        assert_eq!(format_metric_value(12345.4, MetricUnit::Count), "12,345");
        assert_eq!(format_metric_value(999.0, MetricUnit::Count), "999");
        assert_eq!(format_metric_value(1.0, MetricUnit::Days), "1 day");
        assert_eq!(format_metric_value(14.0, MetricUnit::Days), "14 days");
    }

    #[test]
    fn negative_counts_keep_sign() {
        assert_eq!(group_thousands(-1234567), "-1,234,567");
    }
}
