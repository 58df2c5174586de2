use crate::error::ValueParseError;

/// Parse a display value such as `"45%"`, `"$1,200"` or `" 3.5 "`.
///
/// Strips surrounding whitespace, one trailing `%`, one leading `$` (after an
/// optional minus sign) and thousands separators. `field` names the value in
/// the returned error.
pub fn parse_metric_value(field: &'static str, raw: &str) -> Result<f64, ValueParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValueParseError::Empty { field });
    }

    let without_pct = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let (negative, unsigned) = match without_pct.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, without_pct),
    };
    let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned).trim_start();
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

    if digits.is_empty() {
        return Err(ValueParseError::Empty { field });
    }

    let value: f64 = digits.parse().map_err(|_| ValueParseError::NotNumeric {
        field,
        raw: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(ValueParseError::NotFinite {
            field,
            raw: raw.to_string(),
        });
    }

    Ok(if negative { -value } else { value })
}

/// `None` for absent or whitespace-only input.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number() {
        assert_eq!(parse_metric_value("current", "42"), Ok(42.0));
        assert_eq!(parse_metric_value("current", " 3.5 "), Ok(3.5));
    }

    #[test]
    fn percent_suffix_is_stripped() {
        assert_eq!(parse_metric_value("current", "45%"), Ok(45.0));
        assert_eq!(parse_metric_value("current", "12.5 %"), Ok(12.5));
    }

    #[test]
    fn currency_and_separators_are_stripped() {
        assert_eq!(parse_metric_value("target", "$1,200"), Ok(1200.0));
        assert_eq!(parse_metric_value("target", "-$35.50"), Ok(-35.5));
        assert_eq!(parse_metric_value("target", "- $10"), Ok(-10.0));
    }

    #[test]
    fn empty_input_is_reported() {
        assert_eq!(
            parse_metric_value("target", "   "),
            Err(ValueParseError::Empty { field: "target" })
        );
        assert_eq!(
            parse_metric_value("target", "%"),
            Err(ValueParseError::Empty { field: "target" })
        );
    }

    #[test]
    fn garbage_is_not_numeric() {
        let err = parse_metric_value("current", "about ten").unwrap_err();
        assert_eq!(err.field(), "current");
        assert!(matches!(err, ValueParseError::NotNumeric { .. }));
    }

    #[test]
    fn infinity_and_nan_are_rejected() {
        assert!(matches!(
            parse_metric_value("current", "inf"),
            Err(ValueParseError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_metric_value("current", "NaN"),
            Err(ValueParseError::NotFinite { .. })
        ));
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("5")), Some("5"));
    }
}
