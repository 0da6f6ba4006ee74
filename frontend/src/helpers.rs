//! Small pure helpers shared by the views.

use chrono::NaiveDate;

/// Today's calendar date as an ISO `YYYY-MM-DD` string (UTC), used both as
/// the attendance marker's default selection and as its upper bound.
pub fn today() -> String {
    let iso = js_sys::Date::new_0().to_iso_string();
    let iso = iso.as_string().unwrap_or_default();
    iso.split('T').next().unwrap_or("").to_string()
}

/// Coerces a form field value to `None` when blank, so an omitted optional
/// field is stored as absent rather than as an empty string.
pub fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats an ISO date as e.g. "Jan 10, 2024" for the history table.
/// A value that does not parse is shown unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_become_none() {
        assert_eq!(blank_to_none(""), None);
        assert_eq!(blank_to_none("   "), None);
        assert_eq!(blank_to_none(" ana@example.com "), Some("ana@example.com".to_string()));
    }

    #[test]
    fn dates_format_for_display() {
        assert_eq!(format_date("2024-01-10"), "Jan 10, 2024");
        assert_eq!(format_date("2024-12-03"), "Dec 3, 2024");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
