use chrono::format::{Item, StrftimeItems};
use std::fmt::{Display, Write};

/// Whether `format` is a strftime string chrono can render.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format an API timestamp for display. Accepts RFC 3339 and the naive
/// ISO-8601 forms the blog API emits; anything else, or a format chrono
/// cannot render, is shown unchanged.
pub fn format_date(value: &str, format: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return render(dt.format(format), value);
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return render(dt.format(format), value);
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return render(dt.format(format), value);
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return render(d.format(format), value);
    }

    value.to_string()
}

fn render(formatted: impl Display, raw: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", formatted) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}
