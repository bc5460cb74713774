use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Open-Meteo reports hourly times as `YYYY-MM-DDTHH:MM` (no seconds, no zone)
/// and daily times as `YYYY-MM-DD`, neither of which is RFC 3339.
#[derive(Debug, Fail, PartialEq)]
#[fail(display = "Invalid time format \"{}\"", value)]
pub struct TimeFormatError {
    pub value: String,
}

impl TimeFormatError {
    fn new(value: &str) -> Self {
        TimeFormatError { value: value.to_owned() }
    }
}

pub fn parse_date_hour(value: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    let rfc3339 = complete_time_suffix(strip_quotes(value));

    DateTime::parse_from_rfc3339(&rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeFormatError::new(value))
}

pub fn parse_date_only(value: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    NaiveDate::parse_from_str(strip_quotes(value), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| TimeFormatError::new(value))
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// Rewrites the trailing numeric token `NN` into `NN:00Z`. Input that does not
/// end with a digit is returned untouched and left for the RFC 3339 parser to reject.
fn complete_time_suffix(value: &str) -> String {
    match value.chars().last() {
        Some(last) if last.is_ascii_digit() => format!("{}:00Z", value),
        _ => value.to_owned(),
    }
}
