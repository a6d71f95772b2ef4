use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

/// Calendar date layout used by the `measurement.date` column and by path parameters.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Length of the "last 12 months" window ending at the most recent measurement.
pub const CUTOFF_WINDOW_DAYS: i64 = 365;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Invalid date format '{input}'. Please use YYYY-MM-DD.")]
pub struct DateParseError {
    pub input: String,
}

pub fn parse_date(input: &str) -> Result<Date, DateParseError> {
    Date::parse(input, DATE_FORMAT).map_err(|_| DateParseError {
        input: input.to_owned(),
    })
}

/// First day included in the window that ends at `latest`.
pub fn window_start(latest: Date) -> Date {
    latest.saturating_sub(Duration::days(CUTOFF_WINDOW_DAYS))
}

/// Inclusive date bounds for temperature statistics. An open `end` means
/// "through the most recent measurement".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    /// Both bounds are validated before anything touches the data source.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, DateParseError> {
        let start = parse_date(start)?;
        let end = end.map(parse_date).transpose()?;
        Ok(Self { start, end })
    }
}
