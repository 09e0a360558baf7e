//! Decodes the several date encodings found in the transaction log.
//!
//! Rows arrive with dates written as spreadsheet serial numbers,
//! `DD/MM/YYYY`, ISO dates, or full ISO date-times, depending on which
//! client wrote the row. The first matching decoder wins; a row whose date
//! matches none of them is rejected upstream rather than defaulted to
//! "today", which would silently move it into the current month.

use time::{
    Date, Duration, Month, OffsetDateTime, format_description::well_known::Rfc3339, macros::date,
};

/// Day zero of the spreadsheet serial-date scheme.
///
/// Spreadsheet software counts days from 1899-12-30: serial 1 is
/// 1899-12-31, and serial 45762 is 2025-04-15.
pub(crate) const SERIAL_EPOCH: Date = date!(1899 - 12 - 30);

/// Convert a spreadsheet serial day-count into a calendar date.
///
/// Returns `None` for serials that are not positive or that overflow the
/// calendar.
pub fn serial_to_date(serial: i64) -> Option<Date> {
    if serial <= 0 {
        return None;
    }

    SERIAL_EPOCH.checked_add(Duration::days(serial))
}

/// Resolve a raw date string to a calendar date, first match wins:
/// serial number, then `D/M/YYYY`, then `YYYY-M-D`, then an RFC 3339
/// date-time. Returns `None` when nothing matches.
pub(crate) fn parse_record_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();

    if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return serial_to_date(raw.parse().ok()?);
    }

    parse_day_month_year(raw)
        .or_else(|| parse_year_month_day(raw))
        .or_else(|| parse_date_time(raw))
}

/// Parse `D{1,2}[/-]M{1,2}[/-]Y{4}`, interpreted as Day/Month/Year.
fn parse_day_month_year(raw: &str) -> Option<Date> {
    let parts: Vec<&str> = raw.split(['/', '-']).collect();

    if parts.len() != 3 || parts[2].len() != 4 {
        return None;
    }

    let day: u8 = parts[0].parse().ok()?;
    let month: u8 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Parse `Y{4}-M{1,2}-D{1,2}`, interpreted as Year/Month/Day.
fn parse_year_month_day(raw: &str) -> Option<Date> {
    let parts: Vec<&str> = raw.split('-').collect();

    if parts.len() != 3 || parts[0].len() != 4 {
        return None;
    }

    let year: i32 = parts[0].parse().ok()?;
    let month: u8 = parts[1].parse().ok()?;
    let day: u8 = parts[2].parse().ok()?;

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// Last resort: an RFC 3339 date-time, the format spreadsheet APIs emit
/// for timestamped cells. Only the date part is kept.
fn parse_date_time(raw: &str) -> Option<Date> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .map(|instant| instant.date())
}
