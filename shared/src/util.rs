use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Today's date on the server's local clock
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// `[start, end)` of a local calendar day, expressed in UTC
///
/// Falls back to treating the date as UTC when local midnight does not exist
/// (a DST gap at midnight).
pub fn local_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = to_utc(day);
    let end = day.succ_opt().map(to_utc).unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}

fn to_utc(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
