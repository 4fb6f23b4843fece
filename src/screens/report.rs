use chrono::{Days, NaiveDate};

/// Moves the report date by whole days, clamping at the calendar edges.
pub fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(date)
}

/// The report never moves past today.
pub fn can_go_forward(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}
