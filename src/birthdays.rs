//! Upcoming-birthday window evaluation.
//!
//! Pure date logic: given an injected `today`, a contact list, and a window
//! length, pick the contacts whose next birthday occurrence falls inside
//! `[today, today + window_days]` (inclusive both ends). The stored
//! birthday year is ignored — only month/day matter.
//!
//! Feb 29 birthdays projected onto a non-leap year land on Feb 28 of that
//! year. Output order matches input order; inputs are never mutated.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Contact;

/// Default window length in days for the upcoming-birthday view.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Project a birthday's month/day onto `year`.
///
/// Falls back to Feb 28 when the birthday is Feb 29 and `year` is not a
/// leap year.
fn project_onto_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap())
}

/// The next occurrence of `birthday` on or after `today`.
fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = project_onto_year(birthday, today.year());
    if this_year < today {
        project_onto_year(birthday, today.year() + 1)
    } else {
        this_year
    }
}

/// Contacts whose next birthday falls within `[today, today + window_days]`.
pub fn upcoming_birthdays(
    today: NaiveDate,
    contacts: &[Contact],
    window_days: i64,
) -> Vec<Contact> {
    let window_end = today + Duration::days(window_days);
    contacts
        .iter()
        .filter(|contact| {
            let next = next_occurrence(contact.birthday, today);
            today <= next && next <= window_end
        })
        .cloned()
        .collect()
}
