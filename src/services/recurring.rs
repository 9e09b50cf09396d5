//! Pending recurring expenses
//!
//! Projects recurring expenses forward from their last recorded date to the
//! end of the current month. Only occurrences strictly after `today` count as
//! pending.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Money, ReconcilePeriod, Recurrence, Transaction};

/// Total of recurring expense occurrences still due this month
///
/// Recording the same series several times does not multiply it: each
/// series (category, description, amount and cadence) projects once from
/// its latest recorded date.
pub fn pending_recurring_amount(transactions: &[Transaction], today: NaiveDate) -> Money {
    let Some(month_end) = ReconcilePeriod::month_of(today).end_date() else {
        return Money::zero();
    };

    let mut series: HashMap<SeriesKey, NaiveDate> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let Some(recurrence) = t.recurrence else {
            continue;
        };
        let key = SeriesKey {
            category: t.category.trim().to_lowercase(),
            description: t.description.trim().to_lowercase(),
            amount: t.amount,
            recurrence,
        };
        series
            .entry(key)
            .and_modify(|latest| *latest = (*latest).max(t.date))
            .or_insert(t.date);
    }

    series
        .iter()
        .map(|(key, anchor)| {
            let count = occurrences_between(*anchor, key.recurrence, today, month_end);
            Money::from_cents(key.amount.cents() * count as i64)
        })
        .sum()
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct SeriesKey {
    category: String,
    description: String,
    amount: Money,
    recurrence: Recurrence,
}

/// Occurrences after `anchor` that fall in `(after, until]`
fn occurrences_between(
    anchor: NaiveDate,
    recurrence: Recurrence,
    after: NaiveDate,
    until: NaiveDate,
) -> usize {
    let mut count = 0;
    let mut step = 1;
    while let Some(next) = nth_occurrence(anchor, recurrence, step) {
        if next > until {
            break;
        }
        if next > after {
            count += 1;
        }
        step += 1;
    }
    count
}

/// The `n`th occurrence after `anchor`
///
/// Monthly and yearly occurrences keep the anchor's day of month, clamped to
/// the last day of shorter months.
fn nth_occurrence(anchor: NaiveDate, recurrence: Recurrence, n: u32) -> Option<NaiveDate> {
    match recurrence.interval_days() {
        Some(days) => anchor.checked_add_signed(Duration::days(days * n as i64)),
        None => {
            let months = match recurrence {
                Recurrence::Yearly => 12 * n,
                _ => n,
            };
            add_months_clamped(anchor, months)
        }
    }
}

fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    let last_day = ReconcilePeriod::month(year, month0).end_date()?.day();
    NaiveDate::from_ymd_opt(year, month0 + 1, date.day().min(last_day))
}
