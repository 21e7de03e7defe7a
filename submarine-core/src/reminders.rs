use time::{Date, Month};

use crate::domain::{Cycle, Subscription};
use crate::settings::Settings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    /// Position in the subscription list (0-based).
    pub index: usize,
    pub name: String,
    pub due: Date,
    pub days_left: i64,
    pub message: String,
}

/// First renewal on or after `today`. Renewals are always counted from the
/// date it was added so short months do not make the day drift.
pub fn next_renewal(added: Date, cycle: Cycle, today: Date) -> Option<Date> {
    let step = cycle.months() as i64;
    let elapsed = (today.year() as i64 - added.year() as i64) * 12
        + (today.month() as i64 - added.month() as i64);
    let mut k = (elapsed / step - 1).max(1);
    loop {
        let due = add_months(added, k * step)?;
        if due >= today {
            return Some(due);
        }
        k += 1;
    }
}

/// Renewals due within the configured lead time, soonest first.
pub fn upcoming(subs: &[Subscription], settings: &Settings, today: Date) -> Vec<Reminder> {
    if !settings.notifications_enabled {
        return Vec::new();
    }
    let lead = settings.notification_when.days();
    let mut out: Vec<Reminder> = subs
        .iter()
        .enumerate()
        .filter_map(|(index, sub)| {
            let due = next_renewal(sub.added_on()?, sub.cycle, today)?;
            let days_left = (due - today).whole_days();
            (days_left <= lead).then(|| Reminder {
                index,
                name: sub.name.clone(),
                due,
                days_left,
                message: settings.notification_custom_text.clone(),
            })
        })
        .collect();
    out.sort_by_key(|r| r.due);
    out
}

fn add_months(date: Date, months: i64) -> Option<Date> {
    let zero_based = date.year() as i64 * 12 + (date.month() as i64 - 1) + months;
    let year = i32::try_from(zero_based.div_euclid(12)).ok()?;
    let month = Month::try_from(zero_based.rem_euclid(12) as u8 + 1).ok()?;
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LeadTime;
    use time::macros::date;

    fn sub(name: &str, cycle: Cycle, added: &str) -> Subscription {
        Subscription {
            name: name.into(),
            price: 1.0,
            cycle,
            website: None,
            date_added: added.into(),
            icon: None,
        }
    }

    #[test]
    fn monthly_renewal_is_next_anniversary_day() {
        let added = date!(2024 - 01 - 15);
        assert_eq!(
            next_renewal(added, Cycle::Monthly, date!(2024 - 03 - 10)),
            Some(date!(2024 - 03 - 15))
        );
        assert_eq!(
            next_renewal(added, Cycle::Monthly, date!(2024 - 03 - 15)),
            Some(date!(2024 - 03 - 15))
        );
        assert_eq!(
            next_renewal(added, Cycle::Monthly, date!(2024 - 03 - 16)),
            Some(date!(2024 - 04 - 15))
        );
    }

    #[test]
    fn first_renewal_is_one_period_after_adding() {
        let added = date!(2024 - 05 - 01);
        assert_eq!(
            next_renewal(added, Cycle::Monthly, added),
            Some(date!(2024 - 06 - 01))
        );
        assert_eq!(
            next_renewal(added, Cycle::Yearly, date!(2024 - 05 - 02)),
            Some(date!(2025 - 05 - 01))
        );
    }

    #[test]
    fn end_of_month_clamps_without_drift() {
        let added = date!(2024 - 01 - 31);
        assert_eq!(
            next_renewal(added, Cycle::Monthly, date!(2024 - 02 - 01)),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(
            next_renewal(added, Cycle::Monthly, date!(2024 - 03 - 01)),
            Some(date!(2024 - 03 - 31))
        );
        assert_eq!(
            next_renewal(date!(2024 - 02 - 29), Cycle::Yearly, date!(2024 - 06 - 01)),
            Some(date!(2025 - 02 - 28))
        );
    }

    #[test]
    fn upcoming_respects_switch_and_lead_time() {
        let subs = vec![
            sub("soon", Cycle::Monthly, "2024-01-12"),
            sub("later", Cycle::Monthly, "2024-01-20"),
            sub("sooner", Cycle::Yearly, "2023-03-11"),
            sub("broken", Cycle::Monthly, "?"),
        ];
        let today = date!(2024 - 03 - 10);
        let mut settings = Settings::default();
        assert!(upcoming(&subs, &settings, today).is_empty());

        settings.notifications_enabled = true;
        settings.notification_when = LeadTime::ThreeDays;
        let got = upcoming(&subs, &settings, today);
        let names: Vec<(&str, i64)> = got.iter().map(|r| (r.name.as_str(), r.days_left)).collect();
        assert_eq!(names, [("sooner", 1), ("soon", 2)]);
        assert_eq!(got[1].index, 0);
        assert_eq!(got[0].message, "Your subscription is due soon!");

        settings.notification_when = LeadTime::TwoWeeks;
        assert_eq!(upcoming(&subs, &settings, today).len(), 3);
    }
}
