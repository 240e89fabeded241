use itertools::Itertools;

use crate::calendar::{Frequency, RecurrenceRule};

const WORK_WEEK: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

fn day_name(code: &str) -> Option<&'static str> {
    match code {
        "MO" => Some("Monday"),
        "TU" => Some("Tuesday"),
        "WE" => Some("Wednesday"),
        "TH" => Some("Thursday"),
        "FR" => Some("Friday"),
        "SA" => Some("Saturday"),
        "SU" => Some("Sunday"),
        _ => None,
    }
}

/// Human readable phrase for a recurrence rule, e.g. "Occurs every
/// Monday, Wednesday".
pub fn describe_recurrence(rule: &RecurrenceRule) -> String {
    match rule.freq {
        Some(Frequency::Daily) => return String::from("Occurs every day"),
        Some(Frequency::Weekly) => {}
        _ => return String::from("Recurring meeting"),
    }

    if rule.by_day.is_empty() {
        return String::from("Recurring meeting");
    }

    // Unknown codes are dropped, which can leave nothing to list
    let days: Vec<&str> = rule.by_day.iter().filter_map(|d| day_name(d)).collect();
    if days == WORK_WEEK {
        return String::from("Occurs every weekday");
    }
    format!("Occurs every {}", days.iter().join(", "))
}
