//! Walks parsed events and sorts them into the week's attendance board
//! and the table of recurring meetings the caller may want to confirm.
use std::collections::BTreeSet;

use chrono_tz::Tz;

use super::board::{AttendanceBoard, WorkDay};
use super::candidates::{CandidateTable, RecurringCandidate};
use super::recurrence::describe_recurrence;
use super::strategy::TimesheetStrategy;
use super::week::WeekWindow;
use crate::calendar::CalendarEvent;

pub fn classify_events(
    events: &[CalendarEvent],
    week: &WeekWindow,
    tz: &Tz,
    strategy: &dyn TimesheetStrategy,
) -> (AttendanceBoard, CandidateTable) {
    let mut board = AttendanceBoard::new();
    let mut candidates = CandidateTable::new();

    for event in events {
        let summary = event.summary.as_deref().unwrap_or_default().trim();
        if summary.to_lowercase().starts_with("canceled") {
            continue;
        }
        if summary.is_empty() && !strategy.keeps_blank_summaries() {
            continue;
        }

        let Some(start) = event.start else {
            tracing::debug!("Skipping '{}' without a start", summary);
            continue;
        };
        let event_date = start.local_date(tz);

        if week.contains(event_date) {
            if let Some(day) = WorkDay::from_date(event_date) {
                strategy.record(&mut board, day, summary);
            }
        }

        let Some(rule) = &event.rrule else {
            continue;
        };
        let uid = event.uid.as_deref().map(str::trim).unwrap_or_default();
        let Some(key) = strategy.candidate_key(uid, summary) else {
            continue;
        };

        // The series has to be active at some point during the week
        let starts_later = strategy.series_start(&start, tz) > week.end;
        let ended_before = rule.until.is_some_and(|until| until < week.start);
        if starts_later || ended_before {
            continue;
        }

        candidates.register(
            key,
            RecurringCandidate {
                uid: uid.to_string(),
                summary: summary.to_string(),
                by_day: rule.by_day.clone(),
                exdates: event.exdates.iter().copied().collect::<BTreeSet<_>>(),
                recurrence_text: describe_recurrence(rule),
            },
        );
    }

    (board, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{EventStart, Frequency, RecurrenceRule};
    use crate::timesheet::strategy::{CoverageStrategy, LegacyStrategy};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week() -> WeekWindow {
        WeekWindow::from_sunday(date(2025, 1, 5)).unwrap()
    }

    fn single(summary: &str, start: EventStart) -> CalendarEvent {
        CalendarEvent {
            summary: Some(summary.to_string()),
            uid: None,
            start: Some(start),
            rrule: None,
            exdates: vec![],
        }
    }

    fn weekly(uid: &str, summary: &str, start: NaiveDate, by_day: &[&str]) -> CalendarEvent {
        CalendarEvent {
            summary: Some(summary.to_string()),
            uid: Some(uid.to_string()),
            start: Some(EventStart::Date(start)),
            rrule: Some(RecurrenceRule {
                freq: Some(Frequency::Weekly),
                by_day: by_day.iter().map(|d| d.to_string()).collect(),
                until: None,
            }),
            exdates: vec![],
        }
    }

    #[test]
    fn it_buckets_single_events_by_weekday() {
        let events = vec![
            single("Standup", EventStart::Date(date(2025, 1, 8))),
            single(
                "Planning",
                EventStart::Floating(date(2025, 1, 6).and_hms_opt(10, 0, 0).unwrap()),
            ),
            single("Last week", EventStart::Date(date(2025, 1, 3))),
            single("Next week", EventStart::Date(date(2025, 1, 13))),
        ];

        let (board, candidates) =
            classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(board.meetings(WorkDay::Wednesday), ["Standup"]);
        assert_eq!(board.meetings(WorkDay::Monday), ["Planning"]);
        assert!(board.meetings(WorkDay::Friday).is_empty());
        assert!(candidates.is_empty());
    }

    #[test]
    fn it_converts_zoned_starts_to_the_local_zone() {
        // Thursday 22:00 UTC is Friday morning in Kolkata
        let start = EventStart::Zoned(
            Utc.with_ymd_and_hms(2025, 1, 9, 22, 0, 0)
                .unwrap()
                .fixed_offset(),
        );
        let events = vec![single("Late call", start)];

        let (board, _) =
            classify_events(&events, &week(), &chrono_tz::Asia::Kolkata, &CoverageStrategy);
        assert_eq!(board.meetings(WorkDay::Friday), ["Late call"]);
        assert!(board.meetings(WorkDay::Thursday).is_empty());

        let (board, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(board.meetings(WorkDay::Thursday), ["Late call"]);
    }

    #[test]
    fn it_skips_cancelled_blank_and_startless_events() {
        let mut no_start = single("No start", EventStart::Date(date(2025, 1, 6)));
        no_start.start = None;
        let events = vec![
            single("Canceled: Sync", EventStart::Date(date(2025, 1, 6))),
            single("CANCELED Retro", EventStart::Date(date(2025, 1, 6))),
            single("   ", EventStart::Date(date(2025, 1, 6))),
            CalendarEvent {
                summary: None,
                ..single("", EventStart::Date(date(2025, 1, 6)))
            },
            no_start,
        ];

        let (board, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(board, AttendanceBoard::new());
    }

    #[test]
    fn it_deduplicates_within_a_day() {
        let events = vec![
            single("Standup", EventStart::Date(date(2025, 1, 7))),
            single(" Standup ", EventStart::Date(date(2025, 1, 7))),
        ];
        let (board, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(board.meetings(WorkDay::Tuesday), ["Standup"]);
    }

    #[test]
    fn it_registers_recurring_candidates() {
        let mut event = weekly("u1", "Sync", date(2024, 11, 4), &["MO", "WE", "FR"]);
        event.exdates = vec![date(2025, 1, 6), date(2025, 1, 6)];

        let (board, candidates) =
            classify_events(&[event], &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(board, AttendanceBoard::new());

        let candidate = candidates.get("u1").unwrap();
        assert_eq!(candidate.summary, "Sync");
        assert_eq!(candidate.by_day, vec!["MO", "WE", "FR"]);
        assert_eq!(candidate.exdates, BTreeSet::from([date(2025, 1, 6)]));
        assert_eq!(
            candidate.recurrence_text,
            "Occurs every Monday, Wednesday, Friday"
        );
    }

    #[test]
    fn it_requires_a_uid_for_candidates() {
        let mut event = weekly("", "Sync", date(2024, 11, 4), &["MO"]);
        let (_, candidates) =
            classify_events(&[event.clone()], &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert!(candidates.is_empty());

        event.uid = None;
        let (_, candidates) =
            classify_events(&[event], &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert!(candidates.is_empty());
    }

    #[test]
    fn it_ignores_series_outside_the_week() {
        let later = weekly("later", "Later", date(2025, 1, 11), &["MO"]);
        let mut ended = weekly("ended", "Ended", date(2024, 11, 4), &["MO"]);
        ended.rrule.as_mut().unwrap().until = Some(date(2025, 1, 5));
        let mut ends_monday = weekly("ends", "Ends Monday", date(2024, 11, 4), &["MO"]);
        ends_monday.rrule.as_mut().unwrap().until = Some(date(2025, 1, 6));
        let starts_friday = weekly("starts", "Starts Friday", date(2025, 1, 10), &["FR"]);

        let (board, candidates) = classify_events(
            &[later, ended, ends_monday, starts_friday],
            &week(),
            &chrono_tz::UTC,
            &CoverageStrategy,
        );
        let uids: Vec<_> = candidates.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids, vec!["ends", "starts"]);
        // The first occurrence itself is an explicit entry
        assert_eq!(board.meetings(WorkDay::Friday), ["Starts Friday"]);
    }

    #[test]
    fn it_is_idempotent() {
        let events = vec![
            single("Standup", EventStart::Date(date(2025, 1, 8))),
            weekly("u1", "Sync", date(2024, 11, 4), &["MO", "WE"]),
        ];
        let (first, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        let (second, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert_eq!(first, second);
    }

    #[test]
    fn it_records_blank_summaries_on_the_legacy_path() {
        let events = vec![
            single("", EventStart::Date(date(2025, 1, 6))),
            single("Canceled: Sync", EventStart::Date(date(2025, 1, 6))),
        ];
        let (board, _) = classify_events(&events, &week(), &chrono_tz::UTC, &LegacyStrategy);
        assert_eq!(board.meetings(WorkDay::Monday), [""]);

        let (board, _) = classify_events(&events, &week(), &chrono_tz::UTC, &CoverageStrategy);
        assert!(board.meetings(WorkDay::Monday).is_empty());
    }

    #[test]
    fn it_checks_legacy_series_against_their_written_start() {
        // Written as Friday 22:00 in Los Angeles, which is Saturday in
        // Kolkata and so after the week ends
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let mut event = weekly("late", "Late sync", date(2025, 1, 10), &["FR"]);
        event.start = Some(EventStart::Zoned(
            offset.with_ymd_and_hms(2025, 1, 10, 22, 0, 0).unwrap(),
        ));
        let tz = chrono_tz::Asia::Kolkata;

        let (_, legacy) = classify_events(&[event.clone()], &week(), &tz, &LegacyStrategy);
        assert!(legacy.get("Late sync").is_some());

        let (_, current) = classify_events(&[event], &week(), &tz, &CoverageStrategy);
        assert!(current.is_empty());
    }

    #[test]
    fn it_keys_legacy_candidates_by_summary() {
        let events = vec![
            weekly("", "Sync", date(2024, 11, 4), &["MO"]),
            single("Standup", EventStart::Date(date(2025, 1, 7))),
            single("Standup", EventStart::Date(date(2025, 1, 7))),
        ];
        let (board, candidates) =
            classify_events(&events, &week(), &chrono_tz::UTC, &LegacyStrategy);
        assert!(candidates.get("Sync").is_some());
        assert_eq!(board.meetings(WorkDay::Tuesday), ["Standup", "Standup"]);
    }
}
