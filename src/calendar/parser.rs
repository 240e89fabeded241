//! ICS parsing built on the `ical` crate.
//!
//! Only the VEVENT properties the timesheet reads are extracted:
//! SUMMARY, UID, DTSTART, RRULE and EXDATE. Values the parser can not
//! make sense of are left out of the record rather than failing the
//! whole document.
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;

use super::models::{CalendarEvent, EventStart, Frequency, RecurrenceRule};
use super::zones::ZoneTable;
use crate::core::TimesheetError;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Parse raw calendar bytes into event records.
pub fn parse_calendar(raw: &[u8]) -> Result<Vec<CalendarEvent>, TimesheetError> {
    let reader = ical::IcalParser::new(raw);

    let mut calendars = 0;
    let mut events = Vec::new();
    for calendar in reader {
        let calendar =
            calendar.map_err(|e| TimesheetError::MalformedCalendar(format!("{e}")))?;
        calendars += 1;
        let zones = ZoneTable::from_vtimezones(&calendar.timezones);
        events.extend(calendar.events.iter().map(|event| parse_event(event, &zones)));
    }

    if calendars == 0 {
        return Err(TimesheetError::MalformedCalendar(String::from(
            "no VCALENDAR found",
        )));
    }

    tracing::debug!("Parsed {} events from {} calendars", events.len(), calendars);
    Ok(events)
}

fn parse_event(event: &IcalEvent, zones: &ZoneTable) -> CalendarEvent {
    let mut parsed = CalendarEvent::default();

    for property in &event.properties {
        let Some(value) = property.value.as_deref() else {
            continue;
        };
        match property.name.to_uppercase().as_str() {
            "SUMMARY" => parsed.summary = Some(unescape_text(value)),
            "UID" => parsed.uid = Some(unescape_text(value)),
            "DTSTART" => parsed.start = parse_start(property, value, zones),
            "RRULE" => parsed.rrule = Some(parse_rrule(value)),
            "EXDATE" => parsed
                .exdates
                .extend(value.split(',').filter_map(parse_date_prefix)),
            _ => {}
        }
    }

    parsed
}

fn param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|v| v.trim_matches('"'))
}

fn parse_start(property: &Property, value: &str, zones: &ZoneTable) -> Option<EventStart> {
    let value = value.trim();
    let is_date = param(property, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || !value.contains('T');
    if is_date {
        return parse_date_prefix(value).map(EventStart::Date);
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok()?;
        let instant = Utc.from_utc_datetime(&naive).fixed_offset();
        return Some(EventStart::Zoned(instant));
    }

    let naive = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()?;
    let Some(tzid) = param(property, "TZID") else {
        return Some(EventStart::Floating(naive));
    };
    match zones.resolve(tzid, naive) {
        Some(zoned) => Some(EventStart::Zoned(zoned)),
        None => {
            tracing::debug!("Unknown TZID {}, keeping wall-clock time", tzid);
            Some(EventStart::Floating(naive))
        }
    }
}

fn parse_rrule(value: &str) -> RecurrenceRule {
    let mut rule = RecurrenceRule::default();

    for part in value.split(';') {
        let Some((key, val)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_uppercase().as_str() {
            "FREQ" => rule.freq = Some(Frequency::from(val)),
            "BYDAY" => {
                rule.by_day = val
                    .split(',')
                    .map(|d| d.trim().to_uppercase())
                    .filter(|d| !d.is_empty())
                    .collect()
            }
            "UNTIL" => rule.until = parse_date_prefix(val),
            _ => {}
        }
    }

    rule
}

/// Date portion of a DATE or DATE-TIME value, ignoring any time or zone.
fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = value.get(..8)?;
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
