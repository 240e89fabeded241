//! Resolves the TZID of a DATE-TIME value to a fixed UTC offset.
//!
//! IANA names go straight to chrono-tz. Outlook writes Windows zone
//! names, which are mapped to their IANA equivalent. Anything else is
//! looked up among the VTIMEZONE definitions of the calendar itself.
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday,
};
use chrono_tz::Tz;
use ical::parser::ical::component::{IcalTimeZone, IcalTimeZoneTransition};
use ical::property::Property;

const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Windows zone names as written by Exchange and Outlook, paired with
/// the IANA zone CLDR maps them to for the world territory.
const WINDOWS_ZONES: &[(&str, &str)] = &[
    ("Dateline Standard Time", "Etc/GMT+12"),
    ("UTC-11", "Etc/GMT+11"),
    ("Aleutian Standard Time", "America/Adak"),
    ("Hawaiian Standard Time", "Pacific/Honolulu"),
    ("Marquesas Standard Time", "Pacific/Marquesas"),
    ("Alaskan Standard Time", "America/Anchorage"),
    ("UTC-09", "Etc/GMT+9"),
    ("Pacific Standard Time (Mexico)", "America/Tijuana"),
    ("UTC-08", "Etc/GMT+8"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("US Mountain Standard Time", "America/Phoenix"),
    ("Mountain Standard Time (Mexico)", "America/Mazatlan"),
    ("Mountain Standard Time", "America/Denver"),
    ("Yukon Standard Time", "America/Whitehorse"),
    ("Central America Standard Time", "America/Guatemala"),
    ("Central Standard Time", "America/Chicago"),
    ("Easter Island Standard Time", "Pacific/Easter"),
    ("Central Standard Time (Mexico)", "America/Mexico_City"),
    ("Canada Central Standard Time", "America/Regina"),
    ("SA Pacific Standard Time", "America/Bogota"),
    ("Eastern Standard Time (Mexico)", "America/Cancun"),
    ("Eastern Standard Time", "America/New_York"),
    ("Haiti Standard Time", "America/Port-au-Prince"),
    ("Cuba Standard Time", "America/Havana"),
    ("US Eastern Standard Time", "America/Indiana/Indianapolis"),
    ("Turks And Caicos Standard Time", "America/Grand_Turk"),
    ("Paraguay Standard Time", "America/Asuncion"),
    ("Atlantic Standard Time", "America/Halifax"),
    ("Venezuela Standard Time", "America/Caracas"),
    ("Central Brazilian Standard Time", "America/Cuiaba"),
    ("SA Western Standard Time", "America/La_Paz"),
    ("Pacific SA Standard Time", "America/Santiago"),
    ("Newfoundland Standard Time", "America/St_Johns"),
    ("Tocantins Standard Time", "America/Araguaina"),
    ("E. South America Standard Time", "America/Sao_Paulo"),
    ("SA Eastern Standard Time", "America/Cayenne"),
    ("Argentina Standard Time", "America/Argentina/Buenos_Aires"),
    ("Greenland Standard Time", "America/Nuuk"),
    ("Montevideo Standard Time", "America/Montevideo"),
    ("Magallanes Standard Time", "America/Punta_Arenas"),
    ("Saint Pierre Standard Time", "America/Miquelon"),
    ("Bahia Standard Time", "America/Bahia"),
    ("UTC-02", "Etc/GMT+2"),
    ("Azores Standard Time", "Atlantic/Azores"),
    ("Cape Verde Standard Time", "Atlantic/Cape_Verde"),
    ("UTC", "Etc/UTC"),
    ("GMT Standard Time", "Europe/London"),
    ("Greenwich Standard Time", "Atlantic/Reykjavik"),
    ("Sao Tome Standard Time", "Africa/Sao_Tome"),
    ("Morocco Standard Time", "Africa/Casablanca"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("Central Europe Standard Time", "Europe/Budapest"),
    ("Romance Standard Time", "Europe/Paris"),
    ("Central European Standard Time", "Europe/Warsaw"),
    ("W. Central Africa Standard Time", "Africa/Lagos"),
    ("Jordan Standard Time", "Asia/Amman"),
    ("GTB Standard Time", "Europe/Bucharest"),
    ("Middle East Standard Time", "Asia/Beirut"),
    ("Egypt Standard Time", "Africa/Cairo"),
    ("E. Europe Standard Time", "Europe/Chisinau"),
    ("Syria Standard Time", "Asia/Damascus"),
    ("West Bank Standard Time", "Asia/Hebron"),
    ("South Africa Standard Time", "Africa/Johannesburg"),
    ("FLE Standard Time", "Europe/Kyiv"),
    ("Israel Standard Time", "Asia/Jerusalem"),
    ("South Sudan Standard Time", "Africa/Juba"),
    ("Kaliningrad Standard Time", "Europe/Kaliningrad"),
    ("Sudan Standard Time", "Africa/Khartoum"),
    ("Libya Standard Time", "Africa/Tripoli"),
    ("Namibia Standard Time", "Africa/Windhoek"),
    ("Arabic Standard Time", "Asia/Baghdad"),
    ("Turkey Standard Time", "Europe/Istanbul"),
    ("Arab Standard Time", "Asia/Riyadh"),
    ("Belarus Standard Time", "Europe/Minsk"),
    ("Russian Standard Time", "Europe/Moscow"),
    ("E. Africa Standard Time", "Africa/Nairobi"),
    ("Volgograd Standard Time", "Europe/Volgograd"),
    ("Iran Standard Time", "Asia/Tehran"),
    ("Arabian Standard Time", "Asia/Dubai"),
    ("Astrakhan Standard Time", "Europe/Astrakhan"),
    ("Azerbaijan Standard Time", "Asia/Baku"),
    ("Russia Time Zone 3", "Europe/Samara"),
    ("Mauritius Standard Time", "Indian/Mauritius"),
    ("Saratov Standard Time", "Europe/Saratov"),
    ("Georgian Standard Time", "Asia/Tbilisi"),
    ("Caucasus Standard Time", "Asia/Yerevan"),
    ("Afghanistan Standard Time", "Asia/Kabul"),
    ("West Asia Standard Time", "Asia/Tashkent"),
    ("Ekaterinburg Standard Time", "Asia/Yekaterinburg"),
    ("Pakistan Standard Time", "Asia/Karachi"),
    ("Qyzylorda Standard Time", "Asia/Qyzylorda"),
    ("India Standard Time", "Asia/Kolkata"),
    ("Sri Lanka Standard Time", "Asia/Colombo"),
    ("Nepal Standard Time", "Asia/Kathmandu"),
    ("Central Asia Standard Time", "Asia/Almaty"),
    ("Bangladesh Standard Time", "Asia/Dhaka"),
    ("Omsk Standard Time", "Asia/Omsk"),
    ("Myanmar Standard Time", "Asia/Yangon"),
    ("SE Asia Standard Time", "Asia/Bangkok"),
    ("Altai Standard Time", "Asia/Barnaul"),
    ("W. Mongolia Standard Time", "Asia/Hovd"),
    ("North Asia Standard Time", "Asia/Krasnoyarsk"),
    ("N. Central Asia Standard Time", "Asia/Novosibirsk"),
    ("Tomsk Standard Time", "Asia/Tomsk"),
    ("China Standard Time", "Asia/Shanghai"),
    ("North Asia East Standard Time", "Asia/Irkutsk"),
    ("Singapore Standard Time", "Asia/Singapore"),
    ("W. Australia Standard Time", "Australia/Perth"),
    ("Taipei Standard Time", "Asia/Taipei"),
    ("Ulaanbaatar Standard Time", "Asia/Ulaanbaatar"),
    ("Aus Central W. Standard Time", "Australia/Eucla"),
    ("Transbaikal Standard Time", "Asia/Chita"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("North Korea Standard Time", "Asia/Pyongyang"),
    ("Korea Standard Time", "Asia/Seoul"),
    ("Yakutsk Standard Time", "Asia/Yakutsk"),
    ("Cen. Australia Standard Time", "Australia/Adelaide"),
    ("AUS Central Standard Time", "Australia/Darwin"),
    ("E. Australia Standard Time", "Australia/Brisbane"),
    ("AUS Eastern Standard Time", "Australia/Sydney"),
    ("West Pacific Standard Time", "Pacific/Port_Moresby"),
    ("Tasmania Standard Time", "Australia/Hobart"),
    ("Vladivostok Standard Time", "Asia/Vladivostok"),
    ("Lord Howe Standard Time", "Australia/Lord_Howe"),
    ("Bougainville Standard Time", "Pacific/Bougainville"),
    ("Russia Time Zone 10", "Asia/Srednekolymsk"),
    ("Magadan Standard Time", "Asia/Magadan"),
    ("Norfolk Standard Time", "Pacific/Norfolk"),
    ("Sakhalin Standard Time", "Asia/Sakhalin"),
    ("Central Pacific Standard Time", "Pacific/Guadalcanal"),
    ("Russia Time Zone 11", "Asia/Kamchatka"),
    ("New Zealand Standard Time", "Pacific/Auckland"),
    ("UTC+12", "Etc/GMT-12"),
    ("Fiji Standard Time", "Pacific/Fiji"),
    ("Chatham Islands Standard Time", "Pacific/Chatham"),
    ("UTC+13", "Etc/GMT-13"),
    ("Tonga Standard Time", "Pacific/Tongatapu"),
    ("Samoa Standard Time", "Pacific/Apia"),
    ("Line Islands Standard Time", "Pacific/Kiritimati"),
];

/// IANA zone for a TZID that is either an IANA or a Windows name.
pub fn named_zone(tzid: &str) -> Option<Tz> {
    let tzid = tzid.trim();
    if let Ok(tz) = tzid.parse::<Tz>() {
        return Some(tz);
    }
    WINDOWS_ZONES
        .iter()
        .find(|(windows, _)| windows.eq_ignore_ascii_case(tzid))
        .and_then(|(_, iana)| iana.parse::<Tz>().ok())
}

/// The zones a calendar defines for itself with VTIMEZONE blocks.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    defined: Vec<(String, DefinedZone)>,
}

impl ZoneTable {
    pub fn from_vtimezones(zones: &[IcalTimeZone]) -> Self {
        let defined = zones
            .iter()
            .filter_map(|zone| {
                let tzid = value_of(&zone.properties, "TZID")?.trim().to_string();
                let transitions: Vec<_> =
                    zone.transitions.iter().filter_map(Transition::parse).collect();
                (!transitions.is_empty()).then_some((tzid, DefinedZone { transitions }))
            })
            .collect();
        Self { defined }
    }

    /// A wall-clock time pinned to the zone named by `tzid`, or `None`
    /// when the name can't be resolved.
    pub fn resolve(&self, tzid: &str, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        if let Some(tz) = named_zone(tzid) {
            return tz
                .from_local_datetime(&local)
                .earliest()
                .map(|zoned| zoned.fixed_offset());
        }

        let tzid = tzid.trim();
        let (_, zone) = self.defined.iter().find(|(id, _)| id == tzid)?;
        let offset = zone.offset_at(local)?;
        offset.from_local_datetime(&local).single()
    }
}

#[derive(Debug, Clone)]
struct DefinedZone {
    transitions: Vec<Transition>,
}

impl DefinedZone {
    /// Offset of the last transition that took effect at or before
    /// `local`. Times before every onset use the offset the earliest
    /// transition moves away from.
    fn offset_at(&self, local: NaiveDateTime) -> Option<FixedOffset> {
        let latest = self
            .transitions
            .iter()
            .filter_map(|t| t.onset_before(local).map(|onset| (onset, t.offset_to)))
            .max_by_key(|(onset, _)| *onset);
        if let Some((_, offset)) = latest {
            return Some(offset);
        }
        self.transitions
            .iter()
            .min_by_key(|t| t.start)
            .map(|t| t.offset_from)
    }
}

#[derive(Debug, Clone)]
struct Transition {
    start: NaiveDateTime,
    offset_from: FixedOffset,
    offset_to: FixedOffset,
    rule: Option<YearlyRule>,
}

impl Transition {
    fn parse(transition: &IcalTimeZoneTransition) -> Option<Self> {
        let props = &transition.properties;
        let start = NaiveDateTime::parse_from_str(
            value_of(props, "DTSTART")?.trim(),
            LOCAL_FORMAT,
        )
        .ok()?;
        let offset_to = parse_offset(value_of(props, "TZOFFSETTO")?)?;
        let offset_from = value_of(props, "TZOFFSETFROM")
            .and_then(parse_offset)
            .unwrap_or(offset_to);
        let rule = value_of(props, "RRULE").and_then(YearlyRule::parse);
        Some(Self {
            start,
            offset_from,
            offset_to,
            rule,
        })
    }

    /// Most recent onset of this transition at or before `local`.
    fn onset_before(&self, local: NaiveDateTime) -> Option<NaiveDateTime> {
        if local < self.start {
            return None;
        }
        let Some(rule) = &self.rule else {
            return Some(self.start);
        };
        let onset = [local.year(), local.year() - 1]
            .into_iter()
            .filter_map(|year| rule.date_in(year))
            .map(|date| date.and_time(self.start.time()))
            .find(|onset| *onset <= local && *onset >= self.start);
        Some(onset.unwrap_or(self.start))
    }
}

/// The `FREQ=YEARLY;BYMONTH=m;BYDAY=nDD` shape every VTIMEZONE
/// transition rule takes in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearlyRule {
    month: u32,
    weekday: Weekday,
    /// 1-based from the start of the month, negative from its end
    nth: i32,
}

impl YearlyRule {
    fn parse(value: &str) -> Option<Self> {
        let mut yearly = false;
        let mut month = None;
        let mut by_day = None;
        for part in value.split(';') {
            let Some((key, val)) = part.split_once('=') else {
                continue;
            };
            match key.trim().to_uppercase().as_str() {
                "FREQ" => yearly = val.trim().eq_ignore_ascii_case("YEARLY"),
                "BYMONTH" => month = val.trim().parse::<u32>().ok(),
                "BYDAY" => by_day = Some(val.trim().to_uppercase()),
                _ => {}
            }
        }
        if !yearly {
            return None;
        }

        let by_day = by_day?;
        let (nth, code) = by_day.split_at_checked(by_day.len().checked_sub(2)?)?;
        let nth = if nth.is_empty() { 1 } else { nth.parse::<i32>().ok()? };
        Some(Self {
            month: month?,
            weekday: weekday_from_code(code)?,
            nth,
        })
    }

    fn date_in(&self, year: i32) -> Option<NaiveDate> {
        nth_weekday(year, self.month, self.weekday, self.nth)
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, nth: i32) -> Option<NaiveDate> {
    if nth > 0 {
        return NaiveDate::from_weekday_of_month_opt(year, month, weekday, u8::try_from(nth).ok()?);
    }
    if nth == 0 {
        return None;
    }

    let last = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    let weeks_back = u64::try_from(-nth - 1).ok()?;
    let date = last.checked_sub_days(Days::new(u64::from(back) + 7 * weeks_back))?;
    (date.month() == month).then_some(date)
}

fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

/// UTC offset in `+HHMM` or `+HHMMSS` form.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    let (sign, digits) = match value.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    if !(digits.len() == 4 || digits.len() == 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[0..2].parse().ok()?;
    let minutes: i32 = digits[2..4].parse().ok()?;
    let seconds: i32 = match digits.get(4..6) {
        Some(secs) => secs.parse().ok()?,
        None => 0,
    };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds))
}

fn value_of<'a>(properties: &'a [Property], name: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .and_then(|p| p.value.as_deref())
}
