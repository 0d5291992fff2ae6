//! Weekly opening schedules and the open/closed decision.
//!
//! Schedules are stored as a map from weekday name to an `HH:MM` window.
//! Day names are accepted in Spanish (`lunes` … `domingo`, accents optional)
//! or English (`monday`/`mon` …); window fields are `opensAt`/`closesAt`
//! with `abre`/`cierra` accepted as aliases.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Minutes since local midnight, `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// # Errors
    ///
    /// Returns a message when `hour:minute` is not a valid 24h time
    /// (`24:00` is accepted as end of day).
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, String> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(format!("invalid time {hour:02}:{minute:02}"));
        }
        Ok(Self(hour * 60 + minute))
    }

    #[must_use]
    pub fn minutes(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn of(now: NaiveDateTime) -> Self {
        // hour() < 24 and minute() < 60, so the sum always fits.
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (now.hour() * 60 + now.minute()) as u16;
        Self(minutes)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
        let hour = h
            .parse::<u16>()
            .map_err(|_| format!("invalid hour in '{s}'"))?;
        let minute = m
            .parse::<u16>()
            .map_err(|_| format!("invalid minute in '{s}'"))?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        format!("{:02}:{:02}", value.0 / 60, value.0 % 60)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(rename = "opensAt", alias = "abre", alias = "opens_at")]
    pub opens_at: ClockTime,
    #[serde(rename = "closesAt", alias = "cierra", alias = "closes_at")]
    pub closes_at: ClockTime,
}

impl OpeningHours {
    /// Whether `time` falls in this window, bounds inclusive.
    ///
    /// A window whose close precedes its open runs past midnight.
    #[must_use]
    pub fn contains(&self, time: ClockTime) -> bool {
        if self.closes_at < self.opens_at {
            time >= self.opens_at || time <= self.closes_at
        } else {
            self.opens_at <= time && time <= self.closes_at
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, OpeningHours>",
    into = "BTreeMap<String, OpeningHours>"
)]
pub struct WeeklySchedule {
    days: HashMap<Weekday, OpeningHours>,
}

impl WeeklySchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_day(mut self, day: Weekday, hours: OpeningHours) -> Self {
        self.days.insert(day, hours);
        self
    }

    #[must_use]
    pub fn get(&self, day: Weekday) -> Option<&OpeningHours> {
        self.days.get(&day)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl TryFrom<HashMap<String, OpeningHours>> for WeeklySchedule {
    type Error = String;

    fn try_from(raw: HashMap<String, OpeningHours>) -> Result<Self, Self::Error> {
        let mut days = HashMap::with_capacity(raw.len());
        for (key, hours) in raw {
            let day = parse_weekday(&key).ok_or_else(|| format!("unknown weekday '{key}'"))?;
            days.insert(day, hours);
        }
        Ok(Self { days })
    }
}

impl From<WeeklySchedule> for BTreeMap<String, OpeningHours> {
    fn from(schedule: WeeklySchedule) -> Self {
        schedule
            .days
            .into_iter()
            .map(|(day, hours)| (weekday_key(day).to_string(), hours))
            .collect()
    }
}

/// Parse a Spanish or English weekday name.
#[must_use]
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    match raw.trim().to_lowercase().as_str() {
        "lunes" | "monday" | "mon" => Some(Weekday::Mon),
        "martes" | "tuesday" | "tue" => Some(Weekday::Tue),
        "miercoles" | "miércoles" | "wednesday" | "wed" => Some(Weekday::Wed),
        "jueves" | "thursday" | "thu" => Some(Weekday::Thu),
        "viernes" | "friday" | "fri" => Some(Weekday::Fri),
        "sabado" | "sábado" | "saturday" | "sat" => Some(Weekday::Sat),
        "domingo" | "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Open/closed from today's entry. No entry for today means closed.
#[must_use]
pub fn is_open_now(schedule: &WeeklySchedule, now: NaiveDateTime) -> bool {
    schedule
        .get(now.weekday())
        .is_some_and(|hours| hours.contains(ClockTime::of(now)))
}

/// Open state used by partner listings: a business with no schedule at all
/// is assumed open, otherwise [`is_open_now`] decides.
#[must_use]
pub fn is_open_or_unscheduled(schedule: Option<&WeeklySchedule>, now: NaiveDateTime) -> bool {
    schedule.is_none_or(|s| is_open_now(s, now))
}
