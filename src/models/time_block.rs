//! Weekly time blocks.
//!
//! A time block is one weekly recurring interval on a single day, e.g.
//! "Monday 08:00-10:00". Times are minutes since midnight and never cross
//! midnight.
//!
//! # Interval Semantics
//! Blocks are half-open `[start, end)`: a block ending at 10:00 does not
//! overlap one starting at 10:00.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Day of the week, serialized as a single-letter tag.
///
/// Tags follow the Spanish academic convention: `L M W J V S D`
/// (Lunes, Martes, Miércoles, Jueves, Viernes, Sábado, Domingo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "L")]
    Monday,
    #[serde(rename = "M")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "J")]
    Thursday,
    #[serde(rename = "V")]
    Friday,
    #[serde(rename = "S")]
    Saturday,
    #[serde(rename = "D")]
    Sunday,
}

impl Day {
    /// All seven days, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Days that count toward "free days" (Sunday excluded).
    pub const TEACHING_DAYS: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Single-letter tag.
    pub fn tag(self) -> &'static str {
        match self {
            Day::Monday => "L",
            Day::Tuesday => "M",
            Day::Wednesday => "W",
            Day::Thursday => "J",
            Day::Friday => "V",
            Day::Saturday => "S",
            Day::Sunday => "D",
        }
    }

    /// Full day name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        Day::ALL
            .into_iter()
            .find(|d| d.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimetableError::InvalidDay(s.to_string()))
    }
}

/// A wall-clock time of day with minute resolution, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    /// 23:59, the last representable minute.
    pub const LAST_MINUTE: ClockTime = ClockTime(MINUTES_PER_DAY - 1);

    /// Creates a time from minutes since midnight.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidTime`] if `minutes` is 24:00 or later.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimetableError::InvalidTime(format!(
                "{:02}:{:02}",
                minutes / 60,
                minutes % 60
            )));
        }
        Ok(Self(minutes))
    }

    /// Creates a time from hour and minute.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(TimetableError::InvalidTime(format!("{hour}:{minute:02}")));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Const constructor for literals known to be in range.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }
}

const MINUTES_PER_DAY: u16 = 24 * 60;

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    /// Parses `H:MM` or `HH:MM` (hour 0-23, minute 00-59).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimetableError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// One weekly recurring interval `[start, end)` on one day.
///
/// Invariant: `end > start`. Enforced at construction and deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeBlock")]
pub struct TimeBlock {
    day: Day,
    start: ClockTime,
    end: ClockTime,
}

#[derive(Deserialize)]
struct RawTimeBlock {
    day: Day,
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<RawTimeBlock> for TimeBlock {
    type Error = TimetableError;

    fn try_from(raw: RawTimeBlock) -> Result<Self> {
        TimeBlock::new(raw.day, raw.start, raw.end)
    }
}

impl TimeBlock {
    /// Creates a new block.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidBlock`] if `end <= start`.
    pub fn new(day: Day, start: ClockTime, end: ClockTime) -> Result<Self> {
        if end <= start {
            return Err(TimetableError::InvalidBlock {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { day, start, end })
    }

    /// Parses a block from `HH:MM` strings.
    ///
    /// ```
    /// use u_timetable::models::{Day, TimeBlock};
    ///
    /// let b = TimeBlock::parse(Day::Monday, "08:00", "10:00").unwrap();
    /// assert_eq!(b.duration_minutes(), 120);
    /// assert!(TimeBlock::parse(Day::Monday, "10:00", "08:00").is_err());
    /// ```
    pub fn parse(day: Day, start: &str, end: &str) -> Result<Self> {
        Self::new(day, start.parse()?, end.parse()?)
    }

    #[inline]
    pub fn day(&self) -> Day {
        self.day
    }

    #[inline]
    pub fn start(&self) -> ClockTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Length of the block in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two blocks overlap: same day and intersecting intervals.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && !(self.end <= other.start || other.end <= self.start)
    }

    /// Whether `other` lies entirely inside this block on the same day.
    pub fn contains(&self, other: &Self) -> bool {
        self.day == other.day && other.start >= self.start && other.end <= self.end
    }

    /// Whether a time of day falls inside `[start, end)`.
    #[inline]
    pub fn covers(&self, time: ClockTime) -> bool {
        time >= self.start && time < self.end
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(day: Day, start: &str, end: &str) -> TimeBlock {
        TimeBlock::parse(day, start, end).unwrap()
    }

    #[test]
    fn test_clock_time_parse() {
        assert_eq!("08:30".parse::<ClockTime>().unwrap().minutes(), 510);
        assert_eq!("8:30".parse::<ClockTime>().unwrap().minutes(), 510);
        assert_eq!("23:59".parse::<ClockTime>().unwrap(), ClockTime::LAST_MINUTE);
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("12:5".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("-1:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_time_display() {
        assert_eq!(ClockTime::from_minutes(65).unwrap().to_string(), "01:05");
        assert_eq!(ClockTime::MIDNIGHT.to_string(), "00:00");
        assert!(ClockTime::from_minutes(1440).is_err());
    }

    #[test]
    fn test_day_tags() {
        assert_eq!("W".parse::<Day>().unwrap(), Day::Wednesday);
        assert_eq!("j".parse::<Day>().unwrap(), Day::Thursday);
        assert!("X".parse::<Day>().is_err());
        assert_eq!(Day::Sunday.tag(), "D");
    }

    #[test]
    fn test_block_rejects_inverted_interval() {
        let err = TimeBlock::parse(Day::Monday, "10:00", "10:00").unwrap_err();
        assert!(matches!(err, TimetableError::InvalidBlock { .. }));
    }

    #[test]
    fn test_block_overlap() {
        let a = block(Day::Monday, "08:00", "10:00");
        let b = block(Day::Monday, "09:00", "11:00");
        let c = block(Day::Monday, "10:00", "12:00"); // touching
        let d = block(Day::Tuesday, "08:00", "10:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_block_contains() {
        let pref = block(Day::Friday, "07:00", "12:00");
        assert!(pref.contains(&block(Day::Friday, "07:00", "09:00")));
        assert!(pref.contains(&block(Day::Friday, "10:00", "12:00")));
        assert!(!pref.contains(&block(Day::Friday, "11:00", "13:00")));
        assert!(!pref.contains(&block(Day::Thursday, "08:00", "09:00")));
    }

    #[test]
    fn test_block_serde() {
        let b = block(Day::Wednesday, "14:00", "15:30");
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json, serde_json::json!({"day": "W", "start": "14:00", "end": "15:30"}));

        let back: TimeBlock = serde_json::from_value(json).unwrap();
        assert_eq!(back, b);

        let bad = serde_json::json!({"day": "W", "start": "15:30", "end": "14:00"});
        assert!(serde_json::from_value::<TimeBlock>(bad).is_err());
    }

    fn arb_block() -> impl Strategy<Value = TimeBlock> {
        (0usize..7, 0u16..1439, 1u16..240).prop_map(|(d, start, len)| {
            let end = (start + len).min(1439).max(start + 1);
            TimeBlock::new(
                Day::ALL[d],
                ClockTime::from_minutes(start).unwrap(),
                ClockTime::from_minutes(end).unwrap(),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_block(), b in arb_block()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_different_days_never_overlap(a in arb_block(), b in arb_block()) {
            if a.day() != b.day() {
                prop_assert!(!a.overlaps(&b));
            }
        }

        #[test]
        fn prop_block_overlaps_itself(a in arb_block()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
