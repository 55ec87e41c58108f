//! Complication text lines
//!
//! Each of the two text lines shows one complication: a piece of the
//! current time or date, or one of today's activity totals.

use core::fmt;
use core::ops::Deref;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::peripherals::activity::ActivitySnapshot;
use crate::system::time::ClockStyle;

/// Maximum length of a complication line
pub const MAX_LEN: usize = 15;

/// Scratch space for formatting before the text is cut to [`MAX_LEN`]
const BUF_LEN: usize = 32;

/// Shown when a complication code names nothing
pub const ERROR_TEXT: &str = "error";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// What a text line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Complication {
    DigitalTime,
    Month,
    Date,
    Weekday,
    MonthDate,
    DateMonth,
    WeekdayDate,
    Steps,
    Meters,
    Feet,
    Calories,
}

impl Complication {
    /// All complications, in code order
    pub const ALL: [Complication; 11] = [
        Complication::DigitalTime,
        Complication::Month,
        Complication::Date,
        Complication::Weekday,
        Complication::MonthDate,
        Complication::DateMonth,
        Complication::WeekdayDate,
        Complication::Steps,
        Complication::Meters,
        Complication::Feet,
        Complication::Calories,
    ];

    /// Stable numeric code used for persistence
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Token used in configuration messages
    pub const fn token(self) -> &'static str {
        match self {
            Complication::DigitalTime => "digitalTime",
            Complication::Month => "month",
            Complication::Date => "date",
            Complication::Weekday => "weekday",
            Complication::MonthDate => "monthDay",
            Complication::DateMonth => "dayMonth",
            Complication::WeekdayDate => "weekdayDate",
            Complication::Steps => "steps",
            Complication::Meters => "meters",
            Complication::Feet => "feet",
            Complication::Calories => "calories",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.token() == token)
    }
}

/// Text of a complication line, at most [`MAX_LEN`] bytes
///
/// Everything the formatter produces is ASCII, so that is also the
/// character limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplicationText(heapless::String<MAX_LEN>);

impl ComplicationText {
    /// Copy `text`, dropping whatever does not fit.
    ///
    /// Multi-byte characters are never split.
    pub fn truncated(text: &str) -> Self {
        let mut out = heapless::String::new();
        for c in text.chars() {
            if out.push(c).is_err() {
                break;
            }
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for ComplicationText {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ComplicationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ComplicationText {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Render a complication for the given time and activity totals
pub fn format(
    complication: Complication,
    now: &NaiveDateTime,
    activity: &ActivitySnapshot,
    style: ClockStyle,
) -> ComplicationText {
    let mut buf = [0u8; BUF_LEN];
    let date = now.date();
    let month = MONTHS[now.month0() as usize];
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];

    let text = match complication {
        Complication::DigitalTime => match style {
            ClockStyle::TwentyFourHour => format_no_std::show(
                &mut buf,
                format_args!("{:02}:{:02}", now.hour(), now.minute()),
            ),
            ClockStyle::TwelveHour => {
                let (_, hour) = now.hour12();
                format_no_std::show(&mut buf, format_args!("{}:{:02}", hour, now.minute()))
            }
        },
        Complication::Month => Ok(month),
        Complication::Date => format_no_std::show(&mut buf, format_args!("{}", now.day())),
        Complication::Weekday => Ok(weekday),
        Complication::MonthDate => {
            format_no_std::show(&mut buf, format_args!("{:02}/{}", now.month(), now.day()))
        }
        Complication::DateMonth => {
            format_no_std::show(&mut buf, format_args!("{}/{:02}", now.day(), now.month()))
        }
        Complication::WeekdayDate => {
            format_no_std::show(&mut buf, format_args!("{}, {}", weekday, now.day()))
        }
        Complication::Steps => format_no_std::show(&mut buf, format_args!("{}", activity.steps)),
        Complication::Meters => format_no_std::show(&mut buf, format_args!("{}", activity.meters)),
        Complication::Feet => format_no_std::show(&mut buf, format_args!("{}", activity.feet())),
        Complication::Calories => {
            format_no_std::show(&mut buf, format_args!("{}", activity.calories))
        }
    };

    match text {
        Ok(text) => ComplicationText::truncated(text),
        Err(_) => {
            warn!("Complication {:?} overflowed its buffer", complication);
            ComplicationText::truncated(ERROR_TEXT)
        }
    }
}

/// Like [`format`], for a raw complication code that may not name a complication
pub fn format_code(
    code: u8,
    now: &NaiveDateTime,
    activity: &ActivitySnapshot,
    style: ClockStyle,
) -> ComplicationText {
    match Complication::from_code(code) {
        Some(complication) => format(complication, now, activity, style),
        None => ComplicationText::truncated(ERROR_TEXT),
    }
}
