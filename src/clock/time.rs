use chrono::{DateTime, Local, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Source of the current wall-clock time.
pub trait TimeSource: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Zone the clock displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockZone {
    /// The system's local timezone.
    Local,
    /// A named IANA timezone.
    Named(Tz),
}

impl ClockZone {
    /// Resolves an IANA identifier, falling back to local time.
    ///
    /// An unknown identifier is logged and treated like no identifier.
    pub fn resolve(identifier: Option<&str>) -> Self {
        let Some(identifier) = identifier else {
            return Self::Local;
        };

        match identifier.parse::<Tz>() {
            Ok(tz) => Self::Named(tz),
            Err(e) => {
                warn!(identifier, error = %e, "unknown timezone, showing local time");
                Self::Local
            }
        }
    }
}

/// The time currently shown by the hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayTime {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
    /// Millisecond within the second, 0-999.
    pub millisecond: u32,
}

impl DisplayTime {
    /// Creates a display time on a whole second.
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond: 0,
        }
    }

    /// `now` as seen in `zone`.
    pub fn at(now: DateTime<Utc>, zone: ClockZone) -> Self {
        match zone {
            ClockZone::Local => Self::from_timelike(&now.with_timezone(&Local)),
            ClockZone::Named(tz) => Self::from_timelike(&now.with_timezone(&tz)),
        }
    }

    fn from_timelike(time: &impl Timelike) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            // Leap seconds report nanoseconds past one billion.
            millisecond: (time.nanosecond() / 1_000_000).min(999),
        }
    }
}
