//! Countdown arithmetic for exam events.
//!
//! Everything here is a pure function of two timestamps. The remaining time is
//! decomposed into days/hours/minutes/seconds with plain integer division (a
//! day is always 24 hours, no calendar rules apply) and rendered with at most
//! two units. Urgency is classified from the numeric components, never from
//! the rendered label.

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Coarse visual classification of the time left before an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Urgency {
    /// The target instant has been reached or passed.
    Expired,
    /// One or two whole days left.
    Critical,
    /// Less than a day, at least one hour left.
    Imminent,
    /// More than two days left, or less than an hour left.
    #[default]
    Normal,
}

/// Whole units left before the target instant. Only built for a positive
/// difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decompose a difference in milliseconds. Returns `None` once the
    /// difference is zero or negative. Sub-second leftovers are dropped.
    pub fn from_millis(difference: i64) -> Option<Self> {
        if difference <= 0 {
            return None;
        }
        Some(Self {
            days: difference / MS_PER_DAY,
            hours: (difference % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (difference % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (difference % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    pub fn urgency(&self) -> Urgency {
        if (1..=2).contains(&self.days) {
            Urgency::Critical
        } else if self.days == 0 && self.hours > 0 {
            Urgency::Imminent
        } else {
            Urgency::Normal
        }
    }
}

/// Wording used for countdown labels. Changes text only, never arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}

impl Locale {
    fn unit(self, n: i64, unit: Unit) -> String {
        match self {
            Locale::English => {
                let name = match unit {
                    Unit::Day => "day",
                    Unit::Hour => "hour",
                    Unit::Minute => "minute",
                    Unit::Second => "second",
                };
                format!("{n} {name}(s)")
            }
            Locale::Arabic => {
                let name = match unit {
                    Unit::Day => "يوم",
                    Unit::Hour => "ساعة",
                    Unit::Minute => "دقيقة",
                    Unit::Second => "ثانية",
                };
                format!("{n} {name}")
            }
        }
    }

    fn join(self, major: String, minor: String) -> String {
        match self {
            Locale::English => format!("{major} and {minor}"),
            Locale::Arabic => format!("{major} و {minor}"),
        }
    }

    pub fn expired_label(self) -> &'static str {
        match self {
            Locale::English => "time expired",
            Locale::Arabic => "انتهى الوقت",
        }
    }

    /// Shown before the first refresh has been published.
    pub fn pending_label(self) -> &'static str {
        match self {
            Locale::English => "calculating...",
            Locale::Arabic => "جاري الحساب...",
        }
    }

    pub fn parts_heading(self) -> &'static str {
        match self {
            Locale::English => "Required parts:",
            Locale::Arabic => "الأجزاء المطلوبة:",
        }
    }

    pub fn remaining_heading(self) -> &'static str {
        match self {
            Locale::English => "Time remaining:",
            Locale::Arabic => "الوقت المتبقي:",
        }
    }

    /// Render the two most significant non-zero units, first match wins.
    pub fn format_remaining(self, r: &Remaining) -> String {
        if r.days > 0 {
            self.join(self.unit(r.days, Unit::Day), self.unit(r.hours, Unit::Hour))
        } else if r.hours > 0 {
            self.join(self.unit(r.hours, Unit::Hour), self.unit(r.minutes, Unit::Minute))
        } else if r.minutes > 0 {
            self.join(
                self.unit(r.minutes, Unit::Minute),
                self.unit(r.seconds, Unit::Second),
            )
        } else {
            self.unit(r.seconds, Unit::Second)
        }
    }
}

/// Result of one countdown computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub label: String,
    pub urgency: Urgency,
    /// `None` once the target has passed.
    pub remaining: Option<Remaining>,
}

impl Countdown {
    pub fn is_expired(&self) -> bool {
        self.urgency == Urgency::Expired
    }
}

/// Countdown from `now` to `target` with English labels.
pub fn compute(target: Timestamp, now: Timestamp) -> Countdown {
    compute_with_locale(target, now, Locale::English)
}

pub fn compute_with_locale(target: Timestamp, now: Timestamp, locale: Locale) -> Countdown {
    match Remaining::from_millis(target.saturating_sub(now)) {
        Some(remaining) => Countdown {
            label: locale.format_remaining(&remaining),
            urgency: remaining.urgency(),
            remaining: Some(remaining),
        },
        None => Countdown {
            label: locale.expired_label().to_string(),
            urgency: Urgency::Expired,
            remaining: None,
        },
    }
}
