pub const SECONDS_PER_MINUTE: u32 = 60;
pub const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u32 = 24 * SECONDS_PER_HOUR;

/// Scheduled time of day in seconds since service-day midnight.
/// Values past 24h are legal for trips running after midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl Time {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    pub fn to_hms_string(&self) -> String {
        let h = self.0 / SECONDS_PER_HOUR;
        let m = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let s = self.0 % SECONDS_PER_MINUTE;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    /// Parses `H:M` or `H:M:S`. Hours may exceed 23, minutes and seconds may not
    /// exceed 59. Anything else yields `None`.
    pub fn from_hms(time: &str) -> Option<Self> {
        let mut split = time.trim().split(':');
        let hours = component(split.next()?, u32::MAX / SECONDS_PER_HOUR)?;
        let minutes = component(split.next()?, 59)?;
        let seconds = match split.next() {
            Some(value) => component(value, 59)?,
            None => 0,
        };
        if split.next().is_some() {
            return None;
        }
        hours
            .checked_mul(SECONDS_PER_HOUR)?
            .checked_add(minutes * SECONDS_PER_MINUTE + seconds)
            .map(Self)
    }

    /// Whole minutes from `self` until `next`, rounded to the nearest minute.
    /// A negative difference is taken to cross midnight and gets a day added.
    pub fn minutes_until(&self, next: Time) -> u32 {
        let mut seconds = i64::from(next.0) - i64::from(self.0);
        if seconds < 0 {
            seconds += i64::from(SECONDS_PER_DAY);
        }
        let seconds = seconds.max(0) as u32;
        round_minutes(seconds)
    }
}

/// Seconds to whole minutes, halves rounding up.
pub const fn round_minutes(seconds: u32) -> u32 {
    let round_up = seconds % SECONDS_PER_MINUTE >= SECONDS_PER_MINUTE / 2;
    seconds / SECONDS_PER_MINUTE + round_up as u32
}

fn component(value: &str, max: u32) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = value.parse().ok()?;
    (value <= max).then_some(value)
}

#[test]
fn parse_unparse_1() {
    let time = "00:00:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30:30";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_past_midnight() {
    let time = "25:10:00";
    let stime = Time::from_hms(time).unwrap();
    assert_eq!(stime.as_seconds(), 25 * 3600 + 600);
    assert_eq!(time, stime.to_hms_string())
}

#[test]
fn parse_without_seconds() {
    assert_eq!(Time::from_hms("8:05").unwrap().as_seconds(), 8 * 3600 + 300);
}

#[test]
fn invalid_time_letters() {
    assert!(Time::from_hms("00:00:0a").is_none())
}

#[test]
fn invalid_time_missing_minutes() {
    assert!(Time::from_hms("08").is_none())
}

#[test]
fn invalid_time_too_many_parts() {
    assert!(Time::from_hms("08:00:00:00").is_none())
}

#[test]
fn invalid_time_minutes_out_of_range() {
    assert!(Time::from_hms("08:60:00").is_none())
}

#[test]
fn invalid_time_signed() {
    assert!(Time::from_hms("+8:00:00").is_none())
}

#[test]
fn round_minutes_half_up() {
    assert_eq!(round_minutes(29), 0);
    assert_eq!(round_minutes(30), 1);
    assert_eq!(round_minutes(90), 2);
}

#[test]
fn round_minutes_at_upper_bound() {
    assert_eq!(round_minutes(u32::MAX), u32::MAX / 60);
    assert_eq!(round_minutes(4_294_967_250), 71_582_788);
}

#[test]
fn minutes_until_huge_hours() {
    let from = Time::from_hms("0:00").unwrap();
    let to = Time::from_hms("1193046:28:15").unwrap();
    assert_eq!(from.minutes_until(to), u32::MAX / 60);
}
