use chrono::{DateTime, TimeZone, Utc};

/// Thin wrapper around integer seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Seconds since the Unix epoch.
    #[inline]
    pub fn seconds(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for i64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

/// Point in time in any of the accepted input shapes.
///
/// The engine works on whole seconds: normalization floors any sub-second
/// part toward the earlier second, so the precision floor is one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instant {
    /// Raw seconds since the Unix epoch.
    Seconds(i64),
    /// Wrapped seconds since the Unix epoch.
    Timestamp(Timestamp),
    /// Calendar date/time, normalized to UTC.
    DateTime(DateTime<Utc>),
}

impl Instant {
    /// Normalizes to whole seconds since the Unix epoch.
    pub fn as_seconds(self) -> i64 {
        match self {
            Self::Seconds(seconds) => seconds,
            Self::Timestamp(timestamp) => timestamp.0,
            Self::DateTime(datetime) => datetime.timestamp(),
        }
    }
}

impl From<i64> for Instant {
    fn from(value: i64) -> Self {
        Self::Seconds(value)
    }
}

impl From<Timestamp> for Instant {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn normalization_commutes_across_shapes() {
        let datetime = DateTime::from_timestamp(1407949842, 0).unwrap();

        assert_eq!(Instant::from(1407949842).as_seconds(), 1407949842);
        assert_eq!(Instant::from(Timestamp(1407949842)).as_seconds(), 1407949842);
        assert_eq!(Instant::from(datetime).as_seconds(), 1407949842);
    }

    #[test]
    fn normalization_is_idempotent() {
        let seconds = Instant::from(Timestamp(1407949842)).as_seconds();
        assert_eq!(Instant::from(seconds).as_seconds(), seconds);
    }

    #[test]
    fn sub_second_input_floors_to_earlier_second() {
        let datetime = DateTime::from_timestamp(1407949842, 999_999_999).unwrap();
        assert_eq!(Instant::from(datetime).as_seconds(), 1407949842);
    }

    #[test]
    fn non_utc_datetime_normalizes_to_the_same_instant() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let local = DateTime::from_timestamp(1407949842, 0).unwrap().with_timezone(&offset);
        assert_eq!(Instant::from(local).as_seconds(), 1407949842);
    }

    #[test]
    fn timestamp_wrapping_round_trips() {
        assert_eq!(i64::from(Timestamp::from(42)), 42);
        assert_eq!(Timestamp(1407949842).seconds(), 1407949842);
    }
}
