use crate::{
    conv::Granularity,
    expr::DateExpr,
    instant::{Instant, Timestamp},
    timezone::Timezone,
    DateExprError, Result,
};
use chrono::{DateTime, Days, Months, TimeDelta, TimeZone, Utc};

/// Concrete step period of a series, derived from a granularity.
///
/// Calendar-shaped steps (months, days) are applied in the expression's
/// timezone so day boundaries survive DST transitions; fixed steps are
/// absolute seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Whole calendar months.
    Months(u32),
    /// Whole calendar days.
    Days(u64),
    /// Fixed number of seconds.
    Seconds(i64),
}

impl Step {
    /// Step period for the given granularity.
    pub fn of(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Year => Self::Months(12),
            Granularity::Month => Self::Months(1),
            Granularity::Day => Self::Days(1),
            Granularity::Meridian => Self::Seconds(12 * 3600),
            Granularity::Hour => Self::Seconds(3600),
            Granularity::Minute => Self::Seconds(60),
            Granularity::Second => Self::Seconds(1),
        }
    }

    /// Advances `from` by one step within the given timezone.
    ///
    /// Returns `None` on arithmetic overflow or when the stepped local time
    /// doesn't exist in the timezone.
    fn advance(self, from: DateTime<Utc>, timezone: &Timezone) -> Option<DateTime<Utc>> {
        match timezone {
            Timezone::Utc => self.advance_in(from),
            Timezone::Fixed(offset) => self
                .advance_in(from.with_timezone(offset))
                .map(|t| t.with_timezone(&Utc)),
            Timezone::Named(tz) => self.advance_in(from.with_timezone(tz)).map(|t| t.with_timezone(&Utc)),
        }
    }

    fn advance_in<Tz: TimeZone>(self, from: DateTime<Tz>) -> Option<DateTime<Tz>> {
        match self {
            Self::Months(months) => from.checked_add_months(Months::new(months)),
            Self::Days(days) => from.checked_add_days(Days::new(days)),
            Self::Seconds(seconds) => from.checked_add_signed(TimeDelta::seconds(seconds)),
        }
    }
}

/// Series boundary: either an instant in any accepted shape, or text
/// previously rendered by the expression the series is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesBound {
    /// Absolute instant.
    Instant(Instant),
    /// Previously rendered text, parsed with the expression's template.
    Rendered(String),
}

impl From<Instant> for SeriesBound {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<i64> for SeriesBound {
    fn from(value: i64) -> Self {
        Self::Instant(value.into())
    }
}

impl From<Timestamp> for SeriesBound {
    fn from(value: Timestamp) -> Self {
        Self::Instant(value.into())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for SeriesBound {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Instant(value.into())
    }
}

impl From<&str> for SeriesBound {
    fn from(value: &str) -> Self {
        Self::Rendered(value.to_owned())
    }
}

impl From<String> for SeriesBound {
    fn from(value: String) -> Self {
        Self::Rendered(value)
    }
}

/// Iterator over rendered strings, one per step between two bounds.
///
/// Restartable via `Clone`; exhausted once the next instant would pass the
/// end bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateSeries {
    expr: DateExpr,
    step: Step,
    end: DateTime<Utc>,
    next: Option<DateTime<Utc>>,
}

impl Iterator for DateSeries {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current > self.end {
            return None;
        }

        self.next = self.step.advance(current, &self.expr.timezone());
        // `current` came from a representable instant, so rendering can't
        // fall out of range here.
        self.expr.format(current).ok()
    }
}

impl DateExpr {
    /// Returns the series of rendered strings for instants spaced at the
    /// template's granularity, from `start` to `end` inclusive.
    ///
    /// Each bound is either an instant (epoch seconds, [`Timestamp`] or a
    /// chrono `DateTime`) or a previously rendered string, which is parsed
    /// with this expression first; both shapes may be mixed freely. Bounds
    /// are floored to whole seconds before stepping. Bound timezones don't
    /// matter: instants are absolute, and every element is rendered in this
    /// expression's timezone.
    ///
    /// An empty series (no error) results when `start > end`.
    ///
    /// Returns [`DateExprError::NoGranularity`] if the template has no
    /// granularity-bearing specifier, or [`DateExprError::UnparseableInput`]
    /// if a rendered-string bound doesn't match the template.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use date_expr::{DateExpr, Result};
    ///
    /// fn series() -> Result<()> {
    ///     let expr = DateExpr::new("s3://bucket/foo/%Y");
    ///
    ///     // 2012-08-13T17:10:42Z .. 2014-08-13T17:10:42Z, yearly steps
    ///     let keys: Vec<String> = expr.series(1344877842, 1407949842)?.collect();
    ///     assert_eq!(
    ///         keys,
    ///         ["s3://bucket/foo/2012", "s3://bucket/foo/2013", "s3://bucket/foo/2014"]
    ///     );
    ///
    ///     Ok(())
    /// }
    /// # series().unwrap();
    /// ```
    pub fn series(
        &self,
        start: impl Into<SeriesBound>,
        end: impl Into<SeriesBound>,
    ) -> Result<DateSeries> {
        let granularity = self
            .granularity()
            .ok_or_else(|| DateExprError::NoGranularity(self.template().to_owned()))?;

        let start = self.bound_seconds(start.into())?;
        let end = self.bound_seconds(end.into())?;

        Ok(DateSeries {
            expr: self.clone(),
            step: Step::of(granularity),
            end: DateTime::from_timestamp(end, 0).ok_or(DateExprError::OutOfRangeInstant(end))?,
            next: Some(DateTime::from_timestamp(start, 0).ok_or(DateExprError::OutOfRangeInstant(start))?),
        })
    }

    /// Normalizes a bound to whole epoch seconds.
    fn bound_seconds(&self, bound: SeriesBound) -> Result<i64> {
        match bound {
            SeriesBound::Instant(instant) => Ok(instant.as_seconds()),
            SeriesBound::Rendered(text) => self.parse(&text).map(Timestamp::seconds),
        }
    }
}
