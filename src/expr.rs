use crate::{
    conv::{self, Granularity, Token},
    instant::{Instant, Timestamp},
    pattern,
    timezone::Timezone,
    DateExprError, Result,
};
use chrono::{DateTime, FixedOffset};
use std::{fmt::Display, str::FromStr};

/// Represents a date expression: a percent-escaped template paired with a
/// timezone.
///
/// Immutable once constructed; all derived state (token list, formatting
/// pattern, granularity) is computed up front, so instances are cheap to
/// share between threads.
///
/// For template syntax and usage examples, please refer to the
/// [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct DateExpr {
    template: String,
    timezone: Timezone,
    tokens: Vec<Token>,
    pattern: String,
    granularity: Option<Granularity>,
}

impl DateExpr {
    /// Constructs an expression rendered and parsed in UTC.
    ///
    /// Construction is total: any string is a valid template, and text that
    /// doesn't form a recognized specifier is treated as inert literal text.
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_timezone(template, Timezone::Utc)
    }

    /// Constructs an expression rendered and parsed in the given timezone.
    pub fn with_timezone(template: impl Into<String>, timezone: Timezone) -> Self {
        let template = template.into();
        let tokens = conv::tokenize(&template);
        let pattern = pattern::translate(&tokens);
        let granularity = pattern::granularity(&tokens);

        Self {
            template,
            timezone,
            tokens,
            pattern,
            granularity,
        }
    }

    /// Renders the template for the provided instant, in the expression's
    /// timezone.
    ///
    /// Accepts any instant shape ([`i64`] epoch seconds, [`Timestamp`] or a
    /// chrono `DateTime`); sub-second input is floored to the whole second.
    ///
    /// Returns [`DateExprError::OutOfRangeInstant`] only when the epoch value
    /// falls outside the representable date/time range.
    pub fn format(&self, instant: impl Into<Instant>) -> Result<String> {
        let seconds = instant.into().as_seconds();
        let utc = DateTime::from_timestamp(seconds, 0).ok_or(DateExprError::OutOfRangeInstant(seconds))?;

        Ok(match &self.timezone {
            Timezone::Utc => utc.format(&self.pattern).to_string(),
            Timezone::Fixed(offset) => utc.with_timezone(offset).format(&self.pattern).to_string(),
            Timezone::Named(tz) => utc.with_timezone(tz).format(&self.pattern).to_string(),
        })
    }

    /// Parses previously rendered text back into epoch seconds.
    ///
    /// Lossy by design: fields finer than the template's finest granularity
    /// default to the epoch origin, so `format(parse(format(x))?)? ==
    /// format(x)?` always holds while `parse(format(x)?)? == x` holds only
    /// when `x` sits exactly on a granularity boundary.
    ///
    /// Returns [`DateExprError::UnparseableInput`] if `input` doesn't match
    /// the template.
    pub fn parse(&self, input: &str) -> Result<Timestamp> {
        let fields = pattern::parse_fields(&self.tokens, input)?;
        fields.resolve(&self.timezone, input).map(Timestamp)
    }

    /// Returns `true` if the template contains a timezone specifier (`%z`).
    pub fn has_timezone(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Spec(spec) if spec.timezone))
    }

    /// The expression's timezone (UTC unless specified at construction).
    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// The raw template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Finest granularity among the template's specifiers, or `None` when
    /// the template has no granularity-bearing specifier.
    pub fn granularity(&self) -> Option<Granularity> {
        self.granularity
    }
}

/// Extracts the timezone offset literally encoded in rendered text.
///
/// Stateless: builds the matcher from `template` alone and never normalizes
/// the offset away, so the result is exactly what the text carries.
///
/// Returns [`DateExprError::NoTimezoneInTemplate`] if `template` has no `%z`
/// specifier (precondition check, made before any parse attempt), or
/// [`DateExprError::UnparseableInput`] if `formatted` doesn't match.
pub fn extract_timezone(template: &str, formatted: &str) -> Result<FixedOffset> {
    let tokens = conv::tokenize(template);
    if !tokens
        .iter()
        .any(|token| matches!(token, Token::Spec(spec) if spec.timezone))
    {
        return Err(DateExprError::NoTimezoneInTemplate(template.to_owned()));
    }

    let fields = pattern::parse_fields(&tokens, formatted)?;
    fields
        .offset_seconds
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| DateExprError::UnparseableInput(formatted.to_owned()))
}

impl From<DateExpr> for String {
    fn from(value: DateExpr) -> Self {
        value.to_string()
    }
}

impl From<&DateExpr> for String {
    fn from(value: &DateExpr) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for DateExpr {
    type Error = DateExprError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_str(&value)
    }
}

impl TryFrom<&String> for DateExpr {
    type Error = DateExprError;

    fn try_from(value: &String) -> Result<Self> {
        Self::from_str(value)
    }
}

impl TryFrom<&str> for DateExpr {
    type Error = DateExprError;

    fn try_from(value: &str) -> Result<Self> {
        Self::from_str(value)
    }
}

impl FromStr for DateExpr {
    type Err = DateExprError;

    fn from_str(s: &str) -> Result<Self> {
        // An expression with a non-UTC timezone serializes with a leading
        // `TZ=<zone> ` chunk; only the first space splits it off.
        if let Some((tz_spec, template)) = s.strip_prefix("TZ=").and_then(|rest| rest.split_once(' ')) {
            return Ok(Self::with_timezone(template, tz_spec.parse()?));
        }

        Ok(Self::new(s))
    }
}

impl Display for DateExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.timezone {
            Timezone::Utc => write!(f, "{}", self.template),
            timezone => write!(f, "TZ={timezone} {}", self.template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s3://bucket/foo/%Y/%m/%d/bar/%H.%M/file-A", "s3://bucket/foo/2014/08/13/bar/17.10/file-A")]
    #[case("%Y-%m-%dT%H:%M:%S", "2014-08-13T17:10:42")]
    #[case("%h %p", "05 PM")]
    #[case("only literal text", "only literal text")]
    #[case("100% escaped", "100% escaped")]
    #[case("", "")]
    fn format_in_utc(#[case] template: &str, #[case] expected: &str) {
        let expr = DateExpr::new(template);
        assert_eq!(expr.format(1407949842).unwrap(), expected);
    }

    #[test]
    fn format_honors_named_timezone() {
        let timezone = Timezone::Named(chrono_tz::America::Los_Angeles);
        let expr = DateExpr::with_timezone("%Y-%m-%dT%H:%M:%S", timezone);
        assert_eq!(expr.format(1407949842).unwrap(), "2014-08-13T10:10:42");
    }

    #[test]
    fn format_honors_fixed_offset() {
        let timezone: Timezone = "-0801".parse().unwrap();
        let expr = DateExpr::with_timezone("%H.%M%z", timezone);
        assert_eq!(expr.format(1407949842).unwrap(), "09.09-0801");
    }

    #[test]
    fn format_rejects_out_of_range_instant() {
        let expr = DateExpr::new("%Y");
        assert_eq!(expr.format(i64::MAX), Err(DateExprError::OutOfRangeInstant(i64::MAX)));
    }

    #[rstest]
    #[case("%Y/%m/%d", 1407949842, 1407888000)] // floors to 2014-08-13T00:00:00Z
    #[case("%Y-%m", 1407949842, 1406851200)] // floors to 2014-08-01T00:00:00Z
    #[case("%Y", 1407949842, 1388534400)] // floors to 2014-01-01T00:00:00Z
    #[case("%Y-%m-%dT%H:%M:%S", 1407949842, 1407949842)] // second-aligned, lossless
    fn parse_of_format_floors_to_granularity(
        #[case] template: &str,
        #[case] instant: i64,
        #[case] expected: i64,
    ) {
        let expr = DateExpr::new(template);
        let rendered = expr.format(instant).unwrap();
        assert_eq!(expr.parse(&rendered).unwrap().seconds(), expected);
    }

    #[rstest]
    #[case("%Y/%m/%d")]
    #[case("%Y-%m")]
    #[case("%H.%M")]
    #[case("%Y-%m-%d %p")]
    fn render_parse_render_is_stable(#[case] template: &str) {
        let expr = DateExpr::new(template);
        let rendered = expr.format(1407949842).unwrap();
        let reparsed = expr.parse(&rendered).unwrap();
        assert_eq!(expr.format(reparsed).unwrap(), rendered);
    }

    #[test]
    fn parse_round_trips_in_named_timezone() {
        let timezone = Timezone::Named(chrono_tz::America::Los_Angeles);
        let expr = DateExpr::with_timezone("%Y-%m-%dT%H:%M:%S", timezone);
        let rendered = expr.format(1407949842).unwrap();
        assert_eq!(expr.parse(&rendered).unwrap().seconds(), 1407949842);
    }

    #[rstest]
    #[case("%H.%M%z", true)]
    #[case("%z", true)]
    #[case("%Y-%m-%d", false)]
    #[case("literal", false)]
    fn timezone_membership(#[case] template: &str, #[case] expected: bool) {
        assert_eq!(DateExpr::new(template).has_timezone(), expected);
    }

    #[test]
    fn extract_timezone_returns_encoded_offset() {
        let timezone: Timezone = "-0801".parse().unwrap();
        let expr = DateExpr::with_timezone("%H.%M%z", timezone);
        let rendered = expr.format(1407949842).unwrap();

        let offset = extract_timezone("%H.%M%z", &rendered).unwrap();
        assert_eq!(offset, FixedOffset::west_opt(8 * 3600 + 60).unwrap());
        assert_eq!(offset.to_string(), "-08:01");
    }

    #[test]
    fn extract_timezone_requires_timezone_specifier() {
        assert_eq!(
            extract_timezone("%Y-%m-%d", "2014-08-13"),
            Err(DateExprError::NoTimezoneInTemplate("%Y-%m-%d".to_owned()))
        );
    }

    #[test]
    fn extract_timezone_rejects_mismatched_input() {
        assert_eq!(
            extract_timezone("%H%z", "09+08"),
            Err(DateExprError::UnparseableInput("09+08".to_owned()))
        );
    }

    #[rstest]
    #[case("s3://bucket/foo/%Y", "s3://bucket/foo/%Y")]
    #[case("TZ=America/Los_Angeles %Y/%m/%d", "TZ=America/Los_Angeles %Y/%m/%d")]
    #[case("TZ=-0800 %H with spaces %M", "TZ=-0800 %H with spaces %M")]
    #[case("TZ=UTC %Y", "%Y")]
    fn display_and_from_str(#[case] input: &str, #[case] expected: &str) {
        let expr: DateExpr = input.parse().unwrap();
        assert_eq!(expr.to_string(), expected);
        assert_eq!(expected.parse::<DateExpr>().unwrap(), expr);
    }

    #[test]
    fn from_str_rejects_invalid_timezone_prefix() {
        assert_eq!(
            "TZ=Atlantis/Central %Y".parse::<DateExpr>(),
            Err(DateExprError::InvalidTimezone("Atlantis/Central".to_owned()))
        );
    }

    #[test]
    fn try_from_string_shapes() {
        let expr = DateExpr::new("%Y-%m");
        assert_eq!(DateExpr::try_from("%Y-%m").unwrap(), expr);
        assert_eq!(DateExpr::try_from(&String::from("%Y-%m")).unwrap(), expr);
        assert_eq!(DateExpr::try_from(String::from("%Y-%m")).unwrap(), expr);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let timezone = Timezone::Named(chrono_tz::America::Los_Angeles);
        let expr = DateExpr::with_timezone("s3://bucket/%Y/%m", timezone);

        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, "\"TZ=America/Los_Angeles s3://bucket/%Y/%m\"");
        assert_eq!(serde_json::from_str::<DateExpr>(&json).unwrap(), expr);
    }
}
