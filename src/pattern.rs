use crate::{
    conv::{ConversionSpec, Granularity, Token},
    timezone::Timezone,
    DateExprError, Result,
};
use chrono::{NaiveDate, TimeZone};

/// Translates a token list into a chrono strftime pattern.
///
/// Specifier tokens emit their registered fragment verbatim. Literal tokens
/// are quoted by escaping every `%` as `%%`, so arbitrary literal text is
/// never interpreted as a formatting directive. Empty literals emit nothing.
pub(crate) fn translate(tokens: &[Token]) -> String {
    let mut pattern = String::new();

    for token in tokens {
        match token {
            Token::Literal(text) => {
                for ch in text.chars() {
                    if ch == '%' {
                        pattern.push_str("%%");
                    } else {
                        pattern.push(ch);
                    }
                }
            }
            Token::Spec(spec) => pattern.push_str(spec.fragment),
        }
    }

    pattern
}

/// Finest granularity among the template's specifiers.
///
/// Timezone-flagged specifiers contribute no granularity; `None` means the
/// template has no granularity-bearing specifier at all.
pub(crate) fn granularity(tokens: &[Token]) -> Option<Granularity> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Spec(spec) => spec.granularity,
            Token::Literal(_) => None,
        })
        .max()
}

/// Calendar fields recovered from a formatted string.
///
/// Every field is optional: a template mentions only some of them, and the
/// rest default to the epoch origin (1970-01-01 00:00:00) on resolution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fields {
    pub(crate) year: Option<i32>,
    pub(crate) month: Option<u32>,
    pub(crate) day: Option<u32>,
    pub(crate) hour24: Option<u32>,
    pub(crate) hour12: Option<u32>,
    pub(crate) pm: Option<bool>,
    pub(crate) minute: Option<u32>,
    pub(crate) second: Option<u32>,
    pub(crate) offset_seconds: Option<i32>,
}

impl Fields {
    /// Resolves the recovered fields to whole seconds since the Unix epoch.
    ///
    /// A literally-encoded `%z` offset takes precedence over `timezone`.
    /// A parsed leap second (`%S` == 60) resolves to the first second of the
    /// next minute. Invalid calendar combinations (e.g. February 30th) are
    /// reported as [`DateExprError::UnparseableInput`] against `input`.
    pub(crate) fn resolve(&self, timezone: &Timezone, input: &str) -> Result<i64> {
        let unparseable = || DateExprError::UnparseableInput(input.to_owned());

        let hour = match (self.hour24, self.hour12) {
            (Some(hour), _) => hour,
            (None, Some(hour)) => hour % 12 + if self.pm == Some(true) { 12 } else { 0 },
            (None, None) => {
                if self.pm == Some(true) {
                    12
                } else {
                    0
                }
            }
        };

        let (second, leap) = match self.second {
            Some(60) => (59, true),
            Some(second) => (second, false),
            None => (0, false),
        };

        let naive = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(1970),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )
        .and_then(|date| date.and_hms_opt(hour, self.minute.unwrap_or(0), second))
        .ok_or_else(unparseable)?;

        let seconds = if let Some(offset) = self.offset_seconds {
            naive.and_utc().timestamp() - i64::from(offset)
        } else {
            match timezone {
                Timezone::Utc => naive.and_utc().timestamp(),
                Timezone::Fixed(offset) => offset
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(unparseable)?
                    .timestamp(),
                Timezone::Named(tz) => tz
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(unparseable)?
                    .timestamp(),
            }
        };

        Ok(seconds + if leap { 1 } else { 0 })
    }
}

/// Matches `input` against the token list and recovers calendar fields.
///
/// Literal tokens must match exactly, specifier tokens consume fixed-width
/// fields; any mismatch or trailing text fails with
/// [`DateExprError::UnparseableInput`].
pub(crate) fn parse_fields(tokens: &[Token], input: &str) -> Result<Fields> {
    let mut fields = Fields::default();
    let mut rest = input;

    for token in tokens {
        match token {
            Token::Literal(text) => {
                rest = rest
                    .strip_prefix(text.as_str())
                    .ok_or_else(|| DateExprError::UnparseableInput(input.to_owned()))?;
            }
            Token::Spec(spec) => rest = consume_spec(spec, rest, &mut fields, input)?,
        }
    }

    if !rest.is_empty() {
        return Err(DateExprError::UnparseableInput(input.to_owned()));
    }

    Ok(fields)
}

/// Consumes one specifier's worth of text and records the field value.
fn consume_spec<'a>(
    spec: &ConversionSpec,
    rest: &'a str,
    fields: &mut Fields,
    input: &str,
) -> Result<&'a str> {
    let unparseable = || DateExprError::UnparseableInput(input.to_owned());

    match spec.code {
        "%Y" => {
            let (value, rest) = take_number(rest, 4, 0, 9999).ok_or_else(unparseable)?;
            fields.year = Some(value as i32);
            Ok(rest)
        }
        "%m" => {
            let (value, rest) = take_number(rest, 2, 1, 12).ok_or_else(unparseable)?;
            fields.month = Some(value);
            Ok(rest)
        }
        "%d" => {
            let (value, rest) = take_number(rest, 2, 1, 31).ok_or_else(unparseable)?;
            fields.day = Some(value);
            Ok(rest)
        }
        "%H" => {
            let (value, rest) = take_number(rest, 2, 0, 23).ok_or_else(unparseable)?;
            fields.hour24 = Some(value);
            Ok(rest)
        }
        "%h" => {
            let (value, rest) = take_number(rest, 2, 1, 12).ok_or_else(unparseable)?;
            fields.hour12 = Some(value);
            Ok(rest)
        }
        "%M" => {
            let (value, rest) = take_number(rest, 2, 0, 59).ok_or_else(unparseable)?;
            fields.minute = Some(value);
            Ok(rest)
        }
        "%S" => {
            // 60 tolerated for leap seconds.
            let (value, rest) = take_number(rest, 2, 0, 60).ok_or_else(unparseable)?;
            fields.second = Some(value);
            Ok(rest)
        }
        "%p" => {
            let marker = rest.get(..2).ok_or_else(unparseable)?;
            if marker.eq_ignore_ascii_case("AM") {
                fields.pm = Some(false);
            } else if marker.eq_ignore_ascii_case("PM") {
                fields.pm = Some(true);
            } else {
                return Err(unparseable());
            }
            Ok(&rest[2..])
        }
        "%z" => {
            let (sign, rest) = match rest.split_at_checked(1) {
                Some(("+", rest)) => (1, rest),
                Some(("-", rest)) => (-1, rest),
                _ => return Err(unparseable()),
            };
            let (hours, rest) = take_number(rest, 2, 0, 23).ok_or_else(unparseable)?;
            let (minutes, rest) = take_number(rest, 2, 0, 59).ok_or_else(unparseable)?;
            fields.offset_seconds = Some(sign * (hours as i32 * 3600 + minutes as i32 * 60));
            Ok(rest)
        }
        _ => unreachable!("unregistered conversion code: {}", spec.code),
    }
}

/// Takes exactly `len` ASCII digits off the front of `rest`, validating the
/// value against `min..=max`.
fn take_number(rest: &str, len: usize, min: u32, max: u32) -> Option<(u32, &str)> {
    let digits = rest.get(..len)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: u32 = digits.parse().ok()?;
    ((min..=max).contains(&value)).then_some((value, &rest[len..]))
}
