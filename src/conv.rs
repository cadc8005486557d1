//! Conversion specifier table and template tokenizer.

/// Time unit represented by a conversion specifier, ordered from the
/// coarsest to the finest. The finest (maximum) specifier present in
/// a template defines the step of a generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    /// Calendar year, steps by 12 months.
    Year,
    /// Calendar month.
    Month,
    /// Calendar day.
    Day,
    /// AM/PM half of a day, steps by 12 hours.
    Meridian,
    /// Hour of a day.
    Hour,
    /// Minute of an hour.
    Minute,
    /// Second of a minute.
    Second,
}

/// Single entry of the conversion specifier table.
///
/// Exactly one of `granularity` or `timezone` is meaningful per entry:
/// timezone-flagged codes carry no time granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ConversionSpec {
    /// Two-character code, always starting with `%`.
    pub(crate) code: &'static str,
    /// Equivalent chrono strftime fragment.
    pub(crate) fragment: &'static str,
    pub(crate) granularity: Option<Granularity>,
    pub(crate) timezone: bool,
}

/// Fixed specifier registry, initialized at compile time and never mutated.
pub(crate) const CONVERSION_SPECS: &[ConversionSpec] = &[
    ConversionSpec {
        code: "%Y",
        fragment: "%Y",
        granularity: Some(Granularity::Year),
        timezone: false,
    },
    ConversionSpec {
        code: "%m",
        fragment: "%m",
        granularity: Some(Granularity::Month),
        timezone: false,
    },
    ConversionSpec {
        code: "%d",
        fragment: "%d",
        granularity: Some(Granularity::Day),
        timezone: false,
    },
    ConversionSpec {
        code: "%p",
        fragment: "%p",
        granularity: Some(Granularity::Meridian),
        timezone: false,
    },
    ConversionSpec {
        code: "%H",
        fragment: "%H",
        granularity: Some(Granularity::Hour),
        timezone: false,
    },
    ConversionSpec {
        code: "%h",
        fragment: "%I",
        granularity: Some(Granularity::Hour),
        timezone: false,
    },
    ConversionSpec {
        code: "%M",
        fragment: "%M",
        granularity: Some(Granularity::Minute),
        timezone: false,
    },
    ConversionSpec {
        code: "%S",
        fragment: "%S",
        granularity: Some(Granularity::Second),
        timezone: false,
    },
    ConversionSpec {
        code: "%z",
        fragment: "%z",
        granularity: None,
        timezone: true,
    },
];

/// Template element: either inert literal text or a recognized specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Token {
    Literal(String),
    Spec(&'static ConversionSpec),
}

/// Splits a template into literal and specifier tokens, left to right.
///
/// Contiguous specifier runs (`%H%M%z`) yield one token per code with no
/// empty literal between them. A `%` that doesn't start a recognized code
/// is ordinary literal text: there is no escape syntax for a literal `%`.
pub(crate) fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        if let Some(spec) = CONVERSION_SPECS.iter().find(|s| rest.starts_with(s.code)) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Spec(spec));
            rest = &rest[spec.code.len()..];
        } else {
            let Some(ch) = rest.chars().next() else { break };
            literal.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    tokens
}
