//! Percent-escaped date templates: formatting, parsing and time series generation.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - render a date template into concrete text for a given instant;
//! - parse previously rendered text back into an approximate instant;
//! - generate the series of rendered strings between two instants, stepped
//!   at the template's own granularity.
//!
//! It has two external dependencies - [chrono](https://crates.io/crates/chrono)
//! and [chrono-tz](https://crates.io/crates/chrono-tz).
//!
//! ## Template format
//!
//! A template is an arbitrary string with embedded two-character conversion
//! specifiers. Anything that isn't a recognized specifier is literal text
//! and is reproduced verbatim, so paths, URLs and other punctuation-heavy
//! strings are safe templates. There is no escape syntax for a literal `%`:
//! a `%` that doesn't start a recognized specifier is literal text itself.
//!
//! The table below describes the recognized specifiers:
//!
//! | Specifier | Meaning               | Values      | Granularity |
//! |-----------|-----------------------|-------------|-------------|
//! | `%Y`      | year                  | 4-digit     | year        |
//! | `%m`      | month                 | 01-12       | month       |
//! | `%d`      | day of month          | 01-31       | day         |
//! | `%p`      | meridian marker       | AM/PM       | 12 hours    |
//! | `%H`      | hour, 24-hour clock   | 00-23       | hour        |
//! | `%h`      | hour, 12-hour clock   | 01-12       | hour        |
//! | `%M`      | minute                | 00-59       | minute      |
//! | `%S`      | second                | 00-60       | second      |
//! | `%z`      | UTC offset            | ±hhmm       | none        |
//!
//! `%S` tolerates 60 for leap seconds; `%z` encodes a timezone, not a time
//! field, so it never affects a template's granularity.
//!
//! The granularity of a template is its finest specifier, and it defines the
//! step of a generated series: `"%Y/%m"` steps by one month, `"%H:%M"` by
//! one minute.
//!
//! ### Templates with timezone
//! An expression renders (and parses) in UTC unless it's constructed with a
//! timezone: a fixed `±hhmm` offset or an IANA region id. Timezone affects
//! only the text; the underlying instants are absolute.
//!
//! ## How to use
//!
//! The central entity of the crate is the [`DateExpr`] structure, with four
//! basic methods:
//! - [new()](DateExpr::new)/[with_timezone()](DateExpr::with_timezone):
//!   constructors (total, any string is a valid template);
//! - [format()](DateExpr::format): renders the template for an instant;
//! - [parse()](DateExpr::parse): recovers the instant from rendered text;
//! - [series()](DateExpr::series): returns an `Iterator` over rendered
//!   strings between two bounds, inclusive.
//!
//! ### Example with `format` and `parse`
//! ```rust
//! use date_expr::{DateExpr, Result};
//!
//! fn format_and_parse() -> Result<()> {
//!     let expr = DateExpr::new("s3://bucket/foo/%Y/%m/%d/bar/%H.%M/file-A");
//!
//!     // 2014-08-13T17:10:42Z
//!     let key = expr.format(1407949842)?;
//!     assert_eq!(key, "s3://bucket/foo/2014/08/13/bar/17.10/file-A");
//!
//!     // Parsing is lossy: seconds aren't in the template, so they are gone.
//!     assert_eq!(expr.parse(&key)?.seconds(), 1407949800);
//!
//!     Ok(())
//! }
//! # format_and_parse().unwrap();
//! ```
//!
//! ### Example with `series`
//! ```rust
//! use date_expr::{DateExpr, Result, Timezone};
//!
//! fn series() -> Result<()> {
//!     let tz: Timezone = "America/Los_Angeles".parse()?;
//!     let expr = DateExpr::with_timezone("logs/%Y-%m-%dT%H", tz);
//!
//!     // Bounds can be instants or previously rendered strings.
//!     let keys: Vec<String> = expr.series("logs/2014-08-13T10", 1407956400)?.collect();
//!     assert_eq!(
//!         keys,
//!         ["logs/2014-08-13T10", "logs/2014-08-13T11", "logs/2014-08-13T12"]
//!     );
//!
//!     Ok(())
//! }
//! # series().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html)
//!   and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html)
//!   trait implementation for [`DateExpr`].

mod conv;
/// Crate specific Error implementation.
pub mod error;
/// Date expression value type: rendering, parsing and timezone introspection.
pub mod expr;
mod instant;
mod pattern;
mod series;
mod timezone;

// Re-export of public entities.
pub use conv::Granularity;
pub use error::DateExprError;
pub use expr::{extract_timezone, DateExpr};
pub use instant::{Instant, Timestamp};
pub use series::{DateSeries, SeriesBound, Step};
pub use timezone::Timezone;

/// Convenient alias for `Result`.
pub type Result<T, E = DateExprError> = std::result::Result<T, E>;
