use chrono::format::{self, Fixed, Item, Numeric, Pad, ParseErrorKind, ParseResult, Parsed};
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Format used when the host does not provide one.
pub const DEFAULT_FORMAT: &str = "HH:mm:ss";

/// A moment-style time format such as `"HH:mm:ss"` or `"hh:mm A"`.
///
/// The format is the only thing deciding which fields are parsed, printed and
/// shown in the widget. Recognised tokens are `HH H hh h mm m ss s A a`; any
/// other character is copied verbatim, and text between `[` and `]` is
/// always literal. Patterns are compiled to chrono format items once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pattern: String,
    items: Vec<Item<'static>>,
}

/// Why a string could not be read under a [`FormatSpec`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("format {0:?} has no time field")]
    NoFields(String),
    #[error("{input:?} does not match format {format:?}: {source}")]
    Mismatch {
        input: String,
        format: String,
        source: format::ParseError,
    },
    #[error("leap seconds are not supported")]
    LeapSecond,
}

impl ParseError {
    /// What chrono reported, when the input did not line up with the format.
    pub fn kind(&self) -> Option<ParseErrorKind> {
        match self {
            ParseError::Mismatch { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec::new(DEFAULT_FORMAT)
    }
}

impl From<&str> for FormatSpec {
    fn from(pattern: &str) -> Self {
        FormatSpec::new(pattern)
    }
}

impl From<String> for FormatSpec {
    fn from(pattern: String) -> Self {
        FormatSpec::new(pattern)
    }
}

impl FromStr for FormatSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FormatSpec::new(s))
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FormatSpec {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let items = tokenize(&pattern);
        FormatSpec { pattern, items }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn has_hour(&self) -> bool {
        self.items.iter().any(is_hour)
    }

    pub fn has_minute(&self) -> bool {
        self.items.iter().any(is_minute)
    }

    pub fn has_second(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Numeric(Numeric::Second, _)))
    }

    /// True when hours are written on a 12-hour clock (`hh` or `h`).
    pub fn is_12_hour(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Numeric(Numeric::Hour12, _)))
    }

    /// Writes `time` using this format. Sub-second precision is dropped.
    pub fn format_time(&self, time: NaiveTime) -> String {
        time.format_with_items(self.items.iter()).to_string()
    }

    /// Reads a time of day from `text`.
    ///
    /// On top of chrono's parser, input that stops early is accepted: the
    /// fields it never reaches default to zero (`"08:30"` reads fine under
    /// `"HH:mm:ss"`). A 12-hour field with no AM/PM read keeps the hour as
    /// written, so `"12:30"` under `"hh:mm"` is half past noon.
    pub fn parse_time(&self, text: &str) -> Result<NaiveTime, ParseError> {
        let input = text.trim();
        if input.is_empty() {
            return Err(ParseError::Empty);
        }
        if !self.items.iter().any(is_field) {
            return Err(ParseError::NoFields(self.pattern.clone()));
        }
        let mismatch = |source: format::ParseError| ParseError::Mismatch {
            input: input.to_string(),
            format: self.pattern.clone(),
            source,
        };

        let mut end = self.items.len();
        let time = loop {
            match parse_fields(&self.items[..end], input) {
                Err(e) if e.kind() == ParseErrorKind::TooShort => {
                    // retry without whatever follows the last field the input reached
                    let last = self.items[..end].iter().rposition(is_field);
                    let shorter = match last {
                        Some(last) if last + 1 < end => Some(last + 1),
                        Some(last) => self.items[..last].iter().rposition(is_field).map(|p| p + 1),
                        None => None,
                    };
                    match shorter {
                        Some(shorter) => end = shorter,
                        None => return Err(mismatch(e)),
                    }
                }
                result => break result.map_err(mismatch)?,
            }
        };
        if time.nanosecond() >= 1_000_000_000 {
            return Err(ParseError::LeapSecond);
        }
        Ok(time)
    }
}

/// Parses `input` against `items`, filling in what the items do not cover.
fn parse_fields(items: &[Item<'static>], input: &str) -> ParseResult<NaiveTime> {
    let has_meridiem = items.iter().any(|item| {
        matches!(
            item,
            Item::Fixed(Fixed::UpperAmPm) | Item::Fixed(Fixed::LowerAmPm)
        )
    });
    let mut parsed = Parsed::new();
    format::parse(
        &mut parsed,
        input,
        items.iter().map(|item| match item {
            Item::Numeric(Numeric::Hour12, pad) if !has_meridiem => Item::Numeric(Numeric::Hour, *pad),
            other => other.clone(),
        }),
    )?;
    if !items.iter().any(is_hour) {
        parsed.set_hour(0)?;
    }
    if !items.iter().any(is_minute) {
        parsed.set_minute(0)?;
    }
    parsed.to_naive_time()
}

fn is_hour(item: &Item<'_>) -> bool {
    matches!(
        item,
        Item::Numeric(Numeric::Hour, _) | Item::Numeric(Numeric::Hour12, _)
    )
}

fn is_minute(item: &Item<'_>) -> bool {
    matches!(item, Item::Numeric(Numeric::Minute, _))
}

fn is_field(item: &Item<'_>) -> bool {
    matches!(item, Item::Numeric(..) | Item::Fixed(_))
}

/// Splits literal text into whitespace runs, which parse leniently, and
/// verbatim runs.
fn push_literal(items: &mut Vec<Item<'static>>, literal: &mut String) {
    let text = std::mem::take(literal);
    let mut rest = text.as_str();
    while let Some(first) = rest.chars().next() {
        let space = first.is_whitespace();
        let len = rest
            .find(|c: char| c.is_whitespace() != space)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(len);
        items.push(if space {
            Item::OwnedSpace(chunk.into())
        } else {
            Item::OwnedLiteral(chunk.into())
        });
        rest = tail;
    }
}

fn tokenize(pattern: &str) -> Vec<Item<'static>> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let field = match c {
            'H' | 'h' | 'm' | 's' => {
                let pad = if chars.next_if_eq(&c).is_some() {
                    Pad::Zero
                } else {
                    Pad::None
                };
                Some(match c {
                    'H' => Item::Numeric(Numeric::Hour, pad),
                    'h' => Item::Numeric(Numeric::Hour12, pad),
                    'm' => Item::Numeric(Numeric::Minute, pad),
                    _ => Item::Numeric(Numeric::Second, pad),
                })
            }
            'A' => Some(Item::Fixed(Fixed::UpperAmPm)),
            'a' => Some(Item::Fixed(Fixed::LowerAmPm)),
            '[' => {
                for escaped in chars.by_ref() {
                    if escaped == ']' {
                        break;
                    }
                    literal.push(escaped);
                }
                None
            }
            other => {
                literal.push(other);
                None
            }
        };
        if let Some(field) = field {
            push_literal(&mut items, &mut literal);
            items.push(field);
        }
    }
    push_literal(&mut items, &mut literal);
    items
}
