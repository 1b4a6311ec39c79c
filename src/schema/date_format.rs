//! Date/time patterns for schema files.
//!
//! Schema files describe dates with the familiar custom pattern syntax
//! (`yyyy-MM-dd HH:mm:ss`). This module compiles such a pattern into a chrono
//! `strftime` string once, so parsing and formatting share the exact same items.

use crate::schema::model::SchemaViolation;
use chrono::format::{self, Fixed, Item, Numeric, ParseError, Parsed, StrftimeItems};
use chrono::NaiveDateTime;

/// Which clock fields a compiled pattern carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TimeFields {
    hour24: bool,
    hour12: bool,
    am_pm: bool,
    minute: bool,
    second: bool,
}

impl TimeFields {
    fn has_hour(self) -> bool {
        self.hour24 || self.hour12
    }
}

/// A compiled date pattern used for both parsing and formatting timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
    time: TimeFields,
}

impl DateFormat {
    /// Compile a custom date pattern.
    ///
    /// Supported specifiers: `yyyy yy MMMM MMM MM M dd d HH H hh h mm m ss s
    /// fff ffffff fffffffff tt`. Text in single or double quotes and characters
    /// escaped with `\` are copied literally, as is every other character.
    ///
    /// The pattern must name a year, a month and a day. `h`/`hh` need `tt`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, SchemaViolation> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(SchemaViolation::BlankDateFormat);
        }

        let strftime = translate(&pattern)?;
        let reject = |reason: &str| SchemaViolation::DatePattern {
            pattern: pattern.clone(),
            reason: reason.to_string(),
        };

        let (mut year, mut month, mut day) = (false, false, false);
        let mut time = TimeFields::default();
        for item in StrftimeItems::new(&strftime) {
            match item {
                Item::Error => return Err(reject("pattern compiles to an unsupported format")),
                Item::Numeric(Numeric::Year | Numeric::YearMod100, _) => year = true,
                Item::Numeric(Numeric::Month, _)
                | Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => month = true,
                Item::Numeric(Numeric::Day, _) => day = true,
                Item::Numeric(Numeric::Hour, _) => time.hour24 = true,
                Item::Numeric(Numeric::Hour12, _) => time.hour12 = true,
                Item::Fixed(Fixed::LowerAmPm | Fixed::UpperAmPm) => time.am_pm = true,
                Item::Numeric(Numeric::Minute, _) => time.minute = true,
                Item::Numeric(Numeric::Second, _) => time.second = true,
                _ => {}
            }
        }

        if !(year && month && day) {
            return Err(reject("pattern needs a year, a month and a day"));
        }
        if time.hour12 && !time.am_pm && !time.hour24 {
            return Err(reject("12-hour clock 'h' needs the AM/PM designator 'tt'"));
        }
        if time.am_pm && !time.has_hour() {
            return Err(reject("AM/PM designator 'tt' needs an hour"));
        }

        Ok(Self {
            pattern,
            strftime,
            time,
        })
    }

    /// The pattern as written in the schema file
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parse a timestamp, requiring the whole input to match the pattern.
    ///
    /// Clock fields the pattern does not carry are zero, so a date-only
    /// pattern yields midnight and `HH` alone yields the full hour.
    pub fn parse(&self, input: &str) -> Result<NaiveDateTime, ParseError> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, input, StrftimeItems::new(&self.strftime))?;

        if !self.time.has_hour() {
            parsed.set_hour(0)?;
        }
        if !self.time.minute {
            parsed.set_minute(0)?;
        }
        if !self.time.second {
            parsed.set_second(0)?;
        }
        parsed.to_naive_datetime_with_offset(0)
    }

    pub fn format(&self, timestamp: &NaiveDateTime) -> String {
        timestamp.format(&self.strftime).to_string()
    }
}

fn translate(pattern: &str) -> Result<String, SchemaViolation> {
    let unsupported = |reason: String| SchemaViolation::DatePattern {
        pattern: pattern.to_string(),
        reason,
    };

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&next| next == c).count();

        match c {
            'y' => out.push_str(if run >= 3 { "%Y" } else { "%y" }),
            'M' => out.push_str(match run {
                1 => "%-m",
                2 => "%m",
                3 => "%b",
                _ => "%B",
            }),
            'd' => out.push_str(match run {
                1 => "%-d",
                2 => "%d",
                3 => "%a",
                _ => "%A",
            }),
            'H' => out.push_str(if run == 1 { "%-H" } else { "%H" }),
            'h' => out.push_str(if run == 1 { "%-I" } else { "%I" }),
            'm' => out.push_str(if run == 1 { "%-M" } else { "%M" }),
            's' => out.push_str(if run == 1 { "%-S" } else { "%S" }),
            't' => out.push_str("%p"),
            'f' => out.push_str(match run {
                3 => "%3f",
                6 => "%6f",
                9 => "%9f",
                _ => {
                    return Err(unsupported(format!(
                        "fraction width {run} is not supported, only 3, 6 or 9 digits"
                    )))
                }
            }),
            'z' | 'K' | 'g' | 'F' => {
                return Err(unsupported(format!("unsupported specifier '{c}'")));
            }
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&next| next == c)
                    .ok_or_else(|| unsupported("unterminated quoted literal".to_string()))?;
                for &literal in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, literal);
                }
                i += close + 2;
                continue;
            }
            '\\' => {
                let literal = chars
                    .get(i + 1)
                    .copied()
                    .ok_or_else(|| unsupported("dangling escape".to_string()))?;
                push_literal(&mut out, literal);
                i += 2;
                continue;
            }
            _ => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }

        i += run;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
