//! Defines the [`Template`] type and the named-placeholder substitution used
//! to stamp pages. A template is plain text with `%(key)s` markers; rendering
//! replaces every marker with the value mapped to `key`. `%%` renders as a
//! literal `%`. Substitution is single-pass: a value that itself contains a
//! marker is inserted verbatim and never expanded.
//!
//! A marker may carry a format spec between the key and the conversion:
//!
//! ```text
//! %(key)[flags][width][.precision][length]conversion
//! ```
//!
//! * `flags` are any of `#0- +`. Only `-` (left-align) affects string
//!   output; the rest are accepted and ignored.
//! * `width` pads the value with spaces to at least that many characters.
//! * `precision` truncates the value to at most that many characters.
//! * `length` is any of `hlL` and is ignored.
//! * `conversion` is `s` (the value as-is), `r` (quoted and escaped) or `a`
//!   (like `r`, with non-ASCII characters escaped too).
//!
//! The key runs to the matching `)`, so `%(a(b))s` names the key `a(b)`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// The mapping from placeholder keys to their replacement text.
pub type Mapping<'a> = HashMap<&'a str, &'a str>;

/// A parsed template, ready to be rendered against a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Text copied to the output as-is (with `%%` already collapsed).
    Literal(String),

    /// A `%(key)...` marker.
    Field(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    key: String,
    left_align: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    /// `s`
    Str,

    /// `r`
    Repr,

    /// `a`
    Ascii,
}

impl Field {
    /// Parses a marker body starting at its `(`. `start` is the byte offset
    /// of the marker's `%`, used for error reporting. Returns the field and
    /// the number of bytes of `input` it spans.
    fn parse(input: &str, start: usize) -> Result<(Field, usize)> {
        let mut depth = 0usize;
        let mut close = None;
        for (j, c) in input.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(j);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close.ok_or(Error::IncompleteKey(start))?;

        let spec_start = close + 1;
        let mut chars = input[spec_start..].char_indices().peekable();

        let mut left_align = false;
        while let Some(&(_, c)) = chars.peek() {
            if !"#0- +".contains(c) {
                break;
            }
            left_align |= c == '-';
            chars.next();
        }

        let width = number(&mut chars, start)?;
        let precision = match chars.peek() {
            Some(&(_, '.')) => {
                chars.next();
                Some(number(&mut chars, start)?.unwrap_or(0))
            }
            _ => None,
        };

        while let Some(&(_, c)) = chars.peek() {
            if !"hlL".contains(c) {
                break;
            }
            chars.next();
        }

        let (j, c) = chars.next().ok_or(Error::IncompleteFormat(start))?;
        let conversion = match c {
            's' => Conversion::Str,
            'r' => Conversion::Repr,
            'a' => Conversion::Ascii,
            conversion => {
                return Err(Error::UnsupportedConversion {
                    offset: start,
                    conversion,
                })
            }
        };

        Ok((
            Field {
                key: input[1..close].to_owned(),
                left_align,
                width,
                precision,
                conversion,
            },
            spec_start + j + c.len_utf8(),
        ))
    }

    fn format(&self, output: &mut String, value: &str) {
        let converted: Cow<str> = match self.conversion {
            Conversion::Str => Cow::Borrowed(value),
            Conversion::Repr => Cow::Owned(quote(value, false)),
            Conversion::Ascii => Cow::Owned(quote(value, true)),
        };
        let truncated = match self.precision {
            Some(precision) => match converted.char_indices().nth(precision) {
                Some((end, _)) => &converted[..end],
                None => &converted[..],
            },
            None => &converted[..],
        };

        let pad = self
            .width
            .map_or(0, |width| width.saturating_sub(truncated.chars().count()));
        if !self.left_align {
            output.extend(std::iter::repeat(' ').take(pad));
        }
        output.push_str(truncated);
        if self.left_align {
            output.extend(std::iter::repeat(' ').take(pad));
        }
    }
}

/// Reads a run of decimal digits, if any.
fn number(chars: &mut Peekable<CharIndices>, start: usize) -> Result<Option<usize>> {
    let mut n: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let digit = match c.to_digit(10) {
            Some(digit) => digit as usize,
            None => break,
        };
        n = Some(
            n.unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .filter(|n| *n <= i32::MAX as usize)
                .ok_or(Error::TooBig(start))?,
        );
        chars.next();
    }
    Ok(n)
}

/// Quotes `value` the way the `r` and `a` conversions print it: single
/// quotes unless the value contains a single quote and no double quote,
/// with backslashes, the quote character and control characters escaped.
/// With `ascii`, every non-ASCII character is escaped as well.
fn quote(value: &str, ascii: bool) -> String {
    let delimiter = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(delimiter);
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() || (ascii && !c.is_ascii()) => {
                let code = c as u32;
                if code < 0x100 {
                    quoted.push_str(&format!("\\x{:02x}", code));
                } else if code < 0x10000 {
                    quoted.push_str(&format!("\\u{:04x}", code));
                } else {
                    quoted.push_str(&format!("\\U{:08x}", code));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

impl Template {
    /// Parses template text into literal and field segments. Errors carry the
    /// byte offset of the `%` that started the offending marker.
    pub fn parse(input: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = input;
        let mut offset = 0;

        while let Some(i) = rest.find('%') {
            literal.push_str(&rest[..i]);
            let start = offset + i;
            let after = &rest[i + 1..];

            let consumed = match after.chars().next() {
                None => return Err(Error::IncompleteFormat(start)),
                Some('%') => {
                    literal.push('%');
                    1
                }
                Some('(') => {
                    let (field, consumed) = Field::parse(after, start)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                    consumed
                }
                Some(_) => return Err(Error::RequiresMapping(start)),
            };

            let advance = i + 1 + consumed;
            offset += advance;
            rest = &rest[advance..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }

    /// Renders the template, replacing each field with its mapped value.
    /// Mapping entries the template doesn't reference are ignored.
    pub fn render(&self, mapping: &Mapping) -> Result<String> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Field(field) => match mapping.get(field.key.as_str()) {
                    Some(value) => field.format(&mut output, value),
                    None => return Err(Error::MissingKey(field.key.clone())),
                },
            }
        }
        Ok(output)
    }
}

/// Parses `input` and renders it against `mapping` in one step.
pub fn substitute(input: &str, mapping: &Mapping) -> Result<String> {
    Template::parse(input)?.render(mapping)
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing or rendering a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Returned when a `%` (or `%(key)` and its format spec) runs into the
    /// end of the input.
    IncompleteFormat(usize),

    /// Returned when a `%(` has no matching `)`.
    IncompleteKey(usize),

    /// Returned when a marker's conversion isn't one of `s`, `r` or `a`.
    /// Values are always text, so numeric conversions such as `d` and a `*`
    /// width are rejected here too.
    UnsupportedConversion { offset: usize, conversion: char },

    /// Returned for positional markers such as `%s` or `%d`; only named
    /// markers can be filled from a mapping.
    RequiresMapping(usize),

    /// Returned when a width or precision doesn't fit in an `i32`.
    TooBig(usize),

    /// Returned when the template references a key absent from the mapping.
    MissingKey(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IncompleteFormat(offset) => {
                write!(f, "incomplete format at byte {}", offset)
            }
            Error::IncompleteKey(offset) => {
                write!(f, "incomplete format key at byte {}", offset)
            }
            Error::UnsupportedConversion { offset, conversion } => write!(
                f,
                "unsupported format character {:?} at byte {}",
                conversion, offset
            ),
            Error::RequiresMapping(offset) => {
                write!(f, "format requires a mapping at byte {}", offset)
            }
            Error::TooBig(offset) => {
                write!(f, "width or precision too big at byte {}", offset)
            }
            Error::MissingKey(key) => write!(f, "no value for placeholder `{}`", key),
        }
    }
}

impl std::error::Error for Error {}
