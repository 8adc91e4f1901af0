//! Typed constants embedded in a term tree.
//!
//! A [`Value`] renders as a SQL literal, or is captured by a
//! [`Parameterizer`](super::param::Parameterizer) and replaced with a
//! placeholder.

use std::io;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use uuid::Uuid;

use super::context::RenderContext;
use super::error::{QueryError, QueryResult};
use super::token::{Token, TokenStream};

/// Calendar part used by EXTRACT and friends. Renders unquoted and is never parameterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
}

impl DatePart {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Quarter => "QUARTER",
            DatePart::Month => "MONTH",
            DatePart::Week => "WEEK",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::Microsecond => "MICROSECOND",
        }
    }
}

/// A constant value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
    Uuid(Uuid),
    /// Dict or list document, rendered as JSON text.
    Json(serde_json::Value),
    List(Vec<Value>),
    DatePart(DatePart),
}

impl Value {
    /// Build the literal tokens for this value.
    pub fn to_literal_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let token = match self {
            Value::Null => Token::LitNull,
            Value::Bool(b) => Token::LitBool(*b),
            Value::Int(n) => Token::LitInt(*n),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(QueryError::query(format!(
                        "Cannot render non-finite float {f}"
                    )));
                }
                Token::LitFloat(*f)
            }
            Value::Str(s) => Token::LitString(s.clone()),
            Value::Date(d) => Token::LitString(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => Token::LitString(iso_time(t)),
            Value::DateTime(dt) => Token::LitString(iso_datetime(dt)),
            Value::DateTimeTz(dt) => Token::LitString(format!(
                "{}{}",
                iso_datetime(&dt.naive_local()),
                dt.format("%:z")
            )),
            Value::Uuid(u) => Token::LitString(u.to_string()),
            Value::Json(_) | Value::List(_) => Token::LitJson(self.to_json_text()?),
            Value::DatePart(part) => Token::Raw(part.as_str().into()),
        };
        Ok(TokenStream::from(token))
    }

    /// Values that stay inline even when a parameterizer is active.
    pub fn is_parameterizable(&self) -> bool {
        match self {
            Value::DatePart(_) => false,
            Value::Str(s) => s != "*",
            _ => true,
        }
    }

    /// Serialize as JSON text with `", "` and `": "` separators and ASCII-only output.
    pub fn to_json_text(&self) -> QueryResult<String> {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        self.serialize(&mut ser)
            .map_err(|e| QueryError::query(format!("Cannot serialize JSON value: {e}")))?;
        String::from_utf8(out)
            .map_err(|e| QueryError::query(format!("Cannot serialize JSON value: {e}")))
    }
}

/// `HH:MM:SS`, with `.ffffff` when the time has sub-second precision.
fn iso_time(t: &NaiveTime) -> String {
    let micros = t.nanosecond() / 1_000;
    if micros == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", t.format("%H:%M:%S"), micros)
    }
}

fn iso_datetime(dt: &NaiveDateTime) -> String {
    format!("{}T{}", dt.date().format("%Y-%m-%d"), iso_time(&dt.time()))
}

/// JSON formatter producing `{"a": 1, "b": [1, 2]}` with non-ASCII escaped as `\uXXXX`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if c.is_ascii() {
                let mut buf = [0u8; 1];
                writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

// Conversions from Rust values.

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<DatePart> for Value {
    fn from(v: DatePart) -> Self {
        Value::DatePart(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
