//! Literal to typed value conversion
//!
//! Every value that enters a table goes through [`DataType::convert`], keyed
//! by the declared type of the column it lands in.

use std::{fmt::Display, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

use super::{DataType, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

// `%.f` also matches when the fractional part is absent
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Converts a raw literal using a declared type name (case-insensitive)
pub fn convert(declared_type: &str, raw: Option<&str>) -> Result<Value> {
    DataType::from_name(declared_type).convert(raw)
}

impl DataType {
    /// Converts a raw literal into a value of this type
    ///
    /// `None` is always NULL. An empty literal is NULL for every type except
    /// strings, which keep the empty string.
    pub fn convert(&self, raw: Option<&str>) -> Result<Value> {
        let raw = match raw {
            None => return Ok(Value::Null),
            Some(raw) if raw.is_empty() && !self.is_string() => return Ok(Value::Null),
            Some(raw) => raw,
        };

        Ok(match self {
            DataType::TinyInt => Value::TinyInt(parse(*self, raw)?),
            DataType::SmallInt => Value::SmallInt(parse(*self, raw)?),
            DataType::Integer => Value::Integer(parse(*self, raw)?),
            DataType::BigInt => Value::BigInt(parse(*self, raw)?),
            DataType::Float => Value::Float(parse(*self, raw)?),
            DataType::Double => Value::Double(parse(*self, raw)?),
            DataType::Decimal => Value::Decimal(parse_decimal(raw)?),
            DataType::Boolean => Value::Boolean(parse_boolean(raw)?),
            DataType::Date => Value::Date(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|e| Error::conversion(*self, raw, e))?,
            ),
            DataType::Timestamp => Value::Timestamp(parse_timestamp(raw)?),
            DataType::String => Value::String(raw.to_string()),
        })
    }
}

fn parse<T>(datatype: DataType, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| Error::conversion(datatype, raw, e))
}

/// Exact at any precision; exponent notation such as `1e3` is accepted
fn parse_decimal(raw: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(raw).map_err(|e| Error::conversion(DataType::Decimal, raw, e))
}

fn parse_boolean(raw: &str) -> Result<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::conversion(DataType::Boolean, raw, "expected TRUE or FALSE"))
    }
}

/// Accepts epoch milliseconds, a date-time (taken as UTC) or a bare date
fn parse_timestamp(raw: &str) -> Result<i64> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
        .map_err(|_| {
            Error::conversion(
                DataType::Timestamp,
                raw,
                "expected YYYY-MM-DD HH:MM:SS[.fff] or epoch milliseconds",
            )
        })
}
