use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Number;
use std::{
    borrow::{Borrow, Cow},
    fmt,
};

/// A value we parameterize for the prepared statement, or read back from a
/// result row. Null values are the corresponding variant holding `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// 64-bit signed integer.
    Integer(Option<i64>),
    /// 64-bit floating point.
    Float(Option<f64>),
    /// String value.
    Text(Option<Cow<'a, str>>),
    /// Bytes value.
    Bytes(Option<Cow<'a, [u8]>>),
    /// Boolean value.
    Boolean(Option<bool>),
    /// A datetime value, without a time zone.
    DateTime(Option<NaiveDateTime>),
    /// A date value.
    Date(Option<NaiveDate>),
}

pub(crate) struct Params<'a>(pub(crate) &'a [Value<'a>]);

impl fmt::Display for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();

        write!(f, "[")?;
        for (i, val) in self.0.iter().enumerate() {
            write!(f, "{val}")?;

            if i < (len - 1) {
                write!(f, ",")?;
            }
        }
        write!(f, "]")
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = match self {
            Value::Integer(val) => val.map(|v| write!(f, "{v}")),
            Value::Float(val) => val.map(|v| write!(f, "{v}")),
            Value::Text(val) => val.as_ref().map(|v| write!(f, "\"{v}\"")),
            Value::Bytes(val) => val.as_ref().map(|v| write!(f, "<{} bytes blob>", v.len())),
            Value::Boolean(val) => val.map(|v| write!(f, "{v}")),
            Value::DateTime(val) => val.map(|v| write!(f, "{v}")),
            Value::Date(val) => val.map(|v| write!(f, "{v}")),
        };

        match res {
            Some(r) => r,
            None => write!(f, "null"),
        }
    }
}

impl<'a> From<Value<'a>> for serde_json::Value {
    fn from(pv: Value<'a>) -> Self {
        let res = match pv {
            Value::Integer(i) => i.map(|i| serde_json::Value::Number(Number::from(i))),
            Value::Float(f) => f.map(|f| match Number::from_f64(f) {
                Some(number) => serde_json::Value::Number(number),
                None => serde_json::Value::Null,
            }),
            Value::Text(cow) => cow.map(|cow| serde_json::Value::String(cow.into_owned())),
            Value::Bytes(bytes) => bytes.map(|bytes| {
                serde_json::Value::Array(bytes.iter().map(|b| serde_json::Value::from(*b)).collect())
            }),
            Value::Boolean(b) => b.map(serde_json::Value::Bool),
            Value::DateTime(dt) => dt.map(|dt| serde_json::Value::String(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())),
            Value::Date(date) => date.map(|date| serde_json::Value::String(format!("{date}"))),
        };

        match res {
            Some(val) => val,
            None => serde_json::Value::Null,
        }
    }
}

impl<'a> Value<'a> {
    /// Creates a new integer value.
    pub fn integer<I>(value: I) -> Self
    where
        I: Into<i64>,
    {
        Value::Integer(Some(value.into()))
    }

    /// Creates a new float value.
    pub fn float(value: f64) -> Self {
        Value::Float(Some(value))
    }

    /// Creates a new string value.
    pub fn text<T>(value: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Value::Text(Some(value.into()))
    }

    /// Creates a new bytes value.
    pub fn bytes<B>(value: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Value::Bytes(Some(value.into()))
    }

    /// Creates a new boolean value.
    pub fn boolean<B>(value: B) -> Self
    where
        B: Into<bool>,
    {
        Value::Boolean(Some(value.into()))
    }

    /// Creates a new datetime value.
    pub fn datetime(value: NaiveDateTime) -> Self {
        Value::DateTime(Some(value))
    }

    /// Creates a new date value.
    pub fn date(value: NaiveDate) -> Self {
        Value::Date(Some(value))
    }

    /// `true` if the `Value` is null.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Integer(i) => i.is_none(),
            Value::Float(f) => f.is_none(),
            Value::Text(t) => t.is_none(),
            Value::Bytes(b) => b.is_none(),
            Value::Boolean(b) => b.is_none(),
            Value::DateTime(dt) => dt.is_none(),
            Value::Date(d) => d.is_none(),
        }
    }

    /// Returns a &str if the value is text or UTF-8 bytes, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(Some(cow)) => Some(cow.borrow()),
            Value::Bytes(Some(cow)) => std::str::from_utf8(cow.as_ref()).ok(),
            _ => None,
        }
    }

    /// Transforms the `Value` to a `String` if it's text, otherwise `None`.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Text(Some(cow)) => Some(cow.into_owned()),
            Value::Bytes(Some(cow)) => String::from_utf8(cow.into_owned()).ok(),
            _ => None,
        }
    }

    /// Returns a bytes slice if the value is text or a byte slice, otherwise `None`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(Some(cow)) => Some(cow.as_ref().as_bytes()),
            Value::Bytes(Some(cow)) => Some(cow.as_ref()),
            _ => None,
        }
    }

    /// Returns an i64 if the value is an integer, otherwise `None`.
    ///
    /// Numbers read over the text protocol arrive as strings and are parsed.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => *i,
            Value::Text(Some(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a f64 if the value is a float or an integer, otherwise `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => *f,
            Value::Integer(Some(i)) => Some(*i as f64),
            Value::Text(Some(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a bool if the value is a boolean, or an integer holding 0 or 1.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => *b,
            // MySQL has no boolean type on the wire.
            Value::Integer(Some(i)) if *i == 0 || *i == 1 => Some(*i == 1),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => *dt,
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => *d,
            Value::DateTime(Some(dt)) => Some(dt.date()),
            _ => None,
        }
    }

    /// Detach the value from any borrowed data.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Integer(i) => Value::Integer(i),
            Value::Float(f) => Value::Float(f),
            Value::Text(t) => Value::Text(t.map(|t| Cow::Owned(t.into_owned()))),
            Value::Bytes(b) => Value::Bytes(b.map(|b| Cow::Owned(b.into_owned()))),
            Value::Boolean(b) => Value::Boolean(b),
            Value::DateTime(dt) => Value::DateTime(dt),
            Value::Date(d) => Value::Date(d),
        }
    }
}

macro_rules! value {
    ($target:ident: $kind:ty,$paramkind:ident,$that:expr) => {
        impl<'a> From<$kind> for crate::ast::Value<'a> {
            fn from(that: $kind) -> Self {
                let $target = that;
                crate::ast::Value::$paramkind(Some($that))
            }
        }

        impl<'a> From<Option<$kind>> for crate::ast::Value<'a> {
            fn from(that: Option<$kind>) -> Self {
                match that {
                    Some(val) => crate::ast::Value::from(val),
                    None => crate::ast::Value::$paramkind(None),
                }
            }
        }
    };
}

value!(val: i64, Integer, val);
value!(val: i32, Integer, i64::from(val));
value!(val: u32, Integer, i64::from(val));
value!(val: bool, Boolean, val);
value!(val: &'a str, Text, val.into());
value!(val: String, Text, val.into());
value!(val: f64, Float, val);
value!(val: f32, Float, f64::from(val));
value!(val: &'a [u8], Bytes, val.into());
value!(val: Vec<u8>, Bytes, val.into());
value!(val: NaiveDateTime, DateTime, val);
value!(val: NaiveDate, Date, val);

impl<'a> From<&'a String> for Value<'a> {
    fn from(that: &'a String) -> Self {
        Value::Text(Some(Cow::Borrowed(that.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_text_and_prints_null() {
        assert_eq!("\"Musti\"", Value::text("Musti").to_string());
        assert_eq!("null", Value::Integer(None).to_string());
        assert_eq!("<3 bytes blob>", Value::bytes(&b"abc"[..]).to_string());
    }

    #[test]
    fn params_display_joins_values() {
        let values = [Value::from(1), Value::from("a"), Value::Boolean(None)];

        assert_eq!("[1,\"a\",null]", Params(&values).to_string());
    }

    #[test]
    fn option_none_becomes_typed_null() {
        let value = Value::from(None::<i64>);

        assert!(value.is_null());
        assert_eq!(Value::Integer(None), value);
    }

    #[test]
    fn text_protocol_numbers_parse_as_integers() {
        assert_eq!(Some(50), Value::text("50").as_i64());
        assert_eq!(None, Value::text("fifty").as_i64());
        assert_eq!(Some(1.5), Value::text("1.5").as_f64());
    }

    #[test]
    fn json_conversion() {
        let date = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let datetime = date.and_hms_opt(12, 30, 0).unwrap();

        assert_eq!(serde_json::json!(12), serde_json::Value::from(Value::from(12)));
        assert_eq!(serde_json::json!("x"), serde_json::Value::from(Value::from("x")));
        assert_eq!(serde_json::json!("2020-04-01"), serde_json::Value::from(Value::from(date)));
        assert_eq!(
            serde_json::json!("2020-04-01 12:30:00"),
            serde_json::Value::from(Value::from(datetime))
        );
        assert_eq!(serde_json::Value::Null, serde_json::Value::from(Value::Text(None)));
    }
}
