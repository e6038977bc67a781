use crate::{
    ast::Value,
    error::{Error, ErrorKind},
};
use chrono::{Datelike, NaiveDate, Timelike};
use mysql_async::{self as my, consts::ColumnType};

pub(crate) fn conv_params(params: &[Value<'_>]) -> crate::Result<my::Params> {
    if params.is_empty() {
        // An explicit `Empty` keeps the driver from expecting placeholders.
        Ok(my::Params::Empty)
    } else {
        let values = params.iter().map(to_mysql_value).collect::<crate::Result<Vec<_>>>()?;
        Ok(my::Params::Positional(values))
    }
}

fn to_mysql_value(value: &Value<'_>) -> crate::Result<my::Value> {
    let res = match value {
        Value::Integer(i) => i.map(my::Value::Int),
        Value::Float(f) => f.map(my::Value::Double),
        Value::Text(s) => s.as_ref().map(|s| my::Value::Bytes(s.as_bytes().to_vec())),
        Value::Bytes(b) => b.as_ref().map(|b| my::Value::Bytes(b.to_vec())),
        Value::Boolean(b) => b.map(|b| my::Value::Int(b as i64)),
        Value::DateTime(dt) => match dt {
            Some(dt) => Some(my::Value::Date(
                u16::try_from(dt.year())?,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                dt.nanosecond() / 1_000,
            )),
            None => None,
        },
        Value::Date(d) => match d {
            Some(d) => Some(my::Value::Date(
                u16::try_from(d.year())?,
                d.month() as u8,
                d.day() as u8,
                0,
                0,
                0,
                0,
            )),
            None => None,
        },
    };

    Ok(res.unwrap_or(my::Value::NULL))
}

/// Converts a driver row into values, in column order.
pub(crate) fn take_row(mut row: my::Row) -> crate::Result<Vec<Value<'static>>> {
    let column_types: Vec<ColumnType> = row.columns_ref().iter().map(|c| c.column_type()).collect();
    let mut values = Vec::with_capacity(row.len());

    for (i, column_type) in column_types.into_iter().enumerate() {
        let value = row.take::<my::Value, _>(i).unwrap_or(my::Value::NULL);
        values.push(from_mysql_value(value, column_type)?);
    }

    Ok(values)
}

fn from_mysql_value(value: my::Value, column_type: ColumnType) -> crate::Result<Value<'static>> {
    let res = match value {
        my::Value::NULL => typed_null(column_type),
        my::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Value::text(s),
            Err(e) => Value::bytes(e.into_bytes()),
        },
        my::Value::Int(i) => Value::integer(i),
        my::Value::UInt(u) => {
            let i = i64::try_from(u).map_err(|_| {
                let msg = format!("Unsigned integer {u} does not fit into a signed 64-bit integer.");
                Error::builder(ErrorKind::value_out_of_range(msg)).build()
            })?;

            Value::integer(i)
        }
        my::Value::Float(f) => Value::float(f64::from(f)),
        my::Value::Double(f) => Value::float(f),
        // MySQL zero dates have no calendar representation.
        my::Value::Date(0, 0, 0, _, _, _, _) => typed_null(column_type),
        my::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                .ok_or_else(|| invalid_date(year, month, day))?;

            if is_date_only(column_type) {
                Value::date(date)
            } else {
                let dt = date
                    .and_hms_micro_opt(u32::from(hour), u32::from(min), u32::from(sec), micro)
                    .ok_or_else(|| invalid_date(year, month, day))?;

                Value::datetime(dt)
            }
        }
        my::Value::Time(is_neg, days, hours, minutes, seconds, micros) => {
            let secs = f64::from(days) * 86_400.0
                + f64::from(hours) * 3_600.0
                + f64::from(minutes) * 60.0
                + f64::from(seconds)
                + f64::from(micros) * 1e-6;

            Value::float(if is_neg { -secs } else { secs })
        }
    };

    Ok(res)
}

fn typed_null(column_type: ColumnType) -> Value<'static> {
    use ColumnType::*;

    match column_type {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_INT24 | MYSQL_TYPE_LONGLONG
        | MYSQL_TYPE_YEAR => Value::Integer(None),
        MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => Value::Float(None),
        MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => Value::Date(None),
        MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2 | MYSQL_TYPE_TIMESTAMP | MYSQL_TYPE_TIMESTAMP2 => {
            Value::DateTime(None)
        }
        _ => Value::Text(None),
    }
}

fn is_date_only(column_type: ColumnType) -> bool {
    matches!(column_type, ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE)
}

fn invalid_date(year: u16, month: u8, day: u8) -> Error {
    let msg = format!("{year:04}-{month:02}-{day:02} is not a valid date.");
    Error::builder(ErrorKind::conversion(msg)).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn utf8_bytes_become_text() {
        let value = from_mysql_value(my::Value::Bytes(b"Musti".to_vec()), ColumnType::MYSQL_TYPE_VAR_STRING).unwrap();

        assert_eq!(Value::text("Musti"), value);
    }

    #[test]
    fn binary_bytes_stay_bytes() {
        let value = from_mysql_value(my::Value::Bytes(vec![0xff, 0x00]), ColumnType::MYSQL_TYPE_BLOB).unwrap();

        assert_eq!(Value::bytes(vec![0xff, 0x00]), value);
    }

    #[test]
    fn large_unsigned_integers_are_out_of_range() {
        let err = from_mysql_value(my::Value::UInt(u64::MAX), ColumnType::MYSQL_TYPE_LONGLONG).unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::ValueOutOfRange { .. }));
    }

    #[test]
    fn unsigned_integers_in_range() {
        let value = from_mysql_value(my::Value::UInt(42), ColumnType::MYSQL_TYPE_LONGLONG).unwrap();

        assert_eq!(Value::integer(42), value);
    }

    #[test]
    fn nulls_carry_the_column_type() {
        assert_eq!(
            Value::Integer(None),
            from_mysql_value(my::Value::NULL, ColumnType::MYSQL_TYPE_LONG).unwrap()
        );
        assert_eq!(
            Value::Text(None),
            from_mysql_value(my::Value::NULL, ColumnType::MYSQL_TYPE_VAR_STRING).unwrap()
        );
    }

    #[test]
    fn dates_and_datetimes() {
        let date = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();

        assert_eq!(
            Value::date(date),
            from_mysql_value(my::Value::Date(2020, 4, 1, 0, 0, 0, 0), ColumnType::MYSQL_TYPE_DATE).unwrap()
        );
        assert_eq!(
            Value::datetime(date.and_hms_micro_opt(12, 30, 5, 250).unwrap()),
            from_mysql_value(my::Value::Date(2020, 4, 1, 12, 30, 5, 250), ColumnType::MYSQL_TYPE_DATETIME).unwrap()
        );
        assert_eq!(
            Value::DateTime(None),
            from_mysql_value(my::Value::Date(0, 0, 0, 0, 0, 0, 0), ColumnType::MYSQL_TYPE_TIMESTAMP).unwrap()
        );
    }

    #[test]
    fn invalid_dates_fail() {
        let res = from_mysql_value(my::Value::Date(2020, 2, 31, 0, 0, 0, 0), ColumnType::MYSQL_TYPE_DATE);

        assert!(res.is_err());
    }

    #[test]
    fn params_are_positional() {
        let date = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let params = conv_params(&[Value::from(1), Value::from("a"), Value::from(true), Value::from(date), Value::Float(None)]).unwrap();

        assert_eq!(
            my::Params::Positional(vec![
                my::Value::Int(1),
                my::Value::Bytes(b"a".to_vec()),
                my::Value::Int(1),
                my::Value::Date(2020, 4, 1, 0, 0, 0, 0),
                my::Value::NULL,
            ]),
            params
        );
    }

    #[test]
    fn no_params_are_empty() {
        assert_eq!(my::Params::Empty, conv_params(&[]).unwrap());
    }
}
