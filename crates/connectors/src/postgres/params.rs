use bytes::BytesMut;
use chrono::NaiveTime;
use model::core::value::Value;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::error::Error;
use tokio_postgres::types::{IsNull, Json as PgJson, ToSql, Type, to_sql_checked};

type BoxError = Box<dyn Error + Sync + Send>;

/// A bound parameter.
///
/// Postgres infers a type for every placeholder from the surrounding
/// expression (`int4` for `"age" = $1`, `timestamp` for a `BETWEEN` on a
/// timestamp column). The wrapper encodes its `Value` as that type instead of
/// insisting on the Rust type it happens to hold.
#[derive(Debug)]
pub struct PgParam(Value);

impl PgParam {
    pub fn from_value(value: Value) -> Self {
        PgParam(value)
    }
}

impl ToSql for PgParam {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        match &self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Int(v) => int_to_sql(*v, ty, out),
            Value::Float(v) => float_to_sql(*v, ty, out),
            Value::Boolean(v) if is_text(ty) => v.to_string().to_sql_checked(ty, out),
            Value::Boolean(v) => v.to_sql_checked(ty, out),
            Value::String(v) => text_to_sql(v, ty, out),
            Value::Json(v) => PgJson(v).to_sql_checked(ty, out),
            Value::Date(v) => {
                if *ty == Type::TIMESTAMP {
                    v.and_time(NaiveTime::MIN).to_sql_checked(ty, out)
                } else if *ty == Type::TIMESTAMPTZ {
                    v.and_time(NaiveTime::MIN).and_utc().to_sql_checked(ty, out)
                } else if is_text(ty) {
                    v.to_string().to_sql_checked(ty, out)
                } else {
                    v.to_sql_checked(ty, out)
                }
            }
            Value::Timestamp(v) => {
                if *ty == Type::DATE {
                    v.date().to_sql_checked(ty, out)
                } else if *ty == Type::TIMESTAMPTZ {
                    v.and_utc().to_sql_checked(ty, out)
                } else if is_text(ty) {
                    v.format("%Y-%m-%d %H:%M:%S").to_string().to_sql_checked(ty, out)
                } else {
                    v.to_sql_checked(ty, out)
                }
            }
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

fn is_text(ty: &Type) -> bool {
    <String as ToSql>::accepts(ty)
}

fn int_to_sql(v: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    if *ty == Type::INT2 {
        i16::try_from(v)?.to_sql_checked(ty, out)
    } else if *ty == Type::INT4 {
        i32::try_from(v)?.to_sql_checked(ty, out)
    } else if *ty == Type::FLOAT4 {
        (v as f32).to_sql_checked(ty, out)
    } else if *ty == Type::FLOAT8 {
        (v as f64).to_sql_checked(ty, out)
    } else if *ty == Type::NUMERIC {
        Decimal::from(v).to_sql_checked(ty, out)
    } else if is_text(ty) {
        v.to_string().to_sql_checked(ty, out)
    } else {
        v.to_sql_checked(ty, out)
    }
}

fn float_to_sql(v: f64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    if *ty == Type::FLOAT4 {
        (v as f32).to_sql_checked(ty, out)
    } else if *ty == Type::NUMERIC {
        Decimal::from_f64(v)
            .ok_or_else(|| format!("{v} does not fit a numeric"))?
            .to_sql_checked(ty, out)
    } else if [Type::INT2, Type::INT4, Type::INT8].contains(ty) {
        if v.fract() != 0.0 {
            return Err(format!("{v} is not a whole number, cannot bind it as {ty}").into());
        }
        int_to_sql(v as i64, ty, out)
    } else if is_text(ty) {
        v.to_string().to_sql_checked(ty, out)
    } else {
        v.to_sql_checked(ty, out)
    }
}

fn text_to_sql(v: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    if is_text(ty) {
        return v.to_sql_checked(ty, out);
    }
    if [Type::INT2, Type::INT4, Type::INT8].contains(ty) {
        return int_to_sql(v.trim().parse()?, ty, out);
    }
    if [Type::FLOAT4, Type::FLOAT8, Type::NUMERIC].contains(ty) {
        return float_to_sql(v.trim().parse()?, ty, out);
    }
    if *ty == Type::BOOL {
        let flag = Value::String(v.to_string())
            .as_bool()
            .ok_or_else(|| format!("'{v}' is not a boolean"))?;
        return flag.to_sql_checked(ty, out);
    }
    v.to_sql_checked(ty, out)
}

/// Owns the parameters of one statement and lends them to the driver.
pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            params: values.iter().cloned().map(PgParam::from_value).collect(),
        }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn encode(value: Value, ty: &Type) -> Result<Vec<u8>, BoxError> {
        let mut out = BytesMut::new();
        PgParam::from_value(value).to_sql_checked(ty, &mut out)?;
        Ok(out.to_vec())
    }

    #[test]
    fn test_int_narrows_to_inferred_width() {
        assert_eq!(encode(Value::Int(5), &Type::INT4).unwrap(), vec![0, 0, 0, 5]);
        assert_eq!(encode(Value::Int(5), &Type::INT2).unwrap(), vec![0, 5]);
        assert_eq!(encode(Value::Int(5), &Type::INT8).unwrap().len(), 8);
        assert!(encode(Value::Int(i64::MAX), &Type::INT4).is_err());
    }

    #[test]
    fn test_float_into_integer_column() {
        assert_eq!(encode(Value::Float(3.0), &Type::INT4).unwrap(), vec![0, 0, 0, 3]);
        assert!(encode(Value::Float(3.5), &Type::INT4).is_err());
        assert!(encode(Value::Float(3.5), &Type::NUMERIC).is_ok());
    }

    #[test]
    fn test_dates_follow_the_column() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(encode(Value::Date(date), &Type::DATE).unwrap().len(), 4);
        assert_eq!(encode(Value::Date(date), &Type::TIMESTAMP).unwrap().len(), 8);
        let end_of_day = date.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(
            encode(Value::Timestamp(end_of_day), &Type::DATE).unwrap(),
            encode(Value::Date(date), &Type::DATE).unwrap()
        );
    }

    #[test]
    fn test_text_parsed_for_typed_columns() {
        assert_eq!(
            encode(Value::String(" 42 ".into()), &Type::INT4).unwrap(),
            vec![0, 0, 0, 42]
        );
        assert_eq!(encode(Value::String("true".into()), &Type::BOOL).unwrap(), vec![1]);
        assert!(encode(Value::String("abc".into()), &Type::INT8).is_err());
        assert_eq!(encode(Value::String("abc".into()), &Type::TEXT).unwrap(), b"abc");
    }

    #[test]
    fn test_null_writes_nothing() {
        let mut out = BytesMut::new();
        let is_null = PgParam::from_value(Value::Null)
            .to_sql_checked(&Type::INT4, &mut out)
            .unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(out.is_empty());
    }

    #[test]
    fn test_store_keeps_order() {
        let store = PgParamStore::from_values(&[Value::Int(1), Value::String("a".into())]);
        assert_eq!(store.as_refs().len(), 2);
    }
}
