use chrono::NaiveDateTime;
use model::core::value::Value;
use rust_decimal::Decimal as RustDecimal;
use std::str::FromStr;
use tokio_postgres::types::{ToSql, Type};

/// A bound parameter, already converted to the exact Rust type Postgres
/// expects for its placeholder.
pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Coerces a model value to the type the prepared statement declared.
    ///
    /// Values that cannot be represented in the target type keep their own
    /// natural type, so the driver reports the mismatch.
    pub fn for_type(value: Value, ty: &Type) -> Self {
        if value.is_null() {
            return PgParam::null(ty);
        }
        match *ty {
            Type::INT2 => match value.as_i64().and_then(|v| i16::try_from(v).ok()) {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::INT4 => match value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::INT8 => match value.as_i64() {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::FLOAT4 => match value.as_f64() {
                Some(v) => PgParam(Box::new(v as f32)),
                None => PgParam::from_value(value),
            },
            Type::FLOAT8 => match value.as_f64() {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::NUMERIC => match value
                .as_decimal()
                .and_then(|d| RustDecimal::from_str(&d.to_string()).ok())
            {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::TIMESTAMP => match value.as_naive_timestamp() {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            Type::TIMESTAMPTZ => match value.as_naive_timestamp() {
                Some(v) => PgParam(Box::new(v.and_utc())),
                None => PgParam::from_value(value),
            },
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => match value.as_string() {
                Some(v) => PgParam(Box::new(v)),
                None => PgParam::from_value(value),
            },
            _ => PgParam::from_value(value),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Uint(v) => PgParam(Box::new(v as i64)),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::Decimal(v) => match RustDecimal::from_str(&v.to_string()) {
                Ok(decimal) => PgParam(Box::new(decimal)),
                Err(_) => PgParam(Box::new(v.to_string())),
            },
            Value::String(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Date(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::TimestampNaive(v) => PgParam(Box::new(v)),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        }
    }

    fn null(ty: &Type) -> Self {
        match *ty {
            Type::INT2 => PgParam(Box::new(Option::<i16>::None)),
            Type::INT4 => PgParam(Box::new(Option::<i32>::None)),
            Type::INT8 => PgParam(Box::new(Option::<i64>::None)),
            Type::FLOAT4 => PgParam(Box::new(Option::<f32>::None)),
            Type::FLOAT8 => PgParam(Box::new(Option::<f64>::None)),
            Type::NUMERIC => PgParam(Box::new(Option::<RustDecimal>::None)),
            Type::TIMESTAMP => PgParam(Box::new(Option::<NaiveDateTime>::None)),
            Type::TIMESTAMPTZ => PgParam(Box::new(Option::<chrono::DateTime<chrono::Utc>>::None)),
            Type::BOOL => PgParam(Box::new(Option::<bool>::None)),
            _ => PgParam(Box::new(Option::<String>::None)),
        }
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Pairs values with the statement's declared parameter types.
    /// Extra values, if any, bind by their own type.
    pub fn for_types(values: Vec<Value>, types: &[Type]) -> Self {
        let params = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| match types.get(idx) {
                Some(ty) => PgParam::for_type(value, ty),
                None => PgParam::from_value(value),
            })
            .collect();
        Self { params }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|param| param.as_ref()).collect()
    }
}
