//! Raw GNSS Logger records
use std::collections::HashMap;

use crate::{
    constants::GPS_L1_FREQUENCY_HZ,
    constellation::ConstellationType,
    error::Error,
    state::{AdrState, SyncState},
};

/// Fields that are integer counters or bitmasks
const INTEGER_FIELDS: [&str; 5] = [
    "AccumulatedDeltaRangeState",
    "ConstellationType",
    "MultipathIndicator",
    "State",
    "Svid",
];

/// 64 bit nanosecond counters, which do not fit in a f64 mantissa
const NANOS_FIELDS: [&str; 2] = ["TimeNanos", "FullBiasNanos"];

/// Typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    /// Content we could not convert (empty fields, mostly)
    Text(String),
}

impl Value {
    /// Converts a field, depending on its name. Content that cannot
    /// be converted is kept as is.
    pub fn parse(name: &str, content: &str) -> Self {
        let content = content.trim();

        if INTEGER_FIELDS.contains(&name) || NANOS_FIELDS.contains(&name) {
            if let Ok(value) = content.parse::<i64>() {
                return Self::Int(value);
            }
        }

        match content.parse::<f64>() {
            Ok(value) => Self::Float(value),
            Err(_) => Self::Text(content.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

/// One `Raw` record: one signal, tracked at one receiver time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMeasurement {
    fields: HashMap<String, Value>,
}

impl RawMeasurement {
    /// Builds a [RawMeasurement] from field names and their content.
    pub fn new<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, content)| (name.to_string(), Value::parse(name, content)))
                .collect(),
        }
    }

    /// Copies and returns [RawMeasurement] with updated field
    pub fn with_field(&self, name: &str, value: Value) -> Self {
        let mut s = self.clone();
        s.fields.insert(name.to_string(), value);
        s
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn value(&self, name: &'static str) -> Result<&Value, Error> {
        self.fields.get(name).ok_or(Error::MissingField(name))
    }

    /// Returns float value of this field
    pub fn float(&self, name: &'static str) -> Result<f64, Error> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| Error::InvalidField {
            field: name,
            value: value.to_string(),
        })
    }

    /// Returns float value of this field, or `default` when
    /// missing or not a number.
    pub fn float_or(&self, name: &'static str, default: f64) -> f64 {
        self.fields
            .get(name)
            .and_then(|value| value.as_f64())
            .unwrap_or(default)
    }

    /// Returns integer value of this field
    pub fn integer(&self, name: &'static str) -> Result<i64, Error> {
        let value = self.value(name)?;
        value.as_i64().ok_or_else(|| Error::InvalidField {
            field: name,
            value: value.to_string(),
        })
    }

    /// Receiver clock, in nanoseconds. Shared by all measurements of a batch.
    pub fn time_nanos(&self) -> Result<i64, Error> {
        self.integer("TimeNanos")
    }

    pub fn full_bias_nanos(&self) -> Result<i64, Error> {
        let value = self.value("FullBiasNanos")?;
        match value {
            Value::Int(value) => Ok(*value),
            Value::Float(value) => Ok(value.round() as i64),
            Value::Text(_) => Err(Error::InvalidField {
                field: "FullBiasNanos",
                value: value.to_string(),
            }),
        }
    }

    pub fn constellation(&self) -> Result<ConstellationType, Error> {
        ConstellationType::from_code(self.integer("ConstellationType")?)
    }

    pub fn svid(&self) -> Result<i64, Error> {
        self.integer("Svid")
    }

    pub fn state(&self) -> Result<SyncState, Error> {
        Ok(SyncState::from_bits_retain(self.integer("State")? as u32))
    }

    pub fn adr_state(&self) -> Result<AdrState, Error> {
        Ok(AdrState::from_bits_retain(
            self.integer("AccumulatedDeltaRangeState")? as u32,
        ))
    }

    /// Carrier frequency [Hz]. Older loggers leave this field empty:
    /// GPS L1 is assumed in that case.
    pub fn carrier_frequency(&self) -> Result<f64, Error> {
        match self.fields.get("CarrierFrequencyHz") {
            None => Ok(GPS_L1_FREQUENCY_HZ),
            Some(Value::Text(text)) if text.is_empty() => Ok(GPS_L1_FREQUENCY_HZ),
            Some(_) => self.float("CarrierFrequencyHz"),
        }
    }
}
