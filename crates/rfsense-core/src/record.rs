//! Structured decoder output.
//!
//! A record is an ordered list of fields. Each field carries a key, a human
//! label and an optional printf-style display hint for renderers that want
//! them; JSON output only uses keys and values, in emission order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Typed field value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
}

/// One named value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub format: Option<&'static str>,
    pub value: FieldValue,
}

/// One decoded message.
///
/// # Examples
/// ```
/// use rfsense_core::{FieldValue, Record};
///
/// let record = Record::new()
///     .string("model", "", "Test Sensor")
///     .int("id", "House Code", 75)
///     .float_with_format("temperature_C", "Temperature", "%.01f C", 21.5);
/// assert_eq!(record.keys().collect::<Vec<_>>(), ["model", "id", "temperature_C"]);
/// assert_eq!(record.get("id"), Some(&FieldValue::Int(75)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(self, key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        self.push(key, label, None, FieldValue::String(value.into()))
    }

    pub fn int(self, key: &'static str, label: &'static str, value: impl Into<i64>) -> Self {
        self.push(key, label, None, FieldValue::Int(value.into()))
    }

    pub fn int_with_format(
        self,
        key: &'static str,
        label: &'static str,
        format: &'static str,
        value: impl Into<i64>,
    ) -> Self {
        self.push(key, label, Some(format), FieldValue::Int(value.into()))
    }

    pub fn float_with_format(
        self,
        key: &'static str,
        label: &'static str,
        format: &'static str,
        value: f64,
    ) -> Self {
        self.push(key, label, Some(format), FieldValue::Float(value))
    }

    fn push(
        mut self,
        key: &'static str,
        label: &'static str,
        format: Option<&'static str>,
        value: FieldValue,
    ) -> Self {
        self.fields.push(Field {
            key,
            label,
            format,
            value,
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.key, &field.value)?;
        }
        map.end()
    }
}

/// Destination for records emitted by decoders.
pub trait RecordSink {
    fn emit(&mut self, record: Record);
}

impl RecordSink for Vec<Record> {
    fn emit(&mut self, record: Record) {
        self.push(record);
    }
}
