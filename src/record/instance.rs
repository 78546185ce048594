use super::shape::{RecordShape, Slot};
use crate::error::{Error, Result};
use crate::schema::FieldSchema;
use std::collections::BTreeMap;
use std::fmt;

/// A leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl Scalar {
    /// Wire text; numbers use Rust's locale independent formatting
    pub fn render(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Decimal(d) => d.to_string(),
            Scalar::Boolean(b) => b.to_string(),
        }
    }

    /// Only empty text counts as empty; `0` and `false` are real values
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Input for assignment: a scalar, or a mapping for a nested group
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Nested(BTreeMap<String, Value>),
}

impl Value {
    pub fn nested<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Nested(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Text(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Scalar(Scalar::Integer(i.into()))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Scalar(Scalar::Decimal(d))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Boolean(b))
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Nested(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Field {
        schema: FieldSchema,
        value: Option<Scalar>,
    },
    Group(RecordInstance),
}

impl Entry {
    fn is_empty(&self) -> bool {
        match self {
            Entry::Field { value, .. } => value.as_ref().is_none_or(Scalar::is_empty),
            Entry::Group(group) => group.is_empty(),
        }
    }
}

/// A record whose attribute set was fixed by its shape at construction.
///
/// Reading an unset attribute gives `None`; assigning an attribute the shape
/// did not declare fails and leaves the record as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInstance {
    type_name: String,
    entries: BTreeMap<String, Entry>,
}

impl RecordInstance {
    pub(crate) fn empty(shape: &RecordShape) -> Self {
        let entries = shape
            .slots()
            .map(|(key, slot)| {
                let entry = match slot {
                    Slot::Field(schema) => Entry::Field {
                        schema: schema.clone(),
                        value: None,
                    },
                    Slot::Group(nested) => Entry::Group(Self::empty(nested)),
                };
                (key.to_string(), entry)
            })
            .collect();

        Self {
            type_name: shape.name().to_string(),
            entries,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn declares(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Assign a scalar to a field, or merge a mapping into a nested group
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(key, &value)?;
        self.apply(key, value);
        Ok(())
    }

    /// Assign through a dotted path, e.g. `CONTACTINFO.EMAIL1`
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();
        let value = rest.into_iter().rev().fold(value.into(), |inner, segment| {
            Value::Nested(BTreeMap::from([(segment.to_string(), inner)]))
        });
        self.set(first, value)
    }

    /// Clear a field, or every field of a nested group
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(Entry::Field { value, .. }) => {
                *value = None;
                Ok(())
            }
            Some(Entry::Group(group)) => {
                let names: Vec<String> = group.entries.keys().cloned().collect();
                for name in names {
                    group.unset(&name)?;
                }
                Ok(())
            }
            None => Err(self.unknown(key)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        match self.entries.get(key)? {
            Entry::Field { value, .. } => value.as_ref(),
            Entry::Group(_) => None,
        }
    }

    pub fn get_path(&self, path: &str) -> Option<&Scalar> {
        match path.split_once('.') {
            Some((head, rest)) => self.group(head)?.get_path(rest),
            None => self.get(path),
        }
    }

    pub fn group(&self, key: &str) -> Option<&RecordInstance> {
        match self.entries.get(key)? {
            Entry::Group(group) => Some(group),
            Entry::Field { .. } => None,
        }
    }

    pub fn field_schema(&self, key: &str) -> Option<&FieldSchema> {
        match self.entries.get(key)? {
            Entry::Field { schema, .. } => Some(schema),
            Entry::Group(_) => None,
        }
    }

    /// True when no field below this record holds a non-empty value
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Entry::is_empty)
    }

    /// Dotted paths of required fields that are still unset
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();
        self.collect_missing("", &mut missing);
        missing
    }

    fn collect_missing(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, entry) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match entry {
                Entry::Field { schema, .. } if schema.required && entry.is_empty() => out.push(path),
                Entry::Field { .. } => {}
                Entry::Group(group) => group.collect_missing(&path, out),
            }
        }
    }

    pub(crate) fn is_entry_empty(&self, key: &str) -> bool {
        self.entries.get(key).is_none_or(Entry::is_empty)
    }

    fn unknown(&self, key: &str) -> Error {
        Error::UnknownField {
            record_type: self.type_name.clone(),
            field: key.to_string(),
        }
    }

    /// Validate a whole assignment before anything is written
    fn check(&self, key: &str, value: &Value) -> Result<()> {
        let entry = self.entries.get(key).ok_or_else(|| self.unknown(key))?;
        match (entry, value) {
            (Entry::Field { schema, .. }, Value::Scalar(scalar)) => {
                check_scalar(&self.type_name, schema, scalar)
            }
            (Entry::Field { .. }, Value::Nested(_)) => Err(Error::validation(format!(
                "'{}' on '{}' is a field, not a nested group",
                key, self.type_name
            ))),
            (Entry::Group(group), Value::Nested(values)) => values
                .iter()
                .try_for_each(|(k, v)| group.check(k, v)),
            (Entry::Group(_), Value::Scalar(_)) => Err(Error::validation(format!(
                "'{}' on '{}' is a nested group and needs a mapping of its fields",
                key, self.type_name
            ))),
        }
    }

    fn apply(&mut self, key: &str, value: Value) {
        match (self.entries.get_mut(key), value) {
            (Some(Entry::Field { value: slot, .. }), Value::Scalar(scalar)) => *slot = Some(scalar),
            (Some(Entry::Group(group)), Value::Nested(values)) => {
                for (k, v) in values {
                    group.apply(&k, v);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, EntryRef<'_>)> {
        self.entries.iter().map(|(k, e)| {
            let entry = match e {
                Entry::Field { value, .. } => EntryRef::Field(value.as_ref()),
                Entry::Group(group) => EntryRef::Group(group),
            };
            (k.as_str(), entry)
        })
    }
}

/// Borrowed view of one attribute, for serialization
pub(crate) enum EntryRef<'a> {
    Field(Option<&'a Scalar>),
    Group(&'a RecordInstance),
}

fn check_scalar(type_name: &str, schema: &FieldSchema, scalar: &Scalar) -> Result<()> {
    match scalar {
        Scalar::Text(text) if schema.max_length > 0 && text.chars().count() > schema.max_length => {
            Err(Error::validation(format!(
                "value for '{}' on '{}' exceeds maxLength {}",
                schema.name, type_name, schema.max_length
            )))
        }
        Scalar::Decimal(d) if !d.is_finite() => Err(Error::validation(format!(
            "value for '{}' on '{}' is not a finite number",
            schema.name, type_name
        ))),
        _ => Ok(()),
    }
}
