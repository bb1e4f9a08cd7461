//! Dynamically typed values for tables keyed by loosely structured data.
//!
//! `Value` is the shape the default hash and equality are designed around:
//! two values built independently with the same content are the same key,
//! regardless of the order their record fields were added in.

use crate::sentinel::Sentinel;
use crate::structural::{
    hash_number, hash_record, hash_sequence, hash_str, Structural, ABSENT_HASH, NULL_HASH,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value; never storable as a key or value.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Record),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    Regex(RegexValue),
}

/// A structured record: a concrete kind plus named fields.
///
/// Records of different kinds never compare equal, even with identical
/// fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: String,
    fields: BTreeMap<String, Value>,
}

pub const DEFAULT_RECORD_KIND: &str = "Object";

impl Record {
    pub fn new() -> Self {
        Self::of_kind(DEFAULT_RECORD_KIND)
    }

    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// A regular expression compared by pattern and flags, never by matching
/// behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegexValue {
    pub source: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub last_index: usize,
}

impl RegexValue {
    /// `flags` understands `g`, `i` and `m`; other characters are ignored.
    pub fn new(source: impl Into<String>, flags: &str) -> Self {
        Self {
            source: source.into(),
            global: flags.contains('g'),
            ignore_case: flags.contains('i'),
            multiline: flags.contains('m'),
            last_index: 0,
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Sentinel for Value {
    fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

impl Structural for Record {
    fn structural_hash(&self) -> u32 {
        hash_record(self.fields().map(|(k, v)| (k, v.structural_hash())))
    }

    fn structural_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.kind == other.kind
                && self.fields.len() == other.fields.len()
                && self.fields.iter().all(|(k, v)| {
                    other
                        .fields
                        .get(k)
                        .is_some_and(|o| v.structural_eq(o))
                }))
    }
}

impl Structural for Value {
    fn structural_hash(&self) -> u32 {
        match self {
            Value::Undefined => ABSENT_HASH,
            Value::Null => NULL_HASH,
            Value::Bool(b) => u32::from(*b),
            Value::Number(n) => hash_number(*n),
            Value::String(s) => hash_str(s),
            Value::Array(items) => hash_sequence(items.iter().map(Structural::structural_hash)),
            Value::Object(record) => record.structural_hash(),
            Value::Date(ms) => hash_record([("time", ms.structural_hash())]),
            Value::Regex(re) => hash_record([
                ("source", hash_str(&re.source)),
                ("global", u32::from(re.global)),
                ("ignoreCase", u32::from(re.ignore_case)),
                ("multiline", u32::from(re.multiline)),
                ("lastIndex", re.last_index.structural_hash()),
            ]),
        }
    }

    fn structural_eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.as_slice().structural_eq(b.as_slice()),
            (Value::Object(a), Value::Object(b)) => a.structural_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Object(r)
    }
}

impl From<RegexValue> for Value {
    fn from(r: RegexValue) -> Self {
        Value::Regex(r)
    }
}
