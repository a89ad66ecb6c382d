//! # The Field-Map Boundary
//!
//! A key-value store does not know about `Block` or `Transaction`. What
//! crosses the wire is a **field map**: record field names mapped to
//! loosely-typed values. This module defines that representation and
//! nothing else. Turning field maps back into typed records, including
//! deciding what to do with a value of the wrong shape, is the codec's
//! job ([`crate::codec`]); by convention that module is the only place
//! allowed to match on a [`FieldValue`] tag.
//!
//! The value union is deliberately wider than the record schemas need.
//! `List` holds arbitrary field values, not just strings, because the
//! store can hand back anything: a malformed sequence must be
//! *representable* here so it can be *rejected* at decode time, rather
//! than being unrepresentable and silently impossible to observe.
//!
//! Integers cross the boundary as `i64`, the widest integer the store's
//! numeric bin carries. Narrower record fields (an `i32` version, a
//! `u32` nonce) are widened on encode and checked on decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A record as the store sees it: field name → loosely-typed value.
///
/// `BTreeMap` keeps iteration (and debug output) in a stable order,
/// which makes test failures and log lines reproducible.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single loosely-typed value in a stored record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// UTF-8 string.
    Str(String),
    /// Generic integer, as wide as the store's numeric bin.
    Int(i64),
    /// IEEE 754 double.
    Float(f64),
    /// Ordered sequence. Elements are unconstrained here; schemas that
    /// require homogeneous lists enforce that in the codec.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Human-readable tag name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::List(_) => "list",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&[String]> for FieldValue {
    fn from(values: &[String]) -> Self {
        FieldValue::List(values.iter().map(|s| FieldValue::from(s.clone())).collect())
    }
}
