//! # Record Codec
//!
//! Bidirectional mapping between typed records and the store's field-map
//! representation. Encoding is infallible and total: one entry per
//! declared field, semantic type preserved, zero and empty values written
//! out explicitly rather than elided. Decoding is where the suspicion
//! lives: every field is looked up by name and checked against the type
//! the schema declares, because the field map came from outside the
//! process and carries no guarantees of its own.
//!
//! ## Decode rules
//!
//! - A missing field fails with [`StoreError::FieldMissing`].
//! - A present field of the wrong runtime type fails with
//!   [`StoreError::FieldType`].
//! - Integer fields arrive as the store's generic `i64`; narrowing to
//!   the declared width (`i32` version, `u32` nonce) is checked, and a
//!   value that will not fit fails rather than wraps.
//! - The txid list must be a sequence whose every element is a string.
//!   One bad element fails the whole decode.
//! - Decode is all-or-nothing: on any failure the caller gets an error,
//!   never a partially populated record.
//!
//! This module is the only one that matches on [`FieldValue`] tags.

use crate::block::Block;
use crate::error::{StoreError, StoreResult};
use crate::fields::{FieldMap, FieldValue};
use crate::transaction::Transaction;

// ---------------------------------------------------------------------------
// Schema field names
// ---------------------------------------------------------------------------
// These are the on-store names. Changing one orphans every record already
// written under the old name.

const ID: &str = "id";
const VERSION: &str = "version";
const PREHASH: &str = "prehash";
const MERKLEROOT: &str = "merkleroot";
const TIMESTAMP: &str = "timestamp";
const LEVEL: &str = "level";
const NONCE: &str = "nonce";
const SIZE: &str = "size";
const TXCOUNT: &str = "txcount";
const TXID_LIST: &str = "txid_list";

const TXID: &str = "txid";
const OUTPUT: &str = "output";
const INPUT: &str = "input";
const AMOUNT: &str = "amount";
const SIGN: &str = "sign";
const PUBKEY: &str = "pubkey";

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Encode a record into the store's field-map representation.
pub trait ToFields {
    /// Produce one entry per declared field. Never omits a field.
    fn to_fields(&self) -> FieldMap;
}

/// Decode a record from the store's field-map representation.
pub trait FromFields: Sized {
    /// Validate presence and runtime type of every declared field and
    /// return the typed record, or the first error encountered.
    fn from_fields(fields: &FieldMap) -> StoreResult<Self>;
}

// ---------------------------------------------------------------------------
// Typed accessors
// ---------------------------------------------------------------------------
// Presence check, tag check, and width check for one field each. All
// decode impls funnel through these so the error shape is uniform.

fn get<'m>(fields: &'m FieldMap, field: &'static str) -> StoreResult<&'m FieldValue> {
    fields.get(field).ok_or(StoreError::FieldMissing { field })
}

fn type_error(field: &'static str, expected: &'static str, found: &FieldValue) -> StoreError {
    StoreError::FieldType {
        field,
        expected,
        found: found.type_name().to_string(),
    }
}

fn get_str(fields: &FieldMap, field: &'static str) -> StoreResult<String> {
    match get(fields, field)? {
        FieldValue::Str(s) => Ok(s.clone()),
        other => Err(type_error(field, "string", other)),
    }
}

fn get_i64(fields: &FieldMap, field: &'static str) -> StoreResult<i64> {
    match get(fields, field)? {
        FieldValue::Int(v) => Ok(*v),
        other => Err(type_error(field, "integer", other)),
    }
}

fn get_i32(fields: &FieldMap, field: &'static str) -> StoreResult<i32> {
    let wide = get_i64(fields, field)?;
    i32::try_from(wide).map_err(|_| StoreError::FieldType {
        field,
        expected: "32-bit integer",
        found: format!("integer {} out of range", wide),
    })
}

fn get_u32(fields: &FieldMap, field: &'static str) -> StoreResult<u32> {
    let wide = get_i64(fields, field)?;
    u32::try_from(wide).map_err(|_| StoreError::FieldType {
        field,
        expected: "unsigned 32-bit integer",
        found: format!("integer {} out of range", wide),
    })
}

fn get_f64(fields: &FieldMap, field: &'static str) -> StoreResult<f64> {
    match get(fields, field)? {
        FieldValue::Float(v) => Ok(*v),
        other => Err(type_error(field, "float", other)),
    }
}

fn get_str_list(fields: &FieldMap, field: &'static str) -> StoreResult<Vec<String>> {
    let items = match get(fields, field)? {
        FieldValue::List(items) => items,
        other => return Err(type_error(field, "list of strings", other)),
    };
    items
        .iter()
        .map(|item| match item {
            FieldValue::Str(s) => Ok(s.clone()),
            other => Err(type_error(field, "list of strings", other)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

impl ToFields for Block {
    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            (ID.to_string(), FieldValue::from(self.id.clone())),
            (VERSION.to_string(), FieldValue::from(self.version)),
            (PREHASH.to_string(), FieldValue::from(self.prehash.clone())),
            (
                MERKLEROOT.to_string(),
                FieldValue::from(self.merkleroot.clone()),
            ),
            (
                TIMESTAMP.to_string(),
                FieldValue::from(self.timestamp.clone()),
            ),
            (LEVEL.to_string(), FieldValue::from(self.level.clone())),
            (NONCE.to_string(), FieldValue::from(self.nonce)),
            (SIZE.to_string(), FieldValue::from(self.size)),
            (TXCOUNT.to_string(), FieldValue::from(self.txcount)),
            (
                TXID_LIST.to_string(),
                FieldValue::from(self.txid_list.as_slice()),
            ),
        ])
    }
}

impl FromFields for Block {
    fn from_fields(fields: &FieldMap) -> StoreResult<Self> {
        Ok(Block {
            id: get_str(fields, ID)?,
            version: get_i32(fields, VERSION)?,
            prehash: get_str(fields, PREHASH)?,
            merkleroot: get_str(fields, MERKLEROOT)?,
            timestamp: get_str(fields, TIMESTAMP)?,
            level: get_str(fields, LEVEL)?,
            nonce: get_u32(fields, NONCE)?,
            size: get_i64(fields, SIZE)?,
            txcount: get_i64(fields, TXCOUNT)?,
            txid_list: get_str_list(fields, TXID_LIST)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

impl ToFields for Transaction {
    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            (TXID.to_string(), FieldValue::from(self.txid.clone())),
            (OUTPUT.to_string(), FieldValue::from(self.output.clone())),
            (INPUT.to_string(), FieldValue::from(self.input.clone())),
            (AMOUNT.to_string(), FieldValue::from(self.amount)),
            (
                TIMESTAMP.to_string(),
                FieldValue::from(self.timestamp.clone()),
            ),
            (SIGN.to_string(), FieldValue::from(self.sign.clone())),
            (PUBKEY.to_string(), FieldValue::from(self.pubkey.clone())),
        ])
    }
}

impl FromFields for Transaction {
    fn from_fields(fields: &FieldMap) -> StoreResult<Self> {
        Ok(Transaction {
            txid: get_str(fields, TXID)?,
            output: get_str(fields, OUTPUT)?,
            input: get_str(fields, INPUT)?,
            amount: get_f64(fields, AMOUNT)?,
            timestamp: get_str(fields, TIMESTAMP)?,
            sign: get_str(fields, SIGN)?,
            pubkey: get_str(fields, PUBKEY)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
