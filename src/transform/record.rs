//! Row transformation.
//!
//! A raw record is five positional fields:
//! `identifier, first name, primary email, secondary email, profession`.
//! The transformation keeps the identifier and profession, reduces the first
//! name to its uppercased initial and joins both emails with `"; "`.

use csv::StringRecord;
use serde::Serialize;

use crate::config::{EMAIL_SEPARATOR, RAW_RECORD_FIELDS};
use crate::error_handling::EtlError;

/// One input row, fields kept in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    /// Creates a record from positional fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Positional fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&StringRecord> for RawRecord {
    fn from(record: &StringRecord) -> Self {
        Self::new(record.iter())
    }
}

impl From<StringRecord> for RawRecord {
    fn from(record: StringRecord) -> Self {
        Self::from(&record)
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedRecord {
    /// Identifier, passed through
    pub identifier: String,
    /// Uppercased first character of the first name
    pub initial: String,
    /// `"<email1>; <email2>"`
    pub combined_email: String,
    /// Profession, passed through
    pub profession: String,
}

impl TransformedRecord {
    /// Output fields in column order.
    pub fn as_fields(&self) -> [&str; 4] {
        [
            &self.identifier,
            &self.initial,
            &self.combined_email,
            &self.profession,
        ]
    }
}

/// Transforms one raw record.
///
/// `line` only feeds the error message; the output never depends on it.
///
/// # Errors
///
/// Returns [`EtlError::MalformedRecord`] when the record has fewer than five fields.
pub fn transform_record(record: &RawRecord, line: usize) -> Result<TransformedRecord, EtlError> {
    let [identifier, first_name, email1, email2, profession, ..] = record.fields() else {
        return Err(EtlError::MalformedRecord {
            line,
            expected: RAW_RECORD_FIELDS,
            found: record.len(),
        });
    };

    let initial: String = first_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();

    Ok(TransformedRecord {
        identifier: identifier.clone(),
        initial,
        combined_email: format!("{email1}{EMAIL_SEPARATOR}{email2}"),
        profession: profession.clone(),
    })
}
