//! Diary view of an entry
//!
//! A diary database is expected to carry a date property and a numeric word
//! count property. Their names are configured per database; [`DiaryPage`]
//! projects an [`Entry`] through them.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, PropertyValue};
use super::errors::DomainError;
use super::newtypes::PageId;

/// Date and word count of one diary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryPage {
    /// The page this view was built from
    pub id: PageId,
    /// Start of the date property; empty when the date is unset
    pub date: String,
    /// Value of the word count property; 0 when unset
    pub word_count: u64,
}

impl DiaryPage {
    /// Builds the diary view of `entry`.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingField`] if either property is absent and
    /// [`DomainError::FieldTypeMismatch`] if the date field is not a `date`
    /// or the word count field is not a `number`.
    pub fn from_entry(
        entry: &Entry,
        date_field: &str,
        word_count_field: &str,
    ) -> Result<Self, DomainError> {
        let date = match Self::field(entry, date_field)? {
            PropertyValue::Date(range) => range
                .as_ref()
                .map(|r| r.start.clone())
                .unwrap_or_default(),
            other => return Err(Self::mismatch(entry, date_field, "date", other)),
        };

        let word_count = match Self::field(entry, word_count_field)? {
            // Float to int casts saturate, so negative or NaN counts become 0
            PropertyValue::Number(n) => n.map(|n| n.round() as u64).unwrap_or(0),
            other => return Err(Self::mismatch(entry, word_count_field, "number", other)),
        };

        Ok(Self {
            id: entry.id().clone(),
            date,
            word_count,
        })
    }

    fn field<'a>(entry: &'a Entry, name: &str) -> Result<&'a PropertyValue, DomainError> {
        entry.property(name).ok_or_else(|| DomainError::MissingField {
            entry: entry.id().to_string(),
            field: name.to_string(),
        })
    }

    fn mismatch(entry: &Entry, field: &str, expected: &str, actual: &PropertyValue) -> DomainError {
        DomainError::FieldTypeMismatch {
            entry: entry.id().to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.kind().to_string(),
        }
    }
}
