//! Category encoders
//!
//! Deterministic bijection between a finite vocabulary of raw category
//! values and dense integer codes. The vocabulary is kept sorted and
//! deduplicated, so the code of a value is its position in that order and
//! lookups are a binary search.

use crate::errors::{FareError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Fitted vocabulary for one categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder<T> {
    /// Column this encoder was fitted on (used in error messages)
    column: String,
    /// Sorted, unique category values; index == code
    classes: Vec<T>,
}

impl<T> CategoryEncoder<T>
where
    T: Ord + Clone + Display,
{
    /// Fit an encoder on the observed values of `column`.
    ///
    /// Codes `0..k-1` are assigned in sorted order of the distinct values,
    /// so the mapping only depends on the set of values seen.
    pub fn fit<I>(column: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let column = column.into();
        let mut classes: Vec<T> = values.into_iter().collect();
        classes.sort();
        classes.dedup();

        if classes.is_empty() {
            return Err(FareError::EmptyVocabulary { column });
        }

        Ok(Self { column, classes })
    }

    /// Rebuild an encoder from a persisted vocabulary.
    pub fn from_vocabulary(column: impl Into<String>, classes: Vec<T>) -> Result<Self> {
        let encoder = Self {
            column: column.into(),
            classes,
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Check the vocabulary is non-empty, sorted and free of duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(FareError::CorruptBundle(format!(
                "vocabulary for column '{}' is empty",
                self.column
            )));
        }

        if let Some(pair) = self.classes.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(FareError::CorruptBundle(format!(
                "vocabulary for column '{}' is not strictly sorted near {}",
                self.column, pair[1]
            )));
        }

        Ok(())
    }

    /// Integer code for `value`
    pub fn encode(&self, value: &T) -> Result<usize> {
        self.classes
            .binary_search(value)
            .map_err(|_| FareError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    /// Encode a batch, failing on the first unknown value
    pub fn encode_all<'a, I>(&self, values: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values.into_iter().map(|value| self.encode(value)).collect()
    }

    /// Raw value for `code`
    pub fn decode(&self, code: usize) -> Result<&T> {
        self.classes.get(code).ok_or_else(|| FareError::InvalidCode {
            column: self.column.clone(),
            code,
            size: self.classes.len(),
        })
    }
}

impl<T> CategoryEncoder<T> {
    /// Known values in code order
    pub fn vocabulary(&self) -> &[T] {
        &self.classes
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
