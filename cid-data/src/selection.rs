use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Errors raised when a requested selection is not valid for the dataset.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SelectionError {
    #[error("unknown disease `{0}`")]
    UnknownDisease(String),
    #[error("year range {start}-{end} is inverted")]
    InvertedRange { start: i32, end: i32 },
    #[error("year range {start}-{end} lies outside the observed span {span_start}-{span_end}")]
    OutOfSpan {
        start: i32,
        end: i32,
        span_start: i32,
        span_end: i32,
    },
    #[error("no dataset is loaded")]
    NotLoaded,
}

/// An inclusive range of years, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that the range lies within `span`.
    pub fn within(self, span: &RangeInclusive<i32>) -> Result<Self, SelectionError> {
        if span.contains(&self.start) && span.contains(&self.end) {
            Ok(self)
        } else {
            Err(SelectionError::OutOfSpan {
                start: self.start,
                end: self.end,
                span_start: *span.start(),
                span_end: *span.end(),
            })
        }
    }

    /// Pull both ends into `span`, keeping `start <= end`.
    pub fn clamp_to(self, span: &RangeInclusive<i32>) -> Self {
        let (lo, hi) = (self.start.min(self.end), self.start.max(self.end));
        let start = lo.clamp(*span.start(), *span.end());
        let end = hi.clamp(*span.start(), *span.end());
        Self { start, end }
    }
}

/// The user's current filter: disease, county and year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// `None` until a dataset has been loaded.
    pub disease: Option<String>,
    pub county: String,
    pub years: YearRange,
}
