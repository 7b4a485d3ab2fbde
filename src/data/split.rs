//! Split selection expressions
//!
//! A split expression names a subset of a source dataset: a `+`-union of
//! per-split half-open index slices, written in the TFDS slicing notation
//! (`train`, `train[:7830]`, `train[7830:79168]`, `train[79168:]`,
//! `train+validation`). Expressions parse from and display as that notation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::source::TfdsSource;

/// Errors from parsing split expressions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// Expression or one of its terms is empty
    #[error("Empty split expression")]
    Empty,

    /// Slice brackets are malformed
    #[error("Invalid slice syntax in split term: {0}")]
    InvalidSlice(String),

    /// Slice bound is not a number
    #[error("Invalid slice bound in split term {term}: {bound}")]
    InvalidBound { term: String, bound: String },

    /// Slice start is at or past its end
    #[error("Empty slice range in split term: {0}")]
    EmptyRange(String),
}

/// A half-open slice of one named source split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSlice {
    /// Name of the source split being sliced
    pub split: String,
    /// Inclusive start index (None = from the beginning)
    pub start: Option<usize>,
    /// Exclusive end index (None = to the end)
    pub end: Option<usize>,
}

impl SplitSlice {
    /// The whole named split, unsliced
    #[must_use]
    pub fn full(split: impl Into<String>) -> Self {
        Self {
            split: split.into(),
            start: None,
            end: None,
        }
    }

    /// Whether this slice covers the whole split
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Number of examples selected, given the declared size of the source
    /// split (None when the size is needed but not declared). A bounded end
    /// past the declared size is clamped to it.
    #[must_use]
    pub fn num_examples(&self, split_size: Option<usize>) -> Option<usize> {
        let clamp = |end: usize| split_size.map_or(end, |size| end.min(size));
        match (self.start, self.end) {
            (None, Some(end)) => Some(clamp(end)),
            (Some(start), Some(end)) => Some(clamp(end).saturating_sub(start)),
            (start, None) => {
                let size = split_size?;
                Some(size.saturating_sub(start.unwrap_or(0)))
            }
        }
    }

    fn parse(term: &str) -> Result<Self, SplitError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SplitError::Empty);
        }
        let Some(open) = term.find('[') else {
            if term.contains(']') {
                return Err(SplitError::InvalidSlice(term.into()));
            }
            return Ok(Self::full(term));
        };
        if !term.ends_with(']') {
            return Err(SplitError::InvalidSlice(term.into()));
        }
        let split = &term[..open];
        if split.is_empty() {
            return Err(SplitError::InvalidSlice(term.into()));
        }
        let inner = &term[open + 1..term.len() - 1];
        let Some((lo, hi)) = inner.split_once(':') else {
            return Err(SplitError::InvalidSlice(term.into()));
        };
        let parse_bound = |bound: &str| -> Result<Option<usize>, SplitError> {
            let bound = bound.trim();
            if bound.is_empty() {
                return Ok(None);
            }
            bound
                .parse::<usize>()
                .map(Some)
                .map_err(|_| SplitError::InvalidBound {
                    term: term.into(),
                    bound: bound.into(),
                })
        };
        let slice = Self {
            split: split.into(),
            start: parse_bound(lo)?,
            end: parse_bound(hi)?,
        };
        if let (Some(start), Some(end)) = (slice.start, slice.end) {
            if start >= end {
                return Err(SplitError::EmptyRange(term.into()));
            }
        }
        Ok(slice)
    }
}

impl std::fmt::Display for SplitSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.split)?;
        if !self.is_full() {
            write!(f, "[")?;
            if let Some(start) = self.start {
                write!(f, "{start}")?;
            }
            write!(f, ":")?;
            if let Some(end) = self.end {
                write!(f, "{end}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// A union of split slices over one source dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitExpr {
    slices: Vec<SplitSlice>,
}

impl SplitExpr {
    /// Expression selecting the whole named split
    #[must_use]
    pub fn full(split: impl Into<String>) -> Self {
        Self {
            slices: vec![SplitSlice::full(split)],
        }
    }

    /// Expression from explicit slices
    #[must_use]
    pub fn union(slices: Vec<SplitSlice>) -> Self {
        Self { slices }
    }

    /// The slices this expression unions
    #[must_use]
    pub fn slices(&self) -> &[SplitSlice] {
        &self.slices
    }

    /// Exact number of examples selected against a source's declared split
    /// sizes, or None when some slice needs a size the source does not
    /// declare.
    #[must_use]
    pub fn num_examples(&self, source: &TfdsSource) -> Option<usize> {
        self.slices
            .iter()
            .map(|slice| slice.num_examples(source.split_size(&slice.split)))
            .sum()
    }
}

impl std::str::FromStr for SplitExpr {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(SplitError::Empty);
        }
        let slices = s
            .split('+')
            .map(SplitSlice::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slices })
    }
}

impl std::fmt::Display for SplitExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, slice) in self.slices.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{slice}")?;
        }
        Ok(())
    }
}
