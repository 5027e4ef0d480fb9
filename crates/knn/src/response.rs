//! Response vectors and their category universe.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::KnnError;

/// Whether a response vector holds categories or real values.
///
/// Selects the default aggregation method: majority vote for categorical
/// responses, mean for continuous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// Labels drawn from a fixed category universe.
    Categorical,
    /// Real-valued responses.
    Continuous,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::Categorical => f.write_str("categorical"),
            ResponseKind::Continuous => f.write_str("continuous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Data {
    Categorical {
        /// Position of each label in `levels`.
        codes: Vec<usize>,
        levels: Vec<String>,
    },
    Continuous(Vec<f64>),
}

/// A response value per case, tagged with its [`ResponseKind`].
///
/// The length is either the full dataset size (indexed by dataset row) or the
/// train set size (aligned with the ascending train indices).
///
/// For categorical responses the category universe is fixed at construction:
/// it never shrinks when a train subset omits a category, so every probability
/// row covers all of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Responses {
    data: Data,
}

/// Responses restricted to the train set, in ascending train order.
#[derive(Debug, Clone)]
pub(crate) enum Aligned {
    Codes(Vec<usize>),
    Values(Vec<f64>),
}

impl Responses {
    /// Creates categorical responses. The universe is the sorted set of distinct labels.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyResponses`] if `labels` is empty.
    pub fn categorical<S: AsRef<str>>(labels: &[S]) -> Result<Self, KnnError> {
        if labels.is_empty() {
            return Err(KnnError::EmptyResponses);
        }
        let levels: Vec<String> = labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self::categorical_with_levels(labels, &levels)
    }

    /// Creates categorical responses over an explicit, ordered category universe.
    ///
    /// Categories in `levels` need not occur in `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyResponses`] if `labels` is empty,
    /// [`KnnError::DuplicateCategory`] if `levels` repeats a label and
    /// [`KnnError::UnknownCategory`] if a label is missing from `levels`.
    pub fn categorical_with_levels<S, L>(labels: &[S], levels: &[L]) -> Result<Self, KnnError>
    where
        S: AsRef<str>,
        L: AsRef<str>,
    {
        if labels.is_empty() {
            return Err(KnnError::EmptyResponses);
        }

        let levels: Vec<String> = levels.iter().map(|l| l.as_ref().to_string()).collect();
        let mut seen = BTreeSet::new();
        for level in &levels {
            if !seen.insert(level.as_str()) {
                return Err(KnnError::DuplicateCategory {
                    label: level.clone(),
                });
            }
        }

        let codes = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                levels
                    .iter()
                    .position(|l| l == label)
                    .ok_or_else(|| KnnError::UnknownCategory {
                        label: label.to_string(),
                    })
            })
            .collect::<Result<Vec<usize>, KnnError>>()?;

        Ok(Self {
            data: Data::Categorical { codes, levels },
        })
    }

    /// Creates continuous responses.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyResponses`] if `values` is empty and
    /// [`KnnError::NonFiniteResponse`] on NaN or infinity.
    pub fn continuous(values: Vec<f64>) -> Result<Self, KnnError> {
        if values.is_empty() {
            return Err(KnnError::EmptyResponses);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(KnnError::NonFiniteResponse { index });
        }
        Ok(Self {
            data: Data::Continuous(values),
        })
    }

    /// Returns the response kind.
    pub fn kind(&self) -> ResponseKind {
        match self.data {
            Data::Categorical { .. } => ResponseKind::Categorical,
            Data::Continuous(_) => ResponseKind::Continuous,
        }
    }

    /// Returns the number of responses.
    pub fn len(&self) -> usize {
        match &self.data {
            Data::Categorical { codes, .. } => codes.len(),
            Data::Continuous(values) => values.len(),
        }
    }

    /// Returns `true` if there are no responses. Never true for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the category universe, or `None` for continuous responses.
    pub fn levels(&self) -> Option<&[String]> {
        match &self.data {
            Data::Categorical { levels, .. } => Some(levels),
            Data::Continuous(_) => None,
        }
    }

    /// Returns each response's position in [`levels`](Self::levels), or `None`
    /// for continuous responses.
    pub fn codes(&self) -> Option<&[usize]> {
        match &self.data {
            Data::Categorical { codes, .. } => Some(codes),
            Data::Continuous(_) => None,
        }
    }

    /// Returns the values of continuous responses, or `None` for categorical ones.
    pub fn values(&self) -> Option<&[f64]> {
        match &self.data {
            Data::Categorical { .. } => None,
            Data::Continuous(values) => Some(values),
        }
    }

    /// Restricts responses to the (sorted) train indices.
    ///
    /// A full-length vector is indexed by dataset row; a train-length vector is
    /// taken as already aligned. When both lengths coincide the two readings agree.
    pub(crate) fn align(&self, train: &[usize], n_cases: usize) -> Result<Aligned, KnnError> {
        let len = self.len();
        let full = if len == n_cases {
            true
        } else if len == train.len() {
            false
        } else {
            return Err(KnnError::ResponseLengthMismatch {
                len,
                n_cases,
                n_train: train.len(),
            });
        };

        Ok(match &self.data {
            Data::Categorical { codes, .. } if full => {
                Aligned::Codes(train.iter().map(|&i| codes[i]).collect())
            }
            Data::Categorical { codes, .. } => Aligned::Codes(codes.clone()),
            Data::Continuous(values) if full => {
                Aligned::Values(train.iter().map(|&i| values[i]).collect())
            }
            Data::Continuous(values) => Aligned::Values(values.clone()),
        })
    }
}
