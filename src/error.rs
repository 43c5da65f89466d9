use ndarray::ShapeError;
use ndarray_linalg::error::LinalgError;
use std::fmt;

/// Coarse classification of a failed population analysis.
///
/// `Type` covers structural problems (wrong rank, non-finite entries, integer data that
/// can not be used as indices), `Value` covers everything that depends on the actual numbers
/// (square-ness, symmetry, normalization, index ranges, inconsistent shapes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Value,
}

#[derive(Debug, Clone)]
pub struct PopulationError {
    pub message: String,
    kind: ErrorKind,
}

impl PopulationError {
    pub fn type_error<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Type,
        }
    }

    pub fn value_error<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            kind: ErrorKind::Value,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_type_error(&self) -> bool {
        self.kind == ErrorKind::Type
    }

    pub fn is_value_error(&self) -> bool {
        self.kind == ErrorKind::Value
    }
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write! {f, "{}", self.message.as_str()}
    }
}

impl std::error::Error for PopulationError {}

impl From<ShapeError> for PopulationError {
    fn from(err: ShapeError) -> Self {
        Self::type_error(format!("Array has the wrong dimensionality: {}", err))
    }
}

impl From<LinalgError> for PopulationError {
    fn from(err: LinalgError) -> Self {
        Self::value_error(format!("Linear algebra routine failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PopulationError>;
