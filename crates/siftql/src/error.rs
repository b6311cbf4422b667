use crate::ops::{ConfigError, UnknownOperatorError};
use thiserror::Error as ThisError;

///
/// CompileError
///
/// Shape violations in a filter document, unregistered operator symbols
/// in operator-only positions, and recognized-but-unsupported features.
/// Errors propagate immediately; no partial predicate tree is returned.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("where clause must be a map of fields and operators")]
    ExpectedFieldMap,

    #[error("operator '{symbol}' expects a list of sub-filters")]
    ExpectedList { symbol: String },

    #[error("sub-filter elements under '{symbol}' must be field maps")]
    ExpectedElementMap { symbol: String },

    #[error("operator '{symbol}' expects a map of field comparisons")]
    ExpectedCompareMap { symbol: String },

    #[error("comparison against field '{field}' expects a scalar value")]
    ExpectedScalar { field: String },

    #[error("field '{field}' cannot take a list operand")]
    InvalidFieldOperand { field: String },

    #[error("attribute at position {index} must be a string")]
    NonStringAttribute { index: usize },

    #[error(transparent)]
    UnknownOperator(#[from] UnknownOperatorError),

    #[error("operator '{symbol}' is not implemented")]
    NotImplemented { symbol: String },

    #[error("include '{table}' cannot combine a where clause with a through table")]
    FilteredThroughInclude { table: String },
}

///
/// Error
///
/// Umbrella over the library's error kinds, for callers that hold one
/// builder and do not care which stage failed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
