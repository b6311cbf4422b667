use crate::predicate::CompareOp;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Operator
///
/// Canonical logical/comparison operator tokens. Each token has a default
/// external symbol in the `$`-prefixed document-query convention; the
/// external representation is remappable per registry, the token identity
/// is not.
///
/// `Like` is reserved: it is registered so the symbol cannot be reused,
/// but the compiler does not consume it yet.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Operator {
    And,
    Or,
    Not,
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl Operator {
    pub const ALL: [Self; 10] = [
        Self::And,
        Self::Or,
        Self::Not,
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
    ];

    /// Default external symbol for this token.
    #[must_use]
    pub const fn default_symbol(self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
            Self::Not => "$not",
            Self::Eq => "$eq",
            Self::Ne => "$notEq",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Like => "$like",
        }
    }

    /// Comparison counterpart for the six comparison tokens.
    #[must_use]
    pub(crate) const fn as_compare(self) -> Option<CompareOp> {
        match self {
            Self::Eq => Some(CompareOp::Eq),
            Self::Ne => Some(CompareOp::Ne),
            Self::Gt => Some(CompareOp::Gt),
            Self::Gte => Some(CompareOp::Gte),
            Self::Lt => Some(CompareOp::Lt),
            Self::Lte => Some(CompareOp::Lte),
            Self::And | Self::Or | Self::Not | Self::Like => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_symbol())
    }
}

///
/// ConfigError
///
/// Registry construction failures. The symbol mapping must stay a
/// bijection, so a collision aborts construction rather than shadowing.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("operator symbol '{symbol}' is mapped to both {first} and {second}")]
    DuplicateSymbol {
        symbol: String,
        first: Operator,
        second: Operator,
    },

    #[error("unknown operator token '{token}' in override map")]
    UnknownToken { token: String },
}

///
/// UnknownOperatorError
///
/// A symbol in a position that must be an operator is not registered.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("not an operator: {symbol}")]
pub struct UnknownOperatorError {
    pub symbol: String,
}

///
/// OperatorRegistry
///
/// Owns the forward (token → symbol) and reverse (symbol → token) lookup
/// tables. Immutable after construction and safe to share across threads.
///

#[derive(Clone, Debug)]
pub struct OperatorRegistry {
    symbols: BTreeMap<Operator, String>,
    reverse: BTreeMap<String, Operator>,
}

impl OperatorRegistry {
    /// Build a registry from the default symbol table plus overrides.
    ///
    /// Overrides are keyed by the operator's *default* symbol and replace
    /// its external representation wholesale; the default spelling stops
    /// resolving once remapped.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut symbols: BTreeMap<Operator, String> = Operator::ALL
            .iter()
            .map(|op| (*op, op.default_symbol().to_string()))
            .collect();

        for (token, symbol) in overrides {
            let op = Operator::ALL
                .iter()
                .copied()
                .find(|op| op.default_symbol() == token)
                .ok_or_else(|| ConfigError::UnknownToken {
                    token: token.clone(),
                })?;
            symbols.insert(op, symbol.clone());
        }

        let mut reverse = BTreeMap::new();
        for (op, symbol) in &symbols {
            if let Some(first) = reverse.insert(symbol.clone(), *op) {
                return Err(ConfigError::DuplicateSymbol {
                    symbol: symbol.clone(),
                    first,
                    second: *op,
                });
            }
        }

        Ok(Self { symbols, reverse })
    }

    /// External symbol for a token.
    #[must_use]
    pub fn symbol(&self, op: Operator) -> &str {
        self.symbols
            .get(&op)
            .map_or_else(|| op.default_symbol(), String::as_str)
    }

    /// Resolve a symbol that may be either an operator or a field name.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<Operator> {
        self.reverse.get(symbol).copied()
    }

    /// Resolve a symbol in a position that must be an operator.
    pub fn resolve(&self, symbol: &str) -> Result<Operator, UnknownOperatorError> {
        self.lookup(symbol).ok_or_else(|| UnknownOperatorError {
            symbol: symbol.to_string(),
        })
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        // default symbols are distinct; no collision check needed
        Self {
            symbols: Operator::ALL
                .iter()
                .map(|op| (*op, op.default_symbol().to_string()))
                .collect(),
            reverse: Operator::ALL
                .iter()
                .map(|op| (op.default_symbol().to_string(), *op))
                .collect(),
        }
    }
}
