//! siftql compiles declarative, document-style filter queries into
//! structured predicate trees ready for a relational statement builder.
//!
//! ## Crate layout
//! - `value`: dynamic scalar literals.
//! - `ops`: operator tokens and the symbol registry.
//! - `filter`: the tagged `FilterSpec` shape and its decode boundary.
//! - `compile`: the recursive-descent filter compiler and its context.
//! - `predicate`: the compiled predicate AST and normalization.
//! - `join`: includes, join clauses, and the join composer.
//! - `query`: the request type and the query assembler.
//!
//! The compiler is pure and synchronous; a `QueryBuilder` is read-only
//! after construction and safe to share across threads.

pub mod compile;
pub mod error;
pub mod filter;
pub mod join;
pub mod ops;
pub mod predicate;
pub mod project;
pub mod qualify;
pub mod query;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CompileError, Error};
pub use ops::{ConfigError, Operator, OperatorRegistry};
pub use query::{BuilderConfig, Filter, Query, QueryBuilder};

///
/// Prelude
///
/// Domain vocabulary only; errors and internals stay behind their
/// modules.
///

pub mod prelude {
    pub use crate::{
        compile::{CompileContext, Compiler, Relation},
        filter::FilterSpec,
        join::{Include, IncludeThrough, JoinClause, JoinKind},
        predicate::{CompareOp, ComparePredicate, Predicate, normalize},
        qualify::Qualifier,
        query::{BuilderConfig, Filter, Query, QueryBuilder},
        value::Value,
    };
}
