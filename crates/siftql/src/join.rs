use crate::{
    compile::{CompileContext, Compiler},
    error::CompileError,
    filter::FilterSpec,
    predicate::Predicate,
};
use serde::Deserialize;
use std::fmt;

///
/// IncludeThrough
///
/// Junction table mediating an include, with its own key pair.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct IncludeThrough {
    pub table: String,
    pub source_key: String,
    pub foreign_key: String,
}

///
/// Include
///
/// A requested related-table join: target table, key pair, optional
/// junction table, and an optional per-include filter scoped to the
/// target table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Include {
    pub table: String,
    pub source_key: String,
    pub foreign_key: String,

    #[serde(default)]
    pub through: Option<IncludeThrough>,

    #[serde(default, rename = "where")]
    pub where_clause: Option<FilterSpec>,
}

///
/// JoinKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JoinKind {
    Left,
    Inner,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "LEFT JOIN",
            Self::Inner => "INNER JOIN",
        })
    }
}

///
/// JoinClause
///
/// One textual join fragment: kind, bare target table, and the two
/// qualified key references of its equality condition.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: String,
    pub left: String,
    pub right: String,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ON {} = {}", self.kind, self.table, self.left, self.right)
    }
}

///
/// JoinOutput
///
/// Join clauses in input order, plus the predicates compiled from
/// per-include filters. Those predicates join the outer query's filter
/// conjunction; they are not folded into any ON clause.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JoinOutput {
    pub joins: Vec<JoinClause>,
    pub predicates: Vec<Predicate>,
}

impl Compiler<'_> {
    /// Compose join clauses for an ordered list of includes.
    ///
    /// Emission order matches input order for reproducible output. A
    /// per-include filter recompiles under a child context rebound to
    /// the include's table. Combining a filter with a through table is
    /// unsupported and fails rather than dropping either.
    pub fn compose_joins(
        &self,
        ctx: &CompileContext,
        includes: &[Include],
    ) -> Result<JoinOutput, CompileError> {
        let mut out = JoinOutput::default();

        for include in includes {
            match (&include.where_clause, &include.through) {
                (None, None) => {
                    out.joins.push(self.join_clause(JoinKind::Left, ctx.table(), include));
                }
                (None, Some(through)) => {
                    out.joins.push(JoinClause {
                        kind: JoinKind::Left,
                        table: through.table.clone(),
                        left: self.qualifier().qualify(ctx.table(), &include.source_key),
                        right: self.qualifier().qualify(&through.table, &through.source_key),
                    });
                    out.joins.push(JoinClause {
                        kind: JoinKind::Left,
                        table: include.table.clone(),
                        left: self.qualifier().qualify(&through.table, &through.foreign_key),
                        right: self.qualifier().qualify(&include.table, &include.foreign_key),
                    });
                }
                (Some(where_clause), None) => {
                    out.joins.push(self.join_clause(JoinKind::Inner, ctx.table(), include));

                    let child = ctx.for_table(&include.table);
                    out.predicates.push(self.compile(where_clause, &child)?);
                }
                (Some(_), Some(_)) => {
                    return Err(CompileError::FilteredThroughInclude {
                        table: include.table.clone(),
                    });
                }
            }
        }

        Ok(out)
    }

    fn join_clause(&self, kind: JoinKind, parent: &str, include: &Include) -> JoinClause {
        JoinClause {
            kind,
            table: include.table.clone(),
            left: self.qualifier().qualify(parent, &include.source_key),
            right: self.qualifier().qualify(&include.table, &include.foreign_key),
        }
    }
}
