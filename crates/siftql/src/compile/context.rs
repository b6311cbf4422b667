///
/// Relation
///
/// Boolean combinator governing how sibling predicates at one recursion
/// level combine.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Relation {
    #[default]
    And,
    Or,
}

///
/// CompileContext
///
/// Table name in scope plus the ambient relation. Immutable per
/// recursion step; children are built by copy so a rebound table name
/// can never alias back into the parent scope.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileContext {
    table: String,
    rel: Relation,
}

impl CompileContext {
    /// Root context for a source table; the ambient relation is `And`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rel: Relation::And,
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn relation(&self) -> Relation {
        self.rel
    }

    /// Child context with the relation replaced; table inherited.
    #[must_use]
    pub fn with_relation(&self, rel: Relation) -> Self {
        Self {
            table: self.table.clone(),
            rel,
        }
    }

    /// Child context rebound to another table; relation inherited.
    #[must_use]
    pub fn for_table(&self, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rel: self.rel,
        }
    }
}
