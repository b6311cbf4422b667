use std::fmt::Write as _;

///
/// Qualifier
///
/// Quotes and fully qualifies identifiers with a configurable quote
/// string. Identifier characters are not validated and an embedded quote
/// character is not escaped; the quote is the only protection against
/// malformed identifiers, by documented limitation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Qualifier {
    quote: String,
}

impl Qualifier {
    #[must_use]
    pub fn new(quote: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
        }
    }

    /// Wrap a bare identifier in the configured quote.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        format!("{q}{name}{q}", q = self.quote)
    }

    /// `"table"."column"`
    #[must_use]
    pub fn qualify(&self, table: &str, column: &str) -> String {
        format!("{}.{}", self.quote(table), self.quote(column))
    }

    /// `"table"."column" AS "column"`
    #[must_use]
    pub fn project_as(&self, table: &str, column: &str) -> String {
        let mut out = self.qualify(table, column);
        let _ = write!(out, " AS {}", self.quote(column));
        out
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Self::new("\"")
    }
}
