use crate::{
    compile::{CompileContext, Compiler, conjoin},
    error::Error,
    filter::FilterSpec,
    join::{Include, JoinClause, JoinOutput},
    ops::{ConfigError, OperatorRegistry},
    predicate::Predicate,
    project::project,
    qualify::Qualifier,
    value::Value,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

///
/// Filter
///
/// Top-level query request: source table, filter document, requested
/// attributes, includes, ordering, and pagination. Absent or zero
/// limit/offset means unbounded.
///

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub from: String,

    #[serde(rename = "where")]
    pub where_clause: Option<FilterSpec>,

    pub attributes: Vec<Value>,
    pub include: Vec<Include>,

    /// Order expressions, passed through verbatim.
    pub order: Vec<String>,

    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

///
/// BuilderConfig
///
/// Construction-time configuration: identifier quote string and operator
/// symbol overrides keyed by default symbol. Immutable once the builder
/// exists.
///

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub quote: String,
    pub operators: BTreeMap<String, String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            quote: "\"".to_string(),
            operators: BTreeMap::new(),
        }
    }
}

///
/// QueryBuilder
///
/// Owns the operator registry and qualifier; read-only after
/// construction, so one builder may serve concurrent `build` calls.
///

#[derive(Clone, Debug)]
pub struct QueryBuilder {
    registry: OperatorRegistry,
    qualifier: Qualifier,
}

impl QueryBuilder {
    pub fn new(config: BuilderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: OperatorRegistry::with_overrides(&config.operators)?,
            qualifier: Qualifier::new(config.quote),
        })
    }

    #[must_use]
    pub const fn compiler(&self) -> Compiler<'_> {
        Compiler::new(&self.registry, &self.qualifier)
    }

    /// Assemble a structured query from a filter request.
    ///
    /// Sequencing: qualify source → project attributes → compose joins →
    /// compile where → ordering → pagination. The first failing step
    /// aborts assembly.
    pub fn build(&self, filter: &Filter) -> Result<Query, Error> {
        let compiler = self.compiler();
        let ctx = CompileContext::new(&filter.from);

        let from = self.qualifier.quote(&filter.from);
        let projections = project(&self.qualifier, &filter.attributes, &filter.from)?;

        let JoinOutput { joins, mut predicates } =
            compiler.compose_joins(&ctx, &filter.include)?;

        let mut conjuncts = Vec::with_capacity(predicates.len() + 1);
        if let Some(where_clause) = &filter.where_clause {
            conjuncts.push(compiler.compile(where_clause, &ctx)?);
        }
        conjuncts.append(&mut predicates);

        Ok(Query {
            from,
            projections,
            joins,
            predicate: conjoin(conjuncts),
            order: filter.order.clone(),
            limit: filter.limit.filter(|n| *n != 0),
            offset: filter.offset.filter(|n| *n != 0),
        })
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            registry: OperatorRegistry::default(),
            qualifier: Qualifier::default(),
        }
    }
}

///
/// Query
///
/// Structured output handed to the external statement builder: quoted
/// source table, projections, join clauses, the predicate tree, order
/// expressions, and pagination bounds. `Display` renders a SELECT-shaped
/// diagnostic; real SQL text and parameter binding happen downstream.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub from: String,
    pub projections: Vec<String>,
    pub joins: Vec<JoinClause>,
    pub predicate: Predicate,
    pub order: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.projections.join(", "), self.from)?;

        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if !self.predicate.is_vacuous() {
            write!(f, " WHERE {}", self.predicate)?;
        }
        if !self.order.is_empty() {
            write!(f, " ORDER BY {}", self.order.join(", "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{join::JoinKind, predicate::normalize};
    use serde_json::json;

    fn bare_builder() -> QueryBuilder {
        QueryBuilder::new(BuilderConfig {
            quote: String::new(),
            operators: BTreeMap::new(),
        })
        .unwrap()
    }

    #[test]
    fn build_sequences_all_steps() {
        let builder = bare_builder();
        let filter = Filter {
            from: "users".to_string(),
            where_clause: Some(FilterSpec::from_json(&json!({"age": {"$gte": 21}}))),
            attributes: vec![Value::from("id"), Value::from("name")],
            include: vec![Include {
                table: "orders".to_string(),
                source_key: "id".to_string(),
                foreign_key: "user_id".to_string(),
                through: None,
                where_clause: Some(FilterSpec::from_json(&json!({"total": {"$gt": 100}}))),
            }],
            order: vec!["users.name".to_string()],
            limit: Some(10),
            offset: Some(20),
        };

        let query = builder.build(&filter).unwrap();

        assert_eq!(query.from, "users");
        assert_eq!(
            query.projections,
            vec![
                "users.id AS id".to_string(),
                "users.name AS name".to_string()
            ]
        );
        assert_eq!(query.joins.len(), 1);
        assert_eq!(query.joins[0].kind, JoinKind::Inner);

        // include filter joins the outer conjunction
        assert_eq!(
            normalize(&query.predicate),
            Predicate::And(vec![
                Predicate::gte("users.age", Value::Int(21)),
                Predicate::gt("orders.total", Value::Int(100)),
            ])
        );
        assert_eq!(query.order, vec!["users.name".to_string()]);
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(20));
    }

    #[test]
    fn missing_where_compiles_to_vacuous_truth() {
        let builder = bare_builder();
        let filter = Filter {
            from: "users".to_string(),
            ..Filter::default()
        };

        let query = builder.build(&filter).unwrap();

        assert!(query.predicate.is_vacuous());
        assert_eq!(query.projections, vec!["*".to_string()]);
        assert_eq!(query.to_string(), "SELECT * FROM users");
    }

    #[test]
    fn zero_pagination_bounds_mean_unbounded() {
        let builder = bare_builder();
        let filter = Filter {
            from: "users".to_string(),
            limit: Some(0),
            offset: Some(0),
            ..Filter::default()
        };

        let query = builder.build(&filter).unwrap();

        assert_eq!(query.limit, None);
        assert_eq!(query.offset, None);
    }

    #[test]
    fn display_renders_the_assembled_shape() {
        let builder = QueryBuilder::default();
        let filter = Filter {
            from: "users".to_string(),
            where_clause: Some(FilterSpec::from_json(&json!({"name": "ada"}))),
            order: vec!["\"users\".\"id\"".to_string()],
            limit: Some(5),
            ..Filter::default()
        };

        let query = builder.build(&filter).unwrap();

        assert_eq!(
            query.to_string(),
            "SELECT * FROM \"users\" WHERE (\"users\".\"name\" = 'ada') \
             ORDER BY \"users\".\"id\" LIMIT 5"
        );
    }

    #[test]
    fn builder_construction_rejects_symbol_collisions() {
        let mut operators = BTreeMap::new();
        operators.insert("$eq".to_string(), "$gt".to_string());

        let err = QueryBuilder::new(BuilderConfig {
            quote: String::new(),
            operators,
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateSymbol { .. }));
    }

    #[test]
    fn filter_deserializes_from_a_json_request() {
        let filter: Filter = serde_json::from_value(json!({
            "from": "users",
            "where": {"$or": [{"a": 1}, {"b": 2}]},
            "attributes": ["id"],
            "include": [{
                "table": "orders",
                "source_key": "id",
                "foreign_key": "user_id"
            }],
            "order": ["users.id"],
            "limit": 3
        }))
        .unwrap();

        assert_eq!(filter.from, "users");
        assert_eq!(filter.include.len(), 1);
        assert_eq!(filter.limit, Some(3));
        assert!(filter.offset.is_none());

        let query = bare_builder().build(&filter).unwrap();
        assert_eq!(
            normalize(&query.predicate),
            Predicate::Or(vec![
                Predicate::eq("users.a", Value::Int(1)),
                Predicate::eq("users.b", Value::Int(2)),
            ])
        );
    }
}
