mod context;


pub use context::{CompileContext, Relation};

use crate::{
    error::CompileError,
    filter::FilterSpec,
    ops::{Operator, OperatorRegistry},
    predicate::{ComparePredicate, Predicate},
    qualify::Qualifier,
};

///
/// Compiler
///
/// Recursive-descent engine turning a `FilterSpec` into a predicate
/// tree. Borrows the registry and qualifier; each `compile` call is an
/// independent pure computation, safe to run concurrently.
///
/// Two equivalent nesting orders are accepted for comparisons:
/// operator-outer `{"$gt": {"a": 1}}` and field-outer
/// `{"a": {"$gt": 1}}`. A bare `{"a": 1}` is an equality comparison.
///

#[derive(Clone, Copy, Debug)]
pub struct Compiler<'a> {
    registry: &'a OperatorRegistry,
    qualifier: &'a Qualifier,
}

impl<'a> Compiler<'a> {
    #[must_use]
    pub const fn new(registry: &'a OperatorRegistry, qualifier: &'a Qualifier) -> Self {
        Self {
            registry,
            qualifier,
        }
    }

    #[must_use]
    pub(crate) const fn qualifier(&self) -> &Qualifier {
        self.qualifier
    }

    /// Compile a filter specification under a table context.
    ///
    /// The top level must be a field map. Map entries combine under the
    /// ambient relation; public entry points always supply `And`, so
    /// map-level combination is conjunctive. An empty map compiles to an
    /// empty `And` (vacuously true).
    pub fn compile(
        &self,
        spec: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Predicate, CompileError> {
        let FilterSpec::Fields(entries) = spec else {
            return Err(CompileError::ExpectedFieldMap);
        };

        let mut parts = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            parts.push(conjoin(self.compile_entry(key, value, ctx)?));
        }

        Ok(match ctx.relation() {
            Relation::And => Predicate::And(parts),
            Relation::Or => Predicate::Or(parts),
        })
    }

    /// Classify one map entry: operator symbol or field name.
    fn compile_entry(
        &self,
        key: &str,
        value: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Vec<Predicate>, CompileError> {
        match self.registry.lookup(key) {
            Some(op) => self.compile_operator(op, key, value, ctx),
            None => self.compile_field(key, value, ctx),
        }
    }

    fn compile_operator(
        &self,
        op: Operator,
        symbol: &str,
        operand: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Vec<Predicate>, CompileError> {
        match op {
            Operator::And => Ok(vec![Predicate::And(self.compile_list(symbol, operand, ctx)?)]),
            Operator::Or => Ok(vec![Predicate::Or(self.compile_list(symbol, operand, ctx)?)]),
            // $not is reserved, $like is registered but unconsumed
            Operator::Not | Operator::Like => Err(CompileError::NotImplemented {
                symbol: symbol.to_string(),
            }),
            _ => self.compile_comparisons(op, symbol, operand, ctx),
        }
    }

    /// Operand of `$and`/`$or`: a list whose elements are field maps,
    /// each compiled with the relation forced back to `And` so sub-filter
    /// elements stay internally conjunctive.
    fn compile_list(
        &self,
        symbol: &str,
        operand: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Vec<Predicate>, CompileError> {
        let FilterSpec::List(elems) = operand else {
            return Err(CompileError::ExpectedList {
                symbol: symbol.to_string(),
            });
        };

        let child = ctx.with_relation(Relation::And);

        elems
            .iter()
            .map(|elem| match elem {
                FilterSpec::Fields(_) => self.compile(elem, &child),
                FilterSpec::Literal(_) | FilterSpec::List(_) => {
                    Err(CompileError::ExpectedElementMap {
                        symbol: symbol.to_string(),
                    })
                }
            })
            .collect()
    }

    /// Operator-outer syntax: the operand is a map of field → literal,
    /// one leaf comparison per pair.
    fn compile_comparisons(
        &self,
        op: Operator,
        symbol: &str,
        operand: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Vec<Predicate>, CompileError> {
        let Some(cmp) = op.as_compare() else {
            return Err(CompileError::NotImplemented {
                symbol: symbol.to_string(),
            });
        };

        let FilterSpec::Fields(entries) = operand else {
            return Err(CompileError::ExpectedCompareMap {
                symbol: symbol.to_string(),
            });
        };

        entries
            .iter()
            .map(|(field, value)| {
                let FilterSpec::Literal(value) = value else {
                    return Err(CompileError::ExpectedScalar {
                        field: field.clone(),
                    });
                };

                Ok(Predicate::Compare(ComparePredicate::new(
                    self.qualifier.qualify(ctx.table(), field),
                    cmp,
                    value.clone(),
                )))
            })
            .collect()
    }

    /// Field-outer syntax: a scalar value is an equality; a map value
    /// recompiles each operator entry as an operator-outer fragment
    /// scoped to this single field.
    fn compile_field(
        &self,
        field: &str,
        value: &FilterSpec,
        ctx: &CompileContext,
    ) -> Result<Vec<Predicate>, CompileError> {
        match value {
            FilterSpec::Literal(value) => Ok(vec![Predicate::eq(
                self.qualifier.qualify(ctx.table(), field),
                value.clone(),
            )]),
            FilterSpec::Fields(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (symbol, operand) in entries {
                    let op = self.registry.resolve(symbol)?;
                    let fragment =
                        FilterSpec::Fields(vec![(field.to_string(), operand.clone())]);
                    out.extend(self.compile_operator(op, symbol, &fragment, ctx)?);
                }
                Ok(out)
            }
            FilterSpec::List(_) => Err(CompileError::InvalidFieldOperand {
                field: field.to_string(),
            }),
        }
    }
}

/// Entry results with several leaves combine conjunctively; a single
/// result is carried as-is since nesting depth has no meaning.
pub(crate) fn conjoin(mut preds: Vec<Predicate>) -> Predicate {
    if preds.len() == 1 {
        preds.remove(0)
    } else {
        Predicate::And(preds)
    }
}
