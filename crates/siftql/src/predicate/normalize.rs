use super::Predicate;

///
/// Normalization
///
/// Flattens same-relation nesting and collapses singleton composites.
/// Nesting depth carries no meaning, so normalization preserves
/// semantics; it exists so callers and tests can compare trees without
/// caring how many redundant wrappers the compiler produced.
///
/// Empty composites are kept: an empty `And` is the vacuous-truth
/// identity and an empty `Or` must round-trip to the external builder
/// unchanged.
///

/// Normalize a predicate tree.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`.
#[must_use]
pub fn normalize(pred: &Predicate) -> Predicate {
    match pred {
        Predicate::Compare(_) => pred.clone(),
        Predicate::And(children) => rebuild(children, Relation::And),
        Predicate::Or(children) => rebuild(children, Relation::Or),
    }
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Relation {
    And,
    Or,
}

fn rebuild(children: &[Predicate], relation: Relation) -> Predicate {
    let mut flat = Vec::with_capacity(children.len());

    for child in children {
        let child = normalize(child);
        match (relation, child) {
            // splice same-relation composites into the parent
            (Relation::And, Predicate::And(grandchildren))
            | (Relation::Or, Predicate::Or(grandchildren)) => flat.extend(grandchildren),
            (_, child) => flat.push(child),
        }
    }

    if flat.len() == 1 {
        return flat.remove(0);
    }

    match relation {
        Relation::And => Predicate::And(flat),
        Relation::Or => Predicate::Or(flat),
    }
}
