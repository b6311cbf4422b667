//! Order-insensitive predicate comparison for tests.
//!
//! Map iteration order is an input detail, not a semantic one, so tests
//! compare And/Or children as sets.

use crate::predicate::Predicate;

/// Compare two predicates, treating And/Or children as unordered sets.
pub(crate) fn predicate_set_eq(a: &Predicate, b: &Predicate) -> bool {
    match (a, b) {
        (Predicate::And(xs), Predicate::And(ys)) | (Predicate::Or(xs), Predicate::Or(ys)) => {
            set_eq(xs, ys)
        }
        (Predicate::Compare(x), Predicate::Compare(y)) => x == y,
        _ => false,
    }
}

fn set_eq(xs: &[Predicate], ys: &[Predicate]) -> bool {
    xs.len() == ys.len()
        && xs.iter().all(|x| contains(ys, x))
        && ys.iter().all(|y| contains(xs, y))
}

fn contains(list: &[Predicate], pred: &Predicate) -> bool {
    list.iter().any(|item| predicate_set_eq(item, pred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn eq(field: &str, value: i64) -> Predicate {
        Predicate::eq(field, Value::Int(value))
    }

    #[test]
    fn child_order_is_ignored() {
        let a = Predicate::And(vec![eq("a", 1), eq("b", 2)]);
        let b = Predicate::And(vec![eq("b", 2), eq("a", 1)]);

        assert!(predicate_set_eq(&a, &b));
    }

    #[test]
    fn relation_and_leaves_still_matter() {
        let and = Predicate::And(vec![eq("a", 1)]);
        let or = Predicate::Or(vec![eq("a", 1)]);

        assert!(!predicate_set_eq(&and, &or));
        assert!(!predicate_set_eq(&eq("a", 1), &eq("a", 2)));
    }
}
