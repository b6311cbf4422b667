use super::*;
use crate::value::Value;
use proptest::prelude::*;

fn eq(field: &str, value: i64) -> Predicate {
    Predicate::eq(field, Value::Int(value))
}

#[test]
fn normalize_flattens_same_relation_nesting() {
    let nested = Predicate::And(vec![
        Predicate::And(vec![eq("a", 1)]),
        Predicate::And(vec![eq("b", 2)]),
    ]);

    assert_eq!(normalize(&nested), Predicate::And(vec![eq("a", 1), eq("b", 2)]));
}

#[test]
fn normalize_collapses_singleton_composites() {
    let wrapped = Predicate::And(vec![Predicate::Or(vec![eq("a", 1)])]);

    assert_eq!(normalize(&wrapped), eq("a", 1));
}

#[test]
fn normalize_keeps_empty_composites() {
    assert_eq!(normalize(&Predicate::And(vec![])), Predicate::And(vec![]));
    assert_eq!(normalize(&Predicate::Or(vec![])), Predicate::Or(vec![]));
    assert_eq!(
        normalize(&Predicate::And(vec![Predicate::Or(vec![])])),
        Predicate::Or(vec![])
    );
}

#[test]
fn normalize_does_not_mix_relations() {
    let mixed = Predicate::And(vec![
        Predicate::Or(vec![eq("a", 1), eq("b", 2)]),
        eq("c", 3),
    ]);

    assert_eq!(normalize(&mixed), mixed);
}

#[test]
fn vacuous_truth_is_the_empty_conjunction() {
    assert!(Predicate::And(vec![]).is_vacuous());
    assert!(!Predicate::Or(vec![]).is_vacuous());
    assert!(!eq("a", 1).is_vacuous());
}

#[test]
fn bit_ops_build_composites() {
    assert_eq!(
        eq("a", 1) & eq("b", 2),
        Predicate::And(vec![eq("a", 1), eq("b", 2)])
    );
    assert_eq!(
        eq("a", 1) | eq("b", 2),
        Predicate::Or(vec![eq("a", 1), eq("b", 2)])
    );
}

#[test]
fn display_renders_diagnostics_text() {
    let pred = Predicate::And(vec![
        Predicate::gt("\"t\".\"a\"", Value::Int(1)),
        Predicate::Or(vec![
            Predicate::eq("\"t\".\"b\"", Value::from("x")),
            Predicate::lte("\"t\".\"c\"", Value::Float(2.5)),
        ]),
    ]);

    assert_eq!(
        pred.to_string(),
        "(\"t\".\"a\" > 1 AND (\"t\".\"b\" = 'x' OR \"t\".\"c\" <= 2.5))"
    );
    assert_eq!(Predicate::And(vec![]).to_string(), "(TRUE)");
    assert_eq!(Predicate::Or(vec![]).to_string(), "(FALSE)");
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::Uint),
        any::<f64>().prop_map(Value::Float),
        "[a-z0-9_]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::Ne),
        Just(CompareOp::Lt),
        Just(CompareOp::Lte),
        Just(CompareOp::Gt),
        Just(CompareOp::Gte),
    ]
}

fn arb_predicate() -> impl Strategy<Value = Predicate> {
    let leaf = ("[a-d]", arb_compare_op(), arb_value())
        .prop_map(|(field, op, value)| Predicate::Compare(ComparePredicate::new(field, op, value)));

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::And),
            prop::collection::vec(inner, 0..4).prop_map(Predicate::Or),
        ]
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(pred in arb_predicate()) {
        let once = normalize(&pred);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_never_leaves_singleton_composites(pred in arb_predicate()) {
        fn check(pred: &Predicate) -> bool {
            match pred {
                Predicate::Compare(_) => true,
                Predicate::And(children) | Predicate::Or(children) => {
                    children.len() != 1 && children.iter().all(check)
                }
            }
        }

        prop_assert!(check(&normalize(&pred)));
    }
}
