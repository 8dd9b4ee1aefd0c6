use hugo_controls::{ControlError, ControlRegistry};
use hugo_domain::control::{Control, ControlPatch, ControlQuery};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["AC", "AU", "SC", "ac", ""]).prop_map(str::to_owned)
}

fn arb_control() -> impl Strategy<Value = Control> {
    (0_i64..32, label(), label(), label()).prop_map(|(id, family, group, name)| Control {
        jid: id * 10,
        id,
        family,
        group,
        name,
        description: "d".to_owned(),
        discussion: "disc".to_owned(),
        questions: "q".to_owned(),
        price: None,
        count: None,
    })
}

fn populated(controls: Vec<Control>) -> ControlRegistry {
    let registry = ControlRegistry::new();
    for control in controls {
        // Duplicate ids are expected from the generator; the first one wins.
        let outcome = registry.create(control);
        assert!(
            matches!(outcome, Ok(_) | Err(ControlError::Conflict { .. })),
            "unexpected create outcome: {outcome:?}"
        );
    }
    registry
}

proptest! {
    #[test]
    fn unconstrained_filter_returns_full_set(
        controls in prop::collection::vec(arb_control(), 0..24)
    ) {
        let registry = populated(controls);
        let all: Vec<Control> = registry.list_all().into_values().collect();

        prop_assert_eq!(registry.filter(ControlQuery::default()).selection, all);
    }

    #[test]
    fn single_criterion_selects_exact_subset(
        controls in prop::collection::vec(arb_control(), 0..24),
        family in label()
    ) {
        let registry = populated(controls);
        let expected: Vec<Control> = registry
            .list_all()
            .into_values()
            .filter(|control| control.family == family)
            .collect();

        let query = ControlQuery { family: Some(family), ..ControlQuery::default() };
        let result = registry.filter(query.clone());
        prop_assert_eq!(result.query, query);
        prop_assert_eq!(result.selection, expected);
    }

    #[test]
    fn ids_stay_unique(controls in prop::collection::vec(arb_control(), 0..24)) {
        let mut ids: Vec<i64> = controls.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();

        let registry = populated(controls);
        prop_assert_eq!(registry.len(), ids.len());
    }

    #[test]
    fn empty_patch_never_mutates(
        controls in prop::collection::vec(arb_control(), 1..8),
        id in 0_i64..40
    ) {
        let registry = populated(controls);
        let before = registry.list_all();

        let result = registry.update(id, ControlPatch::default());
        let is_invalid_argument = matches!(result, Err(ControlError::InvalidArgument { .. }));
        prop_assert!(is_invalid_argument);
        prop_assert_eq!(registry.list_all(), before);
    }
}
