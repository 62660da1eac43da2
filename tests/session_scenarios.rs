//! End-to-end flows through the filter session and popover coordinator

use filterbox::core::{
    FilterAction, FilterCatalog, FilterCondition, FilterItem, FilterState, MenuView, PopoverSlot, SubItem,
};
use filterbox::services::FilterSession;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn catalog() -> FilterCatalog {
    FilterCatalog::new(vec![
        FilterItem::new("status", "Status")
            .with_plural("Statuses")
            .with_sub_items(vec![
                SubItem::new("active", "Active"),
                SubItem::new("inactive", "Inactive"),
            ]),
        FilterItem::new("priority", "Priority")
            .with_plural("Priorities")
            .with_sub_items(vec![
                SubItem::new("high", "High"),
                SubItem::new("critical", "Critical"),
            ]),
        FilterItem::new("starred", "Starred"),
    ])
    .unwrap()
}

#[derive(Debug, Clone)]
enum Step {
    Open(PopoverSlot, Option<&'static str>, bool),
    Pick(&'static str),
    Close,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let slot = prop::sample::select(PopoverSlot::ALL.to_vec());
    let filter = prop::option::of(prop::sample::select(vec!["status", "priority", "starred"]));
    let value = prop::sample::select(vec![
        "status", "priority", "starred", "active", "inactive", "high", "critical",
    ]);
    prop_oneof![
        3 => (slot, filter, any::<bool>()).prop_map(|(s, f, open)| Step::Open(s, f, open)),
        4 => value.prop_map(Step::Pick),
        1 => Just(Step::Close),
    ]
}

fn apply(session: &mut FilterSession, step: &Step) {
    match step {
        Step::Open(slot, filter, open) => session.set_open(*slot, filter.map(Into::into), *open),
        Step::Pick(value) => session.select_menu_entry(value),
        Step::Close => session.close_popovers(),
    }
}

proptest! {
    #[test]
    fn at_most_one_popover_open(steps in prop::collection::vec(step_strategy(), 0..50)) {
        let mut session = FilterSession::new(catalog());
        for step in &steps {
            apply(&mut session, step);
            let open = PopoverSlot::ALL
                .iter()
                .filter(|slot| session.popovers().is_open(**slot))
                .count();
            prop_assert!(open <= 1);
            if let Step::Open(slot, _, true) = step {
                prop_assert_eq!(session.popovers().open_slot(), Some(*slot));
            }
        }
    }

    #[test]
    fn resetting_pick_closes_popovers(steps in prop::collection::vec(step_strategy(), 0..50)) {
        let mut session = FilterSession::new(catalog());
        for step in &steps {
            let was_initial = session.state().is_initial();
            apply(&mut session, step);
            if let Step::Pick(_) = step {
                if !was_initial && session.state().is_initial() {
                    prop_assert!(!session.popovers().any_open());
                    prop_assert_eq!(session.popovers().active_filter(), None);
                }
            }
        }
    }
}

#[test]
fn compose_two_filters_and_override_condition() {
    let mut session = FilterSession::new(catalog());

    session.set_open(PopoverSlot::Main, None, true);
    session.select_menu_entry("status");
    session.select_menu_entry("active");
    session.set_open(PopoverSlot::Main, None, false);

    session.set_open(PopoverSlot::Main, None, true);
    assert_eq!(session.menu_view(), MenuView::TopLevel);
    session.select_menu_entry("priority");
    session.select_menu_entry("high");
    session.select_menu_entry("critical");
    session.close_popovers();

    session.dispatch(FilterAction::SetCondition {
        filter: "status".into(),
        condition: FilterCondition::IsNot,
    });

    assert_eq!(
        session.summary(),
        "Status is not Active; Priority is any of High, Critical"
    );
    let chips = session.chips();
    assert_eq!(chips.len(), 2);
    assert_eq!(chips[0].filter, "status");
    assert_eq!(chips[1].filter, "priority");
}

#[test]
fn single_value_override_returns_after_multiple() {
    let mut session = FilterSession::new(catalog());
    session.dispatch(FilterAction::SelectItem("priority".into()));
    session.dispatch(FilterAction::SelectSubitem {
        filter: "priority".into(),
        sub_item: "high".into(),
    });
    session.dispatch(FilterAction::SelectItem("status".into()));
    session.dispatch(FilterAction::SelectSubitem {
        filter: "status".into(),
        sub_item: "active".into(),
    });
    session.dispatch(FilterAction::SetCondition {
        filter: "status".into(),
        condition: FilterCondition::IsNot,
    });

    // Single -> multiple re-derives
    session.dispatch(FilterAction::SelectSubitem {
        filter: "status".into(),
        sub_item: "inactive".into(),
    });
    assert_eq!(session.state().condition("status"), FilterCondition::IsAnyOf);
    assert!(!session.state().is_overridden("status"));

    // Back at one value the explicit choice returns
    session.dispatch(FilterAction::SelectSubitem {
        filter: "status".into(),
        sub_item: "inactive".into(),
    });
    assert_eq!(session.state().condition("status"), FilterCondition::IsNot);
    assert!(session.state().is_overridden("status"));

    // Emptying one filter while another still has values keeps the state
    session.dispatch(FilterAction::SelectSubitem {
        filter: "status".into(),
        sub_item: "active".into(),
    });
    assert!(session.state().is_active("status"));
    assert!(!session.state().has_chip("status"));
    assert_eq!(session.chips().len(), 1);
}

#[test]
fn identity_menu_retargets_to_another_filter() {
    let mut session = FilterSession::new(catalog());
    session.set_open(PopoverSlot::Main, None, true);
    session.select_menu_entry("status");
    session.select_menu_entry("active");
    session.close_popovers();

    session.set_open(PopoverSlot::FilterIdentity, Some("status".into()), true);
    assert_eq!(session.menu_view(), MenuView::TopLevel);
    session.select_menu_entry("priority");
    assert_eq!(session.menu_view(), MenuView::SubItems("priority".into()));
    assert!(session.popovers().is_open_for(PopoverSlot::FilterIdentity, "status"));

    session.select_menu_entry("critical");
    let chips = session.chips();
    let ids: Vec<&str> = chips.iter().map(|c| c.filter.as_str()).collect();
    assert_eq!(ids, vec!["status", "priority"]);
}

#[test]
fn snapshot_start_is_sanitized() {
    let json = r#"{
        "selected_items": ["status", "ghost"],
        "selected_sub_items": {"status": ["inactive"]},
        "conditions": {"status": "is_not"},
        "condition_overrides": ["status"]
    }"#;
    let state: FilterState = serde_json::from_str(json).unwrap();
    let session = FilterSession::with_state(catalog(), state);

    assert!(!session.state().is_active("ghost"));
    assert_eq!(session.summary(), "Status is not Inactive");
    assert!(!session.popovers().any_open());
}
