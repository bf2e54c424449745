#![forbid(unsafe_code)]

//! End-to-end reconciliation scenarios driven through [`RefinersState`].
//!
//! Run:
//!   cargo test -p ftui-refiners-core --test reconcile_scenarios

use ftui_refiners_core::{
    GroupIdentity, RefinementResult, RefinementValue, RefinerConfiguration, RefinersProps,
    RefinersState, RefinersSettings, RemovalTarget, SelectedFilter,
};

fn red() -> RefinementValue {
    RefinementValue::new("Color", "\"ǂǂ526564\"", "Red").with_count(12)
}

fn blue() -> RefinementValue {
    RefinementValue::new("Color", "\"ǂǂ426c7565\"", "Blue").with_count(4)
}

fn small() -> RefinementValue {
    RefinementValue::new("Size", "\"ǂǂ53\"", "S").with_count(7)
}

fn color_size_props() -> RefinersProps {
    RefinersProps::new(
        vec![
            RefinementResult::new("Color", vec![red(), blue()]),
            RefinementResult::new("Size", vec![small()]),
        ],
        vec![SelectedFilter::new("Color", vec![red()])],
        vec![RefinerConfiguration::new("Color", "Color").show_expanded(true)],
    )
}

#[test]
fn color_size_scenario() {
    let state = RefinersState::mount(color_size_props(), GroupIdentity::default());

    let groups = state.groups();
    let summary: Vec<_> = groups
        .iter()
        .map(|g| (g.name.as_str(), g.is_collapsed))
        .collect();
    assert_eq!(summary, [("Color", false), ("Size", true)]);

    let items = state.items();
    let facets: Vec<_> = items.iter().map(|i| i.facet()).collect();
    assert_eq!(facets, ["Color", "Size"]);
    assert_eq!(items[0].selected_values, vec![red()]);
    assert!(items[1].selected_values.is_empty());

    let chips = state.chips();
    let labels: Vec<_> = chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["[Color: \"Red\"]"]);
    assert!(state.has_selected_values());
}

#[test]
fn dismissing_chip_routes_removal_to_color_only() {
    let mut state = RefinersState::mount(color_size_props(), GroupIdentity::default());
    let chip = state.chips().remove(0);
    let removal = state.remove_value(&chip.value);

    assert_eq!(removal.item_indices, [0]);
    let items = state.items();
    let matched = items[0].value_to_remove.as_ref().expect("color item targeted");
    assert_eq!(matched.value, red());
    assert!(matches!(matched.target, RemovalTarget::RemoveValue { .. }));
    assert!(items[1].value_to_remove.is_none());
}

#[test]
fn host_clearing_selection_keeps_expanded_groups() {
    let mut state = RefinersState::mount(color_size_props(), GroupIdentity::default());
    // User expands Size.
    state.toggle_collapse(1);

    let cleared = RefinersProps::new(
        color_size_props().refinement_results,
        Vec::new(),
        color_size_props().refiners_configuration,
    );
    let invalidation = state.receive_props(cleared);

    assert!(!invalidation.reset_collapse);
    assert!(!state.has_selected_values());
    assert!(state.chips().is_empty());
    assert!(state.groups().iter().all(|g| !g.is_collapsed));
}

#[test]
fn facets_appearing_and_disappearing() {
    let mut state = RefinersState::mount(color_size_props(), GroupIdentity::default());
    state.toggle_collapse(1);

    let brand = RefinementValue::new("Brand", "\"ǂǂ41636d65\"", "Acme");
    let next = RefinersProps::new(
        vec![
            RefinementResult::new("Brand", vec![brand]),
            RefinementResult::new("Size", vec![small()]),
        ],
        vec![SelectedFilter::new("Color", vec![red()])],
        color_size_props().refiners_configuration,
    );
    state.receive_props(next);

    let groups = state.groups();
    let summary: Vec<_> = groups
        .iter()
        .map(|g| (g.facet.as_str(), g.is_collapsed, g.start_index))
        .collect();
    // Brand is new and unselected; Size keeps the user's toggle at its new position.
    assert_eq!(summary, [("Brand", true, 0), ("Size", false, 1)]);
}

#[test]
fn generations_increase_monotonically() {
    let mut state = RefinersState::mount(color_size_props(), GroupIdentity::default());
    let mut last = state.generation();
    let a = state.receive_props(color_size_props()).generation;
    assert!(a > last);
    last = a;
    let b = state.toggle_collapse(0).map(|inv| inv.generation).unwrap_or(last);
    assert!(b > last);
    last = b;
    let c = state.remove_value(&red()).invalidation.generation;
    assert!(c > last);
}

#[test]
fn settings_drive_mount() {
    let settings = RefinersSettings::from_toml_str(
        r#"
        group_identity = "display_name"

        [[refiners]]
        refinerName = "Size"
        displayValue = "Taille"
        showExpanded = true
        "#,
    )
    .unwrap();
    let props = RefinersProps::new(
        color_size_props().refinement_results,
        Vec::new(),
        settings.refiners.clone(),
    );
    let state = RefinersState::mount(props, settings.group_identity);
    assert_eq!(state.identity(), GroupIdentity::DisplayName);
    let names: Vec<_> = state.groups().iter().map(|g| g.name.clone()).collect();
    assert_eq!(names, ["Color", "Taille"]);
    assert!(state.groups()[0].is_collapsed);
    assert!(!state.groups()[1].is_collapsed);
}
