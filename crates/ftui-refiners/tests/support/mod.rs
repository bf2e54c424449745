#![allow(dead_code)]

use ftui_refiners::RefinersHost;
use ftui_refiners::core::{
    FilterValuesUpdate, RefinementResult, RefinementValue, RefinerConfiguration, RefinersProps,
    SelectedFilter,
};

/// Host that records every request.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub remove_all: usize,
    pub updates: Vec<FilterValuesUpdate>,
}

impl RefinersHost for RecordingHost {
    fn on_remove_all_filters(&mut self) {
        self.remove_all += 1;
    }

    fn on_filter_values_updated(&mut self, update: FilterValuesUpdate) {
        self.updates.push(update);
    }
}

pub fn red() -> RefinementValue {
    RefinementValue::new("Color", "\"ǂǂ526564\"", "Red").with_count(12)
}

pub fn blue() -> RefinementValue {
    RefinementValue::new("Color", "\"ǂǂ426c7565\"", "Blue").with_count(4)
}

pub fn medium() -> RefinementValue {
    RefinementValue::new("Size", "\"ǂǂ4d\"", "M")
}

pub fn results() -> Vec<RefinementResult> {
    vec![
        RefinementResult::new("Color", vec![red(), blue()]),
        RefinementResult::new("Size", vec![medium()]),
    ]
}

pub fn configuration() -> Vec<RefinerConfiguration> {
    vec![RefinerConfiguration::new("Color", "Color").show_expanded(true)]
}

/// Two facets, `Red` selected.
pub fn color_size_props() -> RefinersProps {
    RefinersProps::new(
        results(),
        vec![SelectedFilter::new("Color", vec![red()])],
        configuration(),
    )
}
