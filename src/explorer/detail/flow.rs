//! Flow tab: the stage's apply logic as numbered steps.

use crate::program::StageInfo;

/// Placeholder text for stages without flow logic
pub const NO_EXPLICIT_FLOW: &str = "No explicit flow logic for this stage.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStep {
    /// 1-based
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowView {
    Steps(Vec<FlowStep>),
    /// Normal for stages that carry no `apply_logic.logic`
    NoExplicitFlow,
}

impl FlowView {
    pub fn render(stage: &StageInfo) -> Self {
        let steps = stage
            .apply_logic
            .as_ref()
            .and_then(|logic| logic.logic.as_ref())
            .filter(|steps| !steps.is_empty());

        match steps {
            Some(steps) => FlowView::Steps(
                steps
                    .iter()
                    .enumerate()
                    .map(|(i, text)| FlowStep {
                        number: i + 1,
                        text: text.clone(),
                    })
                    .collect(),
            ),
            None => FlowView::NoExplicitFlow,
        }
    }
}
