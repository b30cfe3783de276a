//! Explorer state machine
//!
//! The explorer owns what the user is looking at: the view mode, the selected
//! stage and the active detail tab. It is mutated only by
//! [`ExplorerController::dispatch`], which applies an [`ExplorerAction`] to the
//! current state. Views read the state and emit actions. They never write to
//! it.
//!
//! # Transitions
//!
//! | Action | Effect |
//! |--------|--------|
//! | `SelectStage(id)` | Select `id` and open the panel. Ignored if `id` is unknown. Leaves overview mode. |
//! | `ClearSelection` | Deselect and close the panel |
//! | `ClosePanel` | Hide the panel, keep the selection |
//! | `SetTab(tab)` | Switch tab. Ignored without a selection. |
//! | `SetViewMode(mode)` | Switch mode. Overview clears the selection. |
//!
//! Invalid transitions are ignored, not reported.

pub mod detail;

use serde::{Deserialize, Serialize};

use crate::pipeline::{StageDescriptor, StageId};

/// Detail panel tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DetailTab {
    #[default]
    DeepDive,
    Tables,
    Actions,
    Flow,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::DeepDive,
        DetailTab::Tables,
        DetailTab::Actions,
        DetailTab::Flow,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DetailTab::DeepDive => "Deep Dive",
            DetailTab::Tables => "Tables",
            DetailTab::Actions => "Actions",
            DetailTab::Flow => "Flow",
        }
    }
}

/// Top-level view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Per-stage cards with an optional detail panel
    #[default]
    Pipeline,
    /// Aggregate statistics
    Overview,
}

impl ViewMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Pipeline => "Pipeline",
            ViewMode::Overview => "Overview",
        }
    }
}

/// Current exploration state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplorerState {
    pub view_mode: ViewMode,
    pub selected_stage: Option<StageId>,
    pub active_tab: DetailTab,
    /// Whether the detail panel is showing the selected stage
    pub panel_open: bool,
}

impl ExplorerState {
    /// Whether a detail panel should be rendered
    pub fn detail_visible(&self) -> bool {
        self.panel_open && self.selected_stage.is_some() && self.view_mode == ViewMode::Pipeline
    }
}

/// Requested explorer transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerAction {
    SelectStage(StageId),
    ClearSelection,
    ClosePanel,
    SetTab(DetailTab),
    SetViewMode(ViewMode),
}

/// Single writer of [`ExplorerState`].
#[derive(Debug, Default)]
pub struct ExplorerController {
    state: ExplorerState,
}

impl ExplorerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    /// Return to the initial state (pipeline, no selection, deep-dive)
    pub fn reset(&mut self) {
        self.state = ExplorerState::default();
    }

    /// Apply an action against the current stage set.
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: ExplorerAction, stages: &[StageDescriptor]) -> bool {
        let before = self.state.clone();
        let state = &mut self.state;

        match action {
            ExplorerAction::SelectStage(id) => {
                if !stages.iter().any(|s| s.id == id) {
                    tracing::debug!("Ignoring selection of unknown stage {}", id);
                    return false;
                }
                state.view_mode = ViewMode::Pipeline;
                state.selected_stage = Some(id);
                state.panel_open = true;
            }
            ExplorerAction::ClearSelection => {
                state.selected_stage = None;
                state.panel_open = false;
            }
            ExplorerAction::ClosePanel => {
                state.panel_open = false;
            }
            ExplorerAction::SetTab(tab) => {
                if state.selected_stage.is_none() {
                    tracing::debug!("Ignoring tab {:?} without a selected stage", tab);
                    return false;
                }
                state.active_tab = tab;
            }
            ExplorerAction::SetViewMode(mode) => {
                state.view_mode = mode;
                if mode == ViewMode::Overview {
                    state.selected_stage = None;
                    state.panel_open = false;
                }
            }
        }

        self.state != before
    }

    pub fn select_stage(&mut self, id: impl Into<StageId>, stages: &[StageDescriptor]) -> bool {
        self.dispatch(ExplorerAction::SelectStage(id.into()), stages)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.dispatch(ExplorerAction::ClearSelection, &[])
    }

    pub fn set_tab(&mut self, tab: DetailTab) -> bool {
        self.dispatch(ExplorerAction::SetTab(tab), &[])
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        self.dispatch(ExplorerAction::SetViewMode(mode), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize;
    use crate::program::ProgramStructure;
    use serde_json::json;

    fn stages() -> Vec<StageDescriptor> {
        normalize(&ProgramStructure::from_value(&json!({
            "p": {"type": "parser"},
            "c": {"type": "control"}
        })))
    }

    #[test]
    fn test_initial_state() {
        let controller = ExplorerController::new();
        let state = controller.state();
        assert_eq!(state.view_mode, ViewMode::Pipeline);
        assert_eq!(state.selected_stage, None);
        assert_eq!(state.active_tab, DetailTab::DeepDive);
        assert!(!state.detail_visible());
    }

    #[test]
    fn test_select_and_clear() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        assert!(controller.select_stage("c", &stages));
        assert_eq!(controller.state().selected_stage, Some(StageId::from("c")));
        assert!(controller.state().detail_visible());

        assert!(controller.clear_selection());
        assert_eq!(controller.state().selected_stage, None);
        assert!(!controller.clear_selection());
    }

    #[test]
    fn test_select_unknown_stage_is_ignored() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        controller.select_stage("p", &stages);
        assert!(!controller.select_stage("nope", &stages));
        assert_eq!(controller.state().selected_stage, Some(StageId::from("p")));
    }

    #[test]
    fn test_reselect_reopens_panel() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        controller.select_stage("p", &stages);
        assert!(!controller.select_stage("p", &stages));

        controller.dispatch(ExplorerAction::ClosePanel, &stages);
        assert!(!controller.state().detail_visible());
        assert_eq!(controller.state().selected_stage, Some(StageId::from("p")));

        assert!(controller.select_stage("p", &stages));
        assert!(controller.state().detail_visible());
    }

    #[test]
    fn test_set_tab_requires_selection() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        assert!(!controller.set_tab(DetailTab::Tables));
        assert_eq!(controller.state().active_tab, DetailTab::DeepDive);

        controller.select_stage("c", &stages);
        assert!(controller.set_tab(DetailTab::Tables));
        assert_eq!(controller.state().active_tab, DetailTab::Tables);
    }

    #[test]
    fn test_overview_clears_selection() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        controller.select_stage("c", &stages);
        controller.set_view_mode(ViewMode::Overview);
        assert_eq!(controller.state().selected_stage, None);
        assert_eq!(controller.state().view_mode, ViewMode::Overview);

        // Selecting from the overview returns to the pipeline
        controller.select_stage("p", &stages);
        assert_eq!(controller.state().view_mode, ViewMode::Pipeline);
    }

    #[test]
    fn test_reset() {
        let stages = stages();
        let mut controller = ExplorerController::new();
        controller.select_stage("c", &stages);
        controller.set_tab(DetailTab::Flow);
        controller.reset();
        assert_eq!(controller.state(), &ExplorerState::default());
    }
}
