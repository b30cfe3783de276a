//! Detail panel projections.
//!
//! Each sub-view is a pure function of one stage plus the shared registries.
//! The result is a plain model that the frontend paints. Sub-views hold no
//! state of their own.

pub mod actions;
pub mod deep_dive;
pub mod flow;
pub mod tables;

pub use actions::{ActionCard, ActionsView};
pub use deep_dive::{DeepDiveView, ParserStepLine};
pub use flow::{FlowStep, FlowView, NO_EXPLICIT_FLOW};
pub use tables::{TableCard, TablesView};

use crate::explorer::DetailTab;
use crate::pipeline::CrossReferenceResolver;
use crate::program::StageInfo;

/// Rendered content of the active detail tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    DeepDive(DeepDiveView),
    Tables(TablesView),
    Actions(ActionsView),
    Flow(FlowView),
}

impl DetailView {
    pub fn tab(&self) -> DetailTab {
        match self {
            DetailView::DeepDive(_) => DetailTab::DeepDive,
            DetailView::Tables(_) => DetailTab::Tables,
            DetailView::Actions(_) => DetailTab::Actions,
            DetailView::Flow(_) => DetailTab::Flow,
        }
    }
}

/// Project `stage` into the model for `tab`.
pub fn render_detail(
    tab: DetailTab,
    stage: &StageInfo,
    resolver: &CrossReferenceResolver<'_>,
) -> DetailView {
    match tab {
        DetailTab::DeepDive => DetailView::DeepDive(DeepDiveView::render(stage, resolver)),
        DetailTab::Tables => DetailView::Tables(TablesView::render(stage, resolver)),
        DetailTab::Actions => DetailView::Actions(ActionsView::render(stage)),
        DetailTab::Flow => DetailView::Flow(FlowView::render(stage)),
    }
}
