//! Exploration session
//!
//! A [`Session`] is the host-facing surface of the explorer. It owns the
//! loaded [`ProgramStructure`], every model derived from it and the
//! [`ExplorerController`]. Hosts call the transition methods and read
//! accessors; nothing else mutates the session.
//!
//! # Loading
//!
//! [`Session::load_structure`] builds the complete derived model set (stages,
//! graph, overview) and then swaps it in together with a reset explorer. A
//! reload never leaves new stages next to a stale selection.
//!
//! # Status
//!
//! "Nothing loaded yet" and "loaded a program with no stages" are distinct
//! ([`ProgramStatus`]); emptiness alone is never used to tell them apart.

use chrono::{DateTime, Local};

use crate::explorer::detail::{render_detail, DetailView};
use crate::explorer::{DetailTab, ExplorerAction, ExplorerController, ExplorerState, ViewMode};
use crate::pipeline::{
    normalize, CrossReferenceResolver, PipelineGraph, PipelineGraphBuilder, ProgramOverview,
    StageDescriptor, StageId,
};
use crate::program::{ProgramStructure, StageInfo};

/// Label used when a structure carries no file name
pub const UNTITLED_PROGRAM: &str = "untitled";

/// Load state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    /// No structure has been loaded
    NotLoaded,
    /// A structure was loaded but has no stages
    LoadedEmpty,
    /// A structure with at least one stage is loaded
    Loaded,
}

/// A loaded structure and everything derived from it
#[derive(Debug, Clone)]
pub struct LoadedProgram {
    pub structure: ProgramStructure,
    pub stages: Vec<StageDescriptor>,
    pub graph: PipelineGraph,
    pub overview: ProgramOverview,
    pub loaded_at: DateTime<Local>,
}

impl LoadedProgram {
    fn derive(structure: ProgramStructure) -> Self {
        let stages = normalize(&structure);
        let graph = PipelineGraphBuilder::new(&structure.registries).build(&stages);
        let overview = ProgramOverview::compute(&stages, &structure.registries);
        Self {
            structure,
            stages,
            graph,
            overview,
            loaded_at: Local::now(),
        }
    }

    /// Display name of the program
    pub fn title(&self) -> &str {
        self.structure.filename.as_deref().unwrap_or(UNTITLED_PROGRAM)
    }

    pub fn resolver(&self) -> CrossReferenceResolver<'_> {
        CrossReferenceResolver::new(&self.structure.registries)
    }
}

/// One exploration session
#[derive(Debug, Default)]
pub struct Session {
    program: Option<LoadedProgram>,
    explorer: ExplorerController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current program and reset the explorer.
    pub fn load_structure(&mut self, structure: ProgramStructure) {
        let program = LoadedProgram::derive(structure);
        tracing::info!(
            "Loaded program {} with {} stage(s), {} table(s), {} header type(s)",
            program.title(),
            program.overview.stage_count,
            program.overview.table_count,
            program.overview.header_type_count,
        );
        self.program = Some(program);
        self.explorer.reset();
    }

    /// Decode a raw JSON value and load it
    pub fn load_value(&mut self, value: &serde_json::Value) {
        self.load_structure(ProgramStructure::from_value(value));
    }

    /// Drop the current program and return to the not-loaded state
    pub fn unload(&mut self) {
        if let Some(program) = self.program.take() {
            tracing::info!("Unloaded program {}", program.title());
        }
        self.explorer.reset();
    }

    pub fn status(&self) -> ProgramStatus {
        match &self.program {
            None => ProgramStatus::NotLoaded,
            Some(p) if p.stages.is_empty() => ProgramStatus::LoadedEmpty,
            Some(_) => ProgramStatus::Loaded,
        }
    }

    pub fn program(&self) -> Option<&LoadedProgram> {
        self.program.as_ref()
    }

    /// Ordered stage descriptors (empty when nothing is loaded)
    pub fn stages(&self) -> &[StageDescriptor] {
        self.program.as_ref().map_or(&[][..], |p| p.stages.as_slice())
    }

    pub fn graph(&self) -> Option<&PipelineGraph> {
        self.program.as_ref().map(|p| &p.graph)
    }

    pub fn overview(&self) -> Option<&ProgramOverview> {
        self.program.as_ref().map(|p| &p.overview)
    }

    pub fn explorer(&self) -> &ExplorerState {
        self.explorer.state()
    }

    /// Apply an explorer transition; returns `true` if the state changed
    pub fn dispatch(&mut self, action: ExplorerAction) -> bool {
        let stages = self.program.as_ref().map_or(&[][..], |p| p.stages.as_slice());
        self.explorer.dispatch(action, stages)
    }

    pub fn select_stage(&mut self, id: impl Into<StageId>) -> bool {
        self.dispatch(ExplorerAction::SelectStage(id.into()))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.dispatch(ExplorerAction::ClearSelection)
    }

    pub fn set_tab(&mut self, tab: DetailTab) -> bool {
        self.dispatch(ExplorerAction::SetTab(tab))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        self.dispatch(ExplorerAction::SetViewMode(mode))
    }

    /// The selected stage's descriptor and decoded data
    pub fn selected_stage(&self) -> Option<(&StageDescriptor, &StageInfo)> {
        let program = self.program.as_ref()?;
        let id = self.explorer.state().selected_stage.as_ref()?;
        let descriptor = program.stages.iter().find(|s| &s.id == id)?;
        let info = program.structure.stage(id.as_str())?;
        Some((descriptor, info))
    }

    /// Model of the active detail tab, if the panel is showing
    pub fn detail(&self) -> Option<DetailView> {
        if !self.explorer.state().detail_visible() {
            return None;
        }
        let program = self.program.as_ref()?;
        let (_, stage) = self.selected_stage()?;
        Some(render_detail(
            self.explorer.state().active_tab,
            stage,
            &program.resolver(),
        ))
    }
}
