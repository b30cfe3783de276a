//! Frontend module for egui UI
//!
//! Paints the exploration [`Session`] with eframe/egui. Documents are read on
//! the loader thread and arrive through the [`LoaderBridge`] once per frame.
//!
//! # Layout
//!
//! - Menu bar: File (open, close), View (pipeline, overview, orientation, theme)
//! - Status bar: load state, stage count, loader errors
//! - Right side panel: stage details, while a stage is selected in pipeline mode
//! - Central area: the pipeline canvas, the overview, or an empty-state message
//!
//! # Main Types
//!
//! - [`P4LensApp`] - Main application state implementing [`eframe::App`]
//! - [`AppAction`] - Everything a view can ask the app to do
//!
//! # Submodules
//!
//! - `pipeline_view` - Stage canvas with pan/zoom
//! - `detail_panel` - Tabbed stage details
//! - `overview` - Aggregate counts
//! - `widgets` - Badges, chips and stage colors

pub mod detail_panel;
pub mod overview;
pub mod pipeline_view;
pub mod state;
pub mod status_bar;
pub mod widgets;

pub use state::AppAction;
pub use widgets::*;

use std::path::PathBuf;

use crate::config::{AppConfig, UiPreferences};
use crate::explorer::{ExplorerAction, ViewMode};
use crate::loader::{LoaderBridge, LoaderMessage};
use crate::session::{ProgramStatus, Session};
use pipeline_view::PipelineViewState;
use status_bar::{render_status_bar, StatusBarContext};

/// Shown before any program has been loaded
pub const NOT_LOADED_MESSAGE: &str = "Open a P4 program structure to visualize.";
/// Shown when the loaded program has no stages
pub const EMPTY_PROGRAM_MESSAGE: &str = "The loaded program contains no stages.";

const STRUCTURE_EXTENSIONS: &[&str] = &["json"];

/// Main application state for the explorer
pub struct P4LensApp {
    // === Communication ===
    loader: LoaderBridge,
    /// Loads sent to the worker that have not answered yet
    pending_loads: usize,

    // === Shared State ===
    config: AppConfig,
    session: Session,
    last_error: Option<String>,

    // === Views ===
    pipeline_view: PipelineViewState,
}

impl P4LensApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        loader: LoaderBridge,
        config: AppConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        apply_preferences(&cc.egui_ctx, &config.ui);

        let mut app = Self {
            loader,
            pending_loads: 0,
            config,
            session: Session::new(),
            last_error: None,
            pipeline_view: PipelineViewState::default(),
        };

        if let Some(path) = initial_file {
            app.handle_action(AppAction::OpenFile(path));
        }
        app
    }

    fn process_loader_messages(&mut self) -> bool {
        let messages = self.loader.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            self.pending_loads = self.pending_loads.saturating_sub(1);
            match msg {
                LoaderMessage::Loaded(doc) => {
                    tracing::debug!("Loaded document {:?}", doc.source);
                    self.session.load_structure(doc.structure);
                    self.pipeline_view.reset();
                    self.last_error = None;
                }
                LoaderMessage::Failed { source, error } => {
                    tracing::error!("Failed to load {:?}: {}", source, error);
                    self.last_error = Some(format!("Load failed: {}", error));
                }
            }
        }

        had_messages
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Explorer(action) => {
                self.session.dispatch(action);
            }
            AppAction::OpenFileDialog => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Open Program Structure")
                    .add_filter("P4 Structure", STRUCTURE_EXTENSIONS)
                    .pick_file()
                {
                    self.handle_action(AppAction::OpenFile(path));
                }
            }
            AppAction::OpenFile(path) => {
                match self.loader.load_file(path) {
                    Ok(()) => self.pending_loads += 1,
                    Err(e) => {
                        tracing::error!("Failed to queue load: {}", e);
                        self.last_error = Some(e.to_string());
                    }
                }
            }
            AppAction::CloseProgram => {
                self.session.unload();
                self.pipeline_view.reset();
            }
            AppAction::SetDarkMode(dark_mode) => {
                self.config.ui.dark_mode = dark_mode;
                self.save_config();
            }
            AppAction::SetOrientation(orientation) => {
                self.config.layout.orientation = orientation;
                self.pipeline_view.reset();
                self.save_config();
            }
            AppAction::ResetCanvas => {
                self.pipeline_view.reset();
            }
            AppAction::DismissError => {
                self.last_error = None;
            }
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        // Only the last dropped file wins; loading several would just replace each other
        if let Some(path) = dropped.into_iter().last() {
            self.handle_action(AppAction::OpenFile(path));
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        let mut actions = Vec::new();
        ctx.input(|i| {
            if i.key_pressed(Key::O) && i.modifiers.command_only() {
                actions.push(AppAction::OpenFileDialog);
            }
            if i.key_pressed(Key::W) && i.modifiers.command_only() {
                actions.push(AppAction::CloseProgram);
            }
            if i.key_pressed(Key::Escape) && !i.modifiers.any() {
                actions.push(ExplorerAction::ClearSelection.into());
            }
        });

        for action in actions {
            self.handle_action(action);
        }
    }

    fn render_menu_bar(&self, ui: &mut egui::Ui) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let explorer = self.session.explorer();
        let loaded = self.session.status() != ProgramStatus::NotLoaded;

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open...").clicked() {
                    actions.push(AppAction::OpenFileDialog);
                    ui.close();
                }
                if ui
                    .add_enabled(loaded, egui::Button::new("Close Program"))
                    .clicked()
                {
                    actions.push(AppAction::CloseProgram);
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                for mode in [ViewMode::Pipeline, ViewMode::Overview] {
                    if ui
                        .selectable_label(explorer.view_mode == mode, mode.display_name())
                        .clicked()
                    {
                        actions.push(ExplorerAction::SetViewMode(mode).into());
                        ui.close();
                    }
                }

                ui.separator();

                for orientation in [
                    crate::config::Orientation::Vertical,
                    crate::config::Orientation::Horizontal,
                ] {
                    if ui
                        .selectable_label(
                            self.config.layout.orientation == orientation,
                            orientation.display_name(),
                        )
                        .clicked()
                    {
                        actions.push(AppAction::SetOrientation(orientation));
                        ui.close();
                    }
                }
                if ui.button("Reset Zoom").clicked() {
                    actions.push(AppAction::ResetCanvas);
                    ui.close();
                }

                ui.separator();

                let mut dark_mode = self.config.ui.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    actions.push(AppAction::SetDarkMode(dark_mode));
                }
            });

            // Right-aligned: program title
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(program) = self.session.program() {
                    ui.strong(program.title());
                }
            });
        });

        actions
    }

    fn render_central(&mut self, ui: &mut egui::Ui) -> Vec<AppAction> {
        let status = self.session.status();
        let Some(program) = self.session.program() else {
            empty_state(ui, NOT_LOADED_MESSAGE);
            return Vec::new();
        };
        if status == ProgramStatus::LoadedEmpty {
            empty_state(ui, EMPTY_PROGRAM_MESSAGE);
            return Vec::new();
        }

        match self.session.explorer().view_mode {
            ViewMode::Pipeline => pipeline_view::render(
                &mut self.pipeline_view,
                &program.graph,
                self.session.explorer().selected_stage.as_ref(),
                &self.config.layout,
                ui,
            ),
            ViewMode::Overview => overview::render(
                ui,
                program.title(),
                &program.loaded_at,
                &program.overview,
                &program.stages,
            ),
        }
    }
}

fn empty_state(ui: &mut egui::Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(message).size(16.0).weak());
    });
}

/// Apply theme and font scale to the egui context
fn apply_preferences(ctx: &egui::Context, prefs: &UiPreferences) {
    set_theme(ctx, prefs.dark_mode);

    let mut style = (*ctx.style()).clone();
    style.text_styles.iter_mut().for_each(|(_, font_id)| {
        font_id.size *= prefs.font_scale;
    });
    ctx.set_style(style);
}

fn set_theme(ctx: &egui::Context, dark_mode: bool) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

impl eframe::App for P4LensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_messages = self.process_loader_messages();
        self.handle_dropped_files(ctx);
        self.handle_keyboard_shortcuts(ctx);

        if had_messages {
            ctx.request_repaint();
        } else if self.pending_loads > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            actions.extend(self.render_menu_bar(ui));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let selected = self.session.selected_stage().map(|(d, _)| d.name.as_str());
            let status_ctx = StatusBarContext {
                status: self.session.status(),
                title: self.session.program().map(|p| p.title()),
                stage_count: self.session.stages().len(),
                selected,
                loading: self.pending_loads > 0,
                last_error: self.last_error.as_deref(),
            };
            actions.extend(render_status_bar(ui, &status_ctx));
        });

        if let (Some(view), Some((stage, _))) = (self.session.detail(), self.session.selected_stage())
        {
            egui::SidePanel::right("detail_panel")
                .resizable(true)
                .default_width(380.0)
                .min_width(260.0)
                .show(ctx, |ui| {
                    actions.extend(detail_panel::render(ui, stage, &view));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(self.render_central(ui));
        });

        let theme_changed = actions
            .iter()
            .any(|a| matches!(a, AppAction::SetDarkMode(_)));
        for action in actions {
            self.handle_action(action);
        }
        if theme_changed {
            set_theme(ctx, self.config.ui.dark_mode);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.loader.shutdown();
        self.save_config();
    }
}

