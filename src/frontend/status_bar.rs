//! Status bar panel showing load state, counts and errors.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::session::ProgramStatus;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub status: ProgramStatus,
    pub title: Option<&'a str>,
    pub stage_count: usize,
    pub selected: Option<&'a str>,
    pub loading: bool,
    pub last_error: Option<&'a str>,
}

/// Render the status bar. The button beside an error dismisses it.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let (status_color, status_text) = match ctx.status {
            ProgramStatus::Loaded => (Color32::GREEN, "Loaded"),
            ProgramStatus::LoadedEmpty => (Color32::YELLOW, "Empty"),
            ProgramStatus::NotLoaded => (Color32::GRAY, "No program"),
        };
        ui.colored_label(status_color, "●");
        let label = match ctx.title {
            Some(title) => format!("{}: {}", status_text, title),
            None => status_text.to_string(),
        };
        ui.label(RichText::new(label).small());

        if ctx.status != ProgramStatus::NotLoaded {
            ui.separator();
            ui.label(RichText::new(format!("Stages: {}", ctx.stage_count)).small());
        }

        if let Some(selected) = ctx.selected {
            ui.separator();
            ui.label(RichText::new(format!("Selected: {}", selected)).small());
        }

        if ctx.loading {
            ui.separator();
            ui.spinner();
            ui.label(RichText::new("Loading...").small());
        }

        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                    actions.push(AppAction::DismissError);
                }
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
    actions
}
