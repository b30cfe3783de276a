//! Overview page with program-wide counts and the stage list.

use chrono::{DateTime, Local};
use egui::{RichText, Ui};

use crate::explorer::ExplorerAction;
use crate::frontend::state::AppAction;
use crate::frontend::widgets::{stage_color, KindChip, StatCard};
use crate::pipeline::{ProgramOverview, StageDescriptor};
use crate::program::StageKind;

/// Render the overview. Clicking a stage row jumps to it in the pipeline.
pub fn render(
    ui: &mut Ui,
    title: &str,
    loaded_at: &DateTime<Local>,
    overview: &ProgramOverview,
    stages: &[StageDescriptor],
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.heading(title);
    ui.label(
        RichText::new(format!("Loaded {}", loaded_at.format("%Y-%m-%d %H:%M:%S")))
            .small()
            .weak(),
    );
    ui.add_space(8.0);

    ui.horizontal_wrapped(|ui| {
        ui.add(StatCard::new("Stages", overview.stage_count));
        ui.add(
            StatCard::new("Tables", overview.table_count)
                .with_accent(stage_color(&StageKind::Control)),
        );
        ui.add(
            StatCard::new("Header types", overview.header_type_count)
                .with_accent(stage_color(&StageKind::Deparser)),
        );
        ui.add(StatCard::new("Actions", overview.total_action_count));
        ui.add(
            StatCard::new("Externs", overview.extern_count)
                .with_accent(stage_color(&StageKind::unknown())),
        );
    });

    ui.add_space(12.0);
    ui.strong("Stages");
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("overview_stages")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    for stage in stages {
                        ui.label(format!("{}", stage.order_index + 1));
                        ui.add(KindChip::new(&stage.kind));
                        if ui.link(&stage.name).clicked() {
                            actions.push(ExplorerAction::SelectStage(stage.id.clone()).into());
                        }
                        ui.label(format!(
                            "{} table(s), {} action(s)",
                            stage.stats.table_count, stage.stats.action_count
                        ));
                        if stage.stats.state_count > 0 {
                            ui.label(format!("{} state(s)", stage.stats.state_count));
                        } else {
                            ui.label("");
                        }
                        ui.end_row();
                    }
                });
        });

    actions
}
