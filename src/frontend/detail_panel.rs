//! Detail panel: tabbed side panel for the selected stage.
//!
//! Paints a [`DetailView`] model. The header row carries the stage title, the
//! kind chip and the close/deselect buttons; tab switches become
//! [`ExplorerAction::SetTab`].

use egui::{Color32, RichText, Ui};

use crate::explorer::detail::{
    ActionsView, DeepDiveView, DetailView, FlowView, TablesView, NO_EXPLICIT_FLOW,
};
use crate::explorer::{DetailTab, ExplorerAction};
use crate::frontend::state::AppAction;
use crate::frontend::widgets::{CountBadge, KindChip};
use crate::pipeline::StageDescriptor;

/// Render the panel for `stage` showing `view`.
pub fn render(ui: &mut Ui, stage: &StageDescriptor, view: &DetailView) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.heading(stage.name.as_str());
        ui.add(KindChip::new(&stage.kind));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").on_hover_text("Close panel").clicked() {
                actions.push(ExplorerAction::ClosePanel.into());
            }
            if ui.button("Deselect").clicked() {
                actions.push(ExplorerAction::ClearSelection.into());
            }
        });
    });

    ui.horizontal(|ui| {
        let stats = &stage.stats;
        ui.add(CountBadge::new("T", stats.table_count).with_tooltip("Tables applied"));
        ui.add(CountBadge::new("A", stats.action_count).with_tooltip("Actions declared"));
        ui.add(CountBadge::new("S", stats.state_count).with_tooltip("Parser states"));
    });
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for tab in DetailTab::ALL {
            if ui
                .selectable_label(view.tab() == tab, tab.display_name())
                .clicked()
                && view.tab() != tab
            {
                actions.push(ExplorerAction::SetTab(tab).into());
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| match view {
            DetailView::DeepDive(v) => render_deep_dive(ui, v),
            DetailView::Tables(v) => render_tables(ui, v),
            DetailView::Actions(v) => render_actions(ui, v),
            DetailView::Flow(v) => render_flow(ui, v),
        });

    actions
}

fn render_deep_dive(ui: &mut Ui, view: &DeepDiveView) {
    ui.label(&view.explanation);

    if !view.parser_steps.is_empty() {
        ui.add_space(8.0);
        ui.strong("Parser states");
        for step in &view.parser_steps {
            ui.label(format!("• {}", step.summary()));
        }
    }

    if let Some(body) = &view.apply_body {
        ui.add_space(8.0);
        ui.strong("Apply block");
        code_block(ui, body);
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!("Header types ({})", view.headers.len()))
        .id_salt("header_types")
        .default_open(true)
        .show(ui, |ui| {
            if view.headers.is_empty() {
                ui.weak("No header types declared.");
            }
            for header in &view.headers {
                egui::CollapsingHeader::new(format!(
                    "{} ({} bits)",
                    header.name,
                    header.total_bits()
                ))
                .id_salt(("header_type", &header.name))
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new(("header_fields", &header.name))
                        .striped(true)
                        .show(ui, |ui| {
                            for field in &header.fields {
                                ui.monospace(&field.field);
                                ui.label(format!("bit<{}>", field.bits));
                                ui.end_row();
                            }
                        });
                });
            }
        });

    ui.collapsing(format!("Externs ({})", view.externs.len()), |ui| {
        if view.externs.is_empty() {
            ui.weak("No externs declared.");
        }
        for ext in &view.externs {
            ui.monospace(format!("{} → {}", ext.ty, ext.name));
        }
    });
}

fn render_tables(ui: &mut Ui, view: &TablesView) {
    if view.is_empty() {
        ui.weak("This stage applies no tables.");
        return;
    }
    for table in &view.tables {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.strong(&table.name);
                if let Some(size) = table.size {
                    ui.label(RichText::new(format!("size {}", size)).small());
                }
            });
            labelled_list(ui, "Keys", &table.keys);
            labelled_list(ui, "Actions", &table.actions);
        });
        ui.add_space(4.0);
    }
}

fn render_actions(ui: &mut Ui, view: &ActionsView) {
    if view.actions.is_empty() {
        ui.weak("This stage declares no actions.");
        return;
    }
    for action in &view.actions {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.monospace(RichText::new(action.signature()).strong());
            if let Some(body) = &action.body_preview {
                code_block(ui, body);
            }
        });
        ui.add_space(4.0);
    }
}

fn render_flow(ui: &mut Ui, view: &FlowView) {
    match view {
        FlowView::Steps(steps) => {
            for step in steps {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(format!("{}.", step.number)).strong());
                    ui.label(&step.text);
                });
            }
        }
        FlowView::NoExplicitFlow => {
            ui.weak(NO_EXPLICIT_FLOW);
        }
    }
}

fn labelled_list(ui: &mut Ui, label: &str, items: &[String]) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{}:", label)).small().color(Color32::GRAY));
        if items.is_empty() {
            ui.weak("none");
        }
        for item in items {
            ui.monospace(item);
        }
    });
}

fn code_block(ui: &mut Ui, text: &str) {
    egui::Frame::new()
        .fill(ui.visuals().code_bg_color)
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.monospace(text);
        });
}
