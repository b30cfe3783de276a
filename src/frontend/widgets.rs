//! Custom widgets for the P4Lens UI
//!
//! # Widgets
//!
//! - [`CountBadge`] - Small rounded counter ("T 2") used on stage cards
//! - [`KindChip`] - Colored stage-kind label
//! - [`StatCard`] - Large number with caption for the overview grid
//!
//! [`stage_color`] is the single source of per-kind colors for both the canvas
//! and the panels.

use egui::{Color32, CornerRadius, Response, RichText, Sense, Stroke, Ui, Vec2, Widget};

use crate::program::StageKind;

/// Fill color for a stage of the given kind
pub fn stage_color(kind: &StageKind) -> Color32 {
    match kind {
        StageKind::Parser => Color32::from_rgb(59, 130, 246),
        StageKind::Control => Color32::from_rgb(16, 185, 129),
        StageKind::Deparser => Color32::from_rgb(249, 115, 22),
        StageKind::Other(_) => Color32::from_rgb(100, 116, 139),
    }
}

/// A compact labelled counter
pub struct CountBadge {
    label: &'static str,
    count: usize,
    tooltip: Option<String>,
}

impl CountBadge {
    pub fn new(label: &'static str, count: usize) -> Self {
        Self {
            label,
            count,
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for CountBadge {
    fn ui(self, ui: &mut Ui) -> Response {
        let text = RichText::new(format!("{} {}", self.label, self.count)).small();
        let color = if self.count > 0 {
            ui.visuals().strong_text_color()
        } else {
            ui.visuals().weak_text_color()
        };
        let response = egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(CornerRadius::same(4))
            .inner_margin(egui::Margin::symmetric(4, 1))
            .show(ui, |ui| ui.label(text.color(color)))
            .response;

        match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        }
    }
}

/// Stage kind label drawn in the kind's color
pub struct KindChip<'a> {
    kind: &'a StageKind,
}

impl<'a> KindChip<'a> {
    pub fn new(kind: &'a StageKind) -> Self {
        Self { kind }
    }
}

impl Widget for KindChip<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let color = stage_color(self.kind);
        egui::Frame::new()
            .stroke(Stroke::new(1.0, color))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(6, 1))
            .show(ui, |ui| {
                ui.label(RichText::new(self.kind.label().to_uppercase()).small().color(color))
            })
            .response
    }
}

/// Headline number with a caption underneath
pub struct StatCard {
    caption: &'static str,
    value: usize,
    accent: Color32,
}

impl StatCard {
    pub fn new(caption: &'static str, value: usize) -> Self {
        Self {
            caption,
            value,
            accent: Color32::from_rgb(59, 130, 246),
        }
    }

    pub fn with_accent(mut self, accent: Color32) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for StatCard {
    fn ui(self, ui: &mut Ui) -> Response {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_min_size(Vec2::new(140.0, 64.0));
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(self.value.to_string())
                            .size(28.0)
                            .strong()
                            .color(self.accent),
                    );
                    ui.label(RichText::new(self.caption).small());
                });
            })
            .response
            .interact(Sense::hover())
    }
}
