//! Pipeline canvas: stage cards joined by flow arrows.
//!
//! Renders the [`PipelineGraph`] with custom egui painting. Stages are laid
//! out in a single line by `order_index` (top to bottom or left to right,
//! from [`LayoutConfig`]). Supports:
//! - Pan (middle drag or shift+drag) and zoom (scroll)
//! - Click a card to select it, click empty space to clear the selection
//! - Hover tooltip with the stage's counts

use std::collections::HashMap;

use egui::{Color32, Pos2, Rect, Stroke, Ui, Vec2};

use crate::config::{LayoutConfig, Orientation};
use crate::explorer::ExplorerAction;
use crate::frontend::state::AppAction;
use crate::frontend::widgets::stage_color;
use crate::pipeline::{GraphNode, PipelineGraph, StageId};

const NODE_WIDTH: f32 = 240.0;
const NODE_HEIGHT: f32 = 96.0;
const LAYOUT_MARGIN: f32 = 40.0;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;

/// Canvas state for the pipeline view.
pub struct PipelineViewState {
    /// Pan offset for the canvas.
    pub pan_offset: Vec2,
    /// Zoom level.
    pub zoom: f32,
    /// Currently hovered stage (for tooltip display).
    pub hovered: Option<StageId>,
}

impl Default for PipelineViewState {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            hovered: None,
        }
    }
}

impl PipelineViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// World-space top-left corner of every card, keyed by stage id.
///
/// Cards sit on one axis at `order_index * stage_spacing`.
pub fn layout_positions(graph: &PipelineGraph, layout: &LayoutConfig) -> HashMap<StageId, Pos2> {
    graph
        .nodes
        .iter()
        .map(|node| {
            let offset = node.order_index as f32 * layout.stage_spacing;
            let pos = match layout.orientation {
                Orientation::Vertical => Pos2::new(LAYOUT_MARGIN, LAYOUT_MARGIN + offset),
                Orientation::Horizontal => Pos2::new(LAYOUT_MARGIN + offset, LAYOUT_MARGIN),
            };
            (node.id.clone(), pos)
        })
        .collect()
}

/// Render the pipeline canvas.
pub fn render(
    state: &mut PipelineViewState,
    graph: &PipelineGraph,
    selected: Option<&StageId>,
    layout: &LayoutConfig,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let positions = layout_positions(graph, layout);

    state.hovered = None;

    let canvas_size = ui.available_size();
    let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::click_and_drag());
    let canvas_rect = response.rect;

    painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);

    // Handle pan (middle mouse or shift+drag)
    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.shift))
    {
        state.pan_offset += response.drag_delta();
    }

    // Handle zoom (scroll)
    if response.hovered() {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 {
            let factor = 1.0 + scroll_delta * 0.002;
            state.zoom = (state.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    let zoom = state.zoom;
    let origin = canvas_rect.min.to_vec2() + state.pan_offset;
    let to_screen = |pos: Pos2| Pos2::new(pos.x * zoom + origin.x, pos.y * zoom + origin.y);
    let node_size = Vec2::new(NODE_WIDTH * zoom, NODE_HEIGHT * zoom);

    // Edges first (behind cards)
    let edge_color = ui.visuals().weak_text_color();
    for edge in &graph.edges {
        let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target))
        else {
            continue;
        };
        let from_rect = Rect::from_min_size(to_screen(from), node_size);
        let to_rect = Rect::from_min_size(to_screen(to), node_size);

        let (start, end, cp1, cp2) = match layout.orientation {
            Orientation::Vertical => {
                let start = from_rect.center_bottom();
                let end = to_rect.center_top();
                let mid_y = (start.y + end.y) * 0.5;
                (start, end, Pos2::new(start.x, mid_y), Pos2::new(end.x, mid_y))
            }
            Orientation::Horizontal => {
                let start = from_rect.right_center();
                let end = to_rect.left_center();
                let mid_x = (start.x + end.x) * 0.5;
                (start, end, Pos2::new(mid_x, start.y), Pos2::new(mid_x, end.y))
            }
        };

        let stroke = Stroke::new(2.0 * zoom, edge_color);
        painter.add(egui::Shape::line(
            bezier_points(start, cp1, cp2, end, 32),
            stroke,
        ));
        draw_arrow_head(&painter, cp2, end, 8.0 * zoom, stroke);
    }

    let mut clicked_node: Option<StageId> = None;
    let hover_pos = ui.ctx().pointer_hover_pos();

    for node in &graph.nodes {
        let Some(&pos) = positions.get(&node.id) else {
            continue;
        };
        let node_rect = Rect::from_min_size(to_screen(pos), node_size);
        if !canvas_rect.intersects(node_rect) {
            continue;
        }

        let is_selected = selected == Some(&node.id);
        draw_node(&painter, node, node_rect, zoom, is_selected);

        if hover_pos.is_some_and(|p| node_rect.contains(p) && canvas_rect.contains(p)) {
            state.hovered = Some(node.id.clone());
        }

        if response.clicked() {
            if let Some(pointer_pos) = response.interact_pointer_pos() {
                if node_rect.contains(pointer_pos) {
                    clicked_node = Some(node.id.clone());
                }
            }
        }
    }

    match clicked_node {
        Some(id) => actions.push(ExplorerAction::SelectStage(id).into()),
        None if response.double_clicked() => actions.push(AppAction::ResetCanvas),
        None if response.clicked() && selected.is_some() => {
            actions.push(ExplorerAction::ClearSelection.into())
        }
        None => {}
    }

    // Show tooltip for hovered node
    if let Some(node) = state.hovered.as_ref().and_then(|id| graph.node(id)) {
        egui::show_tooltip(ui.ctx(), ui.layer_id(), egui::Id::new("stage_hover"), |ui| {
            ui.set_max_width(260.0);
            ui.label(egui::RichText::new(&node.label).strong().size(14.0));
            ui.label(format!("{} stage #{}", node.kind, node.order_index + 1));
            ui.separator();
            let b = &node.badges;
            ui.label(format!(
                "{} table(s), {} action(s), {} state(s)",
                b.tables, b.actions, b.states
            ));
            ui.label(
                egui::RichText::new(format!(
                    "Program: {} header type(s), {} extern(s)",
                    b.headers, b.externs
                ))
                .small()
                .color(Color32::GRAY),
            );
        });
    }

    actions
}

fn draw_node(painter: &egui::Painter, node: &GraphNode, rect: Rect, zoom: f32, selected: bool) {
    let color = stage_color(&node.kind);
    let (stroke_color, stroke_width) = if selected {
        (Color32::WHITE, 3.0)
    } else {
        (Color32::from_gray(80), 1.0)
    };

    painter.rect_filled(rect, 6.0 * zoom, color);
    painter.rect_stroke(
        rect,
        6.0 * zoom,
        Stroke::new(stroke_width * zoom, stroke_color),
        egui::StrokeKind::Outside,
    );

    let pad = 10.0 * zoom;
    painter.text(
        rect.left_top() + Vec2::new(pad, pad),
        egui::Align2::LEFT_TOP,
        node.kind.label().to_uppercase(),
        egui::FontId::proportional(10.0 * zoom),
        Color32::from_white_alpha(200),
    );
    painter.text(
        Pos2::new(rect.left() + pad, rect.center().y),
        egui::Align2::LEFT_CENTER,
        &node.label,
        egui::FontId::proportional(15.0 * zoom),
        Color32::WHITE,
    );

    let b = &node.badges;
    let badges = format!(
        "T {}   A {}   S {}   H {}   E {}",
        b.tables, b.actions, b.states, b.headers, b.externs
    );
    painter.text(
        rect.left_bottom() + Vec2::new(pad, -pad),
        egui::Align2::LEFT_BOTTOM,
        badges,
        egui::FontId::monospace(10.0 * zoom),
        Color32::from_white_alpha(220),
    );
}

fn draw_arrow_head(painter: &egui::Painter, from: Pos2, tip: Pos2, size: f32, stroke: Stroke) {
    let dir = (tip - from).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let normal = Vec2::new(-dir.y, dir.x);
    let base = tip - dir * size;
    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + normal * size * 0.5, base - normal * size * 0.5],
        stroke.color,
        Stroke::NONE,
    ));
}

/// Compute points along a cubic bezier curve.
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let tt = t * t;
            let uu = u * u;
            let uuu = uu * u;
            let ttt = tt * t;
            Pos2::new(
                uuu * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + ttt * p3.x,
                uuu * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + ttt * p3.y,
            )
        })
        .collect()
}
