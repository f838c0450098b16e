//! Drop zone for model files.
//!
//! Uses egui's dropped_files; only files with a path on disk are kept.

use egui::{Context, Id, Rect, Response, Sense, Ui, Vec2};
use std::path::PathBuf;

pub struct DragDropHandler {
    dropped_files: Vec<PathBuf>,
    hovering: bool,
    id: Id,
}

impl DragDropHandler {
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            dropped_files: Vec::new(),
            hovering: false,
            id: Id::new(id),
        }
    }

    /// Capture hover state and any files dropped this frame.
    pub fn update(&mut self, ctx: &Context) {
        ctx.input(|i| {
            self.hovering = !i.raw.hovered_files.is_empty();

            for file in &i.raw.dropped_files {
                match &file.path {
                    Some(path) => self.dropped_files.push(path.clone()),
                    None => tracing::debug!(name = %file.name, "dropped file has no path"),
                }
            }
        });
    }

    pub fn take_dropped_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.dropped_files)
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn has_dropped_files(&self) -> bool {
        !self.dropped_files.is_empty()
    }

    /// Dashed drop target. Returns a clickable response.
    pub fn show_drop_zone(&mut self, ui: &mut Ui, size: Vec2, label: &str, hint: &str) -> Response {
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        let visuals = if self.hovering || response.hovered() {
            ui.visuals().widgets.hovered
        } else {
            ui.visuals().widgets.inactive
        };
        ui.painter().rect(rect, 8.0, visuals.weak_bg_fill, visuals.bg_stroke);

        if self.hovering {
            let stroke = egui::Stroke::new(2.0, ui.visuals().selection.bg_fill);
            ui.painter().rect_stroke(rect, 8.0, stroke);
        }

        let painter = ui.painter();
        painter.text(
            rect.center() - Vec2::new(0.0, 12.0),
            egui::Align2::CENTER_CENTER,
            if self.hovering { "📥 Release to select" } else { label },
            egui::FontId::proportional(16.0),
            ui.visuals().strong_text_color(),
        );
        painter.text(
            rect.center() + Vec2::new(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            hint,
            egui::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );

        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }

    /// Window-wide overlay while files are dragged over the app.
    pub fn show_drag_overlay(&self, ctx: &Context) {
        if !self.hovering {
            return;
        }

        egui::Area::new(self.id.with("overlay"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                ui.painter()
                    .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));

                let indicator_rect =
                    Rect::from_center_size(screen_rect.center(), Vec2::new(320.0, 140.0));
                ui.painter().rect(
                    indicator_rect,
                    8.0,
                    ui.visuals().extreme_bg_color,
                    egui::Stroke::new(3.0, ui.visuals().selection.bg_fill),
                );
                ui.painter().text(
                    indicator_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "📥 Drop a .vrm or .glb file",
                    egui::FontId::proportional(18.0),
                    ui.visuals().strong_text_color(),
                );
            });
    }
}
