//! Cards, badges and the color scheme for result enums.

use egui::{Color32, Response, RichText, Ui};
use shared::results::{Compatibility, Impact, Sentiment, Severity};

const RED: (Color32, Color32) = (Color32::from_rgb(153, 27, 27), Color32::from_rgb(254, 226, 226));
const YELLOW: (Color32, Color32) =
    (Color32::from_rgb(133, 77, 14), Color32::from_rgb(254, 249, 195));
const GREEN: (Color32, Color32) = (Color32::from_rgb(22, 101, 52), Color32::from_rgb(220, 252, 231));
const BLUE: (Color32, Color32) = (Color32::from_rgb(30, 64, 175), Color32::from_rgb(219, 234, 254));
const GRAY: (Color32, Color32) =
    (Color32::from_rgb(55, 65, 81), Color32::from_rgb(243, 244, 246));

/// (text, fill)
pub fn impact_colors(impact: Impact) -> (Color32, Color32) {
    match impact {
        Impact::High => RED,
        Impact::Medium => YELLOW,
        Impact::Low => GREEN,
    }
}

pub fn sentiment_colors(sentiment: Sentiment) -> (Color32, Color32) {
    match sentiment {
        Sentiment::Positive => GREEN,
        Sentiment::Neutral => YELLOW,
        Sentiment::Negative => RED,
    }
}

pub fn compatibility_colors(compatibility: Compatibility) -> (Color32, Color32) {
    match compatibility {
        Compatibility::Excellent => GREEN,
        Compatibility::Good => BLUE,
        Compatibility::Fair => YELLOW,
        Compatibility::Poor => RED,
    }
}

pub fn severity_icon(severity: Severity) -> (&'static str, Color32) {
    match severity {
        Severity::Error => ("⚠", Color32::from_rgb(239, 68, 68)),
        Severity::Warning => ("⚠", Color32::from_rgb(234, 179, 8)),
        Severity::Info => ("ℹ", Color32::from_rgb(59, 130, 246)),
    }
}

pub fn badge(ui: &mut Ui, text: impl Into<String>, (fg, bg): (Color32, Color32)) -> Response {
    egui::Frame::none()
        .fill(bg)
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| ui.label(RichText::new(text.into()).color(fg).small().strong()))
        .response
}

pub fn secondary_badge(ui: &mut Ui, text: impl Into<String>) -> Response {
    badge(ui, text, GRAY)
}

/// A titled group box, like a card in a web dashboard.
pub fn card<R>(
    ui: &mut Ui,
    title: &str,
    description: Option<&str>,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).heading().strong());
            if let Some(description) = description {
                ui.label(RichText::new(description).weak());
            }
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}

/// Bullet row with a leading colored glyph.
pub fn marked_line(ui: &mut Ui, glyph: &str, color: Color32, text: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(glyph).color(color));
        ui.label(text);
    });
}
