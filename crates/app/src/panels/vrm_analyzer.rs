//! Model file analyzer. A file comes in by drag and drop or the picker,
//! gets uploaded, and is assessed from its size plus a generated write-up.

use super::{failure_note, note_refusal, sign_in_card, PanelResponse};
use crate::widgets::{
    badge, badges::compatibility_colors, badges::severity_icon, card, marked_line,
    model_file_from_path, DragDropHandler, ModelFilePicker,
};
use egui::{Color32, RichText, Ui, Vec2};
use services::{ActionPanel, Analyzer, AuthSubscription};
use shared::results::VrmAnalysisResult;
use shared::selection::{FileSelection, ModelFile};
use shared::PanelError;
use std::path::Path;
use tokio::runtime::Handle;

pub const VRM_FAILED: &str = "Model analysis failed. Please try again.";

pub struct VrmAnalyzerPanel {
    analyzer: Analyzer,
    runtime: Handle,
    auth: AuthSubscription,
    selection: FileSelection,
    analysis: ActionPanel<VrmAnalysisResult>,
    drop_zone: DragDropHandler,
    picker: ModelFilePicker,
}

impl VrmAnalyzerPanel {
    pub fn new(analyzer: Analyzer, runtime: Handle, auth: AuthSubscription) -> Self {
        Self {
            analyzer,
            runtime,
            auth,
            selection: FileSelection::new(),
            analysis: ActionPanel::new("vrm", VRM_FAILED),
            drop_zone: DragDropHandler::new("vrm-drop-zone"),
            picker: ModelFilePicker::new(),
        }
    }

    pub fn poll(&mut self) -> bool {
        let mut changed = self.analysis.poll();
        if let Some(path) = self.picker.try_take() {
            self.offer_path(&path);
            changed = true;
        }
        changed
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.is_running() || self.picker.is_picking()
    }

    pub fn selected_file(&self) -> Option<&ModelFile> {
        self.selection.current()
    }

    pub fn analysis(&self) -> &ActionPanel<VrmAnalysisResult> {
        &self.analysis
    }

    /// Select a file from disk. Unreadable or unsupported files are ignored.
    pub fn offer_path(&mut self, path: &Path) {
        match model_file_from_path(path) {
            Ok(file) => {
                let _ = self.offer_file(file);
            }
            Err(e) => tracing::warn!(error = %format!("{:#}", e), "could not read dropped file"),
        }
    }

    /// Replace the selection. A new file invalidates the previous result
    /// and any run still in flight for the old one.
    pub fn offer_file(&mut self, file: ModelFile) -> Result<(), PanelError> {
        match self.selection.offer(file) {
            Ok(file) => {
                tracing::info!(name = %file.name, size = %file.size_label(), "model file selected");
                self.analysis.reset();
                Ok(())
            }
            Err(e) => {
                tracing::debug!(reason = %e, "ignoring file selection");
                Err(e)
            }
        }
    }

    pub fn analyze(&mut self) -> Result<(), PanelError> {
        let file = self
            .selection
            .current()
            .cloned()
            .ok_or(PanelError::NoFileSelected)?;
        let analyzer = self.analyzer.clone();
        self.analysis
            .trigger(&self.runtime, self.auth.user_present(), move || async move {
                analyzer.analyze_model_file(&file).await
            })?;
        Ok(())
    }

    /// Starts in the folder of the current file, if there is one.
    fn open_picker(&mut self) {
        let mut picker = ModelFilePicker::new().with_title("Choose a VRM model");
        if let Some(dir) = self
            .selection
            .current()
            .and_then(|file| file.path.as_deref())
            .and_then(Path::parent)
        {
            picker = picker.with_start_dir(dir.to_path_buf());
        }
        self.picker = picker;
        self.picker.open();
    }

    pub fn ui(&mut self, ui: &mut Ui) -> PanelResponse {
        if !self.auth.user_present() {
            return sign_in_card(
                ui,
                "📄 VRM Model Analyzer",
                "Sign in to analyze VRM models",
            );
        }

        self.drop_zone.update(ui.ctx());
        for path in self.drop_zone.take_dropped_files() {
            self.offer_path(&path);
        }
        self.drop_zone.show_drag_overlay(ui.ctx());

        let mut response = PanelResponse::default();
        card(
            ui,
            "📄 VRM Model Analyzer",
            Some("Upload and analyze VRM models for Mate Engine compatibility and performance"),
            |ui| {
                let size = Vec2::new(ui.available_width(), 140.0);
                let zone = self.drop_zone.show_drop_zone(
                    ui,
                    size,
                    "Drop your VRM file here",
                    "or click to browse (.vrm, .glb files supported)",
                );
                if zone.clicked() && !self.picker.is_picking() {
                    self.open_picker();
                }

                let file = self.selection.current().cloned();
                if let Some(file) = file {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📄").size(22.0));
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&file.name).strong());
                            ui.label(RichText::new(file.size_label()).weak());
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if self.analysis.is_running() {
                                ui.label("Analyzing...");
                                ui.spinner();
                            } else if ui.button("⚡ Analyze Model").clicked() {
                                response = note_refusal("vrm", self.analyze());
                            }
                        });
                    });
                }
                if let Some(failure) = self.analysis.state().failure() {
                    failure_note(ui, failure);
                }
            },
        );

        if let Some(result) = self.analysis.result() {
            ui.add_space(8.0);
            result_ui(ui, result);
        }
        response
    }
}

fn result_ui(ui: &mut Ui, result: &VrmAnalysisResult) {
    card(
        ui,
        "Analysis Results",
        Some(&format!("Compatibility score: {}", result.score_label())),
        |ui| {
            badge(
                ui,
                result.compatibility.as_str().to_uppercase(),
                compatibility_colors(result.compatibility),
            );
            ui.add(egui::ProgressBar::new(result.score_fraction()));
            ui.add_space(6.0);
            ui.columns(3, |columns| {
                let rows = [
                    ("Memory Usage", &result.performance.memory, Color32::from_rgb(29, 78, 216)),
                    ("Rendering", &result.performance.rendering, Color32::from_rgb(21, 128, 61)),
                    ("Animation", &result.performance.animation, Color32::from_rgb(126, 34, 206)),
                ];
                for (column, (title, value, color)) in columns.iter_mut().zip(rows) {
                    column.label(RichText::new(title).strong().color(color));
                    column.label(value.as_str());
                }
            });
            if let Some(url) = &result.public_url {
                ui.add_space(4.0);
                ui.hyperlink_to("Uploaded copy", url);
            }
        },
    );
    ui.add_space(8.0);

    card(ui, "⚠ Issues & Warnings", None, |ui| {
        for issue in &result.issues {
            let (icon, color) = severity_icon(issue.severity);
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(icon).color(color));
                ui.label(issue.message.as_str());
            });
            if let Some(suggestion) = &issue.suggestion {
                ui.label(RichText::new(format!("💡 {}", suggestion)).italics().weak());
            }
            ui.add_space(4.0);
        }
    });
    ui.add_space(8.0);

    card(
        ui,
        "⚡ Optimization Recommendations",
        Some("AI-generated recommendations to improve performance"),
        |ui| {
            for optimization in &result.optimizations {
                marked_line(ui, "✔", Color32::from_rgb(34, 197, 94), optimization);
            }
        },
    );
    ui.add_space(8.0);

    card(ui, "🧠 AI Analysis", None, |ui| {
        ui.label(result.narrative.as_str());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_support::{fake_analyzer, signed_in, signed_out, settle, FakeGenerator};
    use shared::metrics::MIB;
    use shared::panel::PanelPhase;
    use shared::results::Compatibility;
    use std::io::Write;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn model_on_disk(dir: &tempfile::TempDir, name: &str, len: usize) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&vec![0u8; len]).unwrap();
        path
    }

    #[tokio::test]
    async fn test_analyze_without_file_is_refused() {
        let generator = Arc::new(FakeGenerator::replying("ok"));
        let (_session, auth) = signed_in().await;
        let mut panel = VrmAnalyzerPanel::new(fake_analyzer(generator.clone()), Handle::current(), auth);

        assert_eq!(panel.analyze(), Err(PanelError::NoFileSelected));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_file_leaves_selection_alone() {
        let (_session, auth) = signed_out();
        let mut panel = VrmAnalyzerPanel::new(
            fake_analyzer(Arc::new(FakeGenerator::replying("ok"))),
            Handle::current(),
            auth,
        );

        panel
            .offer_file(ModelFile::new("alice.VRM", MIB, "model/vrm"))
            .unwrap();
        let err = panel
            .offer_file(ModelFile::new("notes.txt", 10, "text/plain"))
            .unwrap_err();

        assert!(matches!(err, PanelError::InvalidFileSelection { .. }));
        assert_eq!(panel.selected_file().map(|f| f.name.as_str()), Some("alice.VRM"));
    }

    #[tokio::test]
    async fn test_dropped_path_is_analyzed() {
        let dir = tempfile::tempdir().unwrap();
        let path = model_on_disk(&dir, "alice.vrm", 2048);
        let (_session, auth) = signed_in().await;
        let mut panel = VrmAnalyzerPanel::new(
            fake_analyzer(Arc::new(FakeGenerator::replying("Runs well."))),
            Handle::current(),
            auth,
        );

        panel.offer_path(&path);
        panel.analyze().unwrap();
        settle(|| panel.poll()).await;

        let result = panel.analysis().result().unwrap();
        assert_eq!(result.compatibility, Compatibility::Excellent);
        assert_eq!(result.narrative, "Runs well.");
        assert_eq!(
            result.public_url.as_deref(),
            Some("https://cdn.example.com/vrm-analysis/alice.vrm")
        );
    }

    #[tokio::test]
    async fn test_new_file_invalidates_previous_result() {
        let dir = tempfile::tempdir().unwrap();
        let first = model_on_disk(&dir, "alice.vrm", 1024);
        let second = model_on_disk(&dir, "bob.glb", 1024);
        let (_session, auth) = signed_in().await;
        let mut panel = VrmAnalyzerPanel::new(
            fake_analyzer(Arc::new(FakeGenerator::replying("fine"))),
            Handle::current(),
            auth,
        );

        panel.offer_path(&first);
        panel.analyze().unwrap();
        settle(|| panel.poll()).await;
        assert!(panel.analysis().result().is_some());

        panel.offer_path(&second);
        assert!(panel.analysis().result().is_none());
        assert_eq!(panel.analysis().phase(), PanelPhase::Idle);
        assert_eq!(panel.selected_file().map(|f| f.name.as_str()), Some("bob.glb"));
    }

    #[tokio::test]
    async fn test_new_file_during_run_drops_late_result() {
        let dir = tempfile::tempdir().unwrap();
        let first = model_on_disk(&dir, "alice.vrm", 1024);
        let (_session, auth) = signed_in().await;
        let mut panel = VrmAnalyzerPanel::new(
            fake_analyzer(Arc::new(FakeGenerator::replying("late"))),
            Handle::current(),
            auth,
        );

        panel.offer_path(&first);
        panel.analyze().unwrap();
        panel
            .offer_file(ModelFile::new("bob.glb", 10, "model/gltf-binary"))
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(30)).await;

        assert!(!panel.poll());
        assert!(panel.analysis().result().is_none());
    }
}
