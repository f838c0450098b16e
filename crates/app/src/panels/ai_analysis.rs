//! Project analysis with an "ask a question" box underneath.

use super::{failure_note, note_refusal, sign_in_card, trigger_button, PanelResponse};
use crate::widgets::{badge, badges::impact_colors, card, marked_line, secondary_badge};
use egui::{Color32, RichText, Ui};
use services::{ActionPanel, Analyzer, AuthSubscription};
use shared::results::AiAnalysisResult;
use shared::tabs::{InsightTab, TabController, TabSet};
use shared::PanelError;
use tokio::runtime::Handle;

pub const ANALYSIS_FAILED: &str = "The analysis could not be completed. Please try again.";
pub const CHAT_FALLBACK: &str =
    "Sorry, I encountered an error while processing your question. Please try again.";

pub struct AiAnalysisPanel {
    analyzer: Analyzer,
    runtime: Handle,
    auth: AuthSubscription,
    analysis: ActionPanel<AiAnalysisResult>,
    chat: ActionPanel<String>,
    question: String,
    result_tabs: TabController<InsightTab>,
}

impl AiAnalysisPanel {
    pub fn new(analyzer: Analyzer, runtime: Handle, auth: AuthSubscription) -> Self {
        Self {
            analyzer,
            runtime,
            auth,
            analysis: ActionPanel::new("ai-analysis", ANALYSIS_FAILED),
            chat: ActionPanel::new("ai-chat", CHAT_FALLBACK),
            question: String::new(),
            result_tabs: TabController::default(),
        }
    }

    /// Returns true if either run settled.
    pub fn poll(&mut self) -> bool {
        let analysis = self.analysis.poll();
        let chat = self.chat.poll();
        analysis || chat
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.is_running() || self.chat.is_running()
    }

    pub fn run_analysis(&mut self) -> Result<(), PanelError> {
        let analyzer = self.analyzer.clone();
        self.analysis
            .trigger(&self.runtime, self.auth.user_present(), move || async move {
                analyzer.analyze_project().await
            })?;
        Ok(())
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn ask(&mut self) -> Result<(), PanelError> {
        let question = self.question.trim().to_string();
        if question.is_empty() {
            return Err(PanelError::EmptyQuestion);
        }
        let analyzer = self.analyzer.clone();
        self.chat
            .trigger(&self.runtime, self.auth.user_present(), move || async move {
                analyzer.ask(&question).await
            })?;
        Ok(())
    }

    pub fn analysis(&self) -> &ActionPanel<AiAnalysisResult> {
        &self.analysis
    }

    /// The fallback text if the last question failed, else the last answer.
    pub fn chat_answer(&self) -> Option<String> {
        self.chat
            .state()
            .failure()
            .map(ToString::to_string)
            .or_else(|| self.chat.result().cloned())
    }

    pub fn ui(&mut self, ui: &mut Ui) -> PanelResponse {
        if !self.auth.user_present() {
            return sign_in_card(
                ui,
                "🧠 AI-Powered Analysis",
                "Sign in to access AI analysis features",
            );
        }

        let mut response = PanelResponse::default();
        card(
            ui,
            "🧠 AI-Powered Mate Engine Analysis",
            Some("Get AI insights about the Mate Engine project's architecture, features, and optimization opportunities"),
            |ui| {
                if trigger_button(
                    ui,
                    self.analysis.is_running(),
                    "✨ Generate AI Analysis",
                    "Analyzing Project...",
                ) {
                    response = note_refusal("ai-analysis", self.run_analysis());
                }
                if let Some(failure) = self.analysis.state().failure() {
                    failure_note(ui, failure);
                }
            },
        );

        if self.analysis.result().is_some() {
            ui.add_space(8.0);
            self.results_ui(ui);
        }

        ui.add_space(8.0);
        let chat = self.chat_ui(ui);
        PanelResponse {
            login_requested: response.login_requested || chat.login_requested,
        }
    }

    fn results_ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for &tab in self.result_tabs.tabs() {
                let selected = self.result_tabs.is_selected(tab);
                if ui.selectable_label(selected, tab.title()).clicked() {
                    self.result_tabs.select_tab(tab);
                }
            }
        });
        ui.separator();

        let Some(result) = self.analysis.result() else {
            return;
        };
        match self.result_tabs.selected() {
            InsightTab::Summary => {
                card(ui, "🧠 AI Analysis Summary", None, |ui| {
                    ui.label(result.summary.as_str());
                });
            }
            InsightTab::Insights => {
                for insight in &result.insights {
                    card(ui, &insight.title, None, |ui| {
                        ui.horizontal(|ui| {
                            secondary_badge(ui, insight.category.as_str());
                            badge(
                                ui,
                                format!("{} impact", insight.impact.as_str()),
                                impact_colors(insight.impact),
                            );
                        });
                        ui.label(insight.description.as_str());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Confidence").weak());
                            ui.add(
                                egui::ProgressBar::new(f32::from(insight.confidence) / 100.0)
                                    .desired_width(160.0)
                                    .text(format!("{}%", insight.confidence)),
                            );
                        });
                    });
                    ui.add_space(4.0);
                }
            }
            InsightTab::Suggestions => {
                card(ui, "💡 Feature Suggestions", None, |ui| {
                    for suggestion in &result.suggestions {
                        marked_line(ui, "✔", Color32::from_rgb(34, 197, 94), suggestion);
                    }
                });
            }
            InsightTab::Technical => {
                card(ui, "📈 Technical Recommendations", None, |ui| {
                    for recommendation in &result.technical_recommendations {
                        marked_line(ui, "➜", Color32::from_rgb(59, 130, 246), recommendation);
                    }
                });
            }
        }
    }

    fn chat_ui(&mut self, ui: &mut Ui) -> PanelResponse {
        let mut response = PanelResponse::default();
        card(
            ui,
            "💬 Ask AI About Mate Engine",
            Some("Ask specific questions about the project, features, or technical implementation"),
            |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.question)
                        .hint_text("Ask me anything about Mate Engine's architecture, features, performance, or development...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                let can_ask = !self.question.trim().is_empty() && !self.chat.is_running();
                ui.horizontal(|ui| {
                    if self.chat.is_running() {
                        ui.spinner();
                        ui.label("Thinking...");
                    } else if ui.add_enabled(can_ask, egui::Button::new("Ask AI")).clicked() {
                        response = note_refusal("ai-chat", self.ask());
                    }
                });

                if let Some(answer) = self.chat_answer() {
                    ui.add_space(6.0);
                    egui::Frame::none()
                        .fill(ui.visuals().faint_bg_color)
                        .rounding(egui::Rounding::same(8.0))
                        .inner_margin(egui::Margin::same(10.0))
                        .show(ui, |ui| {
                            ui.label(RichText::new("🧠 AI Response").strong());
                            ui.label(answer);
                        });
                }
            },
        );
        response
    }
}
