//! Community insights: static market trends plus a generated report.

use super::{failure_note, note_refusal, sign_in_card, trigger_button, PanelResponse};
use crate::widgets::{badge, badges::sentiment_colors, card, marked_line, secondary_badge};
use egui::{Color32, RichText, Ui};
use services::{ActionPanel, Analyzer, AuthSubscription};
use shared::facts::{MARKET_TRENDS, STEAM_OPPORTUNITIES, STEAM_POSITIVE_FACTORS};
use shared::results::CommunityMetrics;
use shared::PanelError;
use tokio::runtime::Handle;

pub const COMMUNITY_FAILED: &str = "Community analysis failed. Please try again.";

pub struct CommunityPanel {
    analyzer: Analyzer,
    runtime: Handle,
    auth: AuthSubscription,
    analysis: ActionPanel<CommunityMetrics>,
}

impl CommunityPanel {
    pub fn new(analyzer: Analyzer, runtime: Handle, auth: AuthSubscription) -> Self {
        Self {
            analyzer,
            runtime,
            auth,
            analysis: ActionPanel::new("community", COMMUNITY_FAILED),
        }
    }

    pub fn poll(&mut self) -> bool {
        self.analysis.poll()
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.is_running()
    }

    pub fn analysis(&self) -> &ActionPanel<CommunityMetrics> {
        &self.analysis
    }

    pub fn run_analysis(&mut self) -> Result<(), PanelError> {
        let analyzer = self.analyzer.clone();
        self.analysis
            .trigger(&self.runtime, self.auth.user_present(), move || async move {
                analyzer.analyze_community().await
            })?;
        Ok(())
    }

    pub fn ui(&mut self, ui: &mut Ui) -> PanelResponse {
        if !self.auth.user_present() {
            return sign_in_card(
                ui,
                "👥 Community Insights",
                "Sign in to access AI-powered community analysis",
            );
        }

        let mut response = PanelResponse::default();
        card(
            ui,
            "👥 AI Community Analysis",
            Some("Get AI insights about community engagement, growth opportunities, and market trends"),
            |ui| {
                if trigger_button(
                    ui,
                    self.analysis.is_running(),
                    "📊 Analyze Community Trends",
                    "Analyzing Community...",
                ) {
                    response = note_refusal("community", self.run_analysis());
                }
                if let Some(failure) = self.analysis.state().failure() {
                    failure_note(ui, failure);
                }
            },
        );
        ui.add_space(8.0);

        market_trends_ui(ui);

        if let Some(metrics) = self.analysis.result() {
            ui.add_space(8.0);
            metrics_ui(ui, metrics);
        }
        response
    }
}

fn market_trends_ui(ui: &mut Ui) {
    card(
        ui,
        "📈 Market Trends",
        Some("Current trends relevant to Mate Engine"),
        |ui| {
            for trend in MARKET_TRENDS {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(trend.category).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let change = format!("+{}%", trend.change);
                        if trend.emphasized() {
                            let fill = ui.visuals().selection.bg_fill;
                            badge(ui, change, (Color32::WHITE, fill));
                        } else {
                            secondary_badge(ui, change);
                        }
                        ui.label(RichText::new(format!("{}%", trend.value)).weak());
                    });
                });
                ui.add(egui::ProgressBar::new(trend.fraction()));
                ui.label(RichText::new(trend.description).small().weak());
                ui.add_space(6.0);
            }
        },
    );
}

fn metrics_ui(ui: &mut Ui, metrics: &CommunityMetrics) {
    ui.columns(3, |columns| {
        card(&mut columns[0], "💬 Engagement Score", None, |ui| {
            ui.label(RichText::new(format!("{}%", metrics.engagement)).size(26.0).strong());
            ui.add(egui::ProgressBar::new(metrics.engagement_fraction()));
            ui.label(RichText::new("Community activity level").weak());
        });
        card(&mut columns[1], "📈 Growth Potential", None, |ui| {
            ui.label(RichText::new(format!("{}%", metrics.growth)).size(26.0).strong());
            ui.add(egui::ProgressBar::new(metrics.growth_fraction()));
            ui.label(RichText::new("Projected growth rate").weak());
        });
        card(&mut columns[2], "⭐ Sentiment", None, |ui| {
            badge(
                ui,
                metrics.sentiment.as_str().to_uppercase(),
                sentiment_colors(metrics.sentiment),
            );
            ui.label(RichText::new("Overall community mood").weak());
        });
    });
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        card(&mut columns[0], "🔥 Trending Topics", None, |ui| {
            ui.horizontal_wrapped(|ui| {
                for topic in &metrics.top_topics {
                    secondary_badge(ui, topic.as_str());
                }
            });
        });
        card(&mut columns[1], "🎯 Growth Recommendations", None, |ui| {
            for recommendation in &metrics.recommendations {
                marked_line(ui, "✔", Color32::from_rgb(34, 197, 94), recommendation);
            }
        });
    });
    ui.add_space(8.0);

    card(ui, "🧠 AI Community Analysis", None, |ui| {
        ui.label(metrics.narrative.as_str());
    });
    ui.add_space(8.0);

    card(ui, "🚀 Steam Release Impact", None, |ui| {
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Positive Factors").strong());
            for factor in STEAM_POSITIVE_FACTORS {
                marked_line(&mut columns[0], "•", Color32::from_rgb(34, 197, 94), factor);
            }
            columns[1].label(RichText::new("Growth Opportunities").strong());
            for opportunity in STEAM_OPPORTUNITIES {
                marked_line(&mut columns[1], "•", Color32::from_rgb(59, 130, 246), opportunity);
            }
        });
    });
}
