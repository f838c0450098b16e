//! The static dashboard: header stats, the informational tabs and the footer.
//! Everything here renders straight from `shared::facts`.

use crate::widgets::{badge, card, marked_line, secondary_badge};
use egui::{Color32, RichText, Ui};
use shared::facts::{
    ExternalLink, FEATURES, FEATURE_COMPARISON, HIGHLIGHTS, LINKS, MOTIVATION, PERFORMANCE_EXAMPLE,
    PERFORMANCE_EXAMPLE_TITLE, PERFORMANCE_NOTE, REPOSITORY, STEAM_FUNDING, STEAM_RELEASE,
    TECH_STACK, TOP_SUPPORTERS, UPCOMING_FEATURES, VALUE_PROPS,
};
use shared::tabs::DashboardTab;

const GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const BLUE: Color32 = Color32::from_rgb(59, 130, 246);
const PURPLE: Color32 = Color32::from_rgb(168, 85, 247);

/// Title, description and the repository quick stats.
pub fn header_ui(ui: &mut Ui, dark: bool) {
    ui.vertical(|ui| {
        ui.heading(
            RichText::new("Mate Engine Analysis")
                .size(24.0)
                .color(if dark {
                    Color32::from_rgb(220, 220, 230)
                } else {
                    Color32::from_rgb(60, 60, 80)
                }),
        );
        ui.label(
            RichText::new("A free, open-source alternative to Desktop Mate with custom VRM support")
                .weak(),
        );
    });
    ui.add_space(24.0);
    stat(ui, "⭐", &REPOSITORY.stars.to_string(), "Stars");
    stat(ui, "🍴", &REPOSITORY.forks.to_string(), "Forks");
    stat(ui, "💻", REPOSITORY.language, "Language");
    stat(ui, "💾", REPOSITORY.size, "Size");
}

fn stat(ui: &mut Ui, icon: &str, value: &str, caption: &str) {
    ui.vertical(|ui| {
        ui.label(RichText::new(format!("{} {}", icon, value)).strong());
        ui.label(RichText::new(caption).small().weak());
    });
    ui.add_space(12.0);
}

/// Renders one of the informational tabs. The panel tabs are drawn by their
/// owners; this is a no-op for them.
pub fn static_tab_ui(ui: &mut Ui, tab: DashboardTab) {
    match tab {
        DashboardTab::Overview => overview_ui(ui),
        DashboardTab::Features => features_ui(ui),
        DashboardTab::Comparison => comparison_ui(ui),
        DashboardTab::Tech => tech_ui(ui),
        DashboardTab::Steam => steam_ui(ui),
        DashboardTab::AiAnalysis | DashboardTab::Community | DashboardTab::ModelAnalyzer => {}
    }
}

fn overview_ui(ui: &mut Ui) {
    ui.columns(2, |columns| {
        card(&mut columns[0], "📦 Project Information", None, |ui| {
            ui.label(REPOSITORY.description);
            ui.add_space(6.0);
            egui::Grid::new("project-info").num_columns(2).show(ui, |ui| {
                ui.label(RichText::new("License").weak());
                ui.label(REPOSITORY.license);
                ui.end_row();
                ui.label(RichText::new("Last Update").weak());
                ui.label(REPOSITORY.last_update_label());
                ui.end_row();
            });
        });
        card(&mut columns[1], "📈 Key Highlights", None, |ui| {
            ui.horizontal_wrapped(|ui| {
                for highlight in HIGHLIGHTS {
                    secondary_badge(ui, *highlight);
                }
            });
        });
    });
    ui.add_space(8.0);

    card(
        ui,
        "💡 Why Mate Engine?",
        Some("The motivation behind creating this alternative"),
        |ui| {
            ui.label(MOTIVATION);
            ui.add_space(6.0);
            for prop in VALUE_PROPS {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("✔").color(GREEN));
                    ui.label(RichText::new(prop.title).strong());
                    ui.label(prop.detail);
                });
            }
        },
    );
}

fn features_ui(ui: &mut Ui) {
    ui.columns(2, |columns| {
        card(
            &mut columns[0],
            "⭐ Current Features",
            Some("Available now in the latest release"),
            |ui| {
                for feature in FEATURES {
                    marked_line(ui, "✔", GREEN, feature);
                }
            },
        );
        card(
            &mut columns[1],
            "🚀 Upcoming Features",
            Some("Planned for future releases"),
            |ui| {
                for feature in UPCOMING_FEATURES {
                    marked_line(ui, "➜", BLUE, feature);
                }
            },
        );
    });
}

fn comparison_ui(ui: &mut Ui) {
    card(
        ui,
        "⚖ Feature Comparison",
        Some("Mate Engine vs Desktop Mate"),
        |ui| {
            egui::Grid::new("feature-comparison")
                .num_columns(3)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Feature").strong());
                    ui.label(RichText::new("Desktop Mate").strong());
                    ui.label(RichText::new("Mate Engine").strong());
                    ui.end_row();
                    for row in FEATURE_COMPARISON {
                        ui.label(row.feature);
                        ui.label(row.desktop_mate.label());
                        ui.label(row.mate_engine.label());
                        ui.end_row();
                    }
                });
        },
    );
}

fn tech_ui(ui: &mut Ui) {
    ui.columns(2, |columns| {
        card(&mut columns[0], "💻 Technology Stack", None, |ui| {
            for tech in TECH_STACK {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(tech.name).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("{}%", tech.usage));
                    });
                });
                ui.add(egui::ProgressBar::new(tech.fraction()));
            }
        });
        card(&mut columns[1], "⚡ Performance", None, |ui| {
            ui.label(PERFORMANCE_NOTE);
            ui.add_space(6.0);
            egui::Frame::none()
                .fill(ui.visuals().faint_bg_color)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.label(RichText::new(PERFORMANCE_EXAMPLE_TITLE).strong());
                    ui.label(PERFORMANCE_EXAMPLE);
                });
        });
    });
}

fn steam_ui(ui: &mut Ui) {
    card(
        ui,
        "💰 Steam Release Funding",
        Some("Community-funded Steam release"),
        |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Funding Progress").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(STEAM_FUNDING.amounts_label());
                });
            });
            ui.add(egui::ProgressBar::new(STEAM_FUNDING.bar_fraction()));
            let status = RichText::new(STEAM_FUNDING.status_label());
            ui.label(if STEAM_FUNDING.target_exceeded() {
                status.color(GREEN).strong()
            } else {
                status.weak()
            });
        },
    );
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        card(&mut columns[0], "📅 Release Details", None, |ui| {
            egui::Grid::new("release-details").num_columns(2).show(ui, |ui| {
                ui.label(RichText::new("Target Date").weak());
                ui.label(STEAM_RELEASE.target_date_label());
                ui.end_row();
                ui.label(RichText::new("Price").weak());
                ui.label(STEAM_RELEASE.price);
                ui.end_row();
            });
        });
        card(&mut columns[1], "❤ Top Supporters", None, |ui| {
            for supporter in TOP_SUPPORTERS {
                ui.horizontal(|ui| {
                    ui.label(supporter.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        badge(ui, format!("${:.2}", supporter.amount), (Color32::WHITE, PURPLE));
                    });
                });
            }
        });
    });
}

/// Buttons that open the project pages in the system browser.
pub fn links_ui(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for link in LINKS {
            if ui.button(link.label).on_hover_text(link.url).clicked() {
                open_link(link);
            }
        }
    });
}

fn open_link(link: &ExternalLink) {
    tracing::info!(url = link.url, "opening link");
    if let Err(e) = open::that(link.url) {
        tracing::warn!(url = link.url, error = %e, "failed to open link");
    }
}

pub fn footer_ui(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Mate Engine Analysis Tool").strong());
        ui.label(
            RichText::new(format!(
                "Data from {} · {} license",
                REPOSITORY.name, REPOSITORY.license
            ))
            .small()
            .weak(),
        );
    });
}
