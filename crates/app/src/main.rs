use anyhow::anyhow;
use eframe::egui;
use shared::tabs::{DashboardTab, TabSet};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;
mod dashboard;
mod panels;
mod settings_window;
mod state;
mod widgets;

use panels::PanelResponse;
use state::DashboardState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::load_settings_or_default();
    let state = DashboardState::new(settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        vsync: true, // Limit to monitor refresh rate
        ..Default::default()
    };
    eframe::run_native(
        "Mate Engine Analysis",
        options,
        Box::new(|_cc| Box::new(MateEngineApp { state })),
    )
    .map_err(|e| anyhow!("{}", e))
}

struct MateEngineApp {
    state: DashboardState,
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    let mut style = (*ctx.style()).clone();
    style.visuals.window_rounding = egui::Rounding::same(12.0);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);

    if dark {
        style.visuals = egui::Visuals::dark();
        style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 35);
        style.visuals.selection.stroke =
            egui::Stroke::new(2.0, egui::Color32::from_rgb(100, 180, 255));
    } else {
        style.visuals = egui::Visuals::light();
        style.visuals.panel_fill = egui::Color32::from_rgb(250, 250, 252);
        style.visuals.selection.stroke =
            egui::Stroke::new(2.0, egui::Color32::from_rgb(50, 100, 200));
    }
    ctx.set_style(style);
}

impl eframe::App for MateEngineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let s = &mut self.state;

        // Poll background work (non-blocking); hidden panels included
        s.poll_all();
        if s.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let dark = s.settings.user_profile.dark_mode;
        apply_theme(ctx, dark);

        if let Some(settings) = s.settings_window.show(ctx) {
            s.save_settings(settings);
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(if dark {
                egui::Color32::from_rgb(35, 35, 42)
            } else {
                egui::Color32::from_rgb(245, 247, 250)
            }))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(16.0);
                    dashboard::header_ui(ui, dark);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(16.0);
                        let settings_button = egui::Button::new("⚙ Settings");
                        if ui
                            .add_enabled(!s.settings_window.is_open(), settings_button)
                            .clicked()
                        {
                            s.settings_window.open_with(&s.settings);
                        }
                        match s.signed_in_user() {
                            Some(user) => {
                                if ui.button("Sign Out").clicked() {
                                    s.sign_out();
                                }
                                ui.label(egui::RichText::new(user.display_name()).strong());
                            }
                            None if s.login_pending() => {
                                ui.spinner();
                            }
                            None => {
                                if ui.button("Sign In").clicked() {
                                    s.start_login();
                                }
                            }
                        }
                        if let Some(status) = &s.status {
                            ui.label(egui::RichText::new(status.as_str()).weak());
                        }
                    });
                });

                ui.add_space(8.0);
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(16.0);
                    for &tab in s.tabs.tabs() {
                        if ui.selectable_label(s.tabs.is_selected(tab), tab.title()).clicked() {
                            s.tabs.select_tab(tab);
                        }
                    }
                });
                ui.add_space(8.0);
            });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            dashboard::links_ui(ui);
            ui.separator();
            dashboard::footer_ui(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = match s.tabs.selected() {
                        DashboardTab::AiAnalysis => s.panels.ai.ui(ui),
                        DashboardTab::Community => s.panels.community.ui(ui),
                        DashboardTab::ModelAnalyzer => s.panels.vrm.ui(ui),
                        tab => {
                            dashboard::static_tab_ui(ui, tab);
                            PanelResponse::default()
                        }
                    };
                    s.handle(response);
                });
        });
    }
}
