//! Settings dialog. Edits a draft copy; nothing changes until Save.

use egui::{Color32, RichText, Ui};
use shared::settings::AppSettings;

const PROVIDERS: &[(&str, &str)] = &[("openai", "OpenAI"), ("gemini", "Google Gemini")];

/// Move `primary` to the front, keeping every known provider as a fallback.
pub fn set_primary_provider_preference(pref: &mut Vec<String>, primary: &str) {
    let mut out: Vec<String> = Vec::new();

    let add = |out: &mut Vec<String>, p: &str| {
        if !out.iter().any(|x| x == p) {
            out.push(p.to_string());
        }
    };

    add(&mut out, primary);
    for (id, _) in PROVIDERS {
        add(&mut out, id);
    }

    *pref = out;
}

#[derive(Default)]
pub struct SettingsWindow {
    open: bool,
    draft: Option<AppSettings>,
    status: Option<(String, bool)>,
}

impl SettingsWindow {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open_with(&mut self, settings: &AppSettings) {
        self.draft = Some(settings.clone());
        self.status = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.draft = None;
    }

    /// Shown under the Save button.
    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status = Some((message.into(), is_error));
    }

    /// Returns the edited settings when Save is pressed.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<AppSettings> {
        if !self.open {
            return None;
        }
        let mut open = true;
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            open = false;
        }

        let mut saved = None;
        let mut wants_close = false;
        let status = self.status.clone();
        if let Some(draft) = self.draft.as_mut() {
            egui::Window::new("Settings")
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
                .show(ctx, |ui| {
                    ui.set_min_width(460.0);
                    ui.set_max_height(640.0);
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        settings_form(ui, draft);
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            saved = Some(draft.clone());
                        }
                        if ui.button("Done").clicked() {
                            wants_close = true;
                        }
                    });
                    if let Some((message, is_error)) = &status {
                        let color = if *is_error {
                            ui.visuals().error_fg_color
                        } else {
                            Color32::from_rgb(34, 197, 94)
                        };
                        ui.label(RichText::new(message.as_str()).color(color));
                    }
                });
        }

        if !open || wants_close {
            self.close();
        }
        saved
    }
}

fn settings_form(ui: &mut Ui, draft: &mut AppSettings) {
    ui.heading("AI Model");
    ui.label(RichText::new("Pick where replies come from. Cloud options need a key.").weak());
    let primary = draft
        .model
        .provider_preference
        .first()
        .cloned()
        .unwrap_or_else(|| PROVIDERS[0].0.to_string());
    let mut selected = primary.clone();
    egui::ComboBox::from_label("Primary provider")
        .selected_text(provider_label(&selected))
        .show_ui(ui, |ui| {
            for (id, label) in PROVIDERS {
                ui.selectable_value(&mut selected, id.to_string(), *label);
            }
        });
    if selected != primary {
        set_primary_provider_preference(&mut draft.model.provider_preference, &selected);
    }

    egui::Grid::new("model-settings").num_columns(2).show(ui, |ui| {
        ui.label("Request model");
        ui.text_edit_singleline(&mut draft.request_model);
        ui.end_row();
        ui.label("OpenAI model");
        ui.text_edit_singleline(&mut draft.model.openai_model);
        ui.end_row();
        optional_field(ui, "OpenAI API key", &mut draft.model.openai_auth.api_key, true);
        optional_field(ui, "OpenAI base URL", &mut draft.model.openai_base_url, false);
        ui.label("Gemini model");
        ui.text_edit_singleline(&mut draft.model.gemini_model);
        ui.end_row();
        optional_field(ui, "Gemini API key", &mut draft.model.gemini_auth.api_key, true);
    });

    ui.add_space(8.0);
    ui.separator();
    ui.heading("Model Uploads");
    ui.label(RichText::new("Where analyzed VRM files are stored.").weak());
    egui::Grid::new("storage-settings").num_columns(2).show(ui, |ui| {
        optional_field(ui, "Storage URL", &mut draft.storage.base_url, false);
        ui.label("Bucket");
        ui.text_edit_singleline(&mut draft.storage.bucket);
        ui.end_row();
        ui.label("Folder");
        ui.text_edit_singleline(&mut draft.storage.object_prefix);
        ui.end_row();
        optional_field(ui, "Storage key", &mut draft.storage.api_key, true);
    });

    ui.add_space(8.0);
    ui.separator();
    ui.heading("Sign-in");
    ui.label(RichText::new("Endpoint changes apply the next time the app starts.").weak());
    egui::Grid::new("login-settings").num_columns(2).show(ui, |ui| {
        optional_field(ui, "Client ID", &mut draft.login.client_id, false);
        optional_field(ui, "Client secret", &mut draft.login.client_secret, true);
        optional_field(ui, "Authorize URL", &mut draft.login.auth_url, false);
        optional_field(ui, "Token URL", &mut draft.login.token_url, false);
        optional_field(ui, "User info URL", &mut draft.login.userinfo_url, false);
        ui.label("Scopes");
        let mut scopes = draft.login.scopes.join(" ");
        if ui.text_edit_singleline(&mut scopes).changed() {
            draft.login.scopes = scopes.split_whitespace().map(str::to_string).collect();
        }
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.separator();
    ui.checkbox(&mut draft.user_profile.dark_mode, "Dark mode");
}

fn provider_label(id: &str) -> &str {
    PROVIDERS
        .iter()
        .find(|(p, _)| *p == id)
        .map(|(_, label)| *label)
        .unwrap_or(id)
}

/// Grid row editing an optional string. Blank means unset.
fn optional_field(ui: &mut Ui, label: &str, value: &mut Option<String>, secret: bool) {
    ui.label(label);
    let mut text = value.clone().unwrap_or_default();
    if ui
        .add(egui::TextEdit::singleline(&mut text).password(secret))
        .changed()
    {
        *value = Some(text).filter(|t| !t.trim().is_empty());
    }
    ui.end_row();
}
