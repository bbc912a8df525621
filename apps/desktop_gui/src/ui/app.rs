use std::time::{Duration, Instant};

use client_core::{form::SUBMIT_LABEL, FormCommand, RecruitForm, TextInput};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{BackendStatus, UiEvent},
    orchestration::{dispatch_backend_command, pump_ui_events},
};
use crate::ui::{banner, policy};

pub const APP_TITLE: &str = "2019招新考核报名";
pub const HOMEPAGE_URL: &str = "https://www.xust-kcsoft.club";
pub const HOMEPAGE_LINK_LABEL: &str = "KC Soft";

const FIELD_HEIGHT: f32 = 34.0;
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(211, 47, 47);

pub struct RecruitApp {
    form: RecruitForm,
    backend: BackendStatus,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl RecruitApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, form: RecruitForm) -> Self {
        Self {
            form,
            backend: BackendStatus::default(),
            cmd_tx,
            ui_rx,
        }
    }

    fn dispatch(&mut self, command: FormCommand) {
        dispatch_backend_command(&self.cmd_tx, &mut self.form, command);
    }

    fn text_input(&mut self, ui: &mut egui::Ui, input: TextInput, hint: &str) {
        let field = self.form.text_field(input);
        let shows_error = field.shows_error();
        let mut value = field.text().to_string();

        ui.label(egui::RichText::new(format!("{} *", field.label())).strong());
        let response = ui
            .scope(|ui| {
                if shows_error {
                    let visuals = ui.visuals_mut();
                    let stroke = egui::Stroke::new(1.0, ERROR_COLOR);
                    visuals.widgets.inactive.bg_stroke = stroke;
                    visuals.widgets.hovered.bg_stroke = stroke;
                    visuals.selection.stroke = stroke;
                }
                let edit = egui::TextEdit::singleline(&mut value)
                    .id_salt(input.field().label())
                    .hint_text(hint)
                    .desired_width(f32::INFINITY);
                ui.add_sized([ui.available_width(), FIELD_HEIGHT], edit)
            })
            .inner;

        if response.changed() {
            self.form.edit_text(input, &value);
        }
    }

    fn college_select(&mut self, ui: &mut egui::Ui) {
        let field = self.form.college_field();
        let options = field.options().to_vec();
        let selected = field.selected_label().to_string();
        let mut chosen = selected.clone();

        ui.label(egui::RichText::new(format!("{} *", field.label())).strong());
        egui::ComboBox::from_id_salt("college_select")
            .selected_text(selected.as_str())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in &options {
                    ui.add_enabled_ui(!option.disabled, |ui| {
                        ui.selectable_value(&mut chosen, option.label.clone(), option.label.as_str());
                    });
                }
            });

        if chosen != selected {
            if let Some(command) = self.form.select_college(&chosen) {
                self.dispatch(command);
            }
        }
    }

    fn major_select(&mut self, ui: &mut egui::Ui) {
        let field = self.form.major_field();
        let options = field.options().to_vec();
        let selected = field.selected_label().to_string();
        let mut chosen = selected.clone();

        ui.label(egui::RichText::new(format!("{} *", field.label())).strong());
        ui.add_enabled_ui(self.form.selected_college().is_some(), |ui| {
            egui::ComboBox::from_id_salt("major_select")
                .selected_text(selected.as_str())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for option in &options {
                        ui.add_enabled_ui(!option.disabled, |ui| {
                            ui.selectable_value(&mut chosen, option.label.clone(), option.label.as_str());
                        });
                    }
                });
        });

        if chosen != selected {
            self.form.select_major(&chosen);
        }
    }

    fn verification_row(&mut self, ui: &mut egui::Ui) {
        self.text_input(ui, TextInput::VerificationCode, "6 位数字");

        let label = self.form.send_code_label();
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), FIELD_HEIGHT));
        if ui.add_enabled(self.form.send_code_enabled(), button).clicked() {
            match self.form.request_verification_code() {
                Ok(command) => self.dispatch(command),
                Err(err) => tracing::debug!("send-code click ignored: {err}"),
            }
        }
    }

    fn policy_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut accepted = self.form.policy_accepted();
            if ui.checkbox(&mut accepted, policy::POLICY_CHECKBOX_LABEL).changed() {
                self.form.set_policy_accepted(accepted);
            }
            if ui.link(policy::POLICY_LINK_LABEL).clicked() {
                self.form.open_policy_dialog();
            }
        });
    }

    fn submit_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(egui::RichText::new(SUBMIT_LABEL).strong())
            .min_size(egui::vec2(ui.available_width(), FIELD_HEIGHT + 4.0));
        if ui.add_enabled(self.form.can_submit(), button).clicked() {
            if let Some(command) = self.form.submit() {
                self.dispatch(command);
            }
        }
    }

    fn show_form_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let card_width = ui.available_width().clamp(360.0, 520.0);
                ui.add_space(18.0);

                ui.vertical_centered(|ui| {
                    ui.set_width(card_width);

                    ui.horizontal(|ui| {
                        ui.hyperlink_to(egui::RichText::new(HOMEPAGE_LINK_LABEL).strong().size(18.0), HOMEPAGE_URL);
                        ui.add_space(12.0);
                        ui.heading(APP_TITLE);
                    });
                    if let Some(status) = self.backend.label() {
                        ui.weak(status);
                    }
                    ui.add_space(8.0);

                    egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(12.0)
                        .stroke(egui::Stroke::new(
                            1.0,
                            ui.visuals().widgets.noninteractive.bg_stroke.color,
                        ))
                        .inner_margin(egui::Margin::symmetric(20, 18))
                        .show(ui, |ui| {
                            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 8.0);
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.text_input(ui, TextInput::Name, "中文姓名");
                                self.text_input(ui, TextInput::StudentId, "11 位学号");
                                self.college_select(ui);
                                self.major_select(ui);
                                self.text_input(ui, TextInput::PhoneNumber, "11 位手机号");
                                self.text_input(ui, TextInput::Email, "name@example.com");
                                self.verification_row(ui);
                                ui.add_space(4.0);
                                self.policy_row(ui);
                                self.submit_button(ui);
                            });
                        });
                });
            });
        });
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.form.notification().visible().cloned() else {
            return;
        };
        let style = banner::style_for(notification.severity);
        let (align, offset) = banner::placement(notification.anchor);
        let mut dismissed = false;

        egui::Area::new(egui::Id::new("notification_banner"))
            .anchor(align, offset)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(style.fill)
                    .stroke(egui::Stroke::new(1.0, style.stroke))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(style.icon).color(egui::Color32::WHITE));
                            ui.label(egui::RichText::new(&notification.message).color(egui::Color32::WHITE));
                            if ui.small_button("✕").clicked() {
                                dismissed = true;
                            }
                        });
                    });
            });

        if dismissed {
            self.form.dismiss_notification();
        }
    }
}

impl eframe::App for RecruitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        pump_ui_events(&self.ui_rx, &self.cmd_tx, &mut self.form, &mut self.backend);
        self.form.expire_notification(Instant::now());

        self.show_form_page(ctx);

        let still_open = policy::show_policy_dialog(ctx, self.form.policy_dialog_open());
        if self.form.policy_dialog_open() && !still_open {
            self.form.close_policy_dialog();
        }

        self.show_notification(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_links_to_club_homepage() {
        assert_eq!(APP_TITLE, "2019招新考核报名");
        assert_eq!(HOMEPAGE_LINK_LABEL, "KC Soft");
        assert_eq!(HOMEPAGE_URL, "https://www.xust-kcsoft.club");
    }
}
