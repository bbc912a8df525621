//! Privacy policy text and the dialog that shows it.

pub const POLICY_LINK_LABEL: &str = "《隐私条例》";
pub const POLICY_CHECKBOX_LABEL: &str = "已阅读并同意";

pub const PRIVACY_POLICY: &str = include_str!("../../assets/privacy_policy.md");

/// Shows the policy window while `open` is set. Returns `false` once the
/// user closed it.
pub fn show_policy_dialog(ctx: &egui::Context, open: bool) -> bool {
    if !open {
        return false;
    }

    let mut window_open = true;
    let mut close_requested = false;
    egui::Window::new(POLICY_LINK_LABEL)
        .id(egui::Id::new("privacy_policy_window"))
        .open(&mut window_open)
        .collapsible(false)
        .resizable(true)
        .default_size([520.0, 480.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .max_height(420.0)
                .show(ui, |ui| {
                    ui.label(PRIVACY_POLICY);
                });
            ui.separator();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("关闭").clicked() {
                    close_requested = true;
                }
            });
        });

    window_open && !close_requested
}
