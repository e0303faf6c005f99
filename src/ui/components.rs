// Reusable UI components
// Provides common UI elements for the approval screens

use eframe::egui;

use crate::i18n::Translator;
use crate::state::snap_update::PermissionDelta;

/// Render a delta badge with colored text
/// Colors: New (green), Revoked (red), Approved (gray)
pub fn delta_badge(ui: &mut egui::Ui, delta: PermissionDelta, t: &Translator) {
    let (key, text_color) = match delta {
        PermissionDelta::New => ("permissionNew", egui::Color32::from_rgb(0, 180, 0)),
        PermissionDelta::Revoked => ("permissionRevoked", egui::Color32::from_rgb(220, 0, 0)),
        PermissionDelta::Approved => ("permissionApproved", egui::Color32::GRAY),
    };

    ui.colored_label(text_color, t.t(key));
}

/// Render one row of the permission delta list
pub fn permission_row(ui: &mut egui::Ui, permission_key: &str, delta: PermissionDelta, t: &Translator) {
    ui.horizontal(|ui| {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(permission_key)
                .monospace()
                .size(13.0),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(8.0);
            delta_badge(ui, delta, t);
        });
    });
}

/// Render the approve button (green, strong)
pub fn approve_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(
        egui::RichText::new(text)
            .strong()
            .color(egui::Color32::from_rgb(0, 180, 0)),
    )
}

/// Render the cancel button
pub fn cancel_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(text)
}

/// Render an outbound link
pub fn link_label(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.link(egui::RichText::new(text).size(14.0))
}
