// Main application layout
// Renders the info tab, or the snap update approval screen while a
// request is pending

use eframe::egui;
use tracing::warn;

use crate::i18n::Translator;
use crate::platform::Platform;
use crate::state::snap_update::{FlowStatus, SnapUpdateFlow};
use crate::state::AppState;
use crate::ui::components::*;

/// One entry of the info tab link list
struct InfoLink {
    label_key: &'static str,
    /// None renders a placeholder link with no destination yet
    url: Option<&'static str>,
}

/// Outbound links shown on the info tab
/// The first three destinations are placeholders; the separator in the
/// rendered list splits them from the live ones
const INFO_LINKS: [InfoLink; 6] = [
    InfoLink {
        label_key: "privacyMsg",
        url: None,
    },
    InfoLink {
        label_key: "terms",
        url: None,
    },
    InfoLink {
        label_key: "attributions",
        url: None,
    },
    InfoLink {
        label_key: "supportCenter",
        url: Some("https://www.xdc.dev/"),
    },
    InfoLink {
        label_key: "visitWebSite",
        url: Some("https://xinfin.org/"),
    },
    InfoLink {
        label_key: "contactUs",
        url: Some("https://xinfin.org/contact"),
    },
];

/// Render the main application layout
/// A pending snap update takes over the whole window; otherwise the info
/// tab is shown
pub fn render_app_layout(
    ctx: &egui::Context,
    state: &mut AppState,
    t: &Translator,
    platform: &dyn Platform,
) {
    let mut status = FlowStatus::Pending;

    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(flow) = state.pending_update_mut() {
            status = render_snap_update(ui, flow, t, platform);
        } else {
            render_info_tab(ui, &state.version, t, platform);
        }
    });

    state.resolve_pending(status);
}

/// Render the info tab: version, about line, outbound links
pub fn render_info_tab(ui: &mut egui::Ui, version: &str, t: &Translator, platform: &dyn Platform) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading(egui::RichText::new(t.t("appName")).size(24.0));
        ui.add_space(16.0);

        // Version row
        ui.label(egui::RichText::new(t.t("version")).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(version).monospace().size(14.0));
        ui.add_space(12.0);

        // About line
        ui.label(egui::RichText::new(t.t("builtAround")).weak().size(13.0));
    });

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(12.0);

    ui.label(egui::RichText::new(t.t("links")).strong().size(15.0));
    ui.add_space(8.0);

    for (i, link) in INFO_LINKS.iter().enumerate() {
        // The placeholder group ends here
        if i == 3 {
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);
        }

        if link_label(ui, &t.t(link.label_key)).clicked() {
            if let Some(url) = link.url {
                if let Err(e) = platform.open_tab(url) {
                    warn!(url = %url, error = %e, "failed to open link");
                }
            }
        }
        ui.add_space(4.0);
    }
}

/// Render the snap update approval screen
/// Returns [`FlowStatus::Resolved`] once the user has approved or
/// rejected; the caller drops the flow
pub fn render_snap_update(
    ui: &mut egui::Ui,
    flow: &mut SnapUpdateFlow,
    t: &Translator,
    platform: &dyn Platform,
) -> FlowStatus {
    let mut status = FlowStatus::Pending;

    // Header
    ui.vertical_centered(|ui| {
        ui.add_space(16.0);
        ui.heading(egui::RichText::new(t.t("snapUpdate")).size(22.0));
        // TODO: show a description blurb here once snaps carry one
        ui.add_space(8.0);
        ui.label(egui::RichText::new(flow.target().display_name()).strong().size(16.0));
        ui.label(
            egui::RichText::new(&flow.request().snap_id)
                .monospace()
                .weak()
                .size(13.0),
        );
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.with_layout(
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| {
                    ui.label(format!(
                        "{}: {}",
                        t.t("newVersion"),
                        flow.request().new_version
                    ));
                },
            );
        });
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    // Explanation
    ui.label(t.t_sub("snapUpdateExplanation", &[&flow.request().dapp_origin]));
    ui.add_space(8.0);
    ui.label(t.t("snapRequestsPermission"));
    ui.add_space(8.0);

    // Permission delta list
    let rows = flow.permission_rows();
    egui::ScrollArea::vertical()
        .id_source("permission_list_scroll")
        .max_height(220.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.group(|ui| {
                if rows.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("—").weak());
                        ui.add_space(8.0);
                    });
                } else {
                    for (key, delta) in &rows {
                        permission_row(ui, key, *delta, t);
                        ui.add_space(2.0);
                    }
                }
            });
        });

    ui.add_space(12.0);

    // Source code affordance, only when the snap publishes its source
    let source_code = flow
        .target()
        .source_code
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(str::to_string);
    if let Some(url) = source_code {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(t.t("areYouDeveloper")).weak());
            if link_label(ui, &t.t("openSourceCode")).clicked() {
                if let Err(e) = platform.open_tab(&url) {
                    warn!(url = %url, error = %e, "failed to open source code");
                }
            }
        });
        ui.add_space(8.0);
    }

    ui.separator();
    ui.add_space(8.0);

    // Footer actions
    ui.horizontal(|ui| {
        ui.spacing_mut().button_padding = egui::vec2(12.0, 8.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if approve_button(ui, &t.t("approveAndUpdate")).clicked() {
                status = flow.submit();
            }
            ui.add_space(8.0);
            if cancel_button(ui, &t.t("cancel")).clicked() {
                status = flow.cancel();
            }
        });
    });

    // Warning interstitial for sensitive permission grants
    if flow.warning_visible() {
        let snap_name = flow.target().display_name().to_string();
        egui::Window::new(t.t("snapInstallWarningHeading"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ui.ctx(), |ui| {
                ui.add_space(4.0);
                ui.label(t.t_sub("snapInstallWarning", &[&snap_name]));
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if approve_button(ui, &t.t("approveAndUpdate")).clicked() {
                            status = flow.confirm_warning();
                        }
                        ui.add_space(8.0);
                        if cancel_button(ui, &t.t("cancel")).clicked() {
                            flow.dismiss_warning();
                        }
                    });
                });
                ui.add_space(4.0);
            });
    }

    status
}
