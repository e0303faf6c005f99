// Wallet Approvals GUI - Main Entry Point
// Native shell around the info tab and the snap update approval screen

mod i18n;
mod platform;
mod state;
mod ui;

use eframe::egui;
use tracing::info;

use i18n::Translator;
use platform::{NativePlatform, Platform};
use state::snap_update::{
    PermissionMap, RequestMetadata, SnapUpdateFlow, SnapUpdateRequest, TargetSubjectMetadata,
};
use state::AppState;
use ui::render_app_layout;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let translator = Translator::english()?;

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Wallet Approvals")
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([360.0, 520.0]),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Wallet Approvals",
        options,
        Box::new(|_cc| {
            // Queue a demonstration update request so the approval screen
            // has something to show; the host integration replaces this
            let mut app = WalletApprovalsApp::new(translator);
            app.queue_demo_request();
            Box::new(app)
        }),
    )?;

    Ok(())
}

/// Main application struct
/// Owns the state, the message catalog, and the platform boundary
struct WalletApprovalsApp {
    /// Application state (version, pending approval)
    state: AppState,
    /// Injected translation function
    translator: Translator,
    /// Host platform services
    platform: NativePlatform,
}

impl WalletApprovalsApp {
    /// Create a new application instance
    /// The platform version is read exactly once, here
    fn new(translator: Translator) -> Self {
        let platform = NativePlatform;
        let version = platform.get_version();
        Self {
            state: AppState::new(version),
            translator,
            platform,
        }
    }

    /// Queue a sample snap update request with an entropy permission so
    /// the warning path is exercised end to end
    fn queue_demo_request(&mut self) {
        let mut permissions = PermissionMap::new();
        permissions.insert("snap_confirm".to_string(), serde_json::json!({}));
        permissions.insert(
            "snap_getBip44Entropy_60".to_string(),
            serde_json::json!({}),
        );

        let mut new_permissions = PermissionMap::new();
        new_permissions.insert(
            "snap_getBip44Entropy_60".to_string(),
            serde_json::json!({}),
        );
        let mut revoked_permissions = PermissionMap::new();
        revoked_permissions.insert("snap_manageState".to_string(), serde_json::json!({}));
        let mut approved_permissions = PermissionMap::new();
        approved_permissions.insert("snap_confirm".to_string(), serde_json::json!({}));

        let request = SnapUpdateRequest {
            metadata: RequestMetadata {
                id: "demo-1".to_string(),
            },
            snap_id: "npm:@example/bip44-snap".to_string(),
            dapp_origin: "https://dapp.example".to_string(),
            new_version: "0.2.0".to_string(),
            permissions: Some(permissions),
            approved_permissions,
            revoked_permissions,
            new_permissions,
        };
        let target = TargetSubjectMetadata {
            icon_url: None,
            name: Some("BIP-44 Demo Snap".to_string()),
            origin: "npm:@example/bip44-snap".to_string(),
            source_code: Some("https://github.com/example/bip44-snap".to_string()),
            version: Some("0.1.0".to_string()),
        };

        let flow = SnapUpdateFlow::new(
            request,
            target,
            Box::new(|request| {
                info!(
                    request_id = %request.metadata.id,
                    new_version = %request.new_version,
                    "snap update approved"
                );
            }),
            Box::new(|request_id| {
                info!(request_id = %request_id, "snap update rejected");
            }),
        );
        self.state.request_snap_update(flow);
    }
}

impl eframe::App for WalletApprovalsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Render the main application layout
        render_app_layout(ctx, &mut self.state, &self.translator, &self.platform);
    }
}
