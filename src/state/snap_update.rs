// Snap update approval flow
// Types for a pending update request plus the two-state confirmation
// machine (confirming -> warning interstitial) that gates approval

use std::collections::BTreeMap;

use serde::Deserialize;

/// Permission keys whose grant exposes derivation-key material and
/// therefore requires the extra warning step
const ENTROPY_PERMISSION_PREFIX: &str = "snap_getBip44Entropy_";

/// Permission descriptors are opaque at this layer; only the keys drive
/// behavior
pub type PermissionMap = BTreeMap<String, serde_json::Value>;

/// Identifying metadata of a pending approval request
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Unique identifier, passed back verbatim on rejection
    pub id: String,
}

/// A pending snap update proposal, supplied by the host per render cycle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapUpdateRequest {
    pub metadata: RequestMetadata,
    /// Identifier of the snap being updated
    pub snap_id: String,
    /// Origin of the site that proposed the update
    pub dapp_origin: String,
    /// Version the snap would be updated to
    pub new_version: String,
    /// Full requested permission set, when the host supplies one
    /// The warning predicate reads only this field
    #[serde(default)]
    pub permissions: Option<PermissionMap>,
    /// Permissions carried over unchanged
    #[serde(default)]
    pub approved_permissions: PermissionMap,
    /// Permissions the update would drop
    #[serde(default)]
    pub revoked_permissions: PermissionMap,
    /// Permissions the update newly requests
    #[serde(default)]
    pub new_permissions: PermissionMap,
}

/// Metadata about the subject (snap) being approved
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSubjectMetadata {
    /// Icon location
    #[allow(dead_code)] // drawing remote icons needs an image loader add-on
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    pub origin: String,
    /// Where the snap's source lives; absence disables the affordance
    #[serde(default)]
    pub source_code: Option<String>,
    #[allow(dead_code)] // currently installed version, shown once deltas grow a diff view
    #[serde(default)]
    pub version: Option<String>,
}

impl TargetSubjectMetadata {
    /// Name to show in headings, falling back to the origin
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.origin)
    }
}

/// How a permission key changed in this update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDelta {
    /// Newly requested by the update
    New,
    /// Dropped by the update
    Revoked,
    /// Carried over unchanged
    Approved,
}

/// Whether the flow still wants to be on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    /// Keep rendering; no decision yet
    Pending,
    /// A callback fired; the owner should drop the flow
    Resolved,
}

/// Approval callback, receives the full request
pub type ApproveCallback = Box<dyn FnMut(&SnapUpdateRequest)>;

/// Rejection callback, receives the request id
pub type RejectCallback = Box<dyn FnMut(&str)>;

/// True iff the request's permission set contains a key granting
/// derivation-key material access
pub fn requests_entropy_permission(request: &SnapUpdateRequest) -> bool {
    request.permissions.as_ref().is_some_and(|permissions| {
        permissions
            .keys()
            .any(|key| key.starts_with(ENTROPY_PERMISSION_PREFIX))
    })
}

/// Confirmation state machine for one pending snap update
///
/// Two states: confirming, and confirming with the warning interstitial
/// shown. Submit from the base state either approves immediately or raises
/// the interstitial, depending on whether the request asks for entropy
/// access. Approval and rejection are terminal; the owner drops the flow
/// when a transition returns [`FlowStatus::Resolved`].
pub struct SnapUpdateFlow {
    request: SnapUpdateRequest,
    target: TargetSubjectMetadata,
    approve: ApproveCallback,
    reject: RejectCallback,
    /// Whether the warning interstitial is on screen
    warning_visible: bool,
    /// Cached predicate; the request is immutable for the flow's lifetime
    needs_warning: bool,
}

impl SnapUpdateFlow {
    /// Build a flow for the given request
    /// The warning predicate is evaluated here, once
    pub fn new(
        request: SnapUpdateRequest,
        target: TargetSubjectMetadata,
        approve: ApproveCallback,
        reject: RejectCallback,
    ) -> Self {
        let needs_warning = requests_entropy_permission(&request);
        Self {
            request,
            target,
            approve,
            reject,
            warning_visible: false,
            needs_warning,
        }
    }

    pub fn request(&self) -> &SnapUpdateRequest {
        &self.request
    }

    pub fn target(&self) -> &TargetSubjectMetadata {
        &self.target
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_visible
    }

    /// Reject the update
    /// Valid in both states; never raises the interstitial
    pub fn cancel(&mut self) -> FlowStatus {
        (self.reject)(&self.request.metadata.id);
        FlowStatus::Resolved
    }

    /// Submit from the footer
    /// Raises the warning interstitial instead of approving when the
    /// request asks for entropy access
    pub fn submit(&mut self) -> FlowStatus {
        if self.needs_warning {
            self.warning_visible = true;
            FlowStatus::Pending
        } else {
            (self.approve)(&self.request);
            FlowStatus::Resolved
        }
    }

    /// Dismiss the warning interstitial without deciding
    pub fn dismiss_warning(&mut self) {
        self.warning_visible = false;
    }

    /// Approve through the warning interstitial
    pub fn confirm_warning(&mut self) -> FlowStatus {
        self.warning_visible = false;
        (self.approve)(&self.request);
        FlowStatus::Resolved
    }

    /// Merge the three delta maps into display rows: new permissions
    /// first, then revoked, then unchanged, keys sorted within each group
    pub fn permission_rows(&self) -> Vec<(String, PermissionDelta)> {
        let mut rows = Vec::new();
        for key in self.request.new_permissions.keys() {
            rows.push((key.clone(), PermissionDelta::New));
        }
        for key in self.request.revoked_permissions.keys() {
            rows.push((key.clone(), PermissionDelta::Revoked));
        }
        for key in self.request.approved_permissions.keys() {
            rows.push((key.clone(), PermissionDelta::Approved));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn request(id: &str, permission_keys: Option<&[&str]>) -> SnapUpdateRequest {
        SnapUpdateRequest {
            metadata: RequestMetadata { id: id.to_string() },
            snap_id: "npm:@example/bip44-snap".to_string(),
            dapp_origin: "https://dapp.example".to_string(),
            new_version: "0.2.0".to_string(),
            permissions: permission_keys.map(|keys| {
                keys.iter()
                    .map(|k| (k.to_string(), serde_json::json!({})))
                    .collect()
            }),
            approved_permissions: PermissionMap::new(),
            revoked_permissions: PermissionMap::new(),
            new_permissions: PermissionMap::new(),
        }
    }

    fn target() -> TargetSubjectMetadata {
        TargetSubjectMetadata {
            icon_url: None,
            name: Some("BIP-44 Snap".to_string()),
            origin: "npm:@example/bip44-snap".to_string(),
            source_code: None,
            version: Some("0.1.0".to_string()),
        }
    }

    /// Flow wired to recorders for both callbacks
    fn flow_with_recorders(
        request: SnapUpdateRequest,
    ) -> (
        SnapUpdateFlow,
        Rc<RefCell<Vec<String>>>,
        Rc<RefCell<Vec<String>>>,
    ) {
        let approved = Rc::new(RefCell::new(Vec::new()));
        let rejected = Rc::new(RefCell::new(Vec::new()));
        let approved_sink = approved.clone();
        let rejected_sink = rejected.clone();
        let flow = SnapUpdateFlow::new(
            request,
            target(),
            Box::new(move |r| approved_sink.borrow_mut().push(r.metadata.id.clone())),
            Box::new(move |id| rejected_sink.borrow_mut().push(id.to_string())),
        );
        (flow, approved, rejected)
    }

    #[test]
    fn test_entropy_predicate() {
        assert!(requests_entropy_permission(&request(
            "1",
            Some(&["snap_getBip44Entropy_60"])
        )));
        assert!(requests_entropy_permission(&request(
            "1",
            Some(&["snap_confirm", "snap_getBip44Entropy_1"])
        )));
        assert!(!requests_entropy_permission(&request(
            "1",
            Some(&["snap_confirm"])
        )));
        assert!(!requests_entropy_permission(&request("1", Some(&[]))));
        assert!(!requests_entropy_permission(&request("1", None)));
        // prefix match only, not substring
        assert!(!requests_entropy_permission(&request(
            "1",
            Some(&["not_snap_getBip44Entropy_60"])
        )));
    }

    #[test]
    fn test_submit_with_entropy_permission_shows_warning() {
        let (mut flow, approved, rejected) =
            flow_with_recorders(request("42", Some(&["snap_getBip44Entropy_60"])));

        assert!(!flow.warning_visible());
        assert_eq!(flow.submit(), FlowStatus::Pending);
        assert!(flow.warning_visible());
        assert!(approved.borrow().is_empty());

        // confirming through the interstitial approves exactly once
        assert_eq!(flow.confirm_warning(), FlowStatus::Resolved);
        assert!(!flow.warning_visible());
        assert_eq!(approved.borrow().as_slice(), ["42"]);
        assert!(rejected.borrow().is_empty());
    }

    #[test]
    fn test_submit_without_entropy_permission_approves_immediately() {
        let (mut flow, approved, rejected) = flow_with_recorders(request("7", Some(&[])));

        assert_eq!(flow.submit(), FlowStatus::Resolved);
        assert!(!flow.warning_visible());
        assert_eq!(approved.borrow().as_slice(), ["7"]);
        assert!(rejected.borrow().is_empty());
    }

    #[test]
    fn test_submit_with_absent_permissions_approves_immediately() {
        let (mut flow, approved, _rejected) = flow_with_recorders(request("7", None));

        assert_eq!(flow.submit(), FlowStatus::Resolved);
        assert_eq!(approved.borrow().as_slice(), ["7"]);
    }

    #[test]
    fn test_cancel_rejects_with_request_id() {
        let (mut flow, approved, rejected) = flow_with_recorders(request("9", Some(&[])));

        assert_eq!(flow.cancel(), FlowStatus::Resolved);
        assert_eq!(rejected.borrow().as_slice(), ["9"]);
        assert!(approved.borrow().is_empty());
    }

    #[test]
    fn test_cancel_while_warning_shown_still_rejects() {
        let (mut flow, approved, rejected) =
            flow_with_recorders(request("9", Some(&["snap_getBip44Entropy_0"])));

        flow.submit();
        assert!(flow.warning_visible());
        assert_eq!(flow.cancel(), FlowStatus::Resolved);
        assert_eq!(rejected.borrow().as_slice(), ["9"]);
        assert!(approved.borrow().is_empty());
    }

    #[test]
    fn test_dismiss_warning_returns_to_confirming_without_deciding() {
        let (mut flow, approved, rejected) =
            flow_with_recorders(request("3", Some(&["snap_getBip44Entropy_60"])));

        flow.submit();
        flow.dismiss_warning();
        assert!(!flow.warning_visible());
        assert!(approved.borrow().is_empty());
        assert!(rejected.borrow().is_empty());

        // submitting again raises the interstitial again
        assert_eq!(flow.submit(), FlowStatus::Pending);
        assert!(flow.warning_visible());
    }

    #[test]
    fn test_permission_rows_merge_order() {
        let mut req = request("1", None);
        req.new_permissions
            .insert("snap_notify".to_string(), serde_json::json!({}));
        req.new_permissions
            .insert("snap_dialog".to_string(), serde_json::json!({}));
        req.revoked_permissions
            .insert("snap_manageState".to_string(), serde_json::json!({}));
        req.approved_permissions
            .insert("snap_confirm".to_string(), serde_json::json!({}));

        let (flow, _, _) = flow_with_recorders(req);
        let rows = flow.permission_rows();
        assert_eq!(
            rows,
            vec![
                ("snap_dialog".to_string(), PermissionDelta::New),
                ("snap_notify".to_string(), PermissionDelta::New),
                ("snap_manageState".to_string(), PermissionDelta::Revoked),
                ("snap_confirm".to_string(), PermissionDelta::Approved),
            ]
        );
    }

    #[test]
    fn test_request_deserializes_from_host_json() {
        let request: SnapUpdateRequest = serde_json::from_str(
            r#"{
                "metadata": { "id": "42" },
                "snapId": "npm:@example/bip44-snap",
                "dappOrigin": "https://dapp.example",
                "newVersion": "0.2.0",
                "permissions": { "snap_getBip44Entropy_60": {} },
                "newPermissions": { "snap_notify": {} }
            }"#,
        )
        .unwrap();

        assert_eq!(request.metadata.id, "42");
        assert!(requests_entropy_permission(&request));
        assert!(request.revoked_permissions.is_empty());
        assert_eq!(request.new_permissions.len(), 1);
    }

    #[test]
    fn test_target_metadata_display_name_falls_back_to_origin() {
        let mut metadata = target();
        assert_eq!(metadata.display_name(), "BIP-44 Snap");
        metadata.name = None;
        assert_eq!(metadata.display_name(), "npm:@example/bip44-snap");
    }
}
