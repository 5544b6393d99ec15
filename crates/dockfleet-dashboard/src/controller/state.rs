//! Session-wide view state
//!
//! Everything the renderers draw is derived from one [`ViewState`]. Nothing
//! here is persisted; a full page reload starts from [`ViewState::new`].

use crate::error::FormError;
use crate::graph::{ContainerDetail, GraphSlot, ServerDetail};
use crate::notifier::Notifier;
use crate::status::{classify, StatusStyle};
use crate::types::{ConnectionTestResult, Container, ContainerAction, NodePayload, ServerNode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Views
// =============================================================================

/// The three mutually exclusive panel sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    Server,
    ServerGraph,
    #[default]
    Container,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Container, ViewKind::Server, ViewKind::ServerGraph];

    /// Parse a view name. Anything unrecognized is the container view.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "server" => ViewKind::Server,
            "serverGraph" | "server-graph" | "server_graph" => ViewKind::ServerGraph,
            _ => ViewKind::Container,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Server => "server",
            ViewKind::ServerGraph => "serverGraph",
            ViewKind::Container => "container",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Server => "Servers",
            ViewKind::ServerGraph => "Server Graph",
            ViewKind::Container => "Containers",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewKind::Server => "fa-server",
            ViewKind::ServerGraph => "fa-project-diagram",
            ViewKind::Container => "fa-cubes",
        }
    }
}

/// How the container view presents its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerLayout {
    #[default]
    Cards,
    Graph,
}

// =============================================================================
// Container panel
// =============================================================================

/// Summary counters above the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerStats {
    pub total: usize,
    pub running: usize,
    pub stopped: usize,
}

impl ContainerStats {
    pub fn from_containers(containers: &[Container]) -> Self {
        let total = containers.len();
        let running = containers.iter().filter(|c| c.is_running()).count();
        Self {
            total,
            running,
            stopped: total.saturating_sub(running),
        }
    }
}

/// What the card grid area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContainerPanel {
    /// Nothing loaded yet.
    #[default]
    Idle,
    Loaded,
    /// The backend answered with something other than a list.
    Malformed,
    /// The request failed outright.
    Failed(String),
}

/// One rendered container card.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerCard {
    pub id: String,
    pub title: String,
    pub status_text: String,
    pub style: StatusStyle,
    pub image: String,
    pub ports: Option<String>,
    /// (action, enabled) for the three action buttons.
    pub actions: [(ContainerAction, bool); 3],
}

impl From<&Container> for ContainerCard {
    fn from(c: &Container) -> Self {
        Self {
            id: c.id.clone(),
            title: c
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Unnamed".to_string()),
            status_text: c.status.to_string(),
            style: classify(&c.status),
            image: c.image.clone().unwrap_or_else(|| "N/A".to_string()),
            ports: c.ports.clone().filter(|p| !p.trim().is_empty()),
            actions: ContainerAction::ALL.map(|action| (action, action.is_enabled_for(&c.status))),
        }
    }
}

// =============================================================================
// Server panel
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ServerPanel {
    #[default]
    Idle,
    Loaded,
    /// Load failed; the list shows the message and a retry button.
    Failed(String),
}

/// One row of the server list.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRow {
    pub id: String,
    pub label: String,
    pub base_url: String,
    pub status: (&'static str, &'static str, &'static str),
    pub role: (&'static str, &'static str, &'static str),
    /// Test, edit and delete are offered for every node but the reserved one.
    pub actions_enabled: bool,
}

impl ServerRow {
    pub fn new(server: &ServerNode, reserved_id: &str) -> Self {
        Self {
            id: server.id.clone(),
            label: server.display_label().to_string(),
            base_url: server.base_url.clone(),
            status: crate::status::server_status_badge(server.status),
            role: crate::status::server_role_badge(server.role),
            actions_enabled: server.id != reserved_id,
        }
    }
}

/// Result of a connection test, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Connected { version: String, api_version: String },
    Refused(String),
    /// The test itself could not be carried out.
    Failed(String),
}

impl From<ConnectionTestResult> for TestOutcome {
    fn from(result: ConnectionTestResult) -> Self {
        if result.ok {
            TestOutcome::Connected {
                version: result.version.unwrap_or_else(|| "N/A".to_string()),
                api_version: result.api_version.unwrap_or_else(|| "N/A".to_string()),
            }
        } else {
            TestOutcome::Refused(result.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

impl TestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TestOutcome::Connected { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            TestOutcome::Connected { version, .. } => format!("Connected! Docker {}", version),
            TestOutcome::Refused(err) => format!("Connection failed: {}", err),
            TestOutcome::Failed(err) => format!("Connection test failed: {}", err),
        }
    }
}

/// Form field addressed by an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Label,
    BaseUrl,
}

/// Contents of the add/edit modal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerForm {
    pub id: String,
    pub label: String,
    pub base_url: String,
    pub tls: bool,
    /// `None` until a test has run; `Some(None)` while one is running.
    pub test: Option<Option<TestOutcome>>,
    pub saving: bool,
}

impl ServerForm {
    pub fn from_server(server: &ServerNode) -> Self {
        Self {
            id: server.id.clone(),
            label: server.label.clone(),
            base_url: server.base_url.clone(),
            tls: server.tls,
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Id => self.id = value,
            FormField::Label => self.label = value,
            FormField::BaseUrl => self.base_url = value,
        }
    }

    /// Trimmed payload, or the list of empty required fields.
    pub fn validate(&self) -> Result<NodePayload, FormError> {
        let payload = NodePayload {
            id: self.id.trim().to_string(),
            label: self.label.trim().to_string(),
            base_url: self.base_url.trim().to_string(),
            tls: self.tls,
        };
        let missing: Vec<&'static str> = [
            ("id", &payload.id),
            ("label", &payload.label),
            ("base_url", &payload.base_url),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(payload)
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Checks needed before a connection test: URL first, then id.
    pub fn validate_for_test(&self) -> Result<(String, String), FormError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(FormError::MissingUrl);
        }
        let id = self.id.trim();
        if id.is_empty() {
            return Err(FormError::MissingId);
        }
        Ok((id.to_string(), url.to_string()))
    }
}

/// Node selector option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOption {
    pub id: String,
    pub text: String,
}

impl From<&ServerNode> for NodeOption {
    fn from(node: &ServerNode) -> Self {
        Self {
            id: node.id.clone(),
            text: format!("{} ({})", node.label, node.id),
        }
    }
}

// =============================================================================
// Request sequencing
// =============================================================================

/// Monotonic tag for one kind of reload. A response is applied only when its
/// tag is still the newest one issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequence(u64);

impl Sequence {
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0 == token
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequences {
    pub containers: Sequence,
    pub servers: Sequence,
    pub nodes: Sequence,
}

// =============================================================================
// View state
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub active_view: ViewKind,
    pub container_layout: ContainerLayout,

    /// Node selector value.
    pub selected_node: String,
    pub node_options: Vec<NodeOption>,

    /// Last successfully fetched container list of `selected_node`.
    pub containers: Vec<Container>,
    pub stats: ContainerStats,
    pub container_panel: ContainerPanel,
    /// Loading overlay over the container view.
    pub loading: bool,

    /// Last fetched roster; emptied when a load fails.
    pub servers: Vec<ServerNode>,
    pub server_panel: ServerPanel,

    /// Add/edit modal, open when set.
    pub form: Option<ServerForm>,
    /// Server currently being edited. Cleared whenever the modal closes.
    pub editing_id: Option<String>,

    pub container_detail: Option<ContainerDetail>,
    pub server_detail: Option<ServerDetail>,

    pub container_graph: GraphSlot,
    pub server_graph: GraphSlot,

    pub notifier: Notifier,
    pub sequences: RequestSequences,
}

impl ViewState {
    pub fn new(initial_view: ViewKind, default_node: &str) -> Self {
        Self {
            active_view: initial_view,
            container_layout: ContainerLayout::default(),
            selected_node: default_node.to_string(),
            node_options: Vec::new(),
            containers: Vec::new(),
            stats: ContainerStats::default(),
            container_panel: ContainerPanel::default(),
            loading: false,
            servers: Vec::new(),
            server_panel: ServerPanel::default(),
            form: None,
            editing_id: None,
            container_detail: None,
            server_detail: None,
            container_graph: GraphSlot::new(),
            server_graph: GraphSlot::new(),
            notifier: Notifier::new(),
            sequences: RequestSequences::default(),
        }
    }

    pub fn cards(&self) -> Vec<ContainerCard> {
        self.containers.iter().map(ContainerCard::from).collect()
    }

    pub fn server_rows(&self, reserved_id: &str) -> Vec<ServerRow> {
        self.servers.iter().map(|s| ServerRow::new(s, reserved_id)).collect()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Close the modal and forget everything it held.
    pub fn close_form(&mut self) {
        self.form = None;
        self.editing_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContainerStatus;

    fn container(status: &str) -> Container {
        Container {
            id: "0123456789abcdef".to_string(),
            name: None,
            status: ContainerStatus::from(status),
            image: None,
            ports: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_view_kind_parse() {
        assert_eq!(ViewKind::parse("server"), ViewKind::Server);
        assert_eq!(ViewKind::parse("serverGraph"), ViewKind::ServerGraph);
        assert_eq!(ViewKind::parse("container"), ViewKind::Container);
        assert_eq!(ViewKind::parse("bogus"), ViewKind::Container);
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_stats() {
        let list = vec![container("running"), container("exited"), container("paused")];
        assert_eq!(
            ContainerStats::from_containers(&list),
            ContainerStats { total: 3, running: 1, stopped: 2 }
        );
        assert_eq!(ContainerStats::from_containers(&[]), ContainerStats::default());
    }

    #[test]
    fn test_card_affordances() {
        let card = ContainerCard::from(&container("running"));
        assert_eq!(card.title, "Unnamed");
        assert_eq!(card.image, "N/A");
        assert!(card.ports.is_none());
        assert_eq!(
            card.actions,
            [
                (ContainerAction::Start, false),
                (ContainerAction::Stop, true),
                (ContainerAction::Restart, true),
            ]
        );
    }

    #[test]
    fn test_form_validation_trims() {
        let form = ServerForm {
            id: " edge ".to_string(),
            label: "  ".to_string(),
            base_url: "".to_string(),
            ..ServerForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingFields(vec!["label", "base_url"])
        );

        let form = ServerForm {
            label: "Edge".to_string(),
            base_url: " tcp://10.0.0.2:2375 ".to_string(),
            ..form
        };
        let payload = form.validate().expect("complete");
        assert_eq!(payload.id, "edge");
        assert_eq!(payload.base_url, "tcp://10.0.0.2:2375");
    }

    #[test]
    fn test_form_test_validation_order() {
        let form = ServerForm::default();
        assert_eq!(form.validate_for_test().unwrap_err(), FormError::MissingUrl);
        let form = ServerForm {
            base_url: "tcp://x".to_string(),
            ..form
        };
        assert_eq!(form.validate_for_test().unwrap_err(), FormError::MissingId);
    }

    #[test]
    fn test_sequence_only_latest_is_current() {
        let mut seq = Sequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_test_outcome_from_result() {
        let ok = TestOutcome::from(ConnectionTestResult {
            ok: true,
            version: Some("24.0.7".to_string()),
            api_version: None,
            error: None,
        });
        assert!(ok.is_success());
        assert_eq!(ok.summary(), "Connected! Docker 24.0.7");

        let refused = TestOutcome::from(ConnectionTestResult {
            ok: false,
            error: Some("connection refused".to_string()),
            ..ConnectionTestResult::default()
        });
        assert_eq!(refused.summary(), "Connection failed: connection refused");
    }
}
