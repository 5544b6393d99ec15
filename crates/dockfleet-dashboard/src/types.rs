//! Type definitions for the Dockfleet Dashboard
//!
//! Wire types mirror the JSON shapes served by the dashboard backend. Enum
//! fields decode leniently: unknown strings are kept instead of failing the
//! whole payload.

use serde::{Deserialize, Serialize};

/// A container reported by one Docker node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: ContainerStatus,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ports: Option<String>,
}

impl Container {
    /// Display label, falling back to the short form of the id.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => short_id(&self.id),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }
}

/// First twelve characters of a container id, the width `docker ps` uses.
pub fn short_id(id: &str) -> String {
    id.chars().take(12).collect()
}

/// Container lifecycle state. Matched case-insensitively on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerStatus {
    Running,
    Exited,
    Created,
    Restarting,
    Removing,
    Paused,
    Dead,
    /// Anything the backend sends that is not a known Docker state.
    Unknown(String),
}

impl Default for ContainerStatus {
    fn default() -> Self {
        ContainerStatus::Unknown(String::new())
    }
}

impl From<String> for ContainerStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "running" => ContainerStatus::Running,
            "exited" => ContainerStatus::Exited,
            "created" => ContainerStatus::Created,
            "restarting" => ContainerStatus::Restarting,
            "removing" => ContainerStatus::Removing,
            "paused" => ContainerStatus::Paused,
            "dead" => ContainerStatus::Dead,
            _ => ContainerStatus::Unknown(raw),
        }
    }
}

impl From<&str> for ContainerStatus {
    fn from(raw: &str) -> Self {
        ContainerStatus::from(raw.to_string())
    }
}

impl From<ContainerStatus> for String {
    fn from(status: ContainerStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerStatus::Running => write!(f, "running"),
            ContainerStatus::Exited => write!(f, "exited"),
            ContainerStatus::Created => write!(f, "created"),
            ContainerStatus::Restarting => write!(f, "restarting"),
            ContainerStatus::Removing => write!(f, "removing"),
            ContainerStatus::Paused => write!(f, "paused"),
            ContainerStatus::Dead => write!(f, "dead"),
            ContainerStatus::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Lifecycle action that can be issued against a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
}

impl ContainerAction {
    pub const ALL: [ContainerAction; 3] = [
        ContainerAction::Start,
        ContainerAction::Stop,
        ContainerAction::Restart,
    ];

    /// Path segment under `/api/containers/`.
    pub fn as_path(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Restart => "restart",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContainerAction::Start => "Start",
            ContainerAction::Stop => "Stop",
            ContainerAction::Restart => "Restart",
        }
    }

    /// Whether the action's button is enabled for a container in `status`.
    pub fn is_enabled_for(&self, status: &ContainerStatus) -> bool {
        match self {
            ContainerAction::Start => *status != ContainerStatus::Running,
            ContainerAction::Stop => *status == ContainerStatus::Running,
            ContainerAction::Restart => true,
        }
    }
}

impl std::fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// Body of `POST /api/containers/{action}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionRequest {
    pub node_id: String,
    pub container_id: String,
}

/// A registered Docker host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub tls: bool,
    #[serde(default)]
    pub role: NodeRole,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerNode {
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    pub fn is_central(&self) -> bool {
        self.role == NodeRole::Central
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeRole {
    Central,
    #[default]
    Client,
}

impl From<String> for NodeRole {
    fn from(raw: String) -> Self {
        if raw.trim().eq_ignore_ascii_case("central") {
            NodeRole::Central
        } else {
            NodeRole::Client
        }
    }
}

impl From<NodeRole> for String {
    fn from(role: NodeRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Central => write!(f, "central"),
            NodeRole::Client => write!(f, "client"),
        }
    }
}

/// Reachability as last checked by the backend. Never computed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl From<String> for NodeStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => NodeStatus::Online,
            "offline" => NodeStatus::Offline,
            _ => NodeStatus::Unknown,
        }
    }
}

impl From<NodeStatus> for String {
    fn from(status: NodeStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeStatus::Online => write!(f, "online"),
            NodeStatus::Offline => write!(f, "offline"),
            NodeStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Body of `POST /api/nodes` and `PUT /api/nodes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NodePayload {
    pub id: String,
    pub label: String,
    pub base_url: String,
    pub tls: bool,
}

/// Acknowledgement returned by mutations. `ok: false` marks a refusal the
/// backend still answered with a 2xx.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of `POST /api/nodes/{id}/test`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConnectionTestResult {
    pub ok: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_status_is_case_insensitive() {
        let c: Container =
            serde_json::from_str(r#"{"id":"abc","status":"RUNNING"}"#).expect("valid container");
        assert_eq!(c.status, ContainerStatus::Running);
        assert!(c.is_running());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let c: Container = serde_json::from_str(r#"{"id":"abc","status":"frobnicating"}"#)
            .expect("unknown status must still decode");
        assert_eq!(c.status, ContainerStatus::Unknown("frobnicating".to_string()));
        assert_eq!(c.status.to_string(), "frobnicating");
    }

    #[test]
    fn test_display_name_falls_back_to_short_id() {
        let c = Container {
            id: "0123456789abcdef".to_string(),
            name: None,
            status: ContainerStatus::Exited,
            image: None,
            ports: None,
        };
        assert_eq!(c.display_name(), "0123456789ab");

        let named = Container { name: Some("web".to_string()), ..c };
        assert_eq!(named.display_name(), "web");
    }

    #[test]
    fn test_action_affordances() {
        assert!(!ContainerAction::Start.is_enabled_for(&ContainerStatus::Running));
        assert!(ContainerAction::Stop.is_enabled_for(&ContainerStatus::Running));
        assert!(ContainerAction::Start.is_enabled_for(&ContainerStatus::Exited));
        assert!(!ContainerAction::Stop.is_enabled_for(&ContainerStatus::Paused));
        for status in [ContainerStatus::Running, ContainerStatus::Dead, "odd".into()] {
            assert!(ContainerAction::Restart.is_enabled_for(&status));
        }
    }

    #[test]
    fn test_server_node_defaults() {
        // `GET /api/nodes` only carries id and label
        let node: ServerNode =
            serde_json::from_str(r#"{"id":"edge-1","label":"Edge"}"#).expect("sparse node");
        assert_eq!(node.role, NodeRole::Client);
        assert_eq!(node.status, NodeStatus::Unknown);
        assert!(!node.tls);

        let node: ServerNode = serde_json::from_str(
            r#"{"id":"main","label":"","role":"central","status":"online","type":"local"}"#,
        )
        .expect("status node");
        assert!(node.is_central());
        assert_eq!(node.display_label(), "main");
        assert_eq!(node.node_type.as_deref(), Some("local"));
    }
}
