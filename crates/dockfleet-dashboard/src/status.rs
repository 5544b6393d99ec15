//! Status classification shared by every renderer
//!
//! Container cards, card badges and graph node borders all read their
//! presentation from here, so the views cannot disagree about what a status
//! means.

use crate::types::{ContainerStatus, NodeRole, NodeStatus};

/// Presentation for one container status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    /// Short glyph drawn inside graph nodes.
    pub glyph: &'static str,
    /// Font Awesome class for cards and badges.
    pub icon: &'static str,
    /// Graph border color.
    pub color: &'static str,
    /// CSS class for the card badge.
    pub badge_class: &'static str,
    /// CSS modifier for the card itself.
    pub card_class: &'static str,
}

const RUNNING: StatusStyle = StatusStyle {
    glyph: "▶",
    icon: "fa-play-circle",
    color: "#22C55E",
    badge_class: "badge-running",
    card_class: "running",
};

const EXITED: StatusStyle = StatusStyle {
    glyph: "■",
    icon: "fa-stop-circle",
    color: "#4C5D7A",
    badge_class: "badge-exited",
    card_class: "exited",
};

const CREATED: StatusStyle = StatusStyle {
    glyph: "+",
    icon: "fa-plus-circle",
    color: "#3B82F6",
    badge_class: "badge-created",
    card_class: "created",
};

const RESTARTING: StatusStyle = StatusStyle {
    glyph: "↻",
    icon: "fa-sync-alt",
    color: "#EAB308",
    badge_class: "badge-restarting",
    card_class: "restarting",
};

const REMOVING: StatusStyle = StatusStyle {
    glyph: "×",
    icon: "fa-trash-alt",
    color: "#F87171",
    badge_class: "badge-removing",
    card_class: "removing",
};

const PAUSED: StatusStyle = StatusStyle {
    glyph: "⏸",
    icon: "fa-pause-circle",
    color: "#FB923C",
    badge_class: "badge-paused",
    card_class: "paused",
};

const DEAD: StatusStyle = StatusStyle {
    glyph: "☠",
    icon: "fa-skull",
    color: "#475569",
    badge_class: "badge-dead",
    card_class: "dead",
};

/// Used for any status outside the Docker state machine.
pub const UNKNOWN_STATUS: StatusStyle = StatusStyle {
    glyph: "?",
    icon: "fa-question-circle",
    color: "#4C5D7A",
    badge_class: "badge-unknown",
    card_class: "unknown",
};

/// Classify a container status. Total: never fails, unknown values degrade
/// to [`UNKNOWN_STATUS`].
pub fn classify(status: &ContainerStatus) -> StatusStyle {
    match status {
        ContainerStatus::Running => RUNNING,
        ContainerStatus::Exited => EXITED,
        ContainerStatus::Created => CREATED,
        ContainerStatus::Restarting => RESTARTING,
        ContainerStatus::Removing => REMOVING,
        ContainerStatus::Paused => PAUSED,
        ContainerStatus::Dead => DEAD,
        ContainerStatus::Unknown(_) => UNKNOWN_STATUS,
    }
}

// =============================================================================
// Server palette
// =============================================================================

pub const SERVER_NEUTRAL: &str = "#9E9E9E";
const SERVER_OFFLINE: &str = "#EA4335";
const CLIENT_ONLINE: &str = "#60A5FA";
const CENTRAL_ONLINE: &str = "#4B5563";

/// Border color for a server node. Centrals use a darker online color; an
/// unknown status is neutral gray for either role.
pub fn server_border_color(role: NodeRole, status: NodeStatus) -> &'static str {
    match (role, status) {
        (_, NodeStatus::Unknown) => SERVER_NEUTRAL,
        (_, NodeStatus::Offline) => SERVER_OFFLINE,
        (NodeRole::Central, NodeStatus::Online) => CENTRAL_ONLINE,
        (NodeRole::Client, NodeStatus::Online) => CLIENT_ONLINE,
    }
}

pub fn server_glyph(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Online => "✓",
        NodeStatus::Offline => "✗",
        NodeStatus::Unknown => "?",
    }
}

/// Badge class, icon and label for a server's reachability.
pub fn server_status_badge(status: NodeStatus) -> (&'static str, &'static str, &'static str) {
    match status {
        NodeStatus::Online => ("online", "fa-check-circle", "Online"),
        NodeStatus::Offline => ("offline", "fa-times-circle", "Offline"),
        NodeStatus::Unknown => ("unknown", "fa-question-circle", "Unknown"),
    }
}

/// Badge class, icon and label for a server's role.
pub fn server_role_badge(role: NodeRole) -> (&'static str, &'static str, &'static str) {
    match role {
        NodeRole::Central => ("role-central", "fa-crown", "Central"),
        NodeRole::Client => ("role-client", "fa-desktop", "Client"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_status_has_its_own_badge() {
        let statuses = [
            ContainerStatus::Running,
            ContainerStatus::Exited,
            ContainerStatus::Created,
            ContainerStatus::Restarting,
            ContainerStatus::Removing,
            ContainerStatus::Paused,
            ContainerStatus::Dead,
        ];
        let mut badges: Vec<_> = statuses.iter().map(|s| classify(s).badge_class).collect();
        badges.sort();
        badges.dedup();
        assert_eq!(badges.len(), statuses.len());
        assert!(!badges.contains(&UNKNOWN_STATUS.badge_class));
    }

    #[test]
    fn test_unknown_status_uses_default_style() {
        let style = classify(&ContainerStatus::from("frobnicating"));
        assert_eq!(style, UNKNOWN_STATUS);
        assert_eq!(style.glyph, "?");
        assert_eq!(style.badge_class, "badge-unknown");
    }

    #[test]
    fn test_classification_ignores_wire_case() {
        assert_eq!(classify(&ContainerStatus::from("Paused")), classify(&ContainerStatus::Paused));
    }

    #[test]
    fn test_server_palette_is_role_aware() {
        assert_ne!(
            server_border_color(NodeRole::Central, NodeStatus::Online),
            server_border_color(NodeRole::Client, NodeStatus::Online)
        );
        assert_eq!(
            server_border_color(NodeRole::Client, NodeStatus::Unknown),
            SERVER_NEUTRAL
        );
        assert_eq!(
            server_border_color(NodeRole::Central, NodeStatus::Unknown),
            SERVER_NEUTRAL
        );
        assert_eq!(
            server_border_color(NodeRole::Central, NodeStatus::Offline),
            server_border_color(NodeRole::Client, NodeStatus::Offline)
        );
    }
}
