//! Toast notifications and the status line
//!
//! Toasts are transient and never block input. The notifier only keeps the
//! queue; dismissal timing belongs to the page layer.

/// Severity of a toast, which also selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast toast-info",
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Queue of visible toasts plus the single-line status text under the
/// toolbar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifier {
    toasts: Vec<Toast>,
    next_id: u64,
    status_line: String,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast and return its id for later dismissal.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        };
        match kind {
            ToastKind::Error => log::warn!("toast: {}", toast.message),
            _ => log::debug!("toast: {}", toast.message),
        }
        self.toasts.push(toast);
        self.next_id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Remove a toast. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn set_status_line(&mut self, text: impl Into<String>) {
        self.status_line = text.into();
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut n = Notifier::new();
        let a = n.success("saved");
        let b = n.error("failed");
        assert_ne!(a, b);
        assert_eq!(n.toasts().len(), 2);

        assert!(n.dismiss(a));
        assert!(!n.dismiss(a));
        assert_eq!(n.toasts().len(), 1);
        assert_eq!(n.last().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_ids_are_not_reused_after_dismiss() {
        let mut n = Notifier::new();
        let a = n.info("one");
        n.dismiss(a);
        let b = n.info("two");
        assert!(b > a);
    }

    #[test]
    fn test_status_line() {
        let mut n = Notifier::new();
        assert_eq!(n.status_line(), "");
        n.set_status_line("node: main · 3 containers");
        assert_eq!(n.status_line(), "node: main · 3 containers");
    }
}
