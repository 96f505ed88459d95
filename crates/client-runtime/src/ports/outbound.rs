//! # Outbound Ports
//!
//! Where user-facing notices go.

use parking_lot::Mutex;

use crate::domain::Notice;

/// Presentation sink for "notify user" effects.
pub trait Notifier: Send + Sync {
    /// Tell the user something.
    fn notify(&self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Notifier that keeps every notice.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().last().cloned()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.notices.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}
