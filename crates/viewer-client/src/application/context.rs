//! The explicit collaborator context.
//!
//! [`ViewerContext`] is built once at attach time and handed to every
//! component constructor.  Components keep the `Arc`s they need; nothing
//! reaches for ambient globals.

use std::sync::Arc;

use crate::domain::config::ViewerConfig;

use super::host::{ClipboardSink, CompositionTarget, StatusView, TitleSink, Viewport};
use super::session::RemoteSession;
use super::storage::DurableStorage;
use super::timer::TimerScheduler;

/// Every collaborator the viewer controller depends on.
#[derive(Clone)]
pub struct ViewerContext {
    pub session: Arc<dyn RemoteSession>,
    pub viewport: Arc<dyn Viewport>,
    pub composition_target: Arc<dyn CompositionTarget>,
    pub status: Arc<dyn StatusView>,
    pub title: Arc<dyn TitleSink>,
    pub clipboard: Arc<dyn ClipboardSink>,
    /// `None` when durable storage is unavailable; thumbnail capture is then
    /// skipped entirely.
    pub storage: Option<Arc<dyn DurableStorage>>,
    pub timers: Arc<dyn TimerScheduler>,
    /// Identifier of this session, used as the thumbnail store key.
    pub session_id: String,
    pub config: ViewerConfig,
}

impl std::fmt::Debug for ViewerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerContext")
            .field("session_id", &self.session_id)
            .field("storage_available", &self.storage.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
