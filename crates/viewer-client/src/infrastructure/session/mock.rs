//! Recording session object for unit tests and replays.
//!
//! # Why a recording session?
//!
//! The real session object lives in the page and talks to a remote host.  The
//! `RecordingSession` replaces it with in-memory bookkeeping: every outbound
//! event is pushed into a `Mutex<Vec<...>>` so assertions can inspect exactly
//! what was sent and in what order, and the framebuffer is a solid-colour
//! raster of the configured size.
//!
//! # Usage in tests
//!
//! ```ignore
//! let session = Arc::new(RecordingSession::new(1024, 768));
//! gate.key_down(Keysym(0x61), false);
//! assert_eq!(session.key_events(), vec![(true, Keysym(0x61))]);
//! ```
//!
//! After [`RemoteSession::disconnect`] every send returns
//! [`SessionError::Closed`] and is not recorded.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use image::Rgba;
use viewer_core::{Keysym, PointerState, ScaleFactor};

use crate::application::session::{RemoteSession, SessionError, Snapshot};

/// Fill colour of the mock framebuffer.
const FRAMEBUFFER_FILL: Rgba<u8> = Rgba([0x20, 0x40, 0x80, 0xFF]);

/// A session object that records all calls.
pub struct RecordingSession {
    mouse_states: Mutex<Vec<PointerState>>,
    key_events: Mutex<Vec<(bool, Keysym)>>,
    sizes: Mutex<Vec<(u32, u32)>>,
    applied_scales: Mutex<Vec<f64>>,
    scale: Mutex<f64>,
    framebuffer: Mutex<Option<Snapshot>>,
    flatten_calls: AtomicUsize,
    disconnects: AtomicUsize,
    closed: AtomicBool,
}

impl RecordingSession {
    /// Creates a session with a `width`×`height` framebuffer at scale 1.0.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mouse_states: Mutex::new(Vec::new()),
            key_events: Mutex::new(Vec::new()),
            sizes: Mutex::new(Vec::new()),
            applied_scales: Mutex::new(Vec::new()),
            scale: Mutex::new(1.0),
            framebuffer: Mutex::new(Some(Snapshot::from_pixel(width, height, FRAMEBUFFER_FILL))),
            flatten_calls: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Overrides the reported scale without recording it as applied.
    ///
    /// Accepts any value, including invalid ones, so tests can exercise the
    /// controller's scale validation.
    pub fn with_scale(self, scale: f64) -> Self {
        *self.scale.lock().expect("lock poisoned") = scale;
        self
    }

    /// Replaces the framebuffer with a `width`×`height` raster.
    pub fn resize_framebuffer(&self, width: u32, height: u32) {
        *self.framebuffer.lock().expect("lock poisoned") =
            Some(Snapshot::from_pixel(width, height, FRAMEBUFFER_FILL));
    }

    /// Makes every subsequent `flatten` fail.
    pub fn break_snapshots(&self) {
        *self.framebuffer.lock().expect("lock poisoned") = None;
    }

    pub fn mouse_states(&self) -> Vec<PointerState> {
        self.mouse_states.lock().expect("lock poisoned").clone()
    }

    pub fn key_events(&self) -> Vec<(bool, Keysym)> {
        self.key_events.lock().expect("lock poisoned").clone()
    }

    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.sizes.lock().expect("lock poisoned").clone()
    }

    /// Every scale passed to `set_scale`, in order.
    pub fn applied_scales(&self) -> Vec<f64> {
        self.applied_scales.lock().expect("lock poisoned").clone()
    }

    pub fn flatten_calls(&self) -> usize {
        self.flatten_calls.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_closed() {
            Err(SessionError::Closed)
        } else {
            Ok(())
        }
    }
}

impl RemoteSession for RecordingSession {
    fn send_mouse_state(&self, state: PointerState) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.mouse_states.lock().expect("lock poisoned").push(state);
        Ok(())
    }

    fn send_key_event(&self, pressed: bool, keysym: Keysym) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.key_events
            .lock()
            .expect("lock poisoned")
            .push((pressed, keysym));
        Ok(())
    }

    fn send_size(&self, width: u32, height: u32) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.sizes.lock().expect("lock poisoned").push((width, height));
        Ok(())
    }

    fn scale(&self) -> f64 {
        *self.scale.lock().expect("lock poisoned")
    }

    fn set_scale(&self, scale: ScaleFactor) {
        *self.scale.lock().expect("lock poisoned") = scale.get();
        self.applied_scales
            .lock()
            .expect("lock poisoned")
            .push(scale.get());
    }

    fn width(&self) -> u32 {
        self.framebuffer
            .lock()
            .expect("lock poisoned")
            .as_ref()
            .map_or(0, |fb| fb.width())
    }

    fn height(&self) -> u32 {
        self.framebuffer
            .lock()
            .expect("lock poisoned")
            .as_ref()
            .map_or(0, |fb| fb.height())
    }

    fn flatten(&self) -> Result<Snapshot, SessionError> {
        self.flatten_calls.fetch_add(1, Ordering::SeqCst);
        self.framebuffer
            .lock()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| SessionError::Snapshot("display has no layers".to_string()))
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }
}
