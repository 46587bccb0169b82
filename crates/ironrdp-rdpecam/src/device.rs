//! Per-device state: the `CLOSED → OPENING → READY → STREAMING → STOPPING → CLOSED`
//! lifecycle, sample credits, and the fields the sender thread inspects on each wake.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use crate::pdu::MediaTypeDescriptor;
use crate::sink::FrameSink;

/// Mirrors the state machine named in the camera plane design. `streaming`,
/// `is_active_sender`, `need_keyframe`, and `stopping` are tracked alongside it exactly
/// as modeled, since the sender loop inspects those booleans directly rather than
/// matching on the lifecycle tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Closed,
    Opening,
    Ready,
    Streaming,
    Stopping,
}

pub(crate) struct Inner {
    pub lifecycle: Lifecycle,
    pub media_type: MediaTypeDescriptor,
    pub stream_index: u8,
    pub sample_sequence: u32,
    pub credits: u32,
    pub streaming: bool,
    pub is_active_sender: bool,
    pub need_keyframe: bool,
    pub stopping: bool,
    /// DVC channel id of the stream channel, set once StartStreams selects one.
    pub stream_channel_id: Option<u32>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            lifecycle: Lifecycle::Closed,
            media_type: MediaTypeDescriptor::default_640x480_30fps(),
            stream_index: 0,
            sample_sequence: 0,
            credits: 0,
            streaming: false,
            is_active_sender: false,
            need_keyframe: false,
            stopping: false,
            stream_channel_id: None,
        }
    }
}

/// A single virtual camera exposed to the RDP peer.
pub struct CameraDevice {
    pub channel_name: String,
    pub browser_device_id: String,
    pub sink: Arc<FrameSink>,
    pub(crate) inner: Mutex<Inner>,
    pub(crate) condvar: Condvar,
    ref_count: AtomicUsize,
}

impl CameraDevice {
    pub fn new(channel_name: String, browser_device_id: String) -> Arc<Self> {
        Arc::new(Self {
            channel_name,
            browser_device_id,
            sink: Arc::new(FrameSink::new()),
            inner: Mutex::new(Inner::default()),
            condvar: Condvar::new(),
            ref_count: AtomicUsize::new(0),
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lock().expect("device mutex poisoned").lifecycle
    }

    pub fn acquire_ref(&self) {
        self.ref_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Releases one reference, returning `true` if this was the last one.
    pub fn release_ref(&self) -> bool {
        self.ref_count.fetch_sub(1, Ordering::SeqCst) == 1
    }

    pub fn credits(&self) -> u32 {
        self.inner.lock().expect("device mutex poisoned").credits
    }

    /// Applies a SampleRequest: pins the credit count to
    /// [`crate::config::SAMPLE_CREDITS_PER_REQUEST`] rather than accumulating, per the
    /// camera plane's preserved-quirk credit scheme.
    pub fn grant_credit(&self) {
        let mut inner = self.inner.lock().expect("device mutex poisoned");
        inner.credits = crate::config::SAMPLE_CREDITS_PER_REQUEST;
        self.condvar.notify_all();
    }

    /// Transitions `READY → STREAMING`. Returns the outstanding-credit count from
    /// before the reset, which stop handling on another device may need to drain.
    pub fn start_streaming(&self, media_type: MediaTypeDescriptor, channel_id: u32) {
        self.sink.clear();
        let mut inner = self.inner.lock().expect("device mutex poisoned");
        inner.lifecycle = Lifecycle::Streaming;
        inner.media_type = media_type;
        inner.stream_index = 0;
        inner.streaming = true;
        inner.is_active_sender = true;
        inner.need_keyframe = true;
        inner.credits = 0;
        inner.sample_sequence = 0;
        inner.stream_channel_id = Some(channel_id);
        drop(inner);
        self.condvar.notify_all();
    }

    /// Transitions `STREAMING → STOPPING`, returning the number of credits outstanding
    /// at the moment of stop (the caller must emit that many `SampleErrorResponse`s).
    pub fn begin_stop(&self) -> u32 {
        let mut inner = self.inner.lock().expect("device mutex poisoned");
        let was_active_sender = inner.is_active_sender;
        let outstanding = if was_active_sender { inner.credits } else { 0 };
        inner.lifecycle = Lifecycle::Stopping;
        inner.streaming = false;
        inner.is_active_sender = false;
        inner.need_keyframe = true;
        inner.credits = 0;
        drop(inner);
        self.condvar.notify_all();
        outstanding
    }

    pub fn mark_ready(&self) {
        self.inner.lock().expect("device mutex poisoned").lifecycle = Lifecycle::Ready;
    }

    pub fn mark_opening(&self) {
        self.inner.lock().expect("device mutex poisoned").lifecycle = Lifecycle::Opening;
    }

    /// Signals the sender thread to exit and marks the device closed.
    pub fn shut_down(&self) {
        let mut inner = self.inner.lock().expect("device mutex poisoned");
        inner.lifecycle = Lifecycle::Closed;
        inner.stopping = true;
        drop(inner);
        self.condvar.notify_all();
        self.sink.signal_stop();
    }

    pub fn is_active_sender(&self) -> bool {
        self.inner.lock().expect("device mutex poisoned").is_active_sender
    }

    /// DVC channel id this device is bound to, if `StartStreams` has selected one.
    /// Stays set through `begin_stop` so the caller can still address the channel while
    /// draining outstanding credits.
    pub fn stream_channel_id(&self) -> Option<u32> {
        self.inner.lock().expect("device mutex poisoned").stream_channel_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_then_stop_resets_credits_and_flags() {
        let device = CameraDevice::new("RDCamera_Device_0".into(), "cam1".into());
        device.start_streaming(MediaTypeDescriptor::default_640x480_30fps(), 1);
        device.grant_credit();
        assert_eq!(device.credits(), 1);

        let outstanding = device.begin_stop();
        assert_eq!(outstanding, 1);
        assert_eq!(device.lifecycle(), Lifecycle::Stopping);
        assert!(!device.is_active_sender());
    }

    #[test]
    fn stop_of_non_active_sender_reports_no_outstanding_credits() {
        let device = CameraDevice::new("RDCamera_Device_1".into(), "cam2".into());
        device.start_streaming(MediaTypeDescriptor::default_640x480_30fps(), 2);
        device.grant_credit();
        // Simulate a camera switch having already cleared active-sender status.
        device.inner.lock().unwrap().is_active_sender = false;
        assert_eq!(device.begin_stop(), 0);
    }

    #[test]
    fn ref_counting_detects_last_release() {
        let device = CameraDevice::new("RDCamera_Device_2".into(), "cam3".into());
        device.acquire_ref();
        device.acquire_ref();
        assert!(!device.release_ref());
        assert!(device.release_ref());
    }
}
