//! Bounded per-device frame queue.
//!
//! Mirrors the channel-router's sink abstraction: a fixed-capacity FIFO guarded by a
//! mutex and condition variable, with a cooperative stop signal that wakes any blocked
//! popper without requiring the popper to poll.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Maximum number of frames a sink holds before the producer starts dropping (SPEC_FULL §6.4).
pub const MAX_QUEUED_FRAMES: usize = 15;

/// A single decoded video sample awaiting transmission to the peer.
#[derive(Debug, Clone)]
pub struct Frame {
    pub payload: Vec<u8>,
    pub pts_ms: u32,
    pub keyframe: bool,
}

#[derive(Default)]
struct SinkState {
    queue: VecDeque<Frame>,
    stopped: bool,
}

/// Bounded FIFO owned by exactly one [`crate::device::CameraDevice`].
pub struct FrameSink {
    state: Mutex<SinkState>,
    not_empty: Condvar,
}

impl FrameSink {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState::default()),
            not_empty: Condvar::new(),
        }
    }

    /// Pushes a frame, dropping it if the queue is already at capacity.
    ///
    /// Returns `true` if the frame was accepted. Logs at debug level once utilisation
    /// reaches 80% or higher, per the queue-full error policy.
    pub fn push(&self, frame: Frame) -> bool {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        if state.queue.len() >= MAX_QUEUED_FRAMES {
            tracing::debug!(capacity = MAX_QUEUED_FRAMES, "camera sink full, dropping frame");
            return false;
        }
        state.queue.push_back(frame);
        if state.queue.len() * 10 >= MAX_QUEUED_FRAMES * 8 {
            tracing::debug!(occupancy = state.queue.len(), "camera sink nearing capacity");
        }
        self.not_empty.notify_one();
        true
    }

    /// Blocks until a frame is available or the sink is stopped, returning `None` in
    /// the latter case. A timeout is used internally purely to avoid an unbounded
    /// wait if a `notify` is ever missed during shutdown races; it is not part of the
    /// documented contract.
    pub fn pop(&self) -> Option<Frame> {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        loop {
            if let Some(frame) = state.queue.pop_front() {
                return Some(frame);
            }
            if state.stopped {
                return None;
            }
            let (guard, _timeout) = self
                .not_empty
                .wait_timeout(state, Duration::from_millis(500))
                .expect("sink mutex poisoned");
            state = guard;
        }
    }

    /// Drops every queued frame without waking the stop signal, used when transitioning
    /// into `STREAMING` to discard stale frames from a prior session.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        state.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("sink mutex poisoned").queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wakes any blocked `pop` caller permanently; subsequent pops drain the remaining
    /// queue then return `None`.
    pub fn signal_stop(&self) {
        let mut state = self.state.lock().expect("sink mutex poisoned");
        state.stopped = true;
        self.not_empty.notify_all();
    }
}

impl Default for FrameSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(payload: &[u8], keyframe: bool) -> Frame {
        Frame {
            payload: payload.to_vec(),
            pts_ms: 0,
            keyframe,
        }
    }

    #[test]
    fn fifo_order_preserved() {
        let sink = FrameSink::new();
        for i in 0..5u8 {
            assert!(sink.push(frame(&[i], false)));
        }
        for i in 0..5u8 {
            assert_eq!(sink.pop().unwrap().payload, vec![i]);
        }
    }

    #[test]
    fn overflow_drops_new_frames() {
        let sink = FrameSink::new();
        for i in 0..MAX_QUEUED_FRAMES {
            assert!(sink.push(frame(&[i as u8], true)));
        }
        assert!(!sink.push(frame(&[0xFF], true)));
        assert_eq!(sink.len(), MAX_QUEUED_FRAMES);
    }

    #[test]
    fn stop_wakes_blocked_pop() {
        let sink = std::sync::Arc::new(FrameSink::new());
        let reader = std::thread::spawn({
            let sink = sink.clone();
            move || sink.pop()
        });
        std::thread::sleep(Duration::from_millis(50));
        sink.signal_stop();
        assert!(reader.join().unwrap().is_none());
    }

    #[test]
    fn clear_drops_queued_frames() {
        let sink = FrameSink::new();
        sink.push(frame(&[1], false));
        sink.push(frame(&[2], false));
        sink.clear();
        assert!(sink.is_empty());
    }
}
