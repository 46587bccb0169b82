//! The per-device sender thread: pops frames from a device's sink and writes
//! `SampleResponse`s to the peer while credits allow, per the nine-step loop.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{STATS_LOG_EVERY_FRAMES, STATS_LOG_INTERVAL};
use crate::device::CameraDevice;
use crate::pdu::SampleResponse;
use crate::writer::ChannelWriter;

#[derive(Default)]
struct Stats {
    processed: u64,
    dropped: u64,
}

impl Stats {
    fn log(&self, channel_name: &str, queue_len: usize) {
        let total = self.processed + self.dropped;
        let drop_rate = if total == 0 {
            0.0
        } else {
            self.dropped as f64 / total as f64
        };
        tracing::info!(
            channel = channel_name,
            processed = self.processed,
            dropped = self.dropped,
            drop_rate,
            queue_len,
            "camera sender stats"
        );
    }
}

/// Spawns the dedicated sender thread for `device`. `on_write_failure` is invoked if a
/// write to the peer fails, giving the caller a chance to unbind the session's current
/// sink pointer when it still points at this device.
pub fn spawn(
    device: Arc<CameraDevice>,
    writer: Arc<dyn ChannelWriter>,
    on_write_failure: Arc<dyn Fn(&Arc<CameraDevice>) + Send + Sync>,
) -> std::thread::JoinHandle<()> {
    std::thread::Builder::new()
        .name(format!("rdpecam-sender-{}", device.channel_name))
        .spawn(move || run(device, writer.as_ref(), on_write_failure.as_ref()))
        .expect("failed to spawn camera sender thread")
}

fn run(device: Arc<CameraDevice>, writer: &dyn ChannelWriter, on_write_failure: &dyn Fn(&Arc<CameraDevice>)) {
    let mut stats = Stats::default();
    let mut last_log = Instant::now();

    loop {
        let (channel_id, stream_index, should_exit) = {
            let mut inner = device.inner.lock().expect("device mutex poisoned");
            loop {
                if inner.stopping {
                    break;
                }
                if inner.stream_channel_id.is_some() && inner.streaming && inner.is_active_sender && inner.credits > 0
                {
                    break;
                }
                inner = device.condvar.wait(inner).expect("device mutex poisoned");
            }

            if inner.stopping {
                (None, 0, true)
            } else {
                let stream_index = inner.stream_index;
                inner.sample_sequence = inner.sample_sequence.wrapping_add(1);
                (inner.stream_channel_id, stream_index, false)
            }
        };

        if should_exit {
            return;
        }

        let Some(channel_id) = channel_id else {
            continue;
        };

        let Some(frame) = device.sink.pop() else {
            // Sink was stopped; the device is being torn down.
            return;
        };

        let proceed = {
            let inner = device.inner.lock().expect("device mutex poisoned");
            inner.streaming && inner.is_active_sender && inner.stream_channel_id == Some(channel_id) && (!inner.need_keyframe || frame.keyframe)
        };

        if !proceed {
            stats.dropped += 1;
            continue;
        }

        let keyframe = frame.keyframe;
        let message = EncodedSample::new(stream_index, frame.payload);

        match writer.write_message(channel_id, Box::new(message)) {
            Ok(()) => {
                let mut inner = device.inner.lock().expect("device mutex poisoned");
                inner.credits = inner.credits.saturating_sub(1);
                if keyframe {
                    inner.need_keyframe = false;
                }
                drop(inner);
                stats.processed += 1;
            }
            Err(error) => {
                tracing::warn!(channel = %device.channel_name, %error, "camera channel write failed");
                device.begin_stop();
                on_write_failure(&device);
            }
        }

        if stats.processed + stats.dropped >= STATS_LOG_EVERY_FRAMES || last_log.elapsed() >= STATS_LOG_INTERVAL {
            stats.log(&device.channel_name, device.sink.len());
            stats = Stats::default();
            last_log = Instant::now();
        }
    }
}

/// Owns a [`SampleResponse`]'s fields so the message can outlive the borrow of
/// `frame.payload` once boxed as a [`ironrdp_dvc::DvcMessage`].
struct EncodedSample {
    stream_index: u8,
    payload: Vec<u8>,
}

impl EncodedSample {
    fn new(stream_index: u8, payload: Vec<u8>) -> Self {
        Self { stream_index, payload }
    }
}

impl ironrdp_pdu::PduEncode for EncodedSample {
    fn encode(&self, dst: &mut ironrdp_pdu::cursor::WriteCursor<'_>) -> ironrdp_pdu::PduResult<()> {
        SampleResponse {
            stream_index: self.stream_index,
            payload: &self.payload,
        }
        .encode(dst)
    }

    fn name(&self) -> &'static str {
        "RDPECAM_SAMPLE_RESPONSE"
    }

    fn size(&self) -> usize {
        SampleResponse {
            stream_index: self.stream_index,
            payload: &self.payload,
        }
        .size()
    }
}

impl ironrdp_dvc::DvcPduEncode for EncodedSample {}
