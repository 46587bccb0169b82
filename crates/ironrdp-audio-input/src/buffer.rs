//! The PCM resampling scratch buffer (SPEC_FULL §4.3's "Audio Buffer").
//!
//! Mirrors the source implementation's sample-by-sample translation exactly: each
//! `write` walks the output cursor forward, mapping every output sample back to an
//! input byte offset via the input/output rate ratio and channel-clamped mapping,
//! until the offset runs past the bytes just received. `total_bytes_sent` and
//! `total_bytes_received` are the only state carried between calls — no history
//! beyond the current call's slice is ever retained.

use std::sync::Mutex;

/// Sample rate, channel count, and bytes-per-sample for one side of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    pub rate: u32,
    pub channels: u16,
    pub bps: u8,
}

impl PcmFormat {
    fn validate(self) {
        assert!(
            self.bps == 1 || self.bps == 2,
            "PCM format precondition violated: bps must be 1 or 2, got {}",
            self.bps
        );
    }
}

struct State {
    input: Option<PcmFormat>,
    output: Option<PcmFormat>,
    packet_size: usize,
    packet: Vec<u8>,
    bytes_written: usize,
    total_bytes_sent: u64,
    total_bytes_received: u64,
    flush: Option<Box<dyn FnMut(&[u8]) + Send>>,
}

impl State {
    fn new() -> Self {
        Self {
            input: None,
            output: None,
            packet_size: 0,
            packet: Vec::new(),
            bytes_written: 0,
            total_bytes_sent: 0,
            total_bytes_received: 0,
            flush: None,
        }
    }
}

/// A single-instance PCM scratch buffer. Access is serialized by one mutex, matching
/// the source's single-lock design (no separate locks for input/output format vs.
/// packet state).
pub struct AudioBuffer {
    state: Mutex<State>,
}

impl AudioBuffer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::new()),
        }
    }

    pub fn set_input_format(&self, format: PcmFormat) {
        format.validate();
        self.state.lock().expect("audio buffer mutex poisoned").input = Some(format);
    }

    pub fn set_output_format(&self, format: PcmFormat) {
        format.validate();
        self.state.lock().expect("audio buffer mutex poisoned").output = Some(format);
    }

    /// Arms flushing: resets `bytes_written`, recomputes `packet_size` from the current
    /// output format, and reallocates `packet`. `flush` is invoked with a complete
    /// packet each time one fills.
    pub fn begin(&self, packet_frames: usize, flush: impl FnMut(&[u8]) + Send + 'static) {
        let mut state = self.state.lock().expect("audio buffer mutex poisoned");
        let output = state.output.expect("begin called before set_output_format");
        state.bytes_written = 0;
        state.packet_size = packet_frames * usize::from(output.channels) * usize::from(output.bps);
        state.packet = vec![0u8; state.packet_size];
        state.flush = Some(Box::new(flush));
    }

    /// Translates as many complete output samples as `producer_bytes` makes available,
    /// invoking the flush callback each time a packet fills. `total_bytes_received`
    /// always advances by the full length of `producer_bytes`, whether or not every
    /// byte ended up consumed by a sample this call.
    pub fn write(&self, producer_bytes: &[u8]) {
        let mut state = self.state.lock().expect("audio buffer mutex poisoned");
        if state.packet_size == 0 {
            return;
        }
        let Some(input) = state.input else { return };
        let Some(output) = state.output else { return };

        while let Some(sample) = read_sample(&state, input, output, producer_bytes) {
            let out_bps = usize::from(output.bps);
            let written = state.bytes_written;
            match output.bps {
                2 => state.packet[written..written + 2].copy_from_slice(&sample.to_le_bytes()),
                1 => {
                    #[expect(clippy::cast_possible_truncation, reason = "narrowing to the low byte is intentional")]
                    let narrow = (sample >> 8) as i8;
                    state.packet[written] = narrow.to_le_bytes()[0];
                }
                other => unreachable!("output bps validated to 1 or 2 at set_output_format, got {other}"),
            }

            state.bytes_written += out_bps;
            state.total_bytes_sent += out_bps as u64;

            if state.bytes_written == state.packet_size {
                if let Some(flush) = state.flush.as_mut() {
                    flush(&state.packet);
                }
                state.bytes_written = 0;
            }
        }

        state.total_bytes_received += producer_bytes.len() as u64;
    }

    /// Stops flushing and releases the packet buffer and flush callback. Byte counters
    /// reset so a later `begin` starts a fresh translation from position zero.
    pub fn end(&self) {
        let mut state = self.state.lock().expect("audio buffer mutex poisoned");
        state.bytes_written = 0;
        state.packet_size = 0;
        state.packet = Vec::new();
        state.flush = None;
        state.total_bytes_sent = 0;
        state.total_bytes_received = 0;
    }

    pub fn is_armed(&self) -> bool {
        let state = self.state.lock().expect("audio buffer mutex poisoned");
        state.packet_size != 0 && !state.packet.is_empty()
    }
}

impl Default for AudioBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads one translated sample from `producer_bytes`, or `None` if the position the
/// output cursor maps to has not arrived yet within this call's slice.
fn read_sample(state: &State, input: PcmFormat, output: PcmFormat, producer_bytes: &[u8]) -> Option<i16> {
    let in_bps = i64::from(input.bps);
    let in_rate = f64::from(input.rate);
    let in_channels = i64::from(input.channels);

    let out_bps = i64::from(output.bps);
    let out_rate = f64::from(output.rate);
    let out_channels = i64::from(output.channels);

    #[expect(clippy::cast_possible_wrap, reason = "byte counters stay well under i64::MAX for realistic sessions")]
    let current_sample = state.total_bytes_sent as i64 / out_bps;
    let current_frame = current_sample / out_channels;
    let mut current_channel = current_sample % out_channels;
    if current_channel >= in_channels {
        current_channel = in_channels - 1;
    }

    #[expect(clippy::cast_possible_truncation, reason = "frame ratio scaling mirrors the source's integer truncation")]
    let mapped_frame = (current_frame as f64 * (in_rate / out_rate)) as i64;
    let mapped_sample = mapped_frame * in_channels + current_channel;

    #[expect(clippy::cast_possible_wrap, reason = "byte counters stay well under i64::MAX for realistic sessions")]
    let offset = mapped_sample * in_bps - state.total_bytes_received as i64;
    assert!(offset >= 0, "audio buffer resampling offset went negative");
    let offset = usize::try_from(offset).expect("checked non-negative above");

    if offset + usize::try_from(in_bps).expect("bps is 1 or 2") > producer_bytes.len() {
        return None;
    }

    match input.bps {
        2 => Some(i16::from_le_bytes([producer_bytes[offset], producer_bytes[offset + 1]])),
        1 => {
            #[expect(clippy::cast_possible_wrap, reason = "8-bit samples are read as signed, matching the source")]
            let byte = producer_bytes[offset] as i8;
            Some(i16::from(byte) << 8)
        }
        other => unreachable!("input bps validated to 1 or 2 at set_input_format, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex as StdMutex};

    use super::*;

    fn format(rate: u32, channels: u16, bps: u8) -> PcmFormat {
        PcmFormat { rate, channels, bps }
    }

    #[test]
    fn passthrough_same_format_forwards_samples_unchanged() {
        let buffer = AudioBuffer::new();
        buffer.set_input_format(format(8000, 1, 2));
        buffer.set_output_format(format(8000, 1, 2));

        let flushed = Arc::new(StdMutex::new(Vec::new()));
        let flushed_clone = flushed.clone();
        buffer.begin(2, move |packet: &[u8]| flushed_clone.lock().unwrap().push(packet.to_vec()));

        let samples: [i16; 4] = [100, -200, 300, -400];
        let mut bytes = Vec::new();
        for sample in samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        buffer.write(&bytes);

        let flushed = flushed.lock().unwrap();
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed[0], samples[0..2].iter().flat_map(|s| s.to_le_bytes()).collect::<Vec<u8>>());
        assert_eq!(flushed[1], samples[2..4].iter().flat_map(|s| s.to_le_bytes()).collect::<Vec<u8>>());
    }

    #[test]
    fn eight_bit_input_shifts_into_sixteen_bit_output() {
        let buffer = AudioBuffer::new();
        buffer.set_input_format(format(8000, 1, 1));
        buffer.set_output_format(format(8000, 1, 2));

        let flushed = Arc::new(StdMutex::new(Vec::new()));
        let flushed_clone = flushed.clone();
        buffer.begin(1, move |packet: &[u8]| flushed_clone.lock().unwrap().push(packet.to_vec()));

        buffer.write(&[0x7F_i8.to_le_bytes()[0]]);

        let flushed = flushed.lock().unwrap();
        assert_eq!(flushed.len(), 1);
        let sample = i16::from_le_bytes([flushed[0][0], flushed[0][1]]);
        assert_eq!(sample, i16::from(0x7F_i8) << 8);
    }

    #[test]
    fn sixteen_bit_output_narrowed_to_eight_bit() {
        let buffer = AudioBuffer::new();
        buffer.set_input_format(format(8000, 1, 2));
        buffer.set_output_format(format(8000, 1, 1));

        let flushed = Arc::new(StdMutex::new(Vec::new()));
        let flushed_clone = flushed.clone();
        buffer.begin(1, move |packet: &[u8]| flushed_clone.lock().unwrap().push(packet.to_vec()));

        let sample: i16 = 0x1234;
        buffer.write(&sample.to_le_bytes());

        let flushed = flushed.lock().unwrap();
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0][0], (sample >> 8) as u8);
    }

    #[test]
    #[should_panic(expected = "precondition")]
    fn invalid_bps_panics_on_set() {
        let buffer = AudioBuffer::new();
        buffer.set_input_format(format(8000, 1, 3));
    }

    #[test]
    fn end_resets_counters_and_disarms() {
        let buffer = AudioBuffer::new();
        buffer.set_input_format(format(8000, 1, 2));
        buffer.set_output_format(format(8000, 1, 2));
        buffer.begin(1, |_packet: &[u8]| {});
        assert!(buffer.is_armed());
        buffer.end();
        assert!(!buffer.is_armed());
    }
}
