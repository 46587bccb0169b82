//! Fixed configuration constants for the audio-input plane (SPEC_FULL §6.4).

/// Fixed RDPEI channel name.
pub const CHANNEL_NAME: &str = "AUDIO_INPUT";

/// `WAVE_FORMAT_PCM`, the only format tag this plane ever selects.
pub const WAVE_FORMAT_PCM: u16 = 0x0001;
