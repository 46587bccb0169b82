//! Overridable defaults for the constants the original source hardcodes.

/// Maximum frames held in one camera device's sink before the producer starts dropping.
pub const MAX_QUEUED_FRAMES: usize = 15;

/// Maximum payload size accepted from a camera frame producer, in bytes.
pub const MAX_FRAME_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Sample credits granted per `SampleRequest`.
pub const SAMPLE_CREDITS_PER_REQUEST: u32 = 1;

/// Default camera resolution advertised before any `StartStreamsRequest` negotiates one.
pub const DEFAULT_CAMERA_WIDTH: u32 = 640;
pub const DEFAULT_CAMERA_HEIGHT: u32 = 480;
pub const DEFAULT_CAMERA_FPS_NUM: u32 = 30;
pub const DEFAULT_CAMERA_FPS_DEN: u32 = 1;

/// Maximum length of the clipboard buffer, in bytes.
pub const CLIPBOARD_MAX_LENGTH: usize = 262_144;

/// RDPECAM wire protocol version this plane speaks.
pub const RDPECAM_PROTOCOL_VERSION: u8 = 0x02;

/// Environment variable gating the hex-dump observability path (§6.5).
pub const HEXDUMP_ENV_VAR: &str = "GUAC_RDPECAM_HEXDUMP";

/// Runtime-overridable bundle of the constants above, so a collaborator (e.g. an
/// integration test) can tune limits without touching plane internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub max_queued_frames: usize,
    pub max_frame_payload_bytes: usize,
    pub sample_credits_per_request: u32,
    pub default_camera_width: u32,
    pub default_camera_height: u32,
    pub default_camera_fps_num: u32,
    pub default_camera_fps_den: u32,
    pub clipboard_max_length: usize,
    pub rdpecam_protocol_version: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_queued_frames: MAX_QUEUED_FRAMES,
            max_frame_payload_bytes: MAX_FRAME_PAYLOAD_BYTES,
            sample_credits_per_request: SAMPLE_CREDITS_PER_REQUEST,
            default_camera_width: DEFAULT_CAMERA_WIDTH,
            default_camera_height: DEFAULT_CAMERA_HEIGHT,
            default_camera_fps_num: DEFAULT_CAMERA_FPS_NUM,
            default_camera_fps_den: DEFAULT_CAMERA_FPS_DEN,
            clipboard_max_length: CLIPBOARD_MAX_LENGTH,
            rdpecam_protocol_version: RDPECAM_PROTOCOL_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_constants() {
        let config = BridgeConfig::default();
        assert_eq!(config.max_queued_frames, 15);
        assert_eq!(config.clipboard_max_length, 262_144);
    }
}
