//! Fixed configuration constants for the camera plane (SPEC_FULL §6.4).

/// Credits granted by a single `SampleRequest`. Pinned rather than accumulated: a
/// second `SampleRequest` before the first credit is spent simply overwrites the
/// outstanding count back to this value.
pub const SAMPLE_CREDITS_PER_REQUEST: u32 = 1;

/// Fixed RDPECAM enumerator control channel name.
pub const ENUMERATOR_CHANNEL_NAME: &str = "RDCamera_Device_Enumerator";

/// Prefix for per-device streaming channel names, followed by a slot number.
pub const DEVICE_CHANNEL_PREFIX: &str = "RDCamera_Device_";

/// Highest device slot swept during legacy-style reconciliation (see [`crate::registry`]).
pub const DEVICE_SLOT_SWEEP_MAX: u32 = 10;

/// Sender-thread stats are logged at least this often.
pub const STATS_LOG_EVERY_FRAMES: u64 = 100;

/// ...and at least this often in wall-clock time, whichever comes first.
pub const STATS_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);
