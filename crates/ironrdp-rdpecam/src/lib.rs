//! RDPECAM (MS-RDPECAM, Video Capture Virtual Channel Extension) dynamic virtual
//! channel implementation.
//!
//! [`CameraPlane`] owns the enumerator channel and every per-device streaming channel
//! for one session. It is driven by two [`ironrdp_dvc::DvcProcessor`] adapters
//! ([`EnumeratorChannel`], [`DeviceChannel`]) that the caller registers with the real
//! dynamic channel dispatch spine, and it drives an out-of-scope collaborator through
//! [`CameraCollaborator`] and [`ChannelWriter`] for everything that does not fit the
//! synchronous `DvcProcessor::process` request/response shape: asynchronous device-list
//! reconciliation pushes and the per-device sender threads that stream samples as
//! credits and frames become available.

mod macros;

pub mod collaborator;
pub mod config;
pub mod device;
pub mod lifecycle;
pub mod pdu;
pub mod plane;
pub mod reassembly;
pub mod registry;
pub mod sender;
pub mod sink;
pub mod writer;

pub use collaborator::{CameraCollaborator, CameraSignal};
pub use device::{CameraDevice, Lifecycle};
pub use lifecycle::DeviceLifecycle;
pub use plane::{default_device_channel_name, CameraPlane, DeviceChannel, EnumeratorChannel};
pub use registry::{CapabilityEntry, CapabilityFormat};
pub use writer::ChannelWriter;
