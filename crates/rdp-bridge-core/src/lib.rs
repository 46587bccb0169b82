//! Session state, channel routing, and clipboard plane gluing the camera, audio-input
//! and clipboard dynamic/static virtual channel planes to one RDP session.
//!
//! This crate is the orchestration layer described by the Channel Router, Clipboard
//! Plane and Session State modules: it owns the message lock shared by every plane's
//! outbound write, demultiplexes dynamic virtual channel traffic by name, and carries
//! the CP1252/UTF-16LE transcoding the clipboard plane needs.

pub mod clipboard;
pub mod codec;
pub mod config;
pub mod hexdump;
pub mod router;
pub mod session;
pub mod transport;

pub use clipboard::{BridgeClipboardBackend, ClipboardBuffer, ClipboardPlane};
pub use config::BridgeConfig;
pub use router::{ChannelRouter, RouterError};
pub use session::{BridgeSession, SessionState};
pub use transport::RdpTransport;
