//! The "message lock" seam: serializes outbound writes onto the shared RDP transport.
//!
//! Sender threads run independently of the dispatch tick that drives
//! [`ironrdp_dvc::DvcProcessor::process`], so their outbound `SampleResponse`s cannot
//! simply be returned from `process`. Instead they go through this trait, which the
//! collaborator implements once per session over the real transport.

use ironrdp_dvc::DvcMessage;
use ironrdp_pdu::PduResult;

/// Writes one already-framed DVC message to the given channel, holding the session
/// message lock for the duration of the call.
pub trait ChannelWriter: Send + Sync {
    fn write_message(&self, channel_id: u32, message: DvcMessage) -> PduResult<()>;
}
