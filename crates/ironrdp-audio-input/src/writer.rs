//! The "message lock" seam: serializes outbound writes onto the shared RDP transport.
//!
//! Mirrors `ironrdp-rdpecam`'s writer seam: the flush callback that drives
//! `DataIncomingPdu`/`DataPdu` writes runs from whatever thread the producer calls
//! `AudioPlane::write` on, independently of the DVC dispatch tick, so it cannot simply
//! return its messages from `DvcProcessor::process`.

use ironrdp_dvc::DvcMessage;
use ironrdp_pdu::PduResult;

pub trait ChannelWriter: Send + Sync {
    fn write_message(&self, channel_id: u32, message: DvcMessage) -> PduResult<()>;
}
