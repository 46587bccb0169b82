//! The seam to the out-of-scope RDP transport (the socket/stream the gateway collaborator
//! owns). Every plane's outbound write eventually lands here.

use ironrdp_pdu::PduResult;
use ironrdp_svc::SvcMessage;

/// Sends already-encoded SVC messages onto the live RDP connection.
pub trait RdpTransport: Send + Sync {
    fn send(&self, messages: Vec<SvcMessage>) -> PduResult<()>;
}
