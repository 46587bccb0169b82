//! The boundary between this plane and the out-of-scope collaborator that owns the
//! microphone-capture producer.

/// Status code carried by an acknowledgement to the producer (SPEC_FULL §4.3's "ACK
/// semantics" and §6.2's `send_ack`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    Ok,
    ResourceClosed,
}

/// Notifies the collaborator of producer-stream readiness and teardown.
pub trait AudioCollaborator: Send + Sync {
    fn send_ack(&self, message: &str, status: AckStatus);
}
