//! The device-lifecycle seam: notifies a collaborator when reconciliation adds or
//! removes a per-device channel, so it can register/unregister that channel's
//! [`ironrdp_dvc::DvcProcessor`] with the real dynamic channel dispatch spine.
//!
//! [`CameraPlane::reconcile`](crate::plane::CameraPlane) already knows which channel
//! names come and go on each dirty cycle; this trait lets it push that information out
//! instead of the caller re-deriving it by diffing `DeviceAddedNotification`/
//! `DeviceRemovedNotification` traffic.

/// Reacts to a channel name entering or leaving the device table.
pub trait DeviceLifecycle: Send + Sync {
    /// A new per-device channel was assigned a slot; the caller should construct a
    /// [`crate::plane::DeviceChannel`] for `channel_name` and register it.
    fn on_device_added(&self, channel_name: &str);

    /// A previously-advertised channel was torn down; the caller should unregister its
    /// listener.
    fn on_device_removed(&self, channel_name: &str);
}
