//! Session State (spec §4.5): the message lock and the plane-root handles shared across
//! one RDP session.
//!
//! The capability registry, dirty-flag and current-sink bookkeeping spec §4.5 describes
//! already lives inside [`ironrdp_rdpecam::CameraPlane`] — it is the only plane that
//! needs it, and it is already exercised by that crate's own tests. Reimplementing it
//! here would just be indirection. What genuinely crosses plane boundaries is the
//! message lock (spec's invariant: every outbound DVC write acquires the lock for its
//! duration, and the write lock is never held across a DVC write) and the shared handle
//! to the channel router, so `SessionState` centralizes exactly those two things and
//! hands out the plane roots it was built from.

use std::sync::{Arc, Mutex, OnceLock, Weak};

use ironrdp_audio_input::{AudioCollaborator, AudioPlane};
use ironrdp_dvc::DvcMessage;
use ironrdp_pdu::{other_err, PduResult};
use ironrdp_rdpecam::{default_device_channel_name, CameraCollaborator, CameraPlane, DeviceLifecycle};
use ironrdp_svc::SvcMessage;

use crate::router::ChannelRouter;
use crate::transport::RdpTransport;

/// Owns the message lock and forwards writes from either plane to the transport.
///
/// Constructed once per session and handed to both [`CameraPlane::new`] and
/// [`AudioPlane::new`] as their `ChannelWriter`, so a frame write and an audio-packet
/// write from two different sender threads can never interleave on the wire.
pub struct SessionState {
    transport: Arc<dyn RdpTransport>,
    lock: Mutex<()>,
    router: Arc<ChannelRouter>,
}

impl SessionState {
    pub fn new(transport: Arc<dyn RdpTransport>) -> Arc<Self> {
        Arc::new(Self {
            transport,
            lock: Mutex::new(()),
            router: Arc::new(ChannelRouter::new()),
        })
    }

    pub fn router(&self) -> Arc<ChannelRouter> {
        self.router.clone()
    }

    fn write(&self, channel_id: u32, message: DvcMessage) -> PduResult<()> {
        let _guard = self.lock.lock().expect("session message lock poisoned");
        let messages: Vec<SvcMessage> = ironrdp_dvc::encode_dvc_messages(channel_id, vec![message], ironrdp_svc::ChannelFlags::empty())?;
        self.transport.send(messages)
    }
}

impl ironrdp_rdpecam::writer::ChannelWriter for SessionState {
    fn write_message(&self, channel_id: u32, message: DvcMessage) -> PduResult<()> {
        self.write(channel_id, message)
    }
}

impl ironrdp_audio_input::writer::ChannelWriter for SessionState {
    fn write_message(&self, channel_id: u32, message: DvcMessage) -> PduResult<()> {
        self.write(channel_id, message)
    }
}

/// Bridges [`CameraPlane`]'s reconciliation sweep to the [`ChannelRouter`]: registers a
/// [`ironrdp_rdpecam::DeviceChannel`] when a slot is added, unregisters it when the slot
/// is swept away.
///
/// Built before the plane it watches, since the plane's constructor takes the lifecycle
/// handle; `bind` is called once construction completes. A [`Weak`] reference avoids a
/// reference cycle (the plane's `reconcile` holds an `Arc` to this lifecycle).
struct RouterDeviceLifecycle {
    router: Arc<ChannelRouter>,
    camera: OnceLock<Weak<CameraPlane>>,
}

impl RouterDeviceLifecycle {
    fn new(router: Arc<ChannelRouter>) -> Arc<Self> {
        Arc::new(Self {
            router,
            camera: OnceLock::new(),
        })
    }

    fn bind(&self, camera: &Arc<CameraPlane>) {
        let _ = self.camera.set(Arc::downgrade(camera));
    }
}

impl DeviceLifecycle for RouterDeviceLifecycle {
    fn on_device_added(&self, channel_name: &str) {
        let Some(camera) = self.camera.get().and_then(Weak::upgrade) else {
            return;
        };
        let processor = camera.device_processor(channel_name);
        if let Err(error) = self.router.register_listener(Box::new(processor)) {
            tracing::warn!(%error, channel = channel_name, "camera device channel already registered");
        }
    }

    fn on_device_removed(&self, channel_name: &str) {
        self.router.unregister_listener(channel_name);
    }
}

/// Everything one RDP session needs: the message lock, the channel router, and the
/// camera/audio plane roots registered with it.
///
/// This is the glue spec §4.1's Channel Router description calls for: the enumerator
/// channel, the slot-0 device channel (pre-registered at startup, spec §4.2.6 step 3),
/// and the audio-input channel are all registered here, and `CameraPlane`'s
/// reconciliation sweep keeps further device slots registered/unregistered as
/// [`RouterDeviceLifecycle`] reacts to it, so DVC open/data/close callbacks the real
/// transport collaborator observes reach the right plane by channel name alone.
pub struct BridgeSession {
    pub session: Arc<SessionState>,
    pub camera: Arc<CameraPlane>,
    pub audio: Arc<AudioPlane>,
}

impl BridgeSession {
    pub fn new(
        transport: Arc<dyn RdpTransport>,
        camera_collaborator: Arc<dyn CameraCollaborator>,
        audio_collaborator: Arc<dyn AudioCollaborator>,
    ) -> PduResult<Arc<Self>> {
        let session = SessionState::new(transport);
        let router = session.router();

        let lifecycle = RouterDeviceLifecycle::new(router.clone());
        let camera = CameraPlane::new(session.clone(), camera_collaborator, lifecycle.clone());
        lifecycle.bind(&camera);

        router
            .register_listener(Box::new(camera.enumerator_processor()))
            .map_err(|_error| other_err!("BridgeSession::new", "enumerator channel registration failed"))?;
        router
            .register_listener(Box::new(camera.device_processor(default_device_channel_name())))
            .map_err(|_error| other_err!("BridgeSession::new", "slot-0 device channel registration failed"))?;

        let audio = AudioPlane::new(session.clone(), audio_collaborator);
        router
            .register_listener(Box::new(audio.processor()))
            .map_err(|_error| other_err!("BridgeSession::new", "audio-input channel registration failed"))?;

        Ok(Arc::new(Self { session, camera, audio }))
    }

    pub fn router(&self) -> Arc<ChannelRouter> {
        self.session.router()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use ironrdp_audio_input::writer::ChannelWriter as AudioChannelWriter;
    use ironrdp_rdpecam::writer::ChannelWriter as CameraChannelWriter;
    use ironrdp_svc::SvcMessage;

    use super::*;

    struct RecordingTransport {
        sent: StdMutex<Vec<usize>>,
    }

    impl RdpTransport for RecordingTransport {
        fn send(&self, messages: Vec<SvcMessage>) -> PduResult<()> {
            self.sent.lock().expect("poisoned").push(messages.len());
            Ok(())
        }
    }

    struct DummyPdu;

    impl ironrdp_pdu::PduEncode for DummyPdu {
        fn encode(&self, _dst: &mut ironrdp_pdu::cursor::WriteCursor<'_>) -> PduResult<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "DummyPdu"
        }

        fn size(&self) -> usize {
            0
        }
    }

    impl ironrdp_dvc::DvcPduEncode for DummyPdu {}

    #[test]
    fn both_plane_writer_impls_reach_the_same_transport() {
        let transport = Arc::new(RecordingTransport { sent: StdMutex::new(Vec::new()) });
        let session = SessionState::new(transport.clone());

        CameraChannelWriter::write_message(&*session, 3, Box::new(DummyPdu)).unwrap();
        AudioChannelWriter::write_message(&*session, 4, Box::new(DummyPdu)).unwrap();

        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    struct NullCameraCollaborator;

    impl ironrdp_rdpecam::CameraCollaborator for NullCameraCollaborator {
        fn send_argv(&self, _signal: ironrdp_rdpecam::CameraSignal, _value: &str) {}
    }

    struct NullAudioCollaborator;

    impl ironrdp_audio_input::AudioCollaborator for NullAudioCollaborator {
        fn send_ack(&self, _message: &str, _status: ironrdp_audio_input::AckStatus) {}
    }

    #[test]
    fn bridge_session_registers_enumerator_slot_zero_and_audio_channels() {
        let transport = Arc::new(RecordingTransport { sent: StdMutex::new(Vec::new()) });
        let bridge = BridgeSession::new(transport, Arc::new(NullCameraCollaborator), Arc::new(NullAudioCollaborator)).unwrap();

        let router = bridge.router();
        router.on_channel_open(ironrdp_rdpecam::config::ENUMERATOR_CHANNEL_NAME, 10).unwrap();
        router
            .on_channel_open(&ironrdp_rdpecam::default_device_channel_name(), 11)
            .unwrap();
        router.on_channel_open(ironrdp_audio_input::config::CHANNEL_NAME, 12).unwrap();

        // A slot registered only by reconciliation is unknown until a device is added.
        assert!(router.on_channel_open("RDCamera_Device_1", 13).is_err());

        bridge.camera.update_capabilities(vec![ironrdp_rdpecam::CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);
        router.on_channel_open("RDCamera_Device_1", 13).unwrap();

        bridge.camera.update_capabilities(vec![]);
        assert!(router.on_channel_open("RDCamera_Device_1", 14).is_err());
    }
}
