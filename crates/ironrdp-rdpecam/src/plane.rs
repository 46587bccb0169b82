//! Ties the wire format, per-device state machines, registry, and reassembly together
//! behind the `DvcProcessor` seam that the real DVC dispatch spine drives.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use ironrdp_dvc::{DvcMessage, DvcProcessor};
use ironrdp_pdu::cursor::ReadCursor;
use ironrdp_pdu::{PduDecode, PduEncode, PduResult};
use ironrdp_svc::AsAny;

use crate::collaborator::{format_start_signal, CameraCollaborator, CameraSignal};
use crate::config::{DEVICE_CHANNEL_PREFIX, ENUMERATOR_CHANNEL_NAME};
use crate::device::CameraDevice;
use crate::lifecycle::DeviceLifecycle;
use crate::pdu::{
    self, CurrentMediaTypeResponse, DeviceAddedNotification, DeviceRemovedNotification, ErrorResponse,
    MediaTypeListResponse, PropertyListResponse, SampleErrorResponse, SelectVersionRequest, SelectVersionResponse,
    StartStreamsRequest, StreamDescriptor, StreamIndexRequest, StreamListResponse, SuccessResponse,
    ERROR_STATUS_NOT_SUPPORTED, ERROR_STATUS_UNKNOWN_STREAM, MSG_ACTIVATE_DEVICE_REQUEST, MSG_CURRENT_MEDIA_TYPE_REQUEST,
    MSG_DEACTIVATE_DEVICE_REQUEST, MSG_MEDIA_TYPE_LIST_REQUEST, MSG_PROPERTY_LIST_REQUEST, MSG_PROPERTY_VALUE_REQUEST,
    MSG_SAMPLE_REQUEST, MSG_SELECT_VERSION_RESPONSE, MSG_SET_PROPERTY_VALUE_REQUEST, MSG_START_STREAMS_REQUEST,
    MSG_STOP_STREAMS_REQUEST, MSG_STREAM_LIST_REQUEST,
};
use crate::reassembly::Reassembler;
use crate::registry::{CapabilityEntry, DeviceRegistry, DeviceTable};
use crate::sender;
use crate::sink::Frame;
use crate::writer::ChannelWriter;

struct PlaneState {
    registry: DeviceRegistry,
    devices: DeviceTable,
    /// Channel name of the device whose sink is bound to the producer feed.
    current_sink: Option<String>,
    enumerator_channel_id: Option<u32>,
    reassembler: Reassembler,
    sender_threads: BTreeMap<String, std::thread::JoinHandle<()>>,
}

impl PlaneState {
    fn new() -> Self {
        Self {
            registry: DeviceRegistry::new(),
            devices: DeviceTable::new(),
            current_sink: None,
            enumerator_channel_id: None,
            reassembler: Reassembler::new(),
            sender_threads: BTreeMap::new(),
        }
    }
}

/// Session-scoped camera plane. One instance serves the enumerator channel and every
/// per-device streaming channel for a single RDP session.
pub struct CameraPlane {
    writer: Arc<dyn ChannelWriter>,
    collaborator: Arc<dyn CameraCollaborator>,
    lifecycle: Arc<dyn DeviceLifecycle>,
    state: RwLock<PlaneState>,
}

impl CameraPlane {
    /// Every device advertises exactly one stream (`StreamListResponse` always
    /// replies with a single `StreamDescriptor`); any other index is unknown.
    const SINGLE_STREAM_INDEX: u8 = 0;

    pub fn new(
        writer: Arc<dyn ChannelWriter>,
        collaborator: Arc<dyn CameraCollaborator>,
        lifecycle: Arc<dyn DeviceLifecycle>,
    ) -> Arc<Self> {
        Arc::new(Self {
            writer,
            collaborator,
            lifecycle,
            state: RwLock::new(PlaneState::new()),
        })
    }

    /// Creates the two `DvcProcessor` adapters the caller registers with the real
    /// `DynamicChannelSet`: one for the fixed enumerator channel, one for slot 0
    /// (pre-registered at startup per the reconciliation design).
    pub fn enumerator_processor(self: &Arc<Self>) -> EnumeratorChannel {
        EnumeratorChannel { plane: self.clone() }
    }

    pub fn device_processor(self: &Arc<Self>, channel_name: impl Into<String>) -> DeviceChannel {
        DeviceChannel {
            plane: self.clone(),
            channel_name: channel_name.into(),
        }
    }

    // ---- Collaborator-facing API (SPEC_FULL §6.1) ----

    /// Feeds a chunk of the producer's byte stream. Completed frames are routed to
    /// whichever device's sink is currently bound, if any.
    pub fn push_frame(&self, bytes: &[u8]) {
        let mut completed = Vec::new();
        {
            let mut state = self.state.write().expect("plane lock poisoned");
            state.reassembler.push(bytes, &mut completed);
        }
        if completed.is_empty() {
            return;
        }
        let sink = {
            let state = self.state.read().expect("plane lock poisoned");
            state
                .current_sink
                .as_ref()
                .and_then(|name| state.devices.get(name))
                .map(|device| device.sink.clone())
        };
        let Some(sink) = sink else {
            return;
        };
        for frame in completed {
            sink.push(frame);
        }
    }

    pub fn update_capabilities(&self, entries: Vec<CapabilityEntry>) {
        self.state.write().expect("plane lock poisoned").registry.update_capabilities(entries);
        self.reconcile();
    }

    fn reconcile(&self) {
        let mut state = self.state.write().expect("plane lock poisoned");
        if !state.registry.is_dirty() {
            return;
        }
        let Some(enumerator_channel_id) = state.enumerator_channel_id else {
            return;
        };

        let plan = state.registry.plan_reconciliation();

        for (slot, channel_name) in plan.removed.iter().enumerate() {
            if let Some(device) = state.devices.remove(channel_name) {
                self.shut_down_device(&mut state, &device);
            }
            // Slot 0's listener is pre-registered at startup and outlives reconciliation
            // cycles; every other slot's listener is owned by the add/remove sweep.
            if slot != 0 {
                self.lifecycle.on_device_removed(channel_name);
            }
            let message: DvcMessage = Box::new(DeviceRemovedNotification {
                channel_name: channel_name.clone(),
            });
            let _ = self.writer.write_message(enumerator_channel_id, message);
        }

        for added in plan.added {
            let device = CameraDevice::new(added.channel_name.clone(), added.browser_device_id);
            state.devices.insert(device);
            self.lifecycle.on_device_added(&added.channel_name);
            let message: DvcMessage = Box::new(DeviceAddedNotification {
                device_name: added.device_name,
                channel_name: added.channel_name,
            });
            let _ = self.writer.write_message(enumerator_channel_id, message);
        }
    }

    fn shut_down_device(&self, state: &mut PlaneState, device: &Arc<CameraDevice>) {
        device.shut_down();
        if let Some(handle) = state.sender_threads.remove(&device.channel_name) {
            let _ = handle.join();
        }
        if state.current_sink.as_deref() == Some(device.channel_name.as_str()) {
            state.current_sink = None;
        }
    }

    // ---- Enumerator channel ----

    fn on_enumerator_start(&self, channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        self.state.write().expect("plane lock poisoned").enumerator_channel_id = Some(channel_id);
        Ok(vec![Box::new(SelectVersionRequest)])
    }

    fn on_enumerator_data(&self, _channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        let mut cursor = ReadCursor::new(payload);
        let (_version, message_id) = pdu::decode_header(&mut cursor)?;

        if message_id == MSG_SELECT_VERSION_RESPONSE {
            let response = SelectVersionResponse::decode(&mut cursor)?;
            if response.version != pdu::RDPECAM_PROTOCOL_VERSION {
                tracing::warn!(got = response.version, "RDPECAM version mismatch, proceeding anyway");
            }
            self.reconcile();
        } else {
            tracing::debug!(message_id, "unhandled RDPECAM enumerator message");
        }

        Ok(Vec::new())
    }

    fn on_enumerator_close(&self) {
        self.state.write().expect("plane lock poisoned").enumerator_channel_id = None;
    }

    // ---- Per-device channel ----

    fn on_device_start(self: &Arc<Self>, channel_name: &str, _channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        let device = {
            let mut state = self.state.write().expect("plane lock poisoned");
            let device = state
                .devices
                .get(channel_name)
                .unwrap_or_else(|| {
                    let device = CameraDevice::new(channel_name.to_owned(), channel_name.to_owned());
                    state.devices.insert(device.clone());
                    device
                });
            device.acquire_ref();
            device.mark_opening();
            device
        };
        device.mark_ready();

        let writer = self.writer.clone();
        let plane = self.clone();
        let failed_channel_name = channel_name.to_owned();
        let on_write_failure: Arc<dyn Fn(&Arc<CameraDevice>) + Send + Sync> =
            Arc::new(move |_device: &Arc<CameraDevice>| plane.unbind_sink_if_current(&failed_channel_name));
        let handle = sender::spawn(device.clone(), writer, on_write_failure);
        self.state
            .write()
            .expect("plane lock poisoned")
            .sender_threads
            .insert(channel_name.to_owned(), handle);

        Ok(Vec::new())
    }

    /// Unbinds the session's current-sink pointer if it still points at `channel_name`.
    /// Invoked from a sender thread after a channel write failure, per the error-handling
    /// table entry for that case.
    fn unbind_sink_if_current(&self, channel_name: &str) {
        let mut state = self.state.write().expect("plane lock poisoned");
        if state.current_sink.as_deref() == Some(channel_name) {
            tracing::warn!(channel = channel_name, "unbinding camera sink after write failure");
            state.current_sink = None;
        }
    }

    fn on_device_data(&self, channel_name: &str, channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        let device = {
            let state = self.state.read().expect("plane lock poisoned");
            state.devices.get(channel_name)
        };
        let Some(device) = device else {
            return Ok(Vec::new());
        };

        let mut cursor = ReadCursor::new(payload);
        let (_version, message_id) = pdu::decode_header(&mut cursor)?;

        match message_id {
            MSG_STREAM_LIST_REQUEST => Ok(vec![Box::new(StreamListResponse {
                streams: vec![StreamDescriptor::capture_color(true)],
            })]),
            MSG_MEDIA_TYPE_LIST_REQUEST => {
                let request = StreamIndexRequest::decode(&mut cursor)?;
                if request.stream_index != Self::SINGLE_STREAM_INDEX {
                    return Ok(vec![unknown_stream_response(request.stream_index)]);
                }
                Ok(vec![Box::new(MediaTypeListResponse {
                    stream_index: request.stream_index,
                    media_types: vec![crate::pdu::MediaTypeDescriptor::default_640x480_30fps()],
                })])
            }
            MSG_CURRENT_MEDIA_TYPE_REQUEST => {
                let request = StreamIndexRequest::decode(&mut cursor)?;
                if request.stream_index != Self::SINGLE_STREAM_INDEX {
                    return Ok(vec![unknown_stream_response(request.stream_index)]);
                }
                let media_type = device.inner.lock().expect("device mutex poisoned").media_type;
                Ok(vec![Box::new(CurrentMediaTypeResponse {
                    stream_index: request.stream_index,
                    media_type,
                })])
            }
            MSG_START_STREAMS_REQUEST => {
                let request = StartStreamsRequest::decode(&mut cursor)?;
                if request.stream_index != Self::SINGLE_STREAM_INDEX {
                    return Ok(vec![unknown_stream_response(request.stream_index)]);
                }
                self.handle_start_streams(channel_name, channel_id, &device, request)
            }
            MSG_STOP_STREAMS_REQUEST | MSG_DEACTIVATE_DEVICE_REQUEST => {
                Ok(self.handle_stop_streams(channel_name, &device))
            }
            MSG_ACTIVATE_DEVICE_REQUEST => Ok(vec![Box::new(SuccessResponse)]),
            MSG_SAMPLE_REQUEST => {
                let request = StreamIndexRequest::decode(&mut cursor)?;
                if request.stream_index != Self::SINGLE_STREAM_INDEX {
                    return Ok(vec![unknown_stream_response(request.stream_index)]);
                }
                device.grant_credit();
                Ok(Vec::new())
            }
            MSG_PROPERTY_LIST_REQUEST => Ok(vec![Box::new(PropertyListResponse)]),
            MSG_PROPERTY_VALUE_REQUEST | MSG_SET_PROPERTY_VALUE_REQUEST => Ok(vec![Box::new(ErrorResponse {
                stream_index: 0,
                status: ERROR_STATUS_NOT_SUPPORTED,
            })]),
            other => {
                tracing::debug!(message_id = other, "unhandled RDPECAM device message");
                Ok(Vec::new())
            }
        }
    }

    fn handle_start_streams(
        &self,
        channel_name: &str,
        channel_id: u32,
        device: &Arc<CameraDevice>,
        request: StartStreamsRequest,
    ) -> PduResult<Vec<DvcMessage>> {
        let previous_active = {
            let state = self.state.read().expect("plane lock poisoned");
            state.current_sink.clone()
        };

        // Camera-switch invariant: stop whichever device is currently active before
        // starting this one, without emitting a camera-stop signal for it.
        if let Some(previous_name) = previous_active {
            if previous_name != channel_name {
                let previous_device = self.state.read().expect("plane lock poisoned").devices.get(&previous_name);
                if let Some(previous_device) = previous_device {
                    let previous_channel_id = previous_device.stream_channel_id();
                    let outstanding = previous_device.begin_stop();
                    let messages = self.drain_outstanding_credits(&previous_device, outstanding);
                    if let Some(previous_channel_id) = previous_channel_id {
                        for message in messages {
                            let _ = self.writer.write_message(previous_channel_id, message);
                        }
                    }
                }
            }
        }

        device.start_streaming(request.media_type, channel_id);
        self.state.write().expect("plane lock poisoned").current_sink = Some(channel_name.to_owned());

        let signal = format_start_signal(
            request.media_type.width,
            request.media_type.height,
            request.media_type.fps_num,
            request.media_type.fps_den,
            request.stream_index,
            &device.browser_device_id,
        );
        self.collaborator.send_argv(CameraSignal::Start, &signal);

        Ok(vec![Box::new(SuccessResponse)])
    }

    fn handle_stop_streams(&self, channel_name: &str, device: &Arc<CameraDevice>) -> Vec<DvcMessage> {
        let was_active_sender = device.is_active_sender();
        let outstanding = device.begin_stop();

        if self.state.read().expect("plane lock poisoned").current_sink.as_deref() == Some(channel_name) {
            self.state.write().expect("plane lock poisoned").current_sink = None;
        }

        if was_active_sender {
            self.collaborator.send_argv(CameraSignal::Stop, "");
        }

        self.drain_outstanding_credits(device, outstanding)
    }

    fn drain_outstanding_credits(&self, device: &Arc<CameraDevice>, outstanding: u32) -> Vec<DvcMessage> {
        let stream_index = device.inner.lock().expect("device mutex poisoned").stream_index;
        let mut messages: Vec<DvcMessage> = (0..outstanding)
            .map(|_| -> DvcMessage { Box::new(SampleErrorResponse { stream_index }) })
            .collect();
        messages.push(Box::new(SuccessResponse));
        messages
    }

    fn on_device_close(&self, channel_name: &str) {
        let device = {
            let state = self.state.read().expect("plane lock poisoned");
            state.devices.get(channel_name)
        };
        let Some(device) = device else {
            return;
        };
        if device.release_ref() {
            let mut state = self.state.write().expect("plane lock poisoned");
            self.shut_down_device(&mut state, &device);
            state.devices.remove(channel_name);
        }
    }
}

/// Builds the `ErrorResponse` for a request naming a stream index this device never
/// advertised (spec §7's added error-table row).
fn unknown_stream_response(stream_index: u8) -> DvcMessage {
    tracing::debug!(stream_index, "RDPECAM request named an unknown stream index");
    Box::new(ErrorResponse {
        stream_index,
        status: ERROR_STATUS_UNKNOWN_STREAM,
    })
}

/// `DvcProcessor` adapter for the fixed enumerator control channel.
pub struct EnumeratorChannel {
    plane: Arc<CameraPlane>,
}

impl DvcProcessor for EnumeratorChannel {
    fn channel_name(&self) -> &str {
        ENUMERATOR_CHANNEL_NAME
    }

    fn start(&mut self, channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_enumerator_start(channel_id)
    }

    fn process(&mut self, channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_enumerator_data(channel_id, payload)
    }

    fn close(&mut self, _channel_id: u32) {
        self.plane.on_enumerator_close();
    }
}

impl AsAny for EnumeratorChannel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// `DvcProcessor` adapter for one `RDCamera_Device_N` streaming channel.
pub struct DeviceChannel {
    plane: Arc<CameraPlane>,
    channel_name: String,
}

impl DvcProcessor for DeviceChannel {
    fn channel_name(&self) -> &str {
        &self.channel_name
    }

    fn start(&mut self, channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_device_start(&self.channel_name, channel_id)
    }

    fn process(&mut self, channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_device_data(&self.channel_name, channel_id, payload)
    }

    fn close(&mut self, _channel_id: u32) {
        self.plane.on_device_close(&self.channel_name);
    }
}

impl AsAny for DeviceChannel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Slot-0 channel name, pre-registered at startup per the reconciliation design.
pub fn default_device_channel_name() -> String {
    format!("{DEVICE_CHANNEL_PREFIX}0")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingWriter {
        written: Mutex<Vec<(u32, String)>>,
    }

    impl RecordingWriter {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChannelWriter for RecordingWriter {
        fn write_message(&self, channel_id: u32, message: DvcMessage) -> PduResult<()> {
            self.written.lock().unwrap().push((channel_id, message.name().to_owned()));
            Ok(())
        }
    }

    struct RecordingCollaborator {
        signals: Mutex<Vec<(CameraSignal, String)>>,
    }

    impl RecordingCollaborator {
        fn new() -> Self {
            Self {
                signals: Mutex::new(Vec::new()),
            }
        }
    }

    impl CameraCollaborator for RecordingCollaborator {
        fn send_argv(&self, signal: CameraSignal, value: &str) {
            self.signals.lock().unwrap().push((signal, value.to_owned()));
        }
    }

    struct NullLifecycle;

    impl DeviceLifecycle for NullLifecycle {
        fn on_device_added(&self, _channel_name: &str) {}
        fn on_device_removed(&self, _channel_name: &str) {}
    }

    fn new_plane() -> (Arc<CameraPlane>, Arc<RecordingWriter>, Arc<RecordingCollaborator>) {
        let writer = Arc::new(RecordingWriter::new());
        let collaborator = Arc::new(RecordingCollaborator::new());
        let plane = CameraPlane::new(writer.clone(), collaborator.clone(), Arc::new(NullLifecycle));
        (plane, writer, collaborator)
    }

    #[test]
    fn reconciliation_emits_added_notification_after_enumerator_start() {
        let (plane, writer, _collaborator) = new_plane();
        let mut enumerator = plane.enumerator_processor();
        enumerator.start(1).unwrap();

        plane.update_capabilities(vec![CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);

        let written = writer.written.lock().unwrap();
        assert!(written.iter().any(|(_, name)| name == "RDPECAM_DEVICE_ADDED_NOTIFICATION"));
    }

    #[test]
    fn reconciliation_notifies_lifecycle_of_added_and_removed_slots() {
        struct RecordingLifecycle {
            added: Mutex<Vec<String>>,
            removed: Mutex<Vec<String>>,
        }

        impl DeviceLifecycle for RecordingLifecycle {
            fn on_device_added(&self, channel_name: &str) {
                self.added.lock().unwrap().push(channel_name.to_owned());
            }

            fn on_device_removed(&self, channel_name: &str) {
                self.removed.lock().unwrap().push(channel_name.to_owned());
            }
        }

        let writer = Arc::new(RecordingWriter::new());
        let collaborator = Arc::new(RecordingCollaborator::new());
        let lifecycle = Arc::new(RecordingLifecycle {
            added: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        });
        let plane = CameraPlane::new(writer, collaborator, lifecycle.clone());

        let mut enumerator = plane.enumerator_processor();
        enumerator.start(1).unwrap();

        plane.update_capabilities(vec![CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);
        assert_eq!(lifecycle.added.lock().unwrap().as_slice(), ["RDCamera_Device_1"]);
        assert!(lifecycle.removed.lock().unwrap().is_empty());

        plane.update_capabilities(vec![]);
        assert_eq!(lifecycle.removed.lock().unwrap().as_slice(), ["RDCamera_Device_1"]);
        assert!(!lifecycle.removed.lock().unwrap().contains(&"RDCamera_Device_0".to_owned()));
    }

    #[test]
    fn start_streams_emits_camera_start_signal() {
        let (plane, _writer, collaborator) = new_plane();
        let mut enumerator = plane.enumerator_processor();
        enumerator.start(1).unwrap();
        plane.update_capabilities(vec![CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);

        let mut device_channel = plane.device_processor("RDCamera_Device_1");
        device_channel.start(2).unwrap();

        let mut buf = vec![0u8; 1 + crate::pdu::MediaTypeDescriptor::SIZE];
        {
            use ironrdp_pdu::cursor::WriteCursor;
            let mut cursor = WriteCursor::new(&mut buf);
            cursor.write_u8(0);
            crate::pdu::MediaTypeDescriptor::default_640x480_30fps()
                .encode(&mut cursor)
                .unwrap();
        }
        let mut payload = vec![crate::pdu::RDPECAM_PROTOCOL_VERSION, MSG_START_STREAMS_REQUEST];
        payload.extend_from_slice(&buf);

        device_channel.process(2, &payload).unwrap();

        let signals = collaborator.signals.lock().unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].0, CameraSignal::Start);
        assert_eq!(signals[0].1, "640x480@30/1#0#cam1");
    }

    #[test]
    fn start_streams_with_unknown_stream_index_replies_error_without_starting() {
        let (plane, _writer, collaborator) = new_plane();
        let mut enumerator = plane.enumerator_processor();
        enumerator.start(1).unwrap();
        plane.update_capabilities(vec![CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);

        let mut device_channel = plane.device_processor("RDCamera_Device_1");
        device_channel.start(2).unwrap();

        let mut buf = vec![0u8; 1 + crate::pdu::MediaTypeDescriptor::SIZE];
        {
            use ironrdp_pdu::cursor::WriteCursor;
            let mut cursor = WriteCursor::new(&mut buf);
            cursor.write_u8(1); // unknown stream index: this device only advertises index 0
            crate::pdu::MediaTypeDescriptor::default_640x480_30fps()
                .encode(&mut cursor)
                .unwrap();
        }
        let mut payload = vec![crate::pdu::RDPECAM_PROTOCOL_VERSION, MSG_START_STREAMS_REQUEST];
        payload.extend_from_slice(&buf);

        let response = device_channel.process(2, &payload).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response[0].name(), "RDPECAM_ERROR_RESPONSE");
        assert!(collaborator.signals.lock().unwrap().is_empty());
    }

    #[test]
    fn sample_request_with_unknown_stream_index_replies_error_without_granting_credit() {
        let (plane, _writer, _collaborator) = new_plane();
        let mut enumerator = plane.enumerator_processor();
        enumerator.start(1).unwrap();
        plane.update_capabilities(vec![CapabilityEntry {
            browser_device_id: "cam1".into(),
            device_name: "Cam 1".into(),
            formats: vec![],
        }]);

        let mut device_channel = plane.device_processor("RDCamera_Device_1");
        device_channel.start(2).unwrap();

        let payload = vec![crate::pdu::RDPECAM_PROTOCOL_VERSION, MSG_SAMPLE_REQUEST, 1];
        let response = device_channel.process(2, &payload).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response[0].name(), "RDPECAM_ERROR_RESPONSE");
    }
}
