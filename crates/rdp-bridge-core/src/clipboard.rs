//! Clipboard Plane (spec §4.4): bridges the gateway-side clipboard buffer to the real
//! RDP server's `CLIPRDR` static virtual channel.
//!
//! `ironrdp-cliprdr`'s [`Cliprdr`] already implements the full capability negotiation
//! and `MonitorReady`/`FormatList` handshake — what is left to build is a
//! [`CliprdrBackend`] that records the remote's advertised formats and the local
//! buffer's content, and a thin plane object that drains the backend's pending actions
//! into further [`Cliprdr`] calls after each `process()`. The shape is grounded on
//! `cosmic-rdp-server`'s `LocalClipboardBackend`, adapted from its `tokio`
//! channel-and-event-loop design to a synchronous buffer: spec.md's Concurrency section
//! drives the clipboard plane from the dispatch thread directly, and nothing else in
//! this workspace depends on an async runtime.

use std::sync::Mutex;

use ironrdp_cliprdr::backend::{CliprdrBackend, ClipboardMessage, ClipboardMessageProxy};
use ironrdp_cliprdr::pdu::{
    ClipboardFormat, ClipboardFormatId, ClipboardGeneralCapabilityFlags, FileContentsRequest, FileContentsResponse,
    FormatDataRequest, FormatDataResponse, LockDataId, OwnedFormatDataResponse,
};
use ironrdp_cliprdr::{Client, Cliprdr, CliprdrSvcMessages};
use ironrdp_core::impl_as_any;
use ironrdp_pdu::PduResult;
use ironrdp_svc::SvcMessage;
use tracing::{debug, warn};

use crate::codec::{clamp_max_len, cp1252_to_utf8, utf16le_to_utf8, utf8_to_utf16le};
use crate::config::CLIPBOARD_MAX_LENGTH;

/// The local clipboard's content and the format it is currently held in (spec's
/// Clipboard Buffer data model). Content is always stored as UTF-8 internally;
/// transcoding happens at the wire boundary.
#[derive(Debug, Default, Clone)]
pub struct ClipboardBuffer {
    text: String,
}

impl ClipboardBuffer {
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        text.truncate(clamp_max_len(text.len()));
        self.text = text;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encodes the buffer's content for the wire in the requested format, bounded by
    /// `CLIPBOARD_MAX_LENGTH`.
    pub fn encode_for(&self, format: ClipboardFormatId) -> Option<Vec<u8>> {
        if format == ClipboardFormatId::CF_UNICODETEXT {
            let mut bytes = utf8_to_utf16le(&self.text, CLIPBOARD_MAX_LENGTH);
            bytes.extend_from_slice(&[0, 0]);
            Some(bytes)
        } else if format == ClipboardFormatId::CF_TEXT {
            let mut bytes = crate::codec::utf8_to_cp1252(&self.text, CLIPBOARD_MAX_LENGTH);
            bytes.push(0);
            Some(bytes)
        } else {
            None
        }
    }
}

#[derive(Debug)]
enum PendingAction {
    InitiateCopy(Vec<ClipboardFormat>),
    SendFormatData(OwnedFormatDataResponse),
    InitiatePaste(ClipboardFormatId),
}

/// `CliprdrBackend` implementation gluing the real channel state machine to the local
/// clipboard buffer. Actions that require calling back into the owning [`Cliprdr`]
/// object (which the backend does not have access to) are buffered in `pending` and
/// drained by [`ClipboardPlane`] right after each `process()`/`start()` call, instead
/// of being proxied through an async channel as the `arboard`-based desktop backend
/// does.
#[derive(Debug)]
pub struct BridgeClipboardBackend {
    temp_dir: String,
    local: Mutex<ClipboardBuffer>,
    remote_formats: Mutex<Vec<ClipboardFormat>>,
    /// The format named by the most recent `DataRequest` sent to the peer (spec §3: "a
    /// single small integer slot; no queue"). Consulted by `on_format_data_response`
    /// instead of guessing the encoding from the response bytes.
    requested_format: Mutex<Option<ClipboardFormatId>>,
    pending: Mutex<Vec<PendingAction>>,
}

impl_as_any!(BridgeClipboardBackend);

impl BridgeClipboardBackend {
    pub fn new(temp_dir: impl Into<String>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            local: Mutex::new(ClipboardBuffer::default()),
            remote_formats: Mutex::new(Vec::new()),
            requested_format: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, action: PendingAction) {
        self.pending.lock().expect("clipboard backend mutex poisoned").push(action);
    }

    fn drain(&self) -> Vec<PendingAction> {
        std::mem::take(&mut self.pending.lock().expect("clipboard backend mutex poisoned"))
    }

    /// Called by the gateway side when the local clipboard buffer changes (e.g. the
    /// user copies text in the gateway-facing UI). Queues a copy announcement to the
    /// remote.
    pub fn set_local_text(&self, text: impl Into<String>) {
        self.local.lock().expect("clipboard backend mutex poisoned").set_text(text);
        self.push(PendingAction::InitiateCopy(vec![
            ClipboardFormat::new(ClipboardFormatId::CF_UNICODETEXT),
            ClipboardFormat::new(ClipboardFormatId::CF_TEXT),
        ]));
    }

    /// Picks Unicode text if the remote advertised it, falling back to CP1252 text.
    fn preferred_remote_format(&self) -> Option<ClipboardFormatId> {
        let formats = self.remote_formats.lock().expect("clipboard backend mutex poisoned");
        formats
            .iter()
            .find(|f| f.id() == ClipboardFormatId::CF_UNICODETEXT)
            .or_else(|| formats.iter().find(|f| f.id() == ClipboardFormatId::CF_TEXT))
            .map(|f| f.id())
    }

    /// Records `format` as the outstanding `DataRequest`'s format and queues the paste.
    fn initiate_paste(&self, format: ClipboardFormatId) {
        *self.requested_format.lock().expect("clipboard backend mutex poisoned") = Some(format);
        self.push(PendingAction::InitiatePaste(format));
    }

    /// Called by the gateway side to re-request the remote's current clipboard content
    /// outside of the automatic on-`FormatList` request `on_remote_copy` already queues.
    pub fn request_paste(&self) -> bool {
        match self.preferred_remote_format() {
            Some(format) => {
                self.initiate_paste(format);
                true
            }
            None => false,
        }
    }

    pub fn local_text(&self) -> String {
        self.local.lock().expect("clipboard backend mutex poisoned").text().to_owned()
    }
}

impl CliprdrBackend for BridgeClipboardBackend {
    fn temporary_directory(&self) -> &str {
        &self.temp_dir
    }

    fn client_capabilities(&self) -> ClipboardGeneralCapabilityFlags {
        ClipboardGeneralCapabilityFlags::empty()
    }

    fn on_ready(&mut self) {
        debug!("clipboard channel ready");
    }

    fn on_request_format_list(&mut self) {
        let text_is_empty = self.local.lock().expect("clipboard backend mutex poisoned").text().is_empty();
        if !text_is_empty {
            self.push(PendingAction::InitiateCopy(vec![
                ClipboardFormat::new(ClipboardFormatId::CF_UNICODETEXT),
                ClipboardFormat::new(ClipboardFormatId::CF_TEXT),
            ]));
        }
    }

    fn on_process_negotiated_capabilities(&mut self, _capabilities: ClipboardGeneralCapabilityFlags) {}

    fn on_remote_copy(&mut self, available_formats: &[ClipboardFormat]) {
        *self.remote_formats.lock().expect("clipboard backend mutex poisoned") = available_formats.to_vec();
        if let Some(format) = self.preferred_remote_format() {
            self.initiate_paste(format);
        }
    }

    fn on_format_data_request(&mut self, request: FormatDataRequest) {
        let response = match self.local.lock().expect("clipboard backend mutex poisoned").encode_for(request.format) {
            Some(bytes) => OwnedFormatDataResponse::new_data(bytes),
            None => OwnedFormatDataResponse::new_error(),
        };
        self.push(PendingAction::SendFormatData(response));
    }

    fn on_format_data_response(&mut self, response: FormatDataResponse<'_>) {
        let requested = self.requested_format.lock().expect("clipboard backend mutex poisoned").take();
        if response.is_error() {
            warn!("remote returned an error for the requested clipboard format");
            return;
        }
        let bytes = response.data();
        let text = match requested {
            Some(ClipboardFormatId::CF_UNICODETEXT) => utf16le_to_utf8(bytes, CLIPBOARD_MAX_LENGTH),
            Some(ClipboardFormatId::CF_TEXT) => cp1252_to_utf8(bytes, CLIPBOARD_MAX_LENGTH),
            _ => {
                warn!("clipboard DataResponse arrived with no outstanding DataRequest format on record");
                return;
            }
        };
        self.local.lock().expect("clipboard backend mutex poisoned").set_text(text);
    }

    fn on_file_contents_request(&mut self, _request: FileContentsRequest) {
        // File transfer through the clipboard channel is out of scope; nothing queued.
    }

    fn on_file_contents_response(&mut self, _response: FileContentsResponse<'_>) {}

    fn on_lock(&mut self, _data_id: LockDataId) {}

    fn on_unlock(&mut self, _data_id: LockDataId) {}
}

/// Proxy used only by tests/tools that want to observe [`ClipboardMessage`]s without a
/// real event loop.
#[derive(Debug)]
pub struct NullClipboardMessageProxy;

impl ClipboardMessageProxy for NullClipboardMessageProxy {
    fn send_clipboard_message(&self, message: ClipboardMessage) {
        debug!(?message, "clipboard message dropped by null proxy");
    }
}

/// Owns the `CLIPRDR` static virtual channel for one session and keeps the backend's
/// queued actions flowing back out as SVC messages.
pub struct ClipboardPlane {
    cliprdr: Mutex<Cliprdr<Client>>,
}

impl ClipboardPlane {
    pub fn new(temp_dir: impl Into<String>) -> Self {
        let backend = BridgeClipboardBackend::new(temp_dir);
        Self {
            cliprdr: Mutex::new(Cliprdr::new(Box::new(backend))),
        }
    }

    pub fn start(&self) -> PduResult<Vec<SvcMessage>> {
        let mut cliprdr = self.cliprdr.lock().expect("clipboard plane mutex poisoned");
        let mut messages: Vec<SvcMessage> = cliprdr.start()?;
        messages.extend(Self::drain_pending(&mut cliprdr)?);
        Ok(messages)
    }

    pub fn process(&self, payload: &[u8]) -> PduResult<Vec<SvcMessage>> {
        let mut cliprdr = self.cliprdr.lock().expect("clipboard plane mutex poisoned");
        let mut messages: Vec<SvcMessage> = cliprdr.process(payload)?;
        messages.extend(Self::drain_pending(&mut cliprdr)?);
        Ok(messages)
    }

    /// Queues a local clipboard change for announcement and drains it immediately into
    /// outbound SVC messages.
    pub fn set_local_text(&self, text: impl Into<String>) -> PduResult<Vec<SvcMessage>> {
        let mut cliprdr = self.cliprdr.lock().expect("clipboard plane mutex poisoned");
        let backend = cliprdr
            .downcast_backend::<BridgeClipboardBackend>()
            .expect("clipboard plane always holds a BridgeClipboardBackend");
        backend.set_local_text(text);
        Self::drain_pending(&mut cliprdr)
    }

    /// Queues a remote paste request and drains it immediately. Returns `false` if the
    /// remote has not advertised any text format yet.
    pub fn request_paste(&self) -> PduResult<(bool, Vec<SvcMessage>)> {
        let mut cliprdr = self.cliprdr.lock().expect("clipboard plane mutex poisoned");
        let backend = cliprdr
            .downcast_backend::<BridgeClipboardBackend>()
            .expect("clipboard plane always holds a BridgeClipboardBackend");
        let queued = backend.request_paste();
        let messages = Self::drain_pending(&mut cliprdr)?;
        Ok((queued, messages))
    }

    pub fn local_text(&self) -> String {
        let mut cliprdr = self.cliprdr.lock().expect("clipboard plane mutex poisoned");
        cliprdr
            .downcast_backend::<BridgeClipboardBackend>()
            .expect("clipboard plane always holds a BridgeClipboardBackend")
            .local_text()
    }

    fn drain_pending(cliprdr: &mut Cliprdr<Client>) -> PduResult<Vec<SvcMessage>> {
        let actions = cliprdr
            .downcast_backend::<BridgeClipboardBackend>()
            .expect("clipboard plane always holds a BridgeClipboardBackend")
            .drain();

        let mut out = Vec::new();
        for action in actions {
            let svc_messages: CliprdrSvcMessages<Client> = match action {
                PendingAction::InitiateCopy(formats) => cliprdr.initiate_copy(&formats)?,
                PendingAction::SendFormatData(response) => cliprdr.submit_format_data(response)?,
                PendingAction::InitiatePaste(format) => cliprdr.initiate_paste(format)?,
            };
            out.extend(Vec::from(svc_messages));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_encodes_unicode_text_with_terminating_nul() {
        let mut buffer = ClipboardBuffer::default();
        buffer.set_text("hi");
        let bytes = buffer.encode_for(ClipboardFormatId::CF_UNICODETEXT).unwrap();
        assert_eq!(bytes, vec![b'h', 0, b'i', 0, 0, 0]);
    }

    #[test]
    fn buffer_rejects_unsupported_format() {
        let buffer = ClipboardBuffer::default();
        assert!(buffer.encode_for(ClipboardFormatId::CF_BITMAP).is_none());
    }

    #[test]
    fn buffer_truncates_content_to_configured_max_length() {
        let mut buffer = ClipboardBuffer::default();
        buffer.set_text("x".repeat(CLIPBOARD_MAX_LENGTH + 100));
        assert_eq!(buffer.text().len(), CLIPBOARD_MAX_LENGTH);
    }

    #[test]
    fn backend_queues_copy_announcement_on_local_set() {
        let backend = BridgeClipboardBackend::new("/tmp");
        backend.set_local_text("hello");
        let pending = backend.drain();
        assert_eq!(pending.len(), 1);
        assert!(matches!(pending[0], PendingAction::InitiateCopy(_)));
    }

    #[test]
    fn backend_paste_request_fails_with_no_remote_formats() {
        let backend = BridgeClipboardBackend::new("/tmp");
        assert!(!backend.request_paste());
    }

    #[test]
    fn format_data_response_decodes_by_tracked_request_format_not_byte_heuristic() {
        let mut backend = BridgeClipboardBackend::new("/tmp");
        // Only CF_TEXT is on offer, so on_remote_copy tracks CF_TEXT as the outstanding
        // request — the decode below must follow that, not the trailing-byte shape.
        backend.on_remote_copy(&[ClipboardFormat::new(ClipboardFormatId::CF_TEXT)]);
        backend.drain();

        // CP1252 bytes that happen to end in two NUL bytes, which a byte-pattern
        // heuristic would misread as UTF-16LE's terminating pair.
        let bytes = [b'h', b'i', 0, 0];
        backend.on_format_data_response(FormatDataResponse::new_data(bytes.as_slice()));

        assert_eq!(backend.local_text(), "hi\u{0}\u{0}");
    }

    #[test]
    fn format_data_response_with_no_outstanding_request_is_ignored() {
        let mut backend = BridgeClipboardBackend::new("/tmp");
        backend.on_format_data_response(FormatDataResponse::new_data(b"hi".as_slice()));
        assert_eq!(backend.local_text(), "");
    }

    #[test]
    fn remote_copy_auto_requests_unicode_format() {
        let mut backend = BridgeClipboardBackend::new("/tmp");
        backend.on_remote_copy(&[
            ClipboardFormat::new(ClipboardFormatId::CF_TEXT),
            ClipboardFormat::new(ClipboardFormatId::CF_UNICODETEXT),
        ]);
        let pending = backend.drain();
        assert_eq!(pending.len(), 1);
        assert!(matches!(pending[0], PendingAction::InitiatePaste(id) if id == ClipboardFormatId::CF_UNICODETEXT));
    }
}
