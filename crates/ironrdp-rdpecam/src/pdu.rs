//! Wire format for the RDPECAM (Video Capture Virtual Channel Extension) dynamic
//! virtual channel: a two-byte header `[version][message_id]` followed by a
//! message-specific body. All integers are little-endian.

use ironrdp_dvc::DvcPduEncode;
use ironrdp_pdu::cursor::{ReadCursor, WriteCursor};
use ironrdp_pdu::utils::to_utf16_bytes;
use ironrdp_pdu::{PduDecode, PduEncode, PduError, PduErrorKind, PduResult};

use crate::macros::{ensure_fixed_part_size, ensure_size};

/// Every outbound RDPECAM message carries this version byte.
pub const RDPECAM_PROTOCOL_VERSION: u8 = 0x02;

pub const MSG_SUCCESS_RESPONSE: u8 = 0x01;
pub const MSG_ERROR_RESPONSE: u8 = 0x02;
pub const MSG_SELECT_VERSION_REQUEST: u8 = 0x03;
pub const MSG_SELECT_VERSION_RESPONSE: u8 = 0x04;
pub const MSG_DEVICE_ADDED_NOTIFICATION: u8 = 0x05;
pub const MSG_DEVICE_REMOVED_NOTIFICATION: u8 = 0x06;
pub const MSG_ACTIVATE_DEVICE_REQUEST: u8 = 0x07;
pub const MSG_DEACTIVATE_DEVICE_REQUEST: u8 = 0x08;
pub const MSG_STREAM_LIST_REQUEST: u8 = 0x09;
pub const MSG_STREAM_LIST_RESPONSE: u8 = 0x0A;
pub const MSG_MEDIA_TYPE_LIST_REQUEST: u8 = 0x0B;
pub const MSG_MEDIA_TYPE_LIST_RESPONSE: u8 = 0x0C;
pub const MSG_CURRENT_MEDIA_TYPE_REQUEST: u8 = 0x0D;
pub const MSG_CURRENT_MEDIA_TYPE_RESPONSE: u8 = 0x0E;
pub const MSG_START_STREAMS_REQUEST: u8 = 0x0F;
pub const MSG_STOP_STREAMS_REQUEST: u8 = 0x10;
pub const MSG_SAMPLE_REQUEST: u8 = 0x11;
pub const MSG_SAMPLE_RESPONSE: u8 = 0x12;
pub const MSG_SAMPLE_ERROR_RESPONSE: u8 = 0x13;
pub const MSG_PROPERTY_LIST_REQUEST: u8 = 0x14;
pub const MSG_PROPERTY_LIST_RESPONSE: u8 = 0x15;
/// Vendor-extension property messages; always answered "not supported" here (SPEC_FULL §4.2).
pub const MSG_PROPERTY_VALUE_REQUEST: u8 = 0x16;
pub const MSG_PROPERTY_VALUE_RESPONSE: u8 = 0x17;
pub const MSG_SET_PROPERTY_VALUE_REQUEST: u8 = 0x18;

const HEADER_SIZE: usize = 2;

fn write_header(dst: &mut WriteCursor<'_>, message_id: u8) {
    dst.write_u8(RDPECAM_PROTOCOL_VERSION);
    dst.write_u8(message_id);
}

/// Decodes the `[version][message_id]` header, returning the rest of the payload.
pub fn decode_header<'de>(src: &mut ReadCursor<'de>) -> PduResult<(u8, u8)> {
    ensure_size!(in: src, size: HEADER_SIZE);
    let version = src.read_u8();
    let message_id = src.read_u8();
    Ok((version, message_id))
}

/// Media type descriptor, 26 bytes: `format(1) width(4) height(4) fps_num(4)
/// fps_den(4) par_num(4) par_den(4) flags(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTypeDescriptor {
    pub format: u8,
    pub width: u32,
    pub height: u32,
    pub fps_num: u32,
    pub fps_den: u32,
    pub par_num: u32,
    pub par_den: u32,
    pub flags: u8,
}

/// H.264 format tag used on the `format` field (the only codec this bridge advertises).
pub const MEDIA_FORMAT_H264: u8 = 0x34;

impl MediaTypeDescriptor {
    pub const SIZE: usize = 26;

    pub fn default_640x480_30fps() -> Self {
        Self {
            format: MEDIA_FORMAT_H264,
            width: 640,
            height: 480,
            fps_num: 30,
            fps_den: 1,
            par_num: 1,
            par_den: 1,
            flags: 0,
        }
    }
}

impl PduEncode for MediaTypeDescriptor {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: Self::SIZE);
        dst.write_u8(self.format);
        dst.write_u32(self.width);
        dst.write_u32(self.height);
        dst.write_u32(self.fps_num);
        dst.write_u32(self.fps_den);
        dst.write_u32(self.par_num);
        dst.write_u32(self.par_den);
        dst.write_u8(self.flags);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_MEDIA_TYPE_DESCRIPTION"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl<'de> PduDecode<'de> for MediaTypeDescriptor {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: Self::SIZE);
        Ok(Self {
            format: src.read_u8(),
            width: src.read_u32(),
            height: src.read_u32(),
            fps_num: src.read_u32(),
            fps_den: src.read_u32(),
            par_num: src.read_u32(),
            par_den: src.read_u32(),
            flags: src.read_u8(),
        })
    }
}

/// Stream descriptor, 5 bytes: `frame_source_type(2) category(1) selected(1) can_be_shared(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub frame_source_type: u16,
    pub category: u8,
    pub selected: u8,
    pub can_be_shared: u8,
}

pub const FRAME_SOURCE_TYPE_COLOR: u16 = 0x0000;
pub const STREAM_CATEGORY_CAPTURE: u8 = 0x00;

impl StreamDescriptor {
    pub const SIZE: usize = 5;

    pub fn capture_color(selected: bool) -> Self {
        Self {
            frame_source_type: FRAME_SOURCE_TYPE_COLOR,
            category: STREAM_CATEGORY_CAPTURE,
            selected: u8::from(selected),
            can_be_shared: 0,
        }
    }
}

impl PduEncode for StreamDescriptor {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: Self::SIZE);
        dst.write_u16(self.frame_source_type);
        dst.write_u8(self.category);
        dst.write_u8(self.selected);
        dst.write_u8(self.can_be_shared);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_STREAM_DESCRIPTION"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl<'de> PduDecode<'de> for StreamDescriptor {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: Self::SIZE);
        Ok(Self {
            frame_source_type: src.read_u16(),
            category: src.read_u8(),
            selected: src.read_u8(),
            can_be_shared: src.read_u8(),
        })
    }
}

/// `SuccessResponse` — header only.
pub struct SuccessResponse;

impl PduEncode for SuccessResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: HEADER_SIZE);
        write_header(dst, MSG_SUCCESS_RESPONSE);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_SUCCESS_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE
    }
}

/// `ErrorResponse` — stream index plus a one-byte status code (SPEC_FULL §4.2, added).
pub struct ErrorResponse {
    pub stream_index: u8,
    pub status: u8,
}

pub const ERROR_STATUS_NOT_SUPPORTED: u8 = 0x01;
pub const ERROR_STATUS_UNKNOWN_STREAM: u8 = 0x02;

impl PduEncode for ErrorResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_ERROR_RESPONSE);
        dst.write_u8(self.stream_index);
        dst.write_u8(self.status);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_ERROR_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 2
    }
}

/// `SelectVersionRequest` — header only; `version` is always [`RDPECAM_PROTOCOL_VERSION`].
pub struct SelectVersionRequest;

impl PduEncode for SelectVersionRequest {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: HEADER_SIZE);
        write_header(dst, MSG_SELECT_VERSION_REQUEST);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_SELECT_VERSION_REQUEST"
    }

    fn size(&self) -> usize {
        HEADER_SIZE
    }
}

/// `SelectVersionResponse` — the peer's echoed version.
pub struct SelectVersionResponse {
    pub version: u8,
}

impl<'de> PduDecode<'de> for SelectVersionResponse {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 1);
        Ok(Self { version: src.read_u8() })
    }
}

fn write_nul_terminated_utf16(dst: &mut WriteCursor<'_>, s: &str) {
    let mut encoded = to_utf16_bytes(s);
    encoded.push(0);
    encoded.push(0);
    dst.write_slice(&encoded);
}

fn write_nul_terminated_ascii(dst: &mut WriteCursor<'_>, s: &str) {
    dst.write_slice(s.as_bytes());
    dst.write_u8(0);
}

/// `DeviceAddedNotification` — UTF-16LE device name + NUL, then ASCII channel name + NUL.
///
/// Owns its strings rather than borrowing: reconciliation emits this asynchronously
/// from whichever thread observes the capability registry's dirty flag, so the message
/// must be boxable as a [`ironrdp_dvc::DvcMessage`] independent of that call stack.
pub struct DeviceAddedNotification {
    pub device_name: String,
    pub channel_name: String,
}

impl PduEncode for DeviceAddedNotification {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_DEVICE_ADDED_NOTIFICATION);
        write_nul_terminated_utf16(dst, &self.device_name);
        write_nul_terminated_ascii(dst, &self.channel_name);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_DEVICE_ADDED_NOTIFICATION"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + (self.device_name.encode_utf16().count() + 1) * 2 + self.channel_name.len() + 1
    }
}

/// `DeviceRemovedNotification` — ASCII channel name + NUL. Owns its string for the same
/// reason as [`DeviceAddedNotification`].
pub struct DeviceRemovedNotification {
    pub channel_name: String,
}

impl PduEncode for DeviceRemovedNotification {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_DEVICE_REMOVED_NOTIFICATION);
        write_nul_terminated_ascii(dst, &self.channel_name);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_DEVICE_REMOVED_NOTIFICATION"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + self.channel_name.len() + 1
    }
}

/// `StreamListResponse` — one [`StreamDescriptor`] per advertised stream.
pub struct StreamListResponse {
    pub streams: Vec<StreamDescriptor>,
}

impl PduEncode for StreamListResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_STREAM_LIST_RESPONSE);
        for stream in &self.streams {
            stream.encode(dst)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_STREAM_LIST_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + self.streams.len() * StreamDescriptor::SIZE
    }
}

/// `MediaTypeListRequest` / `CurrentMediaTypeRequest` — stream index only.
pub struct StreamIndexRequest {
    pub stream_index: u8,
}

impl<'de> PduDecode<'de> for StreamIndexRequest {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 1);
        Ok(Self {
            stream_index: src.read_u8(),
        })
    }
}

/// `MediaTypeListResponse` — stream index followed by one or more media descriptors.
pub struct MediaTypeListResponse {
    pub stream_index: u8,
    pub media_types: Vec<MediaTypeDescriptor>,
}

impl PduEncode for MediaTypeListResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_MEDIA_TYPE_LIST_RESPONSE);
        dst.write_u8(self.stream_index);
        for media_type in &self.media_types {
            media_type.encode(dst)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_MEDIA_TYPE_LIST_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 1 + self.media_types.len() * MediaTypeDescriptor::SIZE
    }
}

/// `CurrentMediaTypeResponse` — stream index plus the single active media descriptor.
pub struct CurrentMediaTypeResponse {
    pub stream_index: u8,
    pub media_type: MediaTypeDescriptor,
}

impl PduEncode for CurrentMediaTypeResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_CURRENT_MEDIA_TYPE_RESPONSE);
        dst.write_u8(self.stream_index);
        self.media_type.encode(dst)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_CURRENT_MEDIA_TYPE_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 1 + MediaTypeDescriptor::SIZE
    }
}

/// `StartStreamsRequest` — stream index plus the requested media descriptor.
pub struct StartStreamsRequest {
    pub stream_index: u8,
    pub media_type: MediaTypeDescriptor,
}

impl<'de> PduDecode<'de> for StartStreamsRequest {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 1);
        let stream_index = src.read_u8();
        let media_type = MediaTypeDescriptor::decode(src)?;
        Ok(Self {
            stream_index,
            media_type,
        })
    }
}

/// `SampleResponse` — `[version][0x12][stream_index]` followed by the raw H.264
/// Annex-B payload.
pub struct SampleResponse<'a> {
    pub stream_index: u8,
    pub payload: &'a [u8],
}

impl PduEncode for SampleResponse<'_> {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_SAMPLE_RESPONSE);
        dst.write_u8(self.stream_index);
        dst.write_slice(self.payload);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_SAMPLE_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 1 + self.payload.len()
    }
}

/// `SampleErrorResponse` — stream index only.
pub struct SampleErrorResponse {
    pub stream_index: u8,
}

impl PduEncode for SampleErrorResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_SAMPLE_ERROR_RESPONSE);
        dst.write_u8(self.stream_index);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_SAMPLE_ERROR_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 1
    }
}

/// `PropertyListResponse` — always empty here (no vendor properties exposed).
pub struct PropertyListResponse;

impl PduEncode for PropertyListResponse {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: HEADER_SIZE);
        write_header(dst, MSG_PROPERTY_LIST_RESPONSE);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPECAM_PROPERTY_LIST_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE
    }
}

/// `PropertyValueRequest` (0x16, added) — property id only; the value payload is
/// irrelevant since every request is answered "not supported".
pub struct PropertyValueRequest {
    pub property_id: u32,
}

impl<'de> PduDecode<'de> for PropertyValueRequest {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 4);
        Ok(Self {
            property_id: src.read_u32(),
        })
    }
}

/// `SetPropertyValueRequest` (0x18, added) — same shape as [`PropertyValueRequest`].
pub struct SetPropertyValueRequest {
    pub property_id: u32,
}

impl<'de> PduDecode<'de> for SetPropertyValueRequest {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 4);
        Ok(Self {
            property_id: src.read_u32(),
        })
    }
}

/// Reads a NUL-terminated UTF-16LE string, stopping at the first `0x0000` code unit.
/// Malformed surrogate pairs are replaced per [`String::from_utf16_lossy`] rather than
/// rejected, matching how the rest of the RDP stack handles vendor-supplied device names.
pub fn read_nul_terminated_utf16(src: &mut ReadCursor<'_>) -> PduResult<String> {
    let mut units = Vec::new();
    loop {
        ensure_size!(in: src, size: 2);
        let unit = src.read_u16();
        if unit == 0 {
            break;
        }
        units.push(unit);
    }
    Ok(String::from_utf16_lossy(&units))
}

/// Reads a NUL-terminated ASCII string.
pub fn read_nul_terminated_ascii(src: &mut ReadCursor<'_>) -> PduResult<String> {
    let mut bytes = Vec::new();
    loop {
        ensure_size!(in: src, size: 1);
        let byte = src.read_u8();
        if byte == 0 {
            break;
        }
        bytes.push(byte);
    }
    String::from_utf8(bytes).map_err(|_| {
        PduError::new(
            "RDPECAM",
            PduErrorKind::InvalidMessage {
                field: "channel_name",
                reason: "invalid ASCII",
            },
        )
    })
}

impl DvcPduEncode for SuccessResponse {}
impl DvcPduEncode for ErrorResponse {}
impl DvcPduEncode for SelectVersionRequest {}
impl DvcPduEncode for DeviceAddedNotification {}
impl DvcPduEncode for DeviceRemovedNotification {}
impl DvcPduEncode for StreamListResponse {}
impl DvcPduEncode for MediaTypeListResponse {}
impl DvcPduEncode for CurrentMediaTypeResponse {}
impl DvcPduEncode for SampleErrorResponse {}
impl DvcPduEncode for PropertyListResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_descriptor_round_trip() {
        let media_type = MediaTypeDescriptor::default_640x480_30fps();
        let mut buf = [0u8; MediaTypeDescriptor::SIZE];
        let mut writer = WriteCursor::new(&mut buf);
        media_type.encode(&mut writer).unwrap();

        let mut reader = ReadCursor::new(&buf);
        let decoded = MediaTypeDescriptor::decode(&mut reader).unwrap();
        assert_eq!(decoded, media_type);
    }

    #[test]
    fn sample_response_wire_layout() {
        let response = SampleResponse {
            stream_index: 0,
            payload: &[0xAA; 4],
        };
        let mut buf = vec![0u8; response.size()];
        let mut writer = WriteCursor::new(&mut buf);
        response.encode(&mut writer).unwrap();
        assert_eq!(buf, vec![0x02, 0x12, 0x00, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn device_added_notification_layout() {
        let notification = DeviceAddedNotification {
            device_name: "Cam".to_owned(),
            channel_name: "RDCamera_Device_0".to_owned(),
        };
        let mut buf = vec![0u8; notification.size()];
        let mut writer = WriteCursor::new(&mut buf);
        notification.encode(&mut writer).unwrap();
        assert_eq!(&buf[0..2], &[0x02, 0x05]);
        // UTF-16LE "Cam" + NUL = 8 bytes.
        assert_eq!(&buf[2..10], &[b'C', 0, b'a', 0, b'm', 0, 0, 0]);
        assert_eq!(&buf[10..], b"RDCamera_Device_0\0");
    }
}
