//! RDPEI (Audio Input Virtual Channel Extension) wire messages.
//!
//! Every message is prefixed by a single `message_id` byte — unlike RDPECAM's
//! two-byte `[version][message_id]` header, this channel carries no separate version
//! byte on the wire; version negotiation happens at the PDU-payload level instead
//! (`VersionPdu`).

use ironrdp_dvc::DvcPduEncode;
use ironrdp_pdu::cursor::{ReadCursor, WriteCursor};
use ironrdp_pdu::{PduDecode, PduEncode, PduResult};

use crate::config::WAVE_FORMAT_PCM;
use crate::macros::{ensure_fixed_part_size, ensure_size};

pub const MSG_VERSION: u8 = 0x01;
pub const MSG_FORMATS: u8 = 0x02;
pub const MSG_DATA_INCOMING: u8 = 0x05;
pub const MSG_DATA: u8 = 0x06;

const HEADER_SIZE: usize = 1;

fn write_header(dst: &mut WriteCursor<'_>, message_id: u8) {
    dst.write_u8(message_id);
}

/// Reads the one-byte message id and leaves the cursor positioned at the payload.
pub fn decode_header<'de>(src: &mut ReadCursor<'de>) -> PduResult<u8> {
    ensure_fixed_part_size!(in: src, size: HEADER_SIZE);
    Ok(src.read_u8())
}

/// `VersionPdu` — the peer proposes a protocol version, this side echoes it back
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPdu {
    pub version: u32,
}

impl PduEncode for VersionPdu {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_VERSION);
        dst.write_u32(self.version);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPEI_VERSION"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 4
    }
}

impl<'de> PduDecode<'de> for VersionPdu {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 4);
        Ok(Self { version: src.read_u32() })
    }
}

impl DvcPduEncode for VersionPdu {}

/// One `WAVEFORMATEX`-style PCM format descriptor. `cb_size` extra bytes following the
/// fixed part (codec-specific data) are read and discarded on decode since this plane
/// only ever selects `WAVE_FORMAT_PCM` entries, which never carry any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub tag: u16,
    pub channels: u16,
    pub samples_per_sec: u32,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    const SIZE: usize = 2 + 2 + 4 + 4 + 2 + 2 + 2;

    pub fn is_pcm(&self) -> bool {
        self.tag == WAVE_FORMAT_PCM
    }
}

impl PduEncode for AudioFormat {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        dst.write_u16(self.tag);
        dst.write_u16(self.channels);
        dst.write_u32(self.samples_per_sec);
        dst.write_u32(self.avg_bytes_per_sec);
        dst.write_u16(self.block_align);
        dst.write_u16(self.bits_per_sample);
        dst.write_u16(0); // cbSize: this plane never attaches codec-specific data.
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPEI_AUDIO_FORMAT"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

impl<'de> PduDecode<'de> for AudioFormat {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: Self::SIZE);
        let tag = src.read_u16();
        let channels = src.read_u16();
        let samples_per_sec = src.read_u32();
        let avg_bytes_per_sec = src.read_u32();
        let block_align = src.read_u16();
        let bits_per_sample = src.read_u16();
        let cb_size = usize::from(src.read_u16());
        ensure_size!(in: src, size: cb_size);
        src.advance(cb_size);
        Ok(Self {
            tag,
            channels,
            samples_per_sec,
            avg_bytes_per_sec,
            block_align,
            bits_per_sample,
        })
    }
}

/// `SoundFormatsPdu` — the peer's list of acceptable formats.
#[derive(Debug, Clone)]
pub struct SoundFormatsPdu {
    pub formats: Vec<AudioFormat>,
}

impl<'de> PduDecode<'de> for SoundFormatsPdu {
    fn decode(src: &mut ReadCursor<'de>) -> PduResult<Self> {
        ensure_fixed_part_size!(in: src, size: 2);
        let count = usize::from(src.read_u16());
        let mut formats = Vec::with_capacity(count);
        for _ in 0..count {
            formats.push(AudioFormat::decode(src)?);
        }
        Ok(Self { formats })
    }
}

/// `FormatsResponsePdu` — indices (into the peer's list) of the formats this side
/// accepted. This plane always accepts exactly one, the chosen PCM format.
#[derive(Debug, Clone)]
pub struct FormatsResponsePdu {
    pub formats: Vec<u16>,
}

impl PduEncode for FormatsResponsePdu {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_FORMATS);
        dst.write_u16(u16::try_from(self.formats.len()).map_err(|_| {
            ironrdp_pdu::PduError::new(
                "RDPEI",
                ironrdp_pdu::PduErrorKind::InvalidMessage {
                    field: "formats",
                    reason: "too many accepted formats",
                },
            )
        })?);
        for index in &self.formats {
            dst.write_u16(*index);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPEI_FORMATS_RESPONSE"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 2 + self.formats.len() * 2
    }
}

impl DvcPduEncode for FormatsResponsePdu {}

/// `DataIncomingPdu` — announces the size of the `DataPdu` that immediately follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataIncomingPdu {
    pub packet_size_hint: u32,
}

impl PduEncode for DataIncomingPdu {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_DATA_INCOMING);
        dst.write_u32(self.packet_size_hint);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPEI_DATA_INCOMING"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + 4
    }
}

impl DvcPduEncode for DataIncomingPdu {}

/// `DataPdu` — the packet payload itself, exactly `packet_size` bytes.
pub struct DataPdu<'a> {
    pub payload: &'a [u8],
}

impl PduEncode for DataPdu<'_> {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> PduResult<()> {
        ensure_size!(in: dst, size: self.size());
        write_header(dst, MSG_DATA);
        dst.write_slice(self.payload);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "RDPEI_DATA"
    }

    fn size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_pdu_round_trip() {
        let mut buf = vec![0u8; VersionPdu { version: 1 }.size()];
        let mut cursor = WriteCursor::new(&mut buf);
        VersionPdu { version: 7 }.encode(&mut cursor).unwrap();
        assert_eq!(buf[0], MSG_VERSION);

        let mut read = ReadCursor::new(&buf[1..]);
        let decoded = VersionPdu::decode(&mut read).unwrap();
        assert_eq!(decoded.version, 7);
    }

    #[test]
    fn audio_format_round_trip_skips_trailing_codec_data() {
        let format = AudioFormat {
            tag: WAVE_FORMAT_PCM,
            channels: 2,
            samples_per_sec: 44100,
            avg_bytes_per_sec: 176_400,
            block_align: 4,
            bits_per_sample: 16,
        };
        let mut buf = vec![0u8; format.size()];
        let mut cursor = WriteCursor::new(&mut buf);
        format.encode(&mut cursor).unwrap();

        let mut read = ReadCursor::new(&buf);
        let decoded = AudioFormat::decode(&mut read).unwrap();
        assert_eq!(decoded, format);
        assert!(decoded.is_pcm());
    }

    #[test]
    fn sound_formats_pdu_decodes_list() {
        let mut body = vec![2u8, 0];
        let format = AudioFormat {
            tag: WAVE_FORMAT_PCM,
            channels: 1,
            samples_per_sec: 8000,
            avg_bytes_per_sec: 8000,
            block_align: 1,
            bits_per_sample: 8,
        };
        let mut encoded = vec![0u8; format.size()];
        let mut cursor = WriteCursor::new(&mut encoded);
        format.encode(&mut cursor).unwrap();
        body.extend_from_slice(&encoded);
        body.extend_from_slice(&encoded);

        let mut read = ReadCursor::new(&body);
        let decoded = SoundFormatsPdu::decode(&mut read).unwrap();
        assert_eq!(decoded.formats.len(), 2);
        assert_eq!(decoded.formats[0], format);
    }

    #[test]
    fn formats_response_wire_layout_accepts_single_index() {
        let pdu = FormatsResponsePdu { formats: vec![3] };
        let mut buf = vec![0u8; pdu.size()];
        let mut cursor = WriteCursor::new(&mut buf);
        pdu.encode(&mut cursor).unwrap();
        assert_eq!(buf, vec![MSG_FORMATS, 1, 0, 3, 0]);
    }

    #[test]
    fn data_pdu_carries_header_and_payload() {
        let pdu = DataPdu { payload: &[1, 2, 3] };
        let mut buf = vec![0u8; pdu.size()];
        let mut cursor = WriteCursor::new(&mut buf);
        pdu.encode(&mut cursor).unwrap();
        assert_eq!(buf, vec![MSG_DATA, 1, 2, 3]);
    }
}
