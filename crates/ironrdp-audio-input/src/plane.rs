//! Ties the wire format and the PCM resampling buffer together behind the
//! `DvcProcessor` seam, the same shape `ironrdp-rdpecam`'s camera plane uses.

use std::any::Any;
use std::sync::{Arc, Mutex};

use ironrdp_dvc::{DvcMessage, DvcProcessor};
use ironrdp_pdu::cursor::ReadCursor;
use ironrdp_pdu::{PduDecode, PduEncode, PduError, PduErrorKind, PduResult};
use ironrdp_svc::AsAny;

use crate::buffer::{AudioBuffer, PcmFormat};
use crate::collaborator::{AckStatus, AudioCollaborator};
use crate::config::CHANNEL_NAME;
use crate::pdu::{self, DataIncomingPdu, DataPdu, FormatsResponsePdu, SoundFormatsPdu, VersionPdu, MSG_FORMATS, MSG_VERSION};
use crate::writer::ChannelWriter;

struct PlaneState {
    channel_id: Option<u32>,
}

/// Session-scoped audio-input plane. Bridges a microphone-capture producer to the
/// RDP peer's audio-input virtual channel.
pub struct AudioPlane {
    writer: Arc<dyn ChannelWriter>,
    collaborator: Arc<dyn AudioCollaborator>,
    buffer: AudioBuffer,
    state: Mutex<PlaneState>,
}

impl AudioPlane {
    pub fn new(writer: Arc<dyn ChannelWriter>, collaborator: Arc<dyn AudioCollaborator>) -> Arc<Self> {
        Arc::new(Self {
            writer,
            collaborator,
            buffer: AudioBuffer::new(),
            state: Mutex::new(PlaneState { channel_id: None }),
        })
    }

    pub fn processor(self: &Arc<Self>) -> AudioChannel {
        AudioChannel { plane: self.clone() }
    }

    // ---- Producer-facing API (SPEC_FULL §4.3 inputs) ----

    /// Records the producer's native PCM format and acknowledges readiness.
    pub fn set_producer_input_format(&self, format: PcmFormat) {
        self.buffer.set_input_format(format);
        self.collaborator.send_ack("OK", AckStatus::Ok);
    }

    /// Arms flushing at `packet_frames` frames per packet and acknowledges readiness.
    pub fn begin_producer_stream(self: &Arc<Self>, packet_frames: usize) {
        let plane = self.clone();
        self.buffer.begin(packet_frames, move |packet: &[u8]| plane.flush_packet(packet));
        self.collaborator.send_ack("OK", AckStatus::Ok);
    }

    /// Feeds raw producer PCM bytes through the resampler.
    pub fn write_producer_bytes(&self, bytes: &[u8]) {
        self.buffer.write(bytes);
    }

    /// Stops flushing and acknowledges closure.
    pub fn end_producer_stream(&self) {
        self.buffer.end();
        self.collaborator.send_ack("CLOSED", AckStatus::ResourceClosed);
    }

    fn flush_packet(&self, packet: &[u8]) {
        let channel_id = self.state.lock().expect("audio plane mutex poisoned").channel_id;
        let Some(channel_id) = channel_id else {
            return;
        };
        let packet_size_hint = u32::try_from(packet.len()).unwrap_or(u32::MAX);
        if let Err(error) = self.writer.write_message(channel_id, Box::new(DataIncomingPdu { packet_size_hint })) {
            tracing::warn!(%error, "audio-input DataIncoming write failed");
            return;
        }
        if let Err(error) = self.writer.write_message(channel_id, Box::new(EncodedData::new(packet.to_vec()))) {
            tracing::warn!(%error, "audio-input Data write failed");
        }
    }

    // ---- DVC channel hooks ----

    fn on_start(&self, channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        self.state.lock().expect("audio plane mutex poisoned").channel_id = Some(channel_id);
        Ok(Vec::new())
    }

    fn on_data(&self, _channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        let mut cursor = ReadCursor::new(payload);
        let message_id = pdu::decode_header(&mut cursor)?;

        match message_id {
            MSG_VERSION => {
                let request = VersionPdu::decode(&mut cursor)?;
                Ok(vec![Box::new(VersionPdu { version: request.version })])
            }
            MSG_FORMATS => {
                let request = SoundFormatsPdu::decode(&mut cursor)?;
                let selected = request
                    .formats
                    .iter()
                    .position(|format| format.is_pcm() && matches!(format.bits_per_sample, 8 | 16));

                let Some(index) = selected else {
                    tracing::warn!("no peer-advertised PCM audio format; closing audio-input channel");
                    return Err(PduError::new(
                        "RDPEI",
                        PduErrorKind::Other {
                            description: "no compatible PCM audio format offered",
                        },
                    ));
                };

                let format = request.formats[index];
                self.buffer.set_output_format(PcmFormat {
                    rate: format.samples_per_sec,
                    channels: format.channels,
                    bps: u8::try_from(format.bits_per_sample / 8).expect("checked 8 or 16 bits per sample above"),
                });

                let index = u16::try_from(index).expect("format list bounded well under u16::MAX entries");
                Ok(vec![Box::new(FormatsResponsePdu { formats: vec![index] })])
            }
            other => {
                tracing::debug!(message_id = other, "unhandled RDPEI message");
                Ok(Vec::new())
            }
        }
    }

    fn on_close(&self) {
        self.state.lock().expect("audio plane mutex poisoned").channel_id = None;
        self.buffer.end();
    }
}

/// `DvcProcessor` adapter for the fixed `AUDIO_INPUT` channel.
pub struct AudioChannel {
    plane: Arc<AudioPlane>,
}

impl DvcProcessor for AudioChannel {
    fn channel_name(&self) -> &str {
        CHANNEL_NAME
    }

    fn start(&mut self, channel_id: u32) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_start(channel_id)
    }

    fn process(&mut self, channel_id: u32, payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
        self.plane.on_data(channel_id, payload)
    }

    fn close(&mut self, _channel_id: u32) {
        self.plane.on_close();
    }
}

impl AsAny for AudioChannel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owns a [`DataPdu`]'s payload so the message can outlive the borrow once boxed as a
/// [`ironrdp_dvc::DvcMessage`] — the same split `ironrdp-rdpecam` uses for
/// `SampleResponse`/`EncodedSample`.
struct EncodedData {
    payload: Vec<u8>,
}

impl EncodedData {
    fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

impl PduEncode for EncodedData {
    fn encode(&self, dst: &mut ironrdp_pdu::cursor::WriteCursor<'_>) -> PduResult<()> {
        DataPdu { payload: &self.payload }.encode(dst)
    }

    fn name(&self) -> &'static str {
        "RDPEI_DATA"
    }

    fn size(&self) -> usize {
        DataPdu { payload: &self.payload }.size()
    }
}

impl ironrdp_dvc::DvcPduEncode for EncodedData {}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    struct RecordingWriter {
        written: StdMutex<Vec<(u32, String)>>,
    }

    impl RecordingWriter {
        fn new() -> Self {
            Self {
                written: StdMutex::new(Vec::new()),
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
        acks: StdMutex<Vec<(String, AckStatus)>>,
    }

    impl RecordingCollaborator {
        fn new() -> Self {
            Self {
                acks: StdMutex::new(Vec::new()),
            }
        }
    }

    impl AudioCollaborator for RecordingCollaborator {
        fn send_ack(&self, message: &str, status: AckStatus) {
            self.acks.lock().unwrap().push((message.to_owned(), status));
        }
    }

    fn new_plane() -> (Arc<AudioPlane>, Arc<RecordingWriter>, Arc<RecordingCollaborator>) {
        let writer = Arc::new(RecordingWriter::new());
        let collaborator = Arc::new(RecordingCollaborator::new());
        let plane = AudioPlane::new(writer.clone(), collaborator.clone());
        (plane, writer, collaborator)
    }

    fn encode<T: PduEncode>(pdu: &T) -> Vec<u8> {
        let mut buf = vec![0u8; pdu.size()];
        let mut cursor = ironrdp_pdu::cursor::WriteCursor::new(&mut buf);
        pdu.encode(&mut cursor).unwrap();
        buf
    }

    #[test]
    fn version_request_is_echoed_back() {
        let (plane, _writer, _collaborator) = new_plane();
        let mut channel = plane.processor();
        channel.start(1).unwrap();

        let payload = encode(&VersionPdu { version: 3 });
        let response = channel.process(1, &payload).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response[0].name(), "RDPEI_VERSION");
    }

    #[test]
    fn formats_request_selects_first_pcm_entry() {
        let (plane, _writer, _collaborator) = new_plane();
        let mut channel = plane.processor();
        channel.start(1).unwrap();

        let pcm = crate::pdu::AudioFormat {
            tag: crate::config::WAVE_FORMAT_PCM,
            channels: 1,
            samples_per_sec: 16000,
            avg_bytes_per_sec: 32000,
            block_align: 2,
            bits_per_sample: 16,
        };
        let mut body = vec![1u8, 0];
        body.extend(encode(&pcm));
        let mut payload = vec![MSG_FORMATS];
        payload.extend(body);

        let response = channel.process(1, &payload).unwrap();
        assert_eq!(response.len(), 1);
        assert_eq!(response[0].name(), "RDPEI_FORMATS_RESPONSE");
    }

    #[test]
    fn formats_request_with_no_pcm_entry_errors() {
        let (plane, _writer, _collaborator) = new_plane();
        let mut channel = plane.processor();
        channel.start(1).unwrap();

        let non_pcm = crate::pdu::AudioFormat {
            tag: 0x0002,
            channels: 1,
            samples_per_sec: 16000,
            avg_bytes_per_sec: 32000,
            block_align: 2,
            bits_per_sample: 16,
        };
        let mut body = vec![1u8, 0];
        body.extend(encode(&non_pcm));
        let mut payload = vec![MSG_FORMATS];
        payload.extend(body);

        assert!(channel.process(1, &payload).is_err());
    }

    #[test]
    fn producer_flush_writes_data_incoming_then_data() {
        let (plane, writer, _collaborator) = new_plane();
        let mut channel = plane.processor();
        channel.start(7).unwrap();

        plane.set_producer_input_format(PcmFormat {
            rate: 8000,
            channels: 1,
            bps: 2,
        });

        let pcm = crate::pdu::AudioFormat {
            tag: crate::config::WAVE_FORMAT_PCM,
            channels: 1,
            samples_per_sec: 8000,
            avg_bytes_per_sec: 16000,
            block_align: 2,
            bits_per_sample: 16,
        };
        let mut body = vec![1u8, 0];
        body.extend(encode(&pcm));
        let mut payload = vec![MSG_FORMATS];
        payload.extend(body);
        channel.process(7, &payload).unwrap();

        plane.begin_producer_stream(1);
        plane.write_producer_bytes(&1000_i16.to_le_bytes());

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], (7, "RDPEI_DATA_INCOMING".to_owned()));
        assert_eq!(written[1], (7, "RDPEI_DATA".to_owned()));
    }

    #[test]
    fn end_producer_stream_sends_resource_closed_ack() {
        let (plane, _writer, collaborator) = new_plane();
        plane.end_producer_stream();
        let acks = collaborator.acks.lock().unwrap();
        assert_eq!(acks.last().unwrap().1, AckStatus::ResourceClosed);
    }
}
