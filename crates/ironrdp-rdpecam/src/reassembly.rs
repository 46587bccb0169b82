//! Reassembles the camera producer's byte stream into complete frames.
//!
//! The producer (collaborator) pushes arbitrary-sized chunks of a stream framed by a
//! fixed 12-byte header followed by the frame payload. Chunk boundaries never align
//! with frame boundaries, so state is carried across calls to [`Reassembler::push`].

use crate::sink::Frame;

/// Producer header size: `version(1) flags(1) reserved(2) pts_ms(4) payload_len(4)`.
const HEADER_SIZE: usize = 12;

/// Producer header version this reassembler accepts. Distinct from the RDPECAM wire
/// protocol version carried on DVC messages.
const PRODUCER_HEADER_VERSION: u8 = 1;

/// Largest payload a single producer frame may declare (SPEC_FULL §6.4).
pub const MAX_FRAME_PAYLOAD_BYTES: u32 = 1024 * 1024;

const KEYFRAME_FLAG: u8 = 0x01;

enum State {
    AwaitingHeader { buf: [u8; HEADER_SIZE], received: usize },
    AwaitingPayload { pts_ms: u32, keyframe: bool, buf: Vec<u8>, received: usize },
}

/// Per-stream scratch state for one camera device's producer feed.
pub struct Reassembler {
    state: State,
}

impl Reassembler {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingHeader {
                buf: [0u8; HEADER_SIZE],
                received: 0,
            },
        }
    }

    /// Resets reassembly to the initial header-collecting state, discarding whatever
    /// partial header or payload had been accumulated.
    fn reset(&mut self) {
        self.state = State::AwaitingHeader {
            buf: [0u8; HEADER_SIZE],
            received: 0,
        };
    }

    /// Feeds a chunk of producer bytes, appending any completed frames to `out`.
    ///
    /// A corrupt header (bad version or oversized payload length) discards the rest of
    /// `input` entirely and resets to header-collecting state; this is the coarse
    /// resync behavior the producer's camera-switch races rely on.
    pub fn push(&mut self, input: &[u8], out: &mut Vec<Frame>) {
        let mut cursor = input;
        while !cursor.is_empty() {
            match &mut self.state {
                State::AwaitingHeader { buf, received } => {
                    let need = HEADER_SIZE - *received;
                    let take = need.min(cursor.len());
                    buf[*received..*received + take].copy_from_slice(&cursor[..take]);
                    *received += take;
                    cursor = &cursor[take..];

                    if *received == HEADER_SIZE {
                        match parse_header(buf) {
                            Some((pts_ms, keyframe, payload_len)) => {
                                if payload_len == 0 {
                                    out.push(Frame {
                                        payload: Vec::new(),
                                        pts_ms,
                                        keyframe,
                                    });
                                    self.reset();
                                } else {
                                    self.state = State::AwaitingPayload {
                                        pts_ms,
                                        keyframe,
                                        buf: vec![0u8; payload_len],
                                        received: 0,
                                    };
                                }
                            }
                            None => {
                                tracing::warn!("corrupt camera producer header, resyncing");
                                self.reset();
                                return;
                            }
                        }
                    }
                }
                State::AwaitingPayload {
                    pts_ms,
                    keyframe,
                    buf,
                    received,
                } => {
                    let need = buf.len() - *received;
                    let take = need.min(cursor.len());
                    buf[*received..*received + take].copy_from_slice(&cursor[..take]);
                    *received += take;
                    cursor = &cursor[take..];

                    if *received == buf.len() {
                        out.push(Frame {
                            payload: std::mem::take(buf),
                            pts_ms: *pts_ms,
                            keyframe: *keyframe,
                        });
                        self.reset();
                    }
                }
            }
        }
    }
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_header(buf: &[u8; HEADER_SIZE]) -> Option<(u32, bool, usize)> {
    let version = buf[0];
    let flags = buf[1];
    // buf[2..4] reserved.
    let pts_ms = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let payload_len = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);

    if version != PRODUCER_HEADER_VERSION || payload_len > MAX_FRAME_PAYLOAD_BYTES {
        return None;
    }

    Some((pts_ms, flags & KEYFRAME_FLAG != 0, payload_len as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(version: u8, keyframe: bool, pts_ms: u32, payload_len: u32) -> Vec<u8> {
        let mut buf = vec![version, if keyframe { 1 } else { 0 }, 0, 0];
        buf.extend_from_slice(&pts_ms.to_le_bytes());
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf
    }

    #[test]
    fn single_push_full_frame() {
        let mut reassembler = Reassembler::new();
        let mut out = Vec::new();
        let mut input = header(1, true, 2000, 4);
        input.extend_from_slice(&[0xAA; 4]);
        reassembler.push(&input, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].keyframe);
        assert_eq!(out[0].pts_ms, 2000);
        assert_eq!(out[0].payload, vec![0xAA; 4]);
    }

    #[test]
    fn frame_split_across_arbitrary_chunks() {
        let mut reassembler = Reassembler::new();
        let mut out = Vec::new();
        let mut input = header(1, false, 10, 6);
        input.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

        for byte_chunk in input.chunks(1) {
            reassembler.push(byte_chunk, &mut out);
        }
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payload, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn corrupt_version_discards_rest_of_push() {
        let mut reassembler = Reassembler::new();
        let mut out = Vec::new();
        let mut bad = header(0x99, false, 0, 4);
        bad.extend_from_slice(&[9, 9, 9, 9]);
        reassembler.push(&bad, &mut out);
        assert!(out.is_empty());

        // Next push starts clean.
        let mut good = header(1, true, 5, 2);
        good.extend_from_slice(&[7, 7]);
        reassembler.push(&good, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payload, vec![7, 7]);
    }

    #[test]
    fn oversized_payload_len_is_corruption() {
        let mut reassembler = Reassembler::new();
        let mut out = Vec::new();
        let bad = header(1, false, 0, MAX_FRAME_PAYLOAD_BYTES + 1);
        reassembler.push(&bad, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn multiple_frames_in_one_push() {
        let mut reassembler = Reassembler::new();
        let mut out = Vec::new();
        let mut input = header(1, true, 1, 2);
        input.extend_from_slice(&[1, 1]);
        input.extend(header(1, false, 2, 3));
        input.extend_from_slice(&[2, 2, 2]);

        reassembler.push(&input, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].payload, vec![1, 1]);
        assert_eq!(out[1].payload, vec![2, 2, 2]);
    }
}
