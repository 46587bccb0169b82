//! Local helper macros for RDPECAM PDU encoding/decoding.
//!
//! The vendored `ironrdp-pdu`/`ironrdp-core` crates expose equivalent helpers under
//! slightly different names depending on version; rather than guess at which
//! re-export path resolves, this module defines the same small set directly
//! against `ironrdp_pdu::{PduError, PduErrorKind}`, the way `ironrdp-session` and
//! `now-proto-pdu` each carry their own copy.

macro_rules! ensure_size {
    (in: $buf:ident, size: $expected:expr) => {{
        let received = $buf.len();
        let expected = $expected;
        if received < expected {
            return Err(ironrdp_pdu::PduError::new(
                "RDPECAM",
                ironrdp_pdu::PduErrorKind::NotEnoughBytes { received, expected },
            ));
        }
    }};
}

macro_rules! ensure_fixed_part_size {
    (in: $buf:ident, size: $expected:expr) => {{
        ensure_size!(in: $buf, size: $expected);
    }};
}

macro_rules! cast_length {
    ($len:expr, $field:expr) => {{
        u32::try_from($len).map_err(|_| {
            ironrdp_pdu::PduError::new(
                "RDPECAM",
                ironrdp_pdu::PduErrorKind::InvalidMessage {
                    field: $field,
                    reason: "value too large",
                },
            )
        })
    }};
}

pub(crate) use cast_length;
pub(crate) use ensure_fixed_part_size;
pub(crate) use ensure_size;
