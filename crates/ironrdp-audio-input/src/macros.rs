//! Local helper macros for RDPEI PDU encoding/decoding, kept as its own small copy for
//! the same reason `ironrdp-rdpecam` carries one: the vendored `ironrdp-pdu`/
//! `ironrdp-core` crates expose equivalent helpers under different re-export paths
//! depending on version.

macro_rules! ensure_size {
    (in: $buf:ident, size: $expected:expr) => {{
        let received = $buf.len();
        let expected = $expected;
        if received < expected {
            return Err(ironrdp_pdu::PduError::new(
                "RDPEI",
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

pub(crate) use ensure_fixed_part_size;
pub(crate) use ensure_size;
