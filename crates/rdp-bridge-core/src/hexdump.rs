//! Hex-dump observability path (spec §6.5), gated by the `GUAC_RDPECAM_HEXDUMP`
//! environment variable so it never runs on a hot path unless explicitly enabled.

use std::fmt::Write as _;

use crate::config::HEXDUMP_ENV_VAR;

const BYTES_PER_ROW: usize = 16;
const MAX_DUMPED_BYTES: usize = 256;

/// Returns `true` once per process if `GUAC_RDPECAM_HEXDUMP` is set to anything other
/// than an empty string.
pub fn is_enabled() -> bool {
    std::env::var_os(HEXDUMP_ENV_VAR).is_some_and(|value| !value.is_empty())
}

/// Formats `payload` as a classic hex-dump: 16 space-separated hex bytes per row with
/// an ASCII gutter, truncated at [`MAX_DUMPED_BYTES`] with a note about how much was
/// dropped.
pub fn format(label: &str, payload: &[u8]) -> String {
    let mut out = String::new();
    let truncated = payload.len() > MAX_DUMPED_BYTES;
    let shown = &payload[..payload.len().min(MAX_DUMPED_BYTES)];

    let _ = writeln!(out, "{label} ({} bytes{}):", payload.len(), if truncated { ", truncated" } else { "" });

    for row in shown.chunks(BYTES_PER_ROW) {
        let mut hex = String::new();
        for byte in row {
            let _ = write!(hex, "{byte:02x} ");
        }
        let ascii: String = row
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        let _ = writeln!(out, "  {hex:<width$}|{ascii}|", width = BYTES_PER_ROW * 3);
    }

    if truncated {
        let _ = writeln!(out, "  ... {} more byte(s) omitted", payload.len() - MAX_DUMPED_BYTES);
    }

    out
}

/// Logs `payload` via `tracing::debug!` under `label` if the hex-dump path is enabled,
/// doing no formatting work otherwise.
pub fn log_if_enabled(label: &str, payload: &[u8]) {
    if is_enabled() {
        tracing::debug!("{}", format(label, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_is_not_truncated() {
        let dump = format("test", &[0x41, 0x42, 0x43]);
        assert!(dump.contains("41 42 43"));
        assert!(dump.contains("|ABC|"));
        assert!(!dump.contains("omitted"));
    }

    #[test]
    fn long_payload_is_truncated_with_a_note() {
        let payload = vec![0u8; MAX_DUMPED_BYTES + 10];
        let dump = format("test", &payload);
        assert!(dump.contains("truncated"));
        assert!(dump.contains("10 more byte(s) omitted"));
    }

    #[test]
    fn non_printable_bytes_render_as_dots() {
        let dump = format("test", &[0x00, 0xff]);
        assert!(dump.contains("|..|"));
    }
}
