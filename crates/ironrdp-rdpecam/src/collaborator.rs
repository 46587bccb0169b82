//! The boundary between this plane and the out-of-scope collaborator (browser bridge,
//! gateway) that owns capture hardware and the browser-facing signalling channel.

/// Outbound signal kind for [`CameraCollaborator::send_argv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSignal {
    Start,
    Stop,
}

/// Notifies the collaborator of camera start/stop transitions so it can inform the
/// browser side out-of-band.
///
/// `camera-start` carries a value of the exact form
/// `WIDTHxHEIGHT@FPS_NUM/FPS_DEN#STREAM_INDEX#DEVICE_ID`; `camera-stop` carries an
/// empty value.
pub trait CameraCollaborator: Send + Sync {
    fn send_argv(&self, signal: CameraSignal, value: &str);
}

/// Formats the `camera-start` signal value per the wire contract.
pub fn format_start_signal(width: u32, height: u32, fps_num: u32, fps_den: u32, stream_index: u8, device_id: &str) -> String {
    format!("{width}x{height}@{fps_num}/{fps_den}#{stream_index}#{device_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_signal_matches_wire_contract() {
        assert_eq!(format_start_signal(640, 480, 30, 1, 0, "cam1"), "640x480@30/1#0#cam1");
    }
}
