//! Channel Router (spec §4.1): demultiplexes DVC open/data/close callbacks by channel
//! name, without interpreting payload bytes.
//!
//! `ironrdp-dvc`'s own `DynamicChannelSet`/`DrdynvcClient` assume the full DRDYNVC
//! create/data/close wire handshake, which belongs to the RDP transport collaborator
//! here (out of scope per the purpose statement). This router instead operates one
//! level up: it is handed an already-assigned channel id and already-reassembled
//! payload bytes by that collaborator, and dispatches to whichever `DvcProcessor` is
//! registered under the channel's name — the same shape spec.md's Channel Router
//! describes (`register_listener`/`on_channel_open`/`on_channel_data`/`on_channel_close`).

use std::collections::BTreeMap;
use std::sync::Mutex;

use ironrdp_dvc::{encode_dvc_messages, DvcProcessor};
use ironrdp_pdu::{other_err, PduResult};
use ironrdp_svc::{ChannelFlags, SvcMessage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("a listener is already registered for channel `{0}`")]
    DuplicateListener(String),
}

struct RouterState {
    listeners: BTreeMap<String, Box<dyn DvcProcessor>>,
    open_channels: BTreeMap<u32, String>,
}

/// Dispatch spine shared by every plane. Unknown channel names are rejected at open;
/// the router never looks past the channel id/name pair to decide where bytes go.
pub struct ChannelRouter {
    state: Mutex<RouterState>,
}

impl ChannelRouter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RouterState {
                listeners: BTreeMap::new(),
                open_channels: BTreeMap::new(),
            }),
        }
    }

    /// Registers a plane's channel handler. Name uniqueness is enforced (spec §4.1).
    pub fn register_listener(&self, processor: Box<dyn DvcProcessor>) -> Result<(), RouterError> {
        let name = processor.channel_name().to_owned();
        let mut state = self.state.lock().expect("router mutex poisoned");
        if state.listeners.contains_key(&name) {
            return Err(RouterError::DuplicateListener(name));
        }
        state.listeners.insert(name, processor);
        Ok(())
    }

    /// Removes a plane's channel handler, e.g. when a camera device slot is torn down
    /// during reconciliation (spec §4.2.6).
    pub fn unregister_listener(&self, name: &str) {
        self.state.lock().expect("router mutex poisoned").listeners.remove(name);
    }

    /// Opens `name` under `channel_id`, invoking the plane's `start` hook.
    pub fn on_channel_open(&self, name: &str, channel_id: u32) -> PduResult<Vec<SvcMessage>> {
        let mut state = self.state.lock().expect("router mutex poisoned");
        let messages = {
            let processor = state
                .listeners
                .get_mut(name)
                .ok_or_else(|| other_err!("ChannelRouter::on_channel_open", "unknown channel name"))?;
            processor.start(channel_id)?
        };
        state.open_channels.insert(channel_id, name.to_owned());
        encode_dvc_messages(channel_id, messages, ChannelFlags::empty())
    }

    /// Passes `payload` to the plane handler bound to `channel_id`.
    pub fn on_channel_data(&self, channel_id: u32, payload: &[u8]) -> PduResult<Vec<SvcMessage>> {
        let mut state = self.state.lock().expect("router mutex poisoned");
        let name = state
            .open_channels
            .get(&channel_id)
            .ok_or_else(|| other_err!("ChannelRouter::on_channel_data", "channel id not open"))?
            .clone();
        let processor = state
            .listeners
            .get_mut(&name)
            .ok_or_else(|| other_err!("ChannelRouter::on_channel_data", "unknown channel name"))?;
        let messages = processor.process(channel_id, payload)?;
        drop(state);
        encode_dvc_messages(channel_id, messages, ChannelFlags::empty())
    }

    /// Closes `channel_id`, invoking the plane's `close` hook and freeing the open-channel
    /// record. The listener itself stays registered until `unregister_listener` removes it,
    /// mirroring spec §4.2.6's reconciliation sweep owning listener lifetime separately
    /// from individual channel opens/closes (the same channel name can be reopened across
    /// a reconnect while `ref_count` is still nonzero).
    pub fn on_channel_close(&self, channel_id: u32) {
        let mut state = self.state.lock().expect("router mutex poisoned");
        let Some(name) = state.open_channels.remove(&channel_id) else {
            return;
        };
        if let Some(processor) = state.listeners.get_mut(&name) {
            processor.close(channel_id);
        }
    }
}

impl Default for ChannelRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use ironrdp_dvc::DvcMessage;
    use ironrdp_svc::AsAny;

    use super::*;

    struct RecordingProcessor {
        name: &'static str,
        started: bool,
        closed: bool,
    }

    impl DvcProcessor for RecordingProcessor {
        fn channel_name(&self) -> &str {
            self.name
        }

        fn start(&mut self, _channel_id: u32) -> PduResult<Vec<DvcMessage>> {
            self.started = true;
            Ok(Vec::new())
        }

        fn process(&mut self, _channel_id: u32, _payload: &[u8]) -> PduResult<Vec<DvcMessage>> {
            Ok(Vec::new())
        }

        fn close(&mut self, _channel_id: u32) {
            self.closed = true;
        }
    }

    impl AsAny for RecordingProcessor {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn duplicate_listener_registration_is_rejected() {
        let router = ChannelRouter::new();
        router
            .register_listener(Box::new(RecordingProcessor {
                name: "FOO",
                started: false,
                closed: false,
            }))
            .unwrap();
        let err = router
            .register_listener(Box::new(RecordingProcessor {
                name: "FOO",
                started: false,
                closed: false,
            }))
            .unwrap_err();
        assert!(matches!(err, RouterError::DuplicateListener(_)));
    }

    #[test]
    fn unknown_channel_open_is_rejected() {
        let router = ChannelRouter::new();
        assert!(router.on_channel_open("NOPE", 1).is_err());
    }

    #[test]
    fn open_then_data_then_close_round_trips() {
        let router = ChannelRouter::new();
        router
            .register_listener(Box::new(RecordingProcessor {
                name: "FOO",
                started: false,
                closed: false,
            }))
            .unwrap();

        router.on_channel_open("FOO", 7).unwrap();
        router.on_channel_data(7, &[1, 2, 3]).unwrap();
        router.on_channel_close(7);

        assert!(router.on_channel_data(7, &[1]).is_err());
    }
}
