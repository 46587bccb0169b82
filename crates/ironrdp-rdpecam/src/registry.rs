//! Device-capability registry and reconciliation sweep.
//!
//! The collaborator replaces the whole capability list and sets a dirty flag; once the
//! plane observes the flag it removes every previously advertised device and
//! re-advertises the current list under the slot numbers it assigns.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{DEVICE_CHANNEL_PREFIX, DEVICE_SLOT_SWEEP_MAX};
use crate::device::CameraDevice;

/// One media format a camera device advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityFormat {
    pub width: u32,
    pub height: u32,
    pub fps_num: u32,
    pub fps_den: u32,
}

/// One entry in the collaborator-supplied capability list.
#[derive(Debug, Clone)]
pub struct CapabilityEntry {
    pub browser_device_id: String,
    pub device_name: String,
    pub formats: Vec<CapabilityFormat>,
}

/// Slot 0 is pre-registered at startup and is never re-assigned by reconciliation's
/// `added` list, but it is still covered by the removal sweep like every other slot.
pub fn channel_name_for_slot(slot: u32) -> String {
    format!("{DEVICE_CHANNEL_PREFIX}{slot}")
}

/// Tracks the live capability list and the devices currently advertised from it.
pub struct DeviceRegistry {
    entries: Vec<CapabilityEntry>,
    dirty: bool,
    /// slot number -> channel name, for devices currently advertised by reconciliation.
    slot_to_channel: BTreeMap<u32, String>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            dirty: false,
            slot_to_channel: BTreeMap::new(),
        }
    }

    pub fn update_capabilities(&mut self, entries: Vec<CapabilityEntry>) {
        self.entries = entries;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Computes the reconciliation plan: channel names to remove (a fixed sweep of
    /// previously-known slots, per the legacy `HashTable_GetKeys` workaround this
    /// preserves for wire compatibility) and the slot assignments to add.
    ///
    /// The sweep covers `RDCamera_Device_0` through `RDCamera_Device_10` inclusive
    /// (spec §4.2.6 step 1): slot 0 is torn down the same as any other slot when the
    /// capability list no longer reports a device for it.
    pub fn plan_reconciliation(&mut self) -> ReconciliationPlan {
        let removed: Vec<String> = (0..=DEVICE_SLOT_SWEEP_MAX).map(channel_name_for_slot).collect();

        self.slot_to_channel.clear();

        let mut added = Vec::new();
        let mut next_slot = 1u32;
        for entry in &self.entries {
            while self.slot_to_channel.contains_key(&next_slot) {
                next_slot += 1;
            }
            let channel_name = channel_name_for_slot(next_slot);
            self.slot_to_channel.insert(next_slot, channel_name.clone());
            added.push(AddedDevice {
                slot: next_slot,
                channel_name,
                device_name: entry.device_name.clone(),
                browser_device_id: entry.browser_device_id.clone(),
            });
            next_slot += 1;
        }

        self.dirty = false;

        ReconciliationPlan { removed, added }
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AddedDevice {
    pub slot: u32,
    pub channel_name: String,
    pub device_name: String,
    pub browser_device_id: String,
}

pub struct ReconciliationPlan {
    /// Channel names to emit `DeviceRemovedNotification` for and tear down, in order.
    pub removed: Vec<String>,
    /// New devices to register and advertise, in slot order.
    pub added: Vec<AddedDevice>,
}

/// Live devices keyed by channel name, separate from the capability registry so that a
/// device can outlive its capability entry briefly during reconnect (`ref_count`).
pub struct DeviceTable {
    devices: BTreeMap<String, Arc<CameraDevice>>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
        }
    }

    pub fn get(&self, channel_name: &str) -> Option<Arc<CameraDevice>> {
        self.devices.get(channel_name).cloned()
    }

    pub fn insert(&mut self, device: Arc<CameraDevice>) {
        self.devices.insert(device.channel_name.clone(), device);
    }

    pub fn remove(&mut self, channel_name: &str) -> Option<Arc<CameraDevice>> {
        self.devices.remove(channel_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CameraDevice>> {
        self.devices.values()
    }
}

impl Default for DeviceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> CapabilityEntry {
        CapabilityEntry {
            browser_device_id: id.into(),
            device_name: name.into(),
            formats: vec![CapabilityFormat {
                width: 640,
                height: 480,
                fps_num: 30,
                fps_den: 1,
            }],
        }
    }

    #[test]
    fn assigns_lowest_unused_slot_starting_at_one() {
        let mut registry = DeviceRegistry::new();
        registry.update_capabilities(vec![entry("cam1", "Cam 1"), entry("cam2", "Cam 2")]);
        let plan = registry.plan_reconciliation();
        assert_eq!(plan.removed.len(), DEVICE_SLOT_SWEEP_MAX as usize + 1);
        assert_eq!(plan.removed[0], "RDCamera_Device_0");
        assert_eq!(plan.added[0].channel_name, "RDCamera_Device_1");
        assert_eq!(plan.added[1].channel_name, "RDCamera_Device_2");
    }

    #[test]
    fn reconciliation_clears_dirty_flag() {
        let mut registry = DeviceRegistry::new();
        registry.update_capabilities(vec![entry("cam1", "Cam 1")]);
        assert!(registry.is_dirty());
        registry.plan_reconciliation();
        assert!(!registry.is_dirty());
    }

    #[test]
    fn second_cycle_reuses_slots_from_scratch() {
        let mut registry = DeviceRegistry::new();
        registry.update_capabilities(vec![entry("cam1", "Cam 1")]);
        let first = registry.plan_reconciliation();
        assert_eq!(first.added[0].channel_name, "RDCamera_Device_1");

        registry.update_capabilities(vec![entry("cam2", "Cam 2")]);
        let second = registry.plan_reconciliation();
        assert_eq!(second.added[0].channel_name, "RDCamera_Device_1");
    }
}
