use crate::protocols::rubicson::RUBICSON;
use crate::protocols::test_sensor::TEST_SENSOR;

use super::{DeviceDescriptor, RegistryError};

/// Every device compiled into the crate, in dispatch order.
pub static BUILTIN_DEVICES: &[&DeviceDescriptor] = &[&RUBICSON, &TEST_SENSOR];

/// Ordered set of device descriptors.
///
/// Built and narrowed once at start-up, then only read during dispatch.
///
/// # Examples
/// ```
/// use rfsense_core::DeviceRegistry;
///
/// let mut registry = DeviceRegistry::builtin();
/// registry.enable_only(&["Test Sensor"]).unwrap();
/// let names: Vec<_> = registry.enabled().map(|d| d.name).collect();
/// assert_eq!(names, ["Test Sensor"]);
/// ```
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceRegistry {
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        Self { devices }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_DEVICES.iter().map(|device| **device).collect())
    }

    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    pub fn enabled(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter().filter(|device| device.enabled)
    }

    pub fn get(&self, name: &str) -> Option<&DeviceDescriptor> {
        self.devices
            .iter()
            .find(|device| device.name.eq_ignore_ascii_case(name))
    }

    /// Position of the device named by `selector`: a name (any case) or a
    /// 1-based index.
    pub fn resolve(&self, selector: &str) -> Result<usize, RegistryError> {
        let selector = selector.trim();
        if let Ok(number) = selector.parse::<usize>() {
            if (1..=self.devices.len()).contains(&number) {
                return Ok(number - 1);
            }
        }
        self.devices
            .iter()
            .position(|device| device.name.eq_ignore_ascii_case(selector))
            .ok_or_else(|| RegistryError::UnknownDevice {
                selector: selector.to_string(),
            })
    }

    pub fn set_enabled(&mut self, selector: &str, enabled: bool) -> Result<(), RegistryError> {
        let index = self.resolve(selector)?;
        self.devices[index].enabled = enabled;
        Ok(())
    }

    /// Enable the selected devices and disable all others.
    ///
    /// Nothing changes when a selector is unknown.
    pub fn enable_only<S: AsRef<str>>(&mut self, selectors: &[S]) -> Result<(), RegistryError> {
        let indices = selectors
            .iter()
            .map(|selector| self.resolve(selector.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for (index, device) in self.devices.iter_mut().enumerate() {
            device.enabled = indices.contains(&index);
        }
        Ok(())
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
