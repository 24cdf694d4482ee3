//! Vulkan bring-up diagnostic.
//!
//! Loads the loader, creates an instance, lists the physical devices it can see and tears the
//! instance down again. The driver calls sit behind the [`Driver`] trait; [`Vulkan`] is the
//! implementation backed by the system loader.

#![allow(clippy::needless_lifetimes)]

#[macro_use]
mod macros;
mod error;
mod imp;

pub use crate::error::{Error, ErrorKind, VkResult};
pub use crate::imp::{query_loader_version, Vulkan};

pub use ash::vk;

use std::ffi::CStr;

/// Three component API version. Packed versions are decoded with the variant bits dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Oldest version a loader can report.
    pub const BASELINE: Version = Version::new(1, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Version {
        Version { major, minor, patch }
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::BASELINE
    }
}

/// Application metadata handed to instance creation. Everything except `api_version` is cosmetic.
#[derive(Clone, Copy, Debug)]
pub struct InstanceDescriptor {
    pub application_name: &'static CStr,
    pub application_version: Version,
    pub engine_name: &'static CStr,
    pub engine_version: Version,
    pub api_version: Version,
}

impl Default for InstanceDescriptor {
    fn default() -> InstanceDescriptor {
        InstanceDescriptor {
            application_name: c_str!("vk_sanity"),
            application_version: Version::new(0, 1, 0),
            engine_name: c_str!("quickvulkanv1"),
            engine_version: Version::new(0, 1, 0),
            api_version: Version::new(1, 1, 0),
        }
    }
}

/// The subset of the Vulkan entry points needed to enumerate devices.
///
/// Methods map one to one onto the underlying calls and keep their status-code conventions so
/// that callers see exactly what the driver reported.
pub trait Driver {
    type Instance;

    /// `vkEnumerateInstanceVersion`. `Ok(None)` when the loader does not export it.
    fn try_enumerate_instance_version(&self) -> Result<Option<u32>, VkResult>;

    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Result<Self::Instance, VkResult>;

    /// `vkEnumeratePhysicalDevices`. With `devices == None` only `count` is written. Otherwise
    /// at most `devices.len()` handles are written and `count` is updated to the number written.
    fn enumerate_physical_devices(
        &self,
        instance: &Self::Instance,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> VkResult;

    fn get_physical_device_properties(
        &self,
        instance: &Self::Instance,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties;

    fn destroy_instance(&self, instance: Self::Instance);
}

/// A live instance. The instance is destroyed when the context is dropped.
pub struct Context<'d, D: Driver> {
    driver: &'d D,
    raw: Option<D::Instance>,
}

/// A physical device visible to a [`Context`]. Borrows the instance that enumerated it, so it
/// cannot outlive that context and is always queried through it.
pub struct Adapter<'c, D: Driver> {
    handle: vk::PhysicalDevice,
    instance: &'c D::Instance,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterProperties {
    pub name: String,
    pub api_version: Version,
    pub driver_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
    pub device_type: vk::PhysicalDeviceType,
}

/// Runs the full diagnostic against a driver.
pub struct Runner<'d, D: Driver> {
    driver: &'d D,
    descriptor: InstanceDescriptor,
}
