use ash::vk;

use lazy_static::lazy_static;
use parking_lot::{RwLock, RwLockReadGuard};

use std::ptr;

use crate::imp::convert::fixed_str;
use crate::{Driver, Error, InstanceDescriptor, VkResult};

lazy_static! {
    static ref ENTRY: RwLock<Result<ash::Entry, Error>> = {
        unsafe {
            extern "C" fn unload() {
                let mut entry_guard = ENTRY.write();
                *entry_guard = Err(Error::from("unload"));
            }
            libc::atexit(unload);
            let entry = ash::Entry::load().map_err(Error::from);
            if let Err(ref e) = entry {
                log::error!("{}", e);
            }
            RwLock::new(entry)
        }
    };
}

/// The system Vulkan loader.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vulkan;

impl Vulkan {
    pub fn new() -> Vulkan {
        Vulkan
    }

    fn entry(&self) -> RwLockReadGuard<'static, Result<ash::Entry, Error>> {
        ENTRY.read()
    }
}

impl Driver for Vulkan {
    type Instance = ash::Instance;

    fn try_enumerate_instance_version(&self) -> Result<Option<u32>, VkResult> {
        let entry_guard = self.entry();
        match entry_guard.as_ref() {
            Ok(entry) => entry.try_enumerate_instance_version(),
            Err(_) => Ok(None),
        }
    }

    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Result<ash::Instance, VkResult> {
        let entry_guard = self.entry();
        let entry = entry_guard
            .as_ref()
            .map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED)?;

        if log::log_enabled!(log::Level::Debug) {
            for p in entry.enumerate_instance_extension_properties(None).unwrap_or_default().iter() {
                log::debug!("found instance extension: {}", fixed_str(&p.extension_name));
            }

            for p in entry.enumerate_instance_layer_properties().unwrap_or_default().iter() {
                log::debug!("found instance layer: {}", fixed_str(&p.layer_name));
            }
        }

        let app_info = vk::ApplicationInfo::builder()
            .application_name(descriptor.application_name)
            .application_version(descriptor.application_version.into())
            .engine_name(descriptor.engine_name)
            .engine_version(descriptor.engine_version.into())
            .api_version(descriptor.api_version.into());

        let create_info = vk::InstanceCreateInfo::builder().application_info(&app_info);

        unsafe { entry.create_instance(&create_info, None) }
    }

    fn enumerate_physical_devices(
        &self,
        instance: &ash::Instance,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> VkResult {
        let out = match devices {
            Some(devices) => {
                *count = (*count).min(devices.len() as u32);
                devices.as_mut_ptr()
            }
            None => ptr::null_mut(),
        };
        unsafe { (instance.fp_v1_0().enumerate_physical_devices)(instance.handle(), count, out) }
    }

    fn get_physical_device_properties(
        &self,
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { instance.get_physical_device_properties(physical_device) }
    }

    fn destroy_instance(&self, instance: ash::Instance) {
        unsafe { instance.destroy_instance(None) }
    }
}
