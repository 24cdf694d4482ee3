use crate::{AdapterProperties, Version};
use ash::vk;

use std::fmt::{self, Display};
use std::os::raw::c_char;

impl From<u32> for Version {
    fn from(packed: u32) -> Version {
        Version {
            major: vk::api_version_major(packed),
            minor: vk::api_version_minor(packed),
            patch: vk::api_version_patch(packed),
        }
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> u32 {
        vk::make_api_version(0, version.major, version.minor, version.patch)
    }
}

impl Display for Version {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<&vk::PhysicalDeviceProperties> for AdapterProperties {
    fn from(raw: &vk::PhysicalDeviceProperties) -> AdapterProperties {
        AdapterProperties {
            name: fixed_str(&raw.device_name),
            api_version: Version::from(raw.api_version),
            driver_version: raw.driver_version,
            vendor_id: raw.vendor_id,
            device_id: raw.device_id,
            device_type: raw.device_type,
        }
    }
}

/// Reads a NUL terminated string out of a fixed size array without running past its end.
pub fn fixed_str(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw.iter().take_while(|&&c| c != 0).map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
