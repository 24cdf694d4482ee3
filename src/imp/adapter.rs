use crate::{Adapter, Context, Driver, Error};

use ash::vk;

use std::fmt::{self, Debug};

impl<'d, D: Driver> Context<'d, D> {
    /// Lists the physical devices in driver order. Zero devices is an error.
    pub fn enumerate_adapters<'c>(&'c self) -> Result<Vec<Adapter<'c, D>>, Error> {
        let mut count = 0;
        let result = self.driver.enumerate_physical_devices(self.raw(), &mut count, None);
        if result != vk::Result::SUCCESS || count == 0 {
            return Err(Error::device_enumeration_failed(result, count));
        }

        let mut handles = vec![vk::PhysicalDevice::null(); count as usize];
        let result = self
            .driver
            .enumerate_physical_devices(self.raw(), &mut count, Some(handles.as_mut_slice()));
        match result {
            vk::Result::SUCCESS => {}
            // devices appeared between the two calls; keep what fit
            vk::Result::INCOMPLETE => log::debug!("physical device list truncated to {}", count),
            _ => return Err(Error::device_enumeration_failed(result, count)),
        }
        handles.truncate(count as usize);
        if handles.is_empty() {
            return Err(Error::device_enumeration_failed(result, 0));
        }

        let instance = self.raw();
        let adapters = handles
            .into_iter()
            .map(|handle| Adapter { handle, instance })
            .collect::<Vec<_>>();
        log::debug!("found {} physical device(s)", adapters.len());
        Ok(adapters)
    }
}

impl<'c, D: Driver> Adapter<'c, D> {
    pub fn handle(&self) -> vk::PhysicalDevice {
        self.handle
    }
}

impl<'c, D: Driver> Clone for Adapter<'c, D> {
    fn clone(&self) -> Adapter<'c, D> {
        *self
    }
}

impl<'c, D: Driver> Copy for Adapter<'c, D> {}

impl<'c, D: Driver> Debug for Adapter<'c, D> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Adapter").field("handle", &self.handle).finish()
    }
}
