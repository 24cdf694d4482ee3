use crate::{Adapter, AdapterProperties, Context, Driver, Error, InstanceDescriptor, Version};

use std::fmt::{self, Debug};

/// Highest instance version the loader supports. Falls back to 1.0.0 when the loader predates
/// `vkEnumerateInstanceVersion` or the query fails.
pub fn query_loader_version<D: Driver>(driver: &D) -> Version {
    match driver.try_enumerate_instance_version() {
        Ok(Some(packed)) => Version::from(packed),
        Ok(None) => Version::BASELINE,
        Err(code) => {
            log::warn!("vkEnumerateInstanceVersion failed: {:?}", code);
            Version::BASELINE
        }
    }
}

impl<'d, D: Driver> Context<'d, D> {
    pub fn new(driver: &'d D, descriptor: &InstanceDescriptor) -> Result<Context<'d, D>, Error> {
        let raw = driver
            .create_instance(descriptor)
            .map_err(Error::context_creation_failed)?;
        log::debug!("created instance requesting api {}", descriptor.api_version);
        Ok(Context { driver, raw: Some(raw) })
    }

    /// Reads the adapter's properties through the instance that enumerated it.
    pub fn describe(&self, adapter: &Adapter<D>) -> AdapterProperties {
        let raw = self
            .driver
            .get_physical_device_properties(adapter.instance, adapter.handle);
        AdapterProperties::from(&raw)
    }

    /// Destroys the instance now instead of at the end of scope.
    pub fn destroy(mut self) {
        self.release();
    }

    pub(crate) fn raw(&self) -> &D::Instance {
        match self.raw {
            Some(ref raw) => raw,
            None => unreachable!("instance used after destroy"),
        }
    }

    fn release(&mut self) {
        if let Some(raw) = self.raw.take() {
            log::debug!("destroying instance");
            self.driver.destroy_instance(raw);
        }
    }
}

impl<'d, D: Driver> Drop for Context<'d, D> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<'d, D: Driver> Debug for Context<'d, D> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Context").field("live", &self.raw.is_some()).finish()
    }
}
