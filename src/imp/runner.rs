use crate::imp::query_loader_version;
use crate::{Context, Driver, Error, InstanceDescriptor, Runner};

use std::io::Write;

impl<'d, D: Driver> Runner<'d, D> {
    pub fn new(driver: &'d D) -> Runner<'d, D> {
        Runner::with_descriptor(driver, InstanceDescriptor::default())
    }

    pub fn with_descriptor(driver: &'d D, descriptor: InstanceDescriptor) -> Runner<'d, D> {
        Runner { driver, descriptor }
    }

    /// Runs the diagnostic and returns the process exit code. Failures are reported on `err`.
    pub fn run<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> i32 {
        match self.try_run(out) {
            Ok(_) => 0,
            Err(e) => {
                if let Err(io) = writeln!(err, "{}", e) {
                    log::error!("failed to report {:?}: {}", e.kind(), io);
                }
                e.exit_code()
            }
        }
    }

    /// Runs the diagnostic and returns the number of devices listed.
    pub fn try_run<O: Write>(&self, out: &mut O) -> Result<usize, Error> {
        let loader_version = query_loader_version(self.driver);
        writeln!(out, "[vk] Loader supports: Vulkan {}", loader_version)?;

        let context = Context::new(self.driver, &self.descriptor)?;
        let listed = {
            let adapters = context.enumerate_adapters()?;
            writeln!(out, "[vk] Found {} physical device(s)", adapters.len())?;

            for adapter in adapters.iter() {
                let props = context.describe(adapter);
                log::debug!(
                    "{} is {:?} from vendor 0x{:04x}",
                    props.name,
                    props.device_type,
                    props.vendor_id
                );
                writeln!(
                    out,
                    "  - {} | api {} | driver 0x{:x} | deviceID 0x{:04x}",
                    props.name, props.api_version, props.driver_version, props.device_id
                )?;
            }
            adapters.len()
        };
        context.destroy();

        writeln!(out, "[vk] Sanity OK.")?;
        Ok(listed)
    }
}
