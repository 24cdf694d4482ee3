// Shared by every integration test suite; not every suite uses every helper.
#![allow(dead_code)]

use vk_sanity::vk::{self, Handle};
use vk_sanity::{Driver, InstanceDescriptor, VkResult};

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::os::raw::c_char;

pub fn init_environment() {
    let _ = pretty_env_logger::try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    EnumerateInstanceVersion,
    CreateInstance(u32),
    CountPhysicalDevices,
    FillPhysicalDevices(usize),
    GetPhysicalDeviceProperties { instance: u64, device: u64 },
    DestroyInstance(u64),
}

#[derive(Clone, Debug)]
pub struct FakeDevice {
    pub name: &'static str,
    pub api_version: u32,
    pub driver_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
}

impl FakeDevice {
    pub fn new(name: &'static str, device_id: u32) -> FakeDevice {
        FakeDevice {
            name,
            api_version: vk::make_api_version(0, 1, 3, 250),
            driver_version: 0x8060_0000,
            vendor_id: 0x10de,
            device_id,
        }
    }
}

#[derive(Debug)]
pub struct MockInstance(u64);

/// Scripted driver that records every call made against it.
pub struct MockDriver {
    pub instance_version: Result<Option<u32>, VkResult>,
    pub create_result: VkResult,
    pub count_result: VkResult,
    pub fill_result: VkResult,
    /// Number of handles the fill call writes, when less than requested.
    pub fill_count: Option<u32>,
    pub devices: Vec<FakeDevice>,
    next_instance: Cell<u64>,
    calls: RefCell<Vec<Call>>,
}

impl MockDriver {
    pub fn new(devices: Vec<FakeDevice>) -> MockDriver {
        MockDriver {
            instance_version: Ok(Some(vk::make_api_version(0, 1, 3, 250))),
            create_result: vk::Result::SUCCESS,
            count_result: vk::Result::SUCCESS,
            fill_result: vk::Result::SUCCESS,
            fill_count: None,
            devices,
            next_instance: Cell::new(1),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn two_gpus() -> MockDriver {
        MockDriver::new(vec![
            FakeDevice::new("Fake Discrete GPU", 0x2684),
            FakeDevice::new("Fake Integrated GPU", 0x9a49),
        ])
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    pub fn destroyed(&self) -> usize {
        self.count(|c| matches!(c, Call::DestroyInstance(_)))
    }

    pub fn created(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateInstance(_)))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Driver for MockDriver {
    type Instance = MockInstance;

    fn try_enumerate_instance_version(&self) -> Result<Option<u32>, VkResult> {
        self.record(Call::EnumerateInstanceVersion);
        self.instance_version
    }

    fn create_instance(&self, descriptor: &InstanceDescriptor) -> Result<MockInstance, VkResult> {
        self.record(Call::CreateInstance(descriptor.api_version.into()));
        if self.create_result != vk::Result::SUCCESS {
            return Err(self.create_result);
        }
        let id = self.next_instance.get();
        self.next_instance.set(id + 1);
        Ok(MockInstance(id))
    }

    fn enumerate_physical_devices(
        &self,
        _instance: &MockInstance,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> VkResult {
        match devices {
            None => {
                self.record(Call::CountPhysicalDevices);
                *count = self.devices.len() as u32;
                self.count_result
            }
            Some(out) => {
                self.record(Call::FillPhysicalDevices(out.len()));
                let available = self.fill_count.unwrap_or(self.devices.len() as u32);
                let written = (*count).min(out.len() as u32).min(available);
                for (index, handle) in out.iter_mut().take(written as usize).enumerate() {
                    *handle = vk::PhysicalDevice::from_raw(index as u64 + 1);
                }
                *count = written;
                self.fill_result
            }
        }
    }

    fn get_physical_device_properties(
        &self,
        instance: &MockInstance,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        self.record(Call::GetPhysicalDeviceProperties {
            instance: instance.0,
            device: physical_device.as_raw(),
        });
        let device = &self.devices[physical_device.as_raw() as usize - 1];
        let mut props = vk::PhysicalDeviceProperties::default();
        for (dst, src) in props.device_name.iter_mut().zip(device.name.bytes()) {
            *dst = src as c_char;
        }
        props.api_version = device.api_version;
        props.driver_version = device.driver_version;
        props.vendor_id = device.vendor_id;
        props.device_id = device.device_id;
        props.device_type = vk::PhysicalDeviceType::DISCRETE_GPU;
        props
    }

    fn destroy_instance(&self, instance: MockInstance) {
        self.record(Call::DestroyInstance(instance.0));
    }
}

/// Runs the diagnostic, returning the exit code with captured stdout and stderr.
pub fn run(driver: &MockDriver) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = vk_sanity::Runner::new(driver).run(&mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

/// Captures output until a line containing `fail_after` has been written, then fails every write.
/// With no `fail_after` every write fails.
pub struct ClosingWriter {
    pub written: Vec<u8>,
    fail_after: Option<&'static str>,
}

impl ClosingWriter {
    pub fn new(fail_after: &'static str) -> ClosingWriter {
        ClosingWriter {
            written: Vec::new(),
            fail_after: Some(fail_after),
        }
    }

    pub fn closed_from_start() -> ClosingWriter {
        ClosingWriter {
            written: Vec::new(),
            fail_after: None,
        }
    }

    fn closed(&self) -> bool {
        let fail_after = match self.fail_after {
            Some(fail_after) => fail_after,
            None => return true,
        };
        let written = String::from_utf8_lossy(&self.written);
        written.ends_with('\n') && written.lines().any(|line| line.contains(fail_after))
    }
}

impl Write for ClosingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
