mod adapter;
mod convert;
mod instance;
mod runner;
mod vulkan;

pub use crate::imp::instance::query_loader_version;
pub use crate::imp::vulkan::Vulkan;
