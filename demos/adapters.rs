use vk_sanity::{Context, InstanceDescriptor, Vulkan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = pretty_env_logger::try_init();

    let driver = Vulkan::new();
    println!("loader: {}", vk_sanity::query_loader_version(&driver));

    let context = Context::new(&driver, &InstanceDescriptor::default())?;
    for adapter in context.enumerate_adapters()?.iter() {
        let props = context.describe(adapter);
        println!("{} ({:?}, vendor 0x{:04x})", props.name, props.device_type, props.vendor_id);
    }

    Ok(())
}
