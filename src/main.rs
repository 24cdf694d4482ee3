use vk_sanity::{Runner, Vulkan};

use std::io;

fn main() {
    let _ = pretty_env_logger::try_init();

    let driver = Vulkan::new();
    let code = {
        let stdout = io::stdout();
        let stderr = io::stderr();
        Runner::new(&driver).run(&mut stdout.lock(), &mut stderr.lock())
    };

    std::process::exit(code);
}
