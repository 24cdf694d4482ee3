use ash::vk;

use backtrace::Backtrace;

use std::error::Error as StdError;
use std::fmt::{self, Display};

pub use vk::Result as VkResult;

impl From<ash::LoadingError> for Error {
    fn from(e: ash::LoadingError) -> Error {
        Error::from(format!("Failed to load vulkan library: {}", e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::from(format!("Failed to write diagnostic output: {}", e))
    }
}

#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    backtrace: Option<Backtrace>,
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        // ignore the backtrace
        self.kind.eq(&other.kind)
    }
}

impl Eq for Error {}

fn backtrace() -> Option<Backtrace> {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Once;

    static ENABLED: AtomicBool = AtomicBool::new(false);
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let enabled = std::env::var("RUST_BACKTRACE")
            .map(|v| v != "0" && v != "false")
            .unwrap_or(false);
        ENABLED.store(enabled, Ordering::Relaxed);
    });

    if ENABLED.load(Ordering::Relaxed) {
        Some(Backtrace::new())
    } else {
        None
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            backtrace: backtrace(),
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Error {
        Error::from(ErrorKind::Message(msg))
    }
}

impl<'a> From<&'a str> for Error {
    fn from(msg: &'a str) -> Error {
        Error::from(ErrorKind::Message(msg.to_owned()))
    }
}

impl Error {
    pub fn context_creation_failed(code: VkResult) -> Error {
        Error::from(ErrorKind::ContextCreationFailed(code))
    }

    pub fn device_enumeration_failed(result: VkResult, count: u32) -> Error {
        Error::from(ErrorKind::DeviceEnumerationFailed { result, count })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Set `RUST_BACKTRACE=1` to enable backtraces
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_ref()
    }

    /// Every failure is fatal to the diagnostic; there is only one failing exit code.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl StdError for Error {}

impl Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::ContextCreationFailed(code) => {
                write!(fmt, "[vk] vkCreateInstance failed: {}", code.as_raw())
            }
            ErrorKind::DeviceEnumerationFailed { result, count } => write!(
                fmt,
                "[vk] No physical devices found (res={}, count={})",
                result.as_raw(),
                count
            ),
            ErrorKind::Message(msg) => write!(fmt, "[vk] {}", msg),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// `vkCreateInstance` returned a non-success status.
    ContextCreationFailed(VkResult),
    /// `vkEnumeratePhysicalDevices` failed or reported zero devices.
    DeviceEnumerationFailed { result: VkResult, count: u32 },
    Message(String),
}
