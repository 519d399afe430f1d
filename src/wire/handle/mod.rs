mod host;
mod target;

pub use host::HostHandle;
pub use target::TargetHandle;
