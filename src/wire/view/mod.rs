mod host;

pub use host::HostView;
