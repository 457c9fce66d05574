//! Network address helpers

pub mod host_port;

pub use host_port::{HostAndPortError, SimpleHostAndPort};
