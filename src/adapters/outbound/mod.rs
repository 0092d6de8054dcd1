/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod azure;
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod process;
