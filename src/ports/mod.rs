/// Ports module defining interfaces for hexagonal architecture
///
/// The application is driven only from the CLI, so only outbound (driven)
/// ports exist: the interfaces the core uses to reach Azure, the console and
/// the file system.
pub mod outbound;
