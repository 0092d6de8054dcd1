/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (Azure CLI, file system, console).
pub mod command_runner;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod resource_inventory;
pub mod resource_lookup;

pub use command_runner::{CommandError, CommandRunner};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use resource_inventory::ResourceInventory;
pub use resource_lookup::ResourceLookup;
