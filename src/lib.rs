//! azure-checker - Azure subscription audit tool
//!
//! This library inventories an Azure subscription through the Azure CLI,
//! enriches its virtual machines with backup and patch information, and
//! renders a managed services report. It follows hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`audit`): Resources, the registry, lookup outcomes and
//!   the pure joins run over them
//! - **Application Layer** (`application`): The enrichment engine, use cases,
//!   read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Azure CLI, console, file system and formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use azure_checker::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let runner = Arc::new(ShellCommandRunner::new());
//! let use_case = RunAuditUseCase::new(
//!     AzCliInventory::new(Arc::clone(&runner)),
//!     BackupVaultLookup::new(Arc::clone(&runner)),
//!     PatchAssessmentLookup::new(Arc::clone(&runner)),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = AuditRequest::builder().subscription_id("0000-1111").build()?;
//! let runtime = tokio::runtime::Runtime::new()?;
//! let response = runtime.block_on(use_case.execute(request))?;
//!
//! let model = AuditReadModelBuilder::build(
//!     &response.registry,
//!     &response.recommendations,
//!     &response.summaries,
//!     &response.metadata,
//! );
//! println!("{}", MarkdownFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod audit;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::azure::{
        AzCliInventory, BackupVaultLookup, PatchAssessmentLookup,
    };
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{
        HtmlFormatter, JsonFormatter, MarkdownFormatter,
    };
    pub use crate::adapters::outbound::process::{CachingCommandRunner, ShellCommandRunner};
    pub use crate::application::dto::{AuditRequest, AuditResponse, OutputFormat};
    pub use crate::application::enrichment::{EnrichmentCoordinator, TimeoutGuard};
    pub use crate::application::read_models::{AuditReadModel, AuditReadModelBuilder};
    pub use crate::application::use_cases::RunAuditUseCase;
    pub use crate::audit::domain::{
        LookupErrorKind, LookupKind, LookupOutcome, Resource, ResourceCategory, ResourceId,
        ResourceRegistry,
    };
    pub use crate::ports::outbound::{
        CommandRunner, OutputPresenter, ProgressReporter, ReportFormatter, ResourceInventory,
        ResourceLookup,
    };
    pub use crate::shared::Result;
}
