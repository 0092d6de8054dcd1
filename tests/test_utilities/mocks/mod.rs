/// Mock implementations for testing
mod mock_inventory;
mod mock_lookups;
mod mock_progress_reporter;

pub use mock_inventory::{vm_id, MockInventory};
pub use mock_lookups::{LookupScript, MockBackupLookup, MockPatchLookup};
pub use mock_progress_reporter::MockProgressReporter;
