/// Application layer - Use cases, enrichment engine and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod enrichment;
pub mod factories;
pub mod read_models;
pub mod use_cases;
