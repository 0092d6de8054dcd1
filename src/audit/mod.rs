/// Audit domain layer - pure business logic with no I/O
///
/// `domain` holds the entities and value objects (resources, the registry,
/// lookup outcomes); `services` holds the stateless joins run over them.
pub mod domain;
pub mod services;
