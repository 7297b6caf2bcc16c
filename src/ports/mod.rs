/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe what the planning use case needs
/// from infrastructure. The CLI drives the use case directly.
pub mod outbound;
