/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod output_format;
mod plan_request;
mod plan_response;

pub use output_format::OutputFormat;
pub use plan_request::PlanRequest;
pub use plan_response::{ChannelSnapshot, PlanResponse};
