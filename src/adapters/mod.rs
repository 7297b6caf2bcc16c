/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// recipe directories, channel indexes, formatters and console output.
pub mod outbound;
