/// Network adapters for channel index retrieval
mod channel_client;

pub use channel_client::{ChannelIndexClient, HttpChannelClient, LocalChannelReader};
