pub mod aggregator;
pub mod favorites;
pub mod playback;
pub mod query;
