pub mod api;
pub mod sequencer;

pub use api::ApiClient;
pub use sequencer::FetchSequencer;
