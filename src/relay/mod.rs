mod handler;
pub mod normalize;

pub use handler::{ChatRelay, ChatRequest, Outcome, RelayError};
