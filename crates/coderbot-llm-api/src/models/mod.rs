// Models module - data structures for inference service communication
pub mod requests;
pub mod responses;

pub use requests::{ChatOptions, ChatRequest};
pub use responses::TokenUsage;
