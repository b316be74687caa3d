pub mod message;
pub mod wire;

pub use message::{CompletionMessage, SlotId};
pub use wire::EvalResponse;
