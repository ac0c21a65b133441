//! Bounded tool-calling conversation loop.
//!
//! # Responsibility
//! - Carry chat history between the learner, the hosted model and the tools.
//! - Execute the model's tool calls and feed results back to it.
//!
//! # Invariants
//! - One user turn runs at most `max_steps` model completions.
//! - Non-fatal tool failures are shown to the model; fatal ones end the turn.

mod session;

pub use session::{
    AgentError, ChatMessage, ChatModel, ChatSession, ModelTurn, ToolCall, DEFAULT_MAX_STEPS,
};
