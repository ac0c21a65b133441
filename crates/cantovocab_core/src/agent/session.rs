//! Chat session driving a [`ChatModel`] against [`VocabTools`].

use crate::config::AppConfig;
use crate::tools::{tool_definitions, ToolDefinition, ToolError, VocabTools, SYSTEM_PROMPT};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Completions allowed per user turn unless configured otherwise.
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Model-assigned id echoed back with the result.
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ChatMessage {
    System { content: String },
    User { content: String },
    Assistant { content: String },
    ToolCall { call: ToolCall },
    ToolResult { call_id: String, content: Value },
}

/// What the model decided to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelTurn {
    Reply(String),
    ToolCalls(Vec<ToolCall>),
}

/// Hosted language model seen as a function from history to next turn.
pub trait ChatModel {
    fn complete(
        &mut self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ModelTurn, String>;
}

#[derive(Debug)]
pub enum AgentError {
    InvalidInput(String),
    /// The model backend failed to produce a turn.
    Model(String),
    /// A fatal tool failure, typically `StoreUnavailable`.
    Tool(ToolError),
    StepLimitExceeded { max_steps: usize },
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Model(message) => write!(f, "model call failed: {message}"),
            Self::Tool(err) => write!(f, "{err}"),
            Self::StepLimitExceeded { max_steps } => {
                write!(f, "model did not reply within {max_steps} steps")
            }
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tool(err) => Some(err),
            _ => None,
        }
    }
}

/// Conversation with a single learner.
pub struct ChatSession<'t, M: ChatModel> {
    tools: &'t VocabTools<'t>,
    model: M,
    definitions: Vec<ToolDefinition>,
    history: Vec<ChatMessage>,
    max_steps: usize,
}

impl<'t, M: ChatModel> ChatSession<'t, M> {
    /// Starts a session seeded with the tutor system prompt.
    pub fn new(tools: &'t VocabTools<'t>, model: M) -> Self {
        Self {
            tools,
            model,
            definitions: tool_definitions(),
            history: vec![ChatMessage::System {
                content: SYSTEM_PROMPT.to_string(),
            }],
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Starts a session with the step limit from `config`.
    pub fn from_config(tools: &'t VocabTools<'t>, model: M, config: &AppConfig) -> Self {
        Self::new(tools, model).with_max_steps(config.max_agent_steps)
    }

    /// Caps model completions per user turn. Zero is raised to one.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends one learner message and returns the model's final reply.
    pub fn send(&mut self, user_text: &str) -> Result<String, AgentError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(AgentError::InvalidInput("message is empty".to_string()));
        }
        self.history.push(ChatMessage::User {
            content: user_text.to_string(),
        });

        for step in 1..=self.max_steps {
            let turn = self
                .model
                .complete(&self.history, &self.definitions)
                .map_err(AgentError::Model)?;

            match turn {
                ModelTurn::Reply(content) => {
                    info!("event=chat_turn module=agent status=ok steps={step}");
                    self.history.push(ChatMessage::Assistant {
                        content: content.clone(),
                    });
                    return Ok(content);
                }
                ModelTurn::ToolCalls(calls) => {
                    for call in calls {
                        self.run_tool_call(call)?;
                    }
                }
            }
        }

        warn!(
            "event=chat_turn module=agent status=error error_code=step_limit max_steps={}",
            self.max_steps
        );
        Err(AgentError::StepLimitExceeded {
            max_steps: self.max_steps,
        })
    }

    fn run_tool_call(&mut self, call: ToolCall) -> Result<(), AgentError> {
        let outcome = self.tools.invoke(&call.name, call.arguments.clone());
        let call_id = call.id.clone();
        self.history.push(ChatMessage::ToolCall { call });

        let content = match outcome {
            Ok(value) => value,
            Err(err) if err.is_fatal() => return Err(AgentError::Tool(err)),
            Err(err) => err.to_payload(),
        };
        self.history.push(ChatMessage::ToolResult { call_id, content });
        Ok(())
    }
}
