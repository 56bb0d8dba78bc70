//! 记忆层：单次运行内的对话上下文（不做持久化）

pub mod conversation;

pub use conversation::{ConversationState, Message, Role};
