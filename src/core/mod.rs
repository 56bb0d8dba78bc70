//! 核心层：错误类型、运行期上下文、过程事件

pub mod context;
pub mod error;
pub mod events;

pub use context::RunContext;
pub use error::{AgentError, ToolError};
pub use events::AgentEvent;
