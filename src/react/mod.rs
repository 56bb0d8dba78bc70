//! ReAct：Thought / Action / Observation 循环与运行记录

pub mod loop_;
pub mod step;

pub use loop_::{ReActAgent, DEFAULT_MAX_ITERATIONS};
pub use step::{ReActStep, RunHistory, RunOutcome};
