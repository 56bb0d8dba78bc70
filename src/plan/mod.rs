//! Plan-and-Execute：计划模型、就绪集调度与 Agent

pub mod agent;
pub mod scheduler;
pub mod task;

pub use agent::{PlanAndExecuteAgent, PlanRunResult};
pub use scheduler::{substitute_results, PlanScheduler, ScheduleReport, StopReason};
pub use task::{ExecutionPlan, Task, TaskId, TaskStatus};
