//! 运行过程事件：ReAct / Plan-and-Execute / Function Calling 三种编排共用
//!
//! 事件可序列化为 JSON，便于外部前端或测试逐步观察运行过程。

use serde::Serialize;

use crate::plan::TaskStatus;

/// 单步过程事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// 新一轮开始（从 1 计数）
    RoundStarted { round: usize, max_rounds: usize },
    /// 正在调用 LLM
    Thinking,
    /// 模型给出的思考内容
    Thought { text: String },
    /// 调用工具
    ToolCall { tool: String, input: String },
    /// 工具返回（预览）
    Observation { tool: String, preview: String },
    /// 规划阶段完成
    PlanCreated { goal: String, tasks: usize },
    /// 任务状态变化
    TaskStatusChanged { task_id: u32, status: TaskStatus },
    /// 一整轮扫描没有任何进展，提前结束执行
    Deadlock { pending: Vec<u32> },
    /// 最终答案
    FinalAnswer { text: String },
    /// 未能得到答案，返回兜底文案
    Fallback { reason: String },
}
