//! 计划与任务
//!
//! Task 由计划解析创建，执行期间由调度器原地修改状态与结果，从不删除，最后用于综合答案。

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type TaskId = u32;

/// 任务状态：只会 Pending -> Executing -> Completed | Failed 单向推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Executing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// 计划中的一个子任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub tool_name: String,
    pub tool_input: String,
    pub dependencies: BTreeSet<TaskId>,
    pub status: TaskStatus,
    pub result: Option<String>,
}

impl Task {
    pub fn new(
        id: TaskId,
        tool_name: impl Into<String>,
        description: impl Into<String>,
        tool_input: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            tool_name: tool_name.into(),
            tool_input: tool_input.into(),
            dependencies: BTreeSet::new(),
            status: TaskStatus::Pending,
            result: None,
        }
    }

    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = deps.into_iter().collect();
        self
    }

    /// 依赖全部位于 completed 中（无依赖时恒为真）
    pub fn dependencies_met(&self, completed: &BTreeSet<TaskId>) -> bool {
        self.dependencies.is_subset(completed)
    }

    /// 可执行：仍为 Pending 且依赖已满足
    pub fn is_ready(&self, completed: &BTreeSet<TaskId>) -> bool {
        self.status == TaskStatus::Pending && self.dependencies_met(completed)
    }

    /// 渲染为计划行：`1. [tool] 描述 | 输入 | 依赖: 1,2`
    pub fn to_plan_line(&self) -> String {
        let mut line = format!(
            "{}. [{}] {} | {}",
            self.id, self.tool_name, self.description, self.tool_input
        );
        if !self.dependencies.is_empty() {
            let deps: Vec<String> = self.dependencies.iter().map(|d| d.to_string()).collect();
            line.push_str(" | 依赖: ");
            line.push_str(&deps.join(","));
        }
        line
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "任务ID: {} 描述: {} 工具: {} 参数: {} 状态: {:?}",
            self.id, self.description, self.tool_name, self.tool_input, self.status
        )?;
        if let Some(r) = &self.result {
            write!(f, " 结果: {r}")?;
        }
        Ok(())
    }
}

/// 执行计划：解析完成后任务列表成员不再变化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub goal: String,
    pub tasks: Vec<Task>,
}

impl ExecutionPlan {
    pub fn new(goal: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            goal: goal.into(),
            tasks,
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
    }

    pub fn all_terminal(&self) -> bool {
        self.tasks.iter().all(|t| t.status.is_terminal())
    }

    /// 重新渲染为计划文本
    pub fn to_plan_text(&self) -> String {
        self.tasks
            .iter()
            .map(Task::to_plan_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
