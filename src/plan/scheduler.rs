//! 就绪集调度
//!
//! 每轮按计划顺序扫描：Pending 且依赖全部 Completed 的任务立即执行，完成的编号当轮即可解锁后续任务。
//! 全部任务进入终态、或一整轮没有任何任务被执行（依赖环、依赖失败或不存在的编号）时结束；
//! 后一种情况剩余任务保持 Pending。每轮至少终结一个任务，因此最多 `任务数 + 1` 轮。

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::{AgentEvent, RunContext};
use crate::plan::{ExecutionPlan, TaskId, TaskStatus};
use crate::tools::ToolExecutor;

/// 执行阶段结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// 所有任务都已 Completed 或 Failed
    AllTerminal,
    /// 一整轮扫描无进展
    NoProgress,
}

/// 执行阶段汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub rounds: usize,
    /// 按执行顺序
    pub executed: Vec<TaskId>,
    pub completed: BTreeSet<TaskId>,
    pub failed: BTreeSet<TaskId>,
    /// 结束时仍为 Pending 的任务
    pub pending: Vec<TaskId>,
    pub stop: StopReason,
}

/// 计划执行器
pub struct PlanScheduler<'a> {
    executor: &'a ToolExecutor,
}

impl<'a> PlanScheduler<'a> {
    pub fn new(executor: &'a ToolExecutor) -> Self {
        Self { executor }
    }

    /// 原地推进 plan 中任务的状态与结果
    pub fn run(&self, ctx: &RunContext, plan: &mut ExecutionPlan) -> ScheduleReport {
        let mut completed: BTreeSet<TaskId> = BTreeSet::new();
        let mut failed: BTreeSet<TaskId> = BTreeSet::new();
        let mut results: BTreeMap<TaskId, String> = BTreeMap::new();
        let mut executed = Vec::new();
        let mut rounds = 0;
        let max_rounds = plan.tasks.len() + 1;

        let stop = loop {
            if plan.all_terminal() {
                break StopReason::AllTerminal;
            }
            rounds += 1;
            ctx.emit(AgentEvent::RoundStarted {
                round: rounds,
                max_rounds,
            });

            let mut progress = false;
            for task in plan.tasks.iter_mut() {
                if !task.is_ready(&completed) {
                    continue;
                }
                progress = true;

                task.status = TaskStatus::Executing;
                ctx.emit(AgentEvent::TaskStatusChanged {
                    task_id: task.id,
                    status: task.status,
                });

                let input = substitute_results(&task.tool_input, &results);
                tracing::info!(task_id = task.id, tool = %task.tool_name, "执行任务: {}", task.description);
                let outcome = self.executor.execute(ctx, &task.tool_name, &input);

                task.status = if outcome.ok {
                    completed.insert(task.id);
                    results.insert(task.id, outcome.observation.clone());
                    TaskStatus::Completed
                } else {
                    failed.insert(task.id);
                    TaskStatus::Failed
                };
                task.result = Some(outcome.observation);
                executed.push(task.id);
                ctx.emit(AgentEvent::TaskStatusChanged {
                    task_id: task.id,
                    status: task.status,
                });
            }

            if !progress {
                let pending = pending_ids(plan);
                tracing::warn!(?pending, "无法继续执行：剩余任务的依赖无法满足");
                ctx.emit(AgentEvent::Deadlock { pending });
                break StopReason::NoProgress;
            }
        };

        ScheduleReport {
            rounds,
            executed,
            completed,
            failed,
            pending: pending_ids(plan),
            stop,
        }
    }
}

fn pending_ids(plan: &ExecutionPlan) -> Vec<TaskId> {
    plan.tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .map(|t| t.id)
        .collect()
}

/// 将 `{{task_N}}` 替换为任务 N 的结果；引用未完成的任务时原样保留
pub fn substitute_results(input: &str, results: &BTreeMap<TaskId, String>) -> String {
    if !input.contains("{{task_") {
        return input.to_string();
    }
    results.iter().fold(input.to_string(), |acc, (id, result)| {
        acc.replace(&format!("{{{{task_{id}}}}}"), result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Task;
    use crate::tools::builtin_registry;

    fn run(plan: &mut ExecutionPlan) -> ScheduleReport {
        let executor = ToolExecutor::new(builtin_registry());
        PlanScheduler::new(&executor).run(&RunContext::new("test"), plan)
    }

    #[test]
    fn test_dependency_chain_in_one_round() {
        let mut plan = ExecutionPlan::new(
            "计算",
            vec![
                Task::new(1, "calculate", "甲", "1+1"),
                Task::new(2, "calculate", "乙", "{{task_1}}*10").with_dependencies([1]),
            ],
        );
        let report = run(&mut plan);
        assert_eq!(report.stop, StopReason::AllTerminal);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.executed, vec![1, 2]);
        assert_eq!(plan.tasks[1].result.as_deref(), Some("20"));
    }

    #[test]
    fn test_out_of_order_dependency_needs_second_round() {
        let mut plan = ExecutionPlan::new(
            "x",
            vec![
                Task::new(1, "calculate", "后", "2*2").with_dependencies([2]),
                Task::new(2, "calculate", "先", "1+1"),
            ],
        );
        let report = run(&mut plan);
        assert_eq!(report.executed, vec![2, 1]);
        assert_eq!(report.rounds, 2);
    }

    #[test]
    fn test_failed_task_blocks_dependents() {
        let mut plan = ExecutionPlan::new(
            "x",
            vec![
                Task::new(1, "calculate", "除零", "1/0"),
                Task::new(2, "calculate", "依赖失败", "1+1").with_dependencies([1]),
                Task::new(3, "teleport", "未知工具", "x"),
            ],
        );
        let report = run(&mut plan);
        assert_eq!(report.stop, StopReason::NoProgress);
        assert_eq!(report.failed, BTreeSet::from([1, 3]));
        assert_eq!(report.pending, vec![2]);
        assert_eq!(plan.tasks[1].status, TaskStatus::Pending);
        assert_eq!(plan.tasks[0].result.as_deref(), Some("错误: 除数不能为零"));
    }

    #[test]
    fn test_cycle_stops_without_executing() {
        let mut plan = ExecutionPlan::new(
            "x",
            vec![
                Task::new(1, "calculate", "a", "1").with_dependencies([2]),
                Task::new(2, "calculate", "b", "2").with_dependencies([1]),
            ],
        );
        let report = run(&mut plan);
        assert_eq!(report.stop, StopReason::NoProgress);
        assert!(report.executed.is_empty());
        assert_eq!(report.pending, vec![1, 2]);
    }

    #[test]
    fn test_long_reverse_chain_runs_to_completion() {
        // 任务 i 依赖 i+1，每轮只能解锁最后一个仍 Pending 的任务
        let n = 12;
        let tasks = (1..=n)
            .map(|i| {
                let task = Task::new(i, "calculate", format!("t{i}"), "1+1");
                if i < n {
                    task.with_dependencies([i + 1])
                } else {
                    task
                }
            })
            .collect();
        let mut plan = ExecutionPlan::new("x", tasks);
        let report = run(&mut plan);
        assert_eq!(report.stop, StopReason::AllTerminal);
        assert_eq!(report.rounds, n as usize);
        assert!(report.pending.is_empty());
        assert_eq!(report.executed, (1..=n).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_plan() {
        let mut plan = ExecutionPlan::new("x", Vec::new());
        let report = run(&mut plan);
        assert_eq!(report.stop, StopReason::AllTerminal);
        assert_eq!(report.rounds, 0);
    }

    #[test]
    fn test_status_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = RunContext::new("test").with_events(tx);
        let executor = ToolExecutor::new(builtin_registry());
        let mut plan = ExecutionPlan::new("x", vec![Task::new(1, "calculate", "a", "1+1")]);
        PlanScheduler::new(&executor).run(&ctx, &mut plan);

        let mut statuses = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            if let AgentEvent::TaskStatusChanged { status, .. } = ev {
                statuses.push(status);
            }
        }
        assert_eq!(statuses, vec![TaskStatus::Executing, TaskStatus::Completed]);
    }

    #[test]
    fn test_substitute_results() {
        let results = BTreeMap::from([(1, "25".to_string())]);
        assert_eq!(substitute_results("{{task_1}}/100", &results), "25/100");
        assert_eq!(substitute_results("{{task_2}}+1", &results), "{{task_2}}+1");
        assert_eq!(substitute_results("1+1", &results), "1+1");
    }
}
