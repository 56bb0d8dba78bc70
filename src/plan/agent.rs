//! Plan-and-Execute Agent
//!
//! 规划（一次 LLM 调用 + 计划解析）-> 执行（就绪集调度）-> 综合（一次 LLM 调用）。

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use crate::core::{AgentError, AgentEvent, RunContext};
use crate::llm::LlmClient;
use crate::memory::Message;
use crate::parser::parse_plan;
use crate::plan::{ExecutionPlan, PlanScheduler, ScheduleReport};
use crate::prompts;
use crate::tools::ToolExecutor;

/// 一次 Plan-and-Execute 运行的产物
#[derive(Debug, Clone, Serialize)]
pub struct PlanRunResult {
    pub run_id: String,
    pub plan: ExecutionPlan,
    pub report: ScheduleReport,
    pub answer: String,
}

pub struct PlanAndExecuteAgent {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    preview_chars: usize,
}

impl PlanAndExecuteAgent {
    pub fn new(llm: Arc<dyn LlmClient>, executor: ToolExecutor) -> Self {
        Self {
            llm,
            executor,
            preview_chars: crate::core::context::DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// 新建 RunContext 运行
    pub async fn run(&self, goal: &str) -> Result<PlanRunResult, AgentError> {
        let ctx = RunContext::new("plan_execute").with_preview_chars(self.preview_chars);
        self.run_with(&ctx, goal).await
    }

    pub async fn run_with(&self, ctx: &RunContext, goal: &str) -> Result<PlanRunResult, AgentError> {
        self.run_inner(ctx, goal)
            .instrument(ctx.span().clone())
            .await
    }

    async fn run_inner(&self, ctx: &RunContext, goal: &str) -> Result<PlanRunResult, AgentError> {
        tracing::info!("要解决的问题: {}", goal);

        let mut plan = self.create_plan(ctx, goal).await?;
        let report = PlanScheduler::new(&self.executor).run(ctx, &mut plan);
        tracing::info!(
            completed = report.completed.len(),
            failed = report.failed.len(),
            pending = report.pending.len(),
            stop = ?report.stop,
            "执行阶段结束"
        );

        let answer = self.synthesize(ctx, &plan).await?;
        ctx.emit(AgentEvent::FinalAnswer {
            text: answer.clone(),
        });
        Ok(PlanRunResult {
            run_id: ctx.run_id().to_string(),
            plan,
            report,
            answer,
        })
    }

    /// 规划：让模型输出计划行并解析
    pub async fn create_plan(&self, ctx: &RunContext, goal: &str) -> Result<ExecutionPlan, AgentError> {
        let system = prompts::planner_system_prompt(&self.executor.registry().render_tool_list());
        let messages = vec![Message::system(system), Message::user(goal)];

        ctx.emit(AgentEvent::Thinking);
        let content = self.llm.complete_text(&messages).await?;
        if content.trim().is_empty() {
            tracing::warn!("模型未给出计划，按空计划继续");
        }
        tracing::debug!("计划原文:\n{}", content);

        let plan = ExecutionPlan::new(goal, parse_plan(&content));
        tracing::info!("执行计划:\n{}", plan.to_plan_text());
        ctx.emit(AgentEvent::PlanCreated {
            goal: goal.to_string(),
            tasks: plan.tasks.len(),
        });
        Ok(plan)
    }

    /// 综合：目标 + 已完成任务的结果
    pub async fn synthesize(&self, ctx: &RunContext, plan: &ExecutionPlan) -> Result<String, AgentError> {
        let context = prompts::synthesis_context(plan);
        tracing::info!("综合答案，上下文:\n{}", context);

        let messages = vec![
            Message::system(prompts::SYNTHESIS_SYSTEM_PROMPT),
            Message::user(context),
        ];
        ctx.emit(AgentEvent::Thinking);
        let answer = self.llm.complete_text(&messages).await?;
        if answer.trim().is_empty() {
            tracing::warn!("综合阶段模型返回空内容");
            ctx.emit(AgentEvent::Fallback {
                reason: "empty synthesis".to_string(),
            });
            return Ok(prompts::FALLBACK_ANSWER.to_string());
        }
        Ok(answer.trim().to_string())
    }
}
