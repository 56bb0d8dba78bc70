//! ReAct 主循环
//!
//! LLM -> 解析 -> [执行工具 -> 写回 Observation -> 下一轮] | [Final Answer -> 结束] | [无法解析 -> 兜底结束]，
//! 最多 max_iterations 轮。每轮都记入历史，run 结束后整段历史追加到 Agent 的 histories。

use std::sync::{Arc, Mutex};

use tracing::Instrument;

use crate::core::{AgentError, AgentEvent, RunContext};
use crate::llm::LlmClient;
use crate::memory::{ConversationState, Message};
use crate::parser::{parse_react, ReactOutcome};
use crate::prompts;
use crate::react::{ReActStep, RunHistory, RunOutcome};
use crate::tools::ToolExecutor;

/// 默认最大迭代次数
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

pub struct ReActAgent {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    system_prompt: String,
    max_iterations: usize,
    preview_chars: usize,
    histories: Mutex<Vec<RunHistory>>,
}

impl ReActAgent {
    pub fn new(llm: Arc<dyn LlmClient>, executor: ToolExecutor) -> Self {
        let system_prompt = prompts::react_system_prompt(&executor.registry().render_tool_list());
        Self {
            llm,
            executor,
            system_prompt,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            preview_chars: crate::core::context::DEFAULT_PREVIEW_CHARS,
            histories: Mutex::new(Vec::new()),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// 已完成的 run 历史（按时间顺序）
    pub fn histories(&self) -> Vec<RunHistory> {
        self.histories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last_history(&self) -> Option<RunHistory> {
        self.histories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// 新建 RunContext 运行
    pub async fn run(&self, question: &str) -> Result<String, AgentError> {
        let ctx = RunContext::new("react").with_preview_chars(self.preview_chars);
        self.run_with(&ctx, question).await
    }

    pub async fn run_with(&self, ctx: &RunContext, question: &str) -> Result<String, AgentError> {
        self.run_inner(ctx, question)
            .instrument(ctx.span().clone())
            .await
    }

    async fn run_inner(&self, ctx: &RunContext, question: &str) -> Result<String, AgentError> {
        tracing::info!("开始处理问题: {}", question);
        let mut conversation = ConversationState::new(self.system_prompt.clone(), question);
        let mut steps: Vec<ReActStep> = Vec::new();
        let mut outcome = RunOutcome::BudgetExhausted;

        for round in 1..=self.max_iterations {
            tracing::info!("=== 第{}轮迭代 ===", round);
            ctx.emit(AgentEvent::RoundStarted {
                round,
                max_rounds: self.max_iterations,
            });
            ctx.emit(AgentEvent::Thinking);

            let content = self.llm.complete_text(conversation.messages()).await?;
            tracing::debug!("LLM 响应:\n{}", content);

            let parsed = parse_react(&content);
            if !parsed.thought.is_empty() {
                tracing::info!("思考: {}", parsed.thought);
                ctx.emit(AgentEvent::Thought {
                    text: parsed.thought.clone(),
                });
            }
            let mut step = ReActStep::from_parse(round, &parsed);

            match parsed.outcome() {
                ReactOutcome::Final(answer) => {
                    tracing::info!("最终答案: {}", answer);
                    steps.push(step);
                    ctx.emit(AgentEvent::FinalAnswer {
                        text: answer.clone(),
                    });
                    self.record(ctx, question, steps, RunOutcome::Answered);
                    return Ok(answer);
                }
                ReactOutcome::Act(action) => {
                    let result = self.executor.execute(ctx, &action.name, &action.input);
                    tracing::info!("观察: {}", ctx.preview(&result.observation));
                    conversation.push(Message::assistant(content));
                    conversation.push(Message::user(format!(
                        "Observation: {}",
                        result.observation
                    )));
                    step.observation = Some(result.observation);
                    steps.push(step);
                }
                ReactOutcome::ThoughtOnly => {
                    // 只有思考：保留到上下文，下一轮让模型补上 Action
                    steps.push(step);
                    conversation.push(Message::assistant(content));
                }
                ReactOutcome::Unparseable => {
                    tracing::warn!("无法识别的动作且没有思考内容");
                    steps.push(step);
                    outcome = RunOutcome::NoAction;
                    break;
                }
            }
        }

        if outcome == RunOutcome::BudgetExhausted {
            tracing::warn!(max_iterations = self.max_iterations, "达到最大迭代次数，未能获得最终答案");
        }
        ctx.emit(AgentEvent::Fallback {
            reason: format!("{outcome:?}"),
        });
        self.record(ctx, question, steps, outcome);
        Ok(prompts::FALLBACK_ANSWER.to_string())
    }

    fn record(&self, ctx: &RunContext, question: &str, steps: Vec<ReActStep>, outcome: RunOutcome) {
        let history = RunHistory {
            run_id: ctx.run_id().to_string(),
            question: question.to_string(),
            steps,
            outcome,
        };
        self.histories
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(history);
    }
}
