//! Function Calling Agent
//!
//! 请求携带工具 schema；模型返回原生 tool_calls 时直接执行，否则尝试从正文恢复 XML / JSON 调用。
//! 每次调用的结果以 tool 消息写回，再次请求，直到模型给出纯文本回答或用完 max_tool_rounds。

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

use crate::core::{AgentError, AgentEvent, RunContext};
use crate::llm::{ChatRequest, ChatResponse, LlmClient, ToolCall};
use crate::memory::{ConversationState, Message};
use crate::parser::extract_tool_calls;
use crate::prompts;
use crate::tools::{tool_call_schema_json, ToolExecutor};

/// 一次工具调用的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInvocation {
    pub call_id: String,
    pub tool: String,
    pub input: String,
    pub observation: String,
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionCallingResult {
    pub run_id: String,
    pub answer: String,
    /// 实际发起的 LLM 请求次数
    pub rounds: usize,
    pub invocations: Vec<ToolInvocation>,
}

pub struct FunctionCallingAgent {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    system_prompt: String,
    max_tool_rounds: usize,
    preview_chars: usize,
}

impl FunctionCallingAgent {
    pub fn new(llm: Arc<dyn LlmClient>, executor: ToolExecutor) -> Self {
        let system_prompt = prompts::function_calling_system_prompt(
            &executor.registry().render_tool_list(),
            &tool_call_schema_json(),
        );
        Self {
            llm,
            executor,
            system_prompt,
            max_tool_rounds: 5,
            preview_chars: crate::core::context::DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub async fn run(&self, question: &str) -> Result<FunctionCallingResult, AgentError> {
        let ctx = RunContext::new("function_calling").with_preview_chars(self.preview_chars);
        self.run_with(&ctx, question).await
    }

    pub async fn run_with(
        &self,
        ctx: &RunContext,
        question: &str,
    ) -> Result<FunctionCallingResult, AgentError> {
        self.run_inner(ctx, question)
            .instrument(ctx.span().clone())
            .await
    }

    async fn run_inner(
        &self,
        ctx: &RunContext,
        question: &str,
    ) -> Result<FunctionCallingResult, AgentError> {
        tracing::info!("用户问题: {}", question);
        let mut conversation = ConversationState::new(self.system_prompt.clone(), question);
        let schemas = self.executor.registry().schemas();
        let mut invocations = Vec::new();

        // 前 max_tool_rounds 次请求允许调用工具，之后再给模型一次不带工具的作答机会
        let mut round = 0;
        loop {
            round += 1;
            ctx.emit(AgentEvent::RoundStarted {
                round,
                max_rounds: self.max_tool_rounds + 1,
            });
            ctx.emit(AgentEvent::Thinking);

            let tools_allowed = round <= self.max_tool_rounds;
            let mut request = ChatRequest::new(conversation.messages().to_vec());
            if tools_allowed {
                request = request.with_tools(schemas.clone());
            }

            let (content, calls) = match self.llm.complete(&request).await? {
                ChatResponse::ToolCalls { content, calls } => (content, calls),
                ChatResponse::Text(text) => {
                    let calls = extract_tool_calls(&text);
                    if !calls.is_empty() {
                        tracing::debug!("从正文中恢复出 {} 个工具调用", calls.len());
                    }
                    (text, calls)
                }
            };

            if !calls.is_empty() && !tools_allowed {
                tracing::warn!(max_tool_rounds = self.max_tool_rounds, "工具轮数已用完，忽略新的工具调用");
                ctx.emit(AgentEvent::Fallback {
                    reason: "tool rounds exhausted".to_string(),
                });
                return Ok(self.finish(ctx, prompts::FALLBACK_ANSWER.to_string(), round, invocations));
            }
            if calls.is_empty() {
                if content.trim().is_empty() {
                    tracing::warn!("模型既未调用工具也未给出回答");
                    ctx.emit(AgentEvent::Fallback {
                        reason: "empty reply".to_string(),
                    });
                    return Ok(self.finish(ctx, prompts::FALLBACK_ANSWER.to_string(), round, invocations));
                }
                let answer = content.trim().to_string();
                ctx.emit(AgentEvent::FinalAnswer {
                    text: answer.clone(),
                });
                return Ok(self.finish(ctx, answer, round, invocations));
            }

            conversation.push(Message::assistant_tool_calls(content, calls.clone()));
            for call in &calls {
                let invocation = self.invoke(ctx, call);
                conversation.push(Message::tool(&call.id, &invocation.observation));
                invocations.push(invocation);
            }
        }
    }

    /// 把参数对象折叠为工具输入并执行
    fn invoke(&self, ctx: &RunContext, call: &ToolCall) -> ToolInvocation {
        let param = self
            .executor
            .get_tool(&call.name)
            .and_then(|t| t.parameter().map(|(name, _)| name.to_string()));
        let input = call.input_for(param.as_deref());
        let outcome = self.executor.execute(ctx, &call.name, &input);
        ToolInvocation {
            call_id: call.id.clone(),
            tool: call.name.clone(),
            input,
            observation: outcome.observation,
            ok: outcome.ok,
        }
    }

    fn finish(
        &self,
        ctx: &RunContext,
        answer: String,
        rounds: usize,
        invocations: Vec<ToolInvocation>,
    ) -> FunctionCallingResult {
        tracing::info!(rounds, tools = invocations.len(), "回答完成");
        FunctionCallingResult {
            run_id: ctx.run_id().to_string(),
            answer,
            rounds,
            invocations,
        }
    }
}
