//! LLM 客户端抽象
//!
//! 请求 = 有序角色消息 + 可选工具 schema；响应 = 纯文本，或结构化的工具调用列表。
//! 所有后端（OpenAI 兼容 / Scripted）实现 LlmClient。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::memory::Message;

/// LLM 调用错误；对 Agent 而言都是致命错误
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    /// Scripted 客户端的脚本已用完
    #[error("Script exhausted after {0} responses")]
    ScriptExhausted(usize),
}

/// 一次工具调用：原生 tool_calls，或从 XML / JSON 文本中恢复
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// 参数对象，如 {"city": "北京"}
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// 将参数对象折叠为工具所需的单个字符串：
    /// 优先取工具声明的参数名，其次第一个字符串值；参数本身是字符串时直接使用
    pub fn input_for(&self, param: Option<&str>) -> String {
        match &self.arguments {
            Value::String(s) => s.clone(),
            Value::Object(map) => {
                let named = param.and_then(|p| map.get(p));
                let chosen = named.or_else(|| map.values().find(|v| v.is_string()));
                match chosen {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                }
            }
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// 发往 chat completion 端点的请求
#[derive(Clone, Debug, Default)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// OpenAI 风格的 function schema 列表；为空表示不启用原生工具调用
    pub tools: Vec<Value>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }
}

/// chat completion 的两种响应形态
#[derive(Clone, Debug, PartialEq)]
pub enum ChatResponse {
    /// 自由文本（可能内嵌 ReAct / 计划 / XML / JSON 格式）
    Text(String),
    /// 原生结构化工具调用，content 为同时返回的文本（通常为空）
    ToolCalls { content: String, calls: Vec<ToolCall> },
}

impl ChatResponse {
    /// 响应中的文本部分
    pub fn text(&self) -> &str {
        match self {
            ChatResponse::Text(t) => t,
            ChatResponse::ToolCalls { content, .. } => content,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ChatResponse::Text(t) => t,
            ChatResponse::ToolCalls { content, .. } => content,
        }
    }
}

/// LLM 客户端 trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;

    /// 只关心文本时的便捷调用（不带工具 schema）
    async fn complete_text(&self, messages: &[Message]) -> Result<String, LlmError> {
        let response = self.complete(&ChatRequest::new(messages.to_vec())).await?;
        Ok(response.into_text())
    }

    /// 累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
