//! Scripted LLM 客户端（用于测试，无需 API）
//!
//! 按顺序返回预先排好的响应，并记录收到的每个请求，便于断言上下文内容与调用次数。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{ChatRequest, ChatResponse, LlmClient, LlmError, ToolCall};

/// 脚本客户端：队列耗尽后若设置了 repeat 则一直返回它，否则报 ScriptExhausted
#[derive(Debug, Default)]
pub struct ScriptedLlmClient {
    script: Mutex<VecDeque<ChatResponse>>,
    repeat: Option<ChatResponse>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依次返回给定文本
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for t in texts {
            client.push_text(t);
        }
        client
    }

    /// 每次都返回同一段文本
    pub fn repeating(text: impl Into<String>) -> Self {
        Self {
            repeat: Some(ChatResponse::Text(text.into())),
            ..Self::default()
        }
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(ChatResponse::Text(text.into()));
    }

    pub fn push_tool_calls(&self, calls: Vec<ToolCall>) {
        self.push(ChatResponse::ToolCalls {
            content: String::new(),
            calls,
        });
    }

    pub fn push(&self, response: ChatResponse) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// 已收到的请求数
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// 已收到的请求副本
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let served = {
            let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
            requests.push(request.clone());
            requests.len() - 1
        };
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.or_else(|| self.repeat.clone())
            .ok_or(LlmError::ScriptExhausted(served))
    }
}
