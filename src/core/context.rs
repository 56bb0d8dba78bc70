//! 运行期上下文
//!
//! 每次 run 创建一个 RunContext，显式传给 Agent、调度器与 ToolExecutor：
//! 携带 run_id、tracing span 与可选的事件通道，取代模块级的全局 logger。

use tokio::sync::mpsc;
use tracing::Span;

use crate::core::AgentEvent;

/// 单次运行的上下文
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: String,
    span: Span,
    event_tx: Option<mpsc::UnboundedSender<AgentEvent>>,
    preview_chars: usize,
}

/// Observation 等长文本在日志与事件中的默认预览长度
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

impl RunContext {
    /// kind 标识编排方式（react / plan_execute / function_calling）
    pub fn new(kind: &'static str) -> Self {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("run", run_id = %run_id, kind);
        Self {
            run_id,
            span,
            event_tx: None,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_events(mut self, tx: mpsc::UnboundedSender<AgentEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 发送事件；接收端已关闭时静默丢弃
    pub fn emit(&self, ev: AgentEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(ev);
        }
    }

    /// 按字符截断，超长时追加 "..."
    pub fn preview(&self, text: &str) -> String {
        if text.chars().count() > self.preview_chars {
            let head: String = text.chars().take(self.preview_chars).collect();
            format!("{head}...")
        } else {
            text.to_string()
        }
    }
}
