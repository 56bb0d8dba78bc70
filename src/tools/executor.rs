//! 工具执行器
//!
//! 持有 ToolRegistry，execute(name, input) 永不返回错误：工具失败（含未知工具）被转为「错误: ...」Observation；
//! 每次调用输出结构化审计日志（JSON）。

use std::sync::Arc;
use std::time::Instant;

use crate::core::{AgentEvent, RunContext};
use crate::tools::{Tool, ToolRegistry};

/// 单次工具调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// 回填给模型的 Observation 文本
    pub observation: String,
    /// 工具是否成功；失败时 observation 以「错误: 」开头
    pub ok: bool,
}

/// 工具执行器
#[derive(Clone, Default)]
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// 执行指定工具；失败转为错误 Observation，并输出 JSON 审计日志
    pub fn execute(&self, ctx: &RunContext, tool_name: &str, input: &str) -> ToolOutcome {
        let _enter = ctx.span().enter();
        ctx.emit(AgentEvent::ToolCall {
            tool: tool_name.to_string(),
            input: input.to_string(),
        });

        let start = Instant::now();
        let result = self.registry.execute(tool_name, input);
        let duration_ms = start.elapsed().as_millis() as u64;

        let audit = serde_json::json!({
            "event": "tool_audit",
            "run_id": ctx.run_id(),
            "tool": tool_name,
            "ok": result.is_ok(),
            "duration_ms": duration_ms,
            "input_preview": ctx.preview(input),
        });
        tracing::info!(audit = %audit, "tool");

        let outcome = match result {
            Ok(observation) => ToolOutcome {
                observation,
                ok: true,
            },
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "tool failed");
                ToolOutcome {
                    observation: format!("错误: {e}"),
                    ok: false,
                }
            }
        };

        ctx.emit(AgentEvent::Observation {
            tool: tool_name.to_string(),
            preview: ctx.preview(&outcome.observation),
        });
        outcome
    }

    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.registry.get(name)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin_registry;

    #[test]
    fn test_unknown_tool_becomes_observation() {
        let exec = ToolExecutor::new(ToolRegistry::new());
        let out = exec.execute(&RunContext::new("test"), "teleport", "x");
        assert!(!out.ok);
        assert_eq!(out.observation, "错误: 未知工具 'teleport'");
    }

    #[test]
    fn test_calculate_through_executor() {
        let exec = ToolExecutor::new(builtin_registry());
        let ctx = RunContext::new("test");
        assert_eq!(exec.execute(&ctx, "calculate", "2+2").observation, "4");
        let out = exec.execute(&ctx, "calculate", "10/0");
        assert!(!out.ok);
        assert_eq!(out.observation, "错误: 除数不能为零");
        let out = exec.execute(&ctx, "calculate", "__import__('os')");
        assert_eq!(out.observation, "错误: 表达式包含非法字符");
    }

    #[test]
    fn test_events_are_emitted() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = RunContext::new("test").with_events(tx);
        let exec = ToolExecutor::new(builtin_registry());
        exec.execute(&ctx, "query_weather", "北京");
        assert!(matches!(rx.try_recv(), Ok(AgentEvent::ToolCall { ref tool, .. }) if tool == "query_weather"));
        assert!(matches!(rx.try_recv(), Ok(AgentEvent::Observation { .. })));
    }
}
