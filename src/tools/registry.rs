//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameter / execute），由 ToolRegistry 按名注册与查找，
//! ToolExecutor 在调用时统一把失败转为 Observation 文本。

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::ToolError;

/// 工具 trait：同步、字符串进字符串出
pub trait Tool: Send + Sync {
    /// 工具名称（Action / tool_calls 中使用的名字）
    fn name(&self) -> &str;

    /// 工具描述（供 LLM 理解功能）
    fn description(&self) -> &str;

    /// 唯一参数的 (名称, 描述)；无参数工具返回 None
    fn parameter(&self) -> Option<(&str, &str)> {
        None
    }

    /// 参数 JSON Schema，默认由 parameter() 生成
    fn parameters_schema(&self) -> Value {
        match self.parameter() {
            Some((name, desc)) => json!({
                "type": "object",
                "properties": {
                    name: { "type": "string", "description": desc }
                },
                "required": [name]
            }),
            None => json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    fn execute(&self, input: &str) -> Result<String, ToolError>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，构造 Agent 时确定，运行期只读
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册工具；同名工具后注册者覆盖先注册者
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn execute(&self, name: &str, input: &str) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.execute(input)
    }

    /// 按名称排序的工具名
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// 「可用工具」段落：`1. name(param): description`
    pub fn render_tool_list(&self) -> String {
        self.tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .enumerate()
            .map(|(i, tool)| {
                let param = tool.parameter().map(|(p, _)| p).unwrap_or("");
                format!("{}. {}({}): {}", i + 1, tool.name(), param, tool.description())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// OpenAI 风格的 function schema 列表，用于原生工具调用
    pub fn schemas(&self) -> Vec<Value> {
        self.tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema()
                    }
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Tool for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercase text"
        }

        fn parameter(&self) -> Option<(&str, &str)> {
            Some(("text", "text to convert"))
        }

        fn execute(&self, input: &str) -> Result<String, ToolError> {
            Ok(input.to_uppercase())
        }
    }

    #[test]
    fn test_register_and_execute() {
        let mut reg = ToolRegistry::new();
        reg.register(Upper);
        assert!(reg.contains("upper"));
        assert_eq!(reg.execute("upper", "abc").unwrap(), "ABC");
    }

    #[test]
    fn test_unknown_tool() {
        let reg = ToolRegistry::new();
        assert_eq!(
            reg.execute("fly", "x"),
            Err(ToolError::UnknownTool("fly".to_string()))
        );
    }

    #[test]
    fn test_schemas_describe_parameter() {
        let mut reg = ToolRegistry::new();
        reg.register(Upper);
        let schemas = reg.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["function"]["name"], "upper");
        assert_eq!(
            schemas[0]["function"]["parameters"]["required"][0],
            "text"
        );
    }

    #[test]
    fn test_render_tool_list() {
        let mut reg = ToolRegistry::new();
        reg.register(Upper);
        assert_eq!(reg.render_tool_list(), "1. upper(text): Uppercase text");
    }
}
