//! 文本内工具调用格式的 JSON Schema（schemars 自动生成）
//!
//! 端点不支持原生 tool_calls 时，把这段 schema 拼入 system prompt，让模型以 JSON 文本给出调用。

use schemars::{schema_for, JsonSchema};
use std::collections::HashMap;

/// 工具调用请求格式：与 parser::json 解析的 `{"tool": "...", "args": {...}}` 一致（仅用于 Schema 生成）
#[allow(dead_code)]
#[derive(JsonSchema)]
struct ToolCallFormat {
    /// 工具名，如 query_weather、calculate、get_time
    pub tool: String,
    /// 工具参数，如 {"city": "北京"}
    pub args: HashMap<String, String>,
}

/// 返回工具调用的 JSON Schema 字符串，可拼入 system prompt
pub fn tool_call_schema_json() -> String {
    let schema = schema_for!(ToolCallFormat);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
