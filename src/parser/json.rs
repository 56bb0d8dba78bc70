//! JSON 文本内的工具调用
//!
//! 取 ```json 代码块，否则取最外层 `{...}`；接受两种形状：
//! `{"tool": "...", "args": {...}}` 与 `{"tool_calls": [{"name": "...", "arguments": {...}}]}`。
//! 解析失败不报错，只返回空列表，调用方把原文当作最终回答。

use serde::Deserialize;
use serde_json::Value;

use crate::llm::ToolCall;

#[derive(Deserialize)]
struct SingleCall {
    tool: String,
    #[serde(default)]
    args: Value,
}

#[derive(Deserialize)]
struct CallEntry {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Deserialize)]
struct CallList {
    tool_calls: Vec<CallEntry>,
}

/// 从文本中切出 JSON 片段
fn extract_json_block(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        return Some(rest.find("```").map(|end| rest[..end].trim()).unwrap_or(rest.trim()));
    }
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}

/// 部分模型把 arguments 写成 JSON 字符串，这里展开
fn normalize_arguments(arguments: Value) -> Value {
    match arguments {
        Value::String(s) => serde_json::from_str::<Value>(&s)
            .ok()
            .filter(Value::is_object)
            .unwrap_or(Value::String(s)),
        other => other,
    }
}

pub fn parse_json_tool_calls(content: &str) -> Vec<ToolCall> {
    let Some(json_str) = extract_json_block(content) else {
        return Vec::new();
    };

    if let Ok(list) = serde_json::from_str::<CallList>(json_str) {
        return list
            .tool_calls
            .into_iter()
            .filter(|c| !c.name.is_empty())
            .enumerate()
            .map(|(i, c)| {
                ToolCall::new(format!("call_{i}"), c.name, normalize_arguments(c.arguments))
            })
            .collect();
    }

    match serde_json::from_str::<SingleCall>(json_str) {
        Ok(call) if !call.tool.is_empty() => vec![ToolCall::new(
            "call_0",
            call.tool,
            normalize_arguments(call.args),
        )],
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::debug!("文本中未识别到 JSON 工具调用: {}", e);
            Vec::new()
        }
    }
}
