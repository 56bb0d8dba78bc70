//! 模型输出解析：计划文本、ReAct 文本、文本内工具调用（XML / JSON）
//!
//! 所有解析器都是纯函数，不会失败，格式不合法时返回空结果。

pub mod json;
pub mod plan;
pub mod react;
pub mod xml;

pub use json::parse_json_tool_calls;
pub use plan::{parse_plan, parse_plan_line};
pub use react::{parse_action, parse_react, ParsedAction, ReactOutcome, ReactParse};
pub use xml::parse_xml_tool_calls;

use crate::llm::ToolCall;

/// 原生 tool_calls 缺失时，从正文恢复工具调用：先 XML，再 JSON
pub fn extract_tool_calls(content: &str) -> Vec<ToolCall> {
    let calls = parse_xml_tool_calls(content);
    if !calls.is_empty() {
        return calls;
    }
    parse_json_tool_calls(content)
}
