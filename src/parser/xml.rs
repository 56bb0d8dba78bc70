//! XML 风格的工具调用
//!
//! 部分模型（如 Qwen）不走原生 tool_calls，而是在正文里输出：
//! `<tool_calls><invoke name="get_time"><parameter name="tz">UTC</parameter></invoke></tool_calls>`

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::llm::ToolCall;

static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
static INVOKE_RE: OnceLock<Regex> = OnceLock::new();
static PARAM_RE: OnceLock<Regex> = OnceLock::new();

/// 提取所有 `<invoke>`；id 依出现顺序为 call_0、call_1 ...
pub fn parse_xml_tool_calls(content: &str) -> Vec<ToolCall> {
    let block_re =
        BLOCK_RE.get_or_init(|| Regex::new(r"(?s)<tool_calls>(.*?)</tool_calls>").unwrap());
    let invoke_re = INVOKE_RE
        .get_or_init(|| Regex::new(r#"(?s)<invoke name="([^"]+)">(.*?)</invoke>"#).unwrap());
    let param_re = PARAM_RE
        .get_or_init(|| Regex::new(r#"<parameter name="([^"]+)">([^<]*)</parameter>"#).unwrap());

    let mut calls = Vec::new();
    for block in block_re.captures_iter(content) {
        for invoke in invoke_re.captures_iter(&block[1]) {
            let mut args = Map::new();
            for param in param_re.captures_iter(&invoke[2]) {
                args.insert(
                    param[1].to_string(),
                    Value::String(param[2].trim().to_string()),
                );
            }
            calls.push(ToolCall::new(
                format!("call_{}", calls.len()),
                invoke[1].trim(),
                Value::Object(args),
            ));
        }
    }
    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_invoke() {
        let text = r#"好的，我来查询。
<tool_calls>
<invoke name="query_weather">
<parameter name="city">北京</parameter>
</invoke>
</tool_calls>"#;
        let calls = parse_xml_tool_calls(text);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_0");
        assert_eq!(calls[0].name, "query_weather");
        assert_eq!(calls[0].arguments, json!({"city": "北京"}));
    }

    #[test]
    fn test_multiple_invokes_and_empty_params() {
        let text = r#"<tool_calls><invoke name="get_time"></invoke><invoke name="calculate"><parameter name="expression"> 2+2 </parameter></invoke></tool_calls>"#;
        let calls = parse_xml_tool_calls(text);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].arguments, json!({}));
        assert_eq!(calls[1].id, "call_1");
        assert_eq!(calls[1].input_for(Some("expression")), "2+2");
    }

    #[test]
    fn test_no_block() {
        assert!(parse_xml_tool_calls("<invoke name=\"x\"></invoke>").is_empty());
        assert!(parse_xml_tool_calls("普通回答").is_empty());
    }
}
