//! Function Calling 集成测试：原生 tool_calls、XML 与 JSON 文本调用

use std::sync::Arc;

use plan_act::llm::{ChatResponse, ScriptedLlmClient, ToolCall};
use plan_act::memory::Role;
use plan_act::tools::{builtin_registry, ToolExecutor};
use plan_act::FunctionCallingAgent;
use serde_json::json;

fn agent(llm: Arc<ScriptedLlmClient>) -> FunctionCallingAgent {
    FunctionCallingAgent::new(llm, ToolExecutor::new(builtin_registry()))
}

#[tokio::test]
async fn test_parallel_native_calls() {
    let llm = Arc::new(ScriptedLlmClient::new());
    llm.push(ChatResponse::ToolCalls {
        content: String::new(),
        calls: vec![
            ToolCall::new("call_1", "query_weather", json!({"city": "上海"})),
            ToolCall::new("call_2", "calculate", json!({"expression": "25*2"})),
        ],
    });
    llm.push_text("上海晴，温度翻倍是50度。");

    let result = agent(llm.clone()).run("上海天气，温度乘以2是多少").await.unwrap();
    assert_eq!(result.rounds, 2);
    assert_eq!(result.invocations.len(), 2);
    assert_eq!(result.invocations[1].observation, "50");

    let second = &llm.requests()[1];
    let roles: Vec<Role> = second.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::Tool]
    );
    assert_eq!(second.messages[2].tool_calls.len(), 2);
    assert_eq!(second.messages[4].tool_call_id.as_deref(), Some("call_2"));
}

#[tokio::test]
async fn test_xml_calls_in_text() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "<tool_calls>\n<invoke name=\"query_weather\">\n<parameter name=\"city\">北京</parameter>\n</invoke>\n<invoke name=\"get_time\">\n</invoke>\n</tool_calls>",
        "北京晴天，25度。",
    ]));
    let result = agent(llm).run("北京天气和现在时间").await.unwrap();
    assert_eq!(result.answer, "北京晴天，25度。");
    assert_eq!(result.invocations[0].call_id, "call_0");
    assert_eq!(result.invocations[0].input, "北京");
    assert_eq!(result.invocations[1].tool, "get_time");
    assert!(result.invocations.iter().all(|c| c.ok));
}

#[tokio::test]
async fn test_json_call_in_fenced_block() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "```json\n{\"tool\": \"search_web\", \"args\": {\"query\": \"汇率\"}}\n```",
        "美元兑人民币约为1:7.2。",
    ]));
    let result = agent(llm).run("汇率是多少").await.unwrap();
    assert_eq!(result.invocations[0].observation, "美元兑人民币汇率1:7.2");
}

#[tokio::test]
async fn test_unknown_tool_is_reported_back() {
    let llm = Arc::new(ScriptedLlmClient::new());
    llm.push_tool_calls(vec![ToolCall::new("c1", "book_flight", json!({}))]);
    llm.push_text("抱歉，我无法订机票。");

    let result = agent(llm.clone()).run("帮我订机票").await.unwrap();
    assert!(!result.invocations[0].ok);
    let tool_msg = llm.requests()[1].messages.last().cloned().unwrap();
    assert_eq!(tool_msg.content, "错误: 未知工具 'book_flight'");
}
