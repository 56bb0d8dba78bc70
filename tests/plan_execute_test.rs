//! Plan-and-Execute 端到端测试（Scripted LLM + 内置模拟工具）

use std::sync::Arc;

use plan_act::core::{AgentEvent, RunContext};
use plan_act::llm::ScriptedLlmClient;
use plan_act::plan::{StopReason, TaskStatus};
use plan_act::tools::{builtin_registry, ToolExecutor};
use plan_act::PlanAndExecuteAgent;

fn agent(llm: Arc<ScriptedLlmClient>) -> PlanAndExecuteAgent {
    PlanAndExecuteAgent::new(llm, ToolExecutor::new(builtin_registry()))
}

#[tokio::test]
async fn test_weather_then_percentage() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "计划如下：\n\
         1. [query_weather] 查询北京天气 | 北京\n\
         2. [calculate] 计算温度占30度的百分比 | 25*100/30 | 依赖: 1",
        "北京晴，25度，约为30度的83%。",
    ]));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let ctx = RunContext::new("plan_execute").with_events(tx);

    let result = agent(llm.clone()).run_with(&ctx, "北京天气如何，温度是30度的百分之几？").await.unwrap();
    drop(ctx);

    assert_eq!(result.answer, "北京晴，25度，约为30度的83%。");
    assert_eq!(result.report.stop, StopReason::AllTerminal);
    assert_eq!(result.report.executed, vec![1, 2]);
    assert!(result.plan.tasks.iter().all(|t| t.status == TaskStatus::Completed));
    assert_eq!(
        result.plan.tasks[0].result.as_deref(),
        Some("北京的天气是晴天，温度为25度。")
    );
    assert!(result.plan.tasks[1].result.as_deref().unwrap().starts_with("83.33"));

    // 综合请求包含目标与两个任务的结果
    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    let synthesis = &requests[1].messages[1].content;
    assert!(synthesis.starts_with("问题: 北京天气如何"));
    assert!(synthesis.contains("- 查询北京天气: 北京的天气是晴天，温度为25度。"));
    assert!(synthesis.contains("- 计算温度占30度的百分比: 83.33"));

    // 任务 2 在任务 1 完成后才开始执行
    let mut transitions = Vec::new();
    while let Some(ev) = rx.recv().await {
        if let AgentEvent::TaskStatusChanged { task_id, status } = ev {
            transitions.push((task_id, status));
        }
    }
    assert_eq!(
        transitions,
        vec![
            (1, TaskStatus::Executing),
            (1, TaskStatus::Completed),
            (2, TaskStatus::Executing),
            (2, TaskStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn test_dependent_listed_first_waits_for_next_round() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "1. [calculate] 百分比 | {{task_2}}*100/30 | 依赖: 2\n2. [calculate] 温度 | 20+5",
        "done",
    ]));
    let result = agent(llm).run("x").await.unwrap();
    assert_eq!(result.report.executed, vec![2, 1]);
    assert_eq!(result.report.rounds, 2);
    assert!(result.plan.tasks[0].result.as_deref().unwrap().starts_with("83.33"));
}

#[tokio::test]
async fn test_failed_task_is_left_out_of_synthesis() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "1. [query_user_profile] 查询画像 | user_001\n\
         2. [calculate] 错误计算 | 1/0\n\
         3. [analyze_investment] 分析 | 10万元,稳健 | 依赖: 1,2",
        "只拿到了部分结果",
    ]));
    let result = agent(llm.clone()).run("给我投资建议").await.unwrap();

    assert_eq!(result.report.stop, StopReason::NoProgress);
    assert_eq!(result.plan.tasks[1].status, TaskStatus::Failed);
    assert_eq!(result.plan.tasks[2].status, TaskStatus::Pending);
    assert_eq!(result.report.pending, vec![3]);

    let synthesis = &llm.requests()[1].messages[1].content;
    assert!(synthesis.contains("- 查询画像: 风险偏好"));
    assert!(!synthesis.contains("错误计算"));
    assert!(!synthesis.contains("分析"));
}

#[tokio::test]
async fn test_dependency_cycle_emits_deadlock() {
    let llm = Arc::new(ScriptedLlmClient::from_texts([
        "1. [calculate] a | 1+1 | 依赖: 2\n2. [calculate] b | 2+2 | 依赖: 1\n3. [get_time] 时间 | ",
        "部分完成",
    ]));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let ctx = RunContext::new("plan_execute").with_events(tx);
    let result = agent(llm).run_with(&ctx, "x").await.unwrap();
    drop(ctx);

    assert_eq!(result.report.completed.len(), 1);
    assert_eq!(result.report.pending, vec![1, 2]);

    let mut deadlock = None;
    while let Some(ev) = rx.recv().await {
        if let AgentEvent::Deadlock { pending } = ev {
            deadlock = Some(pending);
        }
    }
    assert_eq!(deadlock, Some(vec![1, 2]));
}
