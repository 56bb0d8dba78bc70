//! plan-act ReAct 演示
//!
//! 入口：初始化日志、加载配置、创建 LLM 客户端，依次回答内置问题。
//! 需要设置所选 provider 的 API Key（默认 DASHSCOPE_API_KEY）。

use anyhow::Context;
use plan_act::config::load_config;
use plan_act::llm::create_llm_from_config;
use plan_act::observability;
use plan_act::tools::{builtin_registry, ToolExecutor};
use plan_act::ReActAgent;

const QUESTIONS: [&str; 2] = [
    "我手上有1万块钱，我能买多少克黄金？",
    "如果我每月定投2000元，一年一共投入多少钱？",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let llm = create_llm_from_config(&cfg.llm).context("Failed to create LLM client")?;

    let agent = ReActAgent::new(llm.clone(), ToolExecutor::new(builtin_registry()))
        .with_max_iterations(cfg.agent.max_iterations)
        .with_preview_chars(cfg.tools.observation_preview_chars);

    for (idx, question) in QUESTIONS.iter().enumerate() {
        println!("\n问题 {}: {}", idx + 1, question);
        let answer = agent
            .run(question)
            .await
            .with_context(|| format!("ReAct run failed: {question}"))?;
        println!("最终答案: {answer}");
    }

    if let Some(history) = agent.last_history() {
        tracing::debug!("最近一次运行记录:\n{}", history.to_json()?);
    }

    let (prompt, completion, total) = llm.token_usage();
    tracing::info!(prompt, completion, total, "token 使用统计");
    Ok(())
}
