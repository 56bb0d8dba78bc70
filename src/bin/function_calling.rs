//! plan-act Function Calling 演示
//!
//! 启动: cargo run --bin plan-act-fc

use anyhow::Context;
use plan_act::config::load_config;
use plan_act::llm::create_llm_from_config;
use plan_act::observability;
use plan_act::tools::{builtin_registry, ToolExecutor};
use plan_act::FunctionCallingAgent;

const QUESTIONS: [&str; 2] = ["北京今天天气怎么样？", "现在几点了？"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let llm = create_llm_from_config(&cfg.llm).context("Failed to create LLM client")?;

    let agent = FunctionCallingAgent::new(llm.clone(), ToolExecutor::new(builtin_registry()))
        .with_max_tool_rounds(cfg.agent.max_tool_rounds)
        .with_preview_chars(cfg.tools.observation_preview_chars);

    for question in QUESTIONS {
        println!("\n用户: {question}");
        let result = agent
            .run(question)
            .await
            .with_context(|| format!("Function calling run failed: {question}"))?;
        for call in &result.invocations {
            println!("  [{}] {}({}) -> {}", call.call_id, call.tool, call.input, call.observation);
        }
        println!("助手: {}", result.answer);
    }

    let (prompt, completion, total) = llm.token_usage();
    tracing::info!(prompt, completion, total, "token 使用统计");
    Ok(())
}
