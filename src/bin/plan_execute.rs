//! plan-act Plan-and-Execute 演示
//!
//! 启动: cargo run --bin plan-act-execute

use anyhow::Context;
use plan_act::config::load_config;
use plan_act::llm::create_llm_from_config;
use plan_act::observability;
use plan_act::tools::{builtin_registry, ToolExecutor};
use plan_act::PlanAndExecuteAgent;

const GOALS: [&str; 1] = ["我有10万元，想做稳健投资，帮我制定一个投资方案"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let llm = create_llm_from_config(&cfg.llm).context("Failed to create LLM client")?;

    let agent = PlanAndExecuteAgent::new(llm.clone(), ToolExecutor::new(builtin_registry()))
        .with_preview_chars(cfg.tools.observation_preview_chars);

    for goal in GOALS {
        println!("\n目标: {goal}");
        let result = agent
            .run(goal)
            .await
            .with_context(|| format!("Plan-and-Execute run failed: {goal}"))?;
        println!("执行计划:\n{}", result.plan.to_plan_text());
        for task in &result.plan.tasks {
            println!("  {task}");
        }
        println!("最终答案:\n{}", result.answer);
    }

    let (prompt, completion, total) = llm.token_usage();
    tracing::info!(prompt, completion, total, "token 使用统计");
    Ok(())
}
