//! 按配置创建 LLM 客户端
//!
//! 支持的后端均为 OpenAI 兼容端点：
//! - dashscope: 通义千问 compatible-mode，默认模型 qwen3-max，Key 取 `DASHSCOPE_API_KEY`
//! - deepseek: 默认模型 deepseek-chat，Key 取 `DEEPSEEK_API_KEY`
//! - openai: 默认模型 gpt-4o-mini，Key 取 `OPENAI_API_KEY`
//!
//! 找不到 API Key 属于致命配置错误，直接返回 Err 终止运行。

use std::sync::Arc;

use crate::config::LlmSection;
use crate::core::AgentError;
use crate::llm::{LlmClient, LlmError, OpenAiClient};

pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

/// 某个后端的默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub base_url: Option<&'static str>,
    pub model: &'static str,
    pub api_key_env: &'static str,
}

/// 根据 provider 名取默认值；未知名字返回 None
pub fn provider_defaults(provider: &str) -> Option<ProviderDefaults> {
    match provider.to_lowercase().as_str() {
        "dashscope" | "qwen" | "tongyi" => Some(ProviderDefaults {
            base_url: Some(DASHSCOPE_BASE_URL),
            model: "qwen3-max",
            api_key_env: "DASHSCOPE_API_KEY",
        }),
        "deepseek" => Some(ProviderDefaults {
            base_url: Some(DEEPSEEK_BASE_URL),
            model: "deepseek-chat",
            api_key_env: "DEEPSEEK_API_KEY",
        }),
        "openai" => Some(ProviderDefaults {
            base_url: None,
            model: "gpt-4o-mini",
            api_key_env: "OPENAI_API_KEY",
        }),
        _ => None,
    }
}

/// 从 [llm] 配置创建客户端；Key 通过 lookup 读取，便于测试注入
pub fn create_llm_with<F>(cfg: &LlmSection, lookup: F) -> Result<OpenAiClient, AgentError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = provider_defaults(&cfg.provider)
        .ok_or_else(|| AgentError::Config(format!("unknown llm provider '{}'", cfg.provider)))?;

    let key_env = cfg.api_key_env.as_deref().unwrap_or(defaults.api_key_env);
    let api_key = lookup(key_env)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| LlmError::MissingCredentials(key_env.to_string()))?;

    let model = cfg.model.as_deref().unwrap_or(defaults.model);
    let base_url = cfg.base_url.as_deref().or(defaults.base_url);

    tracing::info!(provider = %cfg.provider, model, "Using LLM");
    Ok(OpenAiClient::new(base_url, model, &api_key))
}

/// 从 [llm] 配置创建客户端，Key 读取进程环境变量
pub fn create_llm_from_config(cfg: &LlmSection) -> Result<Arc<dyn LlmClient>, AgentError> {
    let client = create_llm_with(cfg, |name| std::env::var(name).ok())?;
    Ok(Arc::new(client))
}
