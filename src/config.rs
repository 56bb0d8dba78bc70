//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `PLAN_ACT__*` 覆盖（双下划线表示嵌套，如 `PLAN_ACT__LLM__PROVIDER=deepseek`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub llm: LlmSection,
    pub agent: AgentSection,
    pub tools: ToolsSection,
}

/// [app] 段
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppSection {
    pub name: Option<String>,
}

/// [llm] 段：后端选择
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：dashscope / deepseek / openai
    #[serde(default = "default_provider")]
    pub provider: String,
    /// 未设置时使用 provider 的默认模型
    pub model: Option<String>,
    /// 未设置时使用 provider 的默认端点
    pub base_url: Option<String>,
    /// 读取 API Key 的环境变量名；未设置时使用 provider 的默认变量
    pub api_key_env: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            base_url: None,
            api_key_env: None,
        }
    }
}

fn default_provider() -> String {
    "dashscope".to_string()
}

/// [agent] 段：各编排方式的轮数上限
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSection {
    /// ReAct 最大迭代次数
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Function Calling 最大工具往返次数
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

fn default_max_iterations() -> usize {
    5
}

fn default_max_tool_rounds() -> usize {
    5
}

/// [tools] 段
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    /// 日志与事件中 Observation 的预览字符数
    #[serde(default = "default_preview_chars")]
    pub observation_preview_chars: usize,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            observation_preview_chars: default_preview_chars(),
        }
    }
}

fn default_preview_chars() -> usize {
    crate::core::context::DEFAULT_PREVIEW_CHARS
}

/// 从 config 目录加载配置，环境变量 PLAN_ACT__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 PLAN_ACT__*
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("PLAN_ACT")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.provider, "dashscope");
        assert_eq!(cfg.agent.max_iterations, 5);
        assert_eq!(cfg.tools.observation_preview_chars, 200);
    }

    #[test]
    fn test_load_explicit_file_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[llm]\nprovider = \"deepseek\"\nmodel = \"deepseek-chat\"\n\n[agent]\nmax_iterations = 3"
        )
        .unwrap();

        let cfg = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.llm.provider, "deepseek");
        assert_eq!(cfg.llm.model.as_deref(), Some("deepseek-chat"));
        assert_eq!(cfg.agent.max_iterations, 3);
        assert_eq!(cfg.agent.max_tool_rounds, 5);
    }
}
