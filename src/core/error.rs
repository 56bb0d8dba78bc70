//! Agent 错误类型
//!
//! 只有「致命」错误才会以 AgentError 的形式向上传播（配置缺失、LLM 传输失败等）；
//! 解析失败、工具失败、依赖死锁、步数耗尽都在循环内部降级处理，不会出现在这里。

use thiserror::Error;

use crate::llm::LlmError;

/// 终止整次运行的错误
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AgentError {
    fn from(e: config::ConfigError) -> Self {
        AgentError::Config(e.to_string())
    }
}

/// 工具执行失败的原因；由 ToolExecutor 转为 Observation 文本，不会终止运行
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("表达式包含非法字符")]
    IllegalCharacters,

    #[error("除数不能为零")]
    DivisionByZero,

    #[error("表达式无效: {0}")]
    Evaluation(String),

    #[error("参数无效: {0}")]
    InvalidInput(String),

    #[error("未知工具 '{0}'")]
    UnknownTool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(ToolError::IllegalCharacters.to_string(), "表达式包含非法字符");
        assert_eq!(ToolError::DivisionByZero.to_string(), "除数不能为零");
        assert_eq!(
            ToolError::UnknownTool("fly".to_string()).to_string(),
            "未知工具 'fly'"
        );
    }

    #[test]
    fn test_llm_error_converts() {
        let err: AgentError = LlmError::MissingCredentials("DASHSCOPE_API_KEY".to_string()).into();
        assert!(err.to_string().contains("DASHSCOPE_API_KEY"));
    }
}
