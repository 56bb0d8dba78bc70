//! plan-act：Rust 智能体推理内核
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型、运行期上下文（RunContext）、过程事件
//! - **function_calling**: 原生 / XML / JSON 工具调用的 Agent
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Scripted）
//! - **memory**: 单次运行内的对话上下文
//! - **observability**: tracing 订阅器初始化
//! - **parser**: 计划文本、ReAct 文本与文本内工具调用的解析
//! - **plan**: Plan-and-Execute（计划、就绪集调度、Agent）
//! - **prompts**: 系统提示词
//! - **react**: ReAct 主循环与运行记录
//! - **tools**: 工具注册表、执行器与模拟工具

pub mod config;
pub mod core;
pub mod function_calling;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod parser;
pub mod plan;
pub mod prompts;
pub mod react;
pub mod tools;

pub use function_calling::FunctionCallingAgent;
pub use plan::PlanAndExecuteAgent;
pub use react::ReActAgent;
