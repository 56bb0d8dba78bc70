//! ReAct 运行记录

use serde::{Deserialize, Serialize};

use crate::parser::ReactParse;

/// 一轮迭代的记录：创建后只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReActStep {
    /// 从 1 计数
    pub round: usize,
    pub thought: String,
    /// Action 标签后的原文
    pub action: String,
    pub action_name: Option<String>,
    pub action_input: Option<String>,
    pub observation: Option<String>,
    pub final_answer: Option<String>,
}

impl ReActStep {
    pub fn from_parse(round: usize, parsed: &ReactParse) -> Self {
        Self {
            round,
            thought: parsed.thought.clone(),
            action: parsed.action_text.clone(),
            action_name: parsed.action.as_ref().map(|a| a.name.clone()),
            action_input: parsed.action.as_ref().map(|a| a.input.clone()),
            observation: None,
            final_answer: parsed.final_answer.clone(),
        }
    }
}

/// 运行结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// 得到 Final Answer
    Answered,
    /// 模型输出既无动作也无思考
    NoAction,
    /// 用完最大迭代次数
    BudgetExhausted,
}

/// 单次 run 的完整历史
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHistory {
    pub run_id: String,
    pub question: String,
    pub steps: Vec<ReActStep>,
    pub outcome: RunOutcome,
}

impl RunHistory {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
