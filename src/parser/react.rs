//! ReAct 文本解析
//!
//! 在模型输出中任意位置查找标签（Thought / Action / Observation / Final Answer，大小写不敏感，
//! 冒号可为全角），每种标签取第一次出现的片段，片段延续到下一个标签或文本结尾。
//! 解析永不失败：识别不出的部分只会让对应字段为空。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Thought,
    Action,
    Observation,
    FinalAnswer,
}

const LABELS: [(&str, Label); 4] = [
    ("thought", Label::Thought),
    ("action", Label::Action),
    ("observation", Label::Observation),
    ("final answer", Label::FinalAnswer),
];

/// 解析出的动作：`name(arg)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAction {
    pub name: String,
    pub input: String,
}

/// 一轮模型输出的解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactParse {
    pub thought: String,
    /// Action 标签后的原始文本
    pub action_text: String,
    pub action: Option<ParsedAction>,
    pub final_answer: Option<String>,
}

/// 本轮应走的分支
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactOutcome {
    Final(String),
    Act(ParsedAction),
    ThoughtOnly,
    Unparseable,
}

impl ReactParse {
    pub fn outcome(&self) -> ReactOutcome {
        if let Some(answer) = &self.final_answer {
            return ReactOutcome::Final(answer.clone());
        }
        if let Some(action) = &self.action {
            return ReactOutcome::Act(action.clone());
        }
        if !self.thought.is_empty() {
            return ReactOutcome::ThoughtOnly;
        }
        ReactOutcome::Unparseable
    }
}

/// 位置 `at` 处的标签：返回标签与冒号之后正文的起始偏移。
/// 标签前一个字符不能是 ASCII 字母、数字或下划线，`Thoughtful:`、`Reaction:` 不算标签。
fn label_at(content: &str, at: usize) -> Option<(Label, usize)> {
    let prev = content[..at].chars().next_back();
    if prev.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    LABELS.iter().find_map(|(name, label)| {
        let head = content.get(at..at + name.len())?;
        if !head.eq_ignore_ascii_case(name) {
            return None;
        }
        let rest = &content[at + name.len()..];
        let colon = rest.chars().next().filter(|c| *c == ':' || *c == '：')?;
        Some((*label, at + name.len() + colon.len_utf8()))
    })
}

/// 所有标签出现位置：(标签, 标签起点, 正文起点)
fn scan_labels(content: &str) -> Vec<(Label, usize, usize)> {
    let mut found = Vec::new();
    let mut skip_to = 0;
    for (at, _) in content.char_indices() {
        if at < skip_to {
            continue;
        }
        if let Some((label, body)) = label_at(content, at) {
            found.push((label, at, body));
            skip_to = body;
        }
    }
    found
}

/// 解析一轮 ReAct 输出
pub fn parse_react(content: &str) -> ReactParse {
    let labels = scan_labels(content);

    // 片段从冒号之后延续到下一个标签起点或文本结尾；第一个标签之前的文字不属于任何片段
    let first = |wanted: Label| -> Option<String> {
        let idx = labels.iter().position(|(label, _, _)| *label == wanted)?;
        let body = labels[idx].2;
        let end = labels.get(idx + 1).map_or(content.len(), |next| next.1);
        Some(content[body..end].trim().to_string())
    };

    let action_text = first(Label::Action).unwrap_or_default();
    ReactParse {
        thought: first(Label::Thought).unwrap_or_default(),
        action: parse_action(&action_text),
        action_text,
        final_answer: first(Label::FinalAnswer).filter(|a| !a.is_empty()),
    }
}

/// `name(arg)`：按第一个 `(` 与最后一个 `)` 切分，去掉参数两侧引号
pub fn parse_action(text: &str) -> Option<ParsedAction> {
    let open = text.find('(')?;
    let close = text.rfind(')')?;
    if close < open {
        return None;
    }
    let name = text[..open].trim();
    if name.is_empty() {
        return None;
    }
    let input = text[open + 1..close]
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    Some(ParsedAction {
        name: name.to_string(),
        input,
    })
}
