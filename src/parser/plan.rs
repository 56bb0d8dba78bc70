//! 计划文本解析
//!
//! 行格式：`<编号>. [<工具名>] <任务描述> | <工具输入> [| 依赖: <逗号分隔编号>]`。
//! 逐行扫描，不符合「编号. [工具]」开头的行直接忽略（模型常在列表前后写说明文字）；
//! 依赖中不是数字的片段静默丢弃。

use std::collections::BTreeSet;

use crate::plan::{Task, TaskId};

/// 依赖标记
const DEPEND_MARKER: &str = "依赖";

/// 解析整段计划文本；编号重复的行跳过
pub fn parse_plan(content: &str) -> Vec<Task> {
    let mut tasks: Vec<Task> = Vec::new();
    for line in content.lines() {
        let Some(task) = parse_plan_line(line) else {
            continue;
        };
        if tasks.iter().any(|t| t.id == task.id) {
            tracing::warn!(task_id = task.id, "重复的任务编号，忽略该行");
            continue;
        }
        tasks.push(task);
    }
    tracing::info!("解析到 {} 个任务", tasks.len());
    tasks
}

/// 解析单行；不合法返回 None
pub fn parse_plan_line(line: &str) -> Option<Task> {
    let line = line.trim();

    // <编号>.
    let digits_end = line
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }
    let id: TaskId = line[..digits_end].parse().ok()?;
    let rest = line[digits_end..].strip_prefix('.')?.trim_start();

    // [<工具名>]
    let rest = rest.strip_prefix('[')?;
    let close = rest.find(']')?;
    let tool_name = rest[..close].trim();
    if tool_name.is_empty() || !tool_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let rest = rest[close + 1..].trim();

    // <描述> | <输入> [| 依赖: ...]
    let parts: Vec<&str> = rest.split('|').collect();
    if parts.len() < 2 {
        return None;
    }
    let dependencies = parts
        .get(2)
        .map(|p| parse_dependencies(p))
        .unwrap_or_default();

    Some(Task::new(id, tool_name, parts[0].trim(), parts[1].trim()).with_dependencies(dependencies))
}

/// 从「依赖: 1, 2」片段中取出编号
fn parse_dependencies(fragment: &str) -> BTreeSet<TaskId> {
    let Some(pos) = fragment.find(DEPEND_MARKER) else {
        return BTreeSet::new();
    };
    let after = fragment[pos + DEPEND_MARKER.len()..]
        .trim_start_matches(|c: char| c == ':' || c == '：' || c.is_whitespace());

    // 只取紧随其后的「数字 / 逗号 / 空白」串
    let end = after
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == ',' || *c == '，' || c.is_whitespace()))
        .map(|(i, _)| i)
        .unwrap_or(after.len());

    after[..end]
        .split([',', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|s| s.parse().ok())
        .collect()
}
