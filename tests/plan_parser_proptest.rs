//! 计划行解析属性测试：渲染再解析保持不变；不合法的行不产生任务

use plan_act::parser::{parse_plan, parse_plan_line};
use plan_act::plan::Task;
use proptest::prelude::*;

/// 已 trim、不含 `|` 与换行的文本
fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 一-龥,.+*/()%]{0,24}".prop_map(|s| s.trim().to_string())
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        any::<u32>(),
        "[A-Za-z0-9_]{1,16}",
        field(),
        field(),
        prop::collection::btree_set(1u32..1000, 0..5),
    )
        .prop_map(|(id, tool, description, input, deps)| {
            Task::new(id, tool, description, input).with_dependencies(deps)
        })
}

/// 不以「编号.」或「编号. [工具]」开头、或缺少 `|` 的行
fn malformed_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z一-龥#*-][^\r\n]{0,30}",
        "[0-9]{1,5}[^.0-9\r\n][^\r\n]{0,30}",
        "[0-9]{1,5}\\. [^\\[\\s][^\r\n]{0,30}",
        "[0-9]{1,5}\\. \\[[a-z_]{1,10}\\] [^|\r\n]{0,30}",
    ]
}

proptest! {
    #[test]
    fn plan_line_round_trips(task in task_strategy()) {
        let line = task.to_plan_line();
        prop_assert_eq!(parse_plan_line(&line), Some(task));
    }

    #[test]
    fn malformed_lines_contribute_no_tasks(lines in prop::collection::vec(malformed_line(), 0..6)) {
        for line in &lines {
            prop_assert!(parse_plan_line(line).is_none(), "{}", line);
        }

        let mut text = lines.join("\n");
        text.push_str("\n1. [calculate] 算 | 1+1\n");
        let tasks = parse_plan(&text);
        prop_assert_eq!(tasks.len(), 1);
        prop_assert_eq!(tasks[0].tool_name.as_str(), "calculate");
    }
}
