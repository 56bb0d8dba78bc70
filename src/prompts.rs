//! 系统提示词
//!
//! 工具清单由 ToolRegistry 渲染后注入，提示词本身不硬编码工具名。

use crate::plan::ExecutionPlan;

/// 未能在轮数上限内得到答案时返回给用户的固定文案
pub const FALLBACK_ANSWER: &str = "抱歉，我无法在限定步骤内回答您的问题。请尝试重新表述或简化问题。";

/// ReAct：要求每轮给出 Thought + Action，或 Final Answer
pub fn react_system_prompt(tool_list: &str) -> String {
    format!(
        r#"# 理财问答助手（ReAct）

你通过「思考 -> 行动 -> 观察」的循环回答用户问题。

可用工具：
{tool_list}

每轮只能选择以下一种格式回复：

格式一（需要调用工具）：
Thought: 你对当前问题的推理
Action: 工具名(参数)

格式二（信息已足够）：
Final Answer: 给用户的最终回答

规则：
1. 每轮最多一个 Action，参数写在括号内，不要加多余说明
2. 不要自己编写 Observation，系统会在下一条消息中返回工具结果
3. 信息足够后立即给出 Final Answer

示例：
用户: 我有1万元，能买多少克黄金？
Thought: 先查询当前金价
Action: search_web(黄金价格)
（系统返回 Observation: 当前黄金价格约为1159元/克）
Thought: 用 10000 除以单价
Action: calculate(10000/1159)
（系统返回 Observation: 8.628127696289905）
Final Answer: 按约1159元/克计算，1万元大约可以买8.63克黄金。"#
    )
}

/// Plan-and-Execute：规划阶段
pub fn planner_system_prompt(tool_list: &str) -> String {
    format!(
        r#"你是任务规划助手，负责把用户的问题拆成可以直接调用工具完成的子任务。

可用工具：
{tool_list}

每个子任务占一行，格式：
编号. [工具名] 任务描述 | 工具参数 | 依赖: 前置任务编号（逗号分隔，可省略）

要求：
1. 编号从 1 开始递增，只输出计划行
2. 依赖的任务必须先于当前任务出现
3. 参数中可以用 {{{{task_N}}}} 引用第 N 个任务的结果

示例：
1. [query_user_profile] 查询用户风险偏好 | user_001
2. [search_market_data] 查询理财产品收益 | 理财
3. [analyze_investment] 给出配置建议 | 10万元,稳健 | 依赖: 1,2
4. [calculate] 计算预期年收益 | 100000*0.05 | 依赖: 3"#
    )
}

/// Plan-and-Execute：综合阶段的 system prompt
pub const SYNTHESIS_SYSTEM_PROMPT: &str =
    "根据任务执行结果为用户生成清晰完整的答案。要求：直接回答问题，综合各项结果，语言简洁。";

/// 综合阶段的 user 消息：目标 + 已完成任务的结果（失败或未执行的任务不列出）
pub fn synthesis_context(plan: &ExecutionPlan) -> String {
    let mut context = format!("问题: {}\n\n结果:\n", plan.goal);
    for task in plan.completed() {
        context.push_str(&format!(
            "- {}: {}\n",
            task.description,
            task.result.as_deref().unwrap_or_default()
        ));
    }
    context
}

/// Function Calling：原生工具调用，或以 XML / JSON 文本给出调用
pub fn function_calling_system_prompt(tool_list: &str, call_schema: &str) -> String {
    format!(
        r#"你是一个可以调用工具的助手。需要外部信息时调用工具，拿到结果后用自然语言回答用户。

可用工具：
{tool_list}

如果无法使用原生工具调用，请在回复中输出以下任一格式：
<tool_calls><invoke name="工具名"><parameter name="参数名">参数值</parameter></invoke></tool_calls>
或符合下面 JSON Schema 的对象：
{call_schema}"#
    )
}
