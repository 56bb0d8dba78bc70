//! 搜索类工具（模拟数据源，结果确定）

use crate::core::ToolError;
use crate::tools::Tool;

/// search_web：按关键词命中内置的财经资讯
pub struct SearchWebTool {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for SearchWebTool {
    fn default() -> Self {
        Self {
            entries: vec![
                (
                    "黄金",
                    "根据最新市场数据，今日黄金价格约为1159元/克（24K金），投资金条价格约为1080元/克。",
                ),
                (
                    "gold",
                    "Current gold price is approximately $65 per gram (24K), investment gold bars around $63 per gram.",
                ),
                ("股票", "A股今日上涨，上证指数涨幅0.5%"),
                ("汇率", "美元兑人民币汇率1:7.2"),
            ],
        }
    }
}

impl SearchWebTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "搜索最新的财经信息和市场数据"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("query", "搜索关键词，如「黄金价格」「股票行情」"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        tracing::info!(query = input, "执行搜索");
        let query = input.to_lowercase();
        let hit = self
            .entries
            .iter()
            .find(|(key, _)| query.contains(key))
            .map(|(_, value)| value.to_string());
        Ok(hit.unwrap_or_else(|| format!("未找到关于'{input}'的相关信息，建议尝试其他关键词。")))
    }
}

/// search_market_data：股票指数、基金与理财收益
pub struct MarketDataTool;

impl Tool for MarketDataTool {
    fn name(&self) -> &str {
        "search_market_data"
    }

    fn description(&self) -> &str {
        "搜索市场数据（股票指数、基金、理财收益）"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("query", "查询内容"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        tracing::info!(query = input, "搜索市场数据");
        let result = if input.contains("股票") || input.contains("指数") {
            "沪深300: 3850点, 上证: 3100点".to_string()
        } else if input.contains("基金") {
            "货币2-3%, 债券3.5-5%, 混合5-8%".to_string()
        } else if input.contains("理财") || input.contains("稳健") {
            "理财3-4%, 国债2.5-3%".to_string()
        } else {
            format!("未找到'{input}'数据")
        };
        Ok(result)
    }
}
