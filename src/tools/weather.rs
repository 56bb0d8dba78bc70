//! 天气与时间工具

use chrono::{Local, NaiveDateTime};

use crate::core::ToolError;
use crate::tools::Tool;

/// query_weather：模拟天气查询
pub struct WeatherTool;

impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "query_weather"
    }

    fn description(&self) -> &str {
        "获取指定城市的天气信息"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("city", "城市名称"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidInput("城市名称不能为空".to_string()));
        }
        Ok(format!("{city}的天气是晴天，温度为25度。"))
    }
}

/// get_time：当前本地时间；测试可固定时钟
#[derive(Default)]
pub struct TimeTool {
    fixed: Option<NaiveDateTime>,
}

impl TimeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(at: NaiveDateTime) -> Self {
        Self { fixed: Some(at) }
    }
}

impl Tool for TimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "获取当前时间，无需参数"
    }

    fn execute(&self, _input: &str) -> Result<String, ToolError> {
        let now = self.fixed.unwrap_or_else(|| Local::now().naive_local());
        Ok(now.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
