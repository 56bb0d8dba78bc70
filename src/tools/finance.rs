//! 理财相关工具（模拟数据）

use crate::core::ToolError;
use crate::tools::Tool;

/// query_user_profile
pub struct UserProfileTool;

impl Tool for UserProfileTool {
    fn name(&self) -> &str {
        "query_user_profile"
    }

    fn description(&self) -> &str {
        "查询用户画像（风险偏好、投资期限、可投金额）"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("user_id", "用户 ID"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        tracing::info!(user_id = input, "查询用户画像");
        Ok("风险偏好: 稳健型, 期限: 3-5年, 可投: 10万元".to_string())
    }
}

/// analyze_investment
pub struct InvestmentAnalysisTool;

impl Tool for InvestmentAnalysisTool {
    fn name(&self) -> &str {
        "analyze_investment"
    }

    fn description(&self) -> &str {
        "根据资金与风险偏好给出资产配置建议"
    }

    fn parameter(&self) -> Option<(&str, &str)> {
        Some(("params", "资金规模与风险偏好，如 10万元,稳健"))
    }

    fn execute(&self, input: &str) -> Result<String, ToolError> {
        tracing::info!(params = input, "投资分析");
        Ok("建议: 60%债券+30%混合+10%货币, 预期4-6%".to_string())
    }
}
