pub mod calculator;
pub mod executor;
pub mod finance;
pub mod registry;
pub mod schema;
pub mod search;
pub mod weather;

pub use calculator::CalculatorTool;
pub use executor::{ToolExecutor, ToolOutcome};
pub use finance::{InvestmentAnalysisTool, UserProfileTool};
pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;
pub use search::{MarketDataTool, SearchWebTool};
pub use weather::{TimeTool, WeatherTool};

/// 内置的全部模拟工具
pub fn builtin_registry() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(CalculatorTool);
    tools.register(SearchWebTool::new());
    tools.register(MarketDataTool);
    tools.register(WeatherTool);
    tools.register(TimeTool::new());
    tools.register(UserProfileTool);
    tools.register(InvestmentAnalysisTool);
    tools
}
