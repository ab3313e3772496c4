pub mod launch;
pub mod run;
pub mod select;
pub mod tools;

use lateral_tools::Tool;

/// clap value parser for tool names
pub fn parse_tool(s: &str) -> Result<Tool, String> {
    s.parse::<Tool>().map_err(|e| e.to_string())
}
