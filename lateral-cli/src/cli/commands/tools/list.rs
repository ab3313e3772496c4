use crate::cli::output::*;
use clap::Args;
use comfy_table::{Cell, Color, Table};
use lateral_core::lateral_tools_dir;
use lateral_tools::types::find_binary;
use lateral_tools::Tool;
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// Root directory of tool installations (defaults to $LATERAL_TOOLS_DIR)
    #[arg(long)]
    pub tools_dir: Option<PathBuf>,
}

pub fn run(args: ListArgs) -> anyhow::Result<()> {
    section_header("External HGT-detection tools");

    let install_dir = args.tools_dir.unwrap_or_else(lateral_tools_dir);

    let mut table = Table::new();
    table.set_header(vec!["Tool", "Binary", "Status", "Path"]);

    let mut missing = 0;
    for tool in Tool::all() {
        let resolved = find_binary(Some(&install_dir), tool, tool.binary_name());
        let (status, path) = match &resolved {
            Some(path) => (
                Cell::new("available").fg(Color::Green),
                path.display().to_string(),
            ),
            None => {
                missing += 1;
                (Cell::new("missing").fg(Color::Red), String::new())
            }
        };
        table.add_row(vec![
            Cell::new(tool.display_name()),
            Cell::new(tool.binary_name()),
            status,
            Cell::new(path),
        ]);
    }

    println!("{table}");
    if missing > 0 {
        info(&format!(
            "{missing} tool(s) unresolved; searched {} and PATH",
            install_dir.display()
        ));
    }
    Ok(())
}
