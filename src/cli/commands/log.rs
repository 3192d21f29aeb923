use crate::cli::commands::{ensure_connected, open_helper};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Catalog;
use crate::db::log::read_log;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_operation};

pub fn handle(cmd: &Commands, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let mut base = open_helper(cfg, catalog);
    let entries = base.with_connection(read_log)?;
    ensure_connected(&base)?;
    let entries = entries.unwrap_or_default();

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
    let op_w = entries
        .iter()
        .map(|e| e.operation.len() + e.target.len() + 3)
        .max()
        .unwrap_or(10)
        .min(60);

    println!("📜 Internal log of {catalog}:\n");

    for e in entries {
        let op_target = if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        };
        let padding = " ".repeat(op_w.saturating_sub(op_target.chars().count()));
        let color = color_for_operation(&e.operation);

        // message bodies can be whole SQL statements
        let message: String = e.message.split_whitespace().collect::<Vec<_>>().join(" ");

        println!(
            "{:>id_w$}: {:<date_w$} | {color}{op_target}{RESET}{padding} => {message}",
            e.id,
            e.date,
            id_w = id_w,
            date_w = date_w
        );
    }

    Ok(())
}
