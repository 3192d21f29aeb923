use crate::cli::commands::{ensure_connected, open_helper};
use crate::cli::parser::{Commands, ProcAction};
use crate::config::Config;
use crate::db::Catalog;
use crate::db::procedures::{define_procedure, describe_parameters, drop_procedure, list_procedures};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config, catalog: Catalog) -> AppResult<()> {
    let Commands::Proc { action } = cmd else {
        return Ok(());
    };

    let mut base = open_helper(cfg, catalog);

    match action {
        ProcAction::Define { name, sql, replace } => {
            let done = base.with_connection(|conn| define_procedure(conn, name, sql, *replace))?;
            ensure_connected(&base)?;
            if done.is_some() {
                success(format!("Procedure {name} stored in {catalog}"));
            }
        }

        ProcAction::Drop { name } => {
            let done = base.with_connection(|conn| drop_procedure(conn, name))?;
            ensure_connected(&base)?;
            if done.is_some() {
                success(format!("Procedure {name} removed from {catalog}"));
            }
        }

        ProcAction::List => {
            let procedures = base.with_connection(list_procedures)?;
            ensure_connected(&base)?;
            let procedures = procedures.unwrap_or_default();

            if procedures.is_empty() {
                info(format!("No procedures defined in {catalog}"));
                return Ok(());
            }

            let name_w = procedures.iter().map(|p| p.name.len()).max().unwrap_or(4).max(4);
            let mut table = Table::new(vec![
                Column {
                    header: "NAME".to_string(),
                    width: name_w,
                },
                Column {
                    header: "PARAMETERS".to_string(),
                    width: 30,
                },
                Column {
                    header: "CREATED".to_string(),
                    width: 25,
                },
            ]);
            for p in &procedures {
                table.add_row(vec![
                    p.name.clone(),
                    p.parameters.join(", "),
                    p.created_at.clone(),
                ]);
            }
            print!("{}", table.render());
        }

        ProcAction::Params { name } => {
            let params = base.with_connection(|conn| describe_parameters(conn, name))?;
            ensure_connected(&base)?;
            let params = params.unwrap_or_default();

            println!("{}", bold(name));
            if params.is_empty() {
                println!("  (no parameters)");
            }
            for (i, p) in params.iter().enumerate() {
                println!("  {}. {p}", i + 1);
            }
        }
    }

    Ok(())
}
