use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::audit::load_audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Color per operation kind, mirroring the mutation surface.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "punch" => Colour::Green,
        "justify" => Colour::Cyan,
        "user_add" | "user_edit" => Colour::Yellow,
        "user_del" | "log_del" | "range_del" => Colour::Red,
        "range_add" => Colour::Blue,
        "sync" => Colour::Purple,
        "pending_justification" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audit { print } = cmd {
        if !print {
            return Ok(());
        }

        let pool = DbPool::new(&cfg.database)?;
        let entries = load_audit(&pool.conn)?;

        if entries.is_empty() {
            println!("Audit trail is empty.");
            return Ok(());
        }

        println!("📜 Audit trail:\n");
        for (id, date, operation, target, message) in entries {
            let colored = color_for_operation(&operation).paint(operation.as_str());
            if target.is_empty() {
                println!("{:>5}: {} | {} => {}", id, date, colored, message);
            } else {
                println!("{:>5}: {} | {} ({}) => {}", id, date, colored, target, message);
            }
        }
    }

    Ok(())
}
