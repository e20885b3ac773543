use crate::cli::parser::RangeCmd;
use crate::config::Config;
use crate::db::audit::audit;
use crate::db::pool::DbPool;
use crate::db::ranges::{RangeTable, delete_range, insert_range, load_all_ranges, load_ranges_for_user};
use crate::db::users::find_by_email;
use crate::errors::{AppError, AppResult};
use crate::models::date_range::DateRange;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};

/// Shared handler for the vacation and holiday subcommands.
pub fn handle(action: &RangeCmd, table: RangeTable, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let label = table.table_name();

    match action {
        RangeCmd::Add { email, from, to } => {
            let user = find_by_email(&pool.conn, email)?;
            let start =
                parse_date(from).ok_or_else(|| AppError::InvalidDate(from.clone()))?;
            let end = parse_date(to).ok_or_else(|| AppError::InvalidDate(to.clone()))?;
            if end < start {
                return Err(AppError::InvalidRange(from.clone(), to.clone()));
            }

            let range = DateRange::new(&user.id, start, end);
            insert_range(&pool.conn, table, &range)?;
            audit(
                &pool.conn,
                "range_add",
                email,
                &format!("{} {} .. {}", label, start, end),
            )?;
            success(format!("Added {} range {} .. {} for <{}>.", label, start, end, email));
        }

        RangeCmd::List { email } => {
            let ranges = match email {
                Some(e) => {
                    let user = find_by_email(&pool.conn, e)?;
                    load_ranges_for_user(&pool.conn, table, &user.id)?
                }
                None => load_all_ranges(&pool.conn, table)?,
            };

            if ranges.is_empty() {
                println!("No {} ranges.", label);
                return Ok(());
            }

            let mut out = Table::new(vec![
                Column::new("Id", 36),
                Column::new("User", 36),
                Column::new("From", 10),
                Column::new("To", 10),
            ]);
            for r in &ranges {
                out.add_row(vec![
                    r.id.clone(),
                    r.user_id.clone(),
                    r.start_date.to_string(),
                    r.end_date.to_string(),
                ]);
            }
            print!("{}", out.render());
        }

        RangeCmd::Del { id } => {
            delete_range(&pool.conn, table, id)?;
            audit(&pool.conn, "range_del", id, label)?;
            success(format!("Deleted {} range {}.", label, id));
        }
    }

    Ok(())
}
