use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregator::build_day_summaries;
use crate::core::bank::bank_minutes;
use crate::db::pool::DbPool;
use crate::db::ranges::{RangeTable, load_ranges_for_user};
use crate::db::{logs, users};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::notice;
use crate::utils::date::{parse_period, weekday_short};
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minutes;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        email,
        period,
        bank,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let user = users::find_by_email(&pool.conn, email)?;

        let mut user_logs = logs::load_logs_for_user(&pool.conn, &user.id)?;
        if let Some(p) = period {
            let (start, end) = parse_period(p).map_err(AppError::InvalidDate)?;
            user_logs.retain(|l| l.date >= start && l.date <= end);
        }

        let vacations = load_ranges_for_user(&pool.conn, RangeTable::Vacations, &user.id)?;
        let holidays = load_ranges_for_user(&pool.conn, RangeTable::Holidays, &user.id)?;

        let summaries =
            build_day_summaries(&user_logs, &vacations, &holidays, user.daily_minutes());

        if summaries.is_empty() {
            println!("No logs for <{}> in the selected window.", email);
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Date", 10),
            Column::new("Day", 3),
            Column::new("Logs", 4),
            Column::new("Worked", 6),
            Column::new("Expected", 8),
            Column::new("Goal", 4),
        ]);

        for s in &summaries {
            table.add_row(vec![
                s.date.to_string(),
                weekday_short(s.date).to_string(),
                s.logs.len().to_string(),
                format_minutes(s.total_minutes),
                format_minutes(s.expected_minutes),
                if s.goal_met { "✓" } else { "✗" }.to_string(),
            ]);
        }

        println!("Summary for {} <{}>:\n", user.name, email);
        print!("{}", table.render());

        if *bank {
            let total = bank_minutes(&summaries);
            println!("\nBank of hours: {}", mins2readable(total, true, false));

            // One-shot overwork notice: fires once per user, then the
            // flag stays set forever.
            if total >= cfg.overwork_notice_minutes && !user.relax_notice {
                notice(format!(
                    "{} is overworking: bank is at {}. Consider some rest.",
                    user.name,
                    mins2readable(total, true, true)
                ));
                users::set_relax_notice(&pool.conn, &user.id)?;
            }
        }
    }

    Ok(())
}
