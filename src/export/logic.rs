use crate::db::pool::DbPool;
use crate::db::ranges::{RangeTable, load_ranges_for_user};
use crate::db::{logs, users};
use crate::errors::{AppError, AppResult};
use crate::export::csv_file::export_csv;
use crate::export::json::export_json;
use crate::export::model::{LABEL_HOLIDAY, LABEL_PAIR, LABEL_VACATION, ReportRow};
use crate::export::ExportFormat;
use crate::models::date_range::DateRange;
use crate::models::punch_log::PunchLog;
use crate::models::user::User;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use crate::utils::time::format_minutes;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the punch report.
    ///
    /// - `range`: `None`, `"all"`, or the period grammar
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `A:B`).
    /// - `email`: restrict to one user; drops the `Usuário` column.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        email: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if path.exists() && !force {
            return Err(AppError::Export(format!(
                "output file already exists (use --force): {}",
                path.display()
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_period(r).map_err(AppError::InvalidDate)?),
        };

        let selected: Vec<User> = match email {
            Some(e) => vec![users::find_by_email(&pool.conn, e)?],
            None => users::load_users(&pool.conn)?,
        };
        let with_user = email.is_none();

        let mut rows = Vec::new();
        for user in &selected {
            let user_logs = logs::load_logs_for_user(&pool.conn, &user.id)?;
            let vacations = load_ranges_for_user(&pool.conn, RangeTable::Vacations, &user.id)?;
            let holidays = load_ranges_for_user(&pool.conn, RangeTable::Holidays, &user.id)?;

            rows.extend(build_rows(
                user, &user_logs, &vacations, &holidays, bounds, with_user,
            ));
        }

        if rows.is_empty() {
            warning("No records found for the selected range.");
            return Ok(());
        }

        rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.usuario.cmp(&b.usuario))
                .then_with(|| a.horario_inicio.cmp(&b.horario_inicio))
        });

        match format {
            ExportFormat::Csv => export_csv(&rows, path, with_user)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(())
    }
}

fn in_bounds(date: NaiveDate, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    match bounds {
        Some((s, e)) => date >= s && date <= e,
        None => true,
    }
}

/// Flatten one user's data into report rows.
pub fn build_rows(
    user: &User,
    user_logs: &[PunchLog],
    vacations: &[DateRange],
    holidays: &[DateRange],
    bounds: Option<(NaiveDate, NaiveDate)>,
    with_user: bool,
) -> Vec<ReportRow> {
    let name = with_user.then(|| user.name.clone());
    let mut rows = Vec::new();

    let mut by_date: BTreeMap<NaiveDate, Vec<PunchLog>> = BTreeMap::new();
    for log in user_logs {
        if in_bounds(log.date, bounds) {
            by_date.entry(log.date).or_default().push(log.clone());
        }
    }

    for (date, mut day_logs) in by_date {
        day_logs.sort_by_key(|l| l.ts);

        // Justified intervals: explicit start/end and duration.
        for log in day_logs.iter().filter(|l| !l.kind.is_punch()) {
            let mut row = ReportRow::new(
                date,
                name.clone(),
                log.justification_kind
                    .map(|k| k.label())
                    .unwrap_or("Justificado"),
            );
            row.horario_inicio = log.time_str();
            row.horario_fim = log.end_time_str().unwrap_or_default();
            let mins = log.justified_minutes();
            if mins > 0 {
                row.duracao = format_minutes(mins);
            }
            rows.push(row);
        }

        // Punches, paired at even-index slots like the aggregator. A valid
        // IN→OUT pair becomes one row with start and duration filled (the
        // end column stays empty); a rejected or incomplete slot becomes
        // bare rows, one per log, with no duration.
        let punches: Vec<&PunchLog> = day_logs.iter().filter(|l| l.kind.is_punch()).collect();
        let mut i = 0;
        while i < punches.len() {
            if i + 1 < punches.len()
                && punches[i].kind.is_in()
                && punches[i + 1].kind.is_out()
            {
                let mut row = ReportRow::new(date, name.clone(), LABEL_PAIR);
                row.horario_inicio = punches[i].time_str();
                row.duracao = format_minutes((punches[i + 1].ts - punches[i].ts) / 60_000);
                rows.push(row);
                i += 2;
            } else {
                let end = (i + 2).min(punches.len());
                for p in &punches[i..end] {
                    let mut row = ReportRow::new(date, name.clone(), LABEL_PAIR);
                    row.horario_inicio = p.time_str();
                    rows.push(row);
                }
                i = end;
            }
        }
    }

    // Synthesized exempt-day rows, one per covered day.
    for (ranges, label) in [(vacations, LABEL_VACATION), (holidays, LABEL_HOLIDAY)] {
        for r in ranges {
            let mut day = r.start_date;
            while day <= r.end_date {
                if in_bounds(day, bounds) {
                    rows.push(ReportRow::new(day, name.clone(), label));
                }
                match day.checked_add_days(Days::new(1)) {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }
    }

    rows
}
