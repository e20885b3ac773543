use crate::cli::parser::UserCmd;
use crate::config::Config;
use crate::core::master::reselect_master;
use crate::db::audit::audit;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User, WorkDays};
use crate::ui::messages::{success, warning};
use crate::utils::table::{Column, Table};
use crate::utils::time::now_millis;
use crate::utils::validate::{validate_cpf, validate_email, validate_pin};
use std::io::{BufRead, Write};

pub fn handle(action: &UserCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        UserCmd::Add {
            name,
            email,
            pin,
            cpf,
            daily_hours,
            work_days,
            admin,
        } => add(&mut pool, cfg, name, email, pin, cpf, *daily_hours, work_days, *admin),
        UserCmd::List => list(&pool),
        UserCmd::Edit {
            email,
            name,
            pin,
            cpf,
            daily_hours,
            work_days,
            promote,
            demote,
            verify_email,
        } => edit(
            &mut pool,
            cfg,
            email,
            name,
            pin,
            cpf,
            *daily_hours,
            work_days,
            *promote,
            *demote,
            *verify_email,
        ),
        UserCmd::Del { email, yes } => del(&mut pool, cfg, email, *yes),
    }
}

fn parse_work_days(s: &str) -> AppResult<WorkDays> {
    WorkDays::parse(s).ok_or_else(|| {
        AppError::Config(format!(
            "invalid work-days '{}': use comma-separated ids 0..6",
            s
        ))
    })
}

#[allow(clippy::too_many_arguments)]
fn add(
    pool: &mut DbPool,
    cfg: &Config,
    name: &str,
    email: &str,
    pin: &str,
    cpf: &Option<String>,
    daily_hours: Option<f64>,
    work_days: &Option<String>,
    admin: bool,
) -> AppResult<()> {
    validate_email(email)?;
    validate_pin(pin)?;
    let cpf_digits = match cpf {
        Some(c) => validate_cpf(c)?,
        None => String::new(),
    };

    if users::find_by_email(&pool.conn, email).is_ok() {
        return Err(AppError::DuplicateEmail(email.to_string()));
    }

    let role = if admin { Role::Admin } else { Role::User };
    let mut user = User::new(name, email, &cpf_digits, pin, role);
    user.daily_hours = daily_hours.unwrap_or(cfg.default_daily_hours);
    user.work_days = match work_days {
        Some(s) => parse_work_days(s)?,
        None => parse_work_days(&cfg.default_work_days)?,
    };

    users::insert_user(&pool.conn, &user)?;
    reselect_master(&pool.conn, &cfg.master_email)?;
    audit(&pool.conn, "user_add", email, &format!("created ({})", role.to_db_str()))?;

    success(format!("User {} <{}> created.", name, email));
    Ok(())
}

fn list(pool: &DbPool) -> AppResult<()> {
    let all = users::load_users(&pool.conn)?;
    if all.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("Name", 20),
        Column::new("E-mail", 28),
        Column::new("Role", 6),
        Column::new("Master", 6),
        Column::new("Hours", 5),
        Column::new("Work days", 13),
        Column::new("Pending", 10),
    ]);

    for u in &all {
        table.add_row(vec![
            u.name.clone(),
            u.email.clone(),
            u.role.to_db_str().to_string(),
            if u.is_master { "yes" } else { "" }.to_string(),
            format!("{:.1}", u.daily_hours),
            u.work_days.to_db_str(),
            u.pending_justification
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn edit(
    pool: &mut DbPool,
    cfg: &Config,
    email: &str,
    name: &Option<String>,
    pin: &Option<String>,
    cpf: &Option<String>,
    daily_hours: Option<f64>,
    work_days: &Option<String>,
    promote: bool,
    demote: bool,
    verify_email: bool,
) -> AppResult<()> {
    let mut user = users::find_by_email(&pool.conn, email)?;

    if let Some(n) = name {
        user.name = n.clone();
    }
    if let Some(p) = pin {
        validate_pin(p)?;
        user.pin = p.clone();
    }
    if let Some(c) = cpf {
        user.cpf = validate_cpf(c)?;
    }
    if let Some(h) = daily_hours {
        if h <= 0.0 || h > 24.0 {
            return Err(AppError::Config(format!("daily hours out of range: {}", h)));
        }
        user.daily_hours = h;
    }
    if let Some(w) = work_days {
        user.work_days = parse_work_days(w)?;
    }
    if promote {
        user.role = Role::Admin;
    }
    if demote {
        if user.is_master {
            return Err(AppError::MasterProtected);
        }
        user.role = Role::User;
    }
    if verify_email {
        user.email_verified = true;
    }

    user.updated_at = Some(now_millis());
    users::update_user(&pool.conn, &user)?;
    reselect_master(&pool.conn, &cfg.master_email)?;
    audit(&pool.conn, "user_edit", email, "profile updated")?;

    success(format!("User <{}> updated.", email));
    Ok(())
}

fn del(pool: &mut DbPool, cfg: &Config, email: &str, yes: bool) -> AppResult<()> {
    let user = users::find_by_email(&pool.conn, email)?;

    if user.is_master {
        return Err(AppError::MasterProtected);
    }

    if !yes && !confirm(&format!(
        "Delete user <{}> and ALL their logs, vacations and holidays? [y/N] ",
        email
    ))? {
        warning("Aborted.");
        return Ok(());
    }

    users::delete_user_cascade(&mut pool.conn, &user.id)?;
    reselect_master(&pool.conn, &cfg.master_email)?;
    audit(&pool.conn, "user_del", email, "deleted with cascade")?;

    success(format!("User <{}> deleted.", email));
    Ok(())
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}
