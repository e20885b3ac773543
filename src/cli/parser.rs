use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rponto
/// Punch-clock CLI: clock in/out, hour bank, absences, and admin tools
#[derive(Parser)]
#[command(
    name = "rponto",
    version = env!("CARGO_PKG_VERSION"),
    about = "A punch-clock CLI: clock in/out, accrue an hour bank, and manage absences with SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum PunchKind {
    In,
    Out,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum JustifyKind {
    Personal,
    Missed,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage users (admin)
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Record a punch; alternates IN/OUT unless --kind is given
    Punch {
        /// User e-mail
        email: String,

        #[arg(long, value_enum, help = "Force the punch kind instead of alternating")]
        kind: Option<PunchKind>,

        #[arg(
            long,
            value_name = "DATETIME",
            help = "Backdate the punch (YYYY-MM-DD HH:MM, admin edit)"
        )]
        at: Option<String>,
    },

    /// Resolve a pending day (or an explicit date) with a justified interval
    Justify {
        /// User e-mail
        email: String,

        #[arg(long, value_name = "DATE", help = "Day to justify (defaults to the pending one)")]
        date: Option<String>,

        #[arg(long, help = "Reason recorded on the justified interval")]
        reason: String,

        #[arg(long, value_enum, default_value = "missed")]
        kind: JustifyKind,
    },

    /// Manage vacation ranges
    Vacation {
        #[command(subcommand)]
        action: RangeCmd,
    },

    /// Manage holiday/recess ranges
    Holiday {
        #[command(subcommand)]
        action: RangeCmd,
    },

    /// Per-day summaries and the bank of hours
    Summary {
        /// User e-mail
        email: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Show the bank-of-hours total for the window")]
        bank: bool,
    },

    /// Edit or delete a recorded punch log (admin)
    Log {
        #[arg(long = "del", value_name = "LOG_ID", help = "Delete a log by id")]
        delete: Option<String>,

        #[arg(long = "edit", value_name = "LOG_ID", help = "Move a log to a new instant")]
        edit: Option<String>,

        #[arg(
            long,
            value_name = "DATETIME",
            requires = "edit",
            help = "New instant (YYYY-MM-DD HH:MM, used with --edit)"
        )]
        at: Option<String>,
    },

    /// Export the punch report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, value_name = "EMAIL", help = "Export a single user (drops the Usuário column)")]
        user: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Exchange snapshots with another installation
    Sync {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write the local snapshot to FILE", conflicts_with = "import")]
        export: bool,

        #[arg(long, help = "Merge FILE into the local database")]
        import: bool,
    },

    /// Print the internal audit trail
    Audit {
        #[arg(long = "print", help = "Print rows from the internal audit table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCmd {
    /// Register a new user
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "4-digit PIN")]
        pin: String,

        #[arg(long, help = "CPF (11 digits, punctuation tolerated)")]
        cpf: Option<String>,

        #[arg(long = "daily-hours", help = "Expected hours per work day")]
        daily_hours: Option<f64>,

        #[arg(
            long = "work-days",
            help = "Comma-separated weekday ids, 0=Sunday .. 6=Saturday"
        )]
        work_days: Option<String>,

        #[arg(long, help = "Create with the admin role")]
        admin: bool,
    },

    /// List all users
    List,

    /// Edit profile or policy fields
    Edit {
        email: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        pin: Option<String>,

        #[arg(long)]
        cpf: Option<String>,

        #[arg(long = "daily-hours")]
        daily_hours: Option<f64>,

        #[arg(long = "work-days")]
        work_days: Option<String>,

        #[arg(long, help = "Grant the admin role", conflicts_with = "demote")]
        promote: bool,

        #[arg(long, help = "Revoke the admin role")]
        demote: bool,

        #[arg(long = "verify-email", help = "Mark the e-mail as verified")]
        verify_email: bool,
    },

    /// Delete a user and every record they own
    Del {
        email: String,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RangeCmd {
    /// Add an inclusive date range
    Add {
        /// Owner e-mail
        email: String,

        #[arg(long, value_name = "DATE")]
        from: String,

        #[arg(long, value_name = "DATE")]
        to: String,
    },

    /// List ranges, optionally for one user
    List {
        email: Option<String>,
    },

    /// Delete a range by id
    Del {
        id: String,
    },
}
