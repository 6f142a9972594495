use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for aerodesk
/// Back office for charter and shared-ownership aircraft operations
#[derive(Parser)]
#[command(
    name = "aerodesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aircraft charter back office: logbooks, cell hours, client portal, receipts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act with only these roles; each must be granted in the config (repeatable)
    #[arg(global = true, long = "role", value_name = "ROLE")]
    pub role: Vec<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration keys with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export logbook legs
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

        #[arg(long, value_name = "REGISTRATION", help = "Only legs of this aircraft")]
        aircraft: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Aircraft records
    Aircraft {
        #[command(subcommand)]
        action: AircraftAction,
    },

    /// Client (co-owner) records
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Crew records
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },

    /// Aerodrome records
    Aerodrome {
        #[command(subcommand)]
        action: AerodromeAction,
    },

    /// Flight logbook: legs, monthly cell totals, closing
    Logbook {
        #[command(subcommand)]
        action: LogbookAction,
    },

    /// Client portal access
    Portal {
        #[command(subcommand)]
        action: PortalAction,
    },

    /// Upcoming birthdays of crew and clients
    Birthdays {
        #[arg(long, conflicts_with = "week", help = "Only birthdays in the current month")]
        month: bool,

        #[arg(long, help = "Only birthdays in the next 7 days")]
        week: bool,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Reference date (default: today)")]
        today: Option<String>,
    },

    /// Receipts
    Receipt {
        #[command(subcommand)]
        action: ReceiptAction,
    },

    /// Internal messages between operators
    Message {
        #[command(subcommand)]
        action: MessageAction,
    },
}

#[derive(Subcommand)]
pub enum AircraftAction {
    /// Register an aircraft
    Add {
        registration: String,

        #[arg(long)]
        model: String,

        #[arg(long, default_value = "")]
        serial: String,

        #[arg(long = "initial-cell", help = "Cell hours at registration (H:MM or decimal)")]
        initial_cell: Option<String>,
    },
    /// List aircraft
    List,
    /// Mark an aircraft inactive (or active again with --on)
    Active {
        registration: String,

        #[arg(long)]
        on: bool,
    },
    /// Delete an aircraft without logbook history
    Del { registration: String },
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Register a client
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, help = "CNPJ or CPF, punctuation optional")]
        cnpj: String,

        #[arg(long, value_name = "REGISTRATION")]
        aircraft: Option<String>,

        #[arg(long, help = "Ownership share in percent")]
        share: Option<f64>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, help = "YYYY-MM-DD, DD/MM/YYYY or DD/MM")]
        birth: Option<String>,
    },
    /// List clients
    List {
        #[arg(long, value_name = "REGISTRATION")]
        aircraft: Option<String>,
    },
    /// Delete a client
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum CrewAction {
    /// Register a crew member
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        canac: String,

        #[arg(long, default_value = "pic", help = "pic, sic, mechanic or dispatcher")]
        function: String,

        #[arg(long, help = "YYYY-MM-DD, DD/MM/YYYY or DD/MM")]
        birth: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Medical certificate expiry")]
        medical: Option<String>,
    },
    /// List crew members
    List,
    /// Delete a crew member
    Del { canac: String },
}

#[derive(Subcommand)]
pub enum AerodromeAction {
    /// Register an aerodrome
    Add {
        icao: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        state: String,
    },
    /// List aerodromes
    List,
    /// Delete an aerodrome
    Del { icao: String },
}

/// Leg fields shared by `logbook add` and `logbook edit`.
#[derive(Args, Debug, Default)]
pub struct LegArgs {
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    #[arg(long = "from", value_name = "ICAO")]
    pub departure: Option<String>,

    #[arg(long = "to", value_name = "ICAO")]
    pub arrival: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Engine start (acionamento)")]
    pub ac: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Takeoff")]
    pub dep: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Landing (pouso)")]
    pub pou: Option<String>,

    #[arg(long, value_name = "HH:MM", help = "Engine cut (corte)")]
    pub cor: Option<String>,

    #[arg(long, value_name = "H:MM", help = "Flight time (default: DEP to POU)")]
    pub flight: Option<String>,

    #[arg(long, value_name = "H:MM")]
    pub night: Option<String>,

    #[arg(long, value_name = "H:MM")]
    pub ifr: Option<String>,

    #[arg(long)]
    pub landings: Option<i32>,

    #[arg(long = "fuel-added")]
    pub fuel_added: Option<f64>,

    #[arg(long = "fuel-remaining")]
    pub fuel_remaining: Option<f64>,

    #[arg(long, value_name = "H:MM", help = "Cell hours delta (default: flight time)")]
    pub cell: Option<String>,

    #[arg(long, value_name = "CANAC")]
    pub pic: Option<String>,

    #[arg(long, value_name = "CANAC")]
    pub sic: Option<String>,

    #[arg(long, value_name = "ID")]
    pub client: Option<i64>,

    #[arg(long = "daily-rate", help = "Leg billed as a daily rate")]
    pub daily_rate: bool,

    #[arg(long, help = "Mark the leg as confirmed")]
    pub confirmed: bool,
}

#[derive(Subcommand)]
pub enum LogbookAction {
    /// Record a leg
    Add {
        #[arg(long, value_name = "REGISTRATION")]
        aircraft: String,

        #[command(flatten)]
        leg: LegArgs,
    },
    /// Change fields of a leg
    Edit {
        id: i64,

        #[command(flatten)]
        leg: LegArgs,
    },
    /// Delete a leg
    Del { id: i64 },
    /// Mark a leg as confirmed
    Confirm { id: i64 },
    /// Show a month of an aircraft logbook
    List {
        #[arg(long, value_name = "REGISTRATION")]
        aircraft: String,

        #[arg(long, short, value_name = "YYYY-MM", help = "Month (default: current)")]
        period: Option<String>,
    },
    /// Close a month (irreversible)
    Close {
        #[arg(long, value_name = "REGISTRATION")]
        aircraft: String,

        #[arg(long, short, value_name = "YYYY-MM")]
        period: String,
    },
    /// Hours by client and pilot for an aircraft
    Summary {
        #[arg(long, value_name = "REGISTRATION")]
        aircraft: String,

        #[arg(long, short)]
        period: Option<String>,
    },
    /// Hours flown by a crew member
    Hours {
        #[arg(long)]
        canac: String,

        #[arg(long, short)]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PortalAction {
    /// Open a portal session with the first 4 CNPJ digits and the registration
    Login {
        #[arg(long, value_name = "DIGITS")]
        cnpj: String,

        #[arg(long)]
        registration: String,
    },
    /// Show who a token belongs to
    Whoami {
        #[arg(long)]
        token: String,
    },
    /// Flights and receipts visible to the session's client
    Summary {
        #[arg(long)]
        token: String,

        #[arg(long, short)]
        period: Option<String>,
    },
    /// Revoke a session
    Logout {
        #[arg(long)]
        token: String,
    },
}

#[derive(Subcommand)]
pub enum ReceiptAction {
    /// Issue a receipt with the next number of its year
    Issue {
        #[arg(long, value_name = "ID", conflicts_with_all = ["payer", "document"])]
        client: Option<i64>,

        #[arg(long, requires = "document")]
        payer: Option<String>,

        #[arg(long, help = "Payer CNPJ or CPF")]
        document: Option<String>,

        #[arg(long, help = "Amount, e.g. 1234,56")]
        amount: String,

        #[arg(long)]
        description: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long, value_name = "FILE", help = "Also write the PDF")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
    /// List receipts
    List {
        #[arg(long, short)]
        period: Option<String>,
    },
    /// Render a stored receipt as PDF
    Pdf {
        /// Receipt number, NNN/YYYY
        number: String,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MessageAction {
    /// Send a message
    Send {
        #[arg(long)]
        to: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long)]
        body: String,
    },
    /// List received messages
    Inbox {
        #[arg(long)]
        unread: bool,
    },
    /// Read a message and mark it as read
    Read { id: i64 },
}
