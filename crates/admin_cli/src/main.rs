use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal,
};
use engine::{Engine, MoneyCents, users};
use migration::MigratorTrait;
use sea_orm::{ActiveValue, Database, DatabaseConnection, QueryFilter, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "arcadia_admin")]
#[command(about = "Admin utilities for Arcadia (bootstrap accounts, balances, maintenance)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./arcadia.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Balance(Balance),
    Maintenance(Maintenance),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long, default_value = "admin")]
    role: String,
}

#[derive(Args, Debug)]
struct Balance {
    #[command(subcommand)]
    command: BalanceCommand,
}

#[derive(Subcommand, Debug)]
enum BalanceCommand {
    Set(BalanceSetArgs),
}

#[derive(Args, Debug)]
struct BalanceSetArgs {
    #[arg(long)]
    user_id: i32,
    /// Decimal amount, e.g. "25.00".
    #[arg(long)]
    amount: String,
}

#[derive(Args, Debug)]
struct Maintenance {
    #[command(subcommand)]
    command: MaintenanceCommand,
}

#[derive(Subcommand, Debug)]
enum MaintenanceCommand {
    On,
    Off,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads a password from the terminal without echoing it.
fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    write!(out, "{prompt}")?;
    out.flush()?;

    let _raw = RawModeGuard::enter()?;
    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                write!(out, "\r\n")?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => buf.push(ch),
            _ => {}
        }
    }
    write!(out, "\r\n")?;
    out.flush()?;

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            eprintln!("Password must not be empty.");
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        eprintln!("Passwords do not match. Try again.");
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;

            if users::Entity::find()
                .filter(users::Column::Email.eq(args.email.as_str()))
                .one(&db)
                .await?
                .is_some()
            {
                eprintln!("user already exists: {}", args.email);
                std::process::exit(1);
            }

            let user = users::ActiveModel {
                email: ActiveValue::Set(args.email.clone()),
                password: ActiveValue::Set(password),
                username: ActiveValue::Set(args.username),
                role: ActiveValue::Set(args.role),
                balance_cents: ActiveValue::Set(0),
                is_banned: ActiveValue::Set(false),
                is_verified: ActiveValue::Set(true),
                time_spent_hours: ActiveValue::Set(0),
                ..Default::default()
            }
            .insert(&db)
            .await?;

            println!("created user: {} (id {})", args.email, user.id);
        }
        Command::Balance(Balance {
            command: BalanceCommand::Set(args),
        }) => {
            let amount: MoneyCents = args.amount.parse()?;
            let engine = Engine::builder().database(db).build();
            engine.set_balance(args.user_id, amount).await?;
            println!("balance for user {} set to {amount}", args.user_id);
        }
        Command::Maintenance(Maintenance { command }) => {
            let enabled = matches!(command, MaintenanceCommand::On);
            let engine = Engine::builder().database(db).build();
            engine.set_maintenance(enabled).await?;
            println!(
                "maintenance mode {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }

    Ok(())
}
