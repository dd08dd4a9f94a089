//! `payroll-core` CLI entry-point.
//!
//! Available sub-commands:
//! - `ping`         — open the pool, run `SELECT 1` in a retrying transaction.
//! - `capabilities` — print the payroll capability flags for a role or user.
//! - `set-active`   — activate/deactivate many users in retrying batches.

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use access::{Capabilities, Role, User};
use db::models::UserRow;
use db::repository::{health, users};
use db::DbClient;
use engine::{run_batched, BatchConfig, RetryConfig, RetryingExecutor};

#[derive(Parser)]
#[command(
    name = "payroll-core",
    about = "Transactional core of the payroll service",
    version
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

/// Connection and executor settings shared by every sub-command.
#[derive(Args, Debug)]
struct Settings {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Pool ceiling.
    #[arg(
        long,
        env = "PAYROLL_DB_MAX_CONNECTIONS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    max_connections: u32,

    /// Retries after the first attempt of a transaction.
    #[arg(long, env = "PAYROLL_MAX_RETRIES", default_value_t = 3, global = true)]
    max_retries: u32,

    /// Linear back-off base, in milliseconds.
    #[arg(long, env = "PAYROLL_RETRY_BASE_DELAY_MS", default_value_t = 100, global = true)]
    retry_base_delay_ms: u64,

    /// Items processed concurrently per batch chunk.
    #[arg(
        long,
        env = "PAYROLL_BATCH_SIZE",
        default_value_t = BatchConfig::DEFAULT_BATCH_SIZE,
        global = true
    )]
    batch_size: usize,
}

impl Settings {
    fn retry_config(&self) -> anyhow::Result<RetryConfig> {
        Ok(RetryConfig::new(self.max_retries, self.retry_base_delay_ms)?)
    }

    fn batch_config(&self) -> anyhow::Result<BatchConfig> {
        Ok(BatchConfig::new(self.batch_size)?)
    }

    async fn connect(&self) -> anyhow::Result<DbClient> {
        let url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL (or --database-url) is required for this command")?;
        Ok(DbClient::connect(url, self.max_connections).await?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Check that the database is reachable.
    Ping,
    /// Print capability flags as JSON.
    Capabilities {
        /// Role wire name, e.g. PAYROLL_OFFICER.
        #[arg(long, conflicts_with = "user_id", required_unless_present = "user_id")]
        role: Option<Role>,
        /// Load the user from the database and use their role.
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Set `is_active` on every listed user.
    SetActive {
        #[arg(long, action = ArgAction::Set)]
        active: bool,
        /// User IDs to update.
        #[arg(required = true)]
        ids: Vec<Uuid>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    // Reject bad executor settings before touching the database.
    let retry_config = cli.settings.retry_config()?;
    let batch_config = cli.settings.batch_config()?;

    match cli.command {
        Command::Ping => {
            let client = cli.settings.connect().await?;
            let outcome = RetryingExecutor::new(&client, retry_config)?
                .run(|tx| Box::pin(async move { health::ping(&mut **tx).await }))
                .await;
            client.close().await;
            outcome?;
            info!("Database is reachable");
        }

        Command::Capabilities { role: Some(role), .. } => {
            print_json(&Capabilities::for_role(role))?;
        }

        Command::Capabilities { role: None, user_id } => {
            let user_id = user_id.context("either --role or --user-id is required")?;
            let client = cli.settings.connect().await?;
            let row = RetryingExecutor::new(&client, retry_config)?
                .run(move |tx| Box::pin(async move { users::get_user(&mut **tx, user_id).await }))
                .await;
            client.close().await;

            let user = to_user(row?)?;
            print_json(&Capabilities::for_user(Some(&user)))?;
        }

        Command::SetActive { active, ids } => {
            let client = cli.settings.connect().await?;
            let executor = RetryingExecutor::new(&client, retry_config)?;
            info!("Setting is_active={} on {} users", active, ids.len());

            let rows = run_batched(ids, &batch_config, |id| {
                let executor = &executor;
                async move {
                    executor
                        .run(move |tx| {
                            Box::pin(async move {
                                users::set_user_active(&mut **tx, id, active).await
                            })
                        })
                        .await
                }
            })
            .await;
            client.close().await;

            let updated = rows?
                .into_iter()
                .map(to_user)
                .collect::<Result<Vec<_>, _>>()?;
            info!("Updated {} users", updated.len());
            print_json(&updated)?;
        }
    }

    Ok(())
}

/// Lift a persistence row into the domain user.
fn to_user(row: UserRow) -> anyhow::Result<User> {
    let role: Role = row
        .role
        .parse()
        .with_context(|| format!("user {} has an invalid role", row.id))?;
    Ok(User {
        id: row.id,
        username: row.username,
        email: row.email,
        role,
        is_active: row.is_active,
        employee_id: row.employee_id,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn capabilities_by_role_needs_no_database() {
        let cli = Cli::try_parse_from(["payroll-core", "capabilities", "--role", "payroll-officer"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Command::Capabilities { role: Some(Role::PayrollOfficer), user_id: None }
        ));
    }

    #[test]
    fn capabilities_requires_role_or_user() {
        assert!(Cli::try_parse_from(["payroll-core", "capabilities"]).is_err());
    }

    #[test]
    fn set_active_parses_ids_and_flag() {
        let id = Uuid::new_v4();
        let id_arg = id.to_string();
        let cli = Cli::try_parse_from([
            "payroll-core",
            "--batch-size",
            "4",
            "set-active",
            "--active",
            "false",
            id_arg.as_str(),
        ])
        .expect("parses");

        assert_eq!(cli.settings.batch_size, 4);
        match cli.command {
            Command::SetActive { active, ids } => {
                assert!(!active);
                assert_eq!(ids, vec![id]);
            }
            _ => panic!("expected set-active"),
        }
    }

    #[test]
    fn zero_batch_size_is_rejected_not_defaulted() {
        let cli =
            Cli::try_parse_from(["payroll-core", "--batch-size", "0", "ping"]).expect("parses");
        assert!(cli.settings.batch_config().is_err());
    }

    #[test]
    fn row_with_unknown_role_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "ghost".into(),
            email: "ghost@example.com".into(),
            role: "SUPERUSER".into(),
            is_active: true,
            employee_id: None,
            created_at: Utc::now(),
        };
        assert!(to_user(row).is_err());
    }

    #[test]
    fn row_maps_onto_domain_user() {
        let employee_id = Uuid::new_v4();
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "asmith".into(),
            email: "asmith@example.com".into(),
            role: "HR_OFFICER".into(),
            is_active: false,
            employee_id: Some(employee_id),
            created_at: Utc::now(),
        };
        let user = to_user(row).expect("valid role");
        assert_eq!(user.role, Role::HrOfficer);
        assert!(!user.is_active);
        assert_eq!(user.employee_id, Some(employee_id));
    }
}
