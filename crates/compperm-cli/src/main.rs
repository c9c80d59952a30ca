//! compperm CLI — evaluate component-scoped ticket permissions against a JSON store.

mod resource;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compperm_config::{CliOverrides, CompPermConfig};
use compperm_policy::{Decision, IdentityService, PermissionSet, PolicyEngine};
use compperm_store::JsonStore;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "compperm", version, about = "Component-scoped ticket permissions")]
struct Cli {
    /// Config file (replaces ./.compperm.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON store with tickets, components and users
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Trust cc-listed emails without checking verification
    #[arg(long, global = true)]
    trust_cc_email: bool,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the permission vocabulary, one token per line
    Actions,

    /// Evaluate one permission check
    Check {
        /// Action being checked (e.g. TICKET_VIEW)
        #[arg(long)]
        action: String,

        /// Username performing the action
        #[arg(long, default_value = "anonymous")]
        user: String,

        /// Resource realm
        #[arg(long, default_value = "ticket")]
        realm: String,

        /// Resource id
        #[arg(long)]
        id: Option<String>,

        /// Parent resources, innermost first, as REALM:ID
        #[arg(long = "parent", value_name = "REALM:ID")]
        parents: Vec<String>,

        /// Permissions the user holds
        #[arg(long = "grant", value_name = "TOKEN")]
        grants: Vec<String>,
    },

    /// Hide component options from rendered page data
    Filter {
        /// Template name the data was rendered for
        #[arg(long)]
        template: String,

        /// JSON page data file
        #[arg(long)]
        data: PathBuf,

        /// Permissions the user holds
        #[arg(long = "grant", value_name = "TOKEN")]
        grants: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = CompPermConfig::load(CliOverrides {
        config_file: cli.config,
        store_path: cli.store,
    })
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let engine = build_engine(&config, cli.trust_cc_email)?;

    match cli.command {
        Command::Actions => {
            for action in engine.enumerate_actions() {
                println!("{action}");
            }
        }
        Command::Check {
            action,
            user,
            realm,
            id,
            parents,
            grants,
        } => {
            let resource = resource::build(&realm, id, &parents)?;
            let perm: PermissionSet = grants.into_iter().collect();
            match engine.check_permission(&action, &user, &resource, &perm) {
                Decision::Abstain => println!("abstain"),
                Decision::Deny { reason } => println!("deny: {reason}"),
            }
        }
        Command::Filter {
            template,
            data,
            grants,
        } => {
            let raw = std::fs::read_to_string(&data)
                .with_context(|| format!("Failed to read {}", data.display()))?;
            let mut page: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON in {}", data.display()))?;
            let perm: PermissionSet = grants.into_iter().collect();
            let removed = engine.filter_rendered_data(&template, &mut page, &perm);
            tracing::debug!("Removed {} component entries", removed);
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

fn build_engine(config: &CompPermConfig, trust_cc_email: bool) -> Result<PolicyEngine> {
    let path = config
        .store_path
        .as_ref()
        .context("No store configured (use --store, COMPPERM_STORE or [store] path)")?;
    let store = JsonStore::open(path)
        .with_context(|| format!("Failed to open store {}", path.display()))?;

    let identity: Option<Arc<dyn IdentityService>> = if trust_cc_email {
        None
    } else {
        Some(Arc::new(store.verifier()))
    };

    Ok(PolicyEngine::new(
        config.policy.clone(),
        Arc::new(store),
        identity,
    ))
}
