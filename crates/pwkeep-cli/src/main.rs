//! `pwkeep` CLI — manage password entries in a remote `/passwords` collection.
//!
//! Every invocation rebuilds the local cache from the backend, performs one
//! operation through `PasswordService`, and renders from the cache.
//! Passwords are shown Base64-encoded unless `--reveal` is given; the
//! encoding is not encryption.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pwkeep_client::{ClientConfig, DEFAULT_BASE_URL, PasswordService};
use pwkeep_core::{EntryDraft, EntryId};

use crate::render::Palette;

// ── CLI structure ────────────────────────────────────────────────────

/// pwkeep — a small client for a remote password collection.
#[derive(Parser)]
#[command(
    name = "pwkeep",
    version,
    about = "pwkeep CLI — list, show, add, edit and delete password entries",
    long_about = None,
    after_help = "Environment variables:\n  \
         PWKEEP_URL            Backend address (default: http://localhost:3000)\n  \
         PWKEEP_TIMEOUT_SECS   Request timeout in seconds (default: 10)\n  \
         PWKEEP_LOG            Log filter, e.g. debug\n\n\
         Examples:\n  \
         pwkeep add --category Work --app GitHub --user alice --password 's3cret'\n  \
         pwkeep list --reveal\n  \
         pwkeep edit 3 --password 'n3w-s3cret'"
)]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "PWKEEP_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "PWKEEP_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Disable colored output.
    #[arg(long, default_value = "false")]
    no_color: bool,

    /// Log requests and cache updates to stderr.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all entries.
    List {
        /// Show decoded passwords instead of the encoded form.
        #[arg(long, default_value = "false")]
        reveal: bool,
    },
    /// Fetch one entry and show it with its decoded password.
    Show {
        /// Entry id.
        id: EntryId,
    },
    /// Create a new entry.
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        app: String,
        #[arg(long = "user")]
        user_name: String,
        #[arg(long)]
        password: String,
    },
    /// Edit an entry. Unspecified fields keep their current values.
    Edit {
        /// Entry id.
        id: EntryId,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        app: Option<String>,
        #[arg(long = "user")]
        user_name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete an entry.
    Delete {
        /// Entry id.
        id: EntryId,
    },
}

// ── Entry point ──────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let palette = Palette::new(!cli.no_color);

    match run(cli, palette).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}{}error:{} {e:#}", palette.red, palette.bold, palette.reset);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pwkeep_client=debug,pwkeep_core=debug,pwkeep=debug")
    } else {
        EnvFilter::try_from_env("PWKEEP_LOG").unwrap_or_else(|_| EnvFilter::new("off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli, p: Palette) -> Result<()> {
    // Reject incomplete drafts before touching the network.
    if let Commands::Add {
        category,
        app,
        user_name,
        password,
    } = &cli.command
    {
        EntryDraft::new(category, app, user_name, password).validate()?;
    }

    let service = PasswordService::connect(ClientConfig {
        base_url: cli.url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    })?;

    match cli.command {
        Commands::List { reveal } => cmd_list(&service, reveal, p).await,
        Commands::Show { id } => cmd_show(&service, id, p).await,
        Commands::Add {
            category,
            app,
            user_name,
            password,
        } => {
            let draft = EntryDraft::new(category, app, user_name, password);
            cmd_add(&service, &draft, p).await
        }
        Commands::Edit {
            id,
            category,
            app,
            user_name,
            password,
        } => {
            let changes = EntryChanges {
                category,
                app,
                user_name,
                password,
            };
            cmd_edit(&service, id, changes, p).await
        }
        Commands::Delete { id } => cmd_delete(&service, id, p).await,
    }
}

// ── Commands ─────────────────────────────────────────────────────────

async fn load(service: &PasswordService) -> Result<()> {
    service
        .load_all()
        .await
        .context("failed to load password entries")
}

async fn cmd_list(service: &PasswordService, reveal: bool, p: Palette) -> Result<()> {
    load(service).await?;
    print!(
        "{}",
        render::entry_list(&service.cache().snapshot(), reveal, p)
    );
    Ok(())
}

async fn cmd_show(service: &PasswordService, id: EntryId, p: Palette) -> Result<()> {
    let entry = service
        .get_one(id)
        .await
        .with_context(|| format!("failed to fetch entry {id}"))?;
    print!("{}", render::entry_detail(&entry, p));
    Ok(())
}

async fn cmd_add(service: &PasswordService, draft: &EntryDraft, p: Palette) -> Result<()> {
    load(service).await?;
    let created = service
        .add(draft)
        .await
        .context("failed to create entry")?;
    println!(
        "{}",
        render::success(&format!("Entry {} created.", created.id), p)
    );
    print!("{}", render::entry_list(&service.cache().snapshot(), false, p));
    Ok(())
}

/// Field overrides for `edit`.
struct EntryChanges {
    category: Option<String>,
    app: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
}

impl EntryChanges {
    fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.app.is_none()
            && self.user_name.is_none()
            && self.password.is_none()
    }

    fn apply(self, draft: &mut EntryDraft) {
        if let Some(v) = self.category {
            draft.category = v;
        }
        if let Some(v) = self.app {
            draft.app = v;
        }
        if let Some(v) = self.user_name {
            draft.user_name = v;
        }
        if let Some(v) = self.password {
            draft.password = v;
        }
    }
}

async fn cmd_edit(
    service: &PasswordService,
    id: EntryId,
    changes: EntryChanges,
    p: Palette,
) -> Result<()> {
    if changes.is_empty() {
        bail!("nothing to change: pass at least one of --category, --app, --user, --password");
    }

    load(service).await?;
    let Some(current) = service.cache().get(id) else {
        bail!("password entry {id} not found");
    };

    let mut draft = current
        .to_draft()
        .with_context(|| format!("stored password of entry {id} cannot be decoded"))?;
    changes.apply(&mut draft);

    service
        .update(id, &draft)
        .await
        .with_context(|| format!("failed to update entry {id}"))?;
    println!("{}", render::success(&format!("Entry {id} updated."), p));
    print!("{}", render::entry_list(&service.cache().snapshot(), false, p));
    Ok(())
}

async fn cmd_delete(service: &PasswordService, id: EntryId, p: Palette) -> Result<()> {
    load(service).await?;
    service
        .delete(id)
        .await
        .with_context(|| format!("failed to delete entry {id}"))?;
    println!("{}", render::success(&format!("Entry {id} deleted."), p));
    print!("{}", render::entry_list(&service.cache().snapshot(), false, p));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_override_only_given_fields() {
        let mut draft = EntryDraft::new("Work", "GitHub", "alice", "old");
        EntryChanges {
            category: None,
            app: None,
            user_name: Some("alice2".to_owned()),
            password: Some("new".to_owned()),
        }
        .apply(&mut draft);
        assert_eq!(draft, EntryDraft::new("Work", "GitHub", "alice2", "new"));
    }

    #[test]
    fn empty_changes_detected() {
        let changes = EntryChanges {
            category: None,
            app: None,
            user_name: None,
            password: None,
        };
        assert!(changes.is_empty());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
