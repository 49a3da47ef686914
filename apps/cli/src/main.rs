use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, render, Collaborators, DeleteOutcome, EventDetailsController, HttpEventsApi,
    InMemoryEventRegistry, Layout, LoggingNavigator, NoopHost, ToggleOutcome,
};
use shared::domain::{Event, Session, SessionUser, UserId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "venuo", about = "Inspect and act on a venuo event")]
struct Args {
    /// Overrides the configured API host.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the event details view.
    Show {
        #[arg(long)]
        event: PathBuf,
        #[arg(long, value_enum, default_value_t = LayoutArg::Desktop)]
        layout: LayoutArg,
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long)]
        owner: bool,
    },
    /// Join the event, or leave it if already a participant.
    Toggle {
        #[arg(long)]
        event: PathBuf,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        /// Act without an authenticated session.
        #[arg(long)]
        anonymous: bool,
    },
    /// Delete the event.
    Delete {
        #[arg(long)]
        event: PathBuf,
        #[arg(long)]
        owner: bool,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LayoutArg {
    Desktop,
    Mobile,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Desktop => Layout::Desktop,
            LayoutArg::Mobile => Layout::Mobile,
        }
    }
}

fn read_event(path: &PathBuf) -> Result<Option<Event>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read event file '{}'", path.display()))?;
    // A JSON `null` stands for "no event supplied".
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse event file '{}'", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(url) = args.api_base_url {
        settings.api_base_url = client_core::config::normalize_api_base_url(&url)?;
    }
    let api = Arc::new(HttpEventsApi::new(&settings)?);
    let registry = Arc::new(InMemoryEventRegistry::default());
    let navigator = Arc::new(LoggingNavigator::default());
    let collaborators = Collaborators {
        registry: registry.clone(),
        navigator: navigator.clone(),
        host: Arc::new(NoopHost),
    };

    let (event_path, is_owner) = match &args.command {
        Command::Show { event, owner, .. } => (event, *owner),
        Command::Toggle { event, .. } => (event, false),
        Command::Delete { event, owner } => (event, *owner),
    };
    let controller = match EventDetailsController::mount(
        read_event(event_path)?,
        is_owner,
        api,
        collaborators,
        &settings,
    ) {
        Ok(controller) => controller,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    match args.command {
        Command::Show {
            layout, user_id, ..
        } => {
            let session = user_id
                .map(|id| {
                    Session::signed_in(SessionUser {
                        id: UserId(id),
                        user_name: String::new(),
                        user_surname: String::new(),
                    })
                })
                .unwrap_or_default();
            print!("{}", render(&controller.view(&session), layout.into()));
        }
        Command::Toggle {
            user_id,
            first,
            last,
            anonymous,
            ..
        } => {
            let user = SessionUser {
                id: UserId(user_id),
                user_name: first,
                user_surname: last,
            };
            let session = Session {
                is_authenticated: !anonymous,
                user: Some(user),
            };
            match controller.toggle(&session).await {
                ToggleOutcome::Joined => println!("Successfully joined the event!"),
                ToggleOutcome::Left => println!("Successfully left the event!"),
                ToggleOutcome::Refused(reason) => println!("Not sent: {reason:?}"),
                ToggleOutcome::Failed(err) => println!("Failed to update participation: {err}"),
                ToggleOutcome::Stale => println!("View closed before the update landed"),
            }
            print!("{}", render(&controller.view(&session), Layout::Desktop));
        }
        Command::Delete { .. } => match controller.delete().await {
            DeleteOutcome::Deleted => println!(
                "Deleted event {:?}; now at {:?}",
                registry.removed(),
                navigator.visited()
            ),
            DeleteOutcome::Failed(err) => println!("Error deleting event: {err}"),
        },
    }

    Ok(())
}
