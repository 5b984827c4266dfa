//! Tallybook desktop shell.
//!
//! Entry point for the desktop application: loads configuration,
//! opens the database, runs pending migrations, and starts the UI
//! event loop. The widget layer subscribes to the same event queue;
//! until it attaches, startup events are rendered to the log.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallybook_app::{DbGateway, EventQueue, JournalEntryGateway, TaskScheduler, UiEvent};
use tallybook_core::listing::EntryFilter;
use tallybook_db::migration::Migrator;
use tallybook_shared::{AppConfig, Outcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tallybook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");
    info!(company = %config.company.name, "Starting Tallybook");

    // Connect to database and bring the schema up to date
    let db = tallybook_db::connect(&config.database.url).await?;
    Migrator::up(&db, None).await?;
    info!("Database ready");

    // Wire the application layer
    let gateway = Arc::new(DbGateway::new(db, config.company.base_currency.clone()));
    let (events, mut queue) = EventQueue::channel();
    let scheduler = TaskScheduler::new(events);

    // Kick off the initial loads the main window shows on open
    let today = chrono::Local::now().date_naive();

    let dashboard_gateway = Arc::clone(&gateway);
    scheduler.spawn("dashboard refresh", async move {
        UiEvent::DashboardLoaded(
            tallybook_app::DashboardGateway::get_dashboard_kpis(&*dashboard_gateway, today).await,
        )
    });

    let listing_gateway = Arc::clone(&gateway);
    scheduler.spawn("listing refresh", async move {
        UiEvent::ListingLoaded(
            listing_gateway
                .list_entries(EntryFilter::default_as_of(today))
                .await,
        )
    });

    // Drive the event loop until the startup loads have landed. The
    // widget layer takes over this loop once it attaches.
    let mut pending = 2;
    while pending > 0 {
        let Some(event) = queue.recv().await else {
            break;
        };
        match event {
            UiEvent::DashboardLoaded(outcome) => {
                pending -= 1;
                match outcome {
                    Outcome::Success(kpi) => {
                        info!(period = %kpi.period_label, "Dashboard snapshot loaded");
                    }
                    Outcome::Failure(errors) => {
                        warn!(?errors, "Dashboard snapshot failed");
                    }
                }
            }
            UiEvent::ListingLoaded(outcome) => {
                pending -= 1;
                match outcome {
                    Outcome::Success(rows) => {
                        info!(rows = rows.len(), "Journal entry listing loaded");
                    }
                    Outcome::Failure(errors) => {
                        warn!(?errors, "Journal entry listing failed");
                    }
                }
            }
            UiEvent::TaskFailed { context, message } => {
                pending -= 1;
                warn!(%context, %message, "Startup task failed");
            }
            other => {
                warn!(event = ?other, "Unexpected event during startup");
            }
        }
    }

    info!("Startup complete");
    Ok(())
}
