//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration, Types and Errors
//! - Infrastructure: Matrix, Modlist Feed
//! - Application: Registry, Reconciler, Access Control, Router
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::application::access::AccessController;
use crate::application::reconciler::ReleaseReconciler;
use crate::application::registry::ModlistRegistry;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::feed::HttpFeedFetcher;
use crate::infrastructure::matrix::MatrixService;

/// Chat bot that announces modlist releases.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Prefix to use for bot commands
    #[arg(short, long, default_value = "!")]
    prefix: String,

    /// Path to the YAML configuration
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let data_dir = &config.system.data_dir;
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    }

    let file_appender = tracing_appender::rolling::never(data_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", strings::logs::STARTING);

    // 3. Core Components
    let registry = Arc::new(
        ModlistRegistry::load(config.registry_path())
            .await
            .context("Failed to load modlist registry")?,
    );
    tracing::info!("Modlist registry at {}", registry.path().display());
    let fetcher = Arc::new(HttpFeedFetcher::new(Duration::from_secs(config.feed.timeout))?);
    let reconciler = ReleaseReconciler::new(registry.clone(), fetcher, config.feed.url.clone());
    let router = Arc::new(CommandRouter::new(
        args.prefix.clone(),
        AccessController::new(config.admin_set()),
        registry,
        reconciler,
    ));

    // 4. Matrix Setup
    let matrix = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await?;

    tracing::info!("{}", strings::logs::logged_in(&matrix.username));

    if let Some(name) = &matrix.display_name
        && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
    {
        tracing::warn!("{}", strings::logs::set_display_name_fail(&e.to_string()));
    }

    // 5. Event Handlers
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time = std::time::UNIX_EPOCH + Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };
            if original_msg.sender == room.own_user_id() {
                return;
            }

            let body = &text_content.body;
            tracing::info!("Received message from {}: \n{}", original_msg.sender, body);

            let chat = MatrixService::new(room);
            if let Err(e) = router
                .route(&chat, &chat, body, original_msg.sender.as_str())
                .await
            {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite
            && let Err(e) = room.join().await
        {
            tracing::warn!(
                "{}",
                strings::logs::join_invite_fail(room.room_id().as_str(), &e.to_string())
            );
        }
    });

    // 6. Sync Loop
    tracing::info!("{}", strings::logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", strings::logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
