//! Chat room gateway server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pixelchat-server
//! cargo run --bin pixelchat-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use pixelchat_server::{
    infrastructure::{
        cache::InMemoryCache,
        catalog::SteamCatalogClient,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomStore, InMemoryUserStore},
    },
    ui::Server,
    usecase::{
        ActiveRoomsUseCase, ArchiveInactiveUseCase, DisconnectUseCase, IdentityBinder,
        JoinRoomUseCase, MembershipTracker, MetadataResolver, RateLimiter, SendMessageUseCase,
    },
};
use pixelchat_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "pixelchat-server")]
#[command(about = "Per-topic chat room gateway over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Cooldown between messages from an anonymous sender, in seconds
    #[arg(long, default_value = "5")]
    anonymous_cooldown_secs: u64,

    /// Base URL of the game catalog service
    #[arg(long, default_value = "https://store.steampowered.com")]
    catalog_url: String,

    /// Timeout for catalog lookups, in seconds
    #[arg(long, default_value = "5")]
    catalog_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Stores and cache
    // 3. MessagePusher and MembershipTracker
    // 4. Leaf services
    // 5. UseCases
    // 6. Server

    // 1. Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Stores and cache (in-memory)
    let room_store = Arc::new(InMemoryRoomStore::new());
    let user_store = Arc::new(InMemoryUserStore::new());
    let cache = Arc::new(InMemoryCache::new(clock.clone()));

    // 3. MessagePusher (WebSocket implementation) and MembershipTracker
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let tracker = Arc::new(MembershipTracker::new());

    // 4. Leaf services
    let identity_binder = Arc::new(IdentityBinder::new(user_store));
    let metadata_resolver = Arc::new(MetadataResolver::new(
        cache.clone(),
        Arc::new(SteamCatalogClient::new(
            args.catalog_url,
            Duration::from_secs(args.catalog_timeout_secs),
        )),
    ));
    let rate_limiter = Arc::new(RateLimiter::new(
        cache,
        clock.clone(),
        Duration::from_secs(args.anonymous_cooldown_secs),
    ));

    // 5. UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        room_store.clone(),
        tracker.clone(),
        metadata_resolver.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        room_store.clone(),
        tracker.clone(),
        rate_limiter.clone(),
        clock.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        tracker.clone(),
        rate_limiter,
        message_pusher.clone(),
    ));
    let active_rooms_usecase = Arc::new(ActiveRoomsUseCase::new(
        room_store.clone(),
        tracker,
        metadata_resolver,
        clock.clone(),
    ));
    let archive_inactive_usecase =
        Arc::new(ArchiveInactiveUseCase::new(room_store.clone(), clock));

    // 6. Create and run the server
    let server = Server::new(
        identity_binder,
        join_room_usecase,
        send_message_usecase,
        disconnect_usecase,
        active_rooms_usecase,
        archive_inactive_usecase,
        message_pusher,
        room_store,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
