//! Real-time message relay server.
//!
//! Clients connect over WebSocket, receive recent history, then every message
//! sent by any connected client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --max-messages 10000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::{
        DEFAULT_HISTORY_REPLAY_LIMIT, DEFAULT_INBOUND_CAPACITY, DEFAULT_OUTBOUND_CAPACITY,
        RelayConfig,
    },
    domain::MessageLog,
    infrastructure::repository::{InMemoryClientRegistry, InMemoryMessageLog},
    ui::{Server, state::SessionConfig},
    usecase::{
        BroadcastHub, ConnectClientUseCase, DisconnectClientUseCase, GetRecentMessagesUseCase,
        GetStatsUseCase, SendMessageUseCase,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time WebSocket message relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of history messages sent to a newly connected client
    #[arg(long, default_value_t = DEFAULT_HISTORY_REPLAY_LIMIT)]
    history_replay_limit: i64,

    /// Keep at most this many messages in memory (unbounded when omitted)
    #[arg(long)]
    max_messages: Option<usize>,

    /// Capacity of the broadcast hub's inbound queue
    #[arg(long, default_value_t = DEFAULT_INBOUND_CAPACITY)]
    inbound_capacity: usize,

    /// Capacity of each client's outbound queue; slower clients are disconnected
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Args> for RelayConfig {
    fn from(args: &Args) -> Self {
        Self {
            history_replay_limit: args.history_replay_limit,
            max_messages: args.max_messages,
            inbound_capacity: args.inbound_capacity,
            outbound_capacity: args.outbound_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = RelayConfig::from(&args);
    tracing::debug!("Relay configuration: {:?}", config);

    // Initialize dependencies in order:
    // 1. MessageLog / ClientRegistry
    // 2. BroadcastHub
    // 3. UseCases
    // 4. Server

    // 1. Create in-memory stores
    let clock = Arc::new(SystemClock);
    let log = match config.max_messages {
        Some(max) => InMemoryMessageLog::with_retention(clock, max),
        None => InMemoryMessageLog::new(clock),
    };
    match log.retention() {
        Some(max) => tracing::info!("Using in-memory storage, keeping the latest {} messages", max),
        None => tracing::info!("Using in-memory storage - messages will be lost on server restart"),
    }
    let log: Arc<dyn MessageLog> = Arc::new(log);
    let registry = Arc::new(InMemoryClientRegistry::new());

    // 2. Start the broadcast hub
    let (hub, hub_handle) = BroadcastHub::new(log.clone(), registry.clone(), config.inbound_capacity);
    tokio::spawn(hub.run());

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(log.clone(), registry.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(hub_handle));
    let get_recent_messages_usecase = Arc::new(GetRecentMessagesUseCase::new(log.clone()));
    let get_stats_usecase = Arc::new(GetStatsUseCase::new(log, registry));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        send_message_usecase,
        get_recent_messages_usecase,
        get_stats_usecase,
        SessionConfig {
            history_replay_limit: config.history_replay_limit,
            outbound_capacity: config.outbound_capacity,
        },
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
