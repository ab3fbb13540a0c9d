use {
    clap::{Parser, Subcommand},
    tracing_subscriber::EnvFilter,
};

use guichet_agent::{Agent, HttpAgent};

#[derive(Parser)]
#[command(name = "guichet", about = "Guichet — WhatsApp customer-service relay gateway")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Address to bind to (overrides GUICHET_HOST).
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Port to listen on (overrides GUICHET_PORT).
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server (default when no subcommand is provided).
    Gateway,
    /// Invoke the conversational agent once and print the reply.
    Agent {
        #[arg(short, long)]
        message: String,

        /// User id for the console session.
        #[arg(long, default_value = "33")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut config = guichet_config::from_env();
    if let Some(bind) = cli.bind {
        config.server.host = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    match cli.command.unwrap_or(Commands::Gateway) {
        Commands::Gateway => guichet_gateway::serve(config).await,
        Commands::Agent { message, user } => {
            let agent = HttpAgent::from_config(&config.agent)?;
            // Console sessions are date-scoped, unlike channel sessions.
            let session_id = format!("{user}_{}", chrono::Utc::now().format("%Y%m%d"));
            let reply = agent.invoke(&message, None, &user, &session_id).await?;
            println!("{}", reply.text());
            Ok(())
        },
    }
}
