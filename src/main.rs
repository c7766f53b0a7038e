use std::sync::Arc;

use aptitest::services::generate::{GeminiGenerator, DEFAULT_GEMINI_BASE_URL};
use aptitest::store::Store;
use aptitest::AppState;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Gemini API key used for question generation.
    #[clap(env = "GEMINI_API_KEY")]
    api_key: String,

    /// Base URL of the generative API.
    #[arg(long, env, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Directory holding the JSON record slots.
    #[arg(short, long, env, default_value = "data")]
    data_dir: String,

    /// Mark session cookies as Secure (requires HTTPS).
    #[arg(long, env, default_value_t = false)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,aptitest=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let store = Store::open(&args.data_dir)?;
    let state = AppState {
        store,
        auth: Default::default(),
        sessions: Default::default(),
        bank: Default::default(),
        generator: Arc::new(GeminiGenerator::new(args.api_key, args.gemini_base_url)),
        secure_cookies: args.secure_cookies,
    };

    let app = aptitest::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, app).await?;

    Ok(())
}
