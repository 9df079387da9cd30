use clap::Parser;
use histoquest::chat::GeminiClient;
use histoquest::content::store::ContentStore;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the catalog records.
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: String,

    /// Shared secret for the teacher panel.
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin")]
    admin_password: String,

    /// Gemini API key for the Digi Docent chat.
    #[arg(long, env = "GEMINI_API_KEY", default_value = "")]
    gemini_api_key: String,

    /// Gemini model used by the chat.
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    gemini_model: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1602")]
    address: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,histoquest=debug".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if args.gemini_api_key.is_empty() {
        tracing::warn!("no Gemini API key configured; Digi Docent will only apologize");
    }

    let store = ContentStore::new(&args.data_dir);
    let assistant = GeminiClient::new(args.gemini_api_key, args.gemini_model);
    let state = histoquest::AppState::new(store, assistant, args.admin_password);
    let routes = histoquest::router(state);

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, routes).await?;

    Ok(())
}
