//! Wanderer - Main entry point.

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wanderer_engine::infrastructure::config::AppConfig;
use wanderer_engine::presentation::Console;
use wanderer_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Logs go to stderr so they never interleave with the story on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wanderer_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Wanderer");

    let config = AppConfig::from_env()?;
    let app = App::from_config(&config);

    let console = Console::new(app.orchestrator.clone());
    let mut stdout = tokio::io::stdout();
    console
        .run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await?;

    tracing::info!("Goodbye");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides, then the working directory.
    for path in [
        repo_root.join(".env.local"),
        repo_root.join(".env"),
        std::path::PathBuf::from(".env"),
    ] {
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
