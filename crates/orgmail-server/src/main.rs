//! orgmail server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `ORGMAIL_*`
//! environment variables, connects to the directory and the SMTP relay, and
//! serves the event intake over HTTP.
//!
//! Nested keys use a double underscore and lists are comma separated:
//!
//! ```text
//! ORGMAIL_SMTP__HOST=smtp.example.org
//! ORGMAIL_RECEIVERS=hr@example.org,it@example.org
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use orgmail_agents::Agents;
use orgmail_graphql::GraphqlDirectory;
use orgmail_server::Settings;
use orgmail_smtp::SmtpMailer;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Directory change notification agent")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("ORGMAIL")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("receivers")
        .with_list_parse_key("active_agents")
        .try_parsing(true),
    )
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise Settings")?;

  if settings.receivers.is_empty() {
    tracing::warn!("no receivers configured; notifications will be dropped");
  }

  let directory = GraphqlDirectory::from_config(&settings.directory)
    .context("failed to build directory client")?;
  let mailer =
    SmtpMailer::new(&settings.smtp).context("failed to build SMTP mailer")?;

  let agents = Agents::new(
    Arc::new(directory),
    Arc::new(mailer),
    settings.receivers.clone(),
    settings.active_agents.clone(),
  );
  tracing::info!(agents = ?agents.active(), "agents enabled");

  let app = orgmail_server::router(Arc::new(agents));
  let address = format!("{}:{}", settings.host, settings.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
