use std::path::PathBuf;

use bridgekeeper::{
    BridgeSettings, CorrelationKey, CredentialRequest, ExternalLoginProvider, FailureKind,
    FormRequestContext, HttpIdentitySource, ProviderManager, Secret, Username,
    adapters::config::DEFAULT_REMEMBER_FIELD,
};
use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Authenticate a user against the configured identity source and print the
/// resulting principal as JSON.
#[derive(Debug, Parser)]
#[command(name = "bridgekeeper", version)]
struct Cli {
    /// Login name registered with the identity source
    #[arg(long)]
    username: String,

    /// Password to verify
    #[arg(long)]
    password: String,

    /// Ask the identity source for a persistent login
    #[arg(long)]
    remember: bool,

    /// Provider key carried through to the authenticated principal
    #[arg(long)]
    provider_key: Option<String>,

    /// Settings file (JSON); defaults to ./bridgekeeper.json when present
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => BridgeSettings::load_from(path)?,
        None => BridgeSettings::load()?,
    };

    let identity_source = HttpIdentitySource::from_settings(&settings.identity_source)?;

    // Emulate the login form: the remember checkbox is a submitted field.
    let remember_field = settings
        .remember_field
        .clone()
        .unwrap_or_else(|| DEFAULT_REMEMBER_FIELD.to_string());
    let mut form = FormRequestContext::new();
    if cli.remember {
        form.insert(remember_field.clone(), "1");
    }

    let provider = ExternalLoginProvider::new(identity_source)
        .with_settings(&settings)
        .with_remember_me(remember_field, form);
    let manager = ProviderManager::new().with_provider(provider);

    let correlation_key = match cli.provider_key {
        Some(key) => CorrelationKey::new(key)?,
        None => CorrelationKey::generate(),
    };
    let request = CredentialRequest::with_password(
        Username::parse(cli.username)?,
        Secret::new(cli.password),
        correlation_key,
    );

    tracing::info!("Authenticating against {}", settings.identity_source.base_url);

    match manager.authenticate(request.into()).await {
        Ok(principal) => {
            println!("{}", serde_json::to_string_pretty(&principal)?);
            Ok(())
        }
        Err(failure) => {
            if failure.kind() == FailureKind::ServiceUnavailable {
                tracing::error!(error = %failure, "Identity source unavailable");
            }
            Err(eyre!(failure.user_message()))
        }
    }
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact().with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
