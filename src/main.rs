use langgame::{server, AppConfig, Dispatcher, ProviderKind, ProviderRegistry};
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Arc::new(AppConfig::load()?);

    let snapshot = ProviderRegistry::new(config.clone()).list_configured();
    match snapshot.default {
        Some(default) => {
            let names: Vec<&str> = snapshot.providers.iter().map(|p| p.name.as_str()).collect();
            info!("providers: {} (default: {})", names.join(", "), default);
        }
        None => warn!(
            "no provider configured; set {} to enable generation",
            ProviderKind::credential_hint()
        ),
    }

    let dispatcher = Dispatcher::new(config.clone())?;
    server::serve(&config.server.bind, dispatcher).await?;
    Ok(())
}
