//! Bootstrap binary: loads configuration, installs tracing, and brings the
//! store registry up over the configured storage.

use std::env;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use appstate::config::{AppConfig, AppSettings};
use appstate::domain::ports::{StateStorage, TracingThemeApplier};
use appstate::outbound::storage::{FileStateStorage, InMemoryStateStorage};
use appstate::store::StoreRegistry;

fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = settings.validate().wrap_err("invalid settings")?;
    init_tracing(&config);

    let storage = open_storage(&config)?;
    let registry = StoreRegistry::new(storage, Arc::new(TracingThemeApplier), &config.app_version);
    let stores = registry
        .initialize()
        .wrap_err("failed to initialize stores")?;

    info!(
        title = %config.title,
        mode = %config.mode,
        max_logs = config.max_logs.get(),
        version = %stores.app().version(),
        authenticated = stores.auth().is_authenticated(),
        theme = %stores.ui().theme(),
        sidebar_collapsed = stores.ui().sidebar_collapsed(),
        "application state ready"
    );
    registry.dispose();
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let builder = fmt().with_env_filter(filter);
    let installed = if config.mode.structured_logs() {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}

fn open_storage(config: &AppConfig) -> Result<Arc<dyn StateStorage>> {
    match &config.storage_dir {
        Some(dir) => {
            let storage = FileStateStorage::open(dir)
                .wrap_err_with(|| format!("failed to open storage at {}", dir.display()))?;
            Ok(Arc::new(storage))
        }
        None => {
            info!("no storage directory configured; state will not outlive this process");
            Ok(Arc::new(InMemoryStateStorage::new()))
        }
    }
}
