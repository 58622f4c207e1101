use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
pub mod models;
pub use models::*;

/// Prefix for environment overrides, e.g. `AGENDA_BOOKING__MAX_MONTHS_AHEAD=2`.
pub const ENV_PREFIX: &str = "AGENDA";

/// Loads the layered configuration from the workspace `config/` directory.
///
/// The directory can be relocated with `AGENDA_CONFIG_DIR`. Missing files are
/// not an error: every section falls back to the clinic defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    load_config_from(config_dir())
}

/// Loads `default.*` and `{RUN_ENV}.*` from `dir`, then applies environment overrides.
pub fn load_config_from(dir: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let dir = dir.as_ref();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let default_path = dir.join("default");
    let env_path = dir.join(&run_env);
    debug!(
        "Loading config: default={}, env={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("booking.closed_days")
                .with_list_parse_key("schedule.unavailable_times"),
        );

    builder.build()?.try_deserialize()
}

fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("AGENDA_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    // crates/agenda_config -> workspace root
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(|root| root.join("config"))
        .unwrap_or_else(|| PathBuf::from("config"))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise `.env`. Loading happens
/// once per process; the returned value is the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
