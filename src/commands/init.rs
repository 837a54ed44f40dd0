use anyhow::{Context, Result};
use corpusd::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;

/// Render the default configuration file
pub fn default_config_toml(config: &Config) -> String {
    format!(
        r#"# corpusd Configuration

[http]
listen_addr = "{}"
cors_enabled = {}

[storage]
# "sled" persists under data_dir; "memory" keeps the corpus in process
backend = "sled"
data_dir = "{}"

[logging]
# "text" or "json"
format = "text"
level = "{}"
"#,
        config.http.listen_addr,
        config.http.cors_enabled,
        config.storage.data_dir.display(),
        config.logging.level,
    )
}

/// Write a default config file and create the data directory under `path`
pub fn init_config(path: PathBuf) -> Result<()> {
    let mut config = Config::default();
    let config_path = path.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Configuration file already exists: {}", config_path.display());
    }

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    std::fs::write(&config_path, default_config_toml(&config))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created configuration file: {}", config_path.display());

    config.resolve_data_dir(&config_path);
    let data_dir = config.storage.data_dir;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
    println!("Created data directory: {}", data_dir.display());

    Ok(())
}
