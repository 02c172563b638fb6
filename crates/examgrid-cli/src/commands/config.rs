use clap::Subcommand;
use examgrid_core::ClientConfig;

use super::{api_client, runtime};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the local client configuration
    Show,
    /// Set the backend server URL
    SetServer {
        /// Base URL, e.g. http://127.0.0.1:5000
        url: String,
    },
    /// Set the request timeout in seconds
    SetTimeout { seconds: u64 },
    /// Show the solver configuration from the backend
    Remote,
    /// Update one solver configuration key on the backend
    SetRemote {
        /// Configuration key
        key: String,
        /// New value (parsed as JSON, falling back to a string)
        value: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = ClientConfig::load_or_default();
            println!("server_url = {}", config.server_url);
            println!("timeout_secs = {}", config.timeout_secs);
            println!("file: {}", ClientConfig::path().display());
        }
        ConfigAction::SetServer { url } => {
            let mut config = ClientConfig::load_or_default();
            config.server_url = url;
            config.save()?;
            println!("server URL updated");
        }
        ConfigAction::SetTimeout { seconds } => {
            let mut config = ClientConfig::load_or_default();
            config.timeout_secs = seconds;
            config.save()?;
            println!("timeout updated");
        }
        ConfigAction::Remote => {
            let api = api_client()?;
            let rt = runtime()?;
            let response = rt.block_on(api.remote_config())?;
            println!("{}", serde_json::to_string_pretty(&response["config"])?);
        }
        ConfigAction::SetRemote { key, value } => {
            let parsed: serde_json::Value = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            let mut patch = serde_json::Map::new();
            patch.insert(key, parsed);
            let api = api_client()?;
            let rt = runtime()?;
            rt.block_on(api.update_remote_config(&serde_json::Value::Object(patch)))?;
            println!("solver configuration updated");
        }
    }
    Ok(())
}
