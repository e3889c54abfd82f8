mod infrastructure;
mod server;

use colored::Colorize;

use crate::infrastructure::{build_config, telemetry::initialize_telemetry, ProvisioningConfig};

#[tokio::main]
async fn main() {
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {e}", "Cannot build config".red());
        }
    };
    let config = match config.try_deserialize::<ProvisioningConfig>() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {e}", "Cannot read config".red());
        }
    };
    if let Err(e) = initialize_telemetry(&config.telemetry) {
        return eprintln!("{}: {e}", "Cannot build logger".red());
    }

    server::run(config).await;
}
