use anyhow::{Context, Result};
use tracing::{error, info};

use meeting_tools::config::HarvestConfig;
use meeting_tools::harvest::{self, fetch::HttpFetcher};
use meeting_tools::logging;

fn main() -> Result<()> {
    let config = HarvestConfig::load().context("Failed to load harvest settings")?;
    logging::init_harvest(&config.log_dir)?;

    info!("Data refresh started");

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    match harvest::run(&fetcher, &config) {
        Ok(path) => {
            info!(output = %path.display(), "Data refresh complete");
            Ok(())
        }
        Err(err) => {
            error!("Data refresh aborted: {}", err);
            Err(err.into())
        }
    }
}
