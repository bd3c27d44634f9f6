mod args;
mod plain;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    let driver = args.config.driver()?;

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return tui::run(driver).await;
    }

    plain::run(driver).await?;
    Ok(())
}
