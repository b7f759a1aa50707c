use super::{ui, wait_for_rate};
use crate::core::{LoadStatus, RateLoader};
use anyhow::{Result, bail};

/// Renders the loaded rate, as the panel or as JSON.
pub fn render(status: &LoadStatus, json: bool) -> Result<String> {
    match status {
        LoadStatus::Error(message) => bail!("{message}"),
        LoadStatus::Ready(rate) if json => Ok(serde_json::to_string_pretty(rate)?),
        _ => Ok(ui::render_rate(status.rate())),
    }
}

pub async fn run(loader: &mut RateLoader, json: bool) -> Result<()> {
    let status = wait_for_rate(loader).await;
    println!("{}", render(&status, json)?);
    Ok(())
}
