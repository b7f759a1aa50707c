pub mod convert;
pub mod interactive;
pub mod setup;
pub mod show;
pub mod ui;

use crate::core::{LoadStatus, RateLoader};

/// Waits for the load to settle, with a spinner while it is outstanding.
pub async fn wait_for_rate(loader: &mut RateLoader) -> LoadStatus {
    if !loader.status().is_loading() {
        return loader.status();
    }

    let spinner = ui::new_spinner(ui::LOADING_TEXT);
    let status = loader.settled().await;
    spinner.finish_and_clear();
    status
}
