use super::{ui, wait_for_rate};
use crate::core::{ConversionState, Direction, LoadStatus, RateLoader};
use anyhow::{Result, bail};

/// One-shot conversion of `amount` once the rate is available.
pub fn render(status: &LoadStatus, amount: &str, direction: Direction) -> Result<String> {
    let rate = match status {
        LoadStatus::Ready(rate) => rate,
        LoadStatus::Error(message) => bail!("{message}"),
        LoadStatus::Loading => bail!("{}", ui::LOADING_TEXT),
    };

    let mut state = ConversionState::new(direction);
    state.set_input(amount);

    match ui::render_conversion(&state, rate) {
        Some(result) => Ok(result),
        None => bail!("Monto inválido: {:?}", amount),
    }
}

pub async fn run(loader: &mut RateLoader, amount: &str, direction: Direction) -> Result<()> {
    let status = wait_for_rate(loader).await;
    println!("{}", render(&status, amount, direction)?);
    Ok(())
}
