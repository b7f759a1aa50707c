use super::ui;
use crate::core::{ConversionState, LoadStatus, RateLoader};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HINT: &str = "Escriba un monto, 't' para cambiar USD → COP / COP → USD, 'q' para salir";

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    Quit,
    Toggle,
    Amount(&'a str),
}

impl<'a> SessionCommand<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" | "salir" => SessionCommand::Quit,
            "t" | "toggle" => SessionCommand::Toggle,
            _ => SessionCommand::Amount(line.trim()),
        }
    }
}

fn render_converter(state: &ConversionState) -> String {
    format!(
        "\n{}\n{}\n{}",
        ui::style_text("Conversor", ui::StyleType::Title),
        ui::render_toggle(state.direction()),
        ui::style_text(HINT, ui::StyleType::Subtle)
    )
}

fn render_settled<W: Write>(
    out: &mut W,
    status: &LoadStatus,
    state: &ConversionState,
) -> Result<()> {
    writeln!(out, "{}", ui::render_status(status))?;
    if status.rate().is_some() {
        writeln!(out, "{}", render_converter(state))?;
    }
    Ok(())
}

/// Runs the converter session: the rate panel once loaded, then one
/// command or amount per input line until `q` or end of input.
///
/// Input keeps being read while the rate is loading; the converter only
/// answers once the rate is ready.
pub async fn run<R, W>(loader: &mut RateLoader, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut state = ConversionState::default();
    let mut status = loader.status();

    if status.is_loading() {
        writeln!(out, "{}", ui::render_status(&status))?;
    } else {
        render_settled(out, &status, &state)?;
    }

    loop {
        let line = if status.is_loading() {
            tokio::select! {
                biased;
                settled = loader.settled() => {
                    status = settled;
                    render_settled(out, &status, &state)?;
                    continue;
                }
                line = lines.next_line() => line,
            }
        } else {
            lines.next_line().await
        };

        let Some(line) = line.context("Failed to read input")? else {
            break;
        };

        let command = SessionCommand::parse(&line);
        debug!(?command, "Session input");

        let Some(rate) = status.rate() else {
            if command == SessionCommand::Quit {
                break;
            }
            writeln!(out, "{}", ui::render_status(&status))?;
            continue;
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Toggle => {
                state.toggle();
                writeln!(out, "{}", ui::render_toggle(state.direction()))?;
            }
            SessionCommand::Amount(amount) => {
                state.set_input(amount);
                if let Some(result) = ui::render_conversion(&state, rate) {
                    writeln!(out, "{result}")?;
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExchangeRate, RateProvider};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use console::strip_ansi_codes;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    enum StubProvider {
        Rate(i64),
        Failing,
        Pending,
    }

    #[async_trait]
    impl RateProvider for StubProvider {
        async fn fetch_latest(&self) -> anyhow::Result<Vec<ExchangeRate>> {
            match self {
                StubProvider::Rate(value) => {
                    let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
                    Ok(vec![ExchangeRate::new(Decimal::from(*value), day, day)?])
                }
                StubProvider::Failing => Err(anyhow!("Request error: connection refused")),
                StubProvider::Pending => std::future::pending().await,
            }
        }
    }

    async fn run_session(provider: StubProvider, settle: bool, input: &str) -> String {
        let mut loader = RateLoader::start(Arc::new(provider));
        if settle {
            loader.settled().await;
        }
        let mut out = Vec::new();
        run(&mut loader, input.as_bytes(), &mut out).await.unwrap();
        strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("q"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse(" Salir "), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("T"), SessionCommand::Toggle);
        assert_eq!(SessionCommand::parse(" 12.5 "), SessionCommand::Amount("12.5"));
        assert_eq!(SessionCommand::parse(""), SessionCommand::Amount(""));
    }

    #[tokio::test]
    async fn test_session_converts_and_toggles() {
        let output = run_session(StubProvider::Rate(4000), true, "100\nt\n400000\nq\n1\n").await;

        assert!(output.contains("$4000 COP"));
        assert!(output.contains("[USD → COP]"));
        assert!(output.contains("100 USD = 400000.00 COP"));
        assert!(output.contains("(Tasa: 1 USD = 4000 COP)"));
        assert!(output.contains("[COP → USD]"));
        assert!(output.contains("400000 COP = 100.00 USD"));
        // Nothing after quit is processed.
        assert!(!output.contains("1 COP ="));
    }

    #[tokio::test]
    async fn test_invalid_amount_renders_nothing() {
        let output = run_session(StubProvider::Rate(4000), true, "abc\n\n").await;
        assert!(!output.contains(" = "));
    }

    #[tokio::test]
    async fn test_error_status_makes_converter_inert() {
        let output = run_session(StubProvider::Failing, true, "100\n").await;
        assert_eq!(output.matches("Error: Request error: connection refused").count(), 2);
        assert!(!output.contains("USD ="));
    }

    #[tokio::test]
    async fn test_input_while_loading_shows_loading() {
        let output = run_session(StubProvider::Pending, false, "100\n").await;
        assert_eq!(output.matches("Cargando TRM...").count(), 2);
        assert!(!output.contains("USD ="));
    }
}
