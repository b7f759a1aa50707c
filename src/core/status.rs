use super::rate::ExchangeRate;
use thiserror::Error;

/// Where the rate load currently stands. `Ready` and `Error` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready(ExchangeRate),
    Error(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn rate(&self) -> Option<&ExchangeRate> {
        match self {
            LoadStatus::Ready(rate) => Some(rate),
            _ => None,
        }
    }
}

/// Failures that end a rate load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No se encontraron datos de TRM")]
    NoData,
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}

impl From<Result<Vec<ExchangeRate>, LoadError>> for LoadStatus {
    fn from(result: Result<Vec<ExchangeRate>, LoadError>) -> Self {
        match result.and_then(|rates| rates.into_iter().next().ok_or(LoadError::NoData)) {
            Ok(rate) => LoadStatus::Ready(rate),
            Err(e) => LoadStatus::Error(e.to_string()),
        }
    }
}
