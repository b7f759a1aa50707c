//! Exchange rate abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use thiserror::Error;

/// A published TRM record: Colombian pesos per one US dollar, and the
/// window of days in which it is the official rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate {
    value: Decimal,
    valid_from: NaiveDate,
    valid_to: NaiveDate,
    #[serde(skip)]
    per_usd: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRate {
    #[error("rate value must be positive, got {0}")]
    NonPositive(Decimal),
    #[error("rate value {0} is out of range")]
    OutOfRange(Decimal),
    #[error("validity window ends ({to}) before it starts ({from})")]
    InvertedWindow { from: NaiveDate, to: NaiveDate },
}

impl ExchangeRate {
    pub fn new(
        value: Decimal,
        valid_from: NaiveDate,
        valid_to: NaiveDate,
    ) -> Result<Self, InvalidRate> {
        if value <= Decimal::ZERO {
            return Err(InvalidRate::NonPositive(value));
        }
        if valid_to < valid_from {
            return Err(InvalidRate::InvertedWindow {
                from: valid_from,
                to: valid_to,
            });
        }
        let per_usd = value.to_f64().ok_or(InvalidRate::OutOfRange(value))?;

        Ok(Self {
            value,
            valid_from,
            valid_to,
            per_usd,
        })
    }

    /// The rate exactly as published, e.g. `4000.50`.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn valid_from(&self) -> NaiveDate {
        self.valid_from
    }

    pub fn valid_to(&self) -> NaiveDate {
        self.valid_to
    }

    /// The rate as a float for arithmetic.
    pub fn per_usd(&self) -> f64 {
        self.per_usd
    }
}

/// A source of published TRM records, most recent first.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<ExchangeRate>>;
}
