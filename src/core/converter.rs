//! Two-way USD/COP conversion over a loaded rate

use super::rate::ExchangeRate;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Cop,
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Currency::Usd => "USD",
                Currency::Cop => "COP",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    UsdToCop,
    CopToUsd,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from_currency(), self.to_currency())
    }
}

impl Direction {
    pub fn from_currency(&self) -> Currency {
        match self {
            Direction::UsdToCop => Currency::Usd,
            Direction::CopToUsd => Currency::Cop,
        }
    }

    pub fn to_currency(&self) -> Currency {
        match self {
            Direction::UsdToCop => Currency::Cop,
            Direction::CopToUsd => Currency::Usd,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Direction::UsdToCop => Direction::CopToUsd,
            Direction::CopToUsd => Direction::UsdToCop,
        }
    }

    /// Both directions, in the order the toggle shows them.
    pub fn all() -> [Direction; 2] {
        [Direction::UsdToCop, Direction::CopToUsd]
    }
}

/// Parses a user-entered amount. Empty or non-numeric input yields `None`.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounds half away from zero to two decimal places. Magnitudes too large
/// to scale by 100 have no fractional cents and are returned as is.
pub fn round_cents(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        amount
    }
}

/// Converts `input` in the given direction, rounded to cents. Amounts
/// whose result overflows `f64` have no output.
pub fn convert(input: &str, direction: Direction, rate: &ExchangeRate) -> Option<f64> {
    let amount = parse_amount(input)?;
    let converted = match direction {
        Direction::UsdToCop => amount * rate.per_usd(),
        Direction::CopToUsd => amount / rate.per_usd(),
    };
    Some(round_cents(converted)).filter(|v| v.is_finite())
}

/// What the user has typed and which way it converts. The output is always
/// derived from these two and the rate, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionState {
    direction: Direction,
    input: String,
}

impl ConversionState {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            input: String::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Switches direction and clears the input, so a stale amount is never
    /// reinterpreted in the other currency.
    pub fn toggle(&mut self) {
        self.direction = self.direction.toggled();
        self.input.clear();
    }

    pub fn output(&self, rate: &ExchangeRate) -> Option<f64> {
        convert(&self.input, self.direction, rate)
    }

    /// `100 USD = 400000.00 COP`, or `None` when there is nothing to show.
    pub fn result_line(&self, rate: &ExchangeRate) -> Option<String> {
        self.output(rate).map(|output| {
            format!(
                "{} {} = {:.2} {}",
                self.input.trim(),
                self.direction.from_currency(),
                output,
                self.direction.to_currency()
            )
        })
    }
}
