//! Service catalog and payment arithmetic.
//!
//! Prices are fixed; a label that is not in the catalog prices at zero
//! rather than failing, so a payment against it always succeeds with the
//! full cash returned as change.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::GatewayError;

pub const STATUS_PAID: &str = "Paid";
pub const STATUS_DOWNPAYMENT: &str = "Downpayment";

#[derive(Debug, Clone, Copy)]
pub struct ServiceOption {
    pub name: &'static str,
    pub label: &'static str,
    /// Price in centavos.
    pub price_cents: i64,
}

impl ServiceOption {
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }

    fn matches(&self, service: &str) -> bool {
        service == self.label || service == self.name
    }
}

const CATALOG: [ServiceOption; 4] = [
    ServiceOption {
        name: "FullGroom",
        label: "FullGroom ₱600",
        price_cents: 60_000,
    },
    ServiceOption {
        name: "Trim Groom",
        label: "Trim Groom ₱300",
        price_cents: 30_000,
    },
    ServiceOption {
        name: "Full Bath",
        label: "Full Bath ₱200",
        price_cents: 20_000,
    },
    ServiceOption {
        name: "Vaccination",
        label: "Vaccination ₱1000",
        price_cents: 100_000,
    },
];

pub fn service_catalog() -> &'static [ServiceOption] {
    &CATALOG
}

pub fn lookup(service: &str) -> Option<&'static ServiceOption> {
    CATALOG.iter().find(|option| option.matches(service))
}

/// Price of a service by catalog label or bare name, zero when unknown.
pub fn price(service: &str) -> Decimal {
    lookup(service)
        .map(ServiceOption::price)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Downpayment,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => STATUS_PAID,
            PaymentStatus::Downpayment => STATUS_DOWNPAYMENT,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_PAID => Ok(PaymentStatus::Paid),
            STATUS_DOWNPAYMENT => Ok(PaymentStatus::Downpayment),
            other => Err(GatewayError::invalid(format!(
                "unknown payment status '{other}'"
            ))),
        }
    }
}

pub fn amount_due(service: &str, status: PaymentStatus) -> Decimal {
    let full = price(service);
    match status {
        PaymentStatus::Paid => full,
        PaymentStatus::Downpayment => full / Decimal::from(2),
    }
}

/// Cash minus the amount due. Fails instead of overflowing the decimal range.
pub fn change(cash: Decimal, amount_due: Decimal) -> Result<Decimal, GatewayError> {
    cash.checked_sub(amount_due)
        .ok_or_else(|| GatewayError::invalid(format!("cash amount {cash} is out of range")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub amount_due: Decimal,
    pub change: Decimal,
}

impl Quote {
    pub fn accepted(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}

pub fn quote(service: &str, status: PaymentStatus, cash: Decimal) -> Result<Quote, GatewayError> {
    let amount_due = amount_due(service, status);
    Ok(Quote {
        amount_due,
        change: change(cash, amount_due)?,
    })
}

pub fn parse_cash(input: &str) -> Result<Decimal, GatewayError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GatewayError::invalid("cash amount is required"));
    }
    let cash = Decimal::from_str(input)
        .map_err(|_| GatewayError::invalid(format!("'{input}' is not a valid cash amount")))?;
    if cash.is_sign_negative() && !cash.is_zero() {
        return Err(GatewayError::invalid("cash amount cannot be negative"));
    }
    Ok(cash)
}

/// Rounds to centavos and fixes the scale at two places, so the same value
/// always renders (and is stored) as the same text.
pub fn to_cents_scale(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

pub fn format_peso(amount: Decimal) -> String {
    format!("₱{}", to_cents_scale(amount))
}
