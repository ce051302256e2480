use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{error::GatewayError, pricing::PaymentStatus};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub contact: String,
    pub date: NaiveDate,
    pub pet_name: String,
    pub pet_breed: String,
    pub service: String,
}

impl Appointment {
    pub fn key(&self) -> AppointmentKey {
        AppointmentKey {
            client_name: self.client_name.clone(),
            contact: self.contact.clone(),
            date: self.date,
        }
    }

    /// True when every business field equals `values`; the id is ignored.
    pub fn matches(&self, values: &NewAppointment) -> bool {
        self.client_name == values.client_name
            && self.contact == values.contact
            && self.date == values.date
            && self.pet_name == values.pet_name
            && self.pet_breed == values.pet_breed
            && self.service == values.service
    }
}

/// Natural key of an appointment. Not unique in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppointmentKey {
    pub client_name: String,
    pub contact: String,
    pub date: NaiveDate,
}

impl AppointmentKey {
    pub fn new(client_name: impl Into<String>, contact: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            client_name: client_name.into(),
            contact: contact.into(),
            date,
        }
    }
}

impl fmt::Display for AppointmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> on {}", self.client_name, self.contact, self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub client_name: String,
    pub contact: String,
    pub pet_name: String,
    pub pet_breed: String,
    pub service: String,
    pub date: NaiveDate,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<(), GatewayError> {
        require("client name", &self.client_name)?;
        require("contact", &self.contact)?;
        require("pet name", &self.pet_name)?;
        require("pet breed", &self.pet_breed)?;
        require("service", &self.service)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub client_name: String,
    pub contact: String,
    pub total_paid: Decimal,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn matches(&self, values: &NewPayment) -> bool {
        self.client_name == values.client_name
            && self.contact == values.contact
            && self.total_paid == values.total_paid
            && self.status == values.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub client_name: String,
    pub contact: String,
    pub total_paid: Decimal,
    pub status: PaymentStatus,
}

impl NewPayment {
    pub fn validate(&self) -> Result<(), GatewayError> {
        require("client name", &self.client_name)?;
        require("contact", &self.contact)?;
        if self.total_paid.is_sign_negative() {
            return Err(GatewayError::invalid("amount paid cannot be negative"));
        }
        Ok(())
    }
}

/// Storage shape of a payment; the amount is kept as two-place decimal text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct PaymentRow {
    pub id: String,
    pub client_name: String,
    pub contact: String,
    pub total_paid: String,
    pub status: String,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = GatewayError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let total_paid = Decimal::from_str(&row.total_paid).map_err(|_| {
            GatewayError::invalid(format!(
                "stored amount '{}' on payment {} is not a decimal",
                row.total_paid, row.id
            ))
        })?;
        Ok(Payment {
            status: row.status.parse()?,
            id: row.id,
            client_name: row.client_name,
            contact: row.contact,
            total_paid,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        UserAccount {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::invalid(format!("{field} is required")));
    }
    Ok(())
}
