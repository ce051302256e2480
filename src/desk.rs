//! The shop counter: booking form, edit mode and the till.
//!
//! `FrontDesk` is what a screen talks to. It validates and trims form input,
//! remembers which appointment is being edited, prices payments and hands
//! single statements to the gateway.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::GatewayError,
    gateway::PersistenceGateway,
    models::{require, Appointment, AppointmentKey, NewAppointment, NewPayment, Payment, UserAccount},
    pricing::{self, PaymentStatus},
};

/// Booking form as typed at the counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub client_name: String,
    pub contact: String,
    pub pet_name: String,
    pub pet_breed: String,
    pub service: String,
    pub date: Option<NaiveDate>,
}

impl AppointmentForm {
    pub fn validate(&self) -> Result<NewAppointment, GatewayError> {
        let date = self
            .date
            .ok_or_else(|| GatewayError::InvalidInput("appointment date is required".into()))?;
        let values = NewAppointment {
            client_name: self.client_name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            pet_name: self.pet_name.trim().to_string(),
            pet_breed: self.pet_breed.trim().to_string(),
            service: self.service.trim().to_string(),
            date,
        };
        values.validate()?;
        Ok(values)
    }
}

impl From<&Appointment> for AppointmentForm {
    fn from(row: &Appointment) -> Self {
        AppointmentForm {
            client_name: row.client_name.clone(),
            contact: row.contact.clone(),
            pet_name: row.pet_name.clone(),
            pet_breed: row.pet_breed.clone(),
            service: row.service.clone(),
            date: Some(row.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskMode {
    Booking,
    /// Editing the appointment(s) that had this key when editing began.
    Editing(AppointmentKey),
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub client_name: String,
    pub contact: String,
    pub service: String,
    pub status: PaymentStatus,
    /// Cash tendered, as typed.
    pub cash: String,
}

#[derive(Debug, Clone)]
pub struct Receipt {
    pub payment: Payment,
    pub change: Decimal,
}

impl Receipt {
    pub fn summary(&self) -> String {
        format!(
            "{} successful! Change: {}",
            self.payment.status,
            pricing::format_peso(self.change)
        )
    }
}

pub struct FrontDesk {
    gateway: PersistenceGateway,
    mode: DeskMode,
}

impl FrontDesk {
    pub fn new(gateway: PersistenceGateway) -> Self {
        Self {
            gateway,
            mode: DeskMode::Booking,
        }
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    pub fn mode(&self) -> &DeskMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DeskMode::Editing(_))
    }

    /// Switches to edit mode for `row` and returns it as a pre-filled form.
    pub fn begin_edit(&mut self, row: &Appointment) -> AppointmentForm {
        self.mode = DeskMode::Editing(row.key());
        AppointmentForm::from(row)
    }

    pub fn cancel_edit(&mut self) {
        self.mode = DeskMode::Booking;
    }

    /// Leaves edit mode and hands back a blank form.
    pub fn clear(&mut self) -> AppointmentForm {
        self.mode = DeskMode::Booking;
        AppointmentForm::default()
    }

    /// Books a new appointment, or rewrites the one being edited.
    ///
    /// A successful edit returns the desk to booking mode; a failed one keeps
    /// the edit open so the form can be corrected and resubmitted.
    pub async fn submit(&mut self, form: &AppointmentForm) -> Result<Appointment, GatewayError> {
        let values = form.validate()?;

        let key = match &self.mode {
            DeskMode::Booking => return self.gateway.try_create_appointment(&values).await,
            DeskMode::Editing(key) => key.clone(),
        };

        self.gateway.try_update_appointment(&key, &values).await?;

        let updated = self
            .gateway
            .fetch_appointments()
            .await?
            .into_iter()
            .find(|row| row.matches(&values))
            .ok_or_else(|| GatewayError::no_match("appointment", values_key(&values).to_string()))?;
        self.mode = DeskMode::Booking;
        Ok(updated)
    }

    /// Removes the appointment(s) sharing `row`'s natural key.
    pub async fn remove(&mut self, row: &Appointment) -> Result<u64, GatewayError> {
        let key = row.key();
        let removed = self.gateway.try_delete_appointment(&key).await?;
        if self.mode == DeskMode::Editing(key) {
            self.mode = DeskMode::Booking;
        }
        Ok(removed)
    }

    /// Prices the service, checks the cash and records the payment.
    ///
    /// Nothing is written when the cash does not cover the amount due.
    pub async fn process_payment(&self, request: &PaymentRequest) -> Result<Receipt, GatewayError> {
        let client_name = request.client_name.trim();
        let contact = request.contact.trim();
        require("client name", client_name)?;
        require("contact", contact)?;
        require("service", &request.service)?;
        let cash = pricing::parse_cash(&request.cash)?;

        let quote = pricing::quote(request.service.trim(), request.status, cash)?;
        if !quote.accepted() {
            log::info!(
                "Rejected {} from {client_name}: {} tendered, {} due",
                request.status,
                pricing::format_peso(cash),
                pricing::format_peso(quote.amount_due)
            );
            return Err(GatewayError::InsufficientFunds {
                due: quote.amount_due,
                cash,
            });
        }

        let payment = self
            .gateway
            .try_create_payment(&NewPayment {
                client_name: client_name.to_string(),
                contact: contact.to_string(),
                total_paid: quote.amount_due,
                status: request.status,
            })
            .await?;

        Ok(Receipt {
            payment,
            change: quote.change,
        })
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, GatewayError> {
        self.gateway
            .try_register_user(full_name.trim(), email.trim(), password)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount, GatewayError> {
        let email = email.trim();
        require("email", email)?;
        if password.is_empty() {
            return Err(GatewayError::InvalidInput("password is required".into()));
        }
        self.gateway.try_validate_user(email, password).await
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.gateway.list_appointments().await
    }

    pub async fn payments(&self) -> Vec<Payment> {
        self.gateway.list_payments().await
    }
}

fn values_key(values: &NewAppointment) -> AppointmentKey {
    AppointmentKey::new(values.client_name.clone(), values.contact.clone(), values.date)
}
