use rust_decimal::Decimal;

use super::{report, PersistenceGateway};
use crate::{
    auth::new_id,
    error::GatewayError,
    models::{NewPayment, Payment, PaymentRow},
    pricing::{to_cents_scale, PaymentStatus},
};

impl PersistenceGateway {
    pub async fn create_payment(
        &self,
        client_name: &str,
        contact: &str,
        amount: Decimal,
        status: PaymentStatus,
    ) -> bool {
        let values = NewPayment {
            client_name: client_name.to_string(),
            contact: contact.to_string(),
            total_paid: amount,
            status,
        };
        report("create_payment", self.try_create_payment(&values).await).is_some()
    }

    pub async fn try_create_payment(&self, values: &NewPayment) -> Result<Payment, GatewayError> {
        values.validate()?;
        let id = new_id();
        let total_paid = to_cents_scale(values.total_paid);

        sqlx::query(
            r#"INSERT INTO payments (id, client_name, contact, total_paid, status)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&values.client_name)
        .bind(&values.contact)
        .bind(total_paid.to_string())
        .bind(values.status.as_str())
        .execute(&self.pool)
        .await?;

        log::debug!(
            "Recorded {} payment {id} of {total_paid} from {}",
            values.status,
            values.client_name
        );
        Ok(Payment {
            id,
            client_name: values.client_name.clone(),
            contact: values.contact.clone(),
            total_paid,
            status: values.status,
        })
    }

    /// All payments in storage order; empty when the read fails.
    pub async fn list_payments(&self) -> Vec<Payment> {
        report("list_payments", self.fetch_payments().await).unwrap_or_default()
    }

    pub async fn fetch_payments(&self) -> Result<Vec<Payment>, GatewayError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"SELECT id, client_name, contact, total_paid, status
               FROM payments
               ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    pub async fn delete_payment(
        &self,
        client_name: &str,
        contact: &str,
        amount: Decimal,
        status: PaymentStatus,
    ) -> bool {
        let values = NewPayment {
            client_name: client_name.to_string(),
            contact: contact.to_string(),
            total_paid: amount,
            status,
        };
        report("delete_payment", self.try_delete_payment(&values).await).is_some()
    }

    /// Deletes payments equal to `values` on all four fields. Amounts compare
    /// after rounding to centavos.
    pub async fn try_delete_payment(&self, values: &NewPayment) -> Result<u64, GatewayError> {
        let total_paid = to_cents_scale(values.total_paid);

        let result = sqlx::query(
            r#"DELETE FROM payments
               WHERE client_name = ? AND contact = ? AND total_paid = ? AND status = ?"#,
        )
        .bind(&values.client_name)
        .bind(&values.contact)
        .bind(total_paid.to_string())
        .bind(values.status.as_str())
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Err(GatewayError::no_match(
                "payment",
                format!(
                    "{} <{}> {} {}",
                    values.client_name, values.contact, total_paid, values.status
                ),
            )),
            affected => Ok(affected),
        }
    }
}
