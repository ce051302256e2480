use chrono::NaiveDate;

use super::{report, PersistenceGateway};
use crate::{
    auth::new_id,
    error::GatewayError,
    models::{Appointment, AppointmentKey, NewAppointment},
};

const ENTITY: &str = "appointment";

impl PersistenceGateway {
    pub async fn create_appointment(
        &self,
        client_name: &str,
        contact: &str,
        pet_name: &str,
        pet_breed: &str,
        service: &str,
        date: NaiveDate,
    ) -> bool {
        let values = NewAppointment {
            client_name: client_name.to_string(),
            contact: contact.to_string(),
            pet_name: pet_name.to_string(),
            pet_breed: pet_breed.to_string(),
            service: service.to_string(),
            date,
        };
        report("create_appointment", self.try_create_appointment(&values).await).is_some()
    }

    pub async fn try_create_appointment(
        &self,
        values: &NewAppointment,
    ) -> Result<Appointment, GatewayError> {
        values.validate()?;
        let id = new_id();

        sqlx::query(
            r#"INSERT INTO appointments (id, client_name, contact, date, pet_name, pet_breed, service)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&values.client_name)
        .bind(&values.contact)
        .bind(values.date)
        .bind(&values.pet_name)
        .bind(&values.pet_breed)
        .bind(&values.service)
        .execute(&self.pool)
        .await?;

        log::debug!("Booked appointment {id} for {}", values.client_name);
        Ok(Appointment {
            id,
            client_name: values.client_name.clone(),
            contact: values.contact.clone(),
            date: values.date,
            pet_name: values.pet_name.clone(),
            pet_breed: values.pet_breed.clone(),
            service: values.service.clone(),
        })
    }

    /// All appointments in storage order; empty when the read fails.
    pub async fn list_appointments(&self) -> Vec<Appointment> {
        report("list_appointments", self.fetch_appointments().await).unwrap_or_default()
    }

    pub async fn fetch_appointments(&self) -> Result<Vec<Appointment>, GatewayError> {
        let rows = sqlx::query_as::<_, Appointment>(
            r#"SELECT id, client_name, contact, date, pet_name, pet_breed, service
               FROM appointments
               ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_appointment(&self, id: &str) -> Result<Appointment, GatewayError> {
        sqlx::query_as::<_, Appointment>(
            r#"SELECT id, client_name, contact, date, pet_name, pet_breed, service
               FROM appointments
               WHERE id = ?
               LIMIT 1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| GatewayError::no_match(ENTITY, format!("id {id}")))
    }

    pub async fn update_appointment(
        &self,
        old_key: &AppointmentKey,
        new_values: &NewAppointment,
    ) -> bool {
        report(
            "update_appointment",
            self.try_update_appointment(old_key, new_values).await,
        )
        .is_some()
    }

    /// Replaces every field of every row matching `old_key`.
    ///
    /// The natural key is not unique, so all duplicates are rewritten; the
    /// count of affected rows is returned. Use
    /// [`update_appointment_by_id`](Self::update_appointment_by_id) to touch
    /// exactly one row.
    pub async fn try_update_appointment(
        &self,
        old_key: &AppointmentKey,
        new_values: &NewAppointment,
    ) -> Result<u64, GatewayError> {
        new_values.validate()?;

        let result = sqlx::query(
            r#"UPDATE appointments
               SET client_name = ?, contact = ?, date = ?, pet_name = ?, pet_breed = ?, service = ?
               WHERE client_name = ? AND contact = ? AND date = ?"#,
        )
        .bind(&new_values.client_name)
        .bind(&new_values.contact)
        .bind(new_values.date)
        .bind(&new_values.pet_name)
        .bind(&new_values.pet_breed)
        .bind(&new_values.service)
        .bind(&old_key.client_name)
        .bind(&old_key.contact)
        .bind(old_key.date)
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Err(GatewayError::no_match(ENTITY, old_key.to_string())),
            affected => {
                if affected > 1 {
                    log::warn!("Updated {affected} appointments sharing key {old_key}");
                }
                Ok(affected)
            }
        }
    }

    pub async fn update_appointment_by_id(
        &self,
        id: &str,
        new_values: &NewAppointment,
    ) -> Result<(), GatewayError> {
        new_values.validate()?;

        let result = sqlx::query(
            r#"UPDATE appointments
               SET client_name = ?, contact = ?, date = ?, pet_name = ?, pet_breed = ?, service = ?
               WHERE id = ?"#,
        )
        .bind(&new_values.client_name)
        .bind(&new_values.contact)
        .bind(new_values.date)
        .bind(&new_values.pet_name)
        .bind(&new_values.pet_breed)
        .bind(&new_values.service)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::no_match(ENTITY, format!("id {id}")));
        }
        Ok(())
    }

    pub async fn delete_appointment(&self, client_name: &str, contact: &str, date: NaiveDate) -> bool {
        let key = AppointmentKey::new(client_name, contact, date);
        report("delete_appointment", self.try_delete_appointment(&key).await).is_some()
    }

    /// Deletes every row matching `key` and returns how many went.
    pub async fn try_delete_appointment(&self, key: &AppointmentKey) -> Result<u64, GatewayError> {
        let result = sqlx::query(
            "DELETE FROM appointments WHERE client_name = ? AND contact = ? AND date = ?",
        )
        .bind(&key.client_name)
        .bind(&key.contact)
        .bind(key.date)
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Err(GatewayError::no_match(ENTITY, key.to_string())),
            affected => Ok(affected),
        }
    }

    pub async fn delete_appointment_by_id(&self, id: &str) -> Result<(), GatewayError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::no_match(ENTITY, format!("id {id}")));
        }
        Ok(())
    }
}
