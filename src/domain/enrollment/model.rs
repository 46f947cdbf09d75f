//! Enrollment domain entity

use chrono::{DateTime, NaiveDate, Utc};

/// Postal address attached to an enrollment
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
}

/// User registration for the event
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub cpf: String,
    pub birthday: NaiveDate,
    pub phone: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(
        id: i32,
        user_id: i32,
        name: impl Into<String>,
        cpf: impl Into<String>,
        birthday: NaiveDate,
        phone: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name: name.into(),
            cpf: cpf.into(),
            birthday,
            phone: phone.into(),
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Whether the enrollment belongs to `user_id`
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}
