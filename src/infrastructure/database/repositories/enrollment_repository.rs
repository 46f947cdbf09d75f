//! SeaORM implementation of EnrollmentRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::db_err;
use crate::domain::enrollment::{Address, Enrollment, EnrollmentRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{address, enrollment};

pub struct SeaOrmEnrollmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmEnrollmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: enrollment::Model, a: Option<address::Model>) -> Enrollment {
    Enrollment {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        cpf: m.cpf,
        birthday: m.birthday,
        phone: m.phone,
        address: a.map(|a| Address {
            cep: a.cep,
            street: a.street,
            city: a.city,
            state: a.state,
            number: a.number,
            neighborhood: a.neighborhood,
            address_detail: a.address_detail,
        }),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<Enrollment>> {
        debug!("Finding enrollment for user {}", user_id);
        let row = enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id))
            .find_also_related(address::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(m, a)| model_to_domain(m, a)))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Enrollment>> {
        let row = enrollment::Entity::find_by_id(id)
            .find_also_related(address::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(m, a)| model_to_domain(m, a)))
    }
}
