//! Enrollment repository interface

use async_trait::async_trait;

use super::model::Enrollment;
use crate::domain::DomainResult;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment (with address) registered by a user
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<Enrollment>>;

    /// Find enrollment by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Enrollment>>;
}
