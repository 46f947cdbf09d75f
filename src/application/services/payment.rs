//! Ticket payments

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    CardData, DomainError, DomainResult, NewPayment, Payment, RepositoryProvider, Ticket,
};

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn get_payment_by_ticket_id(
        &self,
        user_id: i32,
        ticket_id: i32,
    ) -> DomainResult<Payment> {
        self.owned_ticket(user_id, ticket_id).await?;

        self.repos
            .payments()
            .find_by_ticket_id(ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", "ticket_id", ticket_id))
    }

    /// Pay for a ticket with the ticket type's price and mark it PAID.
    ///
    /// Paying an already paid ticket returns the recorded payment. A
    /// payment whose ticket never reached PAID is completed on retry.
    pub async fn process_payment(
        &self,
        user_id: i32,
        ticket_id: i32,
        card: &CardData,
    ) -> DomainResult<Payment> {
        let owned = self.owned_ticket(user_id, ticket_id).await?;

        if let Some(existing) = self.repos.payments().find_by_ticket_id(ticket_id).await? {
            if !owned.is_paid() {
                warn!(
                    user_id,
                    ticket_id,
                    payment_id = existing.id,
                    "Payment recorded but ticket not PAID, completing it"
                );
                self.repos.tickets().mark_paid(ticket_id).await?;
            }
            info!(user_id, ticket_id, payment_id = existing.id, "Ticket already paid");
            return Ok(existing);
        }

        let ticket = self
            .repos
            .tickets()
            .find_with_type_by_id(ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", ticket_id))?;

        let new_payment = NewPayment::from_card(ticket_id, ticket.ticket_type.price, card);
        let payment = self.repos.payments().create_and_mark_paid(new_payment).await?;

        metrics::counter!("eventhub_payments_processed_total", "issuer" => payment.card_issuer.clone())
            .increment(1);
        info!(
            user_id,
            ticket_id,
            payment_id = payment.id,
            value = payment.value,
            "Payment processed"
        );
        Ok(payment)
    }

    /// Ticket lookup followed by the ownership check through its enrollment
    async fn owned_ticket(&self, user_id: i32, ticket_id: i32) -> DomainResult<Ticket> {
        let ticket = self
            .repos
            .tickets()
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", ticket_id))?;

        let enrollment = self
            .repos
            .enrollments()
            .find_by_id(ticket.enrollment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Enrollment", "id", ticket.enrollment_id))?;

        if !enrollment.is_owned_by(user_id) {
            return Err(DomainError::Unauthorized(format!(
                "ticket {ticket_id} does not belong to user {user_id}"
            )));
        }
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::application::services::fixtures::Fixture;
    use crate::domain::{
        BookingRepository, EnrollmentRepository, HotelRepository, PaymentRepository, RoomRepository,
        TicketRepository, TicketStatus, TicketType, TicketWithType,
    };
    use crate::infrastructure::InMemoryRepositoryProvider;

    /// Provider whose first `mark_paid` fails, everything else delegates
    struct FlakyTickets {
        inner: Arc<InMemoryRepositoryProvider>,
        failed_once: AtomicBool,
    }

    impl RepositoryProvider for FlakyTickets {
        fn enrollments(&self) -> &dyn EnrollmentRepository {
            self.inner.enrollments()
        }

        fn tickets(&self) -> &dyn TicketRepository {
            self
        }

        fn hotels(&self) -> &dyn HotelRepository {
            self.inner.hotels()
        }

        fn rooms(&self) -> &dyn RoomRepository {
            self.inner.rooms()
        }

        fn bookings(&self) -> &dyn BookingRepository {
            self.inner.bookings()
        }

        fn payments(&self) -> &dyn PaymentRepository {
            self.inner.payments()
        }
    }

    #[async_trait]
    impl TicketRepository for FlakyTickets {
        async fn find_ticket_types(&self) -> DomainResult<Vec<TicketType>> {
            self.inner.tickets().find_ticket_types().await
        }

        async fn find_by_enrollment_id(
            &self,
            enrollment_id: i32,
        ) -> DomainResult<Option<TicketWithType>> {
            self.inner.tickets().find_by_enrollment_id(enrollment_id).await
        }

        async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
            self.inner.tickets().find_by_id(id).await
        }

        async fn find_with_type_by_id(&self, id: i32) -> DomainResult<Option<TicketWithType>> {
            self.inner.tickets().find_with_type_by_id(id).await
        }

        async fn create(
            &self,
            enrollment_id: i32,
            ticket_type_id: i32,
            status: TicketStatus,
        ) -> DomainResult<Ticket> {
            self.inner
                .tickets()
                .create(enrollment_id, ticket_type_id, status)
                .await
        }

        async fn mark_paid(&self, id: i32) -> DomainResult<()> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                return Err(DomainError::Storage("transient".into()));
            }
            self.inner.tickets().mark_paid(id).await
        }
    }

    fn card() -> CardData {
        CardData {
            issuer: "MASTERCARD".into(),
            number: "5555444433332222".into(),
            name: "Ada Lovelace".into(),
            expiration_date: "10/29".into(),
            cvv: "321".into(),
        }
    }

    #[tokio::test]
    async fn payment_uses_ticket_price_and_marks_paid() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let service = PaymentService::new(fx.provider());

        let payment = service.process_payment(1, ticket_id, &card()).await.unwrap();
        assert_eq!(payment.value, 60000);
        assert_eq!(payment.card_issuer, "MASTERCARD");
        assert_eq!(payment.card_last_digits, "2222");
        assert_eq!(fx.repos.ticket(ticket_id).unwrap().status, TicketStatus::Paid);

        let fetched = service.get_payment_by_ticket_id(1, ticket_id).await.unwrap();
        assert_eq!(fetched, payment);
    }

    #[tokio::test]
    async fn paying_twice_returns_first_payment() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let service = PaymentService::new(fx.provider());

        let first = service.process_payment(1, ticket_id, &card()).await.unwrap();
        let second = service.process_payment(1, ticket_id, &card()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(fx.repos.payment_count(), 1);
    }

    #[tokio::test]
    async fn retry_completes_payment_left_without_paid_ticket() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let now = Utc::now();
        fx.repos.insert_payment(Payment {
            id: 1,
            ticket_id,
            value: 60000,
            card_issuer: "MASTERCARD".into(),
            card_last_digits: "2222".into(),
            created_at: now,
            updated_at: now,
        });
        let provider = Arc::new(FlakyTickets {
            inner: fx.repos.clone(),
            failed_once: AtomicBool::new(false),
        });
        let service = PaymentService::new(provider);

        let err = service.process_payment(1, ticket_id, &card()).await.unwrap_err();
        assert_eq!(err, DomainError::Storage("transient".into()));
        assert_eq!(fx.repos.ticket(ticket_id).unwrap().status, TicketStatus::Reserved);

        let payment = service.process_payment(1, ticket_id, &card()).await.unwrap();
        assert_eq!(payment.id, 1);
        assert_eq!(fx.repos.ticket(ticket_id).unwrap().status, TicketStatus::Paid);
        assert_eq!(fx.repos.payment_count(), 1);
    }

    #[tokio::test]
    async fn fresh_payment_does_not_depend_on_separate_mark_paid() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let provider = Arc::new(FlakyTickets {
            inner: fx.repos.clone(),
            failed_once: AtomicBool::new(false),
        });
        let service = PaymentService::new(provider);

        service.process_payment(1, ticket_id, &card()).await.unwrap();
        assert_eq!(fx.repos.ticket(ticket_id).unwrap().status, TicketStatus::Paid);
        assert_eq!(fx.repos.payment_count(), 1);
    }

    #[tokio::test]
    async fn foreign_ticket_is_unauthorized() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        fx.enroll(2);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let service = PaymentService::new(fx.provider());

        let err = service.process_payment(2, ticket_id, &card()).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        let err = service.get_payment_by_ticket_id(2, ticket_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
        assert_eq!(fx.repos.payment_count(), 0);
        assert_eq!(fx.repos.ticket(ticket_id).unwrap().status, TicketStatus::Reserved);
    }

    #[tokio::test]
    async fn unknown_ticket_is_not_found() {
        let fx = Fixture::new();
        fx.enroll(1);
        let service = PaymentService::new(fx.provider());

        let err = service.process_payment(1, 99, &card()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Ticket", .. }));
    }

    #[tokio::test]
    async fn unpaid_ticket_has_no_payment() {
        let fx = Fixture::new();
        let enrollment_id = fx.enroll(1);
        let ticket_id = fx.ticket(enrollment_id, false, false, true);
        let service = PaymentService::new(fx.provider());

        let err = service.get_payment_by_ticket_id(1, ticket_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Payment", .. }));
    }
}
