//! Test fixtures over the in-memory provider

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    Enrollment, Hotel, RepositoryProvider, Room, Ticket, TicketStatus, TicketType,
};
use crate::infrastructure::InMemoryRepositoryProvider;

pub(crate) struct Fixture {
    pub repos: Arc<InMemoryRepositoryProvider>,
    next_id: AtomicI32,
    hotel_id: i32,
}

impl Fixture {
    pub fn new() -> Self {
        let fx = Self::without_hotels();
        fx.repos
            .insert_hotel(Hotel::new(fx.hotel_id, "Driven Resort", "https://img.example/resort.png"));
        fx
    }

    /// Fixture whose hotel catalog is empty
    pub fn without_hotels() -> Self {
        Self {
            repos: Arc::new(InMemoryRepositoryProvider::new()),
            next_id: AtomicI32::new(1),
            hotel_id: 1,
        }
    }

    pub fn provider(&self) -> Arc<dyn RepositoryProvider> {
        self.repos.clone()
    }

    fn id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Enroll a user, returning the enrollment id
    pub fn enroll(&self, user_id: i32) -> i32 {
        let id = self.id();
        self.repos.insert_enrollment(Enrollment::new(
            id,
            user_id,
            format!("User {user_id}"),
            "12345678901",
            NaiveDate::from_ymd_opt(1995, 3, 14).unwrap(),
            "5521999999999",
        ));
        id
    }

    /// Give an enrollment a ticket of a fresh type, returning the ticket id
    pub fn ticket(&self, enrollment_id: i32, paid: bool, remote: bool, hotel: bool) -> i32 {
        let type_id = self.ticket_type(remote, hotel, 60000);
        let id = self.id();
        let status = if paid {
            TicketStatus::Paid
        } else {
            TicketStatus::Reserved
        };
        self.repos
            .insert_ticket(Ticket::new(id, enrollment_id, type_id, status));
        id
    }

    pub fn ticket_type(&self, remote: bool, hotel: bool, price: i32) -> i32 {
        let id = self.id();
        self.repos
            .insert_ticket_type(TicketType::new(id, format!("Type {id}"), price, remote, hotel));
        id
    }

    /// Enrolled user holding a paid, in-person ticket with hotel
    pub fn eligible_user(&self, user_id: i32) -> i32 {
        let enrollment_id = self.enroll(user_id);
        self.ticket(enrollment_id, true, false, true)
    }

    pub fn room(&self, capacity: i32) -> Room {
        let id = self.id();
        let room = Room::new(id, format!("{}", 1000 + id), capacity, self.hotel_id);
        self.repos.insert_room(room.clone());
        room
    }
}
