//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::{auth_middleware, AuthState};
use super::modules::metrics::{api_metrics_middleware, render_metrics, MetricsExporter};
use super::modules::request_id::request_id_middleware;
use super::modules::{bookings, health, hotels, payments, tickets};
use crate::application::Services;
use crate::infrastructure::crypto::jwt::JwtConfig;

/// State shared by every `/api/v1` route. Handlers extract their own slice
/// through `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub services: Services,
    pub auth: AuthState,
}

impl FromRef<ApiState> for tickets::TicketAppState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            tickets: Arc::clone(&s.services.tickets),
        }
    }
}

impl FromRef<ApiState> for payments::PaymentAppState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            payments: Arc::clone(&s.services.payments),
        }
    }
}

impl FromRef<ApiState> for hotels::HotelAppState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            hotels: Arc::clone(&s.services.hotels),
        }
    }
}

impl FromRef<ApiState> for bookings::BookingAppState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            bookings: Arc::clone(&s.services.bookings),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT whose `sub` is the numeric user id"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        tickets::get_ticket_types,
        tickets::get_ticket,
        tickets::create_ticket,
        payments::get_payment,
        payments::process_payment,
        hotels::list_hotels,
        hotels::get_hotel,
        bookings::get_booking,
        bookings::book_room,
        bookings::change_booking,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            tickets::TicketTypeDto,
            tickets::TicketDto,
            tickets::CreateTicketRequest,
            payments::PaymentDto,
            payments::CardDataRequest,
            payments::ProcessPaymentRequest,
            hotels::HotelDto,
            hotels::RoomDto,
            hotels::HotelWithRoomsDto,
            bookings::BookingRequest,
            bookings::BookingIdResponse,
            bookings::BookingDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Tickets", description = "Ticket catalog and reservation"),
        (name = "Payments", description = "Ticket payment"),
        (name = "Hotels", description = "Hotels and rooms for eligible ticket holders"),
        (name = "Booking", description = "Room booking and room changes"),
    ),
    info(
        title = "EventHub Booking API",
        version = "1.0.0",
        description = "Ticketing, payments and capacity-limited hotel room booking for event attendees"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `db` feeds the health probe; `metrics` mounts `/metrics` when a
/// Prometheus recorder is installed.
pub fn create_api_router(
    services: Services,
    jwt_config: JwtConfig,
    db: Option<DatabaseConnection>,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let state = ApiState {
        services,
        auth: AuthState { jwt_config },
    };

    let api_routes = Router::new()
        .route("/tickets/types", get(tickets::get_ticket_types))
        .route(
            "/tickets",
            get(tickets::get_ticket).post(tickets::create_ticket),
        )
        .route("/payments", get(payments::get_payment))
        .route("/payments/process", post(payments::process_payment))
        .route("/hotels", get(hotels::list_hotels))
        .route("/hotels/{hotel_id}", get(hotels::get_hotel))
        .route(
            "/booking",
            get(bookings::get_booking)
                .post(bookings::book_room)
                .put(bookings::change_booking),
        )
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .nest("/api/v1", api_routes);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(render_metrics))
                .with_state(MetricsExporter { handle }),
        );
    }

    router
        .layer(middleware::from_fn(api_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
