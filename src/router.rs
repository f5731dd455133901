use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::gateway::GatewayClient;
use crate::mailer::Mailer;
use crate::media::MediaClient;
use crate::routes::{admin, details, events, payments, users, venues};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub gateway: GatewayClient,
    pub media: MediaClient,
    pub mailer: Mailer,
}

pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/forgot-password", post(users::request_otp))
        .route("/verify-otp", post(users::verify_otp))
        .route("/reset-password", post(users::reset_password));

    let venue_routes = Router::new()
        .route("/create", post(venues::create_venue))
        .route("/", get(venues::get_all_venues))
        .route("/verified", get(venues::get_verified_venues))
        .route("/owner/{owner_id}", get(venues::get_venues_by_owner))
        .route("/{id}", get(venues::get_venue_by_id))
        .route("/update/{id}", put(venues::update_venue))
        .route("/delete/{id}", delete(venues::delete_venue));

    let event_routes = Router::new()
        .route("/event-types", get(events::get_event_types))
        .route("/event-types/custom", post(events::add_custom_event_type))
        .route("/create", post(events::create_event))
        .route("/", get(events::get_all_events))
        .route("/organiser/{id}", get(events::get_events_by_host))
        .route("/{id}", get(events::get_event_by_id));

    let payment_routes = Router::new()
        .route(
            "/create-checkout-session",
            post(payments::create_checkout_session),
        )
        .route(
            "/update-status/{session_id}",
            patch(payments::update_payment_status),
        )
        .route("/venue", get(payments::get_venue_payments))
        .route("/event", get(payments::get_event_payments))
        .route(
            "/venue-payments/{venue_id}",
            get(payments::get_payments_by_venue),
        )
        .route(
            "/admin/successful-payments",
            get(admin::successful_payments),
        )
        .route("/{payment_id}", get(payments::get_payment_by_id));

    let admin_routes = Router::new()
        .route("/venues/{id}/approve", put(admin::approve_venue))
        .route("/dashboard/stats", get(admin::dashboard_stats))
        .route(
            "/user/{id}/additional-details",
            get(admin::additional_details),
        );

    let detail_routes = Router::new().route("/additional-details", post(details::create_details));

    Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/venues", venue_routes)
        .nest("/api/events", event_routes)
        .nest("/api/payment", payment_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/details", detail_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
