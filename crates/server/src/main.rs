// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod clock;
mod session;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use meal_order_api::{
    AllOrdersResponse, ApiError, AuthenticationService, CalendarResponse, CancelOrderResponse,
    MeResponse, MealsResponse, OrderHistoryResponse, PlaceOrderRequest, PlaceOrderResponse,
    SignInRequest, SignInResponse, SignUpRequest, SignUpResponse, all_orders, cancel_order,
    current_user, list_meals, order_calendar, order_history, place_order,
};
use meal_order_domain::{Tz, parse_timezone, to_local};
use meal_order_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::clock::{Clock, SystemClock};
use crate::session::{OptionalSessionUser, SessionUser};

/// Meal Order Server - HTTP server for the meal ordering service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the order cutoff is evaluated in
    #[arg(short, long, default_value = "UTC", value_parser = parse_timezone_arg)]
    timezone: Tz,

    /// Days a session stays valid after sign-in
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(1..))]
    session_days: i64,
}

fn parse_timezone_arg(name: &str) -> Result<Tz, String> {
    parse_timezone(name).map_err(|e| e.to_string())
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; every request does its store
/// work under the lock. The clock is read once per request.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    clock: Arc<dyn Clock>,
    /// Timezone the cutoff and calendar are evaluated in.
    timezone: Tz,
    session_ttl: Duration,
}

impl AppState {
    /// Converts an instant read from the clock to local wall-clock time.
    fn local(&self, now: OffsetDateTime) -> Result<PrimitiveDateTime, HttpError> {
        Ok(to_local(now, self.timezone).map_err(ApiError::from)?)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// Response for GET `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::Validation { .. } | ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DuplicateUsername { .. } | ApiError::DuplicateOrder { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::NotOrderable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable { message } => {
                error!(error = %message, "Request failed on the store");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/auth/signup` endpoint.
///
/// The first account needs no session. Later accounts are created by an
/// administrator.
async fn handle_sign_up(
    AxumState(app_state): AxumState<AppState>,
    OptionalSessionUser(session): OptionalSessionUser,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, HttpError> {
    info!(username = %req.username, "Handling sign_up request");

    let now: OffsetDateTime = session
        .as_ref()
        .map_or_else(|| app_state.clock.now_utc(), |s| s.now);

    let mut persistence = app_state.persistence.lock().await;
    let response: SignUpResponse = AuthenticationService::sign_up(
        &mut persistence,
        session.as_ref().map(|s| &s.actor),
        &req,
        now,
        app_state.session_ttl,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/signin` endpoint.
async fn handle_sign_in(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, HttpError> {
    info!(username = %req.username, "Handling sign_in request");

    let now: OffsetDateTime = app_state.clock.now_utc();

    let mut persistence = app_state.persistence.lock().await;
    let response: SignInResponse =
        AuthenticationService::sign_in(&mut persistence, &req, now, app_state.session_ttl)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/auth/signout` endpoint.
async fn handle_sign_out(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<StatusCode, HttpError> {
    info!(user_id = %session.actor.user_id, "Handling sign_out request");

    let mut persistence = app_state.persistence.lock().await;
    AuthenticationService::sign_out(&mut persistence, &session.token)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/auth/me` endpoint.
async fn handle_me(session: SessionUser) -> Json<MeResponse> {
    Json(current_user(&session.actor))
}

/// Handler for GET `/meals` endpoint.
async fn handle_list_meals(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<MealsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MealsResponse = list_meals(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/orders/calendar` endpoint.
///
/// Returns the caller's current and next week, evaluated at the request's
/// local time.
async fn handle_order_calendar(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<CalendarResponse>, HttpError> {
    let now: PrimitiveDateTime = app_state.local(session.now)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CalendarResponse = order_calendar(&mut persistence, &session.actor, now)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/orders` endpoint.
async fn handle_order_history(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<OrderHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OrderHistoryResponse = order_history(&mut persistence, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/orders` endpoint.
async fn handle_place_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), HttpError> {
    info!(
        user_id = %session.actor.user_id,
        date = %req.date,
        meal_id = req.meal_id,
        "Handling place_order request"
    );

    let now: PrimitiveDateTime = app_state.local(session.now)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PlaceOrderResponse = place_order(&mut persistence, &session.actor, &req, now)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for DELETE `/orders/{date}` endpoint.
async fn handle_cancel_order(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(date): Path<String>,
) -> Result<Json<CancelOrderResponse>, HttpError> {
    info!(user_id = %session.actor.user_id, date = %date, "Handling cancel_order request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelOrderResponse = cancel_order(&mut persistence, &session.actor, &date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/admin/orders` endpoint.
async fn handle_all_orders(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<AllOrdersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AllOrdersResponse = all_orders(&mut persistence, &session.actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_sign_up))
        .route("/auth/signin", post(handle_sign_in))
        .route("/auth/signout", post(handle_sign_out))
        .route("/auth/me", get(handle_me))
        .route("/meals", get(handle_list_meals))
        .route("/orders/calendar", get(handle_order_calendar))
        .route("/orders", get(handle_order_history))
        .route("/orders", post(handle_place_order))
        .route("/orders/{date}", delete(handle_cancel_order))
        .route("/admin/orders", get(handle_all_orders))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(timezone = %args.timezone, "Initializing Meal Order Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let purged: usize =
        AuthenticationService::purge_expired_sessions(&mut persistence, clock.now_utc())?;
    info!(purged, "Removed expired sessions");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock,
        timezone: args.timezone,
        session_ttl: Duration::days(args.session_days),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
