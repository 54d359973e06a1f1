//! ferry-axum: Axum surface for ferry drive uploads.
//!
//! Exposes three routes over a [`ferry_drive::DriveAdapter`]:
//!
//! - `POST /drive/upload` — multipart upload of one CSV file; answers with
//!   the remote object id once the upload stream completes
//! - `GET /drive/find/{file_name}` — id of the first match, 404 when absent
//! - `GET /drive/exist/{file_name}` — boolean presence check
//!
//! Content validation (CSV only) happens here, before the pipeline runs —
//! the core performs none.

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::drive_router;
pub use state::DriveState;

/// Build the full application router: drive routes plus request-id and
/// trace layers
pub fn app(state: DriveState) -> Router {
    drive_router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

/// Serve the drive routes on `addr`
pub async fn listen<A>(state: DriveState, addr: A) -> anyhow::Result<()>
where
    A: tokio::net::ToSocketAddrs,
{
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
