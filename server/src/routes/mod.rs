use axum::Router;

use crate::app_state::SharedState;

pub mod analyze;

pub fn api_router(max_upload_size: u64) -> Router<SharedState> {
    Router::new().merge(analyze::router(max_upload_size))
}
