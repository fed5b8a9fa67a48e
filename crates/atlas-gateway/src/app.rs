use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    delete_country_handler, get_country_handler, health_handler, image_handler,
    list_countries_handler, refresh_handler, status_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/countries",
                Router::new()
                    .route("/", get(list_countries_handler))
                    .route("/refresh", post(refresh_handler))
                    .route("/status", get(status_handler))
                    .route("/image", get(image_handler))
                    .route(
                        "/{name}",
                        get(get_country_handler).delete(delete_country_handler),
                    ),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
