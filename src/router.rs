use crate::handlers::{self, catalog, fitness, ledger, stats, users};
use crate::db::RoutineStorage;
use crate::middleware::RequireKeyAuth;
use crate::service::Dashboard;
use axum::{
    Router,
    middleware::from_extractor_with_state,
    routing::{get, patch},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct RoutineState {
    pub storage: RoutineStorage,
    pub dashboard: Dashboard,
    pub routine_key: Arc<str>,
}

impl RoutineState {
    pub fn new(storage: RoutineStorage, dashboard: Dashboard, routine_key: Arc<str>) -> Self {
        Self {
            storage,
            dashboard,
            routine_key,
        }
    }
}

pub fn routine_router(state: RoutineState) -> Router {
    let api = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/fitness",
            get(fitness::list_fitness).post(fitness::create_fitness),
        )
        .route(
            "/fitness/{id}",
            patch(fitness::update_fitness).delete(fitness::delete_fitness),
        )
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            get(catalog::get_category)
                .patch(catalog::update_category)
                .delete(catalog::delete_category),
        )
        .route("/categories/{id}/items", get(catalog::list_category_items))
        .route("/items", get(catalog::list_items).post(catalog::create_item))
        .route(
            "/items/{id}",
            patch(catalog::update_item).delete(catalog::delete_item),
        )
        .route("/ledger", get(ledger::list_entries).post(ledger::create_entry))
        .route(
            "/ledger/{id}",
            get(ledger::get_entry)
                .patch(ledger::update_entry)
                .delete(ledger::delete_entry),
        )
        .route("/stats/fitness", get(stats::fitness_stats))
        .route("/stats/fitness/periods", get(stats::fitness_periods))
        .route("/stats/ledger", get(stats::ledger_stats))
        .route("/stats/ledger/periods", get(stats::ledger_periods))
        .route_layer(from_extractor_with_state::<RequireKeyAuth, RoutineState>(
            state.clone(),
        ));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .with_state(state)
}
