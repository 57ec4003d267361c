use axum::{
    handler::Handler,
    middleware,
    routing::get,
    Router,
};

use crate::api::handlers;
use crate::system;
use crate::system::auth::middleware::{require_admin, require_auth};

/// All application routes
pub fn configure_routes() -> Router {
    let auth = || middleware::from_fn(require_auth);
    let admin = || middleware::from_fn(require_admin);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SESSION
        // ========================================
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user).layer(auth()),
        )
        // ========================================
        // LOCALIDADES
        // ========================================
        .route(
            "/api/localidades",
            get(handlers::localidade::list_all.layer(auth()))
                .post(handlers::localidade::create.layer(admin())),
        )
        .route(
            "/api/localidades/:id/categorias",
            get(handlers::localidade::get_categorias.layer(auth()))
                .put(handlers::localidade::replace_categorias.layer(admin())),
        )
        // ========================================
        // SIMULATIONS
        // ========================================
        .route(
            "/api/simulations",
            get(handlers::simulation::list)
                .post(handlers::simulation::create)
                .layer(auth()),
        )
        .route(
            "/api/simulations/:id",
            get(handlers::simulation::get_by_id)
                .delete(handlers::simulation::delete)
                .layer(auth()),
        )
}
