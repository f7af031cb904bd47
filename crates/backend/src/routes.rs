use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::shared::config::Config;
use crate::{handlers, system};

/// Запас на служебные части multipart-запроса сверх размера файла
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(config: &Config) -> Router {
    let auth = || middleware::from_fn(system::auth::middleware::require_auth);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(auth()),
        )
        // ========================================
        // A001 GRID CONFIGURATION
        // ========================================
        .route(
            "/api/grid_configuration",
            get(handlers::a001_grid_configuration::list)
                .post(handlers::a001_grid_configuration::create)
                .layer(auth()),
        )
        .route(
            "/api/grid_configuration/positions",
            put(handlers::a001_grid_configuration::update_positions).layer(auth()),
        )
        .route(
            "/api/grid_configuration/:id",
            get(handlers::a001_grid_configuration::get_by_id)
                .put(handlers::a001_grid_configuration::update)
                .delete(handlers::a001_grid_configuration::delete)
                .layer(auth()),
        )
        .route(
            "/api/grid_configuration/:id/active",
            post(handlers::a001_grid_configuration::set_active).layer(auth()),
        )
        // ========================================
        // A002 CONTENT CATALOG
        // ========================================
        .route(
            "/api/content/testdata",
            post(handlers::a002_content_entity::insert_test_data).layer(auth()),
        )
        .route(
            "/api/content/:content_type",
            get(handlers::a002_content_entity::list).layer(auth()),
        )
        // ========================================
        // UPLOADS
        // ========================================
        .route(
            "/api/upload/image",
            post(handlers::uploads::upload_image)
                .layer(DefaultBodyLimit::max(
                    config.uploads.max_bytes + MULTIPART_OVERHEAD,
                ))
                .layer(auth()),
        )
}
