//! Route definitions for the Mang Iyan backend

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes (login is public, /me is protected)
        .nest("/auth", auth_routes())
        // Protected routes - ingredient catalog
        .nest("/ingredients", ingredient_routes())
        // Protected routes - stock ledger
        .nest("/stock", ledger_routes())
        // Protected routes - product catalog and recipes
        .nest("/products", product_routes())
        .nest("/selling-units", selling_unit_routes())
        // Protected routes - production
        .nest("/production", production_routes())
        // Protected routes - cashier and sales history
        .nest("/sales", sales_routes())
        // Protected routes - reporting
        .nest("/reports", reporting_routes())
        // Admin routes - staff accounts and system settings
        .nest("/users", user_routes())
        .nest("/settings", settings_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn(auth_middleware)),
        )
        .route("/login", post(handlers::login))
}

/// Ingredient catalog routes (protected)
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:id",
            get(handlers::get_ingredient)
                .put(handlers::update_ingredient)
                .delete(handlers::archive_ingredient),
        )
        .route("/:id/restore", post(handlers::restore_ingredient))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock ledger routes (protected)
fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/restock", post(handlers::restock))
        .route("/logs", get(handlers::list_logs))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::archive_product),
        )
        .route("/:id/restore", post(handlers::restore_product))
        .route(
            "/:id/selling-units",
            get(handlers::list_selling_units).post(handlers::add_selling_unit),
        )
        .route(
            "/:id/recipe",
            get(handlers::list_recipe).post(handlers::add_recipe_entry),
        )
        .route(
            "/:id/recipe/:entry_id",
            put(handlers::update_recipe_entry).delete(handlers::remove_recipe_entry),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Selling unit routes addressed by unit id (protected)
fn selling_unit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:unit_id",
            put(handlers::update_selling_unit).delete(handlers::delete_selling_unit),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Production routes (protected)
fn production_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_batches).post(handlers::record_batch),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Cashier and sales history routes (protected)
fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(handlers::checkout))
        .route("/", get(handlers::list_sales))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn reporting_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/critical-stock", get(handlers::get_critical_stock))
        .route("/revenue/weekly", get(handlers::get_weekly_revenue))
        .route("/revenue/monthly", get(handlers::get_monthly_revenue))
        .route("/best-sellers", get(handlers::get_best_sellers))
        .route("/sales/export", get(handlers::export_sales_csv))
        .route("/stock/export", get(handlers::export_stock_csv))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Staff account routes (admin checks inside the handlers)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:id",
            put(handlers::update_user).delete(handlers::deactivate_user),
        )
        .route("/:id/reactivate", post(handlers::reactivate_user))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// System settings routes (admin checks inside the handlers)
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/factory-reset", post(handlers::factory_reset))
        .route_layer(middleware::from_fn(auth_middleware))
}
