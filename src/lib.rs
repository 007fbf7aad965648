pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customers::create_customer,
        handlers::products::create_product,
        handlers::orders::create_order,
        handlers::orders::get_order,
    ),
    components(schemas(
        handlers::customers::CreateCustomerRequest,
        handlers::customers::CustomerResponse,
        handlers::products::CreateProductRequest,
        handlers::products::ProductResponse,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderProductRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderLineResponse,
    )),
    tags(
        (name = "customers", description = "Customer registration"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Order placement and lookup"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Registers the HTTP routes. Expects `web::Data<AppState>` to be provided by
/// the enclosing `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::post().to(handlers::customers::create_customer))
        .route("/products", web::post().to(handlers::products::create_product))
        .service(
            web::scope("/orders")
                .route("", web::post().to(handlers::orders::create_order))
                .route("/{id}", web::get().to(handlers::orders::get_order)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
