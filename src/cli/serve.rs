use std::sync::Arc;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;

use crate::api::{BrokerApi, HealthApi};
use crate::app_data::AppData;
use crate::coordinators::ProvisionCoordinator;

/// Start the broker HTTP server
///
/// API endpoints are nested under `/api` and Swagger UI under `/swagger`.
pub async fn run_server(app_data: Arc<AppData>) -> Result<(), Box<dyn std::error::Error>> {
    let address = app_data.settings.server_address();

    let provision_coordinator = Arc::new(ProvisionCoordinator::new(app_data.clone()));
    let broker_api = BrokerApi::new(provision_coordinator);

    // Create OpenAPI service with API implementation
    let api_service = OpenApiService::new(
        (HealthApi, broker_api),
        "Template Service Broker",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", address));

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
