// Application layer - Use cases over the domain model
pub mod dashboard_service;
pub mod device_aggregator;
pub mod fleet_reducer;
pub mod mock_api_service;
pub mod refresh_service;
pub mod series_windower;
pub mod telemetry_repository;
