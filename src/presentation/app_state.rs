// Application state for HTTP handlers
use crate::application::mock_api_service::MockApiService;
use crate::application::refresh_service::RefreshService;
use crate::infrastructure::config::ApiKeySettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub refresh_service: Arc<RefreshService>,
    pub mock_api: MockApiService,
    pub api_keys: ApiKeySettings,
}
