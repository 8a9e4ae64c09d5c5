use platform::{AlertDispatcher, PlatformApi};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn PlatformApi>,
    pub alerts: Arc<AlertDispatcher>,
    pub app_account: String,
}
