pub mod serve;

// re-export
pub use serve::serve;

use std::sync::Arc;

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::AppConfig, record_store::RecordStoreClient, templ_manager::TemplateManager, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: &AppConfig) -> Result<Self> {
        let tm = TemplateManager::init(&config.net_config.templates_glob())?;
        let store_config = &config.store_config;
        let store_client = RecordStoreClient::new(
            &store_config.url,
            store_config.auth_token.clone(),
            store_config.timeout(),
            store_config.page_size,
        )?;
        info!("{:<20} - {}", "Record store:", store_config.url);

        let app_state = AppState::new(tm, store_client);

        let listener = TcpListener::bind(config.net_config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub templ_mgr: TemplateManager,
    pub store_client: RecordStoreClient,
}

/// Application state shared by all handlers.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(templ_mgr: TemplateManager, store_client: RecordStoreClient) -> Self {
        AppState(Arc::new(InternalState {
            templ_mgr,
            store_client,
        }))
    }
}
