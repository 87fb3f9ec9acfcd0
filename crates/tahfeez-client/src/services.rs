use std::sync::Arc;

use tracing::debug;

use crate::auth::AuthClient;
use crate::config::{ClientConfig, Preferences};
use crate::error::ClientError;
use crate::http::{ApiBase, AuthenticatedRequest};
use crate::router::DataSourceRouter;
use crate::sources::{DataSource, MockDataSource, RemoteDataSource};
use crate::storage::KeyValueStore;
use crate::token_store::TokenStore;

/// Everything a command needs, wired once at startup and passed down.
pub struct Services {
    pub config: ClientConfig,
    pub preferences: Arc<Preferences>,
    pub tokens: Arc<TokenStore>,
    pub auth: Arc<AuthClient>,
    pub data: Arc<DataSourceRouter>,
}

impl Services {
    pub fn create(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        config.validate()?;
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        let api = ApiBase::from_config(&config);
        let preferences = Arc::new(Preferences::from_config(&config));
        let tokens = Arc::new(TokenStore::new(store));
        let auth = Arc::new(AuthClient::new(
            http.clone(),
            api.clone(),
            Arc::clone(&tokens),
            config.mock_auth,
            config.mock_delay(),
        ));
        let request = AuthenticatedRequest::new(http, Arc::clone(&auth));
        let remote: Arc<dyn DataSource> = Arc::new(RemoteDataSource::new(
            request,
            api,
            Arc::clone(&preferences),
        ));
        let mock: Arc<dyn DataSource> = Arc::new(MockDataSource::new(
            config.mock_delay(),
            Arc::clone(&preferences),
        ));
        let data = Arc::new(DataSourceRouter::new(remote, mock, Arc::clone(&preferences)));
        debug!(
            api_root = %config.api_root(),
            use_api = config.use_api,
            mock_auth = config.mock_auth,
            "services created"
        );
        Ok(Self {
            config,
            preferences,
            tokens,
            auth,
            data,
        })
    }

    /// Drops the in-memory session mirror; persisted state is untouched.
    pub fn dispose(&self) {
        self.tokens.reset_mirror();
        debug!("services disposed");
    }
}
