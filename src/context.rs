use reqwest::Client;

use crate::{config::Settings, management::CredentialStore};

/// Everything the components share for the lifetime of the process.
///
/// Built once in `main` and handed by reference to the token authority, the
/// playback commander and the scheduler.
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    client: Client,
    store: CredentialStore,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let store = CredentialStore::new(settings.credentials_path.clone());
        Self {
            settings,
            client: Client::new(),
            store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
}
