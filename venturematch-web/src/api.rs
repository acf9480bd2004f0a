//! Browser bindings for the shared API client.
//!
//! The token lives in `localStorage` under the same key the backend's other
//! clients use, written as a raw string rather than JSON.

use gloo_storage::{LocalStorage, Storage};
use once_cell::unsync::OnceCell;
use shared::api::ApiClient;
use shared::collection::Confirm;
use shared::session::{SessionStore, StorageError, TokenStorage};
use wasm_bindgen::JsValue;

use crate::config::FrontendConfig;

thread_local! {
    static SHARED_CLIENT: OnceCell<ApiClient> = OnceCell::new();
}

/// `window.localStorage` as token storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

fn js_error(err: &JsValue) -> StorageError {
    StorageError::unavailable(format!("{err:?}"))
}

impl TokenStorage for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(|err| js_error(&err))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| js_error(&err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| js_error(&err))
    }
}

/// The client every page talks to the backend through.
pub fn client() -> ApiClient {
    SHARED_CLIENT.with(|cell| {
        cell.get_or_init(|| {
            let config = FrontendConfig::new();
            log::info!("using backend at {}", config.api_url());
            ApiClient::http(config.api_url(), SessionStore::new(BrowserStorage))
        })
        .clone()
    })
}

/// The browser-backed session.
pub fn session() -> SessionStore {
    client().session().clone()
}

/// `window.confirm`; a missing window answers no.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}
