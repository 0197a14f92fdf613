use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;
use workout_tracker_lib::{error::StorageError, storage::KeyValueStore};

/// `window.localStorage` as a [`KeyValueStore`].
pub struct LocalStore;

fn backend_error(err: JsValue) -> StorageError {
    StorageError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(backend_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(backend_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw().remove_item(key).map_err(backend_error)
    }
}
