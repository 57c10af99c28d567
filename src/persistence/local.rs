use std::io;

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::KeyValueStore;

/// Browser LocalStorage
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Storage,
}

fn js_err(e: JsValue) -> io::Error {
    io::Error::other(format!("{e:?}"))
}

impl LocalStore {
    /// `None` when LocalStorage is unavailable (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        self.storage.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.storage.set_item(key, value).map_err(js_err)
    }
}
