use crate::shared::storage::{BrowserStorage, KeyValueStorage};

const ACCESS_TOKEN_KEY: &str = "simulador-fundeb:access-token";
const REFRESH_TOKEN_KEY: &str = "simulador-fundeb:refresh-token";

pub fn save_tokens(access_token: &str, refresh_token: &str) {
    BrowserStorage.set_item(ACCESS_TOKEN_KEY, access_token);
    BrowserStorage.set_item(REFRESH_TOKEN_KEY, refresh_token);
}

pub fn save_access_token(token: &str) {
    BrowserStorage.set_item(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    BrowserStorage.get_item(ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token() -> Option<String> {
    BrowserStorage.get_item(REFRESH_TOKEN_KEY)
}

pub fn clear_tokens() {
    BrowserStorage.remove_item(ACCESS_TOKEN_KEY);
    BrowserStorage.remove_item(REFRESH_TOKEN_KEY);
}
