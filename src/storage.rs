use wasm_bindgen::JsValue;

use crate::constants::LOCALE_STORAGE_KEY;
use crate::i18n::Locale;

fn local_storage() -> Result<web_sys::Storage, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    window
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("no local storage exists"))
}

/// Locale chosen on a previous visit, if any.  Storage errors (private
/// browsing, disabled storage) and stale values read as "nothing saved".
pub fn load_locale() -> Option<Locale> {
    let storage = local_storage().ok()?;
    let code = storage.get_item(LOCALE_STORAGE_KEY).ok()??;
    match code.parse() {
        Ok(locale) => Some(locale),
        Err(e) => {
            log::warn!("Ignoring stored locale: {}", e);
            None
        }
    }
}

pub fn save_locale(locale: Locale) -> Result<(), JsValue> {
    local_storage()?.set_item(LOCALE_STORAGE_KEY, locale.code())
}
