//! "Ocultar valores": blurs monetary values on screen, persisted per browser.

use leptos::prelude::*;

use crate::shared::storage::{BrowserStorage, KeyValueStorage};

pub const HIDE_VALUES_KEY: &str = "simulador-fundeb:hide-values";

/// Missing or unreadable preference means values are visible.
pub fn load_hide_values(storage: &impl KeyValueStorage) -> bool {
    storage
        .get_item(HIDE_VALUES_KEY)
        .map_or(false, |v| v.trim() == "true")
}

pub fn save_hide_values(storage: &impl KeyValueStorage, hidden: bool) {
    storage.set_item(HIDE_VALUES_KEY, if hidden { "true" } else { "false" });
}

/// Persists the flipped preference and returns it.
pub fn toggle_hide_values(storage: &impl KeyValueStorage, current: bool) -> bool {
    let next = !current;
    save_hide_values(storage, next);
    next
}

#[derive(Clone, Copy)]
pub struct HideValuesContext {
    hidden: RwSignal<bool>,
}

impl HideValuesContext {
    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn toggle(&self) {
        let next = toggle_hide_values(&BrowserStorage, self.hidden.get_untracked());
        self.hidden.set(next);
    }
}

#[component]
pub fn HideValuesProvider(children: Children) -> impl IntoView {
    let hidden = RwSignal::new(load_hide_values(&BrowserStorage));
    provide_context(HideValuesContext { hidden });
    children()
}

/// Panics outside [`HideValuesProvider`].
pub fn use_hide_values() -> HideValuesContext {
    use_context::<HideValuesContext>().expect("HideValuesProvider not found in component tree")
}

/// A formatted value that is blurred while values are hidden. The text stays
/// in the document so layout does not jump on toggle.
#[component]
pub fn MaskedValue(#[prop(into)] value: Signal<String>) -> impl IntoView {
    let ctx = use_hide_values();
    view! {
        <span
            class=move || {
                if ctx.is_hidden() { "masked-value masked-value--hidden" } else { "masked-value" }
            }
            aria-hidden=move || ctx.is_hidden().to_string()
        >
            {move || value.get()}
        </span>
    }
}

#[component]
pub fn HideValuesToggle() -> impl IntoView {
    let ctx = use_hide_values();
    view! {
        <button
            class="button button--ghost"
            title=move || if ctx.is_hidden() { "Mostrar valores" } else { "Ocultar valores" }
            on:click=move |_| ctx.toggle()
        >
            {move || if ctx.is_hidden() { "👁 Mostrar valores" } else { "🙈 Ocultar valores" }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_defaults_to_visible() {
        let storage = MemoryStorage::default();
        assert!(!load_hide_values(&storage));

        storage.set_item(HIDE_VALUES_KEY, "garbage");
        assert!(!load_hide_values(&storage));
    }

    #[test]
    fn test_toggle_persists() {
        let storage = MemoryStorage::default();

        let hidden = toggle_hide_values(&storage, load_hide_values(&storage));
        assert!(hidden);
        assert_eq!(storage.get_item(HIDE_VALUES_KEY).as_deref(), Some("true"));
        assert!(load_hide_values(&storage));

        let hidden = toggle_hide_values(&storage, hidden);
        assert!(!hidden);
        assert!(!load_hide_values(&storage));
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        for initial in [false, true] {
            let storage = MemoryStorage::default();
            save_hide_values(&storage, initial);
            let once = toggle_hide_values(&storage, load_hide_values(&storage));
            let twice = toggle_hide_values(&storage, once);
            assert_eq!(twice, initial);
            assert_eq!(load_hide_values(&storage), initial);
        }
    }
}
