//! Fetch-on-change state shared by the data hooks.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::use_auth;

/// Result of a data hook. `data` keeps its default while nothing is loaded.
pub struct Fetched<T: 'static> {
    pub data: ReadSignal<T>,
    pub loading: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,
    version: RwSignal<u64>,
}

impl<T: 'static> Clone for Fetched<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Fetched<T> {}

impl<T: 'static> Fetched<T> {
    /// Runs the request again with the current key.
    pub fn refetch(&self) {
        self.version.update(|v| *v += 1);
    }
}

/// Picks the message shown for a failed request.
pub fn error_or_default(message: String, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}

/// A request is about to start when both the key and the session token are
/// present, so the first render already reports loading.
fn starts_loading<K>(key: Option<&K>, token: Option<&String>) -> bool {
    key.is_some() && token.is_some()
}

/// Calls `fetch(token, key)` whenever the key, the session token or the
/// refetch counter changes.
///
/// A `None` key clears the state. Responses that arrive after the owner is
/// cleaned up, or after a newer request started, are dropped.
pub fn use_fetch<K, T, F, Fut>(
    key: impl Fn() -> Option<K> + 'static,
    fetch: F,
    default_error: &'static str,
) -> Fetched<T>
where
    K: 'static,
    T: Default + Send + Sync + 'static,
    F: Fn(String, K) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let auth = use_auth();
    let (data, set_data) = signal(T::default());
    let will_fetch = untrack(|| starts_loading(key().as_ref(), auth.token().as_ref()));
    let (loading, set_loading) = signal(will_fetch);
    let (error, set_error) = signal(None::<String>);
    let version = RwSignal::new(0u64);

    let mounted = Arc::new(AtomicBool::new(true));
    {
        let mounted = mounted.clone();
        on_cleanup(move || mounted.store(false, Ordering::Relaxed));
    }
    let generation = Arc::new(AtomicU64::new(0));

    Effect::new(move |_| {
        version.track();
        let key = key();
        let token = auth.token();
        let request = generation.fetch_add(1, Ordering::Relaxed) + 1;

        let (Some(key), Some(token)) = (key, token) else {
            set_data.set(T::default());
            set_loading.set(false);
            set_error.set(None);
            return;
        };

        set_loading.set(true);
        set_error.set(None);

        let pending = fetch(token, key);
        let mounted = mounted.clone();
        let generation = generation.clone();
        spawn_local(async move {
            let result = pending.await;
            if !mounted.load(Ordering::Relaxed) || generation.load(Ordering::Relaxed) != request {
                return;
            }
            match result {
                Ok(value) => set_data.set(value),
                Err(e) => {
                    log::warn!("{}: {}", default_error, e);
                    set_data.set(T::default());
                    set_error.set(Some(error_or_default(e, default_error)));
                }
            }
            set_loading.set(false);
        });
    });

    Fetched {
        data,
        loading,
        error,
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_or_default() {
        assert_eq!(
            error_or_default(String::new(), "Erro ao carregar categorias"),
            "Erro ao carregar categorias"
        );
        assert_eq!(
            error_or_default("  ".into(), "Erro ao carregar categorias"),
            "Erro ao carregar categorias"
        );
        assert_eq!(error_or_default("Acesso negado.".into(), "x"), "Acesso negado.");
    }

    #[test]
    fn test_starts_loading_only_with_key_and_token() {
        let token = "jwt".to_string();
        assert!(starts_loading(Some(&7), Some(&token)));
        assert!(!starts_loading(None::<&i32>, Some(&token)));
        assert!(!starts_loading(Some(&7), None));
    }
}
