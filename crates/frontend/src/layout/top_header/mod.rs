//! Top bar: navigation toggle, title, value masking, user and logout.

use crate::shared::hide_values::HideValuesToggle;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::LOGIN_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn TopHeader(collapsed: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.sign_out().await;
            navigate(LOGIN_PATH, Default::default());
        });
    };

    let user_label = move || auth.user().map(|u| u.display_name().to_string()).unwrap_or_default();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                    title=move || if collapsed.get() { "Expandir menu" } else { "Recolher menu" }
                >
                    {move || if collapsed.get() { icon("chevron-right") } else { icon("chevron-left") }}
                </button>
                <span class="top-header__title">"Simulador FUNDEB"</span>
            </div>

            <div class="top-header__actions">
                <HideValuesToggle />
                <span class="top-header__user">{user_label}</span>
                <button class="top-header__icon-btn" title="Sair" on:click=logout>
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
