//! Sidebar with the application's sections.

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

const MENU: &[MenuItem] = &[
    MenuItem {
        path: "/app",
        label: "Painel por localidade",
        icon: "dashboard",
        admin_only: false,
    },
    MenuItem {
        path: "/app/simulacoes",
        label: "Minhas simulações",
        icon: "simulations",
        admin_only: false,
    },
    MenuItem {
        path: "/app/simulacoes/nova",
        label: "Nova simulação",
        icon: "plus",
        admin_only: false,
    },
    MenuItem {
        path: "/app/admin/localidades",
        label: "Localidades",
        icon: "localidades",
        admin_only: true,
    },
];

pub fn menu_items(is_admin: bool) -> Vec<&'static MenuItem> {
    MENU.iter().filter(|m| is_admin || !m.admin_only).collect()
}

#[component]
pub fn Navigation(collapsed: ReadSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let state = auth.state();
    let is_admin = Memo::new(move |_| state.with(|s| s.is_admin()));

    view! {
        <nav
            data-zone="left"
            class=move || if collapsed.get() { "navigation navigation--collapsed" } else { "navigation" }
        >
            <ul class="navigation__list">
                {move || {
                    menu_items(is_admin.get())
                        .into_iter()
                        .map(|item| {
                            view! {
                                <li class="navigation__item" title=item.label>
                                    <A href=item.path exact=true>
                                        <span class="navigation__icon">{icon(item.icon)}</span>
                                        <Show when=move || !collapsed.get()>
                                            <span class="navigation__label">{item.label}</span>
                                        </Show>
                                    </A>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_entries_hidden_for_regular_users() {
        let regular: Vec<_> = menu_items(false).iter().map(|m| m.path).collect();
        assert!(!regular.contains(&"/app/admin/localidades"));
        assert!(regular.contains(&"/app/simulacoes"));

        assert_eq!(menu_items(true).len(), MENU.len());
    }
}
