use leptos::prelude::*;

/// Placeholder shown where a list has nothing to show yet.
#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    /// Call to action, e.g. a link to create the first item
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-state__title">{title}</div>
            {description.map(|d| view! { <p class="empty-state__description">{d}</p> })}
            {children.map(|c| view! { <div class="empty-state__actions">{c()}</div> })}
        </div>
    }
}

/// Error banner in the page's warning-box style.
#[component]
pub fn ErrorBox(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--error">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">{message}</span>
        </div>
    }
}
