pub mod left;
pub mod top_header;

use leptos::prelude::*;
use leptos_router::components::Outlet;
use left::navigation::Navigation;
use top_header::TopHeader;

/// Authenticated application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// | Navigation |          Outlet             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Layout() -> impl IntoView {
    // Collapse state lives here; Navigation and TopHeader only receive it.
    let collapsed = RwSignal::new(false);

    view! {
        <div class="app-layout">
            <TopHeader collapsed=collapsed />
            <div class="app-body">
                <Navigation collapsed=collapsed.read_only() />
                <main class="app-main">
                    <Outlet />
                </main>
            </div>
        </div>
    }
}
