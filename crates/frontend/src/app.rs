use crate::routes::routes::AppRoutes;
use crate::shared::config::load_grid_config;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Grid defaults and API location, read once per page load
    provide_context(load_grid_config());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
