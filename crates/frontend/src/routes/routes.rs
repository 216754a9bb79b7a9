use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use thaw::*;

use crate::domain::a001_translation_record::ui::list::TranslationRecordList;
use crate::domain::a002_translation_sound_record::ui::list::TranslationSoundRecordList;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
fn Header() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let user_label = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.full_name.clone().unwrap_or_else(|| u.email.clone()))
                .unwrap_or_default()
        })
    };

    view! {
        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center attr:class="app-header">
            <nav class="app-header__nav">
                <A href="/">"Translations"</A>
                <A href="/with-sound">"Translations with sound"</A>
            </nav>
            <Space>
                <span class="app-header__user">{user_label}</span>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| do_logout(set_auth_state)>
                    "Sign out"
                </Button>
            </Space>
        </Flex>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.credentials.is_some())
            fallback=|| view! {
                <div class="notice notice--signed-out">
                    "You are signed out. Sign in from the main site to manage your records."
                </div>
            }
        >
            <Router>
                <Header />
                <main class="app-main">
                    <Routes fallback=|| view! { <p class="notice">"Page not found."</p> }>
                        <Route path=path!("/") view=TranslationRecordList />
                        <Route path=path!("/with-sound") view=TranslationSoundRecordList />
                    </Routes>
                </main>
            </Router>
        </Show>
    }
}
