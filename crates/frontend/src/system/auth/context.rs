use contracts::system::auth::{Credentials, UserInfo};
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub credentials: Option<Credentials>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    fn restore() -> Self {
        match storage::get_session() {
            Some(session) => {
                log::info!("Restored session for {}", session.user.email);
                Self {
                    credentials: Some(Credentials::from(&session)),
                    user_info: Some(session.user),
                }
            }
            None => Self::default(),
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restore());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    (expect_context::<ReadSignal<AuthState>>(), expect_context::<WriteSignal<AuthState>>())
}

/// Credentials of the signed-in user, `None` when signed out
pub fn use_credentials() -> Signal<Option<Credentials>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.credentials.clone()))
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}
