use contracts::system::auth::AuthSession;
use web_sys::window;

/// Written by the sign-in page as JSON `AuthSession`
const SESSION_KEY: &str = "auth_session";

pub fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Signed-in session from localStorage, if present and readable
pub fn get_session() -> Option<AuthSession> {
    let raw = get_local_storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring unreadable auth session: {}", e);
            None
        }
    }
}

/// Clear the stored session
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
