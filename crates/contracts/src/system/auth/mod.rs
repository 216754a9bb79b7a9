use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Signed-in session as persisted by the login collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: UserInfo,
}

/// Values appended to every backend request, consumed opaquely
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub token: String,
    pub user_id: String,
}

impl Credentials {
    pub fn new(email: &str, token: &str, user_id: &str) -> Self {
        Self {
            email: email.to_string(),
            token: token.to_string(),
            user_id: user_id.to_string(),
        }
    }

    /// `email` and `token` form fields, in that order
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("email".to_string(), self.email.clone()),
            ("token".to_string(), self.token.clone()),
        ]
    }
}

impl From<&AuthSession> for Credentials {
    fn from(session: &AuthSession) -> Self {
        Self {
            email: session.user.email.clone(),
            token: session.access_token.clone(),
            user_id: session.user.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_session() {
        let session: AuthSession = serde_json::from_str(
            r#"{"access_token":"t-1","user":{"id":"u-1","email":"a@b.c","full_name":null}}"#,
        )
        .unwrap();
        let creds = Credentials::from(&session);
        assert_eq!(creds, Credentials::new("a@b.c", "t-1", "u-1"));
        assert_eq!(creds.form_pairs()[0], ("email".to_string(), "a@b.c".to_string()));
    }
}
