use secrecy::SecretString;

/// Personal-account credentials for the Ufanet web login.
///
/// `username` is the contract number printed on the service agreement.
/// Immutable for the lifetime of a [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("user1", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("user1"));
        assert!(!rendered.contains("hunter2"));
    }
}
