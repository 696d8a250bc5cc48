//! Login gate in front of the catalog. Credentials are a plaintext literal pair
//! compared exactly; there is no hashing, lockout, or session model.

use thiserror::Error;

/// Username/password pair the gate accepts.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive comparison. No trimming.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    AwaitingCredentials,
    Authenticated,
}

/// Tracks whether the single session of this process has been unlocked.
#[derive(Debug)]
pub struct LoginGate {
    credentials: Credentials,
    state: LoginState,
    failed_attempts: u32,
}

impl LoginGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: LoginState::AwaitingCredentials,
            failed_attempts: 0,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Check a credential pair. Once authenticated the gate stays open and
    /// further submissions are accepted without comparison.
    pub fn submit(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.state == LoginState::Authenticated {
            return Ok(());
        }

        if self.credentials.matches(username, password) {
            self.state = LoginState::Authenticated;
            tracing::info!(
                username,
                failed_attempts = self.failed_attempts,
                "login succeeded"
            );
            Ok(())
        } else {
            self.failed_attempts += 1;
            tracing::warn!(
                username,
                failed_attempts = self.failed_attempts,
                "login rejected"
            );
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> LoginGate {
        LoginGate::new(Credentials::new("admin", "admin"))
    }

    #[test]
    fn exact_match_authenticates() {
        let mut gate = gate();
        assert_eq!(gate.submit("admin", "admin"), Ok(()));
        assert_eq!(gate.state(), LoginState::Authenticated);
    }

    #[test]
    fn mismatch_keeps_waiting_and_allows_retries() {
        let mut gate = gate();
        for (user, pass) in [("admin", "wrong"), ("Admin", "admin"), ("", ""), (" admin", "admin")] {
            assert_eq!(gate.submit(user, pass), Err(AuthError::InvalidCredentials));
            assert_eq!(gate.state(), LoginState::AwaitingCredentials);
        }
        assert_eq!(gate.failed_attempts(), 4);

        assert_eq!(gate.submit("admin", "admin"), Ok(()));
        assert_eq!(gate.state(), LoginState::Authenticated);
    }

    #[test]
    fn debug_output_hides_the_password() {
        let rendered = format!("{:?}", Credentials::new("admin", "s3cret"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }
}
