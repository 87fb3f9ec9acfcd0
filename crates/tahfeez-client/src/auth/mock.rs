use chrono::{DateTime, TimeZone, Utc};
use tahfeez_core::{Credentials, Tokens, User};

const ACCESS_PREFIX: &str = "mock_access_token_";
const REFRESH_PREFIX: &str = "mock_refresh_token_";

pub(crate) struct MockAccount {
    pub username: &'static str,
    pub password: &'static str,
    pub user_id: u64,
    pub email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
}

/// Demo logins accepted while mock auth is on.
pub(crate) const MOCK_ACCOUNTS: &[MockAccount] = &[MockAccount {
    username: "admin",
    password: "admin123456",
    user_id: 1,
    email: "admin@tahfeez.app",
    first_name: "Admin",
    last_name: "User",
}];

pub(crate) fn find_account(credentials: &Credentials) -> Option<&'static MockAccount> {
    MOCK_ACCOUNTS.iter().find(|account| {
        account.username == credentials.username && account.password == credentials.password
    })
}

fn account_by_username(username: &str) -> Option<&'static MockAccount> {
    MOCK_ACCOUNTS
        .iter()
        .find(|account| account.username == username)
}

impl MockAccount {
    pub fn tokens(&self) -> Tokens {
        Tokens {
            access: format!("{ACCESS_PREFIX}{}", self.username),
            refresh: format!("{REFRESH_PREFIX}{}", self.username),
        }
    }

    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.to_string(),
            email: self.email.to_string(),
            first_name: Some(self.first_name.to_string()),
            last_name: Some(self.last_name.to_string()),
            is_active: true,
            date_joined: demo_epoch(),
        }
    }
}

pub(crate) fn account_for_access_token(token: &str) -> Option<&'static MockAccount> {
    token.strip_prefix(ACCESS_PREFIX).and_then(account_by_username)
}

pub(crate) fn account_for_refresh_token(token: &str) -> Option<&'static MockAccount> {
    token.strip_prefix(REFRESH_PREFIX).and_then(account_by_username)
}

pub(crate) fn demo_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_pair_is_deterministic() {
        let account = find_account(&Credentials::new("admin", "admin123456")).expect("admin");
        assert_eq!(account.user().id, 1);
        let tokens = account.tokens();
        assert_eq!(tokens.access, "mock_access_token_admin");
        assert_eq!(tokens.refresh, "mock_refresh_token_admin");
        assert!(account_for_access_token(&tokens.access).is_some());
        assert!(account_for_refresh_token(&tokens.refresh).is_some());
    }

    #[test]
    fn wrong_password_is_rejected() {
        assert!(find_account(&Credentials::new("admin", "admin")).is_none());
        assert!(find_account(&Credentials::new("Admin", "admin123456")).is_none());
        assert!(account_for_access_token("mock_access_token_ghost").is_none());
    }
}
