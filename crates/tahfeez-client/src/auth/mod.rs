//! Login, registration and token lifecycle for a single session.

mod mock;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tahfeez_core::{
    endpoints, messages, ApiResponse, Credentials, LogoutRequest, RefreshRequest,
    RegisterRequest, RegisterResponse, TokenPairResponse, Tokens, User, VerifyRequest,
};
use tracing::{debug, info, warn};

use crate::http::{failure_message, ApiBase};
use crate::token_store::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

pub struct AuthClient {
    http: reqwest::Client,
    api: ApiBase,
    tokens: Arc<TokenStore>,
    mock: bool,
    mock_delay: Duration,
    session: Mutex<SessionState>,
    refresh_lock: tokio::sync::Mutex<()>,
    mock_user_seq: AtomicU64,
}

impl AuthClient {
    pub fn new(
        http: reqwest::Client,
        api: ApiBase,
        tokens: Arc<TokenStore>,
        mock: bool,
        mock_delay: Duration,
    ) -> Self {
        let initial = if tokens.access_token().is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        };
        Self {
            http,
            api,
            tokens,
            mock,
            mock_delay,
            session: Mutex::new(initial),
            refresh_lock: tokio::sync::Mutex::new(()),
            mock_user_seq: AtomicU64::new(2),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn is_mock(&self) -> bool {
        self.mock
    }

    pub fn session_state(&self) -> SessionState {
        *self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_user(&self) -> Option<User> {
        self.tokens.user()
    }

    /// Exchanges credentials for a token pair. A failed login restores the
    /// previous session state and leaves storage untouched.
    pub async fn login(&self, credentials: &Credentials) -> ApiResponse<Tokens> {
        if credentials.is_blank() {
            return ApiResponse::failure(messages::CREDENTIALS_REQUIRED);
        }
        let previous = self.set_state(SessionState::LoggingIn);
        let result = if self.mock {
            self.mock_login(credentials).await
        } else {
            self.remote_login(credentials).await
        };
        if result.success {
            self.set_state(SessionState::LoggedIn);
            info!(username = %credentials.username, mock = self.mock, "logged in");
        } else {
            let restored = match previous {
                SessionState::LoggingIn => SessionState::LoggedOut,
                other => other,
            };
            self.set_state(restored);
            info!(username = %credentials.username, "login rejected");
        }
        result
    }

    async fn mock_login(&self, credentials: &Credentials) -> ApiResponse<Tokens> {
        self.simulate_latency().await;
        let Some(account) = mock::find_account(credentials) else {
            return ApiResponse::failure(messages::INVALID_CREDENTIALS);
        };
        let tokens = account.tokens();
        if let Err(err) = self.tokens.set_tokens(&tokens.access, &tokens.refresh) {
            return ApiResponse::failure(format!("Failed to store session: {err}"));
        }
        if let Err(err) = self.tokens.set_user(&account.user()) {
            warn!("failed to cache demo user: {err}");
        }
        ApiResponse::ok(tokens)
    }

    async fn remote_login(&self, credentials: &Credentials) -> ApiResponse<Tokens> {
        let url = self.api.url(endpoints::AUTH_TOKEN);
        let response = match self.http.post(&url).json(credentials).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %url, "login request failed: {err}");
                return ApiResponse::failure(err.to_string());
            }
        };
        let status = response.status();
        if !status.is_success() {
            let message = if status.as_u16() == 400 || status.as_u16() == 401 {
                messages::INVALID_CREDENTIALS.to_string()
            } else {
                failure_message(response).await
            };
            return ApiResponse::failure(message);
        }
        let grant: TokenPairResponse = match response.json().await {
            Ok(grant) => grant,
            Err(err) => return ApiResponse::failure(format!("Invalid login response: {err}")),
        };
        let Some(refresh) = grant.refresh else {
            return ApiResponse::failure("Invalid login response: missing refresh token");
        };
        if let Err(err) = self.tokens.set_tokens(&grant.access, &refresh) {
            return ApiResponse::failure(format!("Failed to store session: {err}"));
        }
        if let Some(user) = grant.user.as_ref() {
            if let Err(err) = self.tokens.set_user(user) {
                warn!("failed to cache user: {err}");
            }
        }
        ApiResponse::ok(Tokens {
            access: grant.access,
            refresh,
        })
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse<User> {
        let user = if self.mock {
            self.simulate_latency().await;
            User {
                id: self.mock_user_seq.fetch_add(1, Ordering::Relaxed),
                username: request.username.trim().to_string(),
                email: request.email.trim().to_string(),
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                is_active: true,
                date_joined: Utc::now(),
            }
        } else {
            let url = self.api.url(endpoints::AUTH_REGISTER);
            let response = match self.http.post(&url).json(request).send().await {
                Ok(response) => response,
                Err(err) => {
                    warn!(url = %url, "register request failed: {err}");
                    return ApiResponse::failure(err.to_string());
                }
            };
            if !response.status().is_success() {
                return ApiResponse::failure(failure_message(response).await);
            }
            match response.json::<RegisterResponse>().await {
                Ok(body) => body.into_user(),
                Err(err) => {
                    return ApiResponse::failure(format!("Invalid register response: {err}"))
                }
            }
        };
        if let Err(err) = self.tokens.set_user(&user) {
            warn!("failed to cache registered user: {err}");
        }
        info!(username = %user.username, "registered");
        ApiResponse::ok(user)
    }

    /// Trades the stored refresh token for a new pair. A rejected refresh
    /// token ends the session.
    pub async fn refresh_access_token(&self) -> ApiResponse<Tokens> {
        if self.tokens.refresh_token().is_none() {
            return ApiResponse::failure(messages::NO_REFRESH_TOKEN);
        }
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh on behalf of a request that was answered 401 while carrying
    /// `rejected`. Callers queued behind an in-flight refresh reuse its
    /// result instead of refreshing again.
    pub async fn refresh_after_rejection(&self, rejected: Option<&str>) -> ApiResponse<Tokens> {
        if self.tokens.refresh_token().is_none() {
            return ApiResponse::failure(messages::NO_REFRESH_TOKEN);
        }
        let _guard = self.refresh_lock.lock().await;
        if let Some(current) = self.tokens.tokens() {
            if Some(current.access.as_str()) != rejected {
                debug!("token already refreshed by a concurrent request");
                return ApiResponse::ok(current);
            }
        }
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> ApiResponse<Tokens> {
        let Some(refresh) = self.tokens.refresh_token() else {
            return ApiResponse::failure(messages::NO_REFRESH_TOKEN);
        };

        if self.mock {
            self.simulate_latency().await;
            return match mock::account_for_refresh_token(&refresh) {
                Some(account) => {
                    let tokens = account.tokens();
                    match self.tokens.set_tokens(&tokens.access, &tokens.refresh) {
                        Ok(()) => {
                            self.set_state(SessionState::LoggedIn);
                            ApiResponse::ok(tokens)
                        }
                        Err(err) => ApiResponse::failure(format!("Failed to store session: {err}")),
                    }
                }
                None => self.expire_session(),
            };
        }

        let url = self.api.url(endpoints::AUTH_REFRESH);
        let payload = RefreshRequest { refresh: &refresh };
        let response = match self.http.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %url, "token refresh request failed: {err}");
                return ApiResponse::failure(err.to_string());
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "refresh token rejected");
            return self.expire_session();
        }
        let grant: TokenPairResponse = match response.json().await {
            Ok(grant) => grant,
            Err(err) => return ApiResponse::failure(format!("Invalid refresh response: {err}")),
        };
        let tokens = Tokens {
            access: grant.access,
            refresh: grant.refresh.unwrap_or(refresh),
        };
        if let Err(err) = self.tokens.set_tokens(&tokens.access, &tokens.refresh) {
            return ApiResponse::failure(format!("Failed to store session: {err}"));
        }
        self.set_state(SessionState::LoggedIn);
        info!("access token refreshed");
        ApiResponse::ok(tokens)
    }

    fn expire_session(&self) -> ApiResponse<Tokens> {
        self.end_session("session expired");
        ApiResponse::failure(messages::SESSION_EXPIRED)
    }

    pub async fn verify_token(&self, token: &str) -> bool {
        self.verify(token).await.unwrap_or(false)
    }

    /// `Ok(valid)` when the server (or mock table) answered, `Err` when the
    /// check could not be made.
    async fn verify(&self, token: &str) -> Result<bool, reqwest::Error> {
        if self.mock {
            return Ok(mock::account_for_access_token(token).is_some());
        }
        let url = self.api.url(endpoints::AUTH_VERIFY);
        let response = self
            .http
            .post(&url)
            .json(&VerifyRequest { token })
            .send()
            .await
            .inspect_err(|err| warn!(url = %url, "token verify request failed: {err}"))?;
        Ok(response.status().is_success())
    }

    /// True when an access token is stored and the server accepts it. A
    /// rejected token ends the session; an unreachable server does not.
    pub async fn is_authenticated(&self) -> bool {
        let Some(access) = self.tokens.access_token() else {
            return false;
        };
        match self.verify(&access).await {
            Ok(true) => {
                self.set_state(SessionState::LoggedIn);
                true
            }
            Ok(false) => {
                self.end_session("access token rejected by verify");
                false
            }
            Err(_) => false,
        }
    }

    /// Always leaves the session signed out. The server-side logout and the
    /// storage clear are both best-effort.
    pub async fn logout(&self) {
        if !self.mock {
            if let Some(refresh) = self.tokens.refresh_token() {
                let url = self.api.url(endpoints::AUTH_LOGOUT);
                let mut request = self.http.post(&url).json(&LogoutRequest { refresh: &refresh });
                if let Some(access) = self.tokens.access_token() {
                    request = request.bearer_auth(access);
                }
                match request.send().await {
                    Ok(response) if !response.status().is_success() => {
                        warn!(status = %response.status(), "server logout rejected");
                    }
                    Ok(_) => {}
                    Err(err) => warn!(url = %url, "server logout failed: {err}"),
                }
            }
        }
        self.end_session("logout");
        info!("logged out");
    }

    fn end_session(&self, reason: &'static str) {
        if let Err(err) = self.tokens.clear_tokens() {
            warn!(reason, "failed to clear stored session: {err}");
        }
        self.set_state(SessionState::LoggedOut);
        debug!(reason, "session ended");
    }

    fn set_state(&self, next: SessionState) -> SessionState {
        let mut state = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *state, next)
    }

    async fn simulate_latency(&self) {
        if !self.mock_delay.is_zero() {
            tokio::time::sleep(self.mock_delay).await;
        }
    }
}
