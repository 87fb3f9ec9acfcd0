use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tahfeez_core::{
    endpoints, ApiResponse, DashboardStats, Goal, GoalFilters, GoalUpdate, Language, LocaleFilter,
    Message, MessageFilters, NewGoal, NewSubscription, Package, PackageComparison,
    PaginatedResponse, PaymentVerification, ProgressUpdate, QueryFilters, RatingRequest, Scope,
    ScopeCategory, ScopeFilters, ScopesUpdate, Subscription, SubscriptionFilters,
};
use tracing::warn;

use super::{DataSource, SourceResult};
use crate::config::Preferences;
use crate::error::ClientError;
use crate::http::{failure_message, ApiBase, AuthenticatedRequest};

/// Live backend: every operation is one authenticated HTTP call whose
/// outcome is folded into an [`ApiResponse`].
pub struct RemoteDataSource {
    request: AuthenticatedRequest,
    api: ApiBase,
    preferences: Arc<Preferences>,
}

impl RemoteDataSource {
    pub fn new(request: AuthenticatedRequest, api: ApiBase, preferences: Arc<Preferences>) -> Self {
        Self {
            request,
            api,
            preferences,
        }
    }

    fn language_for(&self, filters: &impl QueryFilters) -> Language {
        filters
            .language()
            .unwrap_or_else(|| self.preferences.language())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &impl QueryFilters,
    ) -> SourceResult<T> {
        let url = self.api.url_with_query(path, filters.query_pairs());
        self.call(Method::GET, url, None, Some(self.language_for(filters)))
            .await
    }

    async fn get_plain<T: DeserializeOwned>(&self, path: &str) -> SourceResult<T> {
        let url = self.api.url(path);
        let language = self.preferences.language();
        self.call(Method::GET, url, None, Some(language)).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> SourceResult<T> {
        let url = self.api.url(path);
        let body = body.map(serde_json::to_string).transpose()?;
        let language = self.preferences.language();
        self.call(method, url, body, Some(language)).await
    }

    async fn delete(&self, path: &str) -> SourceResult<()> {
        let url = self.api.url(path);
        let language = self.preferences.language();
        let response: ApiResponse<IgnoredAny> =
            self.call(Method::DELETE, url, None, Some(language)).await?;
        Ok(response.map(|_| ()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
        language: Option<Language>,
    ) -> SourceResult<T> {
        let response = match self.request.send(method.clone(), &url, body, language).await {
            Ok(response) => response,
            Err(err) => {
                warn!(method = %method, url = %url, "request failed: {err}");
                return Ok(ApiResponse::failure(err.to_string()));
            }
        };
        let status = response.status();
        if !status.is_success() {
            return Ok(ApiResponse::failure(failure_message(response).await));
        }
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(method = %method, url = %url, "failed to read response body: {err}");
                return Ok(ApiResponse::failure(err.to_string()));
            }
        };
        let body: &[u8] =
            if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
                b"null"
            } else {
                &bytes
            };
        serde_json::from_slice::<T>(body)
            .map(ApiResponse::ok)
            .map_err(|err| ClientError::Decode {
                url,
                message: err.to_string(),
            })
    }
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl DataSource for RemoteDataSource {
    async fn dashboard_stats(&self, filter: LocaleFilter) -> SourceResult<DashboardStats> {
        self.get(endpoints::DASHBOARD_STATS, &filter).await
    }

    async fn scopes(&self, filters: ScopeFilters) -> SourceResult<Vec<Scope>> {
        self.get(endpoints::SCOPES, &filters).await
    }

    async fn scope_categories(&self, filter: LocaleFilter) -> SourceResult<Vec<ScopeCategory>> {
        self.get(endpoints::SCOPE_CATEGORIES, &filter).await
    }

    async fn scope(&self, id: u64, filter: LocaleFilter) -> SourceResult<Scope> {
        self.get(&endpoints::with_id(endpoints::SCOPE_DETAIL, id), &filter)
            .await
    }

    async fn packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        self.get(endpoints::PACKAGES, &filter).await
    }

    async fn featured_packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        self.get(endpoints::PACKAGES_FEATURED, &filter).await
    }

    async fn package(&self, id: u64, filter: LocaleFilter) -> SourceResult<Package> {
        self.get(&endpoints::with_id(endpoints::PACKAGE_DETAIL, id), &filter)
            .await
    }

    async fn package_comparison(
        &self,
        id: u64,
        filter: LocaleFilter,
    ) -> SourceResult<PackageComparison> {
        self.get(&endpoints::with_id(endpoints::PACKAGE_COMPARISON, id), &filter)
            .await
    }

    async fn subscriptions(
        &self,
        filters: SubscriptionFilters,
    ) -> SourceResult<PaginatedResponse<Subscription>> {
        self.get(endpoints::SUBSCRIPTIONS, &filters).await
    }

    async fn active_subscription(&self, filter: LocaleFilter) -> SourceResult<Subscription> {
        self.get(endpoints::SUBSCRIPTIONS_ACTIVE, &filter).await
    }

    async fn subscription(&self, id: u64) -> SourceResult<Subscription> {
        self.get_plain(&endpoints::with_id(endpoints::SUBSCRIPTION_DETAIL, id))
            .await
    }

    async fn create_subscription(&self, request: NewSubscription) -> SourceResult<Subscription> {
        self.send_json(Method::POST, endpoints::SUBSCRIPTIONS, Some(&request))
            .await
    }

    async fn cancel_subscription(&self, id: u64) -> SourceResult<Subscription> {
        let path = endpoints::with_id(endpoints::SUBSCRIPTION_CANCEL, id);
        self.send_json(Method::POST, &path, NO_BODY).await
    }

    async fn update_subscription_scopes(
        &self,
        id: u64,
        scopes: Vec<u64>,
    ) -> SourceResult<Subscription> {
        let path = endpoints::with_id(endpoints::SUBSCRIPTION_UPDATE_SCOPES, id);
        self.send_json(Method::PATCH, &path, Some(&ScopesUpdate { scopes }))
            .await
    }

    async fn goals(&self, filters: GoalFilters) -> SourceResult<PaginatedResponse<Goal>> {
        self.get(endpoints::GOALS, &filters).await
    }

    async fn active_goals(&self, filter: LocaleFilter) -> SourceResult<Vec<Goal>> {
        self.get(endpoints::GOALS_ACTIVE, &filter).await
    }

    async fn goal(&self, id: u64) -> SourceResult<Goal> {
        self.get_plain(&endpoints::with_id(endpoints::GOAL_DETAIL, id))
            .await
    }

    async fn create_goal(&self, goal: NewGoal) -> SourceResult<Goal> {
        self.send_json(Method::POST, endpoints::GOALS, Some(&goal))
            .await
    }

    async fn update_goal(&self, id: u64, update: GoalUpdate) -> SourceResult<Goal> {
        let path = endpoints::with_id(endpoints::GOAL_DETAIL, id);
        self.send_json(Method::PATCH, &path, Some(&update)).await
    }

    async fn delete_goal(&self, id: u64) -> SourceResult<()> {
        self.delete(&endpoints::with_id(endpoints::GOAL_DETAIL, id))
            .await
    }

    async fn complete_goal(&self, id: u64) -> SourceResult<Goal> {
        let path = endpoints::with_id(endpoints::GOAL_COMPLETE, id);
        self.send_json(Method::POST, &path, NO_BODY).await
    }

    async fn update_goal_progress(&self, id: u64, progress: u8) -> SourceResult<Goal> {
        let path = endpoints::with_id(endpoints::GOAL_UPDATE_PROGRESS, id);
        let body = ProgressUpdate {
            progress_percentage: progress,
        };
        self.send_json(Method::PATCH, &path, Some(&body)).await
    }

    async fn messages(&self, filters: MessageFilters) -> SourceResult<PaginatedResponse<Message>> {
        self.get(endpoints::MESSAGES, &filters).await
    }

    async fn daily_messages(&self, filter: LocaleFilter) -> SourceResult<Vec<Message>> {
        self.get(endpoints::MESSAGES_DAILY, &filter).await
    }

    async fn favorite_messages(
        &self,
        filters: MessageFilters,
    ) -> SourceResult<PaginatedResponse<Message>> {
        self.get(endpoints::MESSAGES_FAVORITES, &filters).await
    }

    async fn message(&self, id: u64, filter: LocaleFilter) -> SourceResult<Message> {
        self.get(&endpoints::with_id(endpoints::MESSAGE_DETAIL, id), &filter)
            .await
    }

    async fn delete_message(&self, id: u64) -> SourceResult<()> {
        self.delete(&endpoints::with_id(endpoints::MESSAGE_DETAIL, id))
            .await
    }

    async fn mark_message_read(&self, id: u64) -> SourceResult<Message> {
        let path = endpoints::with_id(endpoints::MESSAGE_MARK_READ, id);
        self.send_json(Method::POST, &path, NO_BODY).await
    }

    async fn rate_message(&self, id: u64, rating: u8) -> SourceResult<Message> {
        let path = endpoints::with_id(endpoints::MESSAGE_RATE, id);
        self.send_json(Method::POST, &path, Some(&RatingRequest { rating }))
            .await
    }

    async fn toggle_favorite(&self, id: u64) -> SourceResult<Message> {
        let path = endpoints::with_id(endpoints::MESSAGE_TOGGLE_FAVORITE, id);
        self.send_json(Method::POST, &path, NO_BODY).await
    }

    async fn verify_payment(&self, charge_id: &str) -> SourceResult<PaymentVerification> {
        let path = endpoints::with_id(
            endpoints::PAYMENT_VERIFY,
            urlencoding::encode(charge_id),
        );
        self.get_plain(&path).await
    }

    async fn payment_webhook(&self, payload: Value) -> SourceResult<Value> {
        let url = self.api.url(endpoints::PAYMENT_WEBHOOK);
        let body = serde_json::to_string(&payload)?;
        // Forwarded verbatim; the payload belongs to the payment provider.
        self.call(Method::POST, url, Some(body), None).await
    }
}
