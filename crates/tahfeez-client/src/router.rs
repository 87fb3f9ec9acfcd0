use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tahfeez_core::{
    DashboardStats, Goal, GoalFilters, GoalUpdate, LocaleFilter, Message, MessageFilters,
    NewGoal, NewSubscription, Package, PackageComparison, PaginatedResponse, PaymentVerification,
    QueryFilters, Scope, ScopeCategory, ScopeFilters, Subscription, SubscriptionFilters,
};
use tracing::{debug, error};

use crate::config::Preferences;
use crate::sources::{DataSource, SourceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Remote,
    Mock,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Mock => "mock",
        })
    }
}

/// Picks the live or demo source for each call from the shared
/// [`Preferences`], so flipping `use_api` takes effect on the next call.
pub struct DataSourceRouter {
    remote: Arc<dyn DataSource>,
    mock: Arc<dyn DataSource>,
    preferences: Arc<Preferences>,
}

impl DataSourceRouter {
    pub fn new(
        remote: Arc<dyn DataSource>,
        mock: Arc<dyn DataSource>,
        preferences: Arc<Preferences>,
    ) -> Self {
        Self {
            remote,
            mock,
            preferences,
        }
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }

    fn select(&self, operation: &'static str) -> (&dyn DataSource, Backend) {
        let backend = if self.preferences.use_api() {
            Backend::Remote
        } else {
            Backend::Mock
        };
        debug!(operation, backend = %backend, "routing data source call");
        match backend {
            Backend::Remote => (self.remote.as_ref(), backend),
            Backend::Mock => (self.mock.as_ref(), backend),
        }
    }

    /// The demo source has no request headers to read the language from.
    fn localize<F: QueryFilters>(&self, backend: Backend, mut filters: F) -> F {
        if backend == Backend::Mock && filters.language().is_none() {
            filters.set_language(self.preferences.language());
        }
        filters
    }
}

fn finish<T>(operation: &'static str, backend: Backend, result: SourceResult<T>) -> SourceResult<T> {
    if let Err(err) = &result {
        error!(operation, backend = %backend, "data source call failed: {err}");
    }
    result
}

#[async_trait]
impl DataSource for DataSourceRouter {
    async fn dashboard_stats(&self, filter: LocaleFilter) -> SourceResult<DashboardStats> {
        let (source, backend) = self.select("dashboard_stats");
        let filter = self.localize(backend, filter);
        finish("dashboard_stats", backend, source.dashboard_stats(filter).await)
    }

    async fn scopes(&self, filters: ScopeFilters) -> SourceResult<Vec<Scope>> {
        let (source, backend) = self.select("scopes");
        let filters = self.localize(backend, filters);
        finish("scopes", backend, source.scopes(filters).await)
    }

    async fn scope_categories(&self, filter: LocaleFilter) -> SourceResult<Vec<ScopeCategory>> {
        let (source, backend) = self.select("scope_categories");
        let filter = self.localize(backend, filter);
        finish("scope_categories", backend, source.scope_categories(filter).await)
    }

    async fn scope(&self, id: u64, filter: LocaleFilter) -> SourceResult<Scope> {
        let (source, backend) = self.select("scope");
        let filter = self.localize(backend, filter);
        finish("scope", backend, source.scope(id, filter).await)
    }

    async fn packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        let (source, backend) = self.select("packages");
        let filter = self.localize(backend, filter);
        finish("packages", backend, source.packages(filter).await)
    }

    async fn featured_packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        let (source, backend) = self.select("featured_packages");
        let filter = self.localize(backend, filter);
        finish("featured_packages", backend, source.featured_packages(filter).await)
    }

    async fn package(&self, id: u64, filter: LocaleFilter) -> SourceResult<Package> {
        let (source, backend) = self.select("package");
        let filter = self.localize(backend, filter);
        finish("package", backend, source.package(id, filter).await)
    }

    async fn package_comparison(
        &self,
        id: u64,
        filter: LocaleFilter,
    ) -> SourceResult<PackageComparison> {
        let (source, backend) = self.select("package_comparison");
        let filter = self.localize(backend, filter);
        finish(
            "package_comparison",
            backend,
            source.package_comparison(id, filter).await,
        )
    }

    async fn subscriptions(
        &self,
        filters: SubscriptionFilters,
    ) -> SourceResult<PaginatedResponse<Subscription>> {
        let (source, backend) = self.select("subscriptions");
        let filters = self.localize(backend, filters);
        finish("subscriptions", backend, source.subscriptions(filters).await)
    }

    async fn active_subscription(&self, filter: LocaleFilter) -> SourceResult<Subscription> {
        let (source, backend) = self.select("active_subscription");
        let filter = self.localize(backend, filter);
        finish(
            "active_subscription",
            backend,
            source.active_subscription(filter).await,
        )
    }

    async fn subscription(&self, id: u64) -> SourceResult<Subscription> {
        let (source, backend) = self.select("subscription");
        finish("subscription", backend, source.subscription(id).await)
    }

    async fn create_subscription(&self, request: NewSubscription) -> SourceResult<Subscription> {
        let (source, backend) = self.select("create_subscription");
        finish(
            "create_subscription",
            backend,
            source.create_subscription(request).await,
        )
    }

    async fn cancel_subscription(&self, id: u64) -> SourceResult<Subscription> {
        let (source, backend) = self.select("cancel_subscription");
        finish("cancel_subscription", backend, source.cancel_subscription(id).await)
    }

    async fn update_subscription_scopes(
        &self,
        id: u64,
        scopes: Vec<u64>,
    ) -> SourceResult<Subscription> {
        let (source, backend) = self.select("update_subscription_scopes");
        finish(
            "update_subscription_scopes",
            backend,
            source.update_subscription_scopes(id, scopes).await,
        )
    }

    async fn goals(&self, filters: GoalFilters) -> SourceResult<PaginatedResponse<Goal>> {
        let (source, backend) = self.select("goals");
        let filters = self.localize(backend, filters);
        finish("goals", backend, source.goals(filters).await)
    }

    async fn active_goals(&self, filter: LocaleFilter) -> SourceResult<Vec<Goal>> {
        let (source, backend) = self.select("active_goals");
        let filter = self.localize(backend, filter);
        finish("active_goals", backend, source.active_goals(filter).await)
    }

    async fn goal(&self, id: u64) -> SourceResult<Goal> {
        let (source, backend) = self.select("goal");
        finish("goal", backend, source.goal(id).await)
    }

    async fn create_goal(&self, goal: NewGoal) -> SourceResult<Goal> {
        let (source, backend) = self.select("create_goal");
        finish("create_goal", backend, source.create_goal(goal).await)
    }

    async fn update_goal(&self, id: u64, update: GoalUpdate) -> SourceResult<Goal> {
        let (source, backend) = self.select("update_goal");
        finish("update_goal", backend, source.update_goal(id, update).await)
    }

    async fn delete_goal(&self, id: u64) -> SourceResult<()> {
        let (source, backend) = self.select("delete_goal");
        finish("delete_goal", backend, source.delete_goal(id).await)
    }

    async fn complete_goal(&self, id: u64) -> SourceResult<Goal> {
        let (source, backend) = self.select("complete_goal");
        finish("complete_goal", backend, source.complete_goal(id).await)
    }

    async fn update_goal_progress(&self, id: u64, progress: u8) -> SourceResult<Goal> {
        let (source, backend) = self.select("update_goal_progress");
        finish(
            "update_goal_progress",
            backend,
            source.update_goal_progress(id, progress).await,
        )
    }

    async fn messages(&self, filters: MessageFilters) -> SourceResult<PaginatedResponse<Message>> {
        let (source, backend) = self.select("messages");
        let filters = self.localize(backend, filters);
        finish("messages", backend, source.messages(filters).await)
    }

    async fn daily_messages(&self, filter: LocaleFilter) -> SourceResult<Vec<Message>> {
        let (source, backend) = self.select("daily_messages");
        let filter = self.localize(backend, filter);
        finish("daily_messages", backend, source.daily_messages(filter).await)
    }

    async fn favorite_messages(
        &self,
        filters: MessageFilters,
    ) -> SourceResult<PaginatedResponse<Message>> {
        let (source, backend) = self.select("favorite_messages");
        let filters = self.localize(backend, filters);
        finish(
            "favorite_messages",
            backend,
            source.favorite_messages(filters).await,
        )
    }

    async fn message(&self, id: u64, filter: LocaleFilter) -> SourceResult<Message> {
        let (source, backend) = self.select("message");
        let filter = self.localize(backend, filter);
        finish("message", backend, source.message(id, filter).await)
    }

    async fn delete_message(&self, id: u64) -> SourceResult<()> {
        let (source, backend) = self.select("delete_message");
        finish("delete_message", backend, source.delete_message(id).await)
    }

    async fn mark_message_read(&self, id: u64) -> SourceResult<Message> {
        let (source, backend) = self.select("mark_message_read");
        finish("mark_message_read", backend, source.mark_message_read(id).await)
    }

    async fn rate_message(&self, id: u64, rating: u8) -> SourceResult<Message> {
        let (source, backend) = self.select("rate_message");
        finish("rate_message", backend, source.rate_message(id, rating).await)
    }

    async fn toggle_favorite(&self, id: u64) -> SourceResult<Message> {
        let (source, backend) = self.select("toggle_favorite");
        finish("toggle_favorite", backend, source.toggle_favorite(id).await)
    }

    async fn verify_payment(&self, charge_id: &str) -> SourceResult<PaymentVerification> {
        let (source, backend) = self.select("verify_payment");
        finish("verify_payment", backend, source.verify_payment(charge_id).await)
    }

    async fn payment_webhook(&self, payload: Value) -> SourceResult<Value> {
        let (source, backend) = self.select("payment_webhook");
        finish("payment_webhook", backend, source.payment_webhook(payload).await)
    }
}
