//! The data-access surface shared by the live API, the in-memory demo
//! backend and the router that picks between them.

pub mod mock;
pub mod remote;

use async_trait::async_trait;
use serde_json::Value;
use tahfeez_core::{
    ApiResponse, DashboardStats, Goal, GoalFilters, GoalUpdate, LocaleFilter, Message,
    MessageFilters, NewGoal, NewSubscription, Package, PackageComparison, PaginatedResponse,
    PaymentVerification, Scope, ScopeCategory, ScopeFilters, Subscription, SubscriptionFilters,
};

use crate::error::ClientError;

pub use mock::MockDataSource;
pub use remote::RemoteDataSource;

/// `Err` only for responses that could not be understood; every expected
/// failure is a `success: false` envelope.
pub type SourceResult<T> = Result<ApiResponse<T>, ClientError>;

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn dashboard_stats(&self, filter: LocaleFilter) -> SourceResult<DashboardStats>;

    async fn scopes(&self, filters: ScopeFilters) -> SourceResult<Vec<Scope>>;
    async fn scope_categories(&self, filter: LocaleFilter) -> SourceResult<Vec<ScopeCategory>>;
    async fn scope(&self, id: u64, filter: LocaleFilter) -> SourceResult<Scope>;

    async fn packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>>;
    async fn featured_packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>>;
    async fn package(&self, id: u64, filter: LocaleFilter) -> SourceResult<Package>;
    async fn package_comparison(
        &self,
        id: u64,
        filter: LocaleFilter,
    ) -> SourceResult<PackageComparison>;

    async fn subscriptions(
        &self,
        filters: SubscriptionFilters,
    ) -> SourceResult<PaginatedResponse<Subscription>>;
    async fn active_subscription(&self, filter: LocaleFilter) -> SourceResult<Subscription>;
    async fn subscription(&self, id: u64) -> SourceResult<Subscription>;
    async fn create_subscription(&self, request: NewSubscription) -> SourceResult<Subscription>;
    async fn cancel_subscription(&self, id: u64) -> SourceResult<Subscription>;
    async fn update_subscription_scopes(
        &self,
        id: u64,
        scopes: Vec<u64>,
    ) -> SourceResult<Subscription>;

    async fn goals(&self, filters: GoalFilters) -> SourceResult<PaginatedResponse<Goal>>;
    async fn active_goals(&self, filter: LocaleFilter) -> SourceResult<Vec<Goal>>;
    async fn goal(&self, id: u64) -> SourceResult<Goal>;
    async fn create_goal(&self, goal: NewGoal) -> SourceResult<Goal>;
    async fn update_goal(&self, id: u64, update: GoalUpdate) -> SourceResult<Goal>;
    async fn delete_goal(&self, id: u64) -> SourceResult<()>;
    async fn complete_goal(&self, id: u64) -> SourceResult<Goal>;
    async fn update_goal_progress(&self, id: u64, progress: u8) -> SourceResult<Goal>;

    async fn messages(&self, filters: MessageFilters) -> SourceResult<PaginatedResponse<Message>>;
    async fn daily_messages(&self, filter: LocaleFilter) -> SourceResult<Vec<Message>>;
    async fn favorite_messages(
        &self,
        filters: MessageFilters,
    ) -> SourceResult<PaginatedResponse<Message>>;
    async fn message(&self, id: u64, filter: LocaleFilter) -> SourceResult<Message>;
    async fn delete_message(&self, id: u64) -> SourceResult<()>;
    async fn mark_message_read(&self, id: u64) -> SourceResult<Message>;
    async fn rate_message(&self, id: u64, rating: u8) -> SourceResult<Message>;
    async fn toggle_favorite(&self, id: u64) -> SourceResult<Message>;

    async fn verify_payment(&self, charge_id: &str) -> SourceResult<PaymentVerification>;
    async fn payment_webhook(&self, payload: Value) -> SourceResult<Value>;
}
