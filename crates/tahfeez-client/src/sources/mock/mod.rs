//! In-memory demo backend. Seed data is built once per instance; mutations
//! change that copy and are gone when the process exits.

mod seed;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tahfeez_core::{
    endpoints, ApiResponse, DashboardCounters, DashboardStats, Goal, GoalFilters, GoalStatus,
    GoalUpdate, Language, LocaleFilter, Message, MessageFilters, MessageType, NewGoal,
    NewSubscription, Package, PackageComparison, PackageComparisonEntry, PaginatedResponse,
    PaymentVerification, Scope, ScopeCategory, ScopeFilters, Subscription, SubscriptionFilters,
    SubscriptionStatus,
};
use tracing::debug;

use self::seed::{SeedCategory, SeedGoal, SeedMessage, SeedPackage, SeedScope, Text, CURRENCY};
use super::{DataSource, SourceResult};
use crate::config::Preferences;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;
const RECENT_MESSAGES: usize = 3;
const VERIFIED_CHARGE_PREFIX: &str = "chg_";

const SCOPE_NOT_FOUND: &str = "Scope not found";
const PACKAGE_NOT_FOUND: &str = "Package not found";
const SUBSCRIPTION_NOT_FOUND: &str = "Subscription not found";
const GOAL_NOT_FOUND: &str = "Goal not found";
const MESSAGE_NOT_FOUND: &str = "Message not found";
const NO_ACTIVE_SUBSCRIPTION: &str = "No active subscription";

pub struct MockDataSource {
    state: Mutex<MockState>,
    delay: Duration,
    preferences: Arc<Preferences>,
}

impl MockDataSource {
    pub fn new(delay: Duration, preferences: Arc<Preferences>) -> Self {
        Self {
            state: Mutex::new(MockState::seeded()),
            delay,
            preferences,
        }
    }

    /// Waits out the simulated latency and resolves the response language.
    async fn ready(&self, requested: Option<Language>) -> Language {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        requested.unwrap_or_else(|| self.preferences.language())
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct MockState {
    categories: Vec<SeedCategory>,
    scopes: Vec<SeedScope>,
    packages: Vec<SeedPackage>,
    messages: Vec<SeedMessage>,
    goals: Vec<SeedGoal>,
    subscriptions: Vec<Subscription>,
    next_goal_id: u64,
    next_subscription_id: u64,
}

impl MockState {
    fn seeded() -> Self {
        let goals = seed::goals();
        let subscriptions = seed::subscriptions();
        Self {
            next_goal_id: goals.iter().map(|goal| goal.id).max().unwrap_or(0) + 1,
            next_subscription_id: subscriptions.iter().map(|sub| sub.id).max().unwrap_or(0) + 1,
            categories: seed::categories(),
            scopes: seed::scopes(),
            packages: seed::packages(),
            messages: seed::messages(),
            goals,
            subscriptions,
        }
    }

    fn scope_view(&self, scope: &SeedScope, language: Language) -> Scope {
        Scope {
            id: scope.id,
            name: scope.name.get(language),
            description: scope.description.get(language),
            category: scope.category.to_string(),
            icon: Some(scope.icon.to_string()),
            color: Some(scope.color.to_string()),
            is_active: true,
        }
    }

    fn package_view(package: &SeedPackage, language: Language) -> Package {
        Package {
            id: package.id,
            name: package.name.get(language),
            description: package.description.get(language),
            price: package.price.to_string(),
            currency: CURRENCY.to_string(),
            duration_days: package.duration_days,
            max_scopes: package.max_scopes,
            messages_per_day: package.messages_per_day,
            features: package
                .features
                .iter()
                .map(|feature| feature.get(language))
                .collect(),
            is_featured: package.is_featured,
            is_active: true,
        }
    }

    fn message_view(&self, message: &SeedMessage, language: Language) -> Message {
        Message {
            id: message.id,
            title: message.title.get(language),
            content: message.content.get(language),
            scope: message.scope,
            scope_name: message
                .scope
                .and_then(|id| self.scopes.iter().find(|scope| scope.id == id))
                .map(|scope| scope.name.get(language)),
            message_type: message.message_type,
            language,
            is_read: message.is_read,
            is_favorite: message.is_favorite,
            rating: message.rating,
            created_at: message.created_at,
            read_at: message.read_at,
        }
    }

    fn goal_view(goal: &SeedGoal, language: Language) -> Goal {
        Goal {
            id: goal.id,
            title: goal.title.get(language),
            description: goal.description.get(language),
            scope: goal.scope,
            status: goal.status,
            progress_percentage: goal.progress_percentage,
            target_date: goal.target_date,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
            completed_at: goal.completed_at,
        }
    }

    fn subscription_view(&self, subscription: &Subscription, language: Language) -> Subscription {
        let mut view = subscription.clone();
        view.package_name = self
            .package(subscription.package)
            .map(|package| package.name.get(language));
        view
    }

    fn package(&self, id: u64) -> Option<&SeedPackage> {
        self.packages.iter().find(|package| package.id == id)
    }

    fn active_subscription_record(&self) -> Option<&Subscription> {
        self.subscriptions
            .iter()
            .find(|sub| sub.status == SubscriptionStatus::Active)
    }

    fn check_scopes(&self, package: &SeedPackage, scopes: &[u64]) -> Result<(), String> {
        if scopes.len() > package.max_scopes as usize {
            return Err(format!(
                "This package allows at most {} scopes",
                package.max_scopes
            ));
        }
        if let Some(missing) = scopes
            .iter()
            .find(|id| !self.scopes.iter().any(|scope| scope.id == **id))
        {
            return Err(format!("{SCOPE_NOT_FOUND}: {missing}"));
        }
        Ok(())
    }

    fn dashboard(&self, language: Language) -> DashboardStats {
        let mut recent: Vec<&SeedMessage> = self.messages.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let progress_total: u64 = self
            .goals
            .iter()
            .map(|goal| u64::from(goal.progress_percentage))
            .sum();
        let average_goal_progress = if self.goals.is_empty() {
            0.0
        } else {
            let average = progress_total as f64 / self.goals.len() as f64;
            (average * 10.0).round() / 10.0
        };
        let count = |predicate: fn(&SeedMessage) -> bool| {
            self.messages.iter().filter(|message| predicate(message)).count() as u64
        };
        DashboardStats {
            stats: DashboardCounters {
                total_messages: self.messages.len() as u64,
                unread_messages: count(|message| !message.is_read),
                favorite_messages: count(|message| message.is_favorite),
                active_goals: self.goals_with(GoalStatus::Active).count() as u64,
                completed_goals: self.goals_with(GoalStatus::Completed).count() as u64,
                average_goal_progress,
            },
            recent_messages: recent
                .into_iter()
                .take(RECENT_MESSAGES)
                .map(|message| self.message_view(message, language))
                .collect(),
            active_goals: self
                .goals_with(GoalStatus::Active)
                .map(|goal| Self::goal_view(goal, language))
                .collect(),
            active_subscription: self
                .active_subscription_record()
                .map(|sub| self.subscription_view(sub, language)),
        }
    }

    fn goals_with(&self, status: GoalStatus) -> impl Iterator<Item = &SeedGoal> {
        self.goals.iter().filter(move |goal| goal.status == status)
    }

    fn filtered_messages(
        &self,
        filters: &MessageFilters,
        language: Language,
        path: &str,
    ) -> PaginatedResponse<Message> {
        let needle = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);
        let matching: Vec<Message> = self
            .messages
            .iter()
            .filter(|message| filters.scope.map_or(true, |scope| message.scope == Some(scope)))
            .filter(|message| filters.is_read.map_or(true, |read| message.is_read == read))
            .filter(|message| {
                filters
                    .is_favorite
                    .map_or(true, |favorite| message.is_favorite == favorite)
            })
            .filter(|message| {
                needle.as_deref().map_or(true, |needle| {
                    message.title.contains(needle, language)
                        || message.content.contains(needle, language)
                })
            })
            .map(|message| self.message_view(message, language))
            .collect();
        PaginatedResponse::paginate(
            matching,
            filters.page.unwrap_or(DEFAULT_PAGE),
            filters.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            path,
        )
    }

    fn with_message(
        &mut self,
        id: u64,
        language: Language,
        update: impl FnOnce(&mut SeedMessage) -> Result<(), String>,
    ) -> ApiResponse<Message> {
        let Some(message) = self.messages.iter_mut().find(|message| message.id == id) else {
            return ApiResponse::failure(MESSAGE_NOT_FOUND);
        };
        if let Err(error) = update(message) {
            return ApiResponse::failure(error);
        }
        let Some(message) = self.messages.iter().find(|message| message.id == id) else {
            return ApiResponse::failure(MESSAGE_NOT_FOUND);
        };
        ApiResponse::ok(self.message_view(message, language))
    }

    fn with_goal(
        &mut self,
        id: u64,
        language: Language,
        update: impl FnOnce(&mut SeedGoal) -> Result<(), String>,
    ) -> ApiResponse<Goal> {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            return ApiResponse::failure(GOAL_NOT_FOUND);
        };
        if let Err(error) = update(goal) {
            return ApiResponse::failure(error);
        }
        goal.updated_at = Utc::now();
        ApiResponse::ok(Self::goal_view(goal, language))
    }
}

fn set_goal_status(goal: &mut SeedGoal, status: GoalStatus) {
    goal.status = status;
    if status == GoalStatus::Completed {
        goal.progress_percentage = 100;
        goal.completed_at.get_or_insert_with(Utc::now);
    } else {
        goal.completed_at = None;
    }
}

fn price_value(price: &str) -> f64 {
    price.parse().unwrap_or(0.0)
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn dashboard_stats(&self, filter: LocaleFilter) -> SourceResult<DashboardStats> {
        let language = self.ready(filter.language).await;
        Ok(ApiResponse::ok(self.state().dashboard(language)))
    }

    async fn scopes(&self, filters: ScopeFilters) -> SourceResult<Vec<Scope>> {
        let language = self.ready(filters.language).await;
        let state = self.state();
        let scopes = state
            .scopes
            .iter()
            .filter(|scope| {
                filters
                    .category
                    .as_deref()
                    .map_or(true, |category| scope.category == category)
            })
            .map(|scope| state.scope_view(scope, language))
            .collect();
        Ok(ApiResponse::ok(scopes))
    }

    async fn scope_categories(&self, filter: LocaleFilter) -> SourceResult<Vec<ScopeCategory>> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        let categories = state
            .categories
            .iter()
            .map(|category| ScopeCategory {
                key: category.key.to_string(),
                name: category.name.get(language),
                scopes_count: state
                    .scopes
                    .iter()
                    .filter(|scope| scope.category == category.key)
                    .count() as u32,
            })
            .collect();
        Ok(ApiResponse::ok(categories))
    }

    async fn scope(&self, id: u64, filter: LocaleFilter) -> SourceResult<Scope> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        Ok(match state.scopes.iter().find(|scope| scope.id == id) {
            Some(scope) => ApiResponse::ok(state.scope_view(scope, language)),
            None => ApiResponse::failure(SCOPE_NOT_FOUND),
        })
    }

    async fn packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        let language = self.ready(filter.language).await;
        let packages = self
            .state()
            .packages
            .iter()
            .map(|package| MockState::package_view(package, language))
            .collect();
        Ok(ApiResponse::ok(packages))
    }

    async fn featured_packages(&self, filter: LocaleFilter) -> SourceResult<Vec<Package>> {
        let language = self.ready(filter.language).await;
        let packages = self
            .state()
            .packages
            .iter()
            .filter(|package| package.is_featured)
            .map(|package| MockState::package_view(package, language))
            .collect();
        Ok(ApiResponse::ok(packages))
    }

    async fn package(&self, id: u64, filter: LocaleFilter) -> SourceResult<Package> {
        let language = self.ready(filter.language).await;
        Ok(match self.state().package(id) {
            Some(package) => ApiResponse::ok(MockState::package_view(package, language)),
            None => ApiResponse::failure(PACKAGE_NOT_FOUND),
        })
    }

    async fn package_comparison(
        &self,
        id: u64,
        filter: LocaleFilter,
    ) -> SourceResult<PackageComparison> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        let Some(package) = state.package(id) else {
            return Ok(ApiResponse::failure(PACKAGE_NOT_FOUND));
        };
        let base_price = price_value(package.price);
        let alternatives = state
            .packages
            .iter()
            .filter(|other| other.id != id)
            .map(|other| PackageComparisonEntry {
                id: other.id,
                name: other.name.get(language),
                price: other.price.to_string(),
                max_scopes: other.max_scopes,
                messages_per_day: other.messages_per_day,
                is_upgrade: price_value(other.price) > base_price,
            })
            .collect();
        Ok(ApiResponse::ok(PackageComparison {
            package: MockState::package_view(package, language),
            alternatives,
        }))
    }

    async fn subscriptions(
        &self,
        filters: SubscriptionFilters,
    ) -> SourceResult<PaginatedResponse<Subscription>> {
        let language = self.ready(filters.language).await;
        let state = self.state();
        let matching = state
            .subscriptions
            .iter()
            .filter(|sub| filters.status.map_or(true, |status| sub.status == status))
            .map(|sub| state.subscription_view(sub, language))
            .collect();
        Ok(ApiResponse::ok(PaginatedResponse::paginate(
            matching,
            filters.page.unwrap_or(DEFAULT_PAGE),
            filters.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            endpoints::SUBSCRIPTIONS,
        )))
    }

    async fn active_subscription(&self, filter: LocaleFilter) -> SourceResult<Subscription> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        Ok(match state.active_subscription_record() {
            Some(sub) => ApiResponse::ok(state.subscription_view(sub, language)),
            None => ApiResponse::failure(NO_ACTIVE_SUBSCRIPTION),
        })
    }

    async fn subscription(&self, id: u64) -> SourceResult<Subscription> {
        let language = self.ready(None).await;
        let state = self.state();
        Ok(match state.subscriptions.iter().find(|sub| sub.id == id) {
            Some(sub) => ApiResponse::ok(state.subscription_view(sub, language)),
            None => ApiResponse::failure(SUBSCRIPTION_NOT_FOUND),
        })
    }

    async fn create_subscription(&self, request: NewSubscription) -> SourceResult<Subscription> {
        let language = self.ready(None).await;
        let mut state = self.state();
        let Some(package) = state.package(request.package) else {
            return Ok(ApiResponse::failure(PACKAGE_NOT_FOUND));
        };
        if let Err(error) = state.check_scopes(package, &request.scopes) {
            return Ok(ApiResponse::failure(error));
        }
        let duration = chrono::Duration::days(i64::from(package.duration_days));
        let now = Utc::now();
        for existing in state
            .subscriptions
            .iter_mut()
            .filter(|sub| sub.status == SubscriptionStatus::Active)
        {
            existing.status = SubscriptionStatus::Cancelled;
            existing.auto_renew = false;
        }
        let id = state.next_subscription_id;
        state.next_subscription_id += 1;
        let subscription = Subscription {
            id,
            package: request.package,
            package_name: None,
            status: SubscriptionStatus::Active,
            scopes: request.scopes,
            start_date: now,
            end_date: Some(now + duration),
            auto_renew: request.auto_renew,
            created_at: now,
        };
        let view = state.subscription_view(&subscription, language);
        state.subscriptions.push(subscription);
        debug!(subscription_id = id, "mock subscription created");
        Ok(ApiResponse::ok(view))
    }

    async fn cancel_subscription(&self, id: u64) -> SourceResult<Subscription> {
        let language = self.ready(None).await;
        let mut state = self.state();
        let Some(subscription) = state.subscriptions.iter_mut().find(|sub| sub.id == id) else {
            return Ok(ApiResponse::failure(SUBSCRIPTION_NOT_FOUND));
        };
        if matches!(
            subscription.status,
            SubscriptionStatus::Cancelled | SubscriptionStatus::Expired
        ) {
            return Ok(ApiResponse::failure("Subscription is not active"));
        }
        subscription.status = SubscriptionStatus::Cancelled;
        subscription.auto_renew = false;
        let subscription = subscription.clone();
        Ok(ApiResponse::ok(state.subscription_view(&subscription, language)))
    }

    async fn update_subscription_scopes(
        &self,
        id: u64,
        scopes: Vec<u64>,
    ) -> SourceResult<Subscription> {
        let language = self.ready(None).await;
        let mut state = self.state();
        let Some(package_id) = state
            .subscriptions
            .iter()
            .find(|sub| sub.id == id)
            .map(|sub| sub.package)
        else {
            return Ok(ApiResponse::failure(SUBSCRIPTION_NOT_FOUND));
        };
        let Some(package) = state.package(package_id) else {
            return Ok(ApiResponse::failure(PACKAGE_NOT_FOUND));
        };
        if let Err(error) = state.check_scopes(package, &scopes) {
            return Ok(ApiResponse::failure(error));
        }
        let Some(subscription) = state.subscriptions.iter_mut().find(|sub| sub.id == id) else {
            return Ok(ApiResponse::failure(SUBSCRIPTION_NOT_FOUND));
        };
        subscription.scopes = scopes;
        let subscription = subscription.clone();
        Ok(ApiResponse::ok(state.subscription_view(&subscription, language)))
    }

    async fn goals(&self, filters: GoalFilters) -> SourceResult<PaginatedResponse<Goal>> {
        let language = self.ready(filters.language).await;
        let matching = self
            .state()
            .goals
            .iter()
            .filter(|goal| filters.status.map_or(true, |status| goal.status == status))
            .filter(|goal| filters.scope.map_or(true, |scope| goal.scope == Some(scope)))
            .map(|goal| MockState::goal_view(goal, language))
            .collect();
        Ok(ApiResponse::ok(PaginatedResponse::paginate(
            matching,
            filters.page.unwrap_or(DEFAULT_PAGE),
            filters.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            endpoints::GOALS,
        )))
    }

    async fn active_goals(&self, filter: LocaleFilter) -> SourceResult<Vec<Goal>> {
        let language = self.ready(filter.language).await;
        let goals = self
            .state()
            .goals_with(GoalStatus::Active)
            .map(|goal| MockState::goal_view(goal, language))
            .collect();
        Ok(ApiResponse::ok(goals))
    }

    async fn goal(&self, id: u64) -> SourceResult<Goal> {
        let language = self.ready(None).await;
        Ok(match self.state().goals.iter().find(|goal| goal.id == id) {
            Some(goal) => ApiResponse::ok(MockState::goal_view(goal, language)),
            None => ApiResponse::failure(GOAL_NOT_FOUND),
        })
    }

    async fn create_goal(&self, goal: NewGoal) -> SourceResult<Goal> {
        let language = self.ready(None).await;
        if goal.title.trim().is_empty() {
            return Ok(ApiResponse::failure("title: This field may not be blank."));
        }
        let mut state = self.state();
        if let Some(scope) = goal.scope {
            if !state.scopes.iter().any(|known| known.id == scope) {
                return Ok(ApiResponse::failure(SCOPE_NOT_FOUND));
            }
        }
        let now = Utc::now();
        let record = SeedGoal {
            id: state.next_goal_id,
            title: Text::Plain(goal.title.trim().to_string()),
            description: Text::Plain(goal.description),
            scope: goal.scope,
            status: GoalStatus::Active,
            progress_percentage: 0,
            target_date: goal.target_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        state.next_goal_id += 1;
        let view = MockState::goal_view(&record, language);
        state.goals.push(record);
        Ok(ApiResponse::ok(view))
    }

    async fn update_goal(&self, id: u64, update: GoalUpdate) -> SourceResult<Goal> {
        let language = self.ready(None).await;
        Ok(self.state().with_goal(id, language, |goal| {
            if let Some(title) = update.title {
                if title.trim().is_empty() {
                    return Err("title: This field may not be blank.".to_string());
                }
                goal.title = Text::Plain(title.trim().to_string());
            }
            if let Some(description) = update.description {
                goal.description = Text::Plain(description);
            }
            if update.scope.is_some() {
                goal.scope = update.scope;
            }
            if update.target_date.is_some() {
                goal.target_date = update.target_date;
            }
            if let Some(status) = update.status {
                set_goal_status(goal, status);
            }
            Ok(())
        }))
    }

    async fn delete_goal(&self, id: u64) -> SourceResult<()> {
        self.ready(None).await;
        let mut state = self.state();
        let before = state.goals.len();
        state.goals.retain(|goal| goal.id != id);
        Ok(if state.goals.len() == before {
            ApiResponse::failure(GOAL_NOT_FOUND)
        } else {
            ApiResponse::ok(())
        })
    }

    async fn complete_goal(&self, id: u64) -> SourceResult<Goal> {
        let language = self.ready(None).await;
        Ok(self.state().with_goal(id, language, |goal| {
            set_goal_status(goal, GoalStatus::Completed);
            Ok(())
        }))
    }

    async fn update_goal_progress(&self, id: u64, progress: u8) -> SourceResult<Goal> {
        let language = self.ready(None).await;
        if progress > 100 {
            return Ok(ApiResponse::failure(
                "Progress percentage must be between 0 and 100",
            ));
        }
        Ok(self.state().with_goal(id, language, |goal| {
            goal.progress_percentage = progress;
            if progress == 100 {
                set_goal_status(goal, GoalStatus::Completed);
            } else if goal.status == GoalStatus::Completed {
                set_goal_status(goal, GoalStatus::Active);
                goal.progress_percentage = progress;
            }
            Ok(())
        }))
    }

    async fn messages(&self, filters: MessageFilters) -> SourceResult<PaginatedResponse<Message>> {
        let language = self.ready(filters.language).await;
        let page = self
            .state()
            .filtered_messages(&filters, language, endpoints::MESSAGES);
        Ok(ApiResponse::ok(page))
    }

    async fn daily_messages(&self, filter: LocaleFilter) -> SourceResult<Vec<Message>> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        let messages = state
            .messages
            .iter()
            .filter(|message| message.message_type == MessageType::Daily)
            .map(|message| state.message_view(message, language))
            .collect();
        Ok(ApiResponse::ok(messages))
    }

    async fn favorite_messages(
        &self,
        filters: MessageFilters,
    ) -> SourceResult<PaginatedResponse<Message>> {
        let language = self.ready(filters.language).await;
        let filters = MessageFilters {
            is_favorite: Some(true),
            ..filters
        };
        let page = self
            .state()
            .filtered_messages(&filters, language, endpoints::MESSAGES_FAVORITES);
        Ok(ApiResponse::ok(page))
    }

    async fn message(&self, id: u64, filter: LocaleFilter) -> SourceResult<Message> {
        let language = self.ready(filter.language).await;
        let state = self.state();
        Ok(match state.messages.iter().find(|message| message.id == id) {
            Some(message) => ApiResponse::ok(state.message_view(message, language)),
            None => ApiResponse::failure(MESSAGE_NOT_FOUND),
        })
    }

    async fn delete_message(&self, id: u64) -> SourceResult<()> {
        self.ready(None).await;
        let mut state = self.state();
        let before = state.messages.len();
        state.messages.retain(|message| message.id != id);
        Ok(if state.messages.len() == before {
            ApiResponse::failure(MESSAGE_NOT_FOUND)
        } else {
            ApiResponse::ok(())
        })
    }

    async fn mark_message_read(&self, id: u64) -> SourceResult<Message> {
        let language = self.ready(None).await;
        Ok(self.state().with_message(id, language, |message| {
            message.is_read = true;
            message.read_at.get_or_insert_with(Utc::now);
            Ok(())
        }))
    }

    async fn rate_message(&self, id: u64, rating: u8) -> SourceResult<Message> {
        let language = self.ready(None).await;
        if !(1..=5).contains(&rating) {
            return Ok(ApiResponse::failure("Rating must be between 1 and 5"));
        }
        Ok(self.state().with_message(id, language, |message| {
            message.rating = Some(rating);
            Ok(())
        }))
    }

    async fn toggle_favorite(&self, id: u64) -> SourceResult<Message> {
        let language = self.ready(None).await;
        Ok(self.state().with_message(id, language, |message| {
            message.is_favorite = !message.is_favorite;
            Ok(())
        }))
    }

    async fn verify_payment(&self, charge_id: &str) -> SourceResult<PaymentVerification> {
        self.ready(None).await;
        let charge_id = charge_id.trim();
        if charge_id.is_empty() {
            return Ok(ApiResponse::failure("Charge id is required"));
        }
        let state = self.state();
        let active = state.active_subscription_record();
        let package = active.and_then(|sub| state.package(sub.package));
        let verified = charge_id.starts_with(VERIFIED_CHARGE_PREFIX);
        Ok(ApiResponse::ok(PaymentVerification {
            charge_id: charge_id.to_string(),
            status: if verified { "CAPTURED" } else { "FAILED" }.to_string(),
            verified,
            amount: package.map(|package| package.price.to_string()),
            currency: package.map(|_| CURRENCY.to_string()),
            subscription: active.filter(|_| verified).map(|sub| sub.id),
        }))
    }

    async fn payment_webhook(&self, payload: Value) -> SourceResult<Value> {
        self.ready(None).await;
        debug!(
            event = payload.get("type").and_then(|kind| kind.as_str()).unwrap_or("unknown"),
            "mock payment webhook received"
        );
        Ok(ApiResponse::ok(json!({ "received": true })))
    }
}
