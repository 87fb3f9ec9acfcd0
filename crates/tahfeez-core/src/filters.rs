use serde::{Deserialize, Serialize};

use crate::{GoalStatus, Language, SubscriptionStatus};

/// Filter set for a list endpoint. Absent fields never reach the query string.
pub trait QueryFilters {
    fn query_pairs(&self) -> Vec<(String, String)>;
    fn language(&self) -> Option<Language>;
    fn set_language(&mut self, language: Language);
}

pub fn build_params<const N: usize>(
    pairs: [Option<(String, String)>; N],
) -> Vec<(String, String)> {
    pairs.into_iter().flatten().collect()
}

pub fn opt_param(key: &str, value: Option<impl ToString>) -> Option<(String, String)> {
    value.map(|value| (key.to_string(), value.to_string()))
}

macro_rules! impl_language {
    ($ty:ty) => {
        impl $ty {
            pub fn with_language(mut self, language: Language) -> Self {
                self.language = Some(language);
                self
            }
        }
    };
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageFilters {
    pub scope: Option<u64>,
    pub is_read: Option<bool>,
    pub is_favorite: Option<bool>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub language: Option<Language>,
}

impl QueryFilters for MessageFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        build_params([
            opt_param("scope", self.scope),
            opt_param("is_read", self.is_read),
            opt_param("is_favorite", self.is_favorite),
            opt_param("search", self.search.as_deref()),
            opt_param("page", self.page),
            opt_param("page_size", self.page_size),
            opt_param("language", self.language),
        ])
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }
}

impl_language!(MessageFilters);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalFilters {
    pub status: Option<GoalStatus>,
    pub scope: Option<u64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub language: Option<Language>,
}

impl QueryFilters for GoalFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        build_params([
            opt_param("status", self.status.map(goal_status_str)),
            opt_param("scope", self.scope),
            opt_param("page", self.page),
            opt_param("page_size", self.page_size),
            opt_param("language", self.language),
        ])
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }
}

impl_language!(GoalFilters);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionFilters {
    pub status: Option<SubscriptionStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub language: Option<Language>,
}

impl QueryFilters for SubscriptionFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        build_params([
            opt_param("status", self.status.map(subscription_status_str)),
            opt_param("page", self.page),
            opt_param("page_size", self.page_size),
            opt_param("language", self.language),
        ])
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }
}

impl_language!(SubscriptionFilters);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeFilters {
    pub category: Option<String>,
    pub language: Option<Language>,
}

impl QueryFilters for ScopeFilters {
    fn query_pairs(&self) -> Vec<(String, String)> {
        build_params([
            opt_param("category", self.category.as_deref()),
            opt_param("language", self.language),
        ])
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }
}

impl_language!(ScopeFilters);

/// Language-only filter for detail and unfiltered endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LocaleFilter {
    pub language: Option<Language>,
}

impl QueryFilters for LocaleFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        build_params([opt_param("language", self.language)])
    }

    fn language(&self) -> Option<Language> {
        self.language
    }

    fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }
}

impl_language!(LocaleFilter);

fn goal_status_str(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Active => "active",
        GoalStatus::Paused => "paused",
        GoalStatus::Completed => "completed",
        GoalStatus::Cancelled => "cancelled",
    }
}

fn subscription_status_str(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Pending => "pending",
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::Cancelled => "cancelled",
        SubscriptionStatus::Expired => "expired",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let filters = MessageFilters {
            is_favorite: Some(true),
            page: Some(2),
            ..MessageFilters::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("is_favorite".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
        assert!(MessageFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn goal_status_uses_wire_names() {
        let filters = GoalFilters {
            status: Some(GoalStatus::Completed),
            ..GoalFilters::default()
        }
        .with_language(Language::Ar);
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("status".to_string(), "completed".to_string()),
                ("language".to_string(), "ar".to_string()),
            ]
        );
    }

    #[test]
    fn set_language_overrides() {
        let mut filters = ScopeFilters::default();
        filters.set_language(Language::Ar);
        assert_eq!(QueryFilters::language(&filters), Some(Language::Ar));
    }
}
