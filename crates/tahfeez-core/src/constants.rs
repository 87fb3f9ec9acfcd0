pub mod endpoints {
    //! Endpoint templates, relative to `<base_url>/<api_version>`.
    //! `{id}` is replaced by a numeric record id.

    pub const AUTH_TOKEN: &str = "/auth/token/";
    pub const AUTH_REFRESH: &str = "/auth/token/refresh/";
    pub const AUTH_VERIFY: &str = "/auth/token/verify/";
    pub const AUTH_REGISTER: &str = "/auth/register/";
    pub const AUTH_LOGOUT: &str = "/auth/logout/";

    pub const DASHBOARD_STATS: &str = "/dashboard/stats/";

    pub const SCOPES: &str = "/scopes/";
    pub const SCOPE_CATEGORIES: &str = "/scopes/categories/";
    pub const SCOPE_DETAIL: &str = "/scopes/{id}/";

    pub const PACKAGES: &str = "/packages/";
    pub const PACKAGES_FEATURED: &str = "/packages/featured/";
    pub const PACKAGE_DETAIL: &str = "/packages/{id}/";
    pub const PACKAGE_COMPARISON: &str = "/packages/{id}/comparison/";

    pub const SUBSCRIPTIONS: &str = "/subscriptions/";
    pub const SUBSCRIPTIONS_ACTIVE: &str = "/subscriptions/active/";
    pub const SUBSCRIPTION_DETAIL: &str = "/subscriptions/{id}/";
    pub const SUBSCRIPTION_CANCEL: &str = "/subscriptions/{id}/cancel/";
    pub const SUBSCRIPTION_UPDATE_SCOPES: &str = "/subscriptions/{id}/update_scopes/";

    pub const GOALS: &str = "/goals/";
    pub const GOALS_ACTIVE: &str = "/goals/active/";
    pub const GOAL_DETAIL: &str = "/goals/{id}/";
    pub const GOAL_COMPLETE: &str = "/goals/{id}/complete/";
    pub const GOAL_UPDATE_PROGRESS: &str = "/goals/{id}/update_progress/";

    pub const MESSAGES: &str = "/messages/";
    pub const MESSAGES_DAILY: &str = "/messages/daily/";
    pub const MESSAGES_FAVORITES: &str = "/messages/favorites/";
    pub const MESSAGE_DETAIL: &str = "/messages/{id}/";
    pub const MESSAGE_MARK_READ: &str = "/messages/{id}/mark_read/";
    pub const MESSAGE_RATE: &str = "/messages/{id}/rate/";
    pub const MESSAGE_TOGGLE_FAVORITE: &str = "/messages/{id}/toggle_favorite/";

    pub const PAYMENT_VERIFY: &str = "/payments/verify/{id}/";
    pub const PAYMENT_WEBHOOK: &str = "/payments/webhook/";

    /// Fills the `{id}` placeholder of a detail/action template.
    pub fn with_id(template: &str, id: impl std::fmt::Display) -> String {
        template.replace("{id}", &id.to_string())
    }
}

pub mod storage_keys {
    pub const ACCESS_TOKEN: &str = "@tahfeez:access_token";
    pub const REFRESH_TOKEN: &str = "@tahfeez:refresh_token";
    pub const USER: &str = "@tahfeez:user";
}

pub mod messages {
    //! Error strings callers match on.

    pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
    pub const NO_REFRESH_TOKEN: &str = "No refresh token available";
    pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
}

#[cfg(test)]
mod tests {
    use super::endpoints;

    #[test]
    fn with_id_fills_placeholder() {
        assert_eq!(
            endpoints::with_id(endpoints::GOAL_UPDATE_PROGRESS, 7),
            "/goals/7/update_progress/"
        );
        assert_eq!(
            endpoints::with_id(endpoints::PAYMENT_VERIFY, "chg_123"),
            "/payments/verify/chg_123/"
        );
        assert_eq!(endpoints::with_id(endpoints::GOALS, 7), "/goals/");
    }
}
