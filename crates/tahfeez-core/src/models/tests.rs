use super::*;
use serde_json::json;

#[test]
fn language_parses_and_reports_direction() {
    assert_eq!("ar".parse::<Language>().expect("arabic"), Language::Ar);
    assert_eq!("English".parse::<Language>().expect("english"), Language::En);
    assert!(Language::Ar.is_rtl());
    assert!(!Language::En.is_rtl());
    assert!("fr".parse::<Language>().is_err());
}

#[test]
fn enum_parse_invalid() {
    assert!("done".parse::<GoalStatus>().is_err());
    assert!("gone".parse::<SubscriptionStatus>().is_err());
    assert_eq!(
        "completed".parse::<GoalStatus>().expect("status"),
        GoalStatus::Completed
    );
}

#[test]
fn user_defaults_optional_fields() {
    let user: User = serde_json::from_value(json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "date_joined": "2024-01-01T00:00:00Z"
    }))
    .expect("user");
    assert!(user.is_active);
    assert!(user.first_name.is_none());
}

#[test]
fn goal_update_skips_absent_fields() {
    let update = GoalUpdate {
        title: Some("Run".to_string()),
        ..GoalUpdate::default()
    };
    let value = serde_json::to_value(update).expect("serialize");
    assert_eq!(value, json!({"title": "Run"}));
}

#[test]
fn message_accepts_backend_shape() {
    let message: Message = serde_json::from_value(json!({
        "id": 3,
        "title": "Keep going",
        "content": "Small steps every day.",
        "message_type": "daily",
        "language": "ar",
        "created_at": "2024-03-01T08:00:00Z"
    }))
    .expect("message");
    assert_eq!(message.language, Language::Ar);
    assert!(!message.is_favorite);
    assert!(message.rating.is_none());
}
