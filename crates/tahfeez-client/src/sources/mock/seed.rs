use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tahfeez_core::{GoalStatus, Language, MessageType, Subscription, SubscriptionStatus};

/// Display text: seed content carries both languages, user-entered text
/// is returned as typed.
#[derive(Debug, Clone)]
pub(super) enum Text {
    Localized { en: &'static str, ar: &'static str },
    Plain(String),
}

impl Text {
    pub fn get(&self, language: Language) -> String {
        match (self, language) {
            (Self::Localized { en, .. }, Language::En) => (*en).to_string(),
            (Self::Localized { ar, .. }, Language::Ar) => (*ar).to_string(),
            (Self::Plain(text), _) => text.clone(),
        }
    }

    pub fn contains(&self, needle: &str, language: Language) -> bool {
        self.get(language).to_lowercase().contains(needle)
    }
}

fn tr(en: &'static str, ar: &'static str) -> Text {
    Text::Localized { en, ar }
}

pub(super) struct SeedScope {
    pub id: u64,
    pub name: Text,
    pub description: Text,
    pub category: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub(super) struct SeedCategory {
    pub key: &'static str,
    pub name: Text,
}

pub(super) struct SeedPackage {
    pub id: u64,
    pub name: Text,
    pub description: Text,
    pub price: &'static str,
    pub duration_days: u32,
    pub max_scopes: u32,
    pub messages_per_day: u32,
    pub features: Vec<Text>,
    pub is_featured: bool,
}

pub(super) struct SeedMessage {
    pub id: u64,
    pub title: Text,
    pub content: Text,
    pub scope: Option<u64>,
    pub message_type: MessageType,
    pub is_read: bool,
    pub is_favorite: bool,
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

pub(super) struct SeedGoal {
    pub id: u64,
    pub title: Text,
    pub description: Text,
    pub scope: Option<u64>,
    pub status: GoalStatus,
    pub progress_percentage: u8,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub(super) const CURRENCY: &str = "USD";

/// Fixed reference instant so seeded timestamps are reproducible.
pub(super) fn seed_day(day: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
        .single()
        .unwrap_or_default();
    base + Duration::days(day)
}

pub(super) fn categories() -> Vec<SeedCategory> {
    vec![
        SeedCategory {
            key: "personal",
            name: tr("Personal", "شخصي"),
        },
        SeedCategory {
            key: "professional",
            name: tr("Professional", "مهني"),
        },
        SeedCategory {
            key: "social",
            name: tr("Social", "اجتماعي"),
        },
        SeedCategory {
            key: "spiritual",
            name: tr("Spiritual", "روحي"),
        },
    ]
}

pub(super) fn scopes() -> Vec<SeedScope> {
    vec![
        SeedScope {
            id: 1,
            name: tr("Health", "الصحة"),
            description: tr(
                "Build habits that keep your body strong.",
                "ابنِ عادات تحافظ على قوة جسدك.",
            ),
            category: "personal",
            icon: "heart",
            color: "#E57373",
        },
        SeedScope {
            id: 2,
            name: tr("Career", "المهنة"),
            description: tr(
                "Grow your skills and move your work forward.",
                "طوّر مهاراتك وتقدّم في عملك.",
            ),
            category: "professional",
            icon: "briefcase",
            color: "#64B5F6",
        },
        SeedScope {
            id: 3,
            name: tr("Family", "الأسرة"),
            description: tr(
                "Make time for the people closest to you.",
                "خصّص وقتاً لأقرب الناس إليك.",
            ),
            category: "social",
            icon: "home",
            color: "#81C784",
        },
        SeedScope {
            id: 4,
            name: tr("Faith", "الإيمان"),
            description: tr(
                "Nurture calm, gratitude and reflection.",
                "نمِّ السكينة والامتنان والتأمل.",
            ),
            category: "spiritual",
            icon: "moon",
            color: "#9575CD",
        },
        SeedScope {
            id: 5,
            name: tr("Learning", "التعلّم"),
            description: tr(
                "Keep curious and learn something every day.",
                "ابقَ فضولياً وتعلّم شيئاً كل يوم.",
            ),
            category: "professional",
            icon: "book",
            color: "#FFB74D",
        },
        SeedScope {
            id: 6,
            name: tr("Finance", "المال"),
            description: tr(
                "Spend with intention and save with purpose.",
                "أنفق بوعي وادّخر بهدف.",
            ),
            category: "personal",
            icon: "wallet",
            color: "#4DB6AC",
        },
    ]
}

pub(super) fn packages() -> Vec<SeedPackage> {
    vec![
        SeedPackage {
            id: 1,
            name: tr("Basic", "الأساسية"),
            description: tr(
                "A daily message for up to two scopes.",
                "رسالة يومية لمجالين كحد أقصى.",
            ),
            price: "0.00",
            duration_days: 30,
            max_scopes: 2,
            messages_per_day: 1,
            features: vec![tr("1 message per day", "رسالة واحدة يومياً")],
            is_featured: false,
        },
        SeedPackage {
            id: 2,
            name: tr("Premium", "المميزة"),
            description: tr(
                "More scopes, more messages and goal tracking.",
                "مجالات ورسائل أكثر مع متابعة الأهداف.",
            ),
            price: "9.99",
            duration_days: 30,
            max_scopes: 4,
            messages_per_day: 3,
            features: vec![
                tr("3 messages per day", "3 رسائل يومياً"),
                tr("Goal tracking", "متابعة الأهداف"),
            ],
            is_featured: true,
        },
        SeedPackage {
            id: 3,
            name: tr("Pro", "الاحترافية"),
            description: tr(
                "Every scope and the full message library.",
                "جميع المجالات ومكتبة الرسائل كاملة.",
            ),
            price: "19.99",
            duration_days: 30,
            max_scopes: 6,
            messages_per_day: 5,
            features: vec![
                tr("5 messages per day", "5 رسائل يومياً"),
                tr("Goal tracking", "متابعة الأهداف"),
                tr("Priority support", "دعم ذو أولوية"),
            ],
            is_featured: false,
        },
    ]
}

pub(super) fn messages() -> Vec<SeedMessage> {
    vec![
        SeedMessage {
            id: 1,
            title: tr("Start small", "ابدأ بخطوة صغيرة"),
            content: tr(
                "A ten minute walk today is better than a perfect plan for tomorrow.",
                "مشي عشر دقائق اليوم خير من خطة مثالية للغد.",
            ),
            scope: Some(1),
            message_type: MessageType::Daily,
            is_read: true,
            is_favorite: true,
            rating: Some(5),
            created_at: seed_day(0),
            read_at: Some(seed_day(0)),
        },
        SeedMessage {
            id: 2,
            title: tr("One skill at a time", "مهارة واحدة في كل مرة"),
            content: tr(
                "Pick one skill this week and practise it for twenty minutes a day.",
                "اختر مهارة واحدة هذا الأسبوع وتدرّب عليها عشرين دقيقة يومياً.",
            ),
            scope: Some(2),
            message_type: MessageType::Motivational,
            is_read: false,
            is_favorite: false,
            rating: None,
            created_at: seed_day(1),
            read_at: None,
        },
        SeedMessage {
            id: 3,
            title: tr("Call someone you love", "اتصل بمن تحب"),
            content: tr(
                "A short call can make someone's whole day.",
                "مكالمة قصيرة قد تصنع يوم أحدهم بالكامل.",
            ),
            scope: Some(3),
            message_type: MessageType::Reminder,
            is_read: false,
            is_favorite: true,
            rating: None,
            created_at: seed_day(2),
            read_at: None,
        },
        SeedMessage {
            id: 4,
            title: tr("Gratitude", "الامتنان"),
            content: tr(
                "Write down three things you are grateful for before you sleep.",
                "اكتب ثلاثة أشياء تشعر بالامتنان لها قبل أن تنام.",
            ),
            scope: Some(4),
            message_type: MessageType::Daily,
            is_read: false,
            is_favorite: false,
            rating: None,
            created_at: seed_day(3),
            read_at: None,
        },
        SeedMessage {
            id: 5,
            title: tr("Read ten pages", "اقرأ عشر صفحات"),
            content: tr(
                "Ten pages a day adds up to a dozen books a year.",
                "عشر صفحات يومياً تعني اثني عشر كتاباً في السنة.",
            ),
            scope: Some(5),
            message_type: MessageType::Tip,
            is_read: true,
            is_favorite: false,
            rating: Some(4),
            created_at: seed_day(4),
            read_at: Some(seed_day(4)),
        },
        SeedMessage {
            id: 6,
            title: tr("Pay yourself first", "ادفع لنفسك أولاً"),
            content: tr(
                "Move a fixed amount into savings the day you get paid.",
                "حوّل مبلغاً ثابتاً إلى المدخرات يوم استلام راتبك.",
            ),
            scope: Some(6),
            message_type: MessageType::Daily,
            is_read: false,
            is_favorite: false,
            rating: None,
            created_at: seed_day(5),
            read_at: None,
        },
    ]
}

pub(super) fn goals() -> Vec<SeedGoal> {
    vec![
        SeedGoal {
            id: 1,
            title: tr("Walk 10,000 steps a day", "المشي 10,000 خطوة يومياً"),
            description: tr(
                "Build up to a daily walk before the end of the month.",
                "الوصول إلى المشي اليومي قبل نهاية الشهر.",
            ),
            scope: Some(1),
            status: GoalStatus::Active,
            progress_percentage: 40,
            target_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            created_at: seed_day(0),
            updated_at: seed_day(3),
            completed_at: None,
        },
        SeedGoal {
            id: 2,
            title: tr("Read 12 books this year", "قراءة 12 كتاباً هذا العام"),
            description: tr("One book every month.", "كتاب واحد كل شهر."),
            scope: Some(5),
            status: GoalStatus::Active,
            progress_percentage: 25,
            target_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            created_at: seed_day(1),
            updated_at: seed_day(4),
            completed_at: None,
        },
        SeedGoal {
            id: 3,
            title: tr("Build an emergency fund", "تكوين صندوق للطوارئ"),
            description: tr(
                "Three months of expenses set aside.",
                "ادخار مصاريف ثلاثة أشهر.",
            ),
            scope: Some(6),
            status: GoalStatus::Completed,
            progress_percentage: 100,
            target_date: None,
            created_at: seed_day(0),
            updated_at: seed_day(5),
            completed_at: Some(seed_day(5)),
        },
    ]
}

pub(super) fn subscriptions() -> Vec<Subscription> {
    vec![Subscription {
        id: 1,
        package: 2,
        package_name: None,
        status: SubscriptionStatus::Active,
        scopes: vec![1, 2, 5],
        start_date: seed_day(0),
        end_date: Some(seed_day(30)),
        auto_renew: true,
        created_at: seed_day(0),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_text_follows_language() {
        let text = tr("Health", "الصحة");
        assert_eq!(text.get(Language::En), "Health");
        assert_eq!(text.get(Language::Ar), "الصحة");
        assert_eq!(Text::Plain("mine".to_string()).get(Language::Ar), "mine");
    }

    #[test]
    fn seed_references_are_consistent() {
        let scope_ids: Vec<u64> = scopes().iter().map(|scope| scope.id).collect();
        let category_keys: Vec<&str> = categories().iter().map(|category| category.key).collect();
        assert!(scopes()
            .iter()
            .all(|scope| category_keys.contains(&scope.category)));
        assert!(messages()
            .iter()
            .filter_map(|message| message.scope)
            .all(|id| scope_ids.contains(&id)));
        for subscription in subscriptions() {
            let package = packages()
                .into_iter()
                .find(|package| package.id == subscription.package)
                .expect("package");
            assert!(subscription.scopes.len() <= package.max_scopes as usize);
        }
    }
}
