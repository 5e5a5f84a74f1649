use super::*;
use vox_auth::Account;
use vox_core::ID;
use vox_core::Unique;

/// A piece of citizen feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: ID<Self>,
    pub author: ID<Account>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub feedback_type: FeedbackType,
    pub status: Status,
    pub urgency: Urgency,
    pub sentiment_score: f32,
    pub keywords: Vec<String>,
    pub themes: Vec<String>,
    pub upvotes: i32,
    pub location: String,
    pub is_anonymous: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Unique for Feedback {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Feedback {
    pub fn owned_by(&self, user: ID<Account>) -> bool {
        self.author == user
    }
    /// What `viewer` gets to see. Anonymous feedback hides its author
    /// from everyone but the author.
    pub fn view(&self, viewer: Option<ID<Account>>) -> FeedbackView {
        let reveal = !self.is_anonymous || viewer == Some(self.author);
        FeedbackView {
            id: self.id,
            user: reveal.then_some(self.author),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            feedback_type: self.feedback_type,
            status: self.status,
            urgency: self.urgency,
            sentiment_score: self.sentiment_score,
            keywords: self.keywords.clone(),
            themes: self.themes.clone(),
            upvotes: self.upvotes,
            location: self.location.clone(),
            is_anonymous: self.is_anonymous,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Wire form of [`Feedback`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FeedbackView {
    pub id: ID<Feedback>,
    pub user: Option<ID<Account>>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub feedback_type: FeedbackType,
    pub status: Status,
    pub urgency: Urgency,
    pub sentiment_score: f32,
    pub keywords: Vec<String>,
    pub themes: Vec<String>,
    pub upvotes: i32,
    pub location: String,
    pub is_anonymous: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use vox_database::*;

    impl Schema for Feedback {
        fn name() -> &'static str {
            FEEDBACK
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                FEEDBACK,
                " (
                    id               UUID PRIMARY KEY,
                    user_id          UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    title            VARCHAR(255) NOT NULL,
                    description      TEXT NOT NULL,
                    category         VARCHAR(32) NOT NULL,
                    feedback_type    VARCHAR(32) NOT NULL,
                    status           VARCHAR(32) NOT NULL DEFAULT 'pending',
                    urgency          SMALLINT NOT NULL,
                    sentiment_score  REAL NOT NULL DEFAULT 0 CHECK (sentiment_score BETWEEN -1 AND 1),
                    keywords         TEXT[] NOT NULL DEFAULT '{}',
                    themes           TEXT[] NOT NULL DEFAULT '{}',
                    upvotes          INTEGER NOT NULL DEFAULT 0,
                    location         VARCHAR(255) NOT NULL DEFAULT '',
                    is_anonymous     BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at       TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_feedback_user ON ",
                FEEDBACK,
                " (user_id);
                 CREATE INDEX IF NOT EXISTS idx_feedback_created ON ",
                FEEDBACK,
                " (created_at);
                 CREATE INDEX IF NOT EXISTS idx_feedback_themes ON ",
                FEEDBACK,
                " USING GIN (themes);"
            )
        }
    }
}
