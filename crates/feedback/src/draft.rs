use super::*;
use vox_auth::Account;
use vox_core::Error;
use vox_core::ID;
use vox_core::MAX_FIELD_LEN;

const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Body of a new submission. Server-owned fields (id, author, keywords,
/// upvotes, status, timestamps) are not accepted.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub feedback_type: FeedbackType,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub sentiment_score: Option<f32>,
    #[serde(default)]
    pub themes: Vec<String>,
}

impl Draft {
    pub fn build(self, author: ID<Account>) -> Result<Feedback, Error> {
        let title = text("title", &self.title, MAX_FIELD_LEN)?;
        let description = text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        let now = chrono::Utc::now();
        Ok(Feedback {
            id: ID::default(),
            author,
            keywords: keywords::keywords(&title, &description),
            title,
            description,
            category: self.category,
            feedback_type: self.feedback_type,
            status: Status::default(),
            urgency: self.urgency,
            sentiment_score: sentiment(self.sentiment_score.unwrap_or(0.0))?,
            themes: keywords::themes(self.themes),
            upvotes: 0,
            location: location(&self.location)?,
            is_anonymous: self.is_anonymous,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Owner-editable fields; absent fields are left untouched.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Patch {
    pub status: Option<Status>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub feedback_type: Option<FeedbackType>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub is_anonymous: Option<bool>,
    pub urgency: Option<Urgency>,
}

impl Patch {
    pub fn apply(self, feedback: Feedback) -> Result<Feedback, Error> {
        let title = match self.title {
            Some(t) => text("title", &t, MAX_FIELD_LEN)?,
            None => feedback.title.clone(),
        };
        let description = match self.description {
            Some(d) => text("description", &d, MAX_DESCRIPTION_LEN)?,
            None => feedback.description.clone(),
        };
        let rewritten = title != feedback.title || description != feedback.description;
        Ok(Feedback {
            keywords: match rewritten {
                true => keywords::keywords(&title, &description),
                false => feedback.keywords.clone(),
            },
            title,
            description,
            status: self.status.unwrap_or(feedback.status),
            feedback_type: self.feedback_type.unwrap_or(feedback.feedback_type),
            category: self.category.unwrap_or(feedback.category),
            location: match self.location {
                Some(l) => location(&l)?,
                None => feedback.location.clone(),
            },
            is_anonymous: self.is_anonymous.unwrap_or(feedback.is_anonymous),
            urgency: self.urgency.unwrap_or(feedback.urgency),
            updated_at: chrono::Utc::now(),
            ..feedback
        })
    }
}

fn text(name: &str, value: &str, max: usize) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", name)));
    }
    if value.chars().count() > max {
        return Err(Error::validation(format!("{} is too long", name)));
    }
    Ok(value.to_string())
}

fn location(value: &str) -> Result<String, Error> {
    let value = value.trim();
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(Error::validation("location is too long"));
    }
    Ok(value.to_string())
}

fn sentiment(score: f32) -> Result<f32, Error> {
    match score.is_finite() && (-1.0..=1.0).contains(&score) {
        true => Ok(score),
        false => Err(Error::validation("sentiment_score must be between -1 and 1")),
    }
}
