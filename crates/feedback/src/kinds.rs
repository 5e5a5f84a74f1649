use vox_core::Error;

/// Declares a snake_case wire enum with text conversions for storage.
macro_rules! textual {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
            pub fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }
        impl TryFrom<&str> for $name {
            type Error = Error;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(Error::validation(format!(
                        concat!("unknown ", stringify!($name), ": {}"),
                        s
                    ))),
                }
            }
        }
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

textual!(
    /// What the author wants out of the submission.
    FeedbackType {
        Complaint => "complaint",
        Suggestion => "suggestion",
        Appreciation => "appreciation",
        Inquiry => "inquiry",
    }
);

textual!(
    /// Public service area the feedback concerns.
    Category {
        Infrastructure => "infrastructure",
        Sanitation => "sanitation",
        Safety => "safety",
        Transport => "transport",
        Health => "health",
        Education => "education",
        Environment => "environment",
        Other => "other",
    }
);

textual!(
    /// Moderation state. Free-form: the owner may set any value on update.
    Status {
        Pending => "pending",
        InReview => "in_review",
        Resolved => "resolved",
        Rejected => "rejected",
    }
);

textual!(
    /// How pressing the issue is. Ordered from least to most urgent.
    Urgency {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
);

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Self::Medium
    }
}

impl Urgency {
    /// Sort rank, stored as SMALLINT so the database orders it correctly.
    pub fn rank(&self) -> i16 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }
}

impl TryFrom<i16> for Urgency {
    type Error = Error;
    fn try_from(rank: i16) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|u| u.rank() == rank)
            .ok_or_else(|| Error::internal(format!("invalid urgency rank {}", rank)))
    }
}

impl PartialOrd for Urgency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Urgency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn text_round_trip() {
        for status in Status::all() {
            assert_eq!(Status::try_from(status.as_str()), Ok(*status));
        }
        for category in Category::all() {
            assert_eq!(Category::try_from(category.as_str()), Ok(*category));
        }
        assert!(FeedbackType::try_from("rant").is_err());
    }
    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(serde_json::to_string(&Status::InReview).unwrap(), "\"in_review\"");
    }
    #[test]
    fn urgency_is_ordered_by_rank() {
        assert!(Urgency::Low < Urgency::Critical);
        for urgency in Urgency::all() {
            assert_eq!(Urgency::try_from(urgency.rank()), Ok(*urgency));
        }
    }
}
