use super::*;
use vox_core::Error;

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    CreatedAt,
    Upvotes,
    Urgency,
}

/// `ordering` query parameter: a key, optionally prefixed with `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub key: Key,
    pub descending: bool,
}

impl Default for Ordering {
    fn default() -> Self {
        Self {
            key: Key::CreatedAt,
            descending: true,
        }
    }
}

impl TryFrom<String> for Ordering {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let (descending, name) = match s.trim().strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, s.trim()),
        };
        let key = match name {
            "created_at" => Key::CreatedAt,
            "upvotes" => Key::Upvotes,
            "urgency" => Key::Urgency,
            _ => return Err(Error::validation(format!("cannot order by {}", name))),
        };
        Ok(Self { key, descending })
    }
}

impl<'de> serde::Deserialize<'de> for Ordering {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

impl Ordering {
    pub fn compare(&self, a: &Feedback, b: &Feedback) -> std::cmp::Ordering {
        let order = match self.key {
            Key::CreatedAt => a.created_at.cmp(&b.created_at),
            Key::Upvotes => a.upvotes.cmp(&b.upvotes),
            Key::Urgency => a.urgency.cmp(&b.urgency),
        };
        let order = order.then_with(|| a.id.cmp(&b.id));
        match self.descending {
            true => order.reverse(),
            false => order,
        }
    }
    pub fn sql(&self) -> &'static str {
        match (self.key, self.descending) {
            (Key::CreatedAt, false) => "created_at ASC, id ASC",
            (Key::CreatedAt, true) => "created_at DESC, id DESC",
            (Key::Upvotes, false) => "upvotes ASC, id ASC",
            (Key::Upvotes, true) => "upvotes DESC, id DESC",
            (Key::Urgency, false) => "urgency ASC, id ASC",
            (Key::Urgency, true) => "urgency DESC, id DESC",
        }
    }
}

/// Listing query. Every present filter must hold; `search` matches when
/// any of title, description, or keywords contains the term
/// (case-insensitive), or a theme equals it.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Filter {
    pub feedback_type: Option<FeedbackType>,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub urgency: Option<Urgency>,
    #[serde(rename = "sentiment_score__gte")]
    pub sentiment_min: Option<f32>,
    #[serde(rename = "sentiment_score__lte")]
    pub sentiment_max: Option<f32>,
    pub min_upvotes: Option<i32>,
    pub max_upvotes: Option<i32>,
    #[serde(rename = "date_range_after")]
    pub after: Option<chrono::NaiveDate>,
    #[serde(rename = "date_range_before")]
    pub before: Option<chrono::NaiveDate>,
    pub search: Option<String>,
    pub ordering: Option<Ordering>,
}

impl Filter {
    /// Search term, lowercased; blank terms are ignored.
    pub fn term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
    /// Inclusive lower bound on `created_at`.
    pub fn since(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.after
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }
    /// Exclusive upper bound on `created_at` (the day after `before`).
    pub fn until(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.before
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| t.and_utc())
    }
    pub fn ordering(&self) -> Ordering {
        self.ordering.unwrap_or_default()
    }
    pub fn matches(&self, f: &Feedback) -> bool {
        self.feedback_type.map_or(true, |t| f.feedback_type == t)
            && self.category.map_or(true, |c| f.category == c)
            && self.status.map_or(true, |s| f.status == s)
            && self.urgency.map_or(true, |u| f.urgency == u)
            && self.sentiment_min.map_or(true, |m| f.sentiment_score >= m)
            && self.sentiment_max.map_or(true, |m| f.sentiment_score <= m)
            && self.min_upvotes.map_or(true, |m| f.upvotes >= m)
            && self.max_upvotes.map_or(true, |m| f.upvotes <= m)
            && self.since().map_or(true, |t| f.created_at >= t)
            && self.until().map_or(true, |t| f.created_at < t)
            && self.term().map_or(true, |term| {
                f.title.to_lowercase().contains(&term)
                    || f.description.to_lowercase().contains(&term)
                    || f.keywords.iter().any(|k| k.to_lowercase().contains(&term))
                    || f.themes.iter().any(|t| *t == term)
            })
    }
    /// Applies filters and ordering to an in-memory collection.
    pub fn apply<'a>(&self, items: impl IntoIterator<Item = &'a Feedback>) -> Vec<Feedback> {
        let ordering = self.ordering();
        let mut hits = items
            .into_iter()
            .filter(|f| self.matches(f))
            .cloned()
            .collect::<Vec<_>>();
        hits.sort_by(|a, b| ordering.compare(a, b));
        hits
    }
}

#[cfg(feature = "database")]
mod sql {
    use super::*;
    use tokio_postgres::types::ToSql;

    pub type Param = Box<dyn ToSql + Sync + Send>;

    impl Filter {
        /// `WHERE` clause (possibly empty) and its positional parameters.
        pub fn clause(&self) -> (String, Vec<Param>) {
            let mut clauses = Vec::<String>::new();
            let mut params = Vec::<Param>::new();
            let mut bind = |clauses: &mut Vec<String>, sql: &str, param: Param| {
                params.push(param);
                clauses.push(sql.replace('?', &format!("${}", params.len())));
            };
            if let Some(t) = self.feedback_type {
                bind(&mut clauses, "feedback_type = ?", Box::new(t.as_str()));
            }
            if let Some(c) = self.category {
                bind(&mut clauses, "category = ?", Box::new(c.as_str()));
            }
            if let Some(s) = self.status {
                bind(&mut clauses, "status = ?", Box::new(s.as_str()));
            }
            if let Some(u) = self.urgency {
                bind(&mut clauses, "urgency = ?", Box::new(u.rank()));
            }
            if let Some(m) = self.sentiment_min {
                bind(&mut clauses, "sentiment_score >= ?", Box::new(m));
            }
            if let Some(m) = self.sentiment_max {
                bind(&mut clauses, "sentiment_score <= ?", Box::new(m));
            }
            if let Some(m) = self.min_upvotes {
                bind(&mut clauses, "upvotes >= ?", Box::new(m));
            }
            if let Some(m) = self.max_upvotes {
                bind(&mut clauses, "upvotes <= ?", Box::new(m));
            }
            if let Some(t) = self.since() {
                bind(&mut clauses, "created_at >= ?", Box::new(t));
            }
            if let Some(t) = self.until() {
                bind(&mut clauses, "created_at < ?", Box::new(t));
            }
            if let Some(term) = self.term() {
                params.push(Box::new(like(&term)));
                params.push(Box::new(term));
                let (p, t) = (params.len() - 1, params.len());
                clauses.push(format!(
                    "(title ILIKE ${p} OR description ILIKE ${p} \
                     OR EXISTS (SELECT 1 FROM unnest(keywords) k WHERE k ILIKE ${p}) \
                     OR ${t} = ANY(themes))"
                ));
            }
            match clauses.is_empty() {
                true => (String::new(), params),
                false => (format!(" WHERE {}", clauses.join(" AND ")), params),
            }
        }
    }

    /// Substring `ILIKE` pattern with the wildcard characters of `term` escaped.
    pub fn like(term: &str) -> String {
        format!(
            "%{}%",
            term.replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn empty_filter_has_no_clause() {
            let (clause, params) = Filter::default().clause();
            assert!(clause.is_empty());
            assert!(params.is_empty());
        }
        #[test]
        fn placeholders_follow_parameters() {
            let filter = Filter {
                category: Some(Category::Sanitation),
                min_upvotes: Some(3),
                after: chrono::NaiveDate::from_ymd_opt(2026, 1, 1),
                search: Some("  Bins ".into()),
                ..Filter::default()
            };
            let (clause, params) = filter.clause();
            assert_eq!(params.len(), 5);
            assert!(clause.starts_with(" WHERE category = $1 AND upvotes >= $2 AND created_at >= $3 AND ("));
            assert!(clause.contains("title ILIKE $4 OR description ILIKE $4"));
            assert!(clause.contains("FROM unnest(keywords) k WHERE k ILIKE $4"));
            assert!(clause.ends_with("OR $5 = ANY(themes))"));
            assert!(!clause.contains("$6"));
            assert_eq!(format!("{:?}", params[3]), format!("{:?}", "%bins%"));
            assert_eq!(format!("{:?}", params[4]), format!("{:?}", "bins"));
        }
        #[test]
        fn wildcards_in_search_are_escaped() {
            assert_eq!(like("50%"), "%50\\%%");
            assert_eq!(like("a_b"), "%a\\_b%");
            assert_eq!(like("c:\\x"), "%c:\\\\x%");
            let filter = Filter {
                search: Some("100%".into()),
                ..Filter::default()
            };
            let (_, params) = filter.clause();
            assert_eq!(format!("{:?}", params[0]), format!("{:?}", "%100\\%%"));
        }
    }
}
#[cfg(feature = "database")]
pub use sql::*;

#[cfg(test)]
mod tests {
    use super::*;
    use vox_core::ID;

    fn item(title: &str, themes: &[&str]) -> Feedback {
        let now = chrono::Utc::now();
        Feedback {
            id: ID::default(),
            author: ID::default(),
            title: title.into(),
            description: "reported by a resident".into(),
            category: Category::Sanitation,
            feedback_type: FeedbackType::Complaint,
            status: Status::Pending,
            urgency: Urgency::Medium,
            sentiment_score: 0.0,
            keywords: vec!["resident".into()],
            themes: themes.iter().map(|t| t.to_string()).collect(),
            upvotes: 0,
            location: String::new(),
            is_anonymous: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn parses_query_string() {
        let filter: Filter = serde_json::from_value(serde_json::json!({
            "category": "sanitation",
            "sentiment_score__gte": -0.5,
            "date_range_after": "2026-01-01",
            "ordering": "-upvotes",
        }))
        .unwrap();
        assert_eq!(filter.category, Some(Category::Sanitation));
        assert_eq!(filter.sentiment_min, Some(-0.5));
        assert_eq!(filter.ordering().key, Key::Upvotes);
        assert!(filter.ordering().descending);
    }
    #[test]
    fn rejects_unknown_ordering() {
        assert!(Ordering::try_from("title".to_string()).is_err());
        assert_eq!(Ordering::try_from("urgency".to_string()).unwrap().descending, false);
    }
    #[test]
    fn search_hits_theme_only_terms() {
        let hit = item("Overflowing bins", &["recycling"]);
        let miss = item("Overflowing bins", &["compost"]);
        let filter = Filter {
            search: Some("Recycling".into()),
            ..Filter::default()
        };
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));
    }
    #[test]
    fn theme_match_is_exact() {
        let filter = Filter {
            search: Some("recycl".into()),
            ..Filter::default()
        };
        assert!(!filter.matches(&item("Overflowing bins", &["recycling"])));
    }
    #[test]
    fn search_covers_title_description_keywords() {
        let feedback = item("Broken Bench", &[]);
        for term in ["bench", "RESIDENT", "reported"] {
            let filter = Filter {
                search: Some(term.into()),
                ..Filter::default()
            };
            assert!(filter.matches(&feedback), "{}", term);
        }
    }
    #[test]
    fn keyword_search_stays_within_one_keyword() {
        let mut feedback = item("Bench", &[]);
        feedback.keywords = vec!["Street".into(), "lighting".into()];
        let hit = Filter {
            search: Some("street".into()),
            ..Filter::default()
        };
        let across = Filter {
            search: Some("street light".into()),
            ..Filter::default()
        };
        assert!(hit.matches(&feedback));
        assert!(!across.matches(&feedback));
    }
    #[test]
    fn filters_are_conjunctive() {
        let mut urgent = item("Gas leak", &[]);
        urgent.urgency = Urgency::Critical;
        urgent.upvotes = 10;
        let filter = Filter {
            urgency: Some(Urgency::Critical),
            min_upvotes: Some(5),
            category: Some(Category::Safety),
            ..Filter::default()
        };
        assert!(!filter.matches(&urgent));
        urgent.category = Category::Safety;
        assert!(filter.matches(&urgent));
    }
    #[test]
    fn date_range_is_inclusive_of_whole_days() {
        let feedback = item("Noise", &[]);
        let today = feedback.created_at.date_naive();
        let filter = Filter {
            after: Some(today),
            before: Some(today),
            ..Filter::default()
        };
        assert!(filter.matches(&feedback));
        let filter = Filter {
            before: today.pred_opt(),
            ..Filter::default()
        };
        assert!(!filter.matches(&feedback));
    }
    #[test]
    fn apply_orders_results() {
        let mut low = item("a", &[]);
        low.upvotes = 1;
        let mut high = item("b", &[]);
        high.upvotes = 9;
        let filter = Filter {
            ordering: Some(Ordering {
                key: Key::Upvotes,
                descending: true,
            }),
            ..Filter::default()
        };
        let sorted = filter.apply([&low, &high]);
        assert_eq!(sorted[0].upvotes, 9);
        assert_eq!(sorted[1].upvotes, 1);
    }
}
