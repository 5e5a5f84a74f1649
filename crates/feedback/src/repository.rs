use super::*;
use tokio_postgres::Client;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;
use vox_database::*;

const COLUMNS: &str = "id, user_id, title, description, category, feedback_type, status, urgency, \
    sentiment_score, keywords, themes, upvotes, location, is_anonymous, created_at, updated_at";

fn hydrate(row: &Row) -> Result<Feedback, Error> {
    Ok(Feedback {
        id: ID::from(row.get::<_, uuid::Uuid>(0)),
        author: ID::from(row.get::<_, uuid::Uuid>(1)),
        title: row.get(2),
        description: row.get(3),
        category: Category::try_from(row.get::<_, &str>(4)).map_err(Error::internal)?,
        feedback_type: FeedbackType::try_from(row.get::<_, &str>(5)).map_err(Error::internal)?,
        status: Status::try_from(row.get::<_, &str>(6)).map_err(Error::internal)?,
        urgency: Urgency::try_from(row.get::<_, i16>(7))?,
        sentiment_score: row.get(8),
        keywords: row.get(9),
        themes: row.get(10),
        upvotes: row.get(11),
        location: row.get(12),
        is_anonymous: row.get(13),
        created_at: row.get(14),
        updated_at: row.get(15),
    })
}

#[async_trait::async_trait]
impl Ledger for Client {
    async fn insert(&self, feedback: &Feedback) -> Result<(), Error> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                FEEDBACK,
                " (",
                COLUMNS,
                ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
            ),
            &[
                &feedback.id().inner(),
                &feedback.author.inner(),
                &feedback.title,
                &feedback.description,
                &feedback.category.as_str(),
                &feedback.feedback_type.as_str(),
                &feedback.status.as_str(),
                &feedback.urgency.rank(),
                &feedback.sentiment_score,
                &feedback.keywords,
                &feedback.themes,
                &feedback.upvotes,
                &feedback.location,
                &feedback.is_anonymous,
                &feedback.created_at,
                &feedback.updated_at,
            ],
        )
        .await?;
        Ok(())
    }

    async fn fetch(&self, id: ID<Feedback>) -> Result<Option<Feedback>, Error> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", FEEDBACK, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await?
        .as_ref()
        .map(hydrate)
        .transpose()
    }

    async fn list(&self, filter: &Filter) -> Result<Vec<Feedback>, Error> {
        let (clause, params) = filter.clause();
        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            COLUMNS,
            FEEDBACK,
            clause,
            filter.ordering().sql()
        );
        let params = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();
        self.query(&sql, &params)
            .await?
            .iter()
            .map(hydrate)
            .collect()
    }

    async fn save(&self, feedback: &Feedback) -> Result<bool, Error> {
        let n = self
            .execute(
                const_format::concatcp!(
                    "UPDATE ",
                    FEEDBACK,
                    " SET title = $2,
                          description = $3,
                          category = $4,
                          feedback_type = $5,
                          status = $6,
                          urgency = $7,
                          keywords = $8,
                          location = $9,
                          is_anonymous = $10,
                          updated_at = $11
                      WHERE id = $1"
                ),
                &[
                    &feedback.id().inner(),
                    &feedback.title,
                    &feedback.description,
                    &feedback.category.as_str(),
                    &feedback.feedback_type.as_str(),
                    &feedback.status.as_str(),
                    &feedback.urgency.rank(),
                    &feedback.keywords,
                    &feedback.location,
                    &feedback.is_anonymous,
                    &feedback.updated_at,
                ],
            )
            .await?;
        Ok(n == 1)
    }

    async fn remove(&self, id: ID<Feedback>) -> Result<bool, Error> {
        let n = self
            .execute(
                const_format::concatcp!("DELETE FROM ", FEEDBACK, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?;
        Ok(n == 1)
    }
}
