use super::*;
use tokio_postgres::Client;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;
use vox_database::*;

/// Blacklisted refresh token ids.
pub struct Revocation;

impl Schema for Revocation {
    fn name() -> &'static str {
        REVOCATIONS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            REVOCATIONS,
            " (
                jti         UUID PRIMARY KEY,
                expires_at  TIMESTAMPTZ NOT NULL
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_revocations_expires ON ",
            REVOCATIONS,
            " (expires_at);"
        )
    }
}

const COLUMNS: &str = "id, email, first_name, last_name, phone, address, role, registration_step, \
    occupation, family_members, authority_position, government_id, department_name, work_location, \
    id_proof_type, id_proof_file, created_at, hashword";

/// Rebuilds an account from a row selected with [`COLUMNS`].
fn hydrate(row: &Row) -> Result<(Account, String), Error> {
    let role = Role::try_from(row.get::<_, &str>(6)).map_err(|e| Error::internal(e))?;
    let step = Step::try_from(row.get::<_, i16>(7))?;
    let basic = Account::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3),
        row.get::<_, String>(4),
        row.get::<_, String>(5),
        role,
    );
    let profile = match role {
        Role::Civilian => row
            .get::<_, Option<String>>(8)
            .zip(row.get::<_, Option<i32>>(9))
            .map(|(occupation, family_members)| Profile::Civilian {
                occupation,
                family_members: family_members.max(0) as u32,
            }),
        Role::Authority => match (
            row.get::<_, Option<String>>(10),
            row.get::<_, Option<String>>(11),
            row.get::<_, Option<String>>(12),
            row.get::<_, Option<String>>(13),
        ) {
            (Some(position), Some(government_id), Some(department), Some(work_location)) => {
                Some(Profile::Authority {
                    position,
                    government_id,
                    department,
                    work_location,
                })
            }
            _ => None,
        },
    };
    let proof = match (
        row.get::<_, Option<&str>>(14),
        row.get::<_, Option<String>>(15),
    ) {
        (Some(kind), Some(file)) => Some(Proof::new(
            DocumentType::try_from(kind).map_err(|e| Error::internal(e))?,
            file,
        )),
        _ => None,
    };
    let account = Account::restore(basic, step, profile.zip(proof), row.get(16))?;
    Ok((account, row.get::<_, String>(17)))
}

#[async_trait::async_trait]
impl Credentials for Client {
    async fn exists(&self, email: &str) -> Result<bool, Error> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE email = $1"),
                &[&email],
            )
            .await?
            .is_some())
    }

    async fn create(&self, account: &Account, hashword: &str) -> Result<(), Error> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, email, hashword, first_name, last_name, phone, address, role, registration_step, is_active, created_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, FALSE, $9)"
            ),
            &[
                &account.id().inner(),
                &account.email(),
                &hashword,
                &account.first_name(),
                &account.last_name(),
                &account.phone(),
                &account.address(),
                &account.role().as_str(),
                &account.joined(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(|e| match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                Error::validation("user account with this email already exists")
            }
            _ => Error::from(e),
        })
    }

    async fn lookup(&self, email: &str) -> Result<Option<(Account, String)>, Error> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await?
        .as_ref()
        .map(hydrate)
        .transpose()
    }

    async fn load(&self, id: ID<Account>) -> Result<Option<Account>, Error> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await?
        .as_ref()
        .map(hydrate)
        .transpose()
        .map(|found| found.map(|(account, _)| account))
    }

    async fn activate(&self, account: &Account) -> Result<bool, Error> {
        let (occupation, family_members, position, government_id, department, work_location) =
            match account.profile() {
                Some(Profile::Civilian {
                    occupation,
                    family_members,
                }) => (
                    Some(occupation.as_str()),
                    Some(*family_members as i32),
                    None,
                    None,
                    None,
                    None,
                ),
                Some(Profile::Authority {
                    position,
                    government_id,
                    department,
                    work_location,
                }) => (
                    None,
                    None,
                    Some(position.as_str()),
                    Some(government_id.as_str()),
                    Some(department.as_str()),
                    Some(work_location.as_str()),
                ),
                None => return Err(Error::internal("activating an account without a profile")),
            };
        let proof = account
            .proof()
            .ok_or_else(|| Error::internal("activating an account without a proof"))?;
        let updated = self
            .execute(
                const_format::concatcp!(
                    "UPDATE ",
                    USERS,
                    " SET registration_step = 2,
                          is_active = TRUE,
                          occupation = $2,
                          family_members = $3,
                          authority_position = $4,
                          government_id = $5,
                          department_name = $6,
                          work_location = $7,
                          id_proof_type = $8,
                          id_proof_file = $9
                      WHERE id = $1 AND registration_step = 1"
                ),
                &[
                    &account.id().inner(),
                    &occupation,
                    &family_members,
                    &position,
                    &government_id,
                    &department,
                    &work_location,
                    &proof.document_type.as_str(),
                    &proof.document_file,
                ],
            )
            .await?;
        Ok(updated == 1)
    }

    async fn revoke(&self, jti: uuid::Uuid, expires: i64) -> Result<(), Error> {
        let expires = chrono::DateTime::from_timestamp(expires, 0)
            .ok_or_else(|| Error::internal("token expiry out of range"))?;
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                REVOCATIONS,
                " (jti, expires_at) VALUES ($1, $2) ON CONFLICT (jti) DO NOTHING"
            ),
            &[&jti, &expires],
        )
        .await
        .map(|_| ())
        .map_err(Error::from)
    }

    async fn revoked(&self, jti: uuid::Uuid) -> Result<bool, Error> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT 1 FROM ", REVOCATIONS, " WHERE jti = $1"),
                &[&jti],
            )
            .await?
            .is_some())
    }

    async fn purge(&self) -> Result<usize, Error> {
        Ok(self
            .execute(
                const_format::concatcp!("DELETE FROM ", REVOCATIONS, " WHERE expires_at < now()"),
                &[],
            )
            .await? as usize)
    }
}
