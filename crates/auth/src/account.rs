use super::*;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;

/// A registered user, at whatever registration step it has reached.
///
/// Activation is derived from the step, so `is_active() == (step == Complete)`
/// holds by construction. Profile and proof are present exactly when the
/// step is `Complete`, and the profile always matches the role.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: ID<Self>,
    email: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    role: Role,
    step: Step,
    profile: Option<Profile>,
    proof: Option<Proof>,
    joined: chrono::DateTime<chrono::Utc>,
}

impl Account {
    /// A freshly registered, inactive step-1 account.
    pub fn new(
        id: ID<Self>,
        email: String,
        first_name: String,
        last_name: String,
        phone: String,
        address: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            phone,
            address,
            role,
            step: Step::Basic,
            profile: None,
            proof: None,
            joined: chrono::Utc::now(),
        }
    }
    /// Rebuilds a stored account, re-checking the step/profile invariant.
    pub fn restore(
        basic: Self,
        step: Step,
        completion: Option<(Profile, Proof)>,
        joined: chrono::DateTime<chrono::Utc>,
    ) -> Result<Self, Error> {
        let account = Self { joined, ..basic };
        match (step, completion) {
            (Step::Basic, None) => Ok(account),
            (Step::Complete, Some((profile, proof))) => account.complete(profile, proof),
            _ => Err(Error::internal(format!(
                "account {} has inconsistent registration data",
                account.id
            ))),
        }
    }
    /// Moves a step-1 account to step 2.
    ///
    /// Fails with a state error on any account that is not at step 1, and
    /// with a validation error if the profile belongs to the other role.
    pub fn complete(self, profile: Profile, proof: Proof) -> Result<Self, Error> {
        if self.step != Step::Basic {
            return Err(Error::state(format!(
                "registration already at step {}",
                i16::from(self.step)
            )));
        }
        if profile.role() != self.role {
            return Err(Error::validation(format!(
                "a {} account cannot submit a {} profile",
                self.role,
                profile.role()
            )));
        }
        Ok(Self {
            step: Step::Complete,
            profile: Some(profile),
            proof: Some(proof),
            ..self
        })
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn step(&self) -> Step {
        self.step
    }
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }
    pub fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }
    pub fn joined(&self) -> chrono::DateTime<chrono::Utc> {
        self.joined
    }
    pub fn is_active(&self) -> bool {
        self.step == Step::Complete
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use vox_database::*;

    /// Role-specific columns stay NULL until step 2; the CHECK constraint
    /// keeps `is_active` tied to the step.
    impl Schema for Account {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id                  UUID PRIMARY KEY,
                    email               VARCHAR(255) UNIQUE NOT NULL,
                    hashword            TEXT NOT NULL,
                    first_name          VARCHAR(255) NOT NULL,
                    last_name           VARCHAR(255) NOT NULL,
                    phone               VARCHAR(32) NOT NULL,
                    address             TEXT NOT NULL,
                    role                VARCHAR(16) NOT NULL,
                    registration_step   SMALLINT NOT NULL DEFAULT 1 CHECK (registration_step IN (1, 2)),
                    is_active           BOOLEAN NOT NULL DEFAULT FALSE,
                    occupation          VARCHAR(255),
                    family_members      INTEGER,
                    authority_position  VARCHAR(255),
                    government_id       VARCHAR(255),
                    department_name     VARCHAR(255),
                    work_location       VARCHAR(255),
                    id_proof_type       VARCHAR(32),
                    id_proof_file       TEXT,
                    created_at          TIMESTAMPTZ NOT NULL DEFAULT now(),
                    CHECK (is_active = (registration_step = 2))
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civilian() -> Account {
        Account::new(
            ID::default(),
            "a@x.com".into(),
            "Ada".into(),
            "Lovelace".into(),
            "+15550100".into(),
            "1 Main St".into(),
            Role::Civilian,
        )
    }
    fn proof() -> Proof {
        Proof::new(DocumentType::Passport, "https://cdn.example.org/id.png".into())
    }
    fn occupation() -> Profile {
        Profile::Civilian {
            occupation: "engineer".into(),
            family_members: 2,
        }
    }

    #[test]
    fn new_accounts_are_inactive() {
        let account = civilian();
        assert_eq!(account.step(), Step::Basic);
        assert!(!account.is_active());
        assert!(account.profile().is_none());
    }
    #[test]
    fn completion_activates() {
        let account = civilian().complete(occupation(), proof()).unwrap();
        assert_eq!(account.step(), Step::Complete);
        assert!(account.is_active());
        assert_eq!(account.profile().map(Profile::role), Some(Role::Civilian));
    }
    #[test]
    fn completion_is_not_repeatable() {
        let account = civilian().complete(occupation(), proof()).unwrap();
        let again = account.complete(occupation(), proof());
        assert!(matches!(again, Err(Error::State(_))));
    }
    #[test]
    fn profile_must_match_role() {
        let profile = Profile::Authority {
            position: "chief".into(),
            government_id: "G-1".into(),
            department: "water".into(),
            work_location: "hq".into(),
        };
        assert!(matches!(
            civilian().complete(profile, proof()),
            Err(Error::Validation(_))
        ));
    }
    #[test]
    fn restore_rejects_inconsistent_rows() {
        let joined = chrono::Utc::now();
        assert!(Account::restore(civilian(), Step::Complete, None, joined).is_err());
        assert!(Account::restore(civilian(), Step::Basic, Some((occupation(), proof())), joined).is_err());
        let ok = Account::restore(civilian(), Step::Complete, Some((occupation(), proof())), joined);
        assert!(ok.unwrap().is_active());
    }
}
