use super::*;
use vox_core::Error;
use vox_core::ID;
use vox_core::MIN_PASSWORD_LEN;
use vox_core::Unique;

/// Two-step registration state machine over a credential store.
///
/// Step 1 creates an inactive account; step 2 completes it with the
/// role-specific profile. Nothing else moves the step counter.
pub struct Registration<'a> {
    store: &'a dyn Credentials,
}

impl<'a> Registration<'a> {
    pub fn new(store: &'a dyn Credentials) -> Self {
        Self { store }
    }

    /// Creates an inactive step-1 account.
    pub async fn step1(&self, signup: Signup) -> Result<Account, Error> {
        let (account, password) = signup.validate()?;
        if self.store.exists(account.email()).await? {
            return Err(Error::validation("user account with this email already exists"));
        }
        let hashword = password::hash(&password)?;
        self.store.create(&account, &hashword).await?;
        Ok(account)
    }

    /// Completes registration with the schema of the account's role.
    pub async fn step2(&self, id: ID<Account>, body: serde_json::Value) -> Result<Account, Error> {
        let account = self
            .store
            .load(id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if account.step() != Step::Basic {
            return Err(Error::state("invalid registration step"));
        }
        let (profile, proof) = account.role().schema()(body)?;
        let account = account.complete(profile, proof)?;
        match self.store.activate(&account).await? {
            true => Ok(account),
            false => Err(Error::state("invalid registration step")),
        }
    }

    /// Current progress; no side effects.
    pub async fn check(&self, id: ID<Account>) -> Result<Progress, Error> {
        self.store
            .load(id)
            .await?
            .as_ref()
            .map(Progress::from)
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

impl Signup {
    /// Checks required fields and builds the step-1 account.
    /// Returns the account and the plaintext password to hash.
    pub fn validate(self) -> Result<(Account, String), Error> {
        let missing = [
            ("first_name", self.first_name.trim().is_empty()),
            ("last_name", self.last_name.trim().is_empty()),
            ("email", self.email.trim().is_empty()),
            ("phone", self.phone.trim().is_empty()),
            ("address", self.address.trim().is_empty()),
            ("password", self.password.is_empty()),
            ("role", self.role.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        let email = normalize(&self.email);
        if !plausible(&email) {
            return Err(Error::validation("enter a valid email address"));
        }
        let phone = self.phone.trim();
        if phone.len() > 32 || !phone.chars().all(|c| c.is_ascii_digit() || "+-() ".contains(c)) {
            return Err(Error::validation("enter a valid phone number"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let role = self.role.ok_or_else(|| Error::validation("role is required"))?;
        let account = Account::new(
            ID::default(),
            email,
            profile::required("first_name", self.first_name)?,
            profile::required("last_name", self.last_name)?,
            phone.to_string(),
            self.address.trim().to_string(),
            role,
        );
        Ok((account, self.password))
    }
}

/// Emails are compared case-insensitively.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn plausible(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
                && email.len() <= vox_core::MAX_FIELD_LEN
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup(email: &str, role: Role) -> Signup {
        Signup {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: "+1 555 0100".into(),
            address: "1 Main St".into(),
            password: "s3cret-pass".into(),
            role: Some(role),
        }
    }
    fn civilian_body() -> serde_json::Value {
        json!({
            "occupation": "engineer",
            "family_members": 2,
            "id_proof": { "type": "passport", "file": "https://cdn.example.org/p.png" },
        })
    }
    fn authority_body() -> serde_json::Value {
        json!({
            "authority_position": "inspector",
            "government_id": "GOV-1",
            "department_name": "roads",
            "work_location": "north",
            "id_proof": { "document_type": "national_id", "document_file": "https://cdn.example.org/n.png" },
        })
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = Signup::default().validate().unwrap_err();
        let Error::Validation(msg) = err else {
            panic!("expected validation error")
        };
        assert!(msg.contains("email"));
        assert!(msg.contains("role"));
    }
    #[test]
    fn emails_are_normalized_and_checked() {
        let (account, _) = signup("  A@X.Com ", Role::Civilian).validate().unwrap();
        assert_eq!(account.email(), "a@x.com");
        assert!(signup("nope", Role::Civilian).validate().is_err());
        assert!(signup("a@b", Role::Civilian).validate().is_err());
    }
    #[test]
    fn short_passwords_are_rejected() {
        let mut form = signup("a@x.com", Role::Civilian);
        form.password = "short".into();
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn step1_creates_inactive_account() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        let account = registration.step1(signup("a@x.com", Role::Civilian)).await.unwrap();
        assert_eq!(account.step(), Step::Basic);
        assert!(!account.is_active());
        let (stored, hashword) = store.lookup("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id(), account.id());
        assert!(password::verify("s3cret-pass", &hashword));
    }
    #[tokio::test]
    async fn step1_rejects_duplicate_email() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        registration.step1(signup("a@x.com", Role::Civilian)).await.unwrap();
        let err = registration.step1(signup("A@x.com", Role::Authority)).await;
        assert!(matches!(err, Err(Error::Validation(_))));
    }
    #[tokio::test]
    async fn step2_activates_and_keeps_invariant() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        let account = registration.step1(signup("a@x.com", Role::Civilian)).await.unwrap();
        assert_eq!(account.is_active(), account.step() == Step::Complete);
        let account = registration.step2(account.id(), civilian_body()).await.unwrap();
        assert_eq!(account.step(), Step::Complete);
        assert_eq!(account.is_active(), account.step() == Step::Complete);
        let stored = store.load(account.id()).await.unwrap().unwrap();
        assert!(stored.is_active());
    }
    #[tokio::test]
    async fn step2_twice_is_a_state_error() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        let account = registration.step1(signup("a@x.com", Role::Civilian)).await.unwrap();
        registration.step2(account.id(), civilian_body()).await.unwrap();
        let err = registration.step2(account.id(), civilian_body()).await;
        assert!(matches!(err, Err(Error::State(_))));
    }
    #[tokio::test]
    async fn step2_for_unknown_account_is_not_found() {
        let store = Memory::default();
        let err = Registration::new(&store).step2(ID::default(), civilian_body()).await;
        assert!(matches!(err, Err(Error::NotFound(_))));
    }
    #[tokio::test]
    async fn step2_uses_schema_of_recorded_role() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        let civilian = registration.step1(signup("c@x.com", Role::Civilian)).await.unwrap();
        let authority = registration.step1(signup("g@x.com", Role::Authority)).await.unwrap();
        let err = registration.step2(civilian.id(), authority_body()).await;
        assert!(matches!(err, Err(Error::Validation(_))));
        let err = registration.step2(authority.id(), civilian_body()).await;
        assert!(matches!(err, Err(Error::Validation(_))));
        assert!(!store.load(civilian.id()).await.unwrap().unwrap().is_active());
        assert!(registration.step2(authority.id(), authority_body()).await.is_ok());
    }
    #[tokio::test]
    async fn check_reports_next_step_until_complete() {
        let store = Memory::default();
        let registration = Registration::new(&store);
        let account = registration.step1(signup("a@x.com", Role::Civilian)).await.unwrap();
        let progress = registration.check(account.id()).await.unwrap();
        assert_eq!(progress.registration_step, Step::Basic);
        assert_eq!(
            progress.next_step,
            Some(format!("/auth/register/step2/{}", account.id()))
        );
        let again = registration.check(account.id()).await.unwrap();
        assert_eq!(again.next_step, progress.next_step);
        registration.step2(account.id(), civilian_body()).await.unwrap();
        let progress = registration.check(account.id()).await.unwrap();
        assert_eq!(progress.registration_step, Step::Complete);
        assert!(progress.is_active);
        assert_eq!(progress.next_step, None);
    }
}
