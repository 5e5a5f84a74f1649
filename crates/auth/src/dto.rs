use super::*;
use serde::Deserialize;
use serde::Serialize;
use vox_core::ID;
use vox_core::Unique;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Step-1 registration body. Fields default to empty so that missing
/// fields are reported together by [`Signup::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Summary returned at login and after step 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&Account> for UserInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            role: account.role(),
            is_active: account.is_active(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub detail: String,
    pub user: UserInfo,
}

/// Full profile of the authenticated caller.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: ID<Account>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub is_active: bool,
    pub registration_step: Step,
    #[serde(flatten)]
    pub profile: Option<Profile>,
    pub id_proof: Option<Proof>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl From<&Account> for ProfileView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().to_string(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            phone: account.phone().to_string(),
            address: account.address().to_string(),
            role: account.role(),
            is_active: account.is_active(),
            registration_step: account.step(),
            profile: account.profile().cloned(),
            id_proof: account.proof().cloned(),
            date_joined: account.joined(),
        }
    }
}

/// Where an account stands in registration, and where to go next.
#[derive(Debug, Serialize)]
pub struct Progress {
    pub id: ID<Account>,
    pub email: String,
    pub role: Role,
    pub registration_step: Step,
    pub is_active: bool,
    pub next_step: Option<String>,
}

impl From<&Account> for Progress {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            email: account.email().to_string(),
            role: account.role(),
            registration_step: account.step(),
            is_active: account.is_active(),
            next_step: account
                .step()
                .next()
                .map(|_| format!("{}/{}", vox_core::STEP2_PATH, account.id())),
        }
    }
}
