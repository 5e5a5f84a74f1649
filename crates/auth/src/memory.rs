use super::*;
use std::collections::HashMap;
use tokio::sync::RwLock;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;

/// In-process credential store for tests and database-less local runs.
#[derive(Default)]
pub struct Memory {
    accounts: RwLock<HashMap<ID<Account>, (Account, String)>>,
    blacklist: RwLock<HashMap<uuid::Uuid, i64>>,
}

impl Memory {
    /// Seeds an account directly, bypassing registration.
    pub async fn insert(&self, account: Account, hashword: &str) {
        self.accounts
            .write()
            .await
            .insert(account.id(), (account, hashword.to_string()));
    }
}

#[async_trait::async_trait]
impl Credentials for Memory {
    async fn exists(&self, email: &str) -> Result<bool, Error> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .any(|(a, _)| a.email() == email))
    }
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), Error> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|(a, _)| a.email() == account.email()) {
            return Err(Error::validation("user account with this email already exists"));
        }
        accounts.insert(account.id(), (account.clone(), hashword.to_string()));
        Ok(())
    }
    async fn lookup(&self, email: &str) -> Result<Option<(Account, String)>, Error> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|(a, _)| a.email() == email)
            .cloned())
    }
    async fn load(&self, id: ID<Account>) -> Result<Option<Account>, Error> {
        Ok(self.accounts.read().await.get(&id).map(|(a, _)| a.clone()))
    }
    async fn activate(&self, account: &Account) -> Result<bool, Error> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id()) {
            Some((stored, _)) if stored.step() == Step::Basic => {
                *stored = account.clone();
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(Error::not_found("user not found")),
        }
    }
    async fn revoke(&self, jti: uuid::Uuid, expires: i64) -> Result<(), Error> {
        self.blacklist.write().await.insert(jti, expires);
        Ok(())
    }
    async fn revoked(&self, jti: uuid::Uuid) -> Result<bool, Error> {
        Ok(self.blacklist.read().await.contains_key(&jti))
    }
    async fn purge(&self) -> Result<usize, Error> {
        let now = vox_core::now();
        let mut blacklist = self.blacklist.write().await;
        let before = blacklist.len();
        blacklist.retain(|_, expires| *expires >= now);
        Ok(before - blacklist.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(email: &str) -> Account {
        Account::new(
            ID::default(),
            email.into(),
            "Grace".into(),
            "Hopper".into(),
            "+15550101".into(),
            "2 Side St".into(),
            Role::Authority,
        )
    }
    fn profile() -> Profile {
        Profile::Authority {
            position: "inspector".into(),
            government_id: "GOV-9".into(),
            department: "roads".into(),
            work_location: "east".into(),
        }
    }
    fn proof() -> Proof {
        Proof::new(DocumentType::NationalId, "https://cdn.example.org/n.png".into())
    }

    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let store = Memory::default();
        store.create(&basic("g@x.com"), "h").await.unwrap();
        let err = store.create(&basic("g@x.com"), "h").await;
        assert!(matches!(err, Err(Error::Validation(_))));
        assert!(store.exists("g@x.com").await.unwrap());
    }
    #[tokio::test]
    async fn activation_is_compare_and_set() {
        let store = Memory::default();
        let account = basic("g@x.com");
        store.create(&account, "h").await.unwrap();
        let done = account.complete(profile(), proof()).unwrap();
        assert!(store.activate(&done).await.unwrap());
        assert!(!store.activate(&done).await.unwrap());
        let loaded = store.load(done.id()).await.unwrap().unwrap();
        assert!(loaded.is_active());
    }
    #[tokio::test]
    async fn purge_drops_only_expired_entries() {
        let store = Memory::default();
        let stale = uuid::Uuid::now_v7();
        let fresh = uuid::Uuid::now_v7();
        store.revoke(stale, vox_core::now() - 10).await.unwrap();
        store.revoke(fresh, vox_core::now() + 3600).await.unwrap();
        assert_eq!(store.purge().await.unwrap(), 1);
        assert!(!store.revoked(stale).await.unwrap());
        assert!(store.revoked(fresh).await.unwrap());
    }
}
