use super::*;
use std::collections::HashMap;
use tokio::sync::RwLock;
use vox_auth::Account;
use vox_core::Error;
use vox_core::ID;
use vox_core::Unique;

/// Feedback store. Storage primitives are required; the owner-scoped
/// operations are provided on top of them.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    async fn insert(&self, feedback: &Feedback) -> Result<(), Error>;
    async fn fetch(&self, id: ID<Feedback>) -> Result<Option<Feedback>, Error>;
    async fn list(&self, filter: &Filter) -> Result<Vec<Feedback>, Error>;
    /// Overwrites an existing record. Returns false if it no longer exists.
    async fn save(&self, feedback: &Feedback) -> Result<bool, Error>;
    /// Returns false if the record did not exist.
    async fn remove(&self, id: ID<Feedback>) -> Result<bool, Error>;

    async fn create(&self, author: ID<Account>, draft: Draft) -> Result<Feedback, Error> {
        let feedback = draft.build(author)?;
        self.insert(&feedback).await?;
        log::debug!("feedback {} submitted by {}", feedback.id(), author);
        Ok(feedback)
    }
    async fn get(&self, id: ID<Feedback>) -> Result<Feedback, Error> {
        self.fetch(id)
            .await?
            .ok_or_else(|| Error::not_found("feedback not found"))
    }
    /// The record, provided `requester` authored it.
    async fn owned(&self, id: ID<Feedback>, requester: ID<Account>) -> Result<Feedback, Error> {
        let feedback = self.get(id).await?;
        match feedback.owned_by(requester) {
            true => Ok(feedback),
            false => Err(Error::permission(
                "you do not have permission to modify this feedback",
            )),
        }
    }
    async fn update(
        &self,
        id: ID<Feedback>,
        requester: ID<Account>,
        patch: Patch,
    ) -> Result<Feedback, Error> {
        let feedback = patch.apply(self.owned(id, requester).await?)?;
        match self.save(&feedback).await? {
            true => Ok(feedback),
            false => Err(Error::not_found("feedback not found")),
        }
    }
    async fn delete(&self, id: ID<Feedback>, requester: ID<Account>) -> Result<(), Error> {
        self.owned(id, requester).await?;
        match self.remove(id).await? {
            true => Ok(()),
            false => Err(Error::not_found("feedback not found")),
        }
    }
}

/// In-process feedback store.
#[derive(Default)]
pub struct MemoryLedger {
    items: RwLock<HashMap<ID<Feedback>, Feedback>>,
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn insert(&self, feedback: &Feedback) -> Result<(), Error> {
        self.items
            .write()
            .await
            .insert(feedback.id(), feedback.clone());
        Ok(())
    }
    async fn fetch(&self, id: ID<Feedback>) -> Result<Option<Feedback>, Error> {
        Ok(self.items.read().await.get(&id).cloned())
    }
    async fn list(&self, filter: &Filter) -> Result<Vec<Feedback>, Error> {
        Ok(filter.apply(self.items.read().await.values()))
    }
    async fn save(&self, feedback: &Feedback) -> Result<bool, Error> {
        match self.items.write().await.get_mut(&feedback.id()) {
            Some(stored) => {
                *stored = feedback.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
    async fn remove(&self, id: ID<Feedback>) -> Result<bool, Error> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}
