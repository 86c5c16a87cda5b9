//! Test doubles shared by the store and controller tests.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{CocktailId, Ingredient},
    protocol::{Cocktail, CocktailPayload},
};
use tokio::sync::{oneshot, Mutex};

use crate::transport::CatalogTransport;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List,
    Get(CocktailId),
    Create(CocktailPayload),
    Update(Cocktail),
    Delete(CocktailId),
}

/// In-memory backend that records every request it receives.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    pub(crate) cocktails: Mutex<Vec<Cocktail>>,
    pub(crate) calls: Mutex<Vec<Call>>,
    pub(crate) fail_list: Mutex<bool>,
    pub(crate) fail_mutations: Mutex<bool>,
    /// Creates are acknowledged but only show up in later lists when set.
    pub(crate) persist_creates: Mutex<bool>,
    list_replies: Mutex<VecDeque<oneshot::Receiver<Vec<Cocktail>>>>,
}

impl RecordingTransport {
    pub(crate) fn with_cocktails(cocktails: Vec<Cocktail>) -> Self {
        Self {
            cocktails: Mutex::new(cocktails),
            persist_creates: Mutex::new(true),
            ..Self::default()
        }
    }

    pub(crate) async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// The next list request waits for the returned sender instead of
    /// answering from `cocktails`.
    pub(crate) async fn hold_next_list(&self) -> oneshot::Sender<Vec<Cocktail>> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.lock().await.push_back(rx);
        tx
    }

    async fn check_mutation(&self) -> Result<()> {
        if *self.fail_mutations.lock().await {
            return Err(anyhow!("HTTP status server error (500 Internal Server Error)"));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogTransport for RecordingTransport {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>> {
        self.calls.lock().await.push(Call::List);
        if *self.fail_list.lock().await {
            return Err(anyhow!("connection refused"));
        }
        let held = self.list_replies.lock().await.pop_front();
        match held {
            Some(reply) => reply.await.map_err(|_| anyhow!("reply dropped")),
            None => Ok(self.cocktails.lock().await.clone()),
        }
    }

    async fn get_cocktail(&self, id: &CocktailId) -> Result<Cocktail> {
        self.calls.lock().await.push(Call::Get(id.clone()));
        self.cocktails
            .lock()
            .await
            .iter()
            .find(|cocktail| &cocktail.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("HTTP status client error (404 Not Found)"))
    }

    async fn create_cocktail(&self, payload: &CocktailPayload) -> Result<Cocktail> {
        self.calls.lock().await.push(Call::Create(payload.clone()));
        self.check_mutation().await?;
        let mut cocktails = self.cocktails.lock().await;
        let created = payload
            .clone()
            .with_id(CocktailId::new(format!("c{}", cocktails.len() + 1)));
        if *self.persist_creates.lock().await {
            cocktails.push(created.clone());
        }
        Ok(created)
    }

    async fn update_cocktail(&self, cocktail: &Cocktail) -> Result<Cocktail> {
        self.calls.lock().await.push(Call::Update(cocktail.clone()));
        self.check_mutation().await?;
        let mut cocktails = self.cocktails.lock().await;
        if let Some(slot) = cocktails.iter_mut().find(|existing| existing.id == cocktail.id) {
            *slot = cocktail.clone();
        }
        Ok(cocktail.clone())
    }

    async fn delete_cocktail(&self, id: &CocktailId) -> Result<()> {
        self.calls.lock().await.push(Call::Delete(id.clone()));
        self.check_mutation().await?;
        self.cocktails.lock().await.retain(|cocktail| &cocktail.id != id);
        Ok(())
    }
}

pub(crate) fn cocktail(id: &str, name: &str, alcoholic: Option<bool>) -> Cocktail {
    Cocktail {
        id: CocktailId::new(id),
        name: name.into(),
        ingredients: vec![Ingredient::plain("Ice")],
        instructions: "Stir.".into(),
        image: None,
        category: Some("Cocktail".into()),
        glass: Some("Highball glass".into()),
        alcoholic,
        price: None,
    }
}
