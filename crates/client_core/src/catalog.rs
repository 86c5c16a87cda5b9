//! In-memory cocktail catalog kept in step with the remote collection.
//!
//! The store never patches its list locally after a mutation: every
//! successful create, update or delete is followed by a full refresh, so
//! server-side defaults such as the assigned id always come from the
//! backend. The state lock is never held across a request, which means
//! overlapping refreshes settle in whatever order they resolve.

use std::sync::Arc;

use shared::{
    domain::CocktailId,
    error::ApiError,
    protocol::{Cocktail, CocktailPayload},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::{
    error::{CatalogError, Mutation},
    transport::CatalogTransport,
    types::CocktailFormDraft,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    LoadingChanged(bool),
    CocktailsReplaced { count: usize },
    Error(ApiError),
}

#[derive(Default)]
struct CatalogState {
    cocktails: Vec<Cocktail>,
    in_flight: usize,
    last_error: Option<ApiError>,
}

pub struct CatalogStore {
    transport: Arc<dyn CatalogTransport>,
    inner: Mutex<CatalogState>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogStore {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            transport,
            inner: Mutex::new(CatalogState::default()),
            events,
        }
    }

    pub async fn cocktails(&self) -> Vec<Cocktail> {
        self.inner.lock().await.cocktails.clone()
    }

    pub async fn find(&self, id: &CocktailId) -> Option<Cocktail> {
        self.inner
            .lock()
            .await
            .cocktails
            .iter()
            .find(|cocktail| &cocktail.id == id)
            .cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.in_flight > 0
    }

    pub async fn last_error(&self) -> Option<ApiError> {
        self.inner.lock().await.last_error.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn to_editable_draft(cocktail: &Cocktail) -> CocktailFormDraft {
        CocktailFormDraft::from_cocktail(cocktail)
    }

    /// Replaces the whole list with the remote collection.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        self.begin().await;
        let result = self.transport.list_cocktails().await;

        let outcome = {
            let mut inner = self.inner.lock().await;
            match result {
                Ok(cocktails) => {
                    let count = cocktails.len();
                    inner.cocktails = cocktails;
                    inner.last_error = None;
                    info!(count, "cocktail catalog refreshed");
                    let _ = self.events.send(CatalogEvent::CocktailsReplaced { count });
                    Ok(())
                }
                Err(err) => {
                    Err(Self::record(&mut inner, &self.events, CatalogError::fetch(err)))
                }
            }
        };

        self.end().await;
        outcome
    }

    /// Fetches one record without touching the held list.
    pub async fn fetch_one(&self, id: &CocktailId) -> Result<Cocktail, CatalogError> {
        self.transport
            .get_cocktail(id)
            .await
            .map_err(CatalogError::fetch)
    }

    pub async fn create(&self, draft: &CocktailFormDraft) -> Result<(), CatalogError> {
        let payload = self.checked_payload(draft).await?;
        self.mutate(Mutation::Create, async {
            let created = self.transport.create_cocktail(&payload).await?;
            info!(id = %created.id, "cocktail created");
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    /// Full replace keyed by `id`. Fields the form cannot edit are carried
    /// over from the held record, when there is one.
    pub async fn update(
        &self,
        id: &CocktailId,
        draft: &CocktailFormDraft,
    ) -> Result<(), CatalogError> {
        let payload = self.checked_payload(draft).await?;
        let cocktail = match self.find(id).await {
            Some(existing) => CocktailPayload {
                category: existing.category,
                glass: existing.glass,
                alcoholic: existing.alcoholic,
                ..payload
            },
            None => payload,
        }
        .with_id(id.clone());

        self.mutate(Mutation::Update, async {
            self.transport.update_cocktail(&cocktail).await?;
            info!(%id, "cocktail updated");
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    pub async fn remove(&self, id: &CocktailId) -> Result<(), CatalogError> {
        self.mutate(Mutation::Delete, async {
            self.transport.delete_cocktail(id).await?;
            info!(%id, "cocktail deleted");
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn checked_payload(
        &self,
        draft: &CocktailFormDraft,
    ) -> Result<CocktailPayload, CatalogError> {
        match draft.to_payload() {
            Ok(payload) => Ok(payload),
            Err(err) => {
                let mut inner = self.inner.lock().await;
                Err(Self::record(&mut inner, &self.events, err))
            }
        }
    }

    async fn mutate<F>(&self, action: Mutation, request: F) -> Result<(), CatalogError>
    where
        F: std::future::Future<Output = anyhow::Result<()>>,
    {
        self.begin().await;
        let outcome = match request.await {
            Ok(()) => {
                // The mutation went through; a failed refresh is surfaced
                // through `last_error` only.
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                let mut inner = self.inner.lock().await;
                Err(Self::record(&mut inner, &self.events, CatalogError::mutation(action, err)))
            }
        };
        self.end().await;
        outcome
    }

    async fn begin(&self) {
        let mut inner = self.inner.lock().await;
        inner.last_error = None;
        inner.in_flight += 1;
        if inner.in_flight == 1 {
            let _ = self.events.send(CatalogEvent::LoadingChanged(true));
        }
    }

    async fn end(&self) {
        let mut inner = self.inner.lock().await;
        inner.in_flight = inner.in_flight.saturating_sub(1);
        if inner.in_flight == 0 {
            let _ = self.events.send(CatalogEvent::LoadingChanged(false));
        }
    }

    fn record(
        state: &mut CatalogState,
        events: &broadcast::Sender<CatalogEvent>,
        err: CatalogError,
    ) -> CatalogError {
        warn!(error = %err, "catalog request failed");
        let surfaced = ApiError::from(&err);
        state.last_error = Some(surfaced.clone());
        let _ = events.send(CatalogEvent::Error(surfaced));
        err
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
