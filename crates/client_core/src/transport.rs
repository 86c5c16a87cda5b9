//! Remote collaborators of the catalog store and the order board.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::CocktailId,
    protocol::{Cocktail, CocktailPayload, Order},
};
use tracing::debug;
use url::Url;

/// REST resource collection holding the cocktails.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>>;
    async fn get_cocktail(&self, id: &CocktailId) -> Result<Cocktail>;
    async fn create_cocktail(&self, payload: &CocktailPayload) -> Result<Cocktail>;
    /// Full replace of the record keyed by `cocktail.id`.
    async fn update_cocktail(&self, cocktail: &Cocktail) -> Result<Cocktail>;
    async fn delete_cocktail(&self, id: &CocktailId) -> Result<()>;
}

#[async_trait]
pub trait OrderFeed: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>>;
}

pub struct MissingOrderFeed;

#[async_trait]
impl OrderFeed for MissingOrderFeed {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        Err(anyhow!("order feed is unavailable"))
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    cocktails_url: Url,
    orders_url: Option<Url>,
}

impl HttpTransport {
    pub fn new(cocktails_url: &str) -> Result<Self> {
        let cocktails_url = Url::parse(cocktails_url)
            .with_context(|| format!("invalid cocktails url '{cocktails_url}'"))?;
        if cocktails_url.cannot_be_a_base() {
            return Err(anyhow!("cocktails url '{cocktails_url}' cannot hold item paths"));
        }
        Ok(Self {
            http: Client::new(),
            cocktails_url,
            orders_url: None,
        })
    }

    pub fn with_orders_url(mut self, orders_url: &str) -> Result<Self> {
        let orders_url =
            Url::parse(orders_url).with_context(|| format!("invalid orders url '{orders_url}'"))?;
        self.orders_url = Some(orders_url);
        Ok(self)
    }

    fn cocktail_url(&self, id: &CocktailId) -> Result<Url> {
        let mut url = self.cocktails_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("cocktails url cannot hold item paths"))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn list_cocktails(&self) -> Result<Vec<Cocktail>> {
        debug!(url = %self.cocktails_url, "listing cocktails");
        let res = self
            .http
            .get(self.cocktails_url.clone())
            .send()
            .await
            .context("failed to reach cocktail service")?
            .error_for_status()?;
        res.json().await.context("malformed cocktail list")
    }

    async fn get_cocktail(&self, id: &CocktailId) -> Result<Cocktail> {
        let url = self.cocktail_url(id)?;
        debug!(%url, "fetching cocktail");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .context("failed to reach cocktail service")?
            .error_for_status()?;
        res.json().await.context("malformed cocktail")
    }

    async fn create_cocktail(&self, payload: &CocktailPayload) -> Result<Cocktail> {
        debug!(name = %payload.name, "creating cocktail");
        let res = self
            .http
            .post(self.cocktails_url.clone())
            .json(payload)
            .send()
            .await
            .context("failed to reach cocktail service")?
            .error_for_status()?;
        res.json().await.context("malformed created cocktail")
    }

    async fn update_cocktail(&self, cocktail: &Cocktail) -> Result<Cocktail> {
        let url = self.cocktail_url(&cocktail.id)?;
        debug!(%url, "replacing cocktail");
        let res = self
            .http
            .put(url)
            .json(cocktail)
            .send()
            .await
            .context("failed to reach cocktail service")?
            .error_for_status()?;
        res.json().await.context("malformed updated cocktail")
    }

    async fn delete_cocktail(&self, id: &CocktailId) -> Result<()> {
        let url = self.cocktail_url(id)?;
        debug!(%url, "deleting cocktail");
        self.http
            .delete(url)
            .send()
            .await
            .context("failed to reach cocktail service")?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl OrderFeed for HttpTransport {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let url = self
            .orders_url
            .clone()
            .ok_or_else(|| anyhow!("no orders url configured"))?;
        debug!(%url, "listing orders");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .context("failed to reach order service")?
            .error_for_status()?;
        res.json().await.context("malformed order list")
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
