//! View state over the catalog: drink filter, detail selection and the
//! create/edit form.

use std::sync::Arc;

use shared::{domain::CocktailId, protocol::Cocktail};
use tracing::debug;

use crate::{
    catalog::CatalogStore,
    error::CatalogError,
    types::{CocktailFormDraft, DrinkFilter},
};

pub fn filter_cocktails(filter: DrinkFilter, cocktails: &[Cocktail]) -> Vec<Cocktail> {
    cocktails
        .iter()
        .filter(|cocktail| filter.matches(cocktail))
        .cloned()
        .collect()
}

pub struct CatalogController {
    store: Arc<CatalogStore>,
    filter: DrinkFilter,
    selected: Option<Cocktail>,
    editing: Option<Cocktail>,
    draft: CocktailFormDraft,
    form_visible: bool,
}

impl CatalogController {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            filter: DrinkFilter::All,
            selected: None,
            editing: None,
            draft: CocktailFormDraft::default(),
            form_visible: false,
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn filter(&self) -> DrinkFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: DrinkFilter) {
        self.filter = filter;
    }

    pub async fn visible_cocktails(&self) -> Vec<Cocktail> {
        filter_cocktails(self.filter, &self.store.cocktails().await)
    }

    /// True once nothing is loading and the catalog came back empty.
    pub async fn is_empty_catalog(&self) -> bool {
        !self.store.is_loading().await && self.store.cocktails().await.is_empty()
    }

    pub fn selected(&self) -> Option<&Cocktail> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, cocktail: Cocktail) {
        self.selected = Some(cocktail);
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn editing(&self) -> Option<&Cocktail> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &CocktailFormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CocktailFormDraft {
        &mut self.draft
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn toggle_form(&mut self) {
        self.form_visible = !self.form_visible;
        if self.editing.is_some() {
            self.reset_form();
        }
    }

    pub fn begin_edit(&mut self, cocktail: Cocktail) {
        self.draft = CatalogStore::to_editable_draft(&cocktail);
        self.editing = Some(cocktail);
        self.form_visible = true;
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
        self.form_visible = false;
    }

    /// Creates or updates depending on whether a cocktail is being edited.
    /// The form stays open with its draft when the request fails.
    pub async fn submit(&mut self) -> Result<(), CatalogError> {
        if self.store.is_loading().await {
            return Err(CatalogError::Busy);
        }

        match &self.editing {
            Some(cocktail) => {
                debug!(id = %cocktail.id, "submitting cocktail edit");
                self.store.update(&cocktail.id, &self.draft).await?;
            }
            None => {
                debug!(name = %self.draft.name, "submitting new cocktail");
                self.store.create(&self.draft).await?;
            }
        }

        self.reset_form();
        self.form_visible = false;
        Ok(())
    }

    pub async fn delete(&mut self, id: &CocktailId) -> Result<(), CatalogError> {
        if self.store.is_loading().await {
            return Err(CatalogError::Busy);
        }
        if self.selected.as_ref().is_some_and(|cocktail| &cocktail.id == id) {
            self.selected = None;
        }
        self.store.remove(id).await
    }

    fn reset_form(&mut self) {
        self.draft = CocktailFormDraft::default();
        self.editing = None;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
