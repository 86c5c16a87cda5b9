//! Client-side core of the cocktail catalog: ingredient text codec, the
//! catalog store and its view controller, and the order approval board.

pub mod catalog;
pub mod codec;
pub mod controller;
pub mod eligibility;
pub mod error;
pub mod orders;
pub mod transport;
pub mod types;

pub use catalog::{CatalogEvent, CatalogStore};
pub use controller::CatalogController;
pub use error::{CatalogError, Mutation, OrderError};
pub use orders::{OrderBoard, StatusCounts, Transition};
pub use transport::{CatalogTransport, HttpTransport, MissingOrderFeed, OrderFeed};
pub use types::{CocktailFormDraft, DrinkFilter, StatusFilter};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
