use std::{fmt, str::FromStr};

use shared::{
    domain::OrderStatus,
    protocol::{Cocktail, CocktailPayload, Order},
};
use thiserror::Error;

use crate::{codec, error::CatalogError};

/// Text-only projection of a cocktail while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CocktailFormDraft {
    pub name: String,
    pub ingredients_text: String,
    pub instructions: String,
    pub image: String,
    pub price: String,
}

impl CocktailFormDraft {
    pub fn from_cocktail(cocktail: &Cocktail) -> Self {
        Self {
            name: cocktail.name.clone(),
            ingredients_text: codec::encode(&cocktail.ingredients),
            instructions: cocktail.instructions.clone(),
            image: cocktail.image.clone().unwrap_or_default(),
            price: cocktail.price.map(|price| price.to_string()).unwrap_or_default(),
        }
    }

    /// Builds the request body. Fields the form does not edit are left unset.
    pub fn to_payload(&self) -> Result<CocktailPayload, CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidDraft("name is required".into()));
        }

        let price = match self.price.trim() {
            "" => None,
            raw => {
                let price: f64 = raw.parse().map_err(|_| {
                    CatalogError::InvalidDraft(format!("price '{raw}' is not a number"))
                })?;
                if !price.is_finite() || price < 0.0 {
                    return Err(CatalogError::InvalidDraft(format!(
                        "price '{raw}' must be a non-negative amount"
                    )));
                }
                Some(price)
            }
        };

        let image = match self.image.trim() {
            "" => None,
            url => Some(url.to_string()),
        };

        Ok(CocktailPayload {
            name: self.name.clone(),
            ingredients: codec::decode(&self.ingredients_text),
            instructions: self.instructions.clone(),
            image,
            category: None,
            glass: None,
            alcoholic: None,
            price,
        })
    }
}

#[derive(Debug, Error)]
#[error("unknown filter '{0}'")]
pub struct ParseFilterError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrinkFilter {
    #[default]
    All,
    Alcoholic,
    NonAlcoholic,
}

impl DrinkFilter {
    /// Cocktails with an unknown `alcoholic` flag only show up under `All`.
    pub fn matches(self, cocktail: &Cocktail) -> bool {
        match self {
            DrinkFilter::All => true,
            DrinkFilter::Alcoholic => cocktail.alcoholic == Some(true),
            DrinkFilter::NonAlcoholic => cocktail.alcoholic == Some(false),
        }
    }
}

impl FromStr for DrinkFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DrinkFilter::All),
            "alcoholic" => Ok(DrinkFilter::Alcoholic),
            "non-alcoholic" => Ok(DrinkFilter::NonAlcoholic),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

impl fmt::Display for DrinkFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrinkFilter::All => "all",
            DrinkFilter::Alcoholic => "alcoholic",
            DrinkFilter::NonAlcoholic => "non-alcoholic",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Only(OrderStatus::Pending)),
            "approved" => Ok(StatusFilter::Only(OrderStatus::Approved)),
            "rejected" => Ok(StatusFilter::Only(OrderStatus::Rejected)),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}
