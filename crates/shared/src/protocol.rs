use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::domain::{deserialize_ingredient_list, CocktailId, Ingredient, OrderId, OrderStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: CocktailId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_ingredient_list")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcoholic: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_price"
    )]
    pub price: Option<f64>,
}

impl Cocktail {
    /// Leading ingredients for a compact listing, plus how many were left out.
    pub fn ingredient_preview(&self, limit: usize) -> (&[Ingredient], usize) {
        let shown = self.ingredients.len().min(limit);
        (&self.ingredients[..shown], self.ingredients.len() - shown)
    }
}

/// Request body for creating a cocktail: everything but the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocktailPayload {
    pub name: String,
    #[serde(deserialize_with = "deserialize_ingredient_list")]
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcoholic: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_price"
    )]
    pub price: Option<f64>,
}

impl CocktailPayload {
    pub fn with_id(self, id: CocktailId) -> Cocktail {
        Cocktail {
            id,
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image: self.image,
            category: self.category,
            glass: self.glass,
            alcoholic: self.alcoholic,
            price: self.price,
        }
    }
}

// Form-backed records may have stored the price as text. Anything that is
// not a usable money amount reads as no price.
fn deserialize_price<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    let price = match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Number(price)) => Some(price),
        Some(RawPrice::Text(text)) => text.trim().parse().ok(),
        None => None,
    };
    Ok(price.filter(|price| is_money(*price)))
}

fn is_money(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

fn deserialize_money<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let amount = f64::deserialize(deserializer)?;
    if !is_money(amount) {
        return Err(D::Error::custom(format!(
            "expected a non-negative amount, got {amount}"
        )));
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: NonZeroU32,
    #[serde(deserialize_with = "deserialize_money")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "deserialize_money")]
    pub total_amount: f64,
    pub status: OrderStatus,
    pub delivery_location: String,
}

impl Order {
    pub fn computed_total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| f64::from(item.quantity.get()) * item.price)
            .sum()
    }
}
