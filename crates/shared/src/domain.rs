use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier. Backends hand out either numbers or strings;
/// both are held as text.
macro_rules! text_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(Self(RawId::deserialize(deserializer)?.into_text()))
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(text) => text,
        }
    }
}

text_id!(CocktailId);
text_id!(OrderId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a cocktail's ingredient list.
///
/// On the wire an ingredient is either a bare string or an object with a
/// `name` and an optional `amount`. Names and amounts are trimmed. A record
/// without a usable amount is folded into [`Ingredient::Plain`], so
/// `Measured` always carries a non-blank amount. Entries with a blank name
/// are not ingredients at all: [`Ingredient::new`] refuses them and
/// [`deserialize_ingredient_list`] skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingredient {
    Plain(String),
    Measured { name: String, amount: String },
}

impl Ingredient {
    /// Checked constructor; `None` when the name is blank.
    pub fn new(name: &str, amount: Option<&str>) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(match amount {
            Some(amount) => Ingredient::measured(name, amount),
            None => Ingredient::plain(name),
        })
    }

    /// `name` must not be blank; use [`Ingredient::new`] for untrusted input.
    pub fn plain(name: impl Into<String>) -> Self {
        Ingredient::Plain(trimmed(name.into()))
    }

    pub fn measured(name: impl Into<String>, amount: impl Into<String>) -> Self {
        let amount = trimmed(amount.into());
        if amount.is_empty() {
            return Ingredient::plain(name);
        }
        Ingredient::Measured {
            name: trimmed(name.into()),
            amount,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Ingredient::Plain(name) => name,
            Ingredient::Measured { name, .. } => name,
        }
    }

    pub fn amount(&self) -> Option<&str> {
        match self {
            Ingredient::Plain(_) => None,
            Ingredient::Measured { amount, .. } => Some(amount),
        }
    }
}

fn trimmed(text: String) -> String {
    text.trim().to_string()
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ingredient::Plain(name) => f.write_str(name),
            Ingredient::Measured { name, amount } => write!(f, "{name}: {amount}"),
        }
    }
}

#[derive(Serialize)]
struct MeasuredRecord<'a> {
    name: &'a str,
    amount: &'a str,
}

impl Serialize for Ingredient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ingredient::Plain(name) => serializer.serialize_str(name),
            Ingredient::Measured { name, amount } => {
                MeasuredRecord { name, amount }.serialize(serializer)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Text(String),
    Record {
        name: String,
        #[serde(default)]
        amount: Option<String>,
    },
}

impl RawIngredient {
    fn into_ingredient(self) -> Option<Ingredient> {
        match self {
            RawIngredient::Text(name) => Ingredient::new(&name, None),
            RawIngredient::Record { name, amount } => Ingredient::new(&name, amount.as_deref()),
        }
    }
}

impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawIngredient::deserialize(deserializer)?
            .into_ingredient()
            .ok_or_else(|| D::Error::custom("ingredient name is blank"))
    }
}

/// Reads an ingredient list, dropping entries whose name is blank.
pub fn deserialize_ingredient_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Ingredient>, D::Error> {
    Ok(Vec::<RawIngredient>::deserialize(deserializer)?
        .into_iter()
        .filter_map(RawIngredient::into_ingredient)
        .collect())
}
