//! Text form of an ingredient list, as typed into the cocktail form.
//!
//! The comma separates ingredients and also separates a name from its
//! amount, e.g. `"Tequila, 2 oz, Lime juice, 1 oz, Salt"`. A token counts
//! as an amount when it starts like a measurement (a digit or a vulgar
//! fraction); anything else starts a new ingredient. Inputs such as
//! `"Bitters, dash"` are therefore read as two plain ingredients.

use shared::domain::Ingredient;

const SEPARATOR: &str = ", ";

pub fn encode(ingredients: &[Ingredient]) -> String {
    ingredients
        .iter()
        .map(|ingredient| match ingredient {
            Ingredient::Plain(name) => name.clone(),
            Ingredient::Measured { name, amount } => format!("{name}{SEPARATOR}{amount}"),
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Parses ingredient text. Never fails; empty tokens are skipped.
pub fn decode(text: &str) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();
    let mut name: Option<&str> = None;
    let mut amounts: Vec<&str> = Vec::new();

    for token in text.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if name.is_some() && looks_like_amount(token) {
            amounts.push(token);
            continue;
        }
        if let Some(previous) = name.replace(token) {
            ingredients.push(finish(previous, &mut amounts));
        }
    }
    if let Some(last) = name {
        ingredients.push(finish(last, &mut amounts));
    }

    ingredients
}

fn finish(name: &str, amounts: &mut Vec<&str>) -> Ingredient {
    let ingredient = if amounts.is_empty() {
        Ingredient::plain(name)
    } else {
        Ingredient::measured(name, amounts.join(SEPARATOR))
    };
    amounts.clear();
    ingredient
}

fn looks_like_amount(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_digit() || is_vulgar_fraction(first))
}

fn is_vulgar_fraction(c: char) -> bool {
    matches!(c, '\u{00BC}'..='\u{00BE}' | '\u{2150}'..='\u{215E}')
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
