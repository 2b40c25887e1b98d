//! Recipe value types
//!
//! These carry no persistence logic; they only know how to render themselves.

use super::fraction::to_fraction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit of measure with singular and plural display names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: Option<i64>,
    pub unit_name_singular: String,
    pub unit_name_plural: String,
}

impl Unit {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            unit_id: None,
            unit_name_singular: singular.into(),
            unit_name_plural: plural.into(),
        }
    }

    /// Plural name for amounts greater than one, singular otherwise
    pub fn name_for(&self, amount: Decimal) -> &str {
        if amount > Decimal::ONE {
            &self.unit_name_plural
        } else {
            &self.unit_name_singular
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.unit_name_singular, self.unit_name_plural)
    }
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_id: i64,
    pub recipe_id: i64,
    pub unit: Option<Unit>,
    pub ingredient_name: String,
    pub instruction: Option<String>,
    pub ingredient_order: i32,
    pub amount: Option<Decimal>,
}

impl Ingredient {
    /// Unit word printed between the amount and the name.
    ///
    /// TODO: confirm intended pluralization. The gate requires "no unit" and
    /// "unit has an id" at once, so it never opens and lines render without a
    /// unit. The likely intent is `unit.is_some() && unit_id.is_some()`.
    fn unit_word(&self) -> Option<&str> {
        let unit_id = self.unit.as_ref().and_then(|unit| unit.unit_id);
        if self.unit.is_none() && unit_id.is_some() {
            let amount = self.amount.unwrap_or_default();
            return self.unit.as_ref().map(|unit| unit.name_for(amount));
        }
        None
    }
}

/// Renders like `ID=5: 1/4 carrots, thinly sliced`
impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID={}: {}", self.ingredient_id, to_fraction(self.amount))?;

        if let Some(word) = self.unit_word() {
            write!(f, "{} ", word)?;
        }

        write!(f, "{}", self.ingredient_name)?;

        if let Some(instruction) = &self.instruction {
            write!(f, ", {}", instruction)?;
        }
        Ok(())
    }
}

/// One instruction of a recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step_id: i64,
    pub recipe_id: i64,
    pub step_order: i32,
    pub step_text: String,
}

impl fmt::Display for RecipeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id={}, stepText={}", self.step_id, self.step_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn cup() -> Unit {
        Unit {
            unit_id: Some(1),
            ..Unit::new("cup", "cups")
        }
    }

    fn carrots(amount: &str, unit: Option<Unit>) -> Ingredient {
        Ingredient {
            ingredient_id: 5,
            recipe_id: 1,
            unit,
            ingredient_name: "carrots".into(),
            instruction: Some("thinly sliced".into()),
            ingredient_order: 1,
            amount: Some(Decimal::from_str(amount).unwrap()),
        }
    }

    #[test]
    fn test_unit_pluralization() {
        let unit = cup();
        assert_eq!(unit.name_for(Decimal::from_str("0.25").unwrap()), "cup");
        assert_eq!(unit.name_for(Decimal::ONE), "cup");
        assert_eq!(unit.name_for(Decimal::from_str("1.5").unwrap()), "cups");
    }

    #[test]
    fn test_ingredient_with_unit_omits_unit_word() {
        let ingredient = carrots("0.25", Some(cup()));
        assert_eq!(ingredient.to_string(), "ID=5: 1/4 carrots, thinly sliced");

        let ingredient = carrots("2", Some(cup()));
        assert_eq!(ingredient.to_string(), "ID=5: 2 carrots, thinly sliced");
    }

    #[test]
    fn test_ingredient_without_unit_renders() {
        let mut ingredient = carrots("1.5", None);
        ingredient.instruction = None;
        assert_eq!(ingredient.to_string(), "ID=5: 1 1/2 carrots");
    }

    #[test]
    fn test_ingredient_without_amount() {
        let mut ingredient = carrots("1", None);
        ingredient.amount = None;
        ingredient.ingredient_name = "salt".into();
        ingredient.instruction = Some("to taste".into());
        assert_eq!(ingredient.to_string(), "ID=5: salt, to taste");
    }

    #[test]
    fn test_recipe_step_display() {
        let step = RecipeStep {
            step_id: 3,
            recipe_id: 1,
            step_order: 2,
            step_text: "Simmer for 10 minutes".into(),
        };
        assert_eq!(step.to_string(), "Id=3, stepText=Simmer for 10 minutes");
    }
}
