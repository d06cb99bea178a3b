//! The Converted Recipe Document: the structured result of a conversion.
//!
//! This is the only structured entity in the system. It is built once per
//! conversion from the model's reply, returned over the wire in camelCase,
//! and rendered by the client. Decoding fails closed: a reply missing a
//! required field never produces a partially-shaped document.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How well a recipe survives a gluten-free adaptation.
///
/// The model is instructed to emit one of the four known levels, but replies
/// are not trusted: anything else decodes to `Unknown` so the renderer can
/// show it neutrally instead of failing the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Easy,
    Moderate,
    Difficult,
    NotRecommended,
    Unknown,
}

impl Feasibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::Easy => "easy",
            Feasibility::Moderate => "moderate",
            Feasibility::Difficult => "difficult",
            Feasibility::NotRecommended => "not-recommended",
            Feasibility::Unknown => "unknown",
        }
    }
}

impl Serialize for Feasibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Feasibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "easy" => Feasibility::Easy,
            "moderate" => Feasibility::Moderate,
            "difficult" => Feasibility::Difficult,
            "not-recommended" => Feasibility::NotRecommended,
            _ => Feasibility::Unknown,
        })
    }
}

/// One line of the ingredient list, in original recipe order.
///
/// When `has_swap` is false, `substitution` and `footnote` are unused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    pub original: String,
    #[serde(default)]
    pub substitution: Option<String>,
    pub has_swap: bool,
    #[serde(default)]
    pub footnote: Option<String>,
}

/// One substitution strategy for a single original ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SwapOption {
    pub name: String,
    pub substitution: String,
    pub texture: String,
    pub best_for: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Alternative substitution strategies offered for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SwapGroup {
    pub ingredient: String,
    pub options: Vec<SwapOption>,
}

/// Brand suggestions for one category of swapped ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BrandRecommendation {
    pub category: String,
    pub brands: Vec<String>,
}

/// The full converted recipe.
///
/// `notes` maps footnote markers (e.g. `*`) to explanations; insertion order
/// is the model's order and is preserved for rendering, hence the `IndexMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConvertedRecipeDocument {
    pub recipe_title: String,
    pub recipe_type: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "moderate"))]
    pub feasibility: Feasibility,
    pub feasibility_note: String,
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub swap_options: Vec<SwapGroup>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: IndexMap<String, String>,
    #[serde(default)]
    pub brand_recommendations: Vec<BrandRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_tips: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ConvertedRecipeDocument {
        ConvertedRecipeDocument {
            recipe_title: "Steamed Bao Buns".to_string(),
            recipe_type: "bao buns".to_string(),
            feasibility: Feasibility::Difficult,
            feasibility_note: "Steamed buns depend on gluten for their fluff.".to_string(),
            ingredients: vec![
                IngredientLine {
                    original: "2 cups all-purpose flour".to_string(),
                    substitution: Some("1½ cups GF blend + ½ cup tapioca starch".to_string()),
                    has_swap: true,
                    footnote: Some("*".to_string()),
                },
                IngredientLine {
                    original: "1 tsp salt".to_string(),
                    substitution: None,
                    has_swap: false,
                    footnote: None,
                },
            ],
            swap_options: vec![SwapGroup {
                ingredient: "Flour".to_string(),
                options: vec![SwapOption {
                    name: "GF blend + tapioca".to_string(),
                    substitution: "1½ cups GF blend + ½ cup tapioca starch".to_string(),
                    texture: "Soft and pliable".to_string(),
                    best_for: "Closest to the original".to_string(),
                    notes: None,
                }],
            }],
            instructions: vec![
                "Mix the dry ingredients*".to_string(),
                "Knead gently and steam".to_string(),
            ],
            notes: [(
                "*".to_string(),
                "GF flour needs xanthan gum for binding".to_string(),
            )]
            .into_iter()
            .collect(),
            brand_recommendations: vec![BrandRecommendation {
                category: "GF All-Purpose Flour Blends".to_string(),
                brands: vec!["Bob's Red Mill 1-to-1".to_string()],
            }],
            additional_tips: Some("Let the dough rest longer than usual.".to_string()),
        }
    }

    #[test]
    fn test_round_trip() {
        let document = sample_document();
        let json = serde_json::to_string(&document).unwrap();
        let parsed: ConvertedRecipeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document, parsed);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample_document()).unwrap();
        assert!(json.get("recipeTitle").is_some());
        assert!(json.get("feasibilityNote").is_some());
        assert!(json.get("swapOptions").is_some());
        assert!(json.get("brandRecommendations").is_some());
        assert!(json["ingredients"][0].get("hasSwap").is_some());
        assert!(json["swapOptions"][0]["options"][0].get("bestFor").is_some());
    }

    #[test]
    fn test_unknown_feasibility_decodes_to_unknown() {
        let parsed: Feasibility = serde_json::from_str("\"trivial\"").unwrap();
        assert_eq!(parsed, Feasibility::Unknown);
    }

    #[test]
    fn test_known_feasibility_round_trips() {
        for level in [
            Feasibility::Easy,
            Feasibility::Moderate,
            Feasibility::Difficult,
            Feasibility::NotRecommended,
        ] {
            let json = serde_json::to_string(&level).unwrap();
            let parsed: Feasibility = serde_json::from_str(&json).unwrap();
            assert_eq!(level, parsed);
        }
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let json = r#"{
            "recipeTitle": "Rice Bowl",
            "recipeType": "bowl",
            "feasibility": "easy",
            "feasibilityNote": "Naturally gluten-free.",
            "ingredients": [{"original": "1 cup rice", "substitution": null, "hasSwap": false, "footnote": null}],
            "instructions": ["Cook the rice"]
        }"#;
        let document: ConvertedRecipeDocument = serde_json::from_str(json).unwrap();
        assert!(document.swap_options.is_empty());
        assert!(document.notes.is_empty());
        assert!(document.brand_recommendations.is_empty());
        assert!(document.additional_tips.is_none());
    }

    #[test]
    fn test_missing_required_field_fails_closed() {
        // No recipeTitle: the decode must fail rather than fill in a blank.
        let json = r#"{
            "recipeType": "bowl",
            "feasibility": "easy",
            "feasibilityNote": "n/a",
            "ingredients": [],
            "instructions": []
        }"#;
        assert!(serde_json::from_str::<ConvertedRecipeDocument>(json).is_err());
    }

    #[test]
    fn test_notes_preserve_insertion_order() {
        let json = r#"{
            "recipeTitle": "Buns",
            "recipeType": "bao buns",
            "feasibility": "difficult",
            "feasibilityNote": "n/a",
            "ingredients": [],
            "instructions": [],
            "notes": {"**": "second marker first", "*": "first marker second"}
        }"#;
        let document: ConvertedRecipeDocument = serde_json::from_str(json).unwrap();
        let markers: Vec<&str> = document.notes.keys().map(String::as_str).collect();
        assert_eq!(markers, vec!["**", "*"]);
    }
}
