//! The conversion prompt: domain rules plus the target document shape.
//!
//! The rule set is part of the external contract — it is what makes the
//! model's answers texture-aware and honest about feasibility — so its
//! semantics are load-bearing even though the exact wording is not.

pub const CONVERT_PROMPT_NAME: &str = "convert";

const RULES: &str = r#"CRITICAL RULES - TEXTURE AND CONTEXT MATTER:

1. MAINTAIN THE FUNDAMENTAL DISH TYPE:
   - Bao buns/steamed buns = fluffy, bread-like texture -> Use GF flour blends ONLY. NEVER suggest rice paper (that's for dumplings/spring rolls)
   - Dumplings/potstickers/gyoza = thin, delicate wrappers -> Rice paper IS acceptable here
   - Bread/pizza dough = chewy, structured -> Need proper GF flour blends with binders
   - Noodles = specific bite/chew -> Suggest GF noodle brands OR rice noodles (but acknowledge texture difference)
   - Pastries/croissants = flaky layers -> Be honest if GF won't achieve same result
   - Cookies/cakes = specific crumb -> Match texture type (crispy, chewy, tender, etc.)

2. BE BRUTALLY HONEST ABOUT FEASIBILITY:
   - If a recipe fundamentally relies on gluten (hand-pulled noodles, croissants, traditional baguettes), rate it "difficult" or "not-recommended"
   - Don't offer fake alternatives that completely change the dish
   - When homemade is too hard, suggest store-bought GF versions: "This is extremely difficult to replicate GF at home. Consider purchasing frozen GF [item] and focus on making the accompaniments."

3. ASIAN CUISINE INTELLIGENCE:
   - Bao buns vs dumplings are DIFFERENT things with different textures
   - Rice paper = dumpling wrappers, NOT bao buns
   - For noodle dishes: acknowledge GF noodles have different texture, suggest brands
   - Soy sauce -> tamari or GF soy sauce (many contain wheat)
   - Hoisin, oyster sauce -> many contain wheat, specify GF brands
   - Tempura batter -> needs specific GF technique for crispiness

4. FLOUR SWAP REQUIREMENTS:
   - Provide 2-3 realistic options that create SIMILAR textures to the original
   - Each option must specify: exact substitution, expected texture, best use case, brand recommendations
   - Don't suggest shortcuts that fundamentally alter the dish type
   - For baked goods: always include xanthan gum or similar binder unless recipe already has eggs/other binders
   - For steamed buns: need tapioca starch + xanthan gum for structure

5. ONLY SHOW SWAPS WHEN NEEDED:
   - Ingredients that don't change: use "hasSwap": false and substitution: null
   - Don't restate ingredients in bold just to restate them
   - Focus on what actually changes

6. USE FOOTNOTE MARKERS STRATEGICALLY:
   - Mark ingredients/steps where GF technique differs from original
   - Explain in notes section WHY the change matters
   - Keep notes concise but informative

7. BRAND RECOMMENDATIONS:
   - Only include brands relevant to THIS specific recipe's swaps
   - Group by category (GF flour, soy sauce, xanthan gum, etc.)
   - Prioritize widely available brands (Bob's Red Mill, King Arthur, etc.)

8. HASHIMOTO'S CONSIDERATIONS:
   - Flag soy products (some people avoid due to inflammation)
   - Suggest coconut aminos as soy-free alternative when relevant
   - Avoid suggesting inflammatory ingredients when possible

Return ONLY this exact JSON structure with NO markdown formatting:
{
  "recipeTitle": "Recipe name",
  "recipeType": "Type of dish (be specific: bao buns, dumplings, cookies, bread, etc.)",
  "feasibility": "easy|moderate|difficult|not-recommended",
  "feasibilityNote": "Brief honest explanation of GF conversion difficulty",
  "ingredients": [
    {
      "original": "2 cups flour",
      "substitution": "1.5 cups GF blend + 0.5 cup almond flour + 1 tsp xanthan gum",
      "hasSwap": true,
      "footnote": "*"
    },
    {
      "original": "2 tsp salt",
      "substitution": null,
      "hasSwap": false,
      "footnote": null
    }
  ],
  "swapOptions": [
    {
      "ingredient": "Flour",
      "options": [
        {
          "name": "GF All-Purpose Blend + Tapioca",
          "substitution": "1.5 cups GF blend + 0.5 cup tapioca starch + 1 tsp xanthan gum",
          "texture": "Soft and pliable, closest to traditional texture",
          "bestFor": "Best results, most authentic texture",
          "notes": "Use Bob's Red Mill 1-to-1 or King Arthur Measure for Measure"
        }
      ]
    }
  ],
  "instructions": [
    "Mix GF flour blend*, tapioca starch, and xanthan gum with other dry ingredients",
    "Add wet ingredients and knead gently until smooth**"
  ],
  "notes": {
    "*": "GF flour needs xanthan gum for binding and tapioca for elasticity since there's no gluten",
    "**": "GF dough is more delicate than wheat dough, knead gently for 3-4 minutes only"
  },
  "brandRecommendations": [
    {
      "category": "GF All-Purpose Flour Blends",
      "brands": ["Bob's Red Mill 1-to-1 Baking Flour", "King Arthur Measure for Measure Flour", "Cup4Cup Multipurpose Flour"]
    },
    {
      "category": "Xanthan Gum",
      "brands": ["Bob's Red Mill Xanthan Gum", "Anthony's Xanthan Gum"]
    }
  ],
  "additionalTips": "Important GF cooking tips specific to this recipe type"
}"#;

/// Render the conversion prompt with the recipe text embedded verbatim.
pub fn render_convert_prompt(recipe_text: &str) -> String {
    format!(
        "You are an expert in gluten-free cooking for celiac disease and Hashimoto's disease. \
         Convert this recipe to gluten-free with intelligent, context-aware substitutions.\n\n\
         RECIPE:\n{recipe_text}\n\n{rules}",
        recipe_text = recipe_text,
        rules = RULES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_recipe_verbatim() {
        let recipe = "2 cups flour, 1 tsp salt. Mix and bake.";
        let prompt = render_convert_prompt(recipe);
        assert!(prompt.contains("RECIPE:\n2 cups flour, 1 tsp salt. Mix and bake."));
    }

    #[test]
    fn test_prompt_carries_the_rule_set() {
        let prompt = render_convert_prompt("");
        assert!(prompt.contains("FEASIBILITY"));
        assert!(prompt.contains("ASIAN CUISINE"));
        assert!(prompt.contains("xanthan gum"));
        assert!(prompt.contains("coconut aminos"));
        assert!(prompt.contains("Group by category"));
    }

    #[test]
    fn test_prompt_pins_the_document_shape() {
        let prompt = render_convert_prompt("");
        assert!(prompt.contains("NO markdown formatting"));
        assert!(prompt.contains("\"hasSwap\""));
        assert!(prompt.contains("\"bestFor\""));
        assert!(prompt.contains("easy|moderate|difficult|not-recommended"));
    }
}
