//! Terminal rendering of a Converted Recipe Document.
//!
//! Rendering is deterministic given the document: sections appear in a
//! fixed order, and the optional ones (swap options, notes, brands, tips)
//! are omitted when empty.

use tamis_core::document::{ConvertedRecipeDocument, Feasibility, IngredientLine};

/// Badge color class for a feasibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Amber,
    Orange,
    Red,
    Gray,
}

impl BadgeColor {
    fn ansi(self) -> &'static str {
        match self {
            BadgeColor::Green => "\x1b[32m",
            BadgeColor::Amber => "\x1b[33m",
            BadgeColor::Orange => "\x1b[38;5;208m",
            BadgeColor::Red => "\x1b[31m",
            BadgeColor::Gray => "\x1b[90m",
        }
    }
}

/// Badge icon: a check for the ratings worth attempting, a warning otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    Check,
    Warning,
}

impl BadgeIcon {
    fn glyph(self) -> &'static str {
        match self {
            BadgeIcon::Check => "✓",
            BadgeIcon::Warning => "⚠",
        }
    }
}

const RESET: &str = "\x1b[0m";
const STRIKE: &str = "\x1b[9m";

pub fn badge_color(feasibility: Feasibility) -> BadgeColor {
    match feasibility {
        Feasibility::Easy => BadgeColor::Green,
        Feasibility::Moderate => BadgeColor::Amber,
        Feasibility::Difficult => BadgeColor::Orange,
        Feasibility::NotRecommended => BadgeColor::Red,
        Feasibility::Unknown => BadgeColor::Gray,
    }
}

pub fn badge_icon(feasibility: Feasibility) -> BadgeIcon {
    match feasibility {
        Feasibility::Easy | Feasibility::Moderate => BadgeIcon::Check,
        _ => BadgeIcon::Warning,
    }
}

pub fn render_ingredient(line: &IngredientLine) -> String {
    if line.has_swap {
        let substitution = line.substitution.as_deref().unwrap_or("");
        let footnote = line.footnote.as_deref().unwrap_or("");
        format!(
            "{STRIKE}{}{RESET} -> {}{}",
            line.original, substitution, footnote
        )
    } else {
        format!("{} (no swap needed)", line.original)
    }
}

fn render_badge(document: &ConvertedRecipeDocument) -> String {
    let color = badge_color(document.feasibility);
    let icon = badge_icon(document.feasibility);
    format!(
        "{}{} {}{}  {}",
        color.ansi(),
        icon.glyph(),
        document.feasibility.as_str().to_uppercase(),
        RESET,
        document.feasibility_note
    )
}

pub fn render_document(document: &ConvertedRecipeDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", document.recipe_title));
    out.push_str(&format!("{}\n\n", document.recipe_type));
    out.push_str(&format!("{}\n", render_badge(document)));

    out.push_str("\nIngredients\n");
    for line in &document.ingredients {
        out.push_str(&format!("  {}\n", render_ingredient(line)));
    }

    if !document.swap_options.is_empty() {
        out.push_str("\nIngredient Options & Texture Guide\n");
        for group in &document.swap_options {
            out.push_str(&format!("  {}\n", group.ingredient));
            for option in &group.options {
                out.push_str(&format!("    {}: {}\n", option.name, option.substitution));
                out.push_str(&format!("      Texture: {}\n", option.texture));
                out.push_str(&format!("      Best for: {}\n", option.best_for));
                if let Some(notes) = &option.notes {
                    out.push_str(&format!("      {}\n", notes));
                }
            }
        }
    }

    out.push_str("\nInstructions\n");
    for (index, step) in document.instructions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, step));
    }

    if !document.notes.is_empty() {
        out.push_str("\nNotes\n");
        for (marker, note) in &document.notes {
            out.push_str(&format!("  {}: {}\n", marker, note));
        }
    }

    if !document.brand_recommendations.is_empty() {
        out.push_str("\nGluten-Free Brand Recommendations\n");
        for recommendation in &document.brand_recommendations {
            out.push_str(&format!("  {}:\n", recommendation.category));
            for brand in &recommendation.brands {
                out.push_str(&format!("    - {}\n", brand));
            }
        }
    }

    if let Some(tips) = &document.additional_tips {
        out.push_str(&format!("\nAdditional Tips\n  {}\n", tips));
    }

    out
}
