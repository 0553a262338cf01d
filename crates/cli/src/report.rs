use crate::command::{
    BarOutput, CoverageOutput, GetOutput, IngredientsOutput, ListOutput, MatchOutput,
    RecipeSummary, SearchOutput, ToggleOutput,
};
use mixbook_search::RecipeCoverage;

pub fn render_recipe_list(recipes: &[RecipeSummary]) -> String {
    let mut out = String::new();
    for recipe in recipes {
        out.push_str(&format!(
            "{:>4}  {}  ({} ingredients",
            recipe.id, recipe.name, recipe.ingredient_count
        ));
        if let Some(glass) = &recipe.glass {
            out.push_str(&format!(", {glass}"));
        }
        out.push_str(")\n");
    }
    out
}

pub fn render_list(list: &ListOutput) -> String {
    render_recipe_list(&list.recipes)
}

pub fn render_search(search: &SearchOutput) -> String {
    if search.results.is_empty() {
        return format!("No cocktails found for '{}'.\n", search.query.trim());
    }
    render_recipe_list(&search.results)
}

fn render_coverage(coverage: &RecipeCoverage) -> String {
    if coverage.owned == 0 {
        "You don't have any ingredients for this cocktail yet.".to_string()
    } else if coverage.has_all {
        "You have all ingredients!".to_string()
    } else {
        format!(
            "You have {} of {} ingredients ({}%).",
            coverage.owned, coverage.total, coverage.percent
        )
    }
}

pub fn render_recipe(out: &GetOutput) -> String {
    let Some(recipe) = &out.recipe else {
        return format!("Cocktail '{}' not found; showing all cocktails.\n", out.id);
    };

    let mut text = String::new();
    text.push_str(&format!("{}\n", recipe.name));
    let labels: Vec<&str> = [&recipe.category, &recipe.alcoholic, &recipe.glass]
        .into_iter()
        .filter_map(|label| label.as_deref())
        .collect();
    if !labels.is_empty() {
        text.push_str(&format!("{}\n", labels.join(" · ")));
    }
    text.push('\n');

    let missing = out
        .coverage
        .as_ref()
        .map(|c| c.missing.as_slice())
        .unwrap_or_default();
    text.push_str("Ingredients:\n");
    for ing in &recipe.ingredients {
        let mark = if missing.contains(&ing.name) { "[ ]" } else { "[x]" };
        text.push_str(&format!("  {mark} {}", ing.name));
        if let Some(measure) = &ing.measure {
            text.push_str(&format!(" ({measure})"));
        }
        text.push('\n');
    }
    if let Some(coverage) = &out.coverage {
        text.push_str(&format!("{}\n", render_coverage(coverage)));
    }
    text.push_str(&format!("\nInstructions:\n  {}\n", recipe.instructions));
    text
}

pub fn render_coverage_output(out: &CoverageOutput) -> String {
    match &out.coverage {
        Some(coverage) => format!("{}\n", render_coverage(coverage)),
        None => format!("Cocktail '{}' not found; showing all cocktails.\n", out.id),
    }
}

pub fn render_ingredients(out: &IngredientsOutput) -> String {
    let mut text = String::new();
    for entry in &out.ingredients {
        let mark = if entry.owned { "[x]" } else { "[ ]" };
        text.push_str(&format!("{mark} {}\n", entry.name));
    }
    if out.ingredients.is_empty() {
        text.push_str("No ingredients match.\n");
    }
    text
}

pub fn render_match(out: &MatchOutput) -> String {
    if out.results.is_empty() {
        return "No cocktails found. Try selecting different ingredients.\n".to_string();
    }
    let mut text = String::new();
    if !out.selected.is_empty() {
        text.push_str(&format!(
            "Cocktails with {} ({} found):\n",
            out.selected.join(", "),
            out.results.len()
        ));
    }
    text.push_str(&render_recipe_list(&out.results));
    text
}

pub fn render_bar(out: &BarOutput) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "You have {} of {} ingredients in stock.\n",
        out.stock.owned_count, out.stock.vocabulary_size
    ));
    if !out.stock.in_stock.is_empty() {
        text.push_str(&format!("In stock: {}\n", out.stock.in_stock.join(", ")));
    }
    text.push_str("\nCocktails you can make:\n");
    if out.makeable.is_empty() {
        text.push_str("  none yet; add more ingredients to your bar.\n");
    } else {
        text.push_str(&render_recipe_list(&out.makeable));
    }
    text
}

pub fn render_toggle(out: &ToggleOutput) -> String {
    let verb = if out.owned { "Added" } else { "Removed" };
    format!(
        "{verb} '{}' ({} ingredients in your bar).\n",
        out.ingredient, out.owned_count
    )
}
