//! Subcommand implementations.
//!
//! Every command writes to a caller-supplied writer, either as aligned text
//! or as JSON.

use crockpot_common::{CrockpotError, CrockpotResult, GameModes, IngredientId, RecipeId, Tag};
use crockpot_engine::{
    describe_requirement, format_bonus_with_cooked, format_cook_time, format_perish, Catalog,
    Combination, CrockPot, DiscoveredPool, Ingredient, MatchResult, Selection, Suggestion,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

/// Output of `cook`.
#[derive(Debug, Serialize)]
pub struct CookReport {
    /// Pot contents in slot order.
    pub selection: Vec<IngredientId>,
    /// What the pot produces.
    pub result: MatchResult,
    /// Single additions that complete other recipes.
    pub suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct DiscoverReport<'a> {
    covering: Vec<&'a Combination>,
    excluded: Vec<&'a Combination>,
    unreachable: &'a [RecipeId],
    ingredients_used: BTreeSet<&'a IngredientId>,
}

#[derive(Serialize)]
struct RecipeRow<'a> {
    id: &'a RecipeId,
    name: &'a str,
    priority: i32,
    mode: Option<&'static str>,
    cook_time: String,
    perish: String,
    requirement: String,
}

fn recipe_name<'a>(catalog: &'a Catalog, id: &'a RecipeId) -> &'a str {
    catalog
        .recipes()
        .get(id.as_str())
        .map_or(id.as_str(), |recipe| recipe.name.as_str())
}

fn ingredient_names(catalog: &Catalog, ids: &[IngredientId]) -> String {
    ids.iter()
        .map(|id| catalog.ingredients().display_name(id.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> CrockpotResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CrockpotError::Serialization(e.to_string()))?;
    writeln!(out)?;
    Ok(())
}

/// Resolves a pot and lists suggestions.
pub fn cook(
    pot: &CrockPot,
    ingredients: &[String],
    modes: GameModes,
    json: bool,
    out: &mut impl Write,
) -> CrockpotResult<()> {
    let selection = Selection::from_ids(ingredients.iter().map(String::as_str))?;
    let result = pot.resolve(&selection, modes)?;
    let suggestions = pot.suggest(&selection, modes)?;
    debug!(
        "Cooked {} ingredients into {} ({} suggestions)",
        selection.occupied(),
        result.winner,
        suggestions.len()
    );

    let report = CookReport {
        selection: selection.ingredients().cloned().collect(),
        result,
        suggestions,
    };
    if json {
        return write_json(out, &report);
    }

    let catalog = pot.catalog();
    writeln!(out, "Pot: {}", ingredient_names(catalog, &report.selection))?;
    let winner = catalog
        .recipes()
        .get(report.result.winner.as_str())
        .unwrap_or_else(|| catalog.recipes().fallback());
    writeln!(
        out,
        "Result: {} (health {}, hunger {}, sanity {}, {}, spoils in {})",
        winner.name,
        format_bonus_with_cooked(winner.health, None, true),
        format_bonus_with_cooked(winner.hunger, None, true),
        format_bonus_with_cooked(winner.sanity, None, true),
        format_cook_time(winner.cook_time),
        format_perish(winner.perish),
    )?;

    let others: Vec<&str> = report
        .result
        .qualifying
        .iter()
        .skip(1)
        .map(|id| recipe_name(catalog, id))
        .collect();
    if !others.is_empty() {
        writeln!(out, "Also qualifies: {}", others.join(", "))?;
    }

    if !report.suggestions.is_empty() {
        writeln!(out, "Suggestions:")?;
        for suggestion in &report.suggestions {
            writeln!(
                out,
                "  {:<24} {}",
                recipe_name(catalog, &suggestion.recipe),
                suggestion.target
            )?;
        }
    }
    Ok(())
}

/// Finds a combination for every recipe reachable from a pool.
///
/// With `all` set the pool is every ingredient in the catalog.
pub fn discover(
    pot: &CrockPot,
    ingredients: &[String],
    all: bool,
    exclude: &[String],
    modes: GameModes,
    json: bool,
    out: &mut impl Write,
) -> CrockpotResult<()> {
    let catalog = pot.catalog();
    let pool: DiscoveredPool = if all {
        catalog.ingredients().iter().map(|i| i.id.clone()).collect()
    } else {
        ingredients.iter().map(String::as_str).collect()
    };
    let excluded: BTreeSet<RecipeId> = exclude
        .iter()
        .map(String::as_str)
        .map(RecipeId::from)
        .collect();
    for id in &excluded {
        if catalog.recipes().get(id.as_str()).is_none() {
            return Err(CrockpotError::UnknownRecipe(id.clone()));
        }
    }
    let report = pot.search(&pool, modes, &excluded)?;

    if json {
        return write_json(
            out,
            &DiscoverReport {
                covering: report.covering().collect(),
                excluded: report.excluded().collect(),
                unreachable: report.unreachable(),
                ingredients_used: report.ingredients_used(),
            },
        );
    }

    writeln!(out, "Recipes:")?;
    for combination in report.covering() {
        writeln!(
            out,
            "  {:<24} {}",
            recipe_name(catalog, &combination.recipe),
            ingredient_names(catalog, &combination.ingredients)
        )?;
    }
    let withheld: Vec<&str> = report
        .excluded()
        .map(|c| recipe_name(catalog, &c.recipe))
        .collect();
    if !withheld.is_empty() {
        writeln!(out, "Excluded: {}", withheld.join(", "))?;
    }
    let missing: Vec<&str> = report
        .unreachable()
        .iter()
        .map(|id| recipe_name(catalog, id))
        .collect();
    if !missing.is_empty() {
        writeln!(out, "Unreachable: {}", missing.join(", "))?;
    }
    Ok(())
}

/// Lists recipes enabled under `modes`, optionally filtered by name.
pub fn recipes(
    catalog: &Catalog,
    search: Option<&str>,
    modes: GameModes,
    json: bool,
    out: &mut impl Write,
) -> CrockpotResult<()> {
    let rows: Vec<RecipeRow<'_>> = catalog
        .recipes()
        .enabled(modes)
        .map(|(_, recipe)| recipe)
        .filter(|recipe| search.map_or(true, |query| recipe.matches_search(query)))
        .map(|recipe| RecipeRow {
            id: &recipe.id,
            name: &recipe.name,
            priority: recipe.priority,
            mode: recipe.mode.map(|mode| mode.as_str()),
            cook_time: format_cook_time(recipe.cook_time),
            perish: format_perish(recipe.perish),
            requirement: describe_requirement(&recipe.requirement, catalog.ingredients()),
        })
        .collect();

    if json {
        return write_json(out, &rows);
    }
    for row in &rows {
        writeln!(
            out,
            "{:<20} {:>4}  {:<9} {:<8}  {}",
            row.name, row.priority, row.cook_time, row.perish, row.requirement
        )?;
    }
    Ok(())
}

/// Lists ingredients of the enabled modes, uncookable ones included.
pub fn ingredients(
    catalog: &Catalog,
    tag: Option<Tag>,
    search: Option<&str>,
    modes: GameModes,
    json: bool,
    out: &mut impl Write,
) -> CrockpotResult<()> {
    let ingredients = catalog.ingredients();
    let rows: Vec<&Ingredient> = ingredients
        .iter()
        .filter(|ingredient| modes.allows(ingredient.mode))
        .filter(|ingredient| tag.map_or(true, |tag| ingredient.has_tag(tag)))
        .filter(|ingredient| search.map_or(true, |query| ingredient.matches_search(query)))
        .collect();

    if json {
        return write_json(out, &rows);
    }
    for ingredient in rows {
        let cooked = ingredients.cooked_form(ingredient.id.as_str());
        let tags: Vec<&str> = ingredient.tags.iter().map(Tag::as_str).collect();
        let mut line = format!(
            "{:<24} hp {:<10} hunger {:<12} sanity {:<10} {}",
            ingredient.name,
            format_bonus_with_cooked(ingredient.health, cooked.map(|c| c.health), true),
            format_bonus_with_cooked(ingredient.hunger, cooked.map(|c| c.hunger), true),
            format_bonus_with_cooked(ingredient.sanity, cooked.map(|c| c.sanity), true),
            tags.join(" "),
        );
        if ingredient.uncookable {
            line.push_str("  (cannot be added to crock pot)");
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
