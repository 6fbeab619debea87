//! Display helpers for frontends.

use crate::catalog::IngredientCatalog;
use crate::requirement::{Comparator, Requirement};

/// Game time units in one in-game day.
pub const GAME_TIME_PER_DAY: u32 = 480;

/// Real seconds per unit of recipe cook time.
pub const COOK_SECONDS_PER_UNIT: f32 = 20.0;

/// Formats a number without a trailing `.0`.
#[must_use]
pub fn format_number(value: f32) -> String {
    format!("{value}")
}

/// Formats a stat bonus, with a leading `+` on positive values if requested.
#[must_use]
pub fn format_bonus(value: f32, leading_plus: bool) -> String {
    if leading_plus && value > 0.0 {
        format!("+{}", format_number(value))
    } else {
        format_number(value)
    }
}

/// Formats a raw stat followed by the change cooking makes, if any.
///
/// `format_bonus_with_cooked(1.0, Some(3.0), true)` is `+1 (+2)`.
#[must_use]
pub fn format_bonus_with_cooked(raw: f32, cooked: Option<f32>, leading_plus: bool) -> String {
    let mut out = format_bonus(raw, leading_plus);
    if let Some(cooked) = cooked {
        let diff = cooked - raw;
        if diff.abs() > f32::EPSILON {
            out.push_str(&format!(" ({})", format_bonus(diff, true)));
        }
    }
    out
}

fn days(game_time: u32) -> String {
    let days = game_time as f32 / GAME_TIME_PER_DAY as f32;
    let suffix = if (days - 1.0).abs() < f32::EPSILON {
        "day"
    } else {
        "days"
    };
    format!("{} {suffix}", format_number(days))
}

/// Formats a perish time: `Never`, `1 day`, `N days`.
#[must_use]
pub fn format_perish(perish: Option<u32>) -> String {
    match perish {
        Some(time) if time > 0 => days(time),
        _ => "Never".to_string(),
    }
}

/// Formats a drying time as `dry in N days`.
#[must_use]
pub fn format_dry_time(dry_time: Option<u32>) -> Option<String> {
    dry_time
        .filter(|time| *time > 0)
        .map(|time| format!("dry in {}", days(time)))
}

/// Formats a recipe cook time as `N secs`.
#[must_use]
pub fn format_cook_time(cook_time: f32) -> String {
    format!("{} secs", format_number(cook_time * COOK_SECONDS_PER_UNIT))
}

/// Describes a requirement, naming ingredients by display name.
///
/// Top-level conjunctions are separated with `; `, nested ones with `and`.
/// Leaves read `veggie`, `veggie>=2`, `Seaweed=2`, `inedible<=1`, `no meat`.
#[must_use]
pub fn describe_requirement(requirement: &Requirement, ingredients: &IngredientCatalog) -> String {
    describe(requirement, ingredients, true)
}

fn describe(requirement: &Requirement, ingredients: &IngredientCatalog, top: bool) -> String {
    match requirement {
        Requirement::TagCount {
            tag,
            cmp,
            threshold,
        } => describe_leaf(tag.as_str(), *cmp, *threshold),
        Requirement::IngredientCount {
            ingredients: ids,
            cmp,
            threshold,
        } => {
            let names: Vec<&str> = ids
                .iter()
                .map(|id| ingredients.display_name(id.as_str()))
                .collect();
            describe_leaf(&names.join(" or "), *cmp, *threshold)
        },
        Requirement::And { all } => {
            let separator = if top { "; " } else { " and " };
            join(all, ingredients, separator)
        },
        Requirement::Or { any } => join(any, ingredients, " or "),
    }
}

fn join(children: &[Requirement], ingredients: &IngredientCatalog, separator: &str) -> String {
    children
        .iter()
        .map(|child| describe(child, ingredients, false))
        .collect::<Vec<_>>()
        .join(separator)
}

fn describe_leaf(subject: &str, cmp: Comparator, threshold: u8) -> String {
    match cmp {
        Comparator::AtLeast if threshold == 1 => subject.to_string(),
        Comparator::AtLeast => format!("{subject}>={threshold}"),
        Comparator::Exactly => format!("{subject}={threshold}"),
        Comparator::AtMost => format!("{subject}<={threshold}"),
        Comparator::None => format!("no {subject}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Ingredient;
    use crockpot_common::Tag;

    fn ingredients() -> IngredientCatalog {
        IngredientCatalog::new(vec![
            Ingredient::new("roe", "Roe", &[Tag::Fish]),
            Ingredient::new("roe_cooked", "Cooked Roe", &[Tag::Fish]),
            Ingredient::new("seaweed", "Seaweed", &[Tag::Veggie]),
            Ingredient::new("coffeebeans_cooked", "Roasted Coffee Beans", &[Tag::Fruit]),
            Ingredient::new("twigs", "Twigs", &[Tag::Inedible]),
        ])
        .expect("catalog")
    }

    #[test]
    fn test_bonus() {
        assert_eq!(format_bonus(12.0, true), "+12");
        assert_eq!(format_bonus(12.5, true), "+12.5");
        assert_eq!(format_bonus(-3.0, true), "-3");
        assert_eq!(format_bonus(5.0, false), "5");
        assert_eq!(format_bonus(0.0, true), "0");
        assert_eq!(format_bonus_with_cooked(1.0, Some(3.0), true), "+1 (+2)");
        assert_eq!(format_bonus_with_cooked(-10.0, Some(0.0), false), "-10 (+10)");
        assert_eq!(format_bonus_with_cooked(1.0, Some(1.0), true), "+1");
    }

    #[test]
    fn test_perish() {
        assert_eq!(format_perish(None), "Never");
        assert_eq!(format_perish(Some(480)), "1 day");
        assert_eq!(format_perish(Some(7200)), "15 days");
        assert_eq!(format_perish(Some(1440)), "3 days");
        assert_eq!(format_perish(Some(240)), "0.5 days");
    }

    #[test]
    fn test_dry_and_cook_time() {
        assert_eq!(format_dry_time(Some(960)).as_deref(), Some("dry in 2 days"));
        assert_eq!(format_dry_time(None), None);
        assert_eq!(format_cook_time(2.0), "40 secs");
        assert_eq!(format_cook_time(0.5), "10 secs");
    }

    #[test]
    fn test_describe_leaves() {
        let catalog = ingredients();
        let cases = [
            (Requirement::at_least(Tag::Veggie, 2), "veggie>=2"),
            (Requirement::at_least(Tag::Fish, 1), "fish"),
            (Requirement::at_least(Tag::Fish, 0), "fish>=0"),
            (Requirement::no(Tag::Meat), "no meat"),
            (Requirement::tag(Tag::Inedible, Comparator::AtMost, 1), "inedible<=1"),
            (Requirement::ingredients(["seaweed"], Comparator::Exactly, 2), "Seaweed=2"),
            (
                Requirement::ingredients(["roe", "roe_cooked"], Comparator::Exactly, 3),
                "Roe or Cooked Roe=3",
            ),
        ];
        for (requirement, expected) in cases {
            assert_eq!(describe_requirement(&requirement, &catalog), expected);
        }
    }

    #[test]
    fn test_describe_fishsticks() {
        let req = Requirement::all(vec![
            Requirement::at_least(Tag::Fish, 1),
            Requirement::ingredients(["twigs"], Comparator::AtLeast, 1),
            Requirement::at_least(Tag::Inedible, 1),
            Requirement::tag(Tag::Inedible, Comparator::AtMost, 1),
        ]);
        assert_eq!(
            describe_requirement(&req, &ingredients()),
            "fish; Twigs; inedible; inedible<=1"
        );
    }

    #[test]
    fn test_describe_coffee() {
        let req = Requirement::any(vec![
            Requirement::ingredients(["coffeebeans_cooked"], Comparator::Exactly, 4),
            Requirement::all(vec![
                Requirement::ingredients(["coffeebeans_cooked"], Comparator::Exactly, 3),
                Requirement::any(vec![
                    Requirement::at_least(Tag::Dairy, 1),
                    Requirement::at_least(Tag::Sweetener, 1),
                ]),
            ]),
        ]);
        assert_eq!(
            describe_requirement(&req, &ingredients()),
            "Roasted Coffee Beans=4 or Roasted Coffee Beans=3 and dairy or sweetener"
        );
    }
}
