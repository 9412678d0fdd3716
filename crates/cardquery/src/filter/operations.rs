//! Operator families.
//!
//! Each family turns an operator and a typed value into a predicate over one
//! field's raw value. A family given an operator outside its set returns
//! [`FilterError::UnrecognizedOperator`].

use super::ast::Operator;
use super::error::{FilterError, FilterResult};
use super::mana;

/// A predicate over a single field value.
pub type ValuePredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate comparing two field values of the same card.
pub type ComparisonPredicate<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Rarity ordinals, keyed by first letter.
const RARITY_ORDER: [(char, i8); 5] = [('c', 0), ('u', 1), ('r', 2), ('m', 3), ('s', 4)];

/// Native ordering: equality, inequality and the four comparisons.
pub fn ordering<T>(op: Operator, value: T) -> FilterResult<ValuePredicate<T>>
where
    T: PartialOrd + Send + Sync + 'static,
{
    let predicate: ValuePredicate<T> = match op {
        Operator::Colon | Operator::Equal => Box::new(move |field: &T| *field == value),
        Operator::NotEqual | Operator::LessGreater => Box::new(move |field: &T| *field != value),
        Operator::Less => Box::new(move |field: &T| *field < value),
        Operator::LessEqual => Box::new(move |field: &T| *field <= value),
        Operator::Greater => Box::new(move |field: &T| *field > value),
        Operator::GreaterEqual => Box::new(move |field: &T| *field >= value),
    };
    Ok(predicate)
}

/// [`ordering`] for fields that may be missing. A missing value satisfies
/// only the inequality operators.
pub fn optional_ordering<T>(op: Operator, value: T) -> FilterResult<ValuePredicate<Option<T>>>
where
    T: PartialOrd + Send + Sync + 'static,
{
    let inner = ordering(op, value)?;
    let missing = op.is_negative();
    Ok(Box::new(move |field: &Option<T>| match field {
        Some(present) => inner(present),
        None => missing,
    }))
}

/// Case-insensitive string matching where `:` and `=` both mean "contains"
/// and the inequality operators mean "not equal".
pub fn substring_default(op: Operator, value: &str) -> FilterResult<ValuePredicate<str>> {
    let value = value.to_lowercase();
    let predicate: ValuePredicate<str> = match op {
        Operator::Colon | Operator::Equal => {
            Box::new(move |field: &str| field.to_lowercase().contains(&value))
        }
        Operator::NotEqual | Operator::LessGreater => {
            Box::new(move |field: &str| field.to_lowercase() != value)
        }
        other => return Err(FilterError::unrecognized_operator("string", other)),
    };
    Ok(predicate)
}

/// Case-insensitive string matching with an explicit exclude: `!=` means
/// "does not contain" and `<>` means "not equal".
pub fn contains_or_exclude(op: Operator, value: &str) -> FilterResult<ValuePredicate<str>> {
    let value = value.to_lowercase();
    let predicate: ValuePredicate<str> = match op {
        Operator::Colon | Operator::Equal => {
            Box::new(move |field: &str| field.to_lowercase().contains(&value))
        }
        Operator::NotEqual => Box::new(move |field: &str| !field.to_lowercase().contains(&value)),
        Operator::LessGreater => Box::new(move |field: &str| field.to_lowercase() != value),
        other => return Err(FilterError::unrecognized_operator("string contains", other)),
    };
    Ok(predicate)
}

/// Structural equality.
pub fn equality<T>(op: Operator, value: T) -> FilterResult<ValuePredicate<T>>
where
    T: PartialEq + Send + Sync + 'static,
{
    let predicate: ValuePredicate<T> = match op {
        Operator::Colon | Operator::Equal => Box::new(move |field: &T| *field == value),
        Operator::NotEqual | Operator::LessGreater => Box::new(move |field: &T| *field != value),
        other => return Err(FilterError::unrecognized_operator("equality", other)),
    };
    Ok(predicate)
}

/// Structural equality over text.
pub fn text_equality(op: Operator, value: String) -> FilterResult<ValuePredicate<str>> {
    let predicate: ValuePredicate<str> = match op {
        Operator::Colon | Operator::Equal => Box::new(move |field: &str| field == value),
        Operator::NotEqual | Operator::LessGreater => Box::new(move |field: &str| field != value),
        other => return Err(FilterError::unrecognized_operator("equality", other)),
    };
    Ok(predicate)
}

fn is_subset(inner: &[String], outer: &[String]) -> bool {
    inner.iter().all(|element| outer.contains(element))
}

fn same_set(a: &[String], b: &[String]) -> bool {
    is_subset(a, b) && is_subset(b, a)
}

/// Set comparison between the field's elements and the query's. Order and
/// duplicates are ignored; case is not.
pub fn set(op: Operator, query: Vec<String>) -> FilterResult<ValuePredicate<[String]>> {
    let predicate: ValuePredicate<[String]> = match op {
        Operator::Colon | Operator::GreaterEqual => {
            Box::new(move |field: &[String]| is_subset(&query, field))
        }
        Operator::Equal => Box::new(move |field: &[String]| same_set(field, &query)),
        Operator::NotEqual | Operator::LessGreater => {
            Box::new(move |field: &[String]| !same_set(field, &query))
        }
        Operator::Less => {
            Box::new(move |field: &[String]| is_subset(field, &query) && !same_set(field, &query))
        }
        Operator::LessEqual => Box::new(move |field: &[String]| is_subset(field, &query)),
        Operator::Greater => {
            Box::new(move |field: &[String]| is_subset(&query, field) && !same_set(field, &query))
        }
    };
    Ok(predicate)
}

/// Ordering over the number of distinct elements in the field's set.
pub fn set_count(op: Operator, count: usize) -> FilterResult<ValuePredicate<[String]>> {
    let inner = ordering(op, count)?;
    Ok(Box::new(move |field: &[String]| {
        let mut distinct: Vec<&String> = field.iter().collect();
        distinct.sort_unstable();
        distinct.dedup();
        inner(&distinct.len())
    }))
}

/// Set-membership test built by [`set_membership`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    target: String,
    present: bool,
}

impl Membership {
    /// Returns true if some element equals the target (for `:` and `=`), or
    /// if none does (for `!=` and `<>`). Comparison ignores case.
    pub fn test<'a>(&self, elements: impl IntoIterator<Item = &'a str>) -> bool {
        let found = elements
            .into_iter()
            .any(|element| element.to_lowercase() == self.target);
        found == self.present
    }
}

/// Membership of a single value in the field's set.
pub fn set_membership(op: Operator, value: &str) -> FilterResult<Membership> {
    let present = match op {
        Operator::Colon | Operator::Equal => true,
        Operator::NotEqual | Operator::LessGreater => false,
        other => return Err(FilterError::unrecognized_operator("set membership", other)),
    };
    Ok(Membership {
        target: value.to_lowercase(),
        present,
    })
}

/// Maps a rarity to its ordinal by first letter; unknown rarities are -1.
pub fn rarity_ordinal(rarity: &str) -> i8 {
    let Some(first) = rarity.chars().next().map(|c| c.to_ascii_lowercase()) else {
        return -1;
    };
    RARITY_ORDER
        .iter()
        .find(|(letter, _)| *letter == first)
        .map_or(-1, |(_, ordinal)| *ordinal)
}

/// Full rarity names, in ordinal order.
pub const RARITIES: [&str; 5] = ["common", "uncommon", "rare", "mythic", "special"];

/// Rarity comparison.
///
/// Equality compares the lowercased strings as they are; the orderings
/// compare first-letter ordinals, so `r>=r` and `r>=rare` agree.
pub fn rarity(op: Operator, value: &str) -> FilterResult<ValuePredicate<str>> {
    let target = rarity_ordinal(value);
    if target < 0 {
        return Err(FilterError::InvalidRarity {
            value: value.to_string(),
        });
    }
    let value = value.to_lowercase();
    let predicate: ValuePredicate<str> = match op {
        Operator::Colon | Operator::Equal => {
            Box::new(move |field: &str| field.to_lowercase() == value)
        }
        Operator::NotEqual | Operator::LessGreater => {
            Box::new(move |field: &str| field.to_lowercase() != value)
        }
        _ => {
            let inner = ordering(op, target)?;
            Box::new(move |field: &str| inner(&rarity_ordinal(field)))
        }
    };
    Ok(predicate)
}

fn same_group(a: &[String], b: &[String]) -> bool {
    same_set(a, b)
}

/// Multiset equality of cost groups, each group compared as a set.
fn same_cost(a: &[Vec<String>], b: &[Vec<String>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut unmatched: Vec<&Vec<String>> = b.iter().collect();
    for group in a {
        let Some(index) = unmatched.iter().position(|other| same_group(group, other)) else {
            return false;
        };
        unmatched.swap_remove(index);
    }
    true
}

/// Mana cost comparison over raw card cost symbols.
///
/// `:` holds when every query group appears in the card's cost; `=` when the
/// two costs are the same multiset of groups.
pub fn mana_cost(op: Operator, query: Vec<Vec<String>>) -> FilterResult<ValuePredicate<[String]>> {
    let predicate: ValuePredicate<[String]> = match op {
        Operator::Colon => Box::new(move |field: &[String]| {
            let cost = mana::normalize_cost(field);
            query
                .iter()
                .all(|group| cost.iter().any(|other| same_group(group, other)))
        }),
        Operator::Equal => {
            Box::new(move |field: &[String]| same_cost(&mana::normalize_cost(field), &query))
        }
        Operator::NotEqual | Operator::LessGreater => {
            Box::new(move |field: &[String]| !same_cost(&mana::normalize_cost(field), &query))
        }
        other => return Err(FilterError::unrecognized_operator("mana cost", other)),
    };
    Ok(predicate)
}

/// Castability of the card's cost with a mana pool.
///
/// `=` is exact castability and `!=`/`<>` its negation; `:` and `<=` assume
/// unlimited generic mana and `>` negates that.
pub fn castable(op: Operator, pool: Vec<String>) -> FilterResult<ValuePredicate<[String]>> {
    let predicate: ValuePredicate<[String]> = match op {
        Operator::Equal => {
            Box::new(move |field: &[String]| mana::can_cast_with(&pool, &mana::normalize_cost(field)))
        }
        Operator::NotEqual | Operator::LessGreater => Box::new(move |field: &[String]| {
            !mana::can_cast_with(&pool, &mana::normalize_cost(field))
        }),
        Operator::Colon | Operator::LessEqual => Box::new(move |field: &[String]| {
            mana::can_cast_with_infinite(&pool, &mana::normalize_cost(field))
        }),
        Operator::Greater => Box::new(move |field: &[String]| {
            !mana::can_cast_with_infinite(&pool, &mana::normalize_cost(field))
        }),
        other => return Err(FilterError::unrecognized_operator("castable", other)),
    };
    Ok(predicate)
}

/// Compares two fields of the same card. When either side is missing only
/// the inequality operators hold.
pub fn property_comparison<T>(op: Operator) -> FilterResult<ComparisonPredicate<Option<T>>>
where
    T: PartialOrd + 'static,
{
    let compare: fn(&T, &T) -> bool = match op {
        Operator::Colon | Operator::Equal => |a, b| a == b,
        Operator::NotEqual | Operator::LessGreater => |a, b| a != b,
        Operator::Less => |a, b| a < b,
        Operator::LessEqual => |a, b| a <= b,
        Operator::Greater => |a, b| a > b,
        Operator::GreaterEqual => |a, b| a >= b,
    };
    let missing = op.is_negative();
    Ok(Box::new(move |a: &Option<T>, b: &Option<T>| match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        _ => missing,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    const ALL_OPS: [Operator; 8] = [
        Operator::Colon,
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessGreater,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
    ];

    #[test]
    fn test_ordering() {
        assert!(ordering(Operator::Less, 3.0).unwrap()(&2.0));
        assert!(!ordering(Operator::Less, 3.0).unwrap()(&3.0));
        assert!(ordering(Operator::LessEqual, 3.0).unwrap()(&3.0));
        assert!(ordering(Operator::Colon, 3.0).unwrap()(&3.0));
        assert!(ordering(Operator::LessGreater, 3.0).unwrap()(&4.0));
        assert!(ordering(Operator::GreaterEqual, 3.0).unwrap()(&4.0));
    }

    #[test]
    fn test_optional_ordering_missing_value() {
        assert!(!optional_ordering(Operator::Equal, 1.0).unwrap()(&None));
        assert!(!optional_ordering(Operator::Less, 1.0).unwrap()(&None));
        assert!(!optional_ordering(Operator::GreaterEqual, 1.0).unwrap()(&None));
        assert!(optional_ordering(Operator::NotEqual, 1.0).unwrap()(&None));
        assert!(optional_ordering(Operator::Less, 1.0).unwrap()(&Some(0.5)));
    }

    #[test]
    fn test_substring_default_asymmetry() {
        let contains = substring_default(Operator::Colon, "Bolt").unwrap();
        assert!(contains("Lightning Bolt"));
        let equals = substring_default(Operator::Equal, "bolt").unwrap();
        assert!(equals("Lightning Bolt"));

        // Inequality is a whole-string comparison, not "does not contain".
        let not_equal = substring_default(Operator::NotEqual, "bolt").unwrap();
        assert!(not_equal("Lightning Bolt"));
        assert!(!not_equal("BOLT"));
    }

    #[test]
    fn test_contains_or_exclude() {
        let exclude = contains_or_exclude(Operator::NotEqual, "draw").unwrap();
        assert!(!exclude("Draw a card."));
        assert!(exclude("Deal 3 damage."));

        let not_equal = contains_or_exclude(Operator::LessGreater, "draw").unwrap();
        assert!(not_equal("Draw a card."));
        assert!(!not_equal("DRAW"));
    }

    #[test]
    fn test_string_families_reject_ordering() {
        for op in [Operator::Less, Operator::LessEqual, Operator::Greater, Operator::GreaterEqual] {
            let err = substring_default(op, "x").err().unwrap();
            assert!(err.is_configuration());
            assert!(err.to_string().contains(op.as_str()));
            assert!(contains_or_exclude(op, "x").is_err());
            assert!(equality(op, 1).is_err());
            assert!(text_equality(op, "x".to_string()).is_err());
            assert!(set_membership(op, "x").is_err());
            assert!(mana_cost(op, vec![]).is_err());
        }
    }

    #[test]
    fn test_castable_rejects_less_and_greater_equal() {
        assert!(castable(Operator::Less, vec![]).is_err());
        assert!(castable(Operator::GreaterEqual, vec![]).is_err());
    }

    #[test]
    fn test_set_laws_exhaustive() {
        // Every pair of subsets of a three-element universe.
        let universe = ["W", "U", "B"];
        let subsets: Vec<Vec<String>> = (0..8u8)
            .map(|mask| {
                universe
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| c.to_string())
                    .collect()
            })
            .collect();

        for a in &subsets {
            for b in &subsets {
                let b_in_a = b.iter().all(|x| a.contains(x));
                let a_in_b = a.iter().all(|x| b.contains(x));
                assert_eq!(set(Operator::Colon, b.clone()).unwrap()(a), b_in_a);
                assert_eq!(set(Operator::GreaterEqual, b.clone()).unwrap()(a), b_in_a);
                assert_eq!(set(Operator::Equal, b.clone()).unwrap()(a), a_in_b && b_in_a);
                assert_eq!(set(Operator::NotEqual, b.clone()).unwrap()(a), !(a_in_b && b_in_a));
                assert_eq!(set(Operator::Less, b.clone()).unwrap()(a), a_in_b && !b_in_a);
                assert_eq!(set(Operator::LessEqual, b.clone()).unwrap()(a), a_in_b);
                assert_eq!(set(Operator::Greater, b.clone()).unwrap()(a), b_in_a && !a_in_b);
            }
        }
    }

    #[test]
    fn test_set_ignores_order_and_duplicates() {
        let equal = set(Operator::Equal, strings(&["U", "W", "W"])).unwrap();
        assert!(equal(&strings(&["W", "U"])));
    }

    #[test]
    fn test_set_count() {
        let two = set_count(Operator::Equal, 2).unwrap();
        assert!(two(&strings(&["W", "U"])));
        assert!(two(&strings(&["W", "U", "U"])));
        assert!(!two(&strings(&["W"])));
        assert!(set_count(Operator::GreaterEqual, 1).unwrap()(&strings(&["G"])));
    }

    #[test]
    fn test_set_membership() {
        let legal = set_membership(Operator::Colon, "Modern").unwrap();
        assert!(legal.test(["modern", "legacy"]));
        assert!(!legal.test(["legacy"]));
        assert!(!legal.test([]));

        let not_legal = set_membership(Operator::NotEqual, "modern").unwrap();
        assert!(not_legal.test(["Legacy"]));
        assert!(!not_legal.test(["MODERN"]));
    }

    #[test]
    fn test_rarity_ordering() {
        let above_rare = rarity(Operator::Greater, "rare").unwrap();
        assert!(above_rare("mythic"));
        assert!(!above_rare("rare"));
        assert!(rarity(Operator::Greater, "uncommon").unwrap()("rare"));
        assert!(rarity(Operator::Greater, "common").unwrap()("uncommon"));
        assert!(rarity(Operator::GreaterEqual, "r").unwrap()("Rare"));
    }

    #[test]
    fn test_rarity_equality_compares_strings() {
        assert!(rarity(Operator::Equal, "mythic").unwrap()("Mythic"));
        assert!(!rarity(Operator::Equal, "mythic").unwrap()("m"));
        assert!(!rarity(Operator::Colon, "m").unwrap()("mythic"));
        assert!(rarity(Operator::NotEqual, "mythic").unwrap()("rare"));
        assert!(rarity(Operator::LessGreater, "mythic").unwrap()("m"));
    }

    #[test]
    fn test_rarity_ordering_uses_first_letter() {
        assert!(rarity(Operator::GreaterEqual, "mythic").unwrap()("m"));
        assert!(rarity(Operator::LessEqual, "m").unwrap()("mythic"));
        assert!(!rarity(Operator::Less, "mythic").unwrap()("m"));
    }

    #[test]
    fn test_rarity_unknown() {
        assert!(matches!(
            rarity(Operator::Equal, "legendary"),
            Err(FilterError::InvalidRarity { .. })
        ));
        // An unknown card rarity sorts below common.
        assert!(rarity(Operator::Less, "common").unwrap()("bonus"));
    }

    #[test]
    fn test_mana_cost_contains() {
        let query = vec![vec!["u".to_string(), "w".to_string()]];
        let contains = mana_cost(Operator::Colon, query).unwrap();
        assert!(contains(&strings(&["1", "w-u"])));
        assert!(!contains(&strings(&["1", "w", "u"])));
    }

    #[test]
    fn test_mana_cost_multiset_equality() {
        let query = vec![vec!["w".to_string()], vec!["w".to_string()]];
        let equal = mana_cost(Operator::Equal, query.clone()).unwrap();
        assert!(equal(&strings(&["W", "W"])));
        assert!(!equal(&strings(&["w"])));
        assert!(!equal(&strings(&["w", "w", "w"])));
        assert!(mana_cost(Operator::NotEqual, query).unwrap()(&strings(&["w", "u"])));
    }

    #[test]
    fn test_castable_operators() {
        let cost = strings(&["2", "w", "w"]);
        let pool = strings(&["1", "w", "w"]);
        assert!(castable(Operator::Equal, pool.clone()).unwrap()(&cost));
        assert!(!castable(Operator::NotEqual, pool.clone()).unwrap()(&cost));
        assert!(castable(Operator::Colon, pool.clone()).unwrap()(&cost));
        assert!(castable(Operator::LessEqual, pool.clone()).unwrap()(&cost));
        assert!(!castable(Operator::Greater, pool.clone()).unwrap()(&cost));

        let variable = strings(&["x", "r"]);
        assert!(!castable(Operator::Equal, pool.clone()).unwrap()(&variable));
        assert!(castable(Operator::NotEqual, pool).unwrap()(&variable));
    }

    #[test]
    fn test_property_comparison() {
        for op in ALL_OPS {
            let compare = property_comparison::<f64>(op).unwrap();
            assert_eq!(compare(&None, &Some(1.0)), op.is_negative());
        }
        let greater = property_comparison::<f64>(Operator::Greater).unwrap();
        assert!(greater(&Some(3.0), &Some(2.0)));
        assert!(!greater(&Some(2.0), &Some(2.0)));
    }
}
