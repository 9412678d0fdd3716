//! Mana symbol normalization, cost and pool parsing, and the two
//! castability checks.
//!
//! Card costs arrive as lowercase symbols with hybrid halves joined by `-`
//! (`"2"`, `"w"`, `"w-u"`, `"2-g"`, `"b-p"`, `"x"`). Normalizing a symbol
//! splits it into its parts, so `"w-u"` becomes `["w", "u"]`.

/// Marker separating the two halves of an adventure or split cost.
const SPLIT_MARKER: &str = "split";

const COLOR_LETTERS: [char; 6] = ['w', 'u', 'b', 'r', 'g', 'c'];

const VARIABLE_MARKERS: [&str; 3] = ["x", "y", "z"];

/// Splits one cost symbol into its lowercase parts.
pub fn normalize_symbol(symbol: &str) -> Vec<String> {
    symbol
        .to_lowercase()
        .split('-')
        .map(str::to_string)
        .collect()
}

/// Normalizes a card's cost symbols, dropping split markers.
pub fn normalize_cost(cost: &[String]) -> Vec<Vec<String>> {
    cost.iter()
        .filter(|symbol| symbol.as_str() != SPLIT_MARKER)
        .map(|symbol| normalize_symbol(symbol))
        .collect()
}

/// Parses a mana cost typed in a query.
///
/// Accepts braced symbols (`{2}{w/u}{b/p}`), compact text (`2wwu`, `10`,
/// `x`), or a mix of both. Returns `None` for anything that is not a cost.
pub fn parse_cost(text: &str) -> Option<Vec<Vec<String>>> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let mut groups = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '{' {
            let mut inner = String::new();
            loop {
                match chars.next()? {
                    '}' => break,
                    ch => inner.push(ch),
                }
            }
            let parts: Vec<String> = inner.split('/').map(|p| p.trim().to_string()).collect();
            if parts.is_empty() || parts.len() > 2 || !parts.iter().all(|p| is_cost_part(p)) {
                return None;
            }
            groups.push(parts);
        } else if c.is_ascii_digit() {
            let mut number = c.to_string();
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                number.push(next);
                chars.next();
            }
            groups.push(vec![number]);
        } else if is_cost_part(&c.to_string()) {
            groups.push(vec![c.to_string()]);
        } else {
            return None;
        }
    }
    Some(groups)
}

fn is_cost_part(part: &str) -> bool {
    if part.is_empty() {
        return false;
    }
    if part.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => COLOR_LETTERS.contains(&c) || matches!(c, 'x' | 'y' | 'z' | 'p' | 's'),
        _ => false,
    }
}

/// Parses a mana pool typed in a query: color letters and generic amounts,
/// compact (`2ww`) or braced (`{2}{w}{w}`).
pub fn parse_pool(text: &str) -> Option<Vec<String>> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    let mut pool = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' | '}' => {}
            d if d.is_ascii_digit() => {
                let mut number = d.to_string();
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    number.push(next);
                    chars.next();
                }
                pool.push(number);
            }
            l if COLOR_LETTERS.contains(&l) => pool.push(l.to_string()),
            _ => return None,
        }
    }
    if pool.is_empty() {
        None
    } else {
        Some(pool)
    }
}

/// One part of a variable requirement group, once numbers are parsed.
#[derive(Debug, Clone, PartialEq)]
enum CostPart {
    Amount(u64),
    Symbol(String),
}

fn is_variable(group: &[String]) -> bool {
    group
        .first()
        .is_some_and(|part| VARIABLE_MARKERS.contains(&part.as_str()))
}

/// A lone number becomes an amount; a pair with a `2` on either side keeps
/// the `2` as an amount in the same position.
fn requirement_parts(group: &[String]) -> Vec<CostPart> {
    match group {
        [single] => match single.parse::<u64>() {
            Ok(amount) => vec![CostPart::Amount(amount)],
            Err(_) => vec![CostPart::Symbol(single.clone())],
        },
        [first, second] if first == "2" => {
            vec![CostPart::Amount(2), CostPart::Symbol(second.clone())]
        }
        [first, second] if second == "2" => {
            vec![CostPart::Symbol(first.clone()), CostPart::Amount(2)]
        }
        _ => group.iter().cloned().map(CostPart::Symbol).collect(),
    }
}

/// Spends a generic amount against the groups that carry a number, in order.
///
/// A group whose number is covered is discharged and the rest of the amount
/// moves on to the next group; a group only partly covered stays behind with
/// its remaining number.
fn spend_generic(remaining: &mut Vec<Vec<CostPart>>, mut amount: u64) {
    let mut kept = Vec::with_capacity(remaining.len());
    for group in remaining.drain(..) {
        if amount == 0 {
            kept.push(group);
            continue;
        }
        let numbered = match group.as_slice() {
            [CostPart::Amount(needed), rest @ ..] => Some((*needed, rest.to_vec())),
            [first, CostPart::Amount(needed)] => Some((*needed, vec![first.clone()])),
            _ => None,
        };
        let Some((needed, other)) = numbered else {
            kept.push(group);
            continue;
        };
        if amount >= needed {
            amount -= needed;
        } else {
            let mut residual = vec![CostPart::Amount(needed - amount)];
            residual.extend(other);
            kept.push(residual);
            amount = 0;
        }
    }
    *remaining = kept;
}

/// Returns true if the pool discharges every variable requirement
/// (`x`, `y`, `z` groups) of the cost.
///
/// Fixed requirements never take part, so a cost without variable groups is
/// castable with any pool. A color symbol removes the first group containing
/// it; a color matching no group counts as one generic. Generic amounts are
/// spent against numbered groups in order.
pub fn can_cast_with(pool: &[String], cost: &[Vec<String>]) -> bool {
    let mut remaining: Vec<Vec<CostPart>> = cost
        .iter()
        .filter(|group| is_variable(group))
        .map(|group| requirement_parts(group))
        .collect();
    remaining.sort_by_key(Vec::len);

    for symbol in pool {
        let symbol = symbol.to_lowercase();
        let amount = match symbol.parse::<u64>() {
            Ok(amount) => amount,
            Err(_) => {
                let target = CostPart::Symbol(symbol);
                match remaining.iter().position(|group| group.contains(&target)) {
                    Some(index) => {
                        remaining.remove(index);
                        continue;
                    }
                    None => 1,
                }
            }
        };
        spend_generic(&mut remaining, amount);
    }
    remaining.is_empty()
}

/// Returns true if the pool covers every colored requirement of the cost,
/// assuming any amount of generic mana is available.
///
/// Generic amounts, variable markers and two-or-color hybrids are dropped
/// first. Each pool symbol then clears every remaining group containing it.
pub fn can_cast_with_infinite(pool: &[String], cost: &[Vec<String>]) -> bool {
    let mut remaining: Vec<&Vec<String>> = cost
        .iter()
        .filter(|group| {
            let first = group.first().map(String::as_str).unwrap_or_default();
            let always_payable = first.parse::<u64>().is_ok()
                || VARIABLE_MARKERS.contains(&first)
                || group.get(1).map(String::as_str) == Some("2");
            !group.is_empty() && !always_payable
        })
        .collect();

    for symbol in pool {
        let symbol = symbol.to_lowercase();
        remaining.retain(|group| !group.iter().any(|part| *part == symbol));
    }
    remaining.is_empty()
}
