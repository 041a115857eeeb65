//! Serving-size rescaling of free-text ingredient quantities.
//!
//! Quantities are authored as opaque text ("500g", "1/2 tasse", "À volonté").
//! Rescaling treats them as an optional number followed by an opaque suffix:
//! the first numeric token is replaced, every other character is kept, and
//! anything that can't be scaled is returned as-is.

use std::sync::LazyLock;

use regex::Regex;

/// `<int>/<int>` at the very start of a trimmed quantity.
static LEADING_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)/([0-9]+)").expect("fraction pattern is valid"));

/// First integer or decimal anywhere in a quantity.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("number pattern is valid"));

/// The span that gets replaced: a number plus an optional `/<denominator>`.
static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+\.?[0-9]*(?:/[0-9]+)?").expect("numeric token pattern is valid")
});

/// Display precision for a rescaled number, by magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingTiers {
    /// Values below this keep `small_decimals` decimal places.
    pub small_below: f64,
    /// Values below this (and not small) keep `medium_decimals` decimal places.
    pub medium_below: f64,
    pub small_decimals: u32,
    pub medium_decimals: u32,
}

impl Default for RoundingTiers {
    fn default() -> Self {
        Self {
            small_below: 1.0,
            medium_below: 10.0,
            small_decimals: 2,
            medium_decimals: 1,
        }
    }
}

/// Extract the number a quantity starts with.
///
/// A leading simple fraction (`"1/2 tasse"`) wins; otherwise the first integer
/// or decimal anywhere in the text is used (`"environ 4.5 kg"`). Returns `None`
/// when there is nothing to scale, including fractions over zero.
pub fn parse_leading_number(quantity: &str) -> Option<f64> {
    let trimmed = quantity.trim();

    if let Some(caps) = LEADING_FRACTION.captures(trimmed) {
        let numerator: f64 = caps[1].parse().ok()?;
        let denominator: f64 = caps[2].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return finite(numerator / denominator);
    }

    let token = NUMBER.find(trimmed)?.as_str().trim_end_matches('.');
    finite(token.parse().ok()?)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Rescale a quantity from `original_servings` to `new_servings` using the
/// default rounding tiers.
///
/// ```
/// use foodchief::scaling::rescale_quantity;
///
/// assert_eq!(rescale_quantity("250g", 4, 8), "500g");
/// assert_eq!(rescale_quantity("1/2 tasse", 1, 3), "1.5 tasse");
/// assert_eq!(rescale_quantity("À volonté", 4, 10), "À volonté");
/// ```
pub fn rescale_quantity(original: &str, original_servings: u32, new_servings: u32) -> String {
    rescale_quantity_with(
        original,
        original_servings,
        new_servings,
        &RoundingTiers::default(),
    )
}

/// Rescale a quantity with explicit rounding tiers.
///
/// Degenerate input (empty text, a zero serving count, no number) and an
/// unchanged serving count all return `original` untouched.
pub fn rescale_quantity_with(
    original: &str,
    original_servings: u32,
    new_servings: u32,
    tiers: &RoundingTiers,
) -> String {
    if original.is_empty()
        || original_servings == 0
        || new_servings == 0
        || new_servings == original_servings
    {
        return original.to_string();
    }

    let Some(parsed) = parse_leading_number(original) else {
        return original.to_string();
    };
    let Some(token) = NUMERIC_TOKEN.find(original) else {
        return original.to_string();
    };

    let ratio = f64::from(new_servings) / f64::from(original_servings);
    let scaled = format_scaled(parsed * ratio, tiers);

    let mut rescaled = String::with_capacity(original.len() + scaled.len());
    rescaled.push_str(&original[..token.start()]);
    rescaled.push_str(&scaled);
    rescaled.push_str(&original[token.end()..]);
    rescaled
}

/// Render a scaled number with the precision its magnitude calls for.
///
/// Trailing zeros never survive: `0.50` renders as `0.5` and `2.0` as `2`.
pub fn format_scaled(value: f64, tiers: &RoundingTiers) -> String {
    let rounded = if value < tiers.small_below {
        round_to(value, tiers.small_decimals)
    } else if value < tiers.medium_below {
        round_to(value, tiers.medium_decimals)
    } else {
        value.round()
    };

    // f64's Display is the shortest round-tripping form, so k / 10^n prints
    // with at most n decimals and no trailing zeros.
    rounded.to_string()
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

/// The serving counter of a recipe detail view. Never drops below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings(u32);

impl Servings {
    pub fn new(initial: u32) -> Self {
        Self(initial.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Decrementing at one is a no-op.
    pub fn decrement(&mut self) {
        if self.0 > 1 {
            self.0 -= 1;
        }
    }
}
