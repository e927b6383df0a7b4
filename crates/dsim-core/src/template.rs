//! Literal/placeholder templates for phone numbers and serials.
//!
//! | Placeholder | Produces |
//! |-------------|----------|
//! | `#`         | digit `0-9` |
//! | `?`         | uppercase letter `A-Z` |
//! | `^`         | lowercase letter `a-z` |
//!
//! Every other character is copied verbatim. Each placeholder is resolved
//! independently and uniformly.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use rand::Rng;

use crate::error::{DsimError, DsimResult};

pub const DIGIT: char = '#';
pub const UPPER: char = '?';
pub const LOWER: char = '^';

/// Serial layout used when none is configured.
pub const DEFAULT_SERIAL_TEMPLATE: &str = "SN-#####-????";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Literal(char),
    Digit,
    Upper,
    Lower,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    slots: Vec<Slot>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let slots = source
            .chars()
            .map(|c| match c {
                DIGIT => Slot::Digit,
                UPPER => Slot::Upper,
                LOWER => Slot::Lower,
                other => Slot::Literal(other),
            })
            .collect();
        Self {
            source: source.to_string(),
            slots,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of characters a filled template has.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Leading literal run, e.g. the calling code of a phone pattern.
    pub fn literal_prefix(&self) -> String {
        self.slots
            .iter()
            .map_while(|slot| match slot {
                Slot::Literal(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn fill(&self, rng: &mut impl Rng) -> String {
        let mut out = String::with_capacity(self.source.len());
        for slot in &self.slots {
            match slot {
                Slot::Literal(c) => out.push(*c),
                Slot::Digit => out.push(char::from(b'0' + rng.gen_range(0..10u8))),
                Slot::Upper => out.push(char::from(b'A' + rng.gen_range(0..26u8))),
                Slot::Lower => out.push(char::from(b'a' + rng.gen_range(0..26u8))),
            }
        }
        out
    }

    /// True when `value` could have been produced by [`Template::fill`].
    pub fn matches(&self, value: &str) -> bool {
        let mut chars = value.chars();
        for slot in &self.slots {
            let Some(c) = chars.next() else {
                return false;
            };
            let ok = match slot {
                Slot::Literal(expected) => c == *expected,
                Slot::Digit => c.is_ascii_digit(),
                Slot::Upper => c.is_ascii_uppercase(),
                Slot::Lower => c.is_ascii_lowercase(),
            };
            if !ok {
                return false;
            }
        }
        chars.next().is_none()
    }
}

const PHONE_PATTERNS: &[(&str, &str)] = &[
    ("Uganda", "+2567########"),
    ("Kenya", "+2547########"),
    ("Tanzania", "+2557########"),
    ("Zambia", "+2609#######"),
    ("Malawi", "+2659#######"),
    ("Nigeria", "+2348#######"),
    ("Ghana", "+2335#######"),
    ("Mozambique", "+2588#######"),
    ("Cameroon", "+2376#######"),
];

static PHONE_TEMPLATES: Lazy<BTreeMap<&'static str, Template>> = Lazy::new(|| {
    PHONE_PATTERNS
        .iter()
        .map(|(country, pattern)| (*country, Template::parse(pattern)))
        .collect()
});

/// Phone template for `country`.
pub fn phone_pattern(country: &str) -> DsimResult<&'static Template> {
    PHONE_TEMPLATES
        .get(country)
        .ok_or_else(|| DsimError::UnknownCountry(country.to_string()))
}
