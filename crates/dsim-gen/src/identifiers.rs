use dsim_core::{phone_pattern, DsimResult, Template, DEFAULT_SERIAL_TEMPLATE};
use rand::Rng;

/// Phone numbers from per-country patterns and serials from one fixed template.
#[derive(Debug, Clone)]
pub struct IdentifierGenerator {
    serial: Template,
}

impl IdentifierGenerator {
    pub fn new(serial_template: &str) -> Self {
        Self {
            serial: Template::parse(serial_template),
        }
    }

    pub fn serial_template(&self) -> &Template {
        &self.serial
    }

    /// Fails with `UnknownCountry` when `country` has no phone pattern.
    pub fn phone(&self, country: &str, rng: &mut impl Rng) -> DsimResult<String> {
        Ok(phone_pattern(country)?.fill(rng))
    }

    pub fn serial(&self, rng: &mut impl Rng) -> String {
        self.serial.fill(rng)
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SERIAL_TEMPLATE)
    }
}
