use chrono::{Duration, NaiveDate};
use dsim_core::{DistributionRecord, DsimError, DsimResult, GeoTaxonomy, EAST_AND_WEST_AFRICA};
use rand::Rng;
use tracing::debug;

use crate::identifiers::IdentifierGenerator;
use crate::location::LocationSampler;
use crate::names::person_name;

/// First day of the distribution programme.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Composes location, identifiers and names into [`DistributionRecord`]s.
#[derive(Debug, Clone)]
pub struct DistributionGenerator {
    locations: LocationSampler,
    identifiers: IdentifierGenerator,
    start_date: NaiveDate,
}

impl DistributionGenerator {
    pub fn new(
        taxonomy: &'static GeoTaxonomy,
        identifiers: IdentifierGenerator,
        start_date: NaiveDate,
    ) -> DsimResult<Self> {
        Ok(Self {
            locations: LocationSampler::new(taxonomy)?,
            identifiers,
            start_date,
        })
    }

    /// Built-in taxonomy, default serial template and programme start date.
    pub fn builtin() -> DsimResult<Self> {
        Self::new(
            &EAST_AND_WEST_AFRICA,
            IdentifierGenerator::default(),
            default_start_date(),
        )
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Generate exactly `count` records with ids `1..=count`.
    ///
    /// `today` is the inclusive upper bound of `distribution_date`; callers
    /// read it once per run so all records of a run share the same range.
    /// Any failure aborts the whole batch.
    pub fn generate(
        &self,
        count: usize,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> DsimResult<Vec<DistributionRecord>> {
        let span_days = (today - self.start_date).num_days();
        if span_days < 0 {
            return Err(DsimError::Validation(format!(
                "distribution start date {} is after today ({today})",
                self.start_date
            )));
        }

        let mut records = Vec::with_capacity(count);
        for idx in 0..count {
            let location = self.locations.sample(rng);
            let name = person_name(rng);
            let phone = self.identifiers.phone(location.country, rng)?;
            let serial = self.identifiers.serial(rng);
            let distribution_date = self.start_date + Duration::days(rng.gen_range(0..=span_days));

            records.push(DistributionRecord {
                id: idx as u64 + 1,
                name,
                region: location.region.to_string(),
                district: location.district.to_string(),
                village: location.village.to_string(),
                phone,
                serial,
                country: location.country.to_string(),
                distribution_date,
            });
        }
        debug!(
            count,
            start = %self.start_date,
            end = %today,
            "generated distribution records"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsim_core::phone_pattern;
    use rand::{rngs::StdRng, SeedableRng};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    #[test]
    fn produces_exactly_n_records_with_contiguous_ids() {
        let gen = DistributionGenerator::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(10);
        for n in [0usize, 1, 2, 17, 100] {
            let records = gen.generate(n, today(), &mut rng).unwrap();
            assert_eq!(records.len(), n);
            let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
            let expected: Vec<u64> = (1..=n as u64).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn records_are_internally_consistent() {
        let gen = DistributionGenerator::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let records = gen.generate(300, today(), &mut rng).unwrap();
        for r in &records {
            assert!(EAST_AND_WEST_AFRICA.contains(&r.country, &r.region, &r.district, &r.village));
            let pattern = phone_pattern(&r.country).unwrap();
            assert!(pattern.matches(&r.phone), "{} vs {}", r.phone, pattern.as_str());
            assert!(r.distribution_date >= default_start_date());
            assert!(r.distribution_date <= today());
            assert!(!r.name.is_empty());
        }
    }

    #[test]
    fn single_day_range_pins_the_date() {
        let gen = DistributionGenerator::new(
            &EAST_AND_WEST_AFRICA,
            IdentifierGenerator::default(),
            today(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let records = gen.generate(25, today(), &mut rng).unwrap();
        assert!(records.iter().all(|r| r.distribution_date == today()));
    }

    #[test]
    fn start_after_today_is_rejected() {
        let gen = DistributionGenerator::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let day_before_start = default_start_date() - Duration::days(1);
        assert!(matches!(
            gen.generate(5, day_before_start, &mut rng),
            Err(DsimError::Validation(_))
        ));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let gen = DistributionGenerator::builtin().unwrap();
        let a = gen
            .generate(20, today(), &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = gen
            .generate(20, today(), &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }
}
