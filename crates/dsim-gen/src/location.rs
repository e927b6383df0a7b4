use dsim_core::{DsimError, DsimResult, GeoTaxonomy, Location};
use rand::Rng;

/// Uniform top-down sampler over a [`GeoTaxonomy`].
///
/// Each level is drawn uniformly among the children of the level above, so
/// a country with few villages is as likely as one with many. Draws are
/// independent and with replacement.
#[derive(Debug, Clone, Copy)]
pub struct LocationSampler {
    taxonomy: &'static GeoTaxonomy,
}

impl LocationSampler {
    /// Fails if any node of the taxonomy has no children.
    pub fn new(taxonomy: &'static GeoTaxonomy) -> DsimResult<Self> {
        taxonomy.validate().map_err(DsimError::Config)?;
        Ok(Self { taxonomy })
    }

    pub fn taxonomy(&self) -> &'static GeoTaxonomy {
        self.taxonomy
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Location {
        let countries = self.taxonomy.countries;
        let country = &countries[rng.gen_range(0..countries.len())];
        let region = &country.regions[rng.gen_range(0..country.regions.len())];
        let district = &region.districts[rng.gen_range(0..region.districts.len())];
        let village = district.villages[rng.gen_range(0..district.villages.len())];
        Location {
            country: country.name,
            region: region.name,
            district: district.name,
            village,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsim_core::taxonomy::{Country, District, Region};
    use dsim_core::EAST_AND_WEST_AFRICA;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn samples_are_valid_paths() {
        let sampler = LocationSampler::new(&EAST_AND_WEST_AFRICA).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let loc = sampler.sample(&mut rng);
            assert!(
                EAST_AND_WEST_AFRICA.contains(loc.country, loc.region, loc.district, loc.village),
                "{loc:?} is not a taxonomy path"
            );
        }
    }

    #[test]
    fn every_country_is_reachable() {
        let sampler = LocationSampler::new(&EAST_AND_WEST_AFRICA).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<&str> = (0..2_000).map(|_| sampler.sample(&mut rng).country).collect();
        assert_eq!(seen.len(), EAST_AND_WEST_AFRICA.countries.len());
    }

    #[test]
    fn same_seed_same_sequence() {
        let sampler = LocationSampler::new(&EAST_AND_WEST_AFRICA).unwrap();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }

    #[test]
    fn empty_taxonomy_is_rejected_at_construction() {
        static EMPTY: GeoTaxonomy = GeoTaxonomy { countries: &[] };
        assert!(matches!(
            LocationSampler::new(&EMPTY),
            Err(DsimError::Config(_))
        ));

        static NO_VILLAGES: GeoTaxonomy = GeoTaxonomy {
            countries: &[Country {
                name: "Uganda",
                regions: &[Region {
                    name: "Central",
                    districts: &[District {
                        name: "Wakiso",
                        villages: &[],
                    }],
                }],
            }],
        };
        assert!(LocationSampler::new(&NO_VILLAGES).is_err());
    }
}
