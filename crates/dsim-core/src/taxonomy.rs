//! Fixed Country → Region → District → Village hierarchy.
//!
//! The tree is a `'static` value built from slices, so iteration order is
//! declaration order and index-based sampling is reproducible under a seeded RNG.

use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct GeoTaxonomy {
    pub countries: &'static [Country],
}

#[derive(Debug, Clone, Copy)]
pub struct Country {
    pub name: &'static str,
    pub regions: &'static [Region],
}

#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub name: &'static str,
    pub districts: &'static [District],
}

#[derive(Debug, Clone, Copy)]
pub struct District {
    pub name: &'static str,
    pub villages: &'static [&'static str],
}

/// One fully resolved taxonomy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub country: &'static str,
    pub region: &'static str,
    pub district: &'static str,
    pub village: &'static str,
}

impl GeoTaxonomy {
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn country_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.countries.iter().map(|c| c.name)
    }

    /// True when `(region, district, village)` is a path under `country`.
    pub fn contains(&self, country: &str, region: &str, district: &str, village: &str) -> bool {
        self.country(country)
            .and_then(|c| c.regions.iter().find(|r| r.name == region))
            .and_then(|r| r.districts.iter().find(|d| d.name == district))
            .map(|d| d.villages.contains(&village))
            .unwrap_or(false)
    }

    /// Check that every node has at least one child and every village is named.
    pub fn validate(&self) -> Result<(), String> {
        if self.countries.is_empty() {
            return Err("taxonomy has no countries".into());
        }
        for country in self.countries {
            if country.regions.is_empty() {
                return Err(format!("country '{}' has no regions", country.name));
            }
            for region in country.regions {
                if region.districts.is_empty() {
                    return Err(format!(
                        "region '{}/{}' has no districts",
                        country.name, region.name
                    ));
                }
                for district in region.districts {
                    if district.villages.is_empty() {
                        return Err(format!(
                            "district '{}/{}/{}' has no villages",
                            country.name, region.name, district.name
                        ));
                    }
                    if district.villages.iter().any(|v| v.trim().is_empty()) {
                        return Err(format!(
                            "district '{}/{}/{}' has an empty village name",
                            country.name, region.name, district.name
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// The program's distribution footprint.
pub static EAST_AND_WEST_AFRICA: GeoTaxonomy = GeoTaxonomy {
    countries: &[
        Country {
            name: "Uganda",
            regions: &[
                Region {
                    name: "Central",
                    districts: &[
                        District {
                            name: "Wakiso",
                            villages: &["Kira", "Kasangati", "Nansana"],
                        },
                        District {
                            name: "Kampala",
                            villages: &["Makindye", "Kawempe", "Rubaga"],
                        },
                    ],
                },
                Region {
                    name: "Eastern",
                    districts: &[
                        District {
                            name: "Mbale",
                            villages: &["Namatala", "Naboa"],
                        },
                        District {
                            name: "Soroti",
                            villages: &["Arapai", "Katine"],
                        },
                    ],
                },
            ],
        },
        Country {
            name: "Kenya",
            regions: &[
                Region {
                    name: "Nairobi",
                    districts: &[
                        District {
                            name: "Westlands",
                            villages: &["Kangemi", "Kileleshwa"],
                        },
                        District {
                            name: "Kasarani",
                            villages: &["Mwiki", "Garden Estate"],
                        },
                    ],
                },
                Region {
                    name: "Coast",
                    districts: &[
                        District {
                            name: "Mombasa",
                            villages: &["Likoni", "Nyali"],
                        },
                        District {
                            name: "Kwale",
                            villages: &["Diani", "Ukunda"],
                        },
                    ],
                },
            ],
        },
        Country {
            name: "Tanzania",
            regions: &[Region {
                name: "Dar es Salaam",
                districts: &[
                    District {
                        name: "Ilala",
                        villages: &["Kariakoo", "Buguruni"],
                    },
                    District {
                        name: "Kinondoni",
                        villages: &["Mwenge", "Mikocheni"],
                    },
                ],
            }],
        },
        Country {
            name: "Zambia",
            regions: &[Region {
                name: "Lusaka",
                districts: &[District {
                    name: "Lusaka",
                    villages: &["Matero", "Kabwata"],
                }],
            }],
        },
        Country {
            name: "Malawi",
            regions: &[Region {
                name: "Southern",
                districts: &[District {
                    name: "Blantyre",
                    villages: &["Ndirande", "Chilomoni"],
                }],
            }],
        },
        Country {
            name: "Nigeria",
            regions: &[
                Region {
                    name: "South West",
                    districts: &[District {
                        name: "Lagos",
                        villages: &["Ikeja", "Yaba", "Surulere"],
                    }],
                },
                Region {
                    name: "North Central",
                    districts: &[District {
                        name: "Abuja",
                        villages: &["Wuse", "Garki"],
                    }],
                },
            ],
        },
        Country {
            name: "Ghana",
            regions: &[Region {
                name: "Greater Accra",
                districts: &[District {
                    name: "Accra",
                    villages: &["Osu", "Madina", "Kaneshie"],
                }],
            }],
        },
        Country {
            name: "Mozambique",
            regions: &[Region {
                name: "Maputo",
                districts: &[District {
                    name: "Maputo",
                    villages: &["Polana", "Bairro Central"],
                }],
            }],
        },
        Country {
            name: "Cameroon",
            regions: &[Region {
                name: "Centre",
                districts: &[District {
                    name: "Yaoundé",
                    villages: &["Biyem-Assi", "Mvan"],
                }],
            }],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_taxonomy_is_well_formed() {
        EAST_AND_WEST_AFRICA.validate().unwrap();
        assert_eq!(EAST_AND_WEST_AFRICA.countries.len(), 9);
    }

    #[test]
    fn contains_checks_the_full_path() {
        let geo = &EAST_AND_WEST_AFRICA;
        assert!(geo.contains("Kenya", "Coast", "Kwale", "Diani"));
        assert!(!geo.contains("Kenya", "Coast", "Kwale", "Nyali"));
        assert!(!geo.contains("Uganda", "Coast", "Kwale", "Diani"));
        assert!(!geo.contains("Atlantis", "Coast", "Kwale", "Diani"));
    }

    #[test]
    fn validate_rejects_empty_district() {
        static BROKEN: GeoTaxonomy = GeoTaxonomy {
            countries: &[Country {
                name: "Nowhere",
                regions: &[Region {
                    name: "North",
                    districts: &[District {
                        name: "Empty",
                        villages: &[],
                    }],
                }],
            }],
        };
        let err = BROKEN.validate().unwrap_err();
        assert!(err.contains("Nowhere/North/Empty"));
    }
}
