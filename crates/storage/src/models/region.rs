//! Static region hierarchy: world, continents and countries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Result, StorageError};
use crate::models::RecordType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Continent {
    AF,
    AS,
    EU,
    NA,
    OC,
    SA,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Self::AF,
        Self::AS,
        Self::EU,
        Self::NA,
        Self::OC,
        Self::SA,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::AF => "AF",
            Self::AS => "AS",
            Self::EU => "EU",
            Self::NA => "NA",
            Self::OC => "OC",
            Self::SA => "SA",
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Self::AF => RecordType::AfR,
            Self::AS => RecordType::AsR,
            Self::EU => RecordType::ER,
            Self::NA => RecordType::NAR,
            Self::OC => RecordType::OcR,
            Self::SA => RecordType::SAR,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub continent: Continent,
}

const fn country(code: &'static str, continent: Continent) -> Country {
    Country { code, continent }
}

pub static COUNTRIES: &[Country] = &[
    // Africa
    country("DZ", Continent::AF),
    country("AO", Continent::AF),
    country("BJ", Continent::AF),
    country("BW", Continent::AF),
    country("BF", Continent::AF),
    country("CM", Continent::AF),
    country("CD", Continent::AF),
    country("CI", Continent::AF),
    country("EG", Continent::AF),
    country("ET", Continent::AF),
    country("GH", Continent::AF),
    country("KE", Continent::AF),
    country("LY", Continent::AF),
    country("MG", Continent::AF),
    country("MW", Continent::AF),
    country("MU", Continent::AF),
    country("MA", Continent::AF),
    country("MZ", Continent::AF),
    country("NA", Continent::AF),
    country("NG", Continent::AF),
    country("RW", Continent::AF),
    country("SN", Continent::AF),
    country("ZA", Continent::AF),
    country("SD", Continent::AF),
    country("TZ", Continent::AF),
    country("TN", Continent::AF),
    country("UG", Continent::AF),
    country("ZM", Continent::AF),
    country("ZW", Continent::AF),
    // Asia
    country("AF", Continent::AS),
    country("AM", Continent::AS),
    country("AZ", Continent::AS),
    country("BH", Continent::AS),
    country("BD", Continent::AS),
    country("KH", Continent::AS),
    country("CN", Continent::AS),
    country("GE", Continent::AS),
    country("HK", Continent::AS),
    country("IN", Continent::AS),
    country("ID", Continent::AS),
    country("IR", Continent::AS),
    country("IQ", Continent::AS),
    country("IL", Continent::AS),
    country("JP", Continent::AS),
    country("JO", Continent::AS),
    country("KZ", Continent::AS),
    country("KW", Continent::AS),
    country("KG", Continent::AS),
    country("LB", Continent::AS),
    country("MO", Continent::AS),
    country("MY", Continent::AS),
    country("MN", Continent::AS),
    country("MM", Continent::AS),
    country("NP", Continent::AS),
    country("KP", Continent::AS),
    country("OM", Continent::AS),
    country("PK", Continent::AS),
    country("PS", Continent::AS),
    country("PH", Continent::AS),
    country("QA", Continent::AS),
    country("SA", Continent::AS),
    country("SG", Continent::AS),
    country("KR", Continent::AS),
    country("LK", Continent::AS),
    country("SY", Continent::AS),
    country("TW", Continent::AS),
    country("TJ", Continent::AS),
    country("TH", Continent::AS),
    country("TR", Continent::AS),
    country("AE", Continent::AS),
    country("UZ", Continent::AS),
    country("VN", Continent::AS),
    // Europe
    country("AL", Continent::EU),
    country("AD", Continent::EU),
    country("AT", Continent::EU),
    country("BY", Continent::EU),
    country("BE", Continent::EU),
    country("BA", Continent::EU),
    country("BG", Continent::EU),
    country("HR", Continent::EU),
    country("CY", Continent::EU),
    country("CZ", Continent::EU),
    country("DK", Continent::EU),
    country("EE", Continent::EU),
    country("FI", Continent::EU),
    country("FR", Continent::EU),
    country("DE", Continent::EU),
    country("GR", Continent::EU),
    country("HU", Continent::EU),
    country("IS", Continent::EU),
    country("IE", Continent::EU),
    country("IT", Continent::EU),
    country("XK", Continent::EU),
    country("LV", Continent::EU),
    country("LI", Continent::EU),
    country("LT", Continent::EU),
    country("LU", Continent::EU),
    country("MT", Continent::EU),
    country("MD", Continent::EU),
    country("MC", Continent::EU),
    country("ME", Continent::EU),
    country("NL", Continent::EU),
    country("MK", Continent::EU),
    country("NO", Continent::EU),
    country("PL", Continent::EU),
    country("PT", Continent::EU),
    country("RO", Continent::EU),
    country("RU", Continent::EU),
    country("SM", Continent::EU),
    country("RS", Continent::EU),
    country("SK", Continent::EU),
    country("SI", Continent::EU),
    country("ES", Continent::EU),
    country("SE", Continent::EU),
    country("CH", Continent::EU),
    country("UA", Continent::EU),
    country("GB", Continent::EU),
    // North America
    country("BS", Continent::NA),
    country("BB", Continent::NA),
    country("BZ", Continent::NA),
    country("CA", Continent::NA),
    country("CR", Continent::NA),
    country("CU", Continent::NA),
    country("DO", Continent::NA),
    country("SV", Continent::NA),
    country("GT", Continent::NA),
    country("HT", Continent::NA),
    country("HN", Continent::NA),
    country("JM", Continent::NA),
    country("MX", Continent::NA),
    country("NI", Continent::NA),
    country("PA", Continent::NA),
    country("PR", Continent::NA),
    country("TT", Continent::NA),
    country("US", Continent::NA),
    // Oceania
    country("AS", Continent::OC),
    country("AU", Continent::OC),
    country("FJ", Continent::OC),
    country("NZ", Continent::OC),
    country("PG", Continent::OC),
    country("WS", Continent::OC),
    country("TO", Continent::OC),
    // South America
    country("AR", Continent::SA),
    country("BO", Continent::SA),
    country("BR", Continent::SA),
    country("CL", Continent::SA),
    country("CO", Continent::SA),
    country("EC", Continent::SA),
    country("GY", Continent::SA),
    country("PY", Continent::SA),
    country("PE", Continent::SA),
    country("SR", Continent::SA),
    country("UY", Continent::SA),
    country("VE", Continent::SA),
];

pub fn find_country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}

pub fn continent_of(country_code: &str) -> Option<Continent> {
    find_country(country_code).map(|c| c.continent)
}

/// Forces a region code to be read as a country code
pub const COUNTRY_PREFIX: &str = "country:";

/// The geographic scope of a record or of a ranking filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionScope {
    World,
    Continent(Continent),
    Country(&'static Country),
}

impl RegionScope {
    /// Resolves a region code. Continent codes take precedence over country codes,
    /// so "NA" means North America and "country:NA" means Namibia.
    pub fn parse(code: &str) -> Result<Self> {
        if let Some(country_code) = code.strip_prefix(COUNTRY_PREFIX) {
            return find_country(country_code)
                .map(Self::Country)
                .ok_or_else(|| StorageError::InvalidRegion(code.to_string()));
        }

        if let Some(continent) = Continent::from_code(code) {
            return Ok(Self::Continent(continent));
        }

        find_country(code)
            .map(Self::Country)
            .ok_or_else(|| StorageError::InvalidRegion(code.to_string()))
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Self::World => RecordType::WR,
            Self::Continent(continent) => continent.record_type(),
            Self::Country(_) => RecordType::NR,
        }
    }

    pub fn contains(&self, region_code: Option<&str>, super_region_code: Option<&str>) -> bool {
        match self {
            Self::World => true,
            Self::Continent(continent) => super_region_code == Some(continent.code()),
            Self::Country(country) => region_code == Some(country.code),
        }
    }

    /// Record tags that imply holding the record at this scope
    pub fn implied_by(&self) -> Vec<RecordType> {
        match self {
            Self::World => vec![RecordType::WR],
            Self::Continent(continent) => vec![continent.record_type(), RecordType::WR],
            Self::Country(country) => vec![
                RecordType::NR,
                country.continent.record_type(),
                RecordType::WR,
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRegions {
    pub region_code: Option<String>,
    pub super_region_code: Option<String>,
}

/// Derives the region codes of a result from the countries of its participants.
///
/// The country is only set when everyone shares it, and the continent only when
/// every participant's country lies on the same continent.
pub fn derive_result_regions<S: AsRef<str>>(country_codes: &[S]) -> Result<ResultRegions> {
    let countries = country_codes
        .iter()
        .map(|code| {
            find_country(code.as_ref())
                .ok_or_else(|| StorageError::InvalidRegion(code.as_ref().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(first) = countries.first() else {
        return Err(StorageError::InvalidInput(
            "A result must have at least one participant".to_string(),
        ));
    };

    let region_code = countries
        .iter()
        .all(|c| c.code == first.code)
        .then(|| first.code.to_string());
    let super_region_code = countries
        .iter()
        .all(|c| c.continent == first.continent)
        .then(|| first.continent.code().to_string());

    Ok(ResultRegions {
        region_code,
        super_region_code,
    })
}
