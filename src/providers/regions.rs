//! Region tables backing the simulated provider data.

use super::random::RandomSource;
use crate::models::trend::RegionBreakdown;
use std::ops::RangeInclusive;

/// How many regions a breakdown keeps.
pub const TOP_REGIONS: usize = 5;

/// A region and the inclusive range its simulated value is drawn from.
pub type RegionRange = (&'static str, RangeInclusive<u64>);

/// Brazilian states weighted by population and economy, used when the
/// search-trends service has no regional data for a term.
pub const BRAZILIAN_STATES: [RegionRange; 27] = [
    ("São Paulo", 80..=100),
    ("Rio de Janeiro", 60..=85),
    ("Minas Gerais", 55..=80),
    ("Rio Grande do Sul", 45..=70),
    ("Paraná", 40..=65),
    ("Bahia", 35..=60),
    ("Santa Catarina", 35..=55),
    ("Goiás", 30..=50),
    ("Pernambuco", 25..=45),
    ("Ceará", 20..=40),
    ("Pará", 18..=35),
    ("Maranhão", 15..=30),
    ("Paraíba", 12..=25),
    ("Mato Grosso", 15..=30),
    ("Distrito Federal", 40..=60),
    ("Alagoas", 10..=20),
    ("Piauí", 8..=18),
    ("Rio Grande do Norte", 12..=22),
    ("Sergipe", 8..=16),
    ("Espírito Santo", 25..=40),
    ("Mato Grosso do Sul", 15..=28),
    ("Rondônia", 10..=20),
    ("Acre", 5..=12),
    ("Amazonas", 12..=25),
    ("Roraima", 3..=8),
    ("Amapá", 3..=8),
    ("Tocantins", 8..=15),
];

/// Range for `region` in `table`, if listed.
#[must_use]
pub fn range_for<'a>(table: &'a [RegionRange], region: &str) -> Option<&'a RangeInclusive<u64>> {
    table
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, range)| range)
}

/// Draws a value for every region and keeps them in table order.
#[must_use]
pub fn draw_all(table: &[RegionRange], rng: &RandomSource) -> RegionBreakdown {
    table
        .iter()
        .map(|(name, range)| ((*name).to_string(), rng.between(range.clone())))
        .collect()
}

/// Draws a value for every region and keeps the `TOP_REGIONS` highest.
/// Ties keep table order.
#[must_use]
pub fn draw_top(table: &[RegionRange], rng: &RandomSource) -> RegionBreakdown {
    let mut weights: Vec<(String, u64)> = draw_all(table, rng)
        .iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    weights.sort_by(|a, b| b.1.cmp(&a.1));
    weights.into_iter().take(TOP_REGIONS).collect()
}
