//! Simulated social platform providers.
//!
//! The official APIs need per-app approval, so these providers serve static
//! term lists with volumes drawn from platform-specific ranges.

use super::random::RandomSource;
use super::regions::{RegionRange, draw_all};
use super::TrendProvider;
use crate::models::trend::{Platform, RegionBreakdown};
use std::ops::RangeInclusive;
use tracing::debug;

/// Only this many terms of each static list are served.
pub const MAX_SOCIAL_TERMS: usize = 10;

/// Static description of one simulated platform.
#[derive(Debug)]
pub struct SocialProfile {
    pub platform: Platform,
    pub terms: &'static [&'static str],
    pub volume: RangeInclusive<u64>,
    pub regions: &'static [RegionRange],
}

pub static FACEBOOK: SocialProfile = SocialProfile {
    platform: Platform::Facebook,
    terms: &[
        "Black Friday",
        "Natal",
        "Cyber Monday",
        "iPhone 15",
        "WhatsApp",
        "Instagram",
        "TikTok",
        "YouTube",
        "Amazon",
        "Mercado Livre",
        "Shopee",
        "Magazine Luiza",
    ],
    volume: 1000..=50000,
    regions: &[
        ("São Paulo", 15000..=25000),
        ("Rio de Janeiro", 12000..=20000),
        ("Minas Gerais", 10000..=18000),
        ("Bahia", 8000..=15000),
        ("Rio Grande do Sul", 7000..=14000),
    ],
};

pub static INSTAGRAM: SocialProfile = SocialProfile {
    platform: Platform::Instagram,
    terms: &[
        "#blackfriday",
        "#natal2024",
        "#moda",
        "#beleza",
        "#tecnologia",
        "#casa",
        "#decoracao",
        "#fitness",
        "#food",
        "#viagem",
        "#mercadolivre",
        "#afiliados",
    ],
    volume: 500..=30000,
    regions: &[
        ("São Paulo", 8000..=15000),
        ("Rio de Janeiro", 7000..=13000),
        ("Distrito Federal", 5000..=10000),
        ("Santa Catarina", 4000..=8000),
        ("Espírito Santo", 3000..=6000),
    ],
};

pub static TIKTOK: SocialProfile = SocialProfile {
    platform: Platform::TikTok,
    terms: &[
        "viral dance",
        "receitas rapidas",
        "dicas de casa",
        "maquiagem",
        "produtos baratos",
        "gadgets",
        "decoracao",
        "organizacao",
        "DIY",
        "unboxing",
    ],
    volume: 2000..=100_000,
    regions: &[
        ("São Paulo", 20000..=35000),
        ("Rio de Janeiro", 15000..=28000),
        ("Minas Gerais", 12000..=22000),
        ("Paraná", 8000..=15000),
        ("Ceará", 6000..=12000),
    ],
};

pub static YOUTUBE: SocialProfile = SocialProfile {
    platform: Platform::YouTube,
    terms: &[
        "review iPhone 15",
        "unboxing produtos",
        "como usar Air Fryer",
        "teste de produtos",
        "melhores gadgets",
        "review notebook",
        "produtos baratos",
        "ofertas imperdíveis",
        "Black Friday",
        "dicas de compras",
        "analise produtos",
        "tutorial tecnologia",
    ],
    volume: 3000..=80000,
    regions: &[
        ("São Paulo", 25000..=40000),
        ("Rio de Janeiro", 18000..=32000),
        ("Minas Gerais", 15000..=25000),
        ("Rio Grande do Sul", 12000..=20000),
        ("Paraná", 10000..=18000),
    ],
};

pub struct SocialProvider {
    profile: &'static SocialProfile,
    rng: RandomSource,
    credential: Option<String>,
}

impl SocialProvider {
    #[must_use]
    pub fn new(
        profile: &'static SocialProfile,
        rng: RandomSource,
        credential: Option<String>,
    ) -> Self {
        if credential.is_some() {
            debug!(
                platform = %profile.platform,
                "Credential configured; serving simulated data until the platform API is wired in"
            );
        }

        Self {
            profile,
            rng,
            credential,
        }
    }

    #[must_use]
    pub fn facebook(rng: RandomSource, access_token: Option<String>) -> Self {
        Self::new(&FACEBOOK, rng, access_token)
    }

    #[must_use]
    pub fn instagram(rng: RandomSource, access_token: Option<String>) -> Self {
        Self::new(&INSTAGRAM, rng, access_token)
    }

    #[must_use]
    pub fn tiktok(rng: RandomSource, api_key: Option<String>) -> Self {
        Self::new(&TIKTOK, rng, api_key)
    }

    #[must_use]
    pub fn youtube(rng: RandomSource, api_key: Option<String>) -> Self {
        Self::new(&YOUTUBE, rng, api_key)
    }

    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

#[async_trait::async_trait]
impl TrendProvider for SocialProvider {
    fn platform(&self) -> Platform {
        self.profile.platform
    }

    async fn trending_terms(&self) -> Vec<String> {
        self.profile
            .terms
            .iter()
            .take(MAX_SOCIAL_TERMS)
            .map(|t| (*t).to_string())
            .collect()
    }

    async fn volume(&self, _term: &str) -> u64 {
        self.rng.between(self.profile.volume.clone())
    }

    async fn regional_breakdown(&self, _term: &str) -> RegionBreakdown {
        draw_all(self.profile.regions, &self.rng)
    }
}
