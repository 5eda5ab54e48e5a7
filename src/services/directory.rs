//! Provider directory: the sample catalog and its listing logic.
//!
//! DESIGN
//! ======
//! The catalog is a static in-memory array; search is a pure filter-and-sort
//! over it. Ratings are clamped into `0.0..=5.0` at seed time, so every sort
//! comparison is total without a NaN case. Catalog names line up with the
//! slug registry, which is what keeps directory listings and canonical URLs
//! pointing at the same businesses.

use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

use crate::routing::registry::{Category, SlugRegistry};
use crate::routing::slug::slugify;

// =============================================================================
// CATALOG TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub district: String,
    pub rating: f32,
    pub review_count: u32,
    pub verified: bool,
    pub services: Vec<String>,
}

/// Listing order. Rating and reviews sort descending, name ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Rating,
    Reviews,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0} (expected rating, reviews, or name)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "reviews" => Ok(SortKey::Reviews),
            "name" => Ok(SortKey::Name),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Search criteria. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Case-insensitive substring match against name and offered services.
    pub query: Option<String>,
    pub category: Option<Category>,
    /// Case-insensitive exact district match.
    pub district: Option<String>,
    pub verified_only: bool,
    pub min_rating: Option<f32>,
    pub sort: SortKey,
}

// =============================================================================
// SEED DATA
// =============================================================================

fn provider(
    id: u128,
    name: &str,
    category: Category,
    district: &str,
    rating: f32,
    review_count: u32,
    verified: bool,
    services: &[&str],
) -> ServiceProvider {
    ServiceProvider {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        category,
        district: district.to_string(),
        rating: rating.clamp(0.0, 5.0),
        review_count,
        verified,
        services: services.iter().map(|&s| s.to_string()).collect(),
    }
}

/// The sample catalog. Names match the curated slug registry.
#[must_use]
pub fn seed_providers() -> Vec<ServiceProvider> {
    vec![
        provider(
            1,
            "Kigali Construction Ltd.",
            Category::Construction,
            "Gasabo",
            4.6,
            128,
            true,
            &["house construction", "renovation", "roofing"],
        ),
        provider(
            2,
            "Amahoro Plumbing Services",
            Category::Plumbing,
            "Nyarugenge",
            4.2,
            57,
            true,
            &["pipe repair", "drainage", "water heaters"],
        ),
        provider(
            3,
            "Umucyo Electricals",
            Category::Electrical,
            "Kicukiro",
            4.8,
            203,
            true,
            &["wiring", "solar installation", "generator maintenance"],
        ),
        provider(
            4,
            "Isoko Real Estate",
            Category::RealEstate,
            "Gasabo",
            4.0,
            89,
            true,
            &["property sales", "rentals", "valuation"],
        ),
        provider(
            5,
            "Gasabo Cleaning Co.",
            Category::Cleaning,
            "Gasabo",
            3.9,
            41,
            false,
            &["office cleaning", "deep cleaning", "move-out cleaning"],
        ),
        provider(
            6,
            "Thousand Hills Movers",
            Category::Moving,
            "Kicukiro",
            4.4,
            76,
            true,
            &["home moving", "office relocation", "packing"],
        ),
        provider(
            7,
            "Nyarugenge Painters",
            Category::Painting,
            "Nyarugenge",
            3.6,
            22,
            false,
            &["interior painting", "exterior painting"],
        ),
        provider(
            8,
            "Green Hills Landscaping",
            Category::Landscaping,
            "Musanze",
            4.1,
            34,
            true,
            &["garden design", "lawn care", "irrigation"],
        ),
        provider(
            9,
            "Kigali Heights Realty",
            Category::RealEstate,
            "Nyarugenge",
            4.5,
            150,
            true,
            &["apartment rentals", "property management"],
        ),
        provider(
            10,
            "Huye Quick Fix Plumbing",
            Category::Plumbing,
            "Huye",
            3.2,
            12,
            false,
            &["pipe repair", "emergency callout"],
        ),
    ]
}

// =============================================================================
// SEARCH
// =============================================================================

fn matches(provider: &ServiceProvider, filter: &SearchFilter) -> bool {
    if let Some(query) = &filter.query {
        let needle = query.trim().to_lowercase();
        if !needle.is_empty() {
            let in_name = provider.name.to_lowercase().contains(&needle);
            let in_services = provider
                .services
                .iter()
                .any(|service| service.to_lowercase().contains(&needle));
            if !in_name && !in_services {
                return false;
            }
        }
    }
    if let Some(category) = filter.category {
        if provider.category != category {
            return false;
        }
    }
    if let Some(district) = &filter.district {
        if !provider.district.eq_ignore_ascii_case(district.trim()) {
            return false;
        }
    }
    if filter.verified_only && !provider.verified {
        return false;
    }
    if let Some(min_rating) = filter.min_rating {
        if provider.rating < min_rating {
            return false;
        }
    }
    true
}

/// Filters and orders the catalog. The sort is stable, so providers tying on
/// the sort key keep their catalog order.
#[must_use]
pub fn search<'a>(
    providers: &'a [ServiceProvider],
    filter: &SearchFilter,
) -> Vec<&'a ServiceProvider> {
    let mut hits: Vec<&ServiceProvider> =
        providers.iter().filter(|p| matches(p, filter)).collect();

    match filter.sort {
        SortKey::Rating => hits.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Reviews => hits.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortKey::Name => hits.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }

    hits
}

/// Looks a provider up by URL slug: registered names first, then slugs
/// derived from unregistered catalog names.
#[must_use]
pub fn find_by_slug<'a>(
    providers: &'a [ServiceProvider],
    registry: &SlugRegistry,
    slug: &str,
) -> Option<&'a ServiceProvider> {
    if let Some(name) = registry.resolve_name(slug) {
        return providers.iter().find(|p| p.name == name);
    }
    providers.iter().find(|p| slugify(&p.name) == slug)
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
