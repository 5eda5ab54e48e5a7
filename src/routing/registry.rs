//! Curated slug registry and URL resolution.
//!
//! DESIGN
//! ======
//! Slugs, once issued, must never change: external links and favorites point
//! at them. The registry therefore takes precedence over algorithmic
//! normalization. `resolve_slug` consults the curated table first and only
//! falls back to [`slugify`] for unregistered names, so a later change to the
//! normalization rules cannot move an already-published URL.
//!
//! Collisions are rejected at construction time. Two businesses may normalize
//! to the same slug ("Kigali Movers" vs "Kigali  Movers!"), and the registry
//! refuses to be built in that state rather than letting one entry shadow the
//! other at lookup time.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::routing::slug::slugify;

// =============================================================================
// CATEGORIES
// =============================================================================

/// Service categories recognized by the directory.
///
/// `Uncategorized` is the explicit stand-in for businesses with no registry
/// entry; its path segment is the literal `business`, which is what
/// unregistered URLs are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Construction,
    Plumbing,
    Electrical,
    Cleaning,
    RealEstate,
    Moving,
    Painting,
    Landscaping,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Construction,
        Category::Plumbing,
        Category::Electrical,
        Category::Cleaning,
        Category::RealEstate,
        Category::Moving,
        Category::Painting,
        Category::Landscaping,
        Category::Uncategorized,
    ];

    /// URL path segment for this category, e.g. `real-estate` in
    /// `/real-estate/isoko-real-estate`.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Category::Construction => "construction",
            Category::Plumbing => "plumbing",
            Category::Electrical => "electrical",
            Category::Cleaning => "cleaning",
            Category::RealEstate => "real-estate",
            Category::Moving => "moving",
            Category::Painting => "painting",
            Category::Landscaping => "landscaping",
            Category::Uncategorized => "business",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Construction => "Construction",
            Category::Plumbing => "Plumbing",
            Category::Electrical => "Electrical",
            Category::Cleaning => "Cleaning",
            Category::RealEstate => "Real Estate",
            Category::Moving => "Moving",
            Category::Painting => "Painting",
            Category::Landscaping => "Landscaping",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when parsing a category from user input fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses the URL path segment form, case-insensitively. `business`
    /// parses to `Uncategorized`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.path_segment() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// One curated mapping from display name to issued slug and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessSlugEntry {
    pub name: String,
    pub slug: String,
    pub category: Category,
}

impl BusinessSlugEntry {
    #[must_use]
    pub fn new(name: &str, slug: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            category,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate business name in registry: {name:?}")]
    DuplicateName { name: String },

    #[error("slug {slug:?} issued to both {first:?} and {second:?}")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },

    #[error("slug {slug:?} for {name:?} is not a normalized slug")]
    MalformedSlug { name: String, slug: String },
}

/// The curated name → slug → category lookup table.
///
/// Lookups by name are exact. Reverse lookups by slug return the registered
/// display name or `None`; absence is a value, not an error, because callers
/// routinely probe for it (404 handling).
#[derive(Debug, Clone)]
pub struct SlugRegistry {
    entries: Vec<BusinessSlugEntry>,
    by_name: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

/// Issued slugs for the seeded directory. A few entries deliberately differ
/// from what `slugify` would produce today ("Amahoro Plumbing Services" kept
/// its original short slug through a rename), which is exactly the stability
/// the override table exists to preserve.
const BUILTIN: &[(&str, &str, Category)] = &[
    ("Kigali Construction Ltd.", "kigali-construction-ltd", Category::Construction),
    ("Amahoro Plumbing Services", "amahoro-plumbing", Category::Plumbing),
    ("Umucyo Electricals", "umucyo-electricals", Category::Electrical),
    ("Isoko Real Estate", "isoko-real-estate", Category::RealEstate),
    ("Gasabo Cleaning Co.", "gasabo-cleaning", Category::Cleaning),
    ("Thousand Hills Movers", "thousand-hills-movers", Category::Moving),
    ("Nyarugenge Painters", "nyarugenge-painters", Category::Painting),
    ("Green Hills Landscaping", "green-hills-landscaping", Category::Landscaping),
    ("Kigali Heights Realty", "kigali-heights-realty", Category::RealEstate),
    ("Huye Quick Fix Plumbing", "huye-quick-fix-plumbing", Category::Plumbing),
];

impl SlugRegistry {
    /// Builds a registry, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if two entries share a display
    /// name, `RegistryError::SlugCollision` if two entries share a slug, and
    /// `RegistryError::MalformedSlug` if an entry's slug is empty or not in
    /// normalized form (an already-normalized slug is a fixed point of
    /// `slugify`).
    pub fn from_entries(entries: Vec<BusinessSlugEntry>) -> Result<Self, RegistryError> {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_slug: HashMap<String, usize> = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.slug.is_empty() || entry.slug != slugify(&entry.slug) {
                return Err(RegistryError::MalformedSlug {
                    name: entry.name.clone(),
                    slug: entry.slug.clone(),
                });
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(RegistryError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
            if let Some(&first) = by_slug.get(&entry.slug) {
                return Err(RegistryError::SlugCollision {
                    slug: entry.slug.clone(),
                    first: entries[first].name.clone(),
                    second: entry.name.clone(),
                });
            }
            by_slug.insert(entry.slug.clone(), idx);
        }

        Ok(Self {
            entries,
            by_name,
            by_slug,
        })
    }

    /// The curated table for the seeded Rwandan directory.
    ///
    /// # Panics
    ///
    /// Panics if the builtin table itself is invalid; a unit test pins it.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(name, slug, category)| BusinessSlugEntry::new(name, slug, category))
            .collect();
        Self::from_entries(entries).expect("builtin slug table is unique and normalized")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &BusinessSlugEntry> {
        self.entries.iter()
    }

    /// Exact-name lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BusinessSlugEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// Slug for a business name: the issued slug when registered, otherwise
    /// `slugify(name)`.
    #[must_use]
    pub fn resolve_slug(&self, name: &str) -> String {
        self.get(name)
            .map_or_else(|| slugify(name), |entry| entry.slug.clone())
    }

    /// Reverse lookup: registered display name for a slug.
    #[must_use]
    pub fn resolve_name(&self, slug: &str) -> Option<&str> {
        self.by_slug
            .get(slug)
            .map(|&idx| self.entries[idx].name.as_str())
    }

    /// Category for a business name; `Uncategorized` when unregistered.
    #[must_use]
    pub fn resolve_category(&self, name: &str) -> Category {
        self.get(name)
            .map_or(Category::Uncategorized, |entry| entry.category)
    }

    /// Canonical URL path for a business name: `/{category}/{slug}`.
    ///
    /// Unregistered names land under the `business` segment with a derived
    /// slug. Deterministic for a given name.
    #[must_use]
    pub fn resolve_url(&self, name: &str) -> String {
        format!(
            "/{}/{}",
            self.resolve_category(name).path_segment(),
            self.resolve_slug(name)
        )
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
