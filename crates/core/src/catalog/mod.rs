//! Static catalog data consumed by the site.
//!
//! The menu, locations, and marketing copy live here once instead of being
//! repeated in every page. Pages read from a [`Catalog`]; the cart only ever
//! sees the [`crate::CartCandidate`] snapshot a [`MenuItem`] produces.

mod content;
mod locations;
mod menu;

pub use content::{BrandValue, Faq, TeamMember, Testimonial};
pub use locations::Location;
pub use menu::{
    CategoryFilter, Dietary, MenuCatalog, MenuCategory, MenuDraft, MenuError, MenuItem, Rating,
};

/// Everything the site displays that is not shopper state.
///
/// The menu is mutable through the admin screen; the rest is read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub menu: MenuCatalog,
    pub locations: Vec<Location>,
    pub testimonials: Vec<Testimonial>,
    pub faqs: Vec<Faq>,
    pub team: Vec<TeamMember>,
    pub values: Vec<BrandValue>,
}

impl Catalog {
    /// The built-in Cafe Nine catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            menu: MenuCatalog::builtin(),
            locations: locations::builtin_locations(),
            testimonials: content::builtin_testimonials(),
            faqs: content::builtin_faqs(),
            team: content::builtin_team(),
            values: content::builtin_values(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_populated() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.menu.len(), 10);
        assert_eq!(catalog.locations.len(), 3);
        assert_eq!(catalog.testimonials.len(), 3);
        assert_eq!(catalog.faqs.len(), 4);
        assert_eq!(catalog.team.len(), 3);
        assert_eq!(catalog.values.len(), 4);
    }
}
