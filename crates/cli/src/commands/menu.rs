//! Menu inspection commands.

use std::io::{self, Write};

use cafe_nine_core::catalog::{CategoryFilter, MenuCatalog, MenuCategory, MenuItem};

use super::CliError;

/// Print the built-in menu as YAML, optionally for one category.
///
/// # Errors
///
/// Returns an error for an unknown category or if writing fails.
pub fn list(category: Option<&str>) -> Result<(), CliError> {
    let yaml = render(&MenuCatalog::builtin(), category)?;
    io::stdout().lock().write_all(yaml.as_bytes())?;
    Ok(())
}

fn render(menu: &MenuCatalog, category: Option<&str>) -> Result<String, CliError> {
    let filter = match category {
        None => CategoryFilter::All,
        Some(slug) => slug
            .parse::<MenuCategory>()
            .map(CategoryFilter::Only)
            .map_err(|_| CliError::InvalidCategory(slug.to_owned()))?,
    };
    let items: Vec<&MenuItem> = menu.list(filter).collect();
    Ok(serde_yaml::to_string(&items)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_filters_by_category() {
        let menu = MenuCatalog::builtin();
        let yaml = render(&menu, Some("desserts")).unwrap();
        let items: Vec<MenuItem> = serde_yaml::from_str(&yaml).unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|item| item.category == MenuCategory::Desserts));
    }

    #[test]
    fn test_render_rejects_unknown_category() {
        let err = render(&MenuCatalog::builtin(), Some("brunch")).unwrap_err();
        assert!(matches!(err, CliError::InvalidCategory(slug) if slug == "brunch"));
    }
}
