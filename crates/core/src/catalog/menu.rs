//! Menu items, categories, and admin menu management.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::CartCandidate;
use crate::types::{MenuItemId, Price};

/// Errors returned by [`MenuCatalog`] edits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MenuError {
    /// No item with this id.
    #[error("menu item not found: {0}")]
    NotFound(MenuItemId),

    /// The item name is empty after trimming.
    #[error("menu item name cannot be empty")]
    EmptyName,
}

/// Menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory {
    Appetizers,
    Mains,
    Desserts,
    Beverages,
    Bar,
}

impl MenuCategory {
    /// Every category, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Appetizers,
        Self::Mains,
        Self::Desserts,
        Self::Beverages,
        Self::Bar,
    ];

    /// URL/form value, e.g. `mains`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Appetizers => "appetizers",
            Self::Mains => "mains",
            Self::Desserts => "desserts",
            Self::Beverages => "beverages",
            Self::Bar => "bar",
        }
    }

    /// Heading shown on the menu page.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::Mains => "Main Course",
            Self::Desserts => "Desserts",
            Self::Beverages => "Beverages",
            Self::Bar => "Bar Menu",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| format!("invalid menu category: {s}"))
    }
}

/// Category filter for the menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MenuCategory),
}

impl CategoryFilter {
    /// Parse a `?category=` value. Missing, `all`, and unknown values show
    /// the whole menu.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<MenuCategory>().ok())
            .map_or(Self::All, Self::Only)
    }

    #[must_use]
    pub fn matches(self, category: MenuCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
        }
    }
}

/// Dietary tag shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl Dietary {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
        }
    }
}

/// Guest rating out of 5, stored in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Build from tenths of a star, capped at 5.0.
    #[must_use]
    pub const fn from_tenths(tenths: u8) -> Self {
        if tenths > 50 { Self(50) } else { Self(tenths) }
    }

    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: MenuCategory,
    /// `None` for dishes added through the admin screen until they are rated.
    pub rating: Option<Rating>,
    #[serde(default)]
    pub dietary: Vec<Dietary>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub available: bool,
}

impl MenuItem {
    /// The `{id, name, price, image}` snapshot handed to the cart.
    #[must_use]
    pub fn cart_candidate(&self) -> CartCandidate {
        CartCandidate::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.image.clone(),
        )
    }
}

/// Editable fields of a menu item, as submitted by the admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: MenuCategory,
    pub image: String,
    pub available: bool,
}

impl MenuDraft {
    fn validated(self) -> Result<Self, MenuError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(MenuError::EmptyName);
        }
        Ok(Self {
            name,
            description: self.description.trim().to_owned(),
            image: self.image.trim().to_owned(),
            ..self
        })
    }
}

/// The live menu, in display order.
///
/// Starts from the built-in catalog and is edited in place by the admin
/// screen. Nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
    #[serde(default)]
    featured: Vec<MenuItemId>,
}

impl MenuCatalog {
    /// Build a catalog from items and the ids featured on the home page.
    #[must_use]
    pub const fn new(items: Vec<MenuItem>, featured: Vec<MenuItemId>) -> Self {
        Self { items, featured }
    }

    /// The built-in Cafe Nine menu.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(
            builtin_items(),
            vec![MenuItemId::new("3"), MenuItemId::new("4"), MenuItemId::new("5")],
        )
    }

    /// Every item, including unavailable ones, filtered by category.
    pub fn list(&self, filter: CategoryFilter) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| filter.matches(item.category))
    }

    /// Items a shopper may order, filtered by category.
    pub fn available(&self, filter: CategoryFilter) -> impl Iterator<Item = &MenuItem> {
        self.list(filter).filter(|item| item.available)
    }

    /// Available featured dishes, in featured order.
    pub fn featured(&self) -> impl Iterator<Item = &MenuItem> {
        self.featured
            .iter()
            .filter_map(|id| self.get(id))
            .filter(|item| item.available)
    }

    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a new dish at the end of the menu with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::EmptyName`] if the name is blank.
    pub fn create(&mut self, draft: MenuDraft) -> Result<MenuItem, MenuError> {
        let draft = draft.validated()?;
        let item = MenuItem {
            id: MenuItemId::new(Uuid::new_v4().to_string()),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            category: draft.category,
            rating: None,
            dietary: Vec::new(),
            ingredients: Vec::new(),
            available: draft.available,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replace the editable fields of an existing dish.
    ///
    /// Rating, dietary tags, and ingredients are kept.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] for an unknown id and
    /// [`MenuError::EmptyName`] if the name is blank.
    pub fn update(&mut self, id: &MenuItemId, draft: MenuDraft) -> Result<MenuItem, MenuError> {
        let draft = draft.validated()?;
        let item = self.get_mut(id)?;
        item.name = draft.name;
        item.description = draft.description;
        item.price = draft.price;
        item.image = draft.image;
        item.category = draft.category;
        item.available = draft.available;
        Ok(item.clone())
    }

    /// Remove a dish from the menu.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &MenuItemId) -> Result<MenuItem, MenuError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| MenuError::NotFound(id.clone()))?;
        self.featured.retain(|featured| featured != id);
        Ok(self.items.remove(index))
    }

    /// Flip a dish between available and unavailable, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] for an unknown id.
    pub fn toggle_availability(&mut self, id: &MenuItemId) -> Result<bool, MenuError> {
        let item = self.get_mut(id)?;
        item.available = !item.available;
        Ok(item.available)
    }

    fn get_mut(&mut self, id: &MenuItemId) -> Result<&mut MenuItem, MenuError> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| MenuError::NotFound(id.clone()))
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    name: &str,
    description: &str,
    dollars: u32,
    photo: &str,
    category: MenuCategory,
    rating_tenths: u8,
    dietary: &[Dietary],
    ingredients: &[&str],
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_whole(dollars),
        image: format!("https://images.unsplash.com/{photo}?w=800"),
        category,
        rating: Some(Rating::from_tenths(rating_tenths)),
        dietary: dietary.to_vec(),
        ingredients: ingredients.iter().map(|&s| s.to_owned()).collect(),
        available: true,
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_items() -> Vec<MenuItem> {
    use Dietary::{GlutenFree, Vegan, Vegetarian};
    use MenuCategory::{Appetizers, Bar, Beverages, Desserts, Mains};

    vec![
        dish(
            "1",
            "Caesar Salad Supreme",
            "Crisp romaine lettuce with parmesan, croutons, and house Caesar dressing",
            14,
            "photo-1546793665-c74683f339c1",
            Appetizers,
            46,
            &[Vegetarian],
            &["Romaine lettuce", "Parmesan", "Croutons", "Caesar dressing"],
        ),
        dish(
            "2",
            "Truffle Mushroom Soup",
            "Creamy wild mushroom soup infused with black truffle oil",
            16,
            "photo-1547592166-23ac45744acd",
            Appetizers,
            48,
            &[Vegetarian, GlutenFree],
            &["Wild mushrooms", "Truffle oil", "Cream", "Fresh herbs"],
        ),
        dish(
            "3",
            "Grilled Atlantic Salmon",
            "Fresh salmon fillet with lemon butter sauce and seasonal vegetables",
            32,
            "photo-1485921325833-c519f76c4927",
            Mains,
            48,
            &[GlutenFree],
            &["Atlantic salmon", "Lemon butter", "Seasonal vegetables", "Herbs"],
        ),
        dish(
            "4",
            "Wagyu Beef Steak",
            "Premium Japanese wagyu with truffle mash and red wine reduction",
            68,
            "photo-1544025162-d76694265947",
            Mains,
            49,
            &[GlutenFree],
            &["Wagyu beef", "Truffle mash", "Red wine sauce", "Asparagus"],
        ),
        dish(
            "5",
            "Lobster Risotto",
            "Creamy arborio rice with fresh Maine lobster and saffron",
            45,
            "photo-1534939268298-e7dfc30c00ad",
            Mains,
            47,
            &[GlutenFree],
            &["Maine lobster", "Arborio rice", "Saffron", "Parmesan"],
        ),
        dish(
            "6",
            "Vegan Buddha Bowl",
            "Quinoa, roasted vegetables, avocado, and tahini dressing",
            22,
            "photo-1546069901-ba9599a7e63c",
            Mains,
            45,
            &[Vegan, GlutenFree],
            &["Quinoa", "Mixed vegetables", "Avocado", "Tahini"],
        ),
        dish(
            "7",
            "Chocolate Lava Cake",
            "Warm chocolate cake with molten center, vanilla ice cream",
            12,
            "photo-1624353365286-3f8d62daad51",
            Desserts,
            49,
            &[Vegetarian],
            &["Dark chocolate", "Butter", "Eggs", "Vanilla ice cream"],
        ),
        dish(
            "8",
            "Tiramisu",
            "Classic Italian dessert with espresso-soaked ladyfingers",
            11,
            "photo-1571877227200-a0d98ea607e9",
            Desserts,
            47,
            &[Vegetarian],
            &["Mascarpone", "Espresso", "Ladyfingers", "Cocoa"],
        ),
        dish(
            "9",
            "Artisan Coffee",
            "Single-origin espresso prepared by our master barista",
            5,
            "photo-1511920170033-f8396924c348",
            Beverages,
            48,
            &[Vegan, GlutenFree],
            &["Single-origin coffee beans"],
        ),
        dish(
            "10",
            "French Champagne",
            "Premium vintage champagne from Reims",
            85,
            "photo-1547595628-c61a29f496f0",
            Bar,
            49,
            &[Vegan, GlutenFree],
            &["Champagne grapes", "Aged to perfection"],
        ),
    ]
}
