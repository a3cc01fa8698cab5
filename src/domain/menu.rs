use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::cart::check_money;
use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Dessert,
    Drinks,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Starter => "starter",
            Category::Main => "main",
            Category::Dessert => "dessert",
            Category::Drinks => "drinks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Category::Starter),
            "main" => Ok(Category::Main),
            "dessert" => Ok(Category::Dessert),
            "drinks" => Ok(Category::Drinks),
            other => Err(DomainError::Internal(format!(
                "unknown menu category '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub category: Category,
    pub price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

/// Full record used for both create and update; there is no partial patch.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemInput {
    pub name: String,
    pub category: Category,
    pub price: BigDecimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl MenuItemInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid("Menu item name is required."));
        }
        if self.price <= BigDecimal::from(0) {
            return Err(DomainError::invalid("Price must be greater than zero."));
        }
        check_money(&self.price, "Price")?;
        Ok(())
    }
}

impl From<&MenuItem> for MenuItemInput {
    fn from(item: &MenuItem) -> Self {
        MenuItemInput {
            name: item.name.clone(),
            category: item.category,
            price: item.price.clone(),
            is_available: item.is_available,
            image_url: item.image_url.clone(),
        }
    }
}
