use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::menu::{MenuItem, MenuItemInput};
use crate::domain::ports::MenuRepository;

fn item_not_found(id: i32) -> DomainError {
    DomainError::not_found(format!("Menu item {id} not found"))
}

/// Catalog of purchasable items. Updates replace the whole record and the
/// last write wins.
#[derive(Clone)]
pub struct MenuStore {
    menu: Arc<dyn MenuRepository>,
}

impl MenuStore {
    pub fn new(menu: Arc<dyn MenuRepository>) -> Self {
        Self { menu }
    }

    pub fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.menu.list()
    }

    pub fn get(&self, id: i32) -> Result<MenuItem, DomainError> {
        self.menu.find_by_id(id)?.ok_or_else(|| item_not_found(id))
    }

    pub fn create(&self, item: &MenuItemInput) -> Result<i32, DomainError> {
        item.validate()?;
        let id = self.menu.insert(item)?;
        log::info!("Added menu item {} '{}'", id, item.name);
        Ok(id)
    }

    pub fn update(&self, id: i32, item: &MenuItemInput) -> Result<(), DomainError> {
        item.validate()?;
        if !self.menu.update(id, item)? {
            return Err(item_not_found(id));
        }
        log::info!("Updated menu item {}", id);
        Ok(())
    }

    pub fn delete(&self, id: i32) -> Result<(), DomainError> {
        if !self.menu.delete(id)? {
            return Err(item_not_found(id));
        }
        log::info!("Deleted menu item {}", id);
        Ok(())
    }

    /// Flip `is_available` and write the full record back. Other fields are
    /// written as read here, so a concurrent edit in between is lost.
    pub fn toggle_availability(&self, id: i32) -> Result<MenuItem, DomainError> {
        let mut item = self.get(id)?;
        item.is_available = !item.is_available;
        if !self.menu.update(id, &MenuItemInput::from(&item))? {
            return Err(item_not_found(id));
        }
        log::info!("Menu item {} is_available = {}", id, item.is_available);
        Ok(item)
    }
}
