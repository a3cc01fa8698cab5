use diesel::prelude::*;

use crate::db::Storage;
use crate::domain::errors::DomainError;
use crate::domain::menu::{MenuItem, MenuItemInput};
use crate::domain::ports::MenuRepository;
use crate::schema::menu_items;

use super::models::{MenuItemRow, MenuItemValues};

pub struct DieselMenuRepository {
    storage: Storage,
}

impl DieselMenuRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl MenuRepository for DieselMenuRepository {
    fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let mut conn = self.storage.connection()?;

        menu_items::table
            .order(menu_items::item_id.asc())
            .select(MenuItemRow::as_select())
            .load::<MenuItemRow>(&mut conn)?
            .into_iter()
            .map(MenuItem::try_from)
            .collect()
    }

    fn find_by_id(&self, id: i32) -> Result<Option<MenuItem>, DomainError> {
        let mut conn = self.storage.connection()?;

        menu_items::table
            .find(id)
            .select(MenuItemRow::as_select())
            .first::<MenuItemRow>(&mut conn)
            .optional()?
            .map(MenuItem::try_from)
            .transpose()
    }

    fn insert(&self, item: &MenuItemInput) -> Result<i32, DomainError> {
        let mut conn = self.storage.connection()?;

        let id = diesel::insert_into(menu_items::table)
            .values(&MenuItemValues::from(item))
            .returning(menu_items::item_id)
            .get_result::<i32>(&mut conn)?;

        Ok(id)
    }

    fn update(&self, id: i32, item: &MenuItemInput) -> Result<bool, DomainError> {
        let mut conn = self.storage.connection()?;

        let updated = diesel::update(menu_items::table.find(id))
            .set(&MenuItemValues::from(item))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.storage.connection()?;

        let deleted = diesel::delete(menu_items::table.find(id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::DieselMenuRepository;
    use crate::domain::menu::{Category, MenuItemInput};
    use crate::domain::ports::MenuRepository;
    use crate::infrastructure::test_support::setup_db;

    fn soup() -> MenuItemInput {
        MenuItemInput {
            name: "Lentil soup".to_string(),
            category: Category::Starter,
            price: BigDecimal::from_str("6.25").expect("valid decimal"),
            is_available: true,
            image_url: Some("https://example.com/soup.png".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn update_replaces_every_field() {
        let (_container, storage) = setup_db().await;
        let repo = DieselMenuRepository::new(storage);
        let id = repo.insert(&soup()).expect("insert failed");

        let mut replacement = soup();
        replacement.category = Category::Main;
        replacement.is_available = false;
        replacement.image_url = None;
        assert!(repo.update(id, &replacement).expect("update failed"));

        let stored = repo
            .find_by_id(id)
            .expect("query failed")
            .expect("item should exist");
        assert_eq!(stored.category, Category::Main);
        assert!(!stored.is_available);
        assert_eq!(stored.image_url, None);
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn update_and_delete_report_unknown_ids() {
        let (_container, storage) = setup_db().await;
        let repo = DieselMenuRepository::new(storage);

        assert!(!repo.update(999, &soup()).expect("update failed"));
        assert!(!repo.delete(999).expect("delete failed"));
    }
}
