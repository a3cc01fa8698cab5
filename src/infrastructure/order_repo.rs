use diesel::prelude::*;

use crate::db::Storage;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderItemView, OrderListEntry, OrderView};
use crate::domain::ports::OrderRepository;
use crate::schema::{customers, menu_items, order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderRow};

fn to_entry((row, customer_name): (OrderRow, Option<String>)) -> Result<OrderListEntry, DomainError> {
    Ok(OrderListEntry {
        order: OrderView::try_from(row)?,
        customer_name,
    })
}

pub struct DieselOrderRepository {
    storage: Storage,
}

impl DieselOrderRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn insert_order(&self, order: &NewOrder) -> Result<i32, DomainError> {
        let mut conn = self.storage.connection()?;

        // order_date_time is filled in by the database.
        let id = diesel::insert_into(orders::table)
            .values(&NewOrderRow::from(order))
            .returning(orders::order_id)
            .get_result::<i32>(&mut conn)?;

        Ok(id)
    }

    fn insert_item(&self, order_id: i32, item_id: i32, quantity: i32) -> Result<(), DomainError> {
        let mut conn = self.storage.connection()?;

        diesel::insert_into(order_items::table)
            .values(&NewOrderItemRow {
                order_id,
                item_id,
                quantity,
            })
            .execute(&mut conn)?;

        Ok(())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderListEntry>, DomainError> {
        let mut conn = self.storage.connection()?;

        orders::table
            .left_join(customers::table)
            .filter(orders::order_id.eq(id))
            .select((OrderRow::as_select(), customers::name.nullable()))
            .first::<(OrderRow, Option<String>)>(&mut conn)
            .optional()?
            .map(to_entry)
            .transpose()
    }

    fn items(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        let mut conn = self.storage.connection()?;

        let rows = order_items::table
            .left_join(menu_items::table)
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::item_id.asc())
            .select((
                order_items::item_id,
                menu_items::name.nullable(),
                order_items::quantity,
            ))
            .load::<(i32, Option<String>, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(item_id, name, quantity)| OrderItemView {
                item_id,
                name,
                quantity,
            })
            .collect())
    }

    fn list_with_customer(&self) -> Result<Vec<OrderListEntry>, DomainError> {
        let mut conn = self.storage.connection()?;

        orders::table
            .left_join(customers::table)
            .order((orders::order_date_time.desc(), orders::order_id.desc()))
            .select((OrderRow::as_select(), customers::name.nullable()))
            .load::<(OrderRow, Option<String>)>(&mut conn)?
            .into_iter()
            .map(to_entry)
            .collect()
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.storage.connection()?;

        orders::table
            .filter(orders::customer_id.eq(customer_id))
            .order((orders::order_date_time.desc(), orders::order_id.desc()))
            .select(OrderRow::as_select())
            .load::<OrderRow>(&mut conn)?
            .into_iter()
            .map(OrderView::try_from)
            .collect()
    }
}
