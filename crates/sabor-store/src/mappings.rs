//! Table layouts for every aggregate.

use rust_decimal::Decimal;
use sabor_core::EntityId;
use sabor_order::domain::aggregates::{Order, OrderStatus, OrderType, PaymentType};
use sabor_restaurant::domain::aggregates::{Menu, MenuItem, Restaurant};
use sabor_table::domain::aggregates::Table;
use sabor_waiter::domain::aggregates::Waiter;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::pg_repository::{ChildTable, PgMapping, PgQuery};

impl PgMapping for Restaurant {
    const TABLE: &'static str = "restaurants";
    const COLUMNS: &'static [&'static str] = &["name", "address", "phone", "website", "logo"];

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.address)
            .bind(&self.phone)
            .bind(self.website.as_deref())
            .bind(self.logo.as_deref())
    }

    fn from_row(row: &PgRow, _children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            website: row.try_get("website")?,
            logo: row.try_get("logo")?,
        })
    }
}

impl PgMapping for Menu {
    const TABLE: &'static str = "menus";
    const COLUMNS: &'static [&'static str] = &["restaurant_id", "name"];
    const PARENT_COLUMN: Option<&'static str> = Some("restaurant_id");

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.restaurant_id).bind(&self.name)
    }

    fn from_row(row: &PgRow, _children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            restaurant_id: row.try_get("restaurant_id")?,
            name: row.try_get("name")?,
        })
    }
}

impl PgMapping for MenuItem {
    const TABLE: &'static str = "menu_items";
    const COLUMNS: &'static [&'static str] = &["menu_id", "name", "price", "preparation_time"];
    const PARENT_COLUMN: Option<&'static str> = Some("menu_id");

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.menu_id)
            .bind(&self.name)
            .bind(self.price)
            .bind(self.preparation_time)
    }

    fn from_row(row: &PgRow, _children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            menu_id: row.try_get("menu_id")?,
            name: row.try_get("name")?,
            price: row.try_get::<Decimal, _>("price")?,
            preparation_time: row.try_get("preparation_time")?,
        })
    }
}

impl PgMapping for Table {
    const TABLE: &'static str = "dining_tables";
    const COLUMNS: &'static [&'static str] = &["restaurant_id", "table_identifier"];
    const PARENT_COLUMN: Option<&'static str> = Some("restaurant_id");
    const CHILDREN: Option<ChildTable> = Some(ChildTable {
        table: "table_waiters",
        owner_column: "table_id",
        value_column: "waiter_id",
    });

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.restaurant_id).bind(&self.table_identifier)
    }

    fn from_row(row: &PgRow, children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            restaurant_id: row.try_get("restaurant_id")?,
            table_identifier: row.try_get("table_identifier")?,
            waiters_id: children.into_iter().collect(),
        })
    }

    fn child_ids(&self) -> Vec<EntityId> {
        self.waiters_id.iter().copied().collect()
    }
}

impl PgMapping for Waiter {
    const TABLE: &'static str = "waiters";
    const COLUMNS: &'static [&'static str] =
        &["restaurant_id", "firstname", "lastname", "phone", "email"];
    const PARENT_COLUMN: Option<&'static str> = Some("restaurant_id");
    const CHILDREN: Option<ChildTable> = Some(ChildTable {
        table: "waiter_tables",
        owner_column: "waiter_id",
        value_column: "table_id",
    });

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.restaurant_id)
            .bind(&self.firstname)
            .bind(&self.lastname)
            .bind(&self.phone)
            .bind(self.email.as_deref())
    }

    fn from_row(row: &PgRow, children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            restaurant_id: row.try_get("restaurant_id")?,
            firstname: row.try_get("firstname")?,
            lastname: row.try_get("lastname")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            tables_id: children.into_iter().collect(),
        })
    }

    fn child_ids(&self) -> Vec<EntityId> {
        self.tables_id.iter().copied().collect()
    }
}

impl PgMapping for Order {
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static [&'static str] = &[
        "restaurant_id",
        "table_id",
        "waiter_id",
        "price",
        "order_type",
        "payment_type",
        "order_status",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("restaurant_id");
    const CHILDREN: Option<ChildTable> = Some(ChildTable {
        table: "order_items",
        owner_column: "order_id",
        value_column: "menu_item_id",
    });

    fn bind_fields<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.restaurant_id)
            .bind(self.table_id)
            .bind(self.waiter_id)
            .bind(self.price)
            .bind(self.order_type.as_str())
            .bind(self.payment_type.as_str())
            .bind(self.order_status.as_str())
    }

    fn from_row(row: &PgRow, children: Vec<EntityId>) -> Result<Self, sqlx::Error> {
        Ok(Self {
            restaurant_id: row.try_get("restaurant_id")?,
            table_id: row.try_get("table_id")?,
            waiter_id: row.try_get("waiter_id")?,
            items_id: children,
            price: row.try_get("price")?,
            order_type: parse_column::<OrderType>(row, "order_type")?,
            payment_type: parse_column::<PaymentType>(row, "payment_type")?,
            order_status: parse_column::<OrderStatus>(row, "order_status")?,
        })
    }

    fn child_ids(&self) -> Vec<EntityId> {
        self.items_id.clone()
    }
}

fn parse_column<E>(row: &PgRow, column: &str) -> Result<E, sqlx::Error>
where
    E: std::str::FromStr,
    E::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.try_get(column)?;
    text.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_owned(),
        source: Box::new(e),
    })
}
