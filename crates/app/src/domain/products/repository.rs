//! Products Repository

use std::collections::BTreeMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json,
};

use crate::domain::products::{
    data::{NewProduct, ProductUpdate, StockAdjustment},
    records::{Category, InventoryStats, LOW_STOCK_THRESHOLD, ProductRecord, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const ADJUST_STOCK_SQL: &str = include_str!("sql/adjust_stock.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const CLEAR_PRODUCTS_SQL: &str = include_str!("sql/clear_products.sql");
const INVENTORY_STATS_SQL: &str = include_str!("sql/inventory_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<Category>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category.map(Category::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        new: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(new.name)
            .bind(new.category.as_str())
            .bind(new.brand)
            .bind(new.description)
            .bind(new.specs.map(Json))
            .bind(price_to_db(new.price)?)
            .bind(i64::from(new.stock))
            .bind(new.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price = update.price.map(price_to_db).transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.category.map(Category::as_str))
            .bind(update.brand)
            .bind(update.description)
            .bind(update.specs.map(Json))
            .bind(price)
            .bind(update.stock.map(i64::from))
            .bind(update.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        adjustment: StockAdjustment,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(ADJUST_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(adjustment.action())
            .bind(i64::from(adjustment.quantity()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_PRODUCTS_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn inventory_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<InventoryStats, sqlx::Error> {
        let row = query(INVENTORY_STATS_SQL)
            .bind(i64::from(LOW_STOCK_THRESHOLD))
            .fetch_one(&mut **tx)
            .await?;

        Ok(InventoryStats {
            count: count_column(&row, "count")?,
            total_stock: count_column(&row, "total_stock")?,
            low_stock: count_column(&row, "low_stock")?,
            out_of_stock: count_column(&row, "out_of_stock")?,
            categories: count_column(&row, "categories")?,
        })
    }
}

fn price_to_db(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

fn count_column(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let stock_i64: i64 = row.try_get("stock")?;

        let stock = u32::try_from(stock_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        let category: String = row.try_get("category")?;

        let category = category
            .parse::<Category>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: Box::new(e),
            })?;

        let specs: Option<Json<BTreeMap<String, String>>> = row.try_get("specs")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category,
            brand: row.try_get("brand")?,
            description: row.try_get("description")?,
            specs: specs.map(|Json(specs)| specs),
            price,
            stock,
            image: row.try_get("image")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
