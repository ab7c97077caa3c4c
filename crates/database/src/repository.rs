use crate::DbError;
use chrono::NaiveDate;
use core_types::{BoughtFlag, Product, ProductFilter, Rating, User};
use sqlx::sqlite::SqlitePool;

const PRODUCT_COLUMNS: &str = "id, name, price, bought, user_id, rating";

/// The `DbRepository` provides a high-level, application-specific interface
/// to the store. It encapsulates all SQL queries and data access logic.
///
/// Every method acquires a single pooled connection, runs its statement on it
/// and returns the connection to the pool when the method exits, on success
/// and on error alike.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` over a caller-owned connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==========================================================================
    // Users
    // ==========================================================================

    /// Inserts a user referred by `referrer` (or by nobody) and returns it with
    /// the store-assigned id. Names are not required to be unique.
    pub async fn create_new_user(&self, referrer: Option<&User>, name: &str) -> Result<User, DbError> {
        let master = referrer.map(|r| r.id);
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query("INSERT INTO users (name, master) VALUES (?, ?)")
            .bind(name)
            .bind(master)
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        tracing::info!(user_id = id, ?master, "Created user '{}'", name);
        Ok(User {
            id,
            name: name.to_string(),
            master,
        })
    }

    /// Inserts a user with no referrer.
    pub async fn create_root_user(&self, name: &str) -> Result<User, DbError> {
        self.create_new_user(None, name).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DbError> {
        let mut conn = self.pool.acquire().await?;
        let user = sqlx::query_as::<_, User>("SELECT id, name, master FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        tracing::debug!(user_id = id, found = user.is_some(), "Looked up user");
        user.ok_or(DbError::NotFound)
    }

    /// Deletes every product owned by `user`, returning how many were removed.
    ///
    /// Fails with `NoProductsDeleted` when the user owned nothing.
    pub async fn delete_all_products(&self, user: &User) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        let removed = sqlx::query("DELETE FROM products WHERE user_id = ?")
            .bind(user.id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::NoProductsDeleted(
                "You do not have any products registered at the moment".to_string(),
            ));
        }

        tracing::info!(user_id = user.id, removed, "Deleted all products");
        Ok(removed)
    }

    /// Deletes the products `user` has already bought.
    pub async fn delete_user_bought_products(&self, user: &User) -> Result<u64, DbError> {
        self.delete_bought_products(user.id).await
    }

    // ==========================================================================
    // Products
    // ==========================================================================

    /// Inserts an unbought product owned by `user` and returns it with the
    /// store-assigned id.
    ///
    /// `date` is only reported in the confirmation event; the schema has no
    /// column for it.
    pub async fn create_new(
        &self,
        title: &str,
        price: f64,
        date: NaiveDate,
        user: &User,
        rating: i64,
    ) -> Result<Product, DbError> {
        let rating = Rating::new(rating)?;
        let mut conn = self.pool.acquire().await?;

        let id = sqlx::query("INSERT INTO products (name, price, user_id, rating) VALUES (?, ?, ?, ?)")
            .bind(title)
            .bind(price)
            .bind(user.id)
            .bind(rating.value())
            .execute(&mut *conn)
            .await?
            .last_insert_rowid();

        tracing::info!(product_id = id, user_id = user.id, %date, "Product '{}' added successfully with ID {}.", title, id);
        Ok(Product {
            id,
            name: title.to_string(),
            price,
            bought: BoughtFlag::Unbought,
            user_id: user.id,
            rating: rating.value(),
        })
    }

    /// Looks a product up by id. Use this to confirm a product exists before
    /// acting on it.
    pub async fn get_product(&self, id: i64) -> Result<Product, DbError> {
        let mut conn = self.pool.acquire().await?;
        let product = sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        tracing::debug!(product_id = id, found = product.is_some(), "Looked up product");
        product.ok_or(DbError::NotFound)
    }

    /// Removes `product` from the store. Returns `NotFound` if no row had its id.
    pub async fn delete_product(&self, product: &Product) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        let removed = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product.id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::NotFound);
        }

        tracing::info!(product_id = product.id, "Deleted product");
        Ok(())
    }

    /// Deletes every bought product owned by `user_id`, returning how many were removed.
    ///
    /// Fails with `NoProductsDeleted` when nothing matched.
    pub async fn delete_bought_products(&self, user_id: i64) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;
        let removed = sqlx::query("DELETE FROM products WHERE user_id = ? AND bought = ?")
            .bind(user_id)
            .bind(BoughtFlag::Bought)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::NoProductsDeleted(
                "You do not have any bought products registered at the moment".to_string(),
            ));
        }

        tracing::info!(user_id, removed, "Deleted bought products");
        Ok(removed)
    }

    /// Sets a new rating in the store, then on `product`.
    ///
    /// Scores outside `1..=10` are rejected before touching the store.
    pub async fn change_rating(&self, product: &mut Product, new_score: i64) -> Result<(), DbError> {
        let rating = Rating::new(new_score)?;
        let mut conn = self.pool.acquire().await?;

        let updated = sqlx::query("UPDATE products SET rating = ? WHERE id = ?")
            .bind(rating.value())
            .bind(product.id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(DbError::NotFound);
        }

        tracing::debug!(product_id = product.id, old = product.rating, new = rating.value(), "Changed rating");
        product.rating = rating.value();
        Ok(())
    }

    /// Marks `product` as bought, in the store and in memory.
    ///
    /// Buying is one-way: a product already bought (according to either the
    /// in-memory flag or the store) fails with `AlreadyBought`.
    pub async fn buy(&self, product: &mut Product) -> Result<(), DbError> {
        if product.bought.is_bought() {
            return Err(DbError::AlreadyBought);
        }

        let mut conn = self.pool.acquire().await?;
        let updated = sqlx::query("UPDATE products SET bought = ? WHERE id = ? AND bought = ?")
            .bind(BoughtFlag::Bought)
            .bind(product.id)
            .bind(BoughtFlag::Unbought)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        if updated == 0 {
            // Either the row is gone or `product` was a stale copy.
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
                .bind(product.id)
                .fetch_one(&mut *conn)
                .await?;
            if exists == 0 {
                return Err(DbError::NotFound);
            }
            product.bought = BoughtFlag::Bought;
            return Err(DbError::AlreadyBought);
        }

        tracing::info!(product_id = product.id, "Bought product");
        product.bought = BoughtFlag::Bought;
        Ok(())
    }

    /// Lists products by bought flag.
    ///
    /// With `Some(flag)` only `user_id`'s products in that state are returned.
    /// With `None` every product in the store is returned and `user_id` is not
    /// consulted; use [`DbRepository::list_user_products`] for one user's full list.
    pub async fn list_products(&self, user_id: i64, bought: Option<bool>) -> Result<Vec<Product>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let products = match ProductFilter::from(bought).flag() {
            None => {
                sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"))
                    .fetch_all(&mut *conn)
                    .await?
            }
            Some(flag) => {
                sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE user_id = ? AND bought = ? ORDER BY id ASC"
                ))
                .bind(user_id)
                .bind(flag)
                .fetch_all(&mut *conn)
                .await?
            }
        };

        tracing::debug!(user_id, ?bought, count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists every product owned by `user_id`, bought or not.
    pub async fn list_user_products(&self, user_id: i64) -> Result<Vec<Product>, DbError> {
        let mut conn = self.pool.acquire().await?;
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE user_id = ? ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        tracing::debug!(user_id, count = products.len(), "Listed user products");
        Ok(products)
    }
}
