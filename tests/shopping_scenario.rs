use chrono::NaiveDate;
use shoptrack::{BoughtFlag, DbError, LoggingSettings, StoreSettings, init_tracing, open_store};
use tempfile::TempDir;

#[tokio::test]
async fn test_alice_buys_a_widget() -> anyhow::Result<()> {
    // Another test binary may already own the global subscriber.
    let _ = init_tracing(&LoggingSettings::default());

    let dir = TempDir::new()?;
    let repo = open_store(&StoreSettings::at(dir.path().join("database.db"))).await?;

    let alice = repo.create_new_user(None, "alice").await?;
    assert_eq!(alice.id, 1);
    assert_eq!(alice.to_string(), "User #1 alice");

    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let mut widget = repo.create_new("Widget", 9.99, date, &alice, 5).await?;
    assert_eq!(widget.id, 1);
    assert_eq!(widget.bought, BoughtFlag::Unbought);

    repo.buy(&mut widget).await?;
    assert_eq!(repo.get_product(1).await?.bought, BoughtFlag::Bought);
    assert!(matches!(repo.buy(&mut widget).await, Err(DbError::AlreadyBought)));

    assert_eq!(repo.list_products(alice.id, Some(true)).await?, vec![widget]);
    Ok(())
}

#[tokio::test]
async fn test_reopening_keeps_data() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let settings = StoreSettings::at(dir.path().join("database.db"));

    let user_id = {
        let repo = open_store(&settings).await?;
        let bob = repo.create_root_user("bob").await?;
        repo.create_new("Lamp", 20.0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), &bob, 3)
            .await?;
        repo.pool().close().await;
        bob.id
    };

    // Migrations are idempotent on an existing store.
    let repo = open_store(&settings).await?;
    let bob = repo.get_user(user_id).await?;
    assert_eq!(repo.list_products(bob.id, Some(false)).await?.len(), 1);
    assert!(matches!(
        repo.delete_user_bought_products(&bob).await,
        Err(DbError::NoProductsDeleted(_))
    ));
    Ok(())
}
