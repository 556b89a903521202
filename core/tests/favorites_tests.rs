// tests/favorites_tests.rs

mod common;

use common::*;
use serial_test::serial;
use storefront::models::FavoriteList;
use storefront::{FavoritesStore, MutationOutcome};

fn store() -> (std::sync::Arc<MockBackend>, FavoritesStore) {
  let backend = MockBackend::with_catalog(grocery_catalog());
  let favorites = FavoritesStore::new(backend.clone());
  (backend, favorites)
}

async fn store_with_list(name: &str) -> (std::sync::Arc<MockBackend>, FavoritesStore, i64) {
  let (backend, favorites) = store();
  backend.favorites.lock().push(FavoriteList {
    id: 1,
    name: name.to_string(),
    favorites: Vec::new(),
  });
  favorites.fetch().await.expect("fetch lists");
  (backend, favorites, 1)
}

#[tokio::test]
#[serial]
async fn new_list_appears_with_a_temporary_negative_id() {
  setup_tracing();
  let (backend, favorites) = store();
  backend.gate("create_favorite_list");

  let task = {
    let favorites = favorites.clone();
    tokio::spawn(async move { favorites.create_list("Despensa").await })
  };
  backend.seen.notified().await;

  let lists = favorites.lists();
  assert_eq!(lists.len(), 1);
  assert!(lists[0].id < 0);
  assert!(lists[0].is_optimistic());
  assert_eq!(lists[0].name, "Despensa");

  backend.release.notify_one();
  assert_eq!(task.await.expect("task completes"), MutationOutcome::Confirmed);

  let lists = favorites.lists();
  assert_eq!(lists.len(), 1);
  assert!(lists[0].id > 0, "temporary id replaced by the server id");
  assert_eq!(lists[0].name, "Despensa");
}

#[tokio::test]
#[serial]
async fn failed_create_removes_the_temporary_list() {
  setup_tracing();
  let (backend, favorites) = store();
  backend.fail("create_favorite_list");

  let outcome = favorites.create_list("Despensa").await;

  assert!(matches!(outcome, MutationOutcome::Reverted(_)));
  assert!(favorites.lists().is_empty());
}

#[tokio::test]
#[serial]
async fn blank_list_name_is_rejected() {
  setup_tracing();
  let (backend, favorites) = store();

  let outcome = favorites.create_list("   ").await;

  assert!(matches!(outcome, MutationOutcome::Rejected(_)));
  assert_eq!(backend.calls_to("create_favorite_list"), 0);
}

#[tokio::test]
#[serial]
async fn temporary_ids_are_distinct() {
  setup_tracing();
  let (backend, favorites) = store();
  backend.fail("create_favorite_list");
  backend.gate("create_favorite_list");

  let first = {
    let favorites = favorites.clone();
    tokio::spawn(async move { favorites.create_list("Uno").await })
  };
  backend.seen.notified().await;
  let second = {
    let favorites = favorites.clone();
    tokio::spawn(async move { favorites.create_list("Dos").await })
  };
  backend.seen.notified().await;

  let ids: Vec<i64> = favorites.lists().iter().map(|l| l.id).collect();
  assert_eq!(ids.len(), 2);
  assert!(ids.iter().all(|id| *id < 0));
  assert_ne!(ids[0], ids[1]);

  backend.release.notify_one();
  backend.release.notify_one();
  first.await.expect("first completes");
  second.await.expect("second completes");
}

#[tokio::test]
#[serial]
async fn add_product_marks_it_favorite_and_refetches() {
  setup_tracing();
  let (backend, favorites, list_id) = store_with_list("Despensa").await;
  let rice = grocery_catalog().remove(1);

  let outcome = favorites.add_product(list_id, &rice).await;

  assert!(outcome.ok());
  assert!(favorites.is_favorite(rice.id));
  let list = favorites.list(list_id).expect("list");
  assert_eq!(list.favorites.len(), 1);
  assert!(list.favorites[0].id > 0);
  assert!(list.favorites[0].product.favorite);
  assert_eq!(backend.calls_to("list_favorites"), 2);
}

#[tokio::test]
#[serial]
async fn add_product_twice_is_rejected() {
  setup_tracing();
  let (backend, favorites, list_id) = store_with_list("Despensa").await;
  let rice = grocery_catalog().remove(1);
  assert!(favorites.add_product(list_id, &rice).await.ok());

  let outcome = favorites.add_product(list_id, &rice).await;

  assert!(matches!(outcome, MutationOutcome::Rejected(_)));
  assert_eq!(backend.calls_to("add_favorite"), 1);
}

#[tokio::test]
#[serial]
async fn failed_add_product_rolls_back() {
  setup_tracing();
  let (backend, favorites, list_id) = store_with_list("Despensa").await;
  backend.fail("add_favorite");

  let outcome = favorites.add_product(list_id, &grocery_catalog().remove(0)).await;

  assert!(matches!(outcome, MutationOutcome::Reverted(_)));
  assert!(favorites.list(list_id).expect("list").favorites.is_empty());
}

#[tokio::test]
#[serial]
async fn mutations_on_unconfirmed_lists_are_rejected() {
  setup_tracing();
  let (backend, favorites) = store();
  backend.gate("create_favorite_list");

  let task = {
    let favorites = favorites.clone();
    tokio::spawn(async move { favorites.create_list("Pendiente").await })
  };
  backend.seen.notified().await;
  let temp_id = favorites.lists()[0].id;

  let outcome = favorites.add_product(temp_id, &grocery_catalog().remove(0)).await;
  assert!(matches!(outcome, MutationOutcome::Rejected(_)));
  assert!(matches!(favorites.delete_list(temp_id).await, MutationOutcome::Rejected(_)));

  backend.release.notify_one();
  assert!(task.await.expect("task completes").ok());
}

#[tokio::test]
#[serial]
async fn rename_and_delete_roll_back_on_failure() {
  setup_tracing();
  let (backend, favorites, list_id) = store_with_list("Despensa").await;

  backend.fail("rename_favorite_list");
  assert!(!favorites.rename_list(list_id, "Once").await.ok());
  assert_eq!(favorites.list(list_id).map(|l| l.name), Some("Despensa".to_string()));

  backend.recover("rename_favorite_list");
  assert!(favorites.rename_list(list_id, "Once").await.ok());
  assert_eq!(favorites.list(list_id).map(|l| l.name), Some("Once".to_string()));

  backend.fail("delete_favorite_list");
  assert!(!favorites.delete_list(list_id).await.ok());
  assert!(favorites.list(list_id).is_some());

  backend.recover("delete_favorite_list");
  assert!(favorites.delete_list(list_id).await.ok());
  assert!(favorites.lists().is_empty());
}

#[tokio::test]
#[serial]
async fn remove_product_drops_the_entry() {
  setup_tracing();
  let (_backend, favorites, list_id) = store_with_list("Despensa").await;
  let oil = grocery_catalog().remove(0);
  assert!(favorites.add_product(list_id, &oil).await.ok());

  assert!(favorites.remove_product(list_id, oil.id).await.ok());
  assert!(!favorites.is_favorite(oil.id));

  let outcome = favorites.remove_product(list_id, oil.id).await;
  assert!(matches!(outcome, MutationOutcome::Rejected(_)));
}

fn list(id: i64, name: &str) -> FavoriteList {
  FavoriteList {
    id,
    name: name.to_string(),
    favorites: Vec::new(),
  }
}

#[tokio::test]
#[serial]
async fn failed_rename_does_not_bring_back_a_list_deleted_meanwhile() {
  setup_tracing();
  let (backend, favorites) = store();
  backend.favorites.lock().extend([list(101, "Despensa"), list(102, "Aseo")]);
  favorites.fetch().await.expect("fetch lists");
  backend.fail("rename_favorite_list");
  backend.gate("rename_favorite_list");

  let rename = {
    let favorites = favorites.clone();
    tokio::spawn(async move { favorites.rename_list(101, "Once").await })
  };
  backend.seen.notified().await;
  assert_eq!(favorites.list(101).map(|l| l.name), Some("Once".to_string()));

  assert_eq!(favorites.delete_list(102).await, MutationOutcome::Confirmed);
  backend.release.notify_one();
  assert!(matches!(rename.await.expect("task completes"), MutationOutcome::Reverted(_)));

  let ids: Vec<i64> = favorites.lists().iter().map(|l| l.id).collect();
  assert_eq!(ids, vec![101]);
  assert_eq!(favorites.list(101).map(|l| l.name), Some("Despensa".to_string()));
  assert!(!favorites.is_stale());
}

#[tokio::test]
#[serial]
async fn failed_refetch_after_a_revert_marks_lists_stale() {
  setup_tracing();
  let (backend, favorites, list_id) = store_with_list("Despensa").await;
  backend.fail("delete_favorite_list");
  backend.fail("list_favorites");

  assert!(!favorites.delete_list(list_id).await.ok());
  assert!(favorites.list(list_id).is_some());
  assert!(favorites.is_stale());

  backend.recover("list_favorites");
  favorites.fetch().await.expect("refetch");
  assert!(!favorites.is_stale());
}
