//! Integration tests for the Tag <-> POI association

mod common;

use common::setup;
use poi_tags::models::poi;
use poi_tags::models::tag::NewTag;
use poi_tags::store::poi_tags as links;
use poi_tags::store::tags;

fn named(name: &str) -> NewTag {
    NewTag {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_link_is_many_to_many() {
    let db = setup().await;
    poi::ensure(&db, 10).await.unwrap();
    poi::ensure(&db, 20).await.unwrap();
    let food = tags::create(&db, &named("Food")).await.unwrap();
    let view = tags::create(&db, &named("View")).await.unwrap();

    assert!(links::link(&db, food.id, 10).await.unwrap());
    assert!(links::link(&db, food.id, 20).await.unwrap());
    assert!(links::link(&db, view.id, 10).await.unwrap());

    assert_eq!(links::pois_for_tag(&db, food.id).await.unwrap(), vec![10, 20]);
    let tagged = links::tags_for_poi(&db, 10).await.unwrap();
    let names: Vec<&str> = tagged.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec!["Food", "View"]);
    assert!(tagged.iter().all(|t| t.image.is_none()));
}

#[tokio::test]
async fn test_linking_same_pair_twice_stores_one_row() {
    let db = setup().await;
    poi::ensure(&db, 1).await.unwrap();
    let tag = tags::create(&db, &named("Park")).await.unwrap();

    assert!(links::link(&db, tag.id, 1).await.unwrap());
    assert!(!links::link(&db, tag.id, 1).await.unwrap());
    assert_eq!(links::pois_for_tag(&db, tag.id).await.unwrap(), vec![1]);
}

#[tokio::test]
async fn test_concurrent_links_of_same_pair_insert_once() {
    let db = setup().await;
    poi::ensure(&db, 1).await.unwrap();
    let tag = tags::create(&db, &named("Cafe")).await.unwrap();

    for _ in 0..20 {
        links::unlink(&db, tag.id, 1).await.unwrap();
        let (a, b) = tokio::join!(links::link(&db, tag.id, 1), links::link(&db, tag.id, 1));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(a ^ b, "exactly one call should insert");
    }
    assert_eq!(links::pois_for_tag(&db, tag.id).await.unwrap(), vec![1]);
}

#[tokio::test]
async fn test_unlink_removes_only_that_pair() {
    let db = setup().await;
    poi::ensure(&db, 1).await.unwrap();
    poi::ensure(&db, 2).await.unwrap();
    let tag = tags::create(&db, &named("Shop")).await.unwrap();
    links::link(&db, tag.id, 1).await.unwrap();
    links::link(&db, tag.id, 2).await.unwrap();

    assert!(links::unlink(&db, tag.id, 1).await.unwrap());
    assert!(!links::unlink(&db, tag.id, 1).await.unwrap());
    assert_eq!(links::pois_for_tag(&db, tag.id).await.unwrap(), vec![2]);
}

#[tokio::test]
async fn test_deleting_tag_cascades_to_join_rows() {
    let db = setup().await;
    poi::ensure(&db, 5).await.unwrap();
    let tag = tags::create(&db, &named("Beach")).await.unwrap();
    links::link(&db, tag.id, 5).await.unwrap();

    tags::delete(&db, tag.id).await.unwrap();

    assert!(links::tags_for_poi(&db, 5).await.unwrap().is_empty());
    assert!(links::pois_for_tag(&db, tag.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ensure_poi_is_idempotent() {
    let db = setup().await;

    let (a, b) = tokio::join!(poi::ensure(&db, 3), poi::ensure(&db, 3));
    assert!(a.unwrap() ^ b.unwrap());
    assert!(!poi::ensure(&db, 3).await.unwrap());
}
