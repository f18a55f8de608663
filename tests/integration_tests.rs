// Integration tests for Trailhead

use actix_web::{http::StatusCode, test, web, App};
use std::path::PathBuf;
use trailhead::core::{DestinationIndex, Recommender};
use trailhead::models::{CatalogUpdateResponse, Destination, RecommendResponse};
use trailhead::routes::{configure_routes, AppState};
use trailhead::services::CatalogStore;

fn catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/travel_spots.json")
}

fn load_catalog() -> Vec<Destination> {
    CatalogStore::load(catalog_path()).unwrap().destinations().to_vec()
}

fn recommender() -> Recommender {
    Recommender::with_defaults(load_catalog())
}

fn ids(response: &RecommendResponse) -> Vec<u32> {
    response.recommendations.iter().map(|r| r.id).collect()
}

fn position(response: &RecommendResponse, name: &str) -> usize {
    response
        .recommendations
        .iter()
        .position(|r| r.name == name)
        .unwrap_or_else(|| panic!("{} missing from {:?}", name, ids(response)))
}

#[::std::prelude::v1::test]
fn test_integration_hill_query_prefers_hill_names() {
    let response = recommender().recommend("hill", 10).unwrap();

    let backwaters = position(&response, "Kerala Backwaters");
    let hills = [
        "Manali Hill Station",
        "Ooty Hill Station",
        "Shimla Snow Mountain",
        "Leh Ladakh Mountain",
    ];
    for name in hills {
        assert!(
            position(&response, name) < backwaters,
            "{} should rank above Kerala Backwaters",
            name
        );
    }
}

#[::std::prelude::v1::test]
fn test_integration_cheap_respects_budget_tolerance() {
    let response = recommender().recommend("cheap", 20).unwrap();

    assert!(!response.recommendations.is_empty());
    assert_eq!(response.parsed_constraints.budget_max, Some(3500));
    for rec in &response.recommendations {
        assert!(rec.budget_min <= 4025, "{} starts at {}", rec.name, rec.budget_min);
    }
}

#[::std::prelude::v1::test]
fn test_integration_adventure_duration() {
    let response = recommender().recommend("adventure 4 days", 10).unwrap();

    assert_eq!(response.recommendations[0].name, "Manali Hill Station");
    assert!(position(&response, "Manali Hill Station") < position(&response, "Rishikesh Yoga"));
}

#[::std::prelude::v1::test]
fn test_integration_mood_filter_invariant() {
    let recommender = recommender();

    let queries = [
        "party tonight",
        "spiritual retreat",
        "nature and adventure",
        "cultural heritage walk",
    ];
    for query in queries {
        let response = recommender.recommend(query, 20).unwrap();
        let moods = &response.parsed_constraints.mood;
        assert!(!moods.is_empty(), "{} should carry a mood", query);

        for rec in &response.recommendations {
            assert!(
                rec.moods.iter().any(|m| moods.contains(m)),
                "{} does not share a mood with {:?}",
                rec.name,
                moods
            );
        }
    }
}

#[::std::prelude::v1::test]
fn test_integration_result_count_bounded() {
    let recommender = recommender();

    for top_k in [1, 3, 5, 50] {
        let response = recommender.recommend("relaxing beach", top_k).unwrap();
        assert!(response.recommendations.len() <= top_k as usize);
        assert!(response.recommendations.len() <= response.total_results);
    }
}

#[::std::prelude::v1::test]
fn test_integration_ranks_and_scores() {
    let response = recommender().recommend("cheap nature trip for a weekend", 10).unwrap();

    for (i, rec) in response.recommendations.iter().enumerate() {
        assert_eq!(rec.rank, i + 1);
        assert!((0.0..=1.0).contains(&rec.relevance_score));
    }
    assert!(response
        .recommendations
        .windows(2)
        .all(|w| w[0].relevance_score >= w[1].relevance_score));
}

#[::std::prelude::v1::test]
fn test_integration_deterministic_ordering() {
    let recommender = recommender();

    let query = "relaxing trip under 6000 within 2500 km";
    let first = recommender.recommend(query, 10).unwrap();
    for _ in 0..5 {
        assert_eq!(ids(&recommender.recommend(query, 10).unwrap()), ids(&first));
    }
}

#[::std::prelude::v1::test]
fn test_integration_ranges_with_units() {
    let recommender = recommender();

    let weeks = recommender.recommend("nature trip for 1-2 weeks", 10).unwrap();
    assert_eq!(weeks.parsed_constraints.duration_days, Some(14));
    assert_eq!(weeks.parsed_constraints.budget_range, None);
    assert!(!weeks.recommendations.is_empty());

    let thousands = recommender.recommend("nature 3-5k", 10).unwrap();
    let range = thousands.parsed_constraints.budget_range.unwrap();
    assert_eq!((range.min, range.max), (3000, 5000));
    assert!(!thousands.recommendations.is_empty());

    let people = recommender.recommend("2-3 friends nature trip", 10).unwrap();
    assert_eq!(people.parsed_constraints.budget_range, None);
    assert_eq!(people.parsed_constraints.budget_max, None);
    assert!(!people.recommendations.is_empty());
}

#[::std::prelude::v1::test]
fn test_integration_place_alias_finds_destination() {
    let response = recommender().recommend("kochi", 5).unwrap();
    assert_eq!(response.recommendations[0].name, "Kerala Backwaters");
}

#[::std::prelude::v1::test]
fn test_integration_unrecognized_keyword_falls_back_to_rating() {
    let response = recommender().recommend("xanadu", 14).unwrap();

    assert!(response.parsed_constraints.is_empty());
    assert_eq!(response.recommendations.len(), 14);
    assert!(response
        .recommendations
        .windows(2)
        .all(|w| w[0].rating > w[1].rating || (w[0].rating == w[1].rating && w[0].id < w[1].id)));
}

#[::std::prelude::v1::test]
fn test_integration_empty_catalog() {
    let recommender = Recommender::with_defaults(vec![]);

    for query in ["hill", "cheap", "", "adventure 4 days"] {
        let response = recommender.recommend(query, 5).unwrap();
        assert!(response.recommendations.is_empty());
        assert_eq!(response.total_results, 0);
    }
}

#[::std::prelude::v1::test]
fn test_integration_rebuild_is_idempotent() {
    let catalog = load_catalog();
    assert_eq!(DestinationIndex::build(&catalog), DestinationIndex::build(&catalog));

    let recommender = Recommender::with_defaults(catalog.clone());
    let before = ids(&recommender.recommend("nature", 10).unwrap());
    recommender.rebuild(catalog);
    assert_eq!(ids(&recommender.recommend("nature", 10).unwrap()), before);
}

#[::std::prelude::v1::test]
fn test_integration_queries_during_rebuild() {
    let catalog = load_catalog();
    let recommender = std::sync::Arc::new(Recommender::with_defaults(catalog.clone()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let recommender = std::sync::Arc::clone(&recommender);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let response = recommender.recommend("hill", 5).unwrap();
                    assert!(!response.recommendations.is_empty());
                }
            })
        })
        .collect();

    for _ in 0..20 {
        recommender.rebuild(catalog.clone());
    }

    for reader in readers {
        reader.join().unwrap();
    }
}

#[actix_web::test]
async fn test_integration_catalog_round_trip_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("travel_spots.json");
    std::fs::copy(catalog_path(), &path).unwrap();

    let store = CatalogStore::load(&path).unwrap();
    let recommender = Recommender::with_defaults(store.destinations().to_vec());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(recommender, store, 50)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/destinations")
        .set_json(serde_json::json!({
            "name": "Coorg Coffee Hills",
            "mood": ["nature", "relaxing"],
            "budget_min": 2500,
            "budget_max": 5000,
            "duration_days": 3,
            "distance_km": 350,
            "rating": 4.4,
            "description": "Misty coffee estates and waterfalls"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let added: CatalogUpdateResponse = test::read_body_json(resp).await;
    assert_eq!(added.id, 15);

    // persisted to disk
    assert_eq!(CatalogStore::load(&path).unwrap().len(), 15);

    let req = test::TestRequest::post()
        .uri("/api/v1/recommend")
        .set_json(serde_json::json!({"query": "coffee estates", "top_k": 3}))
        .to_request();
    let body: RecommendResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.recommendations[0].id, 15);

    let req = test::TestRequest::delete().uri("/api/v1/destinations/15").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(CatalogStore::load(&path).unwrap().len(), 14);
}
