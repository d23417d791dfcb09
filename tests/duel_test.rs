//! Duel integration tests

use std::sync::Arc;
use value_screen::duel::{Criterion, DuelComparator, DuelError, DuelSide};
use value_screen::pipeline::Pipeline;
use value_screen::quote::InMemoryProvider;
use value_screen::security::Normalizer;

fn comparator() -> DuelComparator {
    let provider = InMemoryProvider::from_json(include_str!("fixtures/quotes.json")).unwrap();
    DuelComparator::new(Pipeline::new(Arc::new(provider), Normalizer::default()))
}

#[tokio::test]
async fn test_duel_by_company_name() {
    let report = comparator().duel("coca cola", "pepsi").await.unwrap();

    assert_eq!(report.symbol_a, "KO");
    assert_eq!(report.symbol_b, "PEP");
    assert_eq!(report.points_a, 3);
    assert_eq!(report.points_b, 1);
    assert_eq!(report.verdict, DuelSide::A);
    assert_eq!(report.verdict_name(), "The Coca-Cola Company");
    assert_eq!(
        report.row(Criterion::DividendYield).unwrap().winner,
        Some(DuelSide::B)
    );
}

#[tokio::test]
async fn test_duel_reversed_sides() {
    let report = comparator().duel("PEP", "KO").await.unwrap();
    assert_eq!(report.points_a, 1);
    assert_eq!(report.points_b, 3);
    assert_eq!(report.verdict, DuelSide::B);
    assert_eq!(report.verdict_name(), "The Coca-Cola Company");
}

#[tokio::test]
async fn test_duel_self_goes_to_b() {
    let report = comparator().duel("KO", "KO").await.unwrap();
    assert_eq!(report.points_a, 0);
    assert_eq!(report.verdict, DuelSide::B);
}

#[tokio::test]
async fn test_duel_without_price_fails() {
    let err = comparator().duel("KO", "DELISTED").await.unwrap_err();
    assert_eq!(err, DuelError::QuoteUnavailable("DELISTED".to_string()));
}
