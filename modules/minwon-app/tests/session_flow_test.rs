//! Session dispatch boundary tests.
//!
//! These verify the controller contract end to end against mock
//! collaborators: cache lifecycle, reload-after-write, the degraded
//! session-only mode, and the one-way like/resolve semantics.

use std::sync::Arc;

use chrono::NaiveDate;
use minwon_common::{Category, Complaint, GeoPoint, Status};
use minwon_app::testing::{FailingStore, FlakyStore, MemoryStore, MockGeocoder};
use minwon_app::{
    Action, ComplaintDraft, ComplaintStore, Mode, Outcome, Session, Severity, ValidationError,
};

fn seed_complaint(title: &str, likes: u32) -> Complaint {
    let mut c = Complaint::new(
        title.to_string(),
        "Something needs fixing.".to_string(),
        Category::Facilities,
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        GeoPoint { lat: 37.55, lng: 126.99 },
        Some("Kim Soo".to_string()),
    );
    c.like_count = likes;
    c
}

fn draft(title: &str, content: &str) -> ComplaintDraft {
    ComplaintDraft {
        title: title.to_string(),
        content: content.to_string(),
        category: Category::Traffic,
        date: NaiveDate::from_ymd_opt(2024, 4, 11).unwrap(),
        author: None,
    }
}

async fn session_with(store: Arc<dyn ComplaintStore>) -> Session {
    Session::start(Some(store), Arc::new(MockGeocoder::new("Sejong-daero 110"))).await
}

// =========================================================================
// Session start
// =========================================================================

#[tokio::test]
async fn start_populates_cache_from_store() {
    let store = Arc::new(MemoryStore::with_rows(vec![seed_complaint("A", 0)]));
    let session = session_with(store).await;
    assert!(session.durable());
    assert_eq!(session.complaints().len(), 1);
}

#[tokio::test]
async fn start_with_unreachable_store_is_empty_and_not_durable() {
    let mut session = session_with(Arc::new(FailingStore)).await;
    assert!(!session.durable());
    assert!(session.complaints().is_empty());
    let notices = session.take_notices();
    assert!(notices.iter().any(|n| n.severity == Severity::Warning));
}

#[tokio::test]
async fn start_without_store_warns_about_session_only_mode() {
    let mut session =
        Session::start(None, Arc::new(MockGeocoder::new("Sejong-daero 110"))).await;
    assert!(!session.durable());
    assert!(!session.take_notices().is_empty());
}

// =========================================================================
// Map interaction
// =========================================================================

#[tokio::test]
async fn map_click_selects_and_resolves_address() {
    let geocoder = Arc::new(MockGeocoder::new("Sejong-daero 110"));
    let mut session = Session::start(None, geocoder.clone()).await;

    let outcome = session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;
    match outcome {
        Outcome::Selected { point, address } => {
            assert_eq!(point, GeoPoint { lat: 37.5, lng: 127.0 });
            assert_eq!(address, "Sejong-daero 110");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.map().center, GeoPoint { lat: 37.5, lng: 127.0 });
    assert_eq!(geocoder.calls(), 1);
}

#[tokio::test]
async fn clicking_the_same_spot_does_not_re_geocode() {
    let geocoder = Arc::new(MockGeocoder::new("Sejong-daero 110"));
    let mut session = Session::start(None, geocoder.clone()).await;

    session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;
    let second = session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;
    assert!(matches!(second, Outcome::SelectionUnchanged));
    assert_eq!(geocoder.calls(), 1);

    session.dispatch(Action::MapClicked { lat: 37.51, lng: 127.0 }).await;
    assert_eq!(geocoder.calls(), 2);
}

// =========================================================================
// Submission
// =========================================================================

#[tokio::test]
async fn accepted_submission_is_appended_and_reloaded() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(store.clone()).await;

    session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;
    let outcome = session.dispatch(Action::Submit(draft("Pothole", "Deep pothole."))).await;

    match outcome {
        Outcome::Submitted { durable, .. } => assert!(durable),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.complaints().len(), 1);
    assert_eq!(session.complaints()[0].coordinates, Some(GeoPoint { lat: 37.5, lng: 127.0 }));
    assert_eq!(session.complaints()[0].status, Status::Unresolved);
}

#[tokio::test]
async fn rejected_submission_reports_every_violation_and_changes_nothing() {
    let mut session = session_with(Arc::new(MemoryStore::new())).await;

    let outcome = session.dispatch(Action::Submit(draft("", ""))).await;
    match outcome {
        Outcome::Rejected(errors) => {
            assert_eq!(
                errors,
                vec![
                    ValidationError::EmptyTitle,
                    ValidationError::EmptyContent,
                    ValidationError::NoCoordinate,
                ]
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(session.complaints().is_empty());
}

#[tokio::test]
async fn submission_without_store_is_kept_session_only() {
    let mut session =
        Session::start(None, Arc::new(MockGeocoder::new("Sejong-daero 110"))).await;
    session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;

    let outcome = session.dispatch(Action::Submit(draft("Pothole", "Deep pothole."))).await;
    match outcome {
        Outcome::Submitted { durable, .. } => assert!(!durable),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.complaints().len(), 1);
}

#[tokio::test]
async fn failed_append_keeps_the_complaint_for_the_session() {
    let store = Arc::new(FlakyStore::with_rows(Vec::new()));
    let mut session = session_with(store.clone()).await;
    session.dispatch(Action::MapClicked { lat: 37.5, lng: 127.0 }).await;

    store.set_failing(true);
    let outcome = session.dispatch(Action::Submit(draft("Pothole", "Deep pothole."))).await;
    match outcome {
        Outcome::Submitted { durable, .. } => assert!(!durable),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.complaints().len(), 1);
}

// =========================================================================
// Like / resolve
// =========================================================================

#[tokio::test]
async fn like_count_is_monotonically_non_decreasing() {
    let seed = seed_complaint("A", 0);
    let id = seed.id;
    let mut session = session_with(Arc::new(MemoryStore::with_rows(vec![seed]))).await;

    let mut last = 0;
    for _ in 0..3 {
        let outcome = session.dispatch(Action::Like(id)).await;
        assert!(matches!(outcome, Outcome::Liked(_)));
        let count = session.complaint(id).unwrap().like_count;
        assert!(count >= last);
        last = count;
    }
    assert_eq!(last, 3);
}

#[tokio::test]
async fn like_on_an_empty_degraded_session_reports_unknown_id() {
    let mut session = session_with(Arc::new(FailingStore)).await;
    // Cache is empty, so even a made-up id reports NotFound first.
    let outcome = session.dispatch(Action::Like(uuid::Uuid::new_v4())).await;
    assert!(matches!(outcome, Outcome::NotFound(_)));
}

#[tokio::test]
async fn like_is_refused_when_the_bridge_goes_down() {
    let seed = seed_complaint("A", 1);
    let id = seed.id;
    let store = Arc::new(FlakyStore::with_rows(vec![seed]));
    let mut session = session_with(store.clone()).await;

    store.set_failing(true);
    let outcome = session.dispatch(Action::Like(id)).await;
    assert!(matches!(outcome, Outcome::StoreFailed));
    // Cache untouched.
    assert_eq!(session.complaint(id).unwrap().like_count, 1);
}

#[tokio::test]
async fn resolve_is_one_way() {
    let seed = seed_complaint("A", 0);
    let id = seed.id;
    let mut session = session_with(Arc::new(MemoryStore::with_rows(vec![seed]))).await;

    let outcome = session.dispatch(Action::Resolve(id)).await;
    assert!(matches!(outcome, Outcome::Resolved(_)));
    assert_eq!(session.complaint(id).unwrap().status, Status::Resolved);

    // A second resolve stays resolved.
    let again = session.dispatch(Action::Resolve(id)).await;
    assert!(matches!(again, Outcome::Resolved(_)));
    assert_eq!(session.complaint(id).unwrap().status, Status::Resolved);
}

#[tokio::test]
async fn unknown_ids_are_reported() {
    let mut session = session_with(Arc::new(MemoryStore::new())).await;
    let id = uuid::Uuid::new_v4();
    assert!(matches!(session.dispatch(Action::Like(id)).await, Outcome::NotFound(_)));
    assert!(matches!(session.dispatch(Action::Resolve(id)).await, Outcome::NotFound(_)));
}

// =========================================================================
// Modes and refresh
// =========================================================================

#[tokio::test]
async fn plain_mode_changes_have_no_side_effects() {
    let store = Arc::new(MemoryStore::with_rows(vec![seed_complaint("A", 0)]));
    let mut session = session_with(store).await;

    for mode in [Mode::SubmitNew, Mode::ViewAll, Mode::ViewRanking] {
        let outcome = session.dispatch(Action::SelectMode(mode)).await;
        assert!(matches!(outcome, Outcome::ModeChanged(_)));
        assert_eq!(session.mode(), mode);
        assert_eq!(session.complaints().len(), 1);
    }
}

#[tokio::test]
async fn refresh_reloads_the_cache() {
    let store = Arc::new(MemoryStore::with_rows(vec![seed_complaint("A", 0)]));
    let mut session = session_with(store.clone()).await;

    // A row lands in the spreadsheet behind the session's back.
    store.append(&seed_complaint("B", 0)).await.unwrap();
    assert_eq!(session.complaints().len(), 1);

    let outcome = session.dispatch(Action::SelectMode(Mode::Refresh)).await;
    assert!(matches!(outcome, Outcome::Refreshed { count: 2 }));
    assert_eq!(session.complaints().len(), 2);
}

#[tokio::test]
async fn failed_refresh_leaves_the_cache_untouched() {
    let store = Arc::new(FlakyStore::with_rows(vec![seed_complaint("A", 0)]));
    let mut session = session_with(store.clone()).await;
    assert_eq!(session.complaints().len(), 1);

    store.set_failing(true);
    let outcome = session.dispatch(Action::SelectMode(Mode::Refresh)).await;
    assert!(matches!(outcome, Outcome::StoreFailed));
    assert_eq!(session.complaints().len(), 1);
    let notices = session.take_notices();
    assert!(notices.iter().any(|n| n.severity == Severity::Error));
}
