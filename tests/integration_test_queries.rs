mod common;

use chrono::{Duration, Utc};
use common::TestApp;
use eventory_backend::domain::models::registration::{
    AdmissionOutcome, Registration, RegistrationStatus,
};
use eventory_backend::error::AppError;

/// Inserts a registration with a fixed timestamp, bypassing the service so
/// ordering tests control the clock.
async fn admit_at(
    app: &TestApp,
    user_id: &str,
    event_id: &str,
    registered_at: chrono::DateTime<Utc>,
) -> Registration {
    let mut registration = Registration::new(user_id.to_string(), event_id.to_string(), None);
    registration.registration_time = registered_at;
    match app
        .state
        .registration_repo
        .admit(&registration, None)
        .await
        .unwrap()
    {
        AdmissionOutcome::Admitted(created) => created,
        other => panic!("expected admission, got {other:?}"),
    }
}

#[tokio::test]
async fn test_user_registrations_are_newest_first() {
    let app = TestApp::new().await;
    let organizer = app.seed_user("organizer").await;
    let attendee = app.seed_user("ada").await;
    let event_a = app.seed_event(&organizer, None).await;
    let event_b = app.seed_event(&organizer, None).await;
    let event_c = app.seed_event(&organizer, None).await;

    let base = Utc::now() - Duration::days(1);
    let oldest = admit_at(&app, &attendee.id, &event_a.id, base).await;
    let middle = admit_at(&app, &attendee.id, &event_b.id, base + Duration::minutes(10)).await;
    let newest = admit_at(&app, &attendee.id, &event_c.id, base + Duration::minutes(20)).await;

    let listed = app
        .service()
        .list_user_registrations(&attendee.id)
        .await
        .unwrap();
    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![&newest.id, &middle.id, &oldest.id]);
}

#[tokio::test]
async fn test_event_registrations_are_newest_first() {
    let app = TestApp::new().await;
    let organizer = app.seed_user("organizer").await;
    let event = app.seed_event(&organizer, None).await;
    let first = app.seed_user("first").await;
    let second = app.seed_user("second").await;

    let base = Utc::now() - Duration::hours(2);
    let earlier = admit_at(&app, &first.id, &event.id, base).await;
    let later = admit_at(&app, &second.id, &event.id, base + Duration::minutes(30)).await;

    let listed = app
        .service()
        .list_event_registrations(&event.id)
        .await
        .unwrap();
    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![&later.id, &earlier.id]);
}

#[tokio::test]
async fn test_listing_for_unknown_user_or_event_is_not_found() {
    let app = TestApp::new().await;

    let err = app
        .service()
        .list_user_registrations("no-such-user")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = app
        .service()
        .list_event_registrations("no-such-event")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_status_filter_returns_matching_rows_only() {
    let app = TestApp::new().await;
    let organizer = app.seed_user("organizer").await;
    let event = app.seed_event(&organizer, None).await;

    let confirmed = app.seed_user("confirmed").await;
    let cancelled = app.seed_user("cancelled").await;
    app.service()
        .register_for_event(&confirmed.id, &event.id, None)
        .await
        .unwrap();
    let to_cancel = app
        .service()
        .register_for_event(&cancelled.id, &event.id, None)
        .await
        .unwrap();
    app.service().cancel_registration(&to_cancel.id).await.unwrap();

    let confirmed_rows = app
        .service()
        .list_by_event_and_status(&event.id, RegistrationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed_rows.len(), 1);
    assert_eq!(confirmed_rows[0].user_id, confirmed.id);

    let cancelled_rows = app
        .service()
        .list_by_event_and_status(&event.id, RegistrationStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled_rows.len(), 1);

    let attended_rows = app
        .service()
        .list_by_event_and_status(&event.id, RegistrationStatus::Attended)
        .await
        .unwrap();
    assert!(attended_rows.is_empty());
}

#[tokio::test]
async fn test_status_filter_skips_existence_check() {
    let app = TestApp::new().await;

    // Unlike the other listings, an unknown event is just an empty result.
    let rows = app
        .service()
        .list_by_event_and_status("no-such-event", RegistrationStatus::Confirmed)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_lookup_by_user_and_event() {
    let app = TestApp::new().await;
    let organizer = app.seed_user("organizer").await;
    let attendee = app.seed_user("ada").await;
    let event = app.seed_event(&organizer, None).await;

    let err = app
        .service()
        .get_registration_by_user_and_event(&attendee.id, &event.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let created = app
        .service()
        .register_for_event(&attendee.id, &event.id, None)
        .await
        .unwrap();

    let found = app
        .service()
        .get_registration_by_user_and_event(&attendee.id, &event.id)
        .await
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn test_is_user_registered() {
    let app = TestApp::new().await;
    let organizer = app.seed_user("organizer").await;
    let attendee = app.seed_user("ada").await;
    let event = app.seed_event(&organizer, None).await;

    assert!(!app
        .service()
        .is_user_registered(&attendee.id, &event.id)
        .await
        .unwrap());

    let created = app
        .service()
        .register_for_event(&attendee.id, &event.id, None)
        .await
        .unwrap();
    assert!(app
        .service()
        .is_user_registered(&attendee.id, &event.id)
        .await
        .unwrap());

    // Existence is status-independent.
    app.service().cancel_registration(&created.id).await.unwrap();
    assert!(app
        .service()
        .is_user_registered(&attendee.id, &event.id)
        .await
        .unwrap());

    let err = app
        .service()
        .is_user_registered("no-such-user", &event.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
