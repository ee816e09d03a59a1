//! Repository tests against a real Postgres database.

use atelier_core::booking::BookingStatus;
use atelier_core::design::DesignStatus;
use atelier_core::money::Money;
use atelier_core::notification::{NotificationDraft, NotificationType};
use atelier_core::policy::{BookingScope, DesignScope, StatusVisibility};
use atelier_core::types::Date;
use atelier_db::models::booking::{BookingListFilter, CreateBooking};
use atelier_db::models::design::{CreateDesign, Design, DesignListFilter, UpdateDesign};
use atelier_db::models::notification::NotificationListFilter;
use atelier_db::models::user::{CreateUser, User};
use atelier_db::repositories::{
    BookingRepo, DesignRepo, FavoriteRepo, NotificationRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn user(pool: &PgPool, email: &str, user_type: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            user_type: user_type.to_string(),
            is_staff: false,
        },
    )
    .await
    .unwrap()
}

async fn design(pool: &PgPool, designer_id: i64, title: &str, status: DesignStatus) -> Design {
    let mut conn = pool.acquire().await.unwrap();
    DesignRepo::create(
        &mut conn,
        &CreateDesign {
            title: title.to_string(),
            description: String::new(),
            designer_id,
            category_id: None,
            price: Money::from(100),
            status,
            is_premium: false,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap()
}

fn scope(visibility: StatusVisibility, designer_id: Option<i64>) -> DesignListFilter {
    DesignListFilter::new(DesignScope {
        visibility,
        designer_id,
    })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_lookup_is_case_insensitive(pool: PgPool) {
    let created = user(&pool, "mixed@example.com", "client").await;

    let found = UserRepo::find_by_email(&pool, "MIXED@Example.com")
        .await
        .unwrap()
        .expect("user should be found");
    assert_eq!(found.id, created.id);
    assert!(found.is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    user(&pool, "taken@example.com", "client").await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "taken@example.com".to_string(),
            password_hash: "x".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            user_type: "designer".to_string(),
            is_staff: false,
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

// ---------------------------------------------------------------------------
// Design scopes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_design_scopes_filter_rows(pool: PgPool) {
    let alice = user(&pool, "alice@example.com", "designer").await;
    let bob = user(&pool, "bob@example.com", "designer").await;
    design(&pool, alice.id, "Alice public", DesignStatus::Approved).await;
    design(&pool, alice.id, "Alice pending", DesignStatus::Pending).await;
    design(&pool, bob.id, "Bob public", DesignStatus::Approved).await;
    design(&pool, bob.id, "Bob draft", DesignStatus::Draft).await;

    let anon = scope(StatusVisibility::ApprovedOnly, None);
    assert_eq!(DesignRepo::count(&pool, &anon).await.unwrap(), 2);

    let as_alice = scope(StatusVisibility::ApprovedOrOwnedBy(alice.id), None);
    let titles: Vec<String> = DesignRepo::list(&pool, &as_alice, 50, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.title)
        .collect();
    assert_eq!(titles.len(), 3);
    assert!(titles.contains(&"Alice pending".to_string()));
    assert!(!titles.contains(&"Bob draft".to_string()));

    // Narrowing to another designer keeps the status restriction.
    let alice_looks_at_bob = scope(StatusVisibility::ApprovedOrOwnedBy(alice.id), Some(bob.id));
    assert_eq!(DesignRepo::count(&pool, &alice_looks_at_bob).await.unwrap(), 1);

    let staff = scope(StatusVisibility::Any, None);
    assert_eq!(DesignRepo::count(&pool, &staff).await.unwrap(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_design_search_and_pagination(pool: PgPool) {
    let designer = user(&pool, "d@example.com", "designer").await;
    for title in ["Blue kitchen", "Red kitchen", "Green bathroom"] {
        design(&pool, designer.id, title, DesignStatus::Approved).await;
    }

    let mut filter = scope(StatusVisibility::ApprovedOnly, None);
    filter.search = Some("KITCHEN".to_string());
    assert_eq!(DesignRepo::count(&pool, &filter).await.unwrap(), 2);

    let page = DesignRepo::list(&pool, &filter, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title, "Blue kitchen");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_counters_increment(pool: PgPool) {
    let designer = user(&pool, "d@example.com", "designer").await;
    let d = design(&pool, designer.id, "Counted", DesignStatus::Approved).await;

    DesignRepo::increment_views(&pool, d.id).await.unwrap();
    let viewed = DesignRepo::increment_views(&pool, d.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(viewed.views, 2);

    assert_eq!(DesignRepo::increment_likes(&pool, d.id).await.unwrap(), Some(1));
    assert_eq!(DesignRepo::increment_likes(&pool, 424_242).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_title_reads_on_an_open_transaction(pool: PgPool) {
    let designer = user(&pool, "d@example.com", "designer").await;
    let d = design(&pool, designer.id, "Terrace", DesignStatus::Approved).await;

    let mut tx = pool.begin().await.unwrap();
    DesignRepo::find_for_update(&mut *tx, d.id).await.unwrap().unwrap();
    assert_eq!(
        DesignRepo::title(&mut *tx, d.id).await.unwrap().as_deref(),
        Some("Terrace")
    );
    assert_eq!(DesignRepo::title(&mut *tx, 424_242).await.unwrap(), None);
    tx.commit().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_only_explicitly_nulled_columns(pool: PgPool) {
    let designer = user(&pool, "d@example.com", "designer").await;
    let d = design(&pool, designer.id, "Porch", DesignStatus::Pending).await;

    let set = UpdateDesign {
        width: Some(Some(Money::new(350, 2))),
        height: Some(Some(Money::from(2))),
        ..UpdateDesign::default()
    };
    let updated = DesignRepo::update(&pool, d.id, &set).await.unwrap().unwrap();
    assert_eq!(updated.width, Some(Money::new(350, 2)));

    let clear_width = UpdateDesign {
        width: Some(None),
        ..UpdateDesign::default()
    };
    let updated = DesignRepo::update(&pool, d.id, &clear_width)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.width, None);
    assert_eq!(updated.height, Some(Money::from(2)));
    assert_eq!(updated.title, "Porch");
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_participant_scope(pool: PgPool) {
    let client = user(&pool, "c@example.com", "client").await;
    let designer = user(&pool, "d@example.com", "designer").await;
    let outsider = user(&pool, "o@example.com", "client").await;
    let d = design(&pool, designer.id, "Booked", DesignStatus::Approved).await;

    let mut conn = pool.acquire().await.unwrap();
    let booking = BookingRepo::create(
        &mut conn,
        &CreateBooking {
            client_id: client.id,
            designer_id: designer.id,
            design_id: d.id,
            amount: Money::from(100),
            deposit: Money::ZERO,
            start_date: Date::from_ymd_opt(2026, 11, 2).unwrap(),
            end_date: None,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
            notes: None,
        },
    )
    .await
    .unwrap();
    drop(conn);
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.payment_status, "pending");

    for (viewer, expected) in [(client.id, 1), (designer.id, 1), (outsider.id, 0)] {
        let filter = BookingListFilter::new(BookingScope::ParticipantOf(viewer));
        assert_eq!(BookingRepo::count(&pool, &filter).await.unwrap(), expected);
    }

    let mut confirmed = BookingListFilter::new(BookingScope::All);
    confirmed.status = Some(BookingStatus::Confirmed);
    assert_eq!(BookingRepo::count(&pool, &confirmed).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Favorites and notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorite_add_is_idempotent(pool: PgPool) {
    let client = user(&pool, "c@example.com", "client").await;
    let designer = user(&pool, "d@example.com", "designer").await;
    let d = design(&pool, designer.id, "Fav", DesignStatus::Approved).await;

    let (first, created) = FavoriteRepo::add(&pool, client.id, d.id).await.unwrap();
    assert!(created);
    let (second, created) = FavoriteRepo::add(&pool, client.id, d.id).await.unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);
    assert_eq!(FavoriteRepo::count_for_user(&pool, client.id).await.unwrap(), 1);

    assert!(FavoriteRepo::remove(&pool, client.id, d.id).await.unwrap());
    assert!(!FavoriteRepo::remove(&pool, client.id, d.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_all_read_counts_only_unread(pool: PgPool) {
    let owner = user(&pool, "u@example.com", "client").await;
    let mut conn = pool.acquire().await.unwrap();
    for booking_id in 1..=3 {
        let draft = NotificationDraft::booking_confirmed(owner.id, booking_id, Some("Den"));
        NotificationRepo::create(&mut conn, &draft).await.unwrap();
    }
    drop(conn);

    assert_eq!(NotificationRepo::unread_count(&pool, owner.id).await.unwrap(), 3);
    assert_eq!(NotificationRepo::mark_all_read(&pool, owner.id).await.unwrap(), 3);
    assert_eq!(NotificationRepo::mark_all_read(&pool, owner.id).await.unwrap(), 0);

    let read = NotificationListFilter {
        is_read: Some(true),
        kind: Some(NotificationType::BookingConfirmed),
    };
    assert_eq!(
        NotificationRepo::count_for_user(&pool, owner.id, &read).await.unwrap(),
        3
    );
}
