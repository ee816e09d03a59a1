pub mod auth;
pub mod bookings;
pub mod categories;
pub mod designs;
pub mod favorites;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod reviews;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/token                                      obtain tokens (public)
/// /auth/token/refresh                              refresh tokens (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/profile                                    get, update own profile
///
/// /categories                                      list, create (staff)
/// /categories/{id}                                 get, update (staff)
///
/// /tags                                            list, create (requires auth)
///
/// /designs                                         list, create
/// /designs/{id}                                    get, update, delete
/// /designs/{id}/approve                            approve (staff)
/// /designs/{id}/reject                             reject (staff)
/// /designs/{id}/like                               like
/// /designs/{id}/images                             list images
/// /designs/{id}/upload_images                      upload images (multipart)
///
/// /bookings                                        list, create (requires auth)
/// /bookings/{id}                                   get
/// /bookings/{id}/confirm                           confirm
/// /bookings/{id}/cancel                            cancel
/// /bookings/{id}/start                             start
/// /bookings/{id}/complete                          complete
/// /bookings/{id}/payment_status                    set payment status (staff)
///
/// /reviews                                         list, create
/// /reviews/{id}/approve                            approve (staff)
///
/// /favorites                                       list, add (requires auth)
/// /favorites/{design_id}                           remove
///
/// /messages                                        list, send (requires auth)
/// /messages/{id}/mark_read                         mark read (recipient)
///
/// /notifications                                   list (requires auth)
/// /notifications/{id}                              get
/// /notifications/{id}/mark_read                    mark read
/// /notifications/mark_all_read                     mark all read
/// /notifications/unread_count                      unread count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/designs", designs::router())
        .nest("/bookings", bookings::router())
        .nest("/reviews", reviews::router())
        .nest("/favorites", favorites::router())
        .nest("/messages", messages::router())
        .nest("/notifications", notifications::router())
}
