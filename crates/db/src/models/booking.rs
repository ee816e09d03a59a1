//! Booking model and listing filter.

use atelier_core::booking::{duration_days, BookingParties, BookingStatus, PaymentStatus};
use atelier_core::error::CoreError;
use atelier_core::money::Money;
use atelier_core::policy::BookingScope;
use atelier_core::types::{DbId, Date, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookings` table.
///
/// `designer_id` is copied from the design when the booking is created and
/// never re-derived afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    pub designer_id: DbId,
    pub design_id: Option<DbId>,
    pub status: String,
    pub payment_status: String,
    pub amount: Money,
    pub deposit: Money,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    pub fn parties(&self) -> BookingParties {
        BookingParties {
            client_id: self.client_id,
            designer_id: self.designer_id,
        }
    }

    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::from_name(&self.status)
    }

    pub fn payment_status(&self) -> Result<PaymentStatus, CoreError> {
        PaymentStatus::from_name(&self.payment_status)
    }

    pub fn duration_days(&self) -> i64 {
        duration_days(self.start_date, self.end_date)
    }
}

/// Insert DTO. Status and payment status always start at `pending`.
#[derive(Debug)]
pub struct CreateBooking {
    pub client_id: DbId,
    pub designer_id: DbId,
    pub design_id: DbId,
    pub amount: Money,
    pub deposit: Money,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub notes: Option<String>,
}

/// Filters for `GET /bookings`, applied inside the caller's scope.
#[derive(Debug, Clone)]
pub struct BookingListFilter {
    pub scope: BookingScope,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub designer_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub design_id: Option<DbId>,
}

impl BookingListFilter {
    pub fn new(scope: BookingScope) -> Self {
        Self {
            scope,
            status: None,
            payment_status: None,
            designer_id: None,
            client_id: None,
            design_id: None,
        }
    }
}
