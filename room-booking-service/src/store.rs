use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::db::DbPool;

use crate::models::{Booking, NewBooking};
use crate::schema::bookings;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: NewBooking) -> Result<Booking>;
    async fn find(&self, booking_id: i32) -> Result<Option<Booking>>;
    async fn list(&self) -> Result<Vec<Booking>>;
    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>>;
    async fn set_approval_id(&self, booking_id: i32, approval_id: i32) -> Result<Option<Booking>>;
    /// Overwrites status and reason; `approval_id` is only replaced when given.
    async fn overwrite_status(
        &self,
        booking_id: i32,
        status: &str,
        keterangan_reject: Option<String>,
        approval_id: Option<i32>,
    ) -> Result<Option<Booking>>;
    async fn delete(&self, booking_id: i32) -> Result<bool>;
}

pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(bookings::table)
            .values(&booking)
            .get_result::<Booking>(&mut conn)
            .await?;
        Ok(created)
    }

    async fn find(&self, booking_id: i32) -> Result<Option<Booking>> {
        let mut conn = self.pool.get().await?;
        let booking = bookings::table
            .find(booking_id)
            .first::<Booking>(&mut conn)
            .await
            .optional()?;
        Ok(booking)
    }

    async fn list(&self) -> Result<Vec<Booking>> {
        let mut conn = self.pool.get().await?;
        let all = bookings::table
            .order(bookings::booking_id.asc())
            .load::<Booking>(&mut conn)
            .await?;
        Ok(all)
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Booking>> {
        let mut conn = self.pool.get().await?;
        let for_event = bookings::table
            .filter(bookings::event_id.eq(event_id))
            .order(bookings::booking_id.asc())
            .load::<Booking>(&mut conn)
            .await?;
        Ok(for_event)
    }

    async fn set_approval_id(&self, booking_id: i32, approval_id: i32) -> Result<Option<Booking>> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(bookings::table.find(booking_id))
            .set(bookings::approval_id.eq(approval_id))
            .get_result::<Booking>(&mut conn)
            .await
            .optional()?;
        Ok(updated)
    }

    async fn overwrite_status(
        &self,
        booking_id: i32,
        status: &str,
        keterangan_reject: Option<String>,
        approval_id: Option<i32>,
    ) -> Result<Option<Booking>> {
        let mut conn = self.pool.get().await?;
        let target = bookings::table.find(booking_id);
        let updated = match approval_id {
            Some(approval_id) => {
                diesel::update(target)
                    .set((
                        bookings::status_booking.eq(status),
                        bookings::keterangan_reject.eq(keterangan_reject),
                        bookings::approval_id.eq(approval_id),
                    ))
                    .get_result::<Booking>(&mut conn)
                    .await
            }
            None => {
                diesel::update(target)
                    .set((
                        bookings::status_booking.eq(status),
                        bookings::keterangan_reject.eq(keterangan_reject),
                    ))
                    .get_result::<Booking>(&mut conn)
                    .await
            }
        }
        .optional()?;
        Ok(updated)
    }

    async fn delete(&self, booking_id: i32) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(bookings::table.find(booking_id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }
}
