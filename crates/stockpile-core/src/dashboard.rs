//! # Dashboard
//!
//! Time windows and the aggregate shape behind `GET /api/dashboard/stats`.
//!
//! "Today" and "this month" are calendar boundaries in the server's local
//! time zone. They are converted to UTC here so the database only ever
//! compares UTC timestamps.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::money::Money;
use crate::types::{Product, SaleWithProduct};

/// Number of sales shown in the "recent sales" panel.
pub const RECENT_SALES_LIMIT: i64 = 5;

/// Lower bounds (inclusive) of the dashboard's sales windows, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindow {
    pub today_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
}

impl DashboardWindow {
    /// Windows for the current instant in the server's local time zone.
    pub fn now() -> Self {
        Self::starting_at(Local::now())
    }

    /// Windows containing `now`, with day and month boundaries taken in
    /// `now`'s own time zone.
    ///
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone};
    /// use stockpile_core::dashboard::DashboardWindow;
    ///
    /// let brt = FixedOffset::west_opt(3 * 3600).unwrap();
    /// let now = brt.with_ymd_and_hms(2024, 3, 15, 22, 30, 0).unwrap();
    /// let window = DashboardWindow::starting_at(now);
    /// assert_eq!(window.today_start.to_rfc3339(), "2024-03-15T03:00:00+00:00");
    /// assert_eq!(window.month_start.to_rfc3339(), "2024-03-01T03:00:00+00:00");
    /// ```
    pub fn starting_at<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_of_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);

        Self {
            today_start: local_midnight(&tz, today),
            month_start: local_midnight(&tz, first_of_month),
        }
    }
}

/// Start of `date` in `tz`, as UTC.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    first_valid_instant(date, |local| {
        tz.from_local_datetime(&local)
            .earliest()
            .map(|instant| instant.with_timezone(&Utc))
    })
}

/// The first local time on `date`, from midnight in 15 minute steps, that
/// `resolve` maps to an instant.
///
/// Midnight is skipped only inside a DST gap. A day with no valid local time
/// at all falls back to reading naive midnight as UTC.
fn first_valid_instant(
    date: NaiveDate,
    resolve: impl Fn(NaiveDateTime) -> Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..24 * 4)
        .map(|step| midnight + TimeDelta::minutes(15 * step))
        .find_map(resolve)
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Aggregated dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Sum of sale totals since the start of today.
    pub today_sales: Money,
    /// Sum of sale totals since the start of the month.
    pub month_sales: Money,
    pub total_products: i64,
    /// Products with `stock <= min_stock`.
    pub low_stock_products: Vec<Product>,
    /// Most recent sales, newest first.
    pub recent_sales: Vec<SaleWithProduct>,
}

impl DashboardStats {
    #[inline]
    pub fn low_stock_count(&self) -> usize {
        self.low_stock_products.len()
    }
}
