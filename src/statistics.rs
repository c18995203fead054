//! Sales statistics derived from the full order set.
//!
//! Nothing here is stored: [`OrderStats::compute`] is a pure function of the
//! orders and the evaluation instant, and the caller re-fetches orders each time.
//! Calendar boundaries ("today", "this month") are taken in the time zone of
//! the instant passed in.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use serde::Serialize;

use crate::domain::Order;

/// Best seller by cumulative quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopFood {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub today_orders: usize,
    pub total_revenue: i64,
    pub top_food: Option<TopFood>,
    /// First day of the current month at local midnight.
    pub month_start: DateTime<FixedOffset>,
    pub monthly_orders: usize,
    pub monthly_revenue: i64,
    pub monthly_top_food: Option<TopFood>,
}

/// Running totals over one window of orders.
#[derive(Default)]
struct Tally {
    orders: usize,
    revenue: i64,
    quantities: BTreeMap<String, u64>,
}

impl Tally {
    fn add(&mut self, order: &Order) {
        self.orders += 1;
        self.revenue = self.revenue.saturating_add(order.total_price);
        for item in &order.items {
            *self.quantities.entry(item.name.clone()).or_insert(0) += u64::from(item.quantity);
        }
    }

    /// Highest count wins; equal counts go to the alphabetically first name.
    fn top_food(&self) -> Option<TopFood> {
        let mut best: Option<(&String, u64)> = None;
        for (name, &count) in &self.quantities {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best.map(|(name, count)| TopFood {
            name: name.clone(),
            count,
        })
    }
}

impl OrderStats {
    pub fn compute<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let first_of_month = first_day_of_month(today);

        let mut all = Tally::default();
        let mut monthly = Tally::default();
        let mut today_orders = 0;

        for order in orders {
            all.add(order);

            // Calendar days only: the store clock may run slightly ahead of `now`.
            let day = order.created_at.with_timezone(&tz).date_naive();
            if day == today {
                today_orders += 1;
            }
            if day >= first_of_month && day <= today {
                monthly.add(order);
            }
        }

        Self {
            total_orders: all.orders,
            today_orders,
            total_revenue: all.revenue,
            top_food: all.top_food(),
            month_start: local_midnight(&tz, first_of_month, now),
            monthly_orders: monthly.orders,
            monthly_revenue: monthly.revenue,
            monthly_top_food: monthly.top_food(),
        }
    }
}

fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Midnight of `day` in `tz`. A midnight skipped by a DST change falls back
/// to the evaluation instant's offset.
fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate, now: &DateTime<Tz>) -> DateTime<FixedOffset> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.fixed_offset(),
        None => {
            let offset = now.fixed_offset().offset().to_owned();
            DateTime::from_naive_utc_and_offset(midnight - offset, offset)
        }
    }
}
