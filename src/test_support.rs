//! Shared record builder for unit tests.

use crate::schema::Record;

pub(crate) fn record(
    category: &str,
    market: &str,
    service: &str,
    currency: &str,
    date: &str,
) -> Record {
    Record {
        category: category.to_string(),
        market: market.to_string(),
        service: service.to_string(),
        currency: currency.to_string(),
        date: date.parse().expect("test date"),
        month_day: 0,
        unsubscribed: 0.0,
        active_subs: 0.0,
        new_subs: 0.0,
        total_subs: 0.0,
        new_paid: 0.0,
        renewals_paid: 0.0,
        total_paid: 0.0,
        new_billed_revenue: 0.0,
        renewal_revenue: 0.0,
        usd_rate: 0.0,
        daily_revenue: 0.0,
        month_cumm: 0.0,
        usd_zar_rate: 0.0,
        month_revenue: 0.0,
        month_target: 0.0,
        target_run_rate: 0.0,
        actual_run_rate: 0.0,
        required_run_rate: 0.0,
    }
}
