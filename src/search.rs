use serde::Deserialize;

use crate::models::booking::Booking;
use crate::models::history::{Direction, HistoryItem, HistoryStatus};
use crate::models::user::{ActivityStatus, LogRole, UserLog};

/// Case-insensitive substring match against any of `fields`. An empty query
/// matches everything.
pub fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Sent,
    Received,
    Delivered,
    Cancelled,
}

impl HistoryFilter {
    pub fn accepts(&self, item: &HistoryItem) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Sent => item.direction == Direction::Sent,
            HistoryFilter::Received => item.direction == Direction::Received,
            HistoryFilter::Delivered => item.status == HistoryStatus::Delivered,
            HistoryFilter::Cancelled => item.status == HistoryStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserLogFilter {
    #[default]
    All,
    Customers,
    Receivers,
    Active,
    Inactive,
}

impl UserLogFilter {
    pub fn accepts(&self, log: &UserLog) -> bool {
        match self {
            UserLogFilter::All => true,
            UserLogFilter::Customers => log.role == LogRole::Customer,
            UserLogFilter::Receivers => log.role == LogRole::Receiver,
            UserLogFilter::Active => log.status == ActivityStatus::Active,
            UserLogFilter::Inactive => log.status == ActivityStatus::Inactive,
        }
    }
}

pub fn filter_history<'a>(
    items: impl IntoIterator<Item = &'a HistoryItem>,
    query: &str,
    filter: HistoryFilter,
) -> Vec<HistoryItem> {
    items
        .into_iter()
        .filter(|item| {
            let fields = [
                Some(item.rwb.as_str()),
                Some(item.package_type.as_str()),
                item.receiver.as_deref(),
                item.sender.as_deref(),
            ];
            matches_query(query, fields.into_iter().flatten()) && filter.accepts(item)
        })
        .cloned()
        .collect()
}

pub fn filter_user_logs<'a>(
    logs: impl IntoIterator<Item = &'a UserLog>,
    query: &str,
    filter: UserLogFilter,
) -> Vec<UserLog> {
    let raw_query = query.trim();

    logs.into_iter()
        .filter(|log| {
            // phone numbers are matched as typed
            let found = matches_query(query, [log.name.as_str(), log.email.as_str()])
                || log.phone.contains(raw_query);
            found && filter.accepts(log)
        })
        .cloned()
        .collect()
}

pub fn filter_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>, query: &str) -> Vec<Booking> {
    let mut found: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| {
            matches_query(
                query,
                [
                    booking.rwb.as_str(),
                    booking.route.as_str(),
                    booking.customer.as_str(),
                ],
            )
        })
        .cloned()
        .collect();

    found.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.rwb.cmp(&b.rwb)));
    found
}
