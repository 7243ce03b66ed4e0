//! Static mock data loaded into [`crate::state::AppState`] at start-up.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::booking::{Booking, BookingStatus, PackageType};
use crate::models::history::{
    Decision, Depot, Direction, HistoryItem, HistoryStatus, IncomingPackage, IncomingStage,
};
use crate::models::network::{BusAssignment, BusStatus, PickupPoint};
use crate::models::tracking::{PackageSummary, TimelineEvent, TrackingRecord};
use crate::models::user::{ActivityStatus, LogRole, RecentActivity, UserLog};

pub const AVAILABLE_BUSES: [&str; 4] = ["TN28JK7890", "TN45LM3456", "TN62NO7890", "TN83PQ1234"];

pub const AVAILABLE_ROUTES: [&str; 8] = [
    "Chennai → Coimbatore",
    "Coimbatore → Chennai",
    "Madurai → Salem",
    "Salem → Madurai",
    "Trichy → Chennai",
    "Chennai → Trichy",
    "Tirunelveli → Chennai",
    "Chennai → Tirunelveli",
];

fn s(value: &str) -> String {
    value.to_string()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn pickup_points() -> Vec<PickupPoint> {
    let rows = [
        (1, "Chennai Koyambedu Bus Stand", "CHN001", "Koyambedu, Chennai - 600107", "+91 44 2679 2345", true, 15),
        (2, "Coimbatore Central Bus Stand", "CBE001", "Central Bus Stand, Coimbatore - 641001", "+91 422 2345 678", true, 12),
        (3, "Madurai Central Bus Stand", "MDU001", "Mattuthavani, Madurai - 625020", "+91 452 2345 789", true, 10),
        (4, "Salem Central Bus Stand", "SLM001", "Central Bus Stand, Salem - 636001", "+91 427 2345 678", true, 8),
        (5, "Trichy Central Bus Stand", "TRY001", "Central Bus Stand, Trichy - 620001", "+91 431 2345 678", false, 6),
    ];

    rows.into_iter()
        .map(|(id, name, code, address, phone, active, routes)| PickupPoint {
            id,
            name: s(name),
            code: s(code),
            address: s(address),
            phone: s(phone),
            active,
            routes,
        })
        .collect()
}

pub fn bus_assignments() -> Vec<BusAssignment> {
    let rows = [
        (1, "TN07AB1234", "Chennai → Coimbatore", "08:00 AM", "02:30 PM", 3, 15, "Rajesh Kumar", BusStatus::InTransit),
        (2, "TN09CD5678", "Madurai → Salem", "10:30 AM", "04:15 PM", 2, 12, "Suresh Babu", BusStatus::Scheduled),
        (3, "TN37EF9012", "Trichy → Chennai", "02:15 PM", "08:45 PM", 4, 18, "Murugan S", BusStatus::Scheduled),
        (4, "TN11GH3456", "Coimbatore → Madurai", "06:45 AM", "12:30 PM", 1, 10, "Karthik R", BusStatus::Completed),
    ];

    rows.into_iter()
        .map(
            |(id, bus_number, route, departure, arrival, packages, capacity, driver, status)| BusAssignment {
                id,
                bus_number: s(bus_number),
                route: s(route),
                departure: s(departure),
                arrival: s(arrival),
                packages,
                capacity,
                driver: s(driver),
                status,
            },
        )
        .collect()
}

pub fn bookings() -> Vec<Booking> {
    let rows = [
        ("RWB001", "1", "Ravi Kumar", "Chennai → Coimbatore", BookingStatus::InTransit, date(2024, 1, 15), "TN07AB1234", PackageType::Electronics, "2.5 kg"),
        ("RWB002", "c-2", "Priya Sharma", "Madurai → Salem", BookingStatus::Delivered, date(2024, 1, 14), "TN09CD5678", PackageType::Documents, "0.5 kg"),
        ("RWB003", "c-5", "Arjun Raj", "Trichy → Chennai", BookingStatus::Booked, date(2024, 1, 15), "TN37EF9012", PackageType::Medicines, "1.2 kg"),
        ("RWB004", "c-6", "Meera Nair", "Coimbatore → Madurai", BookingStatus::DeliveryPending, date(2024, 1, 13), "TN11GH3456", PackageType::Clothing, "3.1 kg"),
    ];

    rows.into_iter()
        .map(
            |(rwb, customer_id, customer, route, status, day, bus, package_type, weight)| Booking {
                rwb: s(rwb),
                customer_id: s(customer_id),
                customer: s(customer),
                route: s(route),
                status,
                date: day,
                bus: Some(s(bus)),
                package_type,
                weight: s(weight),
                created_at: Utc
                    .from_utc_datetime(&day.and_hms_opt(8, 0, 0).unwrap_or_default()),
            },
        )
        .collect()
}

fn event(location: &str, time: &str, status: &str, completed: bool, current: bool) -> TimelineEvent {
    TimelineEvent {
        location: s(location),
        time: s(time),
        status: s(status),
        completed,
        current,
    }
}

pub fn tracking_records() -> Vec<TrackingRecord> {
    vec![
        TrackingRecord {
            rwb: s("RWB001"),
            status: BookingStatus::InTransit,
            current_location: s("Salem Central Bus Stand"),
            route: s("Chennai → Coimbatore"),
            bus: Some(s("TN07AB1234")),
            estimated_delivery: Some(s("2024-01-16 10:30 AM")),
            delivered_at: None,
            package: PackageSummary {
                package_type: s("Electronics"),
                weight: s("2.5 kg"),
                sender: s("Ravi Kumar"),
                receiver: s("Suresh Kumar"),
            },
            timeline: vec![
                event("Chennai Koyambedu", "2024-01-15 08:00 AM", "Package Booked", true, false),
                event("Chennai Koyambedu", "2024-01-15 09:15 AM", "Package Loaded", true, false),
                event("Tindivanam", "2024-01-15 11:30 AM", "In Transit", true, false),
                event("Salem Central", "2024-01-15 02:45 PM", "Package Transferred", true, false),
                event("Salem Central", "2024-01-15 03:30 PM", "Currently Here", false, true),
                event("Coimbatore Central", "2024-01-16 10:30 AM", "Expected Delivery", false, false),
            ],
        },
        TrackingRecord {
            rwb: s("RWB002"),
            status: BookingStatus::Delivered,
            current_location: s("Salem Central Bus Stand"),
            route: s("Madurai → Salem"),
            bus: Some(s("TN09CD5678")),
            estimated_delivery: None,
            delivered_at: Some(s("2024-01-14 04:15 PM")),
            package: PackageSummary {
                package_type: s("Documents"),
                weight: s("0.5 kg"),
                sender: s("Priya Sharma"),
                receiver: s("Lakshmi Devi"),
            },
            timeline: vec![
                event("Madurai Central", "2024-01-14 07:00 AM", "Package Booked", true, false),
                event("Madurai Central", "2024-01-14 08:30 AM", "Package Loaded", true, false),
                event("Dindigul", "2024-01-14 10:15 AM", "In Transit", true, false),
                event("Salem Central", "2024-01-14 03:45 PM", "Arrived at Destination", true, false),
                event("Salem Central", "2024-01-14 04:15 PM", "Package Delivered", true, false),
            ],
        },
    ]
}

pub fn history() -> Vec<HistoryItem> {
    let sent = |id, rwb: &str, place: &str, status, day: &str, kind: &str, weight: &str, receiver: &str, delivered: Option<&str>| HistoryItem {
        id,
        rwb: s(rwb),
        direction: Direction::Sent,
        place: s(place),
        status,
        date: s(day),
        package_type: s(kind),
        weight: s(weight),
        receiver: Some(s(receiver)),
        sender: None,
        delivered_at: delivered.map(s),
    };
    let received = |id, rwb: &str, place: &str, status, day: &str, kind: &str, weight: &str, sender: &str, delivered: Option<&str>| HistoryItem {
        id,
        rwb: s(rwb),
        direction: Direction::Received,
        place: s(place),
        status,
        date: s(day),
        package_type: s(kind),
        weight: s(weight),
        receiver: None,
        sender: Some(s(sender)),
        delivered_at: delivered.map(s),
    };

    vec![
        sent(1, "RWB001", "Coimbatore", HistoryStatus::Delivered, "2024-01-15", "Electronics", "2.5 kg", "Suresh Kumar", Some("2024-01-16 10:30 AM")),
        sent(2, "RWB002", "Salem", HistoryStatus::Delivered, "2024-01-14", "Documents", "0.5 kg", "Lakshmi Devi", Some("2024-01-14 04:15 PM")),
        received(3, "RWB003", "Chennai", HistoryStatus::Delivered, "2024-01-13", "Gift Items", "1.5 kg", "Ramesh Gupta", Some("2024-01-13 02:45 PM")),
        received(4, "RWB004", "Madurai", HistoryStatus::Delivered, "2024-01-12", "Books", "3.1 kg", "Deepa Raj", Some("2024-01-12 11:20 AM")),
        sent(5, "RWB005", "Trichy", HistoryStatus::Cancelled, "2024-01-10", "Medicines", "1.2 kg", "Karthik R", None),
        sent(6, "RWB006", "Madurai", HistoryStatus::Delivered, "2024-01-08", "Clothing", "2.8 kg", "Meera Nair", Some("2024-01-09 09:15 AM")),
        received(7, "RWB007", "Coimbatore", HistoryStatus::Returned, "2024-01-05", "Electronics", "1.8 kg", "Vijay Kumar", None),
    ]
}

pub fn user_logs() -> Vec<UserLog> {
    let rows = [
        (1, "Ravi Kumar", "ravi.kumar@email.com", "+91 9876543210", LogRole::Customer, 12, 8, "2024-01-15 10:30 AM", "2023-06-15", ActivityStatus::Active),
        (2, "Priya Sharma", "priya.sharma@email.com", "+91 9876543211", LogRole::Customer, 5, 3, "2024-01-14 03:45 PM", "2023-08-22", ActivityStatus::Active),
        (3, "Suresh Kumar", "suresh.kumar@email.com", "+91 9876543212", LogRole::Receiver, 2, 15, "2024-01-13 11:20 AM", "2023-04-10", ActivityStatus::Active),
        (4, "Lakshmi Devi", "lakshmi.devi@email.com", "+91 9876543213", LogRole::Receiver, 1, 7, "2024-01-12 09:15 AM", "2023-09-05", ActivityStatus::Active),
        (5, "Arjun Raj", "arjun.raj@email.com", "+91 9876543214", LogRole::Customer, 8, 4, "2024-01-10 02:30 PM", "2023-07-18", ActivityStatus::Inactive),
    ];

    rows.into_iter()
        .map(
            |(id, name, email, phone, role, sent, received, last_activity, join_date, status)| UserLog {
                id,
                name: s(name),
                email: s(email),
                phone: s(phone),
                role,
                total_packages_sent: sent,
                total_packages_received: received,
                last_activity: s(last_activity),
                join_date: s(join_date),
                status,
            },
        )
        .collect()
}

pub fn recent_activities() -> Vec<RecentActivity> {
    [
        ("Ravi Kumar", "Created booking RWB001", "2 hours ago"),
        ("Priya Sharma", "Package RWB002 delivered", "4 hours ago"),
        ("Suresh Kumar", "Confirmed package receipt", "6 hours ago"),
        ("Lakshmi Devi", "Picked up package RWB004", "1 day ago"),
    ]
    .into_iter()
    .map(|(user, action, time)| RecentActivity {
        user: s(user),
        action: s(action),
        time: s(time),
    })
    .collect()
}

pub fn incoming_packages() -> Vec<IncomingPackage> {
    let awaiting = |id, rwb: &str, sender: &str, phone: &str, from: &str, kind: &str, weight: &str, eta: &str, description: &str, bus: &str| IncomingPackage {
        id,
        rwb: s(rwb),
        sender: s(sender),
        sender_phone: s(phone),
        from: s(from),
        package_type: s(kind),
        weight: s(weight),
        description: s(description),
        bus: Some(s(bus)),
        estimated_arrival: Some(s(eta)),
        arrived_at: None,
        depot: None,
        stage: IncomingStage::AwaitingConfirmation,
        decision: None::<Decision>,
    };

    vec![
        awaiting(1, "RWB003", "Ramesh Gupta", "+91 9876543210", "Chennai", "Gift Items", "1.5 kg", "2024-01-16 2:00 PM", "Birthday gift for daughter - wrapped box containing toys", "TN37EF9012"),
        awaiting(2, "RWB005", "Kavitha Nair", "+91 9876543211", "Madurai", "Books", "2.2 kg", "2024-01-16 4:30 PM", "Educational books for college - total 8 books", "TN11GH3456"),
        awaiting(3, "RWB006", "Suresh Kumar", "+91 9876543212", "Trichy", "Electronics", "0.8 kg", "2024-01-17 10:00 AM", "Mobile phone accessories and charger", "TN28JK7890"),
        IncomingPackage {
            id: 4,
            rwb: s("RWB004"),
            sender: s("Deepa Raj"),
            sender_phone: s("+91 9876543213"),
            from: s("Madurai"),
            package_type: s("Books"),
            weight: s("3.1 kg"),
            description: s("Technical reference books"),
            bus: None,
            estimated_arrival: None,
            arrived_at: Some(s("2024-01-15 3:15 PM")),
            depot: Some(Depot {
                name: s("Salem Central Bus Stand"),
                address: s("123 Central Bus Stand, Salem - 636001"),
                phone: s("+91 427 2345678"),
                hours: s("6:00 AM - 10:00 PM"),
            }),
            stage: IncomingStage::DeliveryPending,
            decision: None,
        },
    ]
}
