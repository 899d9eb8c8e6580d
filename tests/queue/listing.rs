use chrono::{Duration, Utc};
use carwash_queue::washes::{DayWindow, StatusFilter};
use carwash_queue::{ModelsExt, QueueFilter, Wash, WashStatus};
use rust_decimal::Decimal;

use crate::support::{future_day, in_hours, local_at, queue, request};

#[test]
fn overdue_pending_wash_is_completed_by_listing() {
    let (queue, _) = queue();
    let late = queue
        .register_service(request("Ana", "LATE001", Utc::now() - Duration::minutes(10)))
        .unwrap()
        .wash;

    let listed = queue.list_queue(&QueueFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, late.id);
    assert_eq!(listed[0].status, WashStatus::Completed);

    let pending = queue
        .list_queue(&QueueFilter::default().status(StatusFilter::Only(WashStatus::Pending)))
        .unwrap();
    assert!(pending.is_empty());
}

#[test]
fn sweep_leaves_future_and_cancelled_washes_alone() {
    let (queue, store) = queue();
    queue
        .register_service(request("Ana", "SOON001", in_hours(1)))
        .unwrap();
    let cancelled = queue
        .register_service(request("Bia", "GONE001", Utc::now() - Duration::hours(1)))
        .unwrap()
        .wash;
    queue
        .update_status(&cancelled.id, WashStatus::Cancelled)
        .unwrap();

    queue.list_queue(&QueueFilter::default()).unwrap();

    let washes = store.models::<Wash>().find(&|_| true).unwrap();
    let status_of = |plate: &str| washes.iter().find(|w| w.plate == plate).unwrap().status;
    assert_eq!(status_of("SOON001"), WashStatus::Pending);
    assert_eq!(status_of("GONE001"), WashStatus::Cancelled);
}

#[test]
fn status_filters() {
    let (queue, _) = queue();
    queue
        .register_service(request("Ana", "PEND001", in_hours(1)))
        .unwrap();
    let done = queue
        .register_service(request("Bia", "DONE001", in_hours(2)))
        .unwrap()
        .wash;
    queue.update_status(&done.id, WashStatus::Completed).unwrap();
    let gone = queue
        .register_service(request("Caio", "GONE001", in_hours(3)))
        .unwrap()
        .wash;
    queue.update_status(&gone.id, WashStatus::Cancelled).unwrap();

    let plates = |filter: QueueFilter| -> Vec<String> {
        queue
            .list_queue(&filter)
            .unwrap()
            .into_iter()
            .map(|e| e.plate)
            .collect()
    };

    assert_eq!(plates(QueueFilter::default()), vec!["PEND001", "DONE001"]);
    assert_eq!(
        plates(QueueFilter::default().status(StatusFilter::Only(WashStatus::Cancelled))),
        vec!["GONE001"]
    );
    assert_eq!(
        plates(QueueFilter::default().status(StatusFilter::All)),
        vec!["PEND001", "DONE001", "GONE001"]
    );
}

#[test]
fn date_filter_keeps_only_that_local_day() {
    let (queue, _) = queue();
    let day = future_day(3);

    for (plate, at) in [
        ("EARLY01", local_at(day, 0, 0)),
        ("LATE001", local_at(day, 23, 59)),
        ("BEFORE1", local_at(day - Duration::days(1), 23, 59)),
        ("AFTER01", local_at(day + Duration::days(1), 0, 0)),
    ] {
        queue.register_service(request("Ana", plate, at)).unwrap();
    }

    let filter = QueueFilter::default().delivered_on(DayWindow::local(day).unwrap());
    let plates: Vec<_> = queue
        .list_queue(&filter)
        .unwrap()
        .into_iter()
        .map(|e| e.plate)
        .collect();
    assert_eq!(plates, vec!["EARLY01", "LATE001"]);
}

#[test]
fn wash_without_client_is_left_out() {
    let (queue, store) = queue();
    queue
        .register_service(request("Ana", "ABC1234", in_hours(1)))
        .unwrap();
    store
        .models::<Wash>()
        .insert(&Wash::pending(
            "no-such-client".into(),
            "ORPHAN1".into(),
            "Uno".into(),
            Decimal::ZERO,
            in_hours(2),
            "cash".into(),
        ))
        .unwrap();

    let listed = queue.list_queue(&QueueFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].plate, "ABC1234");
}

#[test]
fn sorted_by_delivery_time_and_joined_with_client() {
    let (queue, _) = queue();
    for (name, plate, hours) in [("Caio", "CCC0003", 5), ("Ana", "AAA0001", 1), ("Bia", "BBB0002", 3)] {
        queue
            .register_service(request(name, plate, in_hours(hours)))
            .unwrap();
    }

    let listed = queue.list_queue(&QueueFilter::default()).unwrap();
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].delivery_time <= pair[1].delivery_time));

    let names: Vec<_> = listed.iter().map(|e| e.client_name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bia", "Caio"]);
    assert_eq!(listed[0].client_phone, "11 95555-4444");
    assert_eq!(listed[0].price, Decimal::new(60, 0));
    assert_eq!(listed[0].payment_method, "card");
}
