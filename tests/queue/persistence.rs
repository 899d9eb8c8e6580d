use carwash_queue::{QueueFilter, Store, WashQueue, WashStatus};

use crate::support::{in_hours, request};

#[test]
fn file_store_keeps_queue_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", dir.path().join("carwash.json").display());

    let wash_id = {
        let queue = WashQueue::new(Store::connect(&url).unwrap());
        queue
            .register_service(request("Ana", "ABC1234", in_hours(4)))
            .unwrap()
            .wash
            .id
    };

    let queue = WashQueue::new(Store::connect(&url).unwrap());
    let listed = queue.list_queue(&QueueFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, wash_id);
    assert_eq!(listed[0].client_name, "Ana");

    let clients = queue.clients().list().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].plate, "ABC1234");

    let err = queue
        .register_service(request("Ana", "ABC1234", in_hours(5)))
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    queue.update_status(&wash_id, WashStatus::Completed).unwrap();
}
