//! Store and HTTP service together against a local stub server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::Router;
use tokio::sync::mpsc;

use fasthome_core::{ClientConfig, DeviceService, DeviceStore, StoreEvent, StoreState};

const DEVICES: &str = r#"{"data":[
    {"id":1,"name":"Lamp","icon":"/i/1.png","isOnline":true,"type":2,"status":"ok","lastWorkTime":1000},
    {"id":2,"name":"Heater","icon":"/i/2.png","isOnline":false,"type":5,"status":"off","lastWorkTime":1001},
    {"id":3,"name":"Kettle","icon":"/i/3.png","isOnline":true,"type":7,"status":"boiling","lastWorkTime":1002}
]}"#;

#[derive(Clone)]
struct Stub {
    list_fails: Arc<AtomicBool>,
}

async fn list(State(stub): State<Stub>) -> (StatusCode, &'static str) {
    if stub.list_fails.load(Ordering::SeqCst) {
        (StatusCode::NOT_FOUND, "not json at all")
    } else {
        (StatusCode::OK, DEVICES)
    }
}

async fn remove(Path(id): Path<i64>) -> StatusCode {
    // The heater refuses to be deleted.
    if id == 2 {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn start_stub() -> (String, Stub) {
    let stub = Stub {
        list_fails: Arc::new(AtomicBool::new(false)),
    };
    let router = Router::new()
        .route("/api/v1/test/devices", get(list))
        .route("/api/v1.1/test/devices/{id}", delete(remove))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

fn drain(events: &mut mpsc::UnboundedReceiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn ids(store: &DeviceStore) -> Vec<i64> {
    store.devices().iter().map(|d| d.id).collect()
}

async fn loaded_store() -> (DeviceStore, mpsc::UnboundedReceiver<StoreEvent>, Stub) {
    let (base_url, stub) = start_stub().await;
    let config = ClientConfig::default()
        .with_overrides(Some(base_url), Some(5))
        .unwrap();
    let service = DeviceService::new(&config).unwrap();

    let (tx, mut events) = mpsc::unbounded_channel();
    let mut store = DeviceStore::new(Arc::new(service), tx);
    store.refresh();
    store.settle().await;
    drain(&mut events);

    (store, events, stub)
}

#[tokio::test]
async fn test_refresh_loads_server_list() {
    let (store, _events, _stub) = loaded_store().await;

    assert_eq!(store.state(), StoreState::Loaded);
    assert_eq!(ids(&store), vec![1, 2, 3]);

    let lamp = &store.devices()[0];
    assert_eq!(lamp.name, "Lamp");
    assert_eq!(lamp.icon, "/i/1.png");
    assert!(lamp.is_online);
    assert_eq!(lamp.device_type, 2);
    assert_eq!(lamp.status, "ok");
    assert_eq!(lamp.last_work_time, 1000.0);
}

#[tokio::test]
async fn test_rejected_delete_is_rolled_back() {
    let (mut store, mut events, _stub) = loaded_store().await;

    assert!(store.delete(1));
    assert_eq!(ids(&store), vec![1, 3]);

    store.settle().await;

    assert_eq!(ids(&store), vec![1, 2, 3]);
    let events = drain(&mut events);
    assert_eq!(events[0], StoreEvent::ItemRemovedAt(1));
    assert!(matches!(&events[1], StoreEvent::ListChanged(list) if list.len() == 3));
    assert_eq!(
        events[2],
        StoreEvent::Error("server error (status code: 500)".to_string())
    );
}

#[tokio::test]
async fn test_accepted_delete_stands() {
    let (mut store, mut events, _stub) = loaded_store().await;

    assert!(store.delete(2));
    store.settle().await;

    assert_eq!(ids(&store), vec![1, 2]);
    assert_eq!(drain(&mut events), vec![StoreEvent::ItemRemovedAt(2)]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let (mut store, mut events, stub) = loaded_store().await;

    stub.list_fails.store(true, Ordering::SeqCst);
    store.refresh();
    store.settle().await;

    assert_eq!(ids(&store), vec![1, 2, 3]);
    match drain(&mut events).as_slice() {
        [StoreEvent::Error(message)] => assert!(message.contains("404")),
        other => panic!("unexpected events {:?}", other),
    }
}
