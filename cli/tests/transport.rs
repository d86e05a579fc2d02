use task_list_cli::Transport;
use task_list_core::{ItemFields, TaskApi};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

#[tokio::test]
async fn executes_requests_and_returns_status_as_data() {
    let base_url = start_server().await;
    let api = TaskApi::new(&base_url);
    let transport = Transport::new().unwrap();

    let request = api
        .build_create_item(&ItemFields::new("Buy milk", "two litres"))
        .unwrap();
    let created = transport.execute(request).await.unwrap();
    assert_eq!(created.status, 201);
    let id = api.parse_create_item(created).unwrap().expect("server assigns an id");

    let listed = transport.execute(api.build_list_items()).await.unwrap();
    let items = api.parse_list_items(listed).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id.as_ref(), Some(&id));
    assert_eq!(items[0].description, "two litres");

    let missing = api
        .build_update_item(&"nope".into(), &ItemFields::new("x", "y"))
        .unwrap();
    let response = transport.execute(missing).await.unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let api = TaskApi::new(&format!("http://{addr}"));
    let transport = Transport::new().unwrap();
    assert!(transport.execute(api.build_list_items()).await.is_err());
}
