use avendro_api::Resource;
use avendro_storage::KeyValueStore;
use serde::Deserialize;
use serde_json::json;

mod common;

use common::{client_for, MockBackend};

#[derive(Debug, Deserialize)]
struct Company {
    id: u64,
    company_name: String,
}

#[tokio::test]
async fn test_list_and_get_are_authenticated() {
    let backend = MockBackend::spawn().await;
    backend.respond(
        "GET",
        "/companies/",
        200,
        json!([
            { "id": 1, "company_name": "Acme Lending" },
            { "id": 2, "company_name": "Pera Agad" }
        ]),
    );
    backend.respond(
        "GET",
        "/companies/2/",
        200,
        json!({ "id": 2, "company_name": "Pera Agad" }),
    );
    let (client, store) = client_for(&backend.base_url);
    store.set_item("access_token", "acc-9").unwrap();

    let companies: Vec<Company> = client.list(Resource::Companies).await.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].company_name, "Acme Lending");

    let company: Company = client.get(Resource::Companies, 2).await.unwrap();
    assert_eq!(company.id, 2);

    for request in backend.requests() {
        assert_eq!(request.method, "GET");
        assert_eq!(request.header("authorization"), Some("Bearer acc-9"));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }
}

#[tokio::test]
async fn test_update_sends_patch() {
    let backend = MockBackend::spawn().await;
    backend.respond(
        "PATCH",
        "/clients/15/",
        200,
        json!({ "id": 15, "status": "approved" }),
    );
    let (client, _store) = client_for(&backend.base_url);

    let updated: serde_json::Value = client
        .update(Resource::Clients, 15, &json!({ "status": "approved" }))
        .await
        .unwrap();

    assert_eq!(updated["status"], json!("approved"));
    let request = backend.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.path, "/clients/15/");
    assert_eq!(request.body, json!({ "status": "approved" }));
}

#[tokio::test]
async fn test_missing_record_surfaces_detail() {
    let backend = MockBackend::spawn().await;
    let (client, _store) = client_for(&backend.base_url);

    let err = client
        .get::<serde_json::Value>(Resource::Users, 404)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Not found.");
}
