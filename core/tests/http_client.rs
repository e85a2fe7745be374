//! Wire-level behavior of the API classes over the default transport,
//! checked against a `wiremock` server.

use std::sync::Arc;
use std::time::Duration;

use petstore_core::{
    ApiError, Configuration, ConfigurationError, Credentials, FindPetsByStatusStatus, PetApi,
    PetStatus, ReqwestTransport, StoreApi, TransportErrorKind,
};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PETS: &str = r#"[
    {"id":1,"name":"doggie","photoUrls":["https://img/1"],"status":"available"},
    {"id":2,"name":"spot","category":{"id":1,"name":"Dogs"},"photoUrls":[],"status":"available"}
]"#;

fn base_path(server: &MockServer) -> String {
    format!("{}/api/v3", server.uri())
}

fn pet_api(server: &MockServer) -> PetApi {
    PetApi::new(Arc::new(Configuration::new(base_path(server)).unwrap()))
}

#[tokio::test]
async fn find_by_status_sends_enum_wire_value_and_decodes_pets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .and(query_param("status", "available"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PETS, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let pets = pet_api(&server)
        .find_pets_by_status(Some(FindPetsByStatusStatus::Available))
        .await
        .unwrap();

    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0].name, "doggie");
    assert_eq!(pets[1].category.as_ref().unwrap().name.as_deref(), Some("Dogs"));
    assert!(pets.iter().all(|p| p.status == Some(PetStatus::Available)));

    let received = server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.as_str(),
        format!("{}/api/v3/pet/findByStatus?status=available", server.uri())
    );
}

#[tokio::test]
async fn find_by_status_without_filter_omits_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .and(query_param_is_missing("status"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let pets = pet_api(&server).find_pets_by_status(None).await.unwrap();
    assert!(pets.is_empty());

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let err = pet_api(&server)
        .find_pets_by_status(Some(FindPetsByStatusStatus::Available))
        .await
        .unwrap_err();

    match err {
        ApiError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_base_path_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = Configuration::new("").unwrap_err();
    assert_eq!(err, ConfigurationError::EmptyBasePath);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "application/json"))
        .mount(&server)
        .await;

    let err = pet_api(&server).find_pets_by_status(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"id":1}"#, "application/json"))
        .mount(&server)
        .await;

    let err = pet_api(&server).find_pets_by_status(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn configured_headers_and_credentials_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/store/inventory"))
        .and(header("api_key", "special-key"))
        .and(header("x-client", "petstore-tests"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"available":4}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Configuration::builder(base_path(&server))
        .header("X-Client", "petstore-tests")
        .credentials(Credentials::ApiKey("special-key".to_string()))
        .build()
        .unwrap();
    let inventory = StoreApi::new(Arc::new(config)).get_inventory().await.unwrap();
    assert_eq!(inventory.get("available"), Some(&4));
}

#[tokio::test]
async fn add_pet_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/pet"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "name": "doggie",
            "photoUrls": [],
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"id":99,"name":"doggie","photoUrls":[],"status":"pending"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut pet = petstore_core::Pet::new("doggie", Vec::new());
    pet.status = Some(PetStatus::Pending);
    let created = pet_api(&server).add_pet(&pet).await.unwrap();
    assert_eq!(created.id, Some(99));
}

#[tokio::test]
async fn identical_calls_produce_identical_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(2)
        .mount(&server)
        .await;

    let api = pet_api(&server);
    api.find_pets_by_status(Some(FindPetsByStatusStatus::Sold)).await.unwrap();
    api.find_pets_by_status(Some(FindPetsByStatusStatus::Sold)).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].method, received[1].method);
    assert_eq!(received[0].url, received[1].url);
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    for (status, body) in [
        ("available", r#"[{"id":1,"name":"a","photoUrls":[],"status":"available"}]"#),
        ("pending", r#"[{"id":2,"name":"p","photoUrls":[],"status":"pending"}]"#),
        ("sold", r#"[{"id":3,"name":"s","photoUrls":[],"status":"sold"}]"#),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/v3/pet/findByStatus"))
            .and(query_param("status", status))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body, "application/json")
                    .set_delay(Duration::from_millis(50)),
            )
            .mount(&server)
            .await;
    }

    let config = Arc::new(Configuration::new(base_path(&server)).unwrap());
    let first = PetApi::new(config.clone());
    let second = PetApi::new(config);

    let (available, pending, sold) = tokio::join!(
        first.find_pets_by_status(Some(FindPetsByStatusStatus::Available)),
        first.find_pets_by_status(Some(FindPetsByStatusStatus::Pending)),
        second.find_pets_by_status(Some(FindPetsByStatusStatus::Sold)),
    );
    assert_eq!(available.unwrap()[0].id, Some(1));
    assert_eq!(pending.unwrap()[0].id, Some(2));
    assert_eq!(sold.unwrap()[0].id, Some(3));
}

#[tokio::test]
async fn calls_can_run_on_spawned_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/7"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"id":7,"name":"seven","photoUrls":[]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = pet_api(&server);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let api = api.clone();
            tokio::spawn(async move { api.get_pet_by_id(7).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().name, "seven");
    }
}

#[tokio::test]
async fn dropping_the_call_cancels_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/findByStatus"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[]", "application/json")
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let api = pet_api(&server);
    let outcome = tokio::time::timeout(Duration::from_millis(100), api.find_pets_by_status(None)).await;
    assert!(outcome.is_err(), "call should still be pending when dropped");

    // The same instance remains usable after a cancelled call.
    let config = Configuration::new(base_path(&server)).unwrap();
    assert_eq!(api.configuration().base_path(), config.base_path());
}

#[tokio::test]
async fn transport_timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/pet/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{}", "application/json")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::with_timeout(Duration::from_millis(100)).unwrap();
    let config = Configuration::builder(base_path(&server))
        .transport(Arc::new(transport))
        .build()
        .unwrap();

    let err = PetApi::new(Arc::new(config)).get_pet_by_id(1).await.unwrap_err();
    match err {
        ApiError::Transport(e) => assert_eq!(e.kind(), TransportErrorKind::Timeout),
        other => panic!("expected Transport, got {other:?}"),
    }
}
