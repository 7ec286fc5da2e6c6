//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: option types → HTTP requests → typed results and pages

use cloudrest::codec::{BodyFields, BodyOptions, QueryFields, QueryOptions, Timestamp};
use cloudrest::{
    ApiResult, ClientConfig, Error, LinkedPages, MarkerPages, RequestOptions, ServiceClient,
    SinglePage,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn client_for(server: &MockServer) -> ServiceClient {
    let mut config = ClientConfig::new(format!("{}/v2", server.uri()));
    config.token = Some("test-token".to_string());
    config.build_client().unwrap()
}

#[derive(Debug, Deserialize, PartialEq)]
struct Tenant {
    id: String,
    name: String,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct Cluster {
    id: String,
    status: String,
    #[serde(default)]
    created_at: Timestamp,
    #[serde(default)]
    updated_at: Timestamp,
    #[serde(default)]
    init_at: Timestamp,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Zone {
    id: String,
    name: String,
    #[serde(default)]
    ttl: u32,
}

struct CreateZoneOpts {
    name: String,
    email: String,
    ttl: Option<u32>,
}

impl BodyOptions for CreateZoneOpts {
    fn body_fields(&self) -> BodyFields {
        BodyFields::new()
            .required("name", &self.name)
            .required("email", &self.email)
            .optional("ttl", &self.ttl)
    }
}

struct ListImagesOpts {
    limit: u32,
    visibility: String,
}

impl QueryOptions for ListImagesOpts {
    fn query_fields(&self) -> QueryFields {
        QueryFields::new()
            .optional("limit", &self.limit)
            .optional("visibility", &self.visibility)
    }
}

// ============================================================================
// Link Pagination
// ============================================================================

#[tokio::test]
async fn test_link_listing_all_pages() {
    let mock_server = MockServer::start().await;
    let page2_url = format!("{}/v2/tenants?marker=t2", mock_server.uri());

    // Page 1
    Mock::given(method("GET"))
        .and(path("/v2/tenants"))
        .and(query_param_is_missing("marker"))
        .and(header("X-Auth-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenants": [
                {"id": "t1", "name": "admin", "enabled": true},
                {"id": "t2", "name": "demo", "enabled": false}
            ],
            "tenants_links": [{"rel": "next", "href": page2_url}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2
    Mock::given(method("GET"))
        .and(path("/v2/tenants"))
        .and(query_param("marker", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenants": [
                {"id": "t3", "name": "alt", "enabled": true},
                {"id": "t4", "name": "ops", "enabled": true}
            ],
            "tenants_links": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = client.list("tenants", &(), LinkedPages::for_collection("tenants"));

    let all = pager.all_pages().await.unwrap();
    assert_eq!(all.page_count(), 2);

    let tenants: Vec<Tenant> = all.extract().unwrap();
    let ids: Vec<&str> = tenants.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
    assert!(!tenants[1].enabled);
}

#[tokio::test]
async fn test_callback_stop_makes_single_request() {
    let mock_server = MockServer::start().await;
    let page2_url = format!("{}/v2/tenants?marker=t1", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v2/tenants"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenants": [{"id": "t1", "name": "admin", "enabled": true}],
            "tenants_links": [{"rel": "next", "href": page2_url}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/tenants"))
        .and(query_param("marker", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tenants": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut first = None;
    client
        .list("tenants", &(), LinkedPages::for_collection("tenants"))
        .each_page(|page| {
            first = page.extract::<Tenant>()?.into_iter().next();
            Ok(false)
        })
        .await
        .unwrap();

    assert_eq!(first.map(|t| t.name), Some("admin".to_string()));
}

// ============================================================================
// Marker Pagination
// ============================================================================

#[tokio::test]
async fn test_marker_listing_follows_last_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/images"))
        .and(query_param("limit", "2"))
        .and(query_param("visibility", "public"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{"id": "img-a"}, {"id": "img-b"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/images"))
        .and(query_param("marker", "img-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{"id": "img-c"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/images"))
        .and(query_param("marker", "img-c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListImagesOpts {
        limit: 2,
        visibility: "public".to_string(),
    };
    let all = client
        .list("images", &opts, MarkerPages::new("images", "id"))
        .all_pages()
        .await
        .unwrap();

    assert_eq!(all.page_count(), 3);
    let ids: Vec<Value> = all.into_records().into_iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("img-a"), json!("img-b"), json!("img-c")]);
}

#[tokio::test]
async fn test_marker_empty_first_page_stops() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [],
            "next": "/v2/images?marker=img-z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut pages = 0;
    client
        .list("images", &(), MarkerPages::new("images", "id"))
        .each_page(|_| {
            pages += 1;
            Ok(true)
        })
        .await
        .unwrap();

    assert_eq!(pages, 1);
}

#[tokio::test]
async fn test_plain_text_container_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/AUTH_test"))
        .and(query_param_is_missing("marker"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain; charset=utf-8")
                .set_body_string("janeausten\nmarktwain\n"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/AUTH_test"))
        .and(query_param("marker", "marktwain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = client
        .list("AUTH_test", &(), MarkerPages::top_level("name"))
        .all_pages()
        .await
        .unwrap();

    assert_eq!(all.extract::<String>().unwrap(), vec!["janeausten", "marktwain"]);
}

// ============================================================================
// Single Resources
// ============================================================================

#[tokio::test]
async fn test_get_not_found_is_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/zones/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("Content-Type", "text/html")
                .set_body_string("<html><body>404 Not Found</body></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: ApiResult<Zone> = client.get("zones/missing", &RequestOptions::new()).await;

    match assert_err!(result.with_root_key("zone").extract()) {
        Error::UnexpectedStatus { status, expected, body } => {
            assert_eq!(status, 404);
            assert_eq!(expected, vec![200]);
            assert!(body.contains("404 Not Found"));
        }
        other => panic!("Expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_null_and_empty_timestamps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/clusters/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cluster": {
                "id": "c1",
                "status": "INIT",
                "created_at": null,
                "updated_at": "",
                "init_at": "2015-02-10T14:26:14"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: ApiResult<Cluster> = client.get("clusters/c1", &RequestOptions::new()).await;
    let cluster = assert_ok!(result.with_root_key("cluster").extract());

    assert_eq!(cluster.id, "c1");
    assert_eq!(cluster.status, "INIT");
    assert!(cluster.created_at.is_none());
    assert_eq!(cluster.updated_at, Timestamp::NONE);
    assert_eq!(
        cluster.init_at.to_rfc3339_milli().as_deref(),
        Some("2015-02-10T14:26:14.000Z")
    );
}

#[tokio::test]
async fn test_create_missing_required_field_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = CreateZoneOpts {
        name: "example.org.".to_string(),
        email: String::new(),
        ttl: None,
    };
    let result: ApiResult<Zone> = client
        .create("zones", &opts, "", &RequestOptions::new())
        .await;

    match assert_err!(result.extract()) {
        Error::Validation { field, .. } => assert_eq!(field, "email"),
        other => panic!("Expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zone_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/zones"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "example.org.", "email": "joe@example.org", "ttl": 7200})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "a86dba58", "name": "example.org.", "ttl": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v2/zones/a86dba58"))
        .and(body_json(json!({"ttl": 600})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "a86dba58", "name": "example.org.", "ttl": 600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/zones/a86dba58"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"status": "PENDING"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = CreateZoneOpts {
        name: "example.org.".to_string(),
        email: "joe@example.org".to_string(),
        ttl: Some(7200),
    };

    let created: Zone = client
        .create("zones", &opts, "", &RequestOptions::new())
        .await
        .extract()
        .unwrap();
    assert_eq!(created.id, "a86dba58");

    let path = format!("zones/{}", created.id);
    let updated: Zone = client
        .patch(&path, json!({"ttl": 600}), &RequestOptions::new())
        .await
        .extract()
        .unwrap();
    assert_eq!(updated.ttl, 600);

    assert_ok!(client.delete(&path, &RequestOptions::new()).await.extract_err());
}

#[tokio::test]
async fn test_head_headers_extraction() {
    #[derive(Debug, Deserialize)]
    struct ContainerHeader {
        #[serde(rename = "x-container-object-count")]
        object_count: String,
        #[serde(default)]
        date: Timestamp,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/v2/AUTH_test/books"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-Container-Object-Count", "42")
                .insert_header("Date", "Wed, 17 Aug 2016 19:25:43 GMT"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.head("AUTH_test/books", &RequestOptions::new()).await;
    let parsed: ContainerHeader = result.extract_headers().unwrap();

    assert_eq!(parsed.object_count, "42");
    assert!(parsed.date.is_some());
}

#[tokio::test]
async fn test_unexpected_status_during_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/shares"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .list("shares", &(), SinglePage::new("shares"))
        .all_pages()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.partial_records().is_none());
}
