//! Integration tests for gene search using mocked HTTP responses
//!
//! These tests verify ESearch request construction and response handling
//! without making real API calls. They use wiremock to simulate NCBI.

#[path = "common/mod.rs"]
mod common;

use ncbi_gene_client::{NcbiError, ParseError, ResponseFormat};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    BRCA1_SEARCH_JSON, BRCA1_SEARCH_XML, INVALID_UID_SUMMARY_JSON, create_mock_client,
    create_mock_client_with_format, gene_summary_json, setup_endpoint_mock,
};

#[tokio::test]
#[traced_test]
async fn test_search_genes_request_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "gene"))
        .and(query_param("term", "BRCA1[gene] AND human[organism]"))
        .and(query_param("retmax", "5"))
        .and(query_param("retmode", "json"))
        .and(query_param("tool", "ncbi-gene-client-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_SEARCH_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client
        .search_genes("BRCA1[gene] AND human[organism]", 5)
        .await
        .expect("Search should succeed");

    assert_eq!(result.count, 2341);
    assert_eq!(result.ids.len(), 5);
    assert_eq!(result.ids[0], "672");
    assert_eq!(
        result.query_translation,
        "BRCA1[gene] AND \"Homo sapiens\"[Organism]"
    );
}

#[tokio::test]
#[traced_test]
async fn test_search_genes_xml_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_SEARCH_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client_with_format(&mock_server, ResponseFormat::Xml);
    let result = client.search_genes("BRCA1", 3).await.unwrap();

    assert_eq!(result.count, 2341);
    assert_eq!(result.ids, vec!["672", "12189", "497672"]);
    assert!(result.query_translation.starts_with("BRCA1[gene]"));
}

#[tokio::test]
#[traced_test]
async fn test_ids_truncated_to_requested_maximum() {
    // The server ignores retmax and returns five IDs
    let mock_server = setup_endpoint_mock("esearch.fcgi", 200, BRCA1_SEARCH_JSON).await;
    let client = create_mock_client(&mock_server);

    let result = client.search_genes("BRCA1", 2).await.unwrap();

    assert_eq!(result.ids, vec!["672", "12189"]);
    assert_eq!(result.count, 2341, "count is the total, not the page size");
}

#[tokio::test]
#[traced_test]
async fn test_max_results_clamped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "10000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_SEARCH_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = client.search_genes("BRCA1", 50_000).await;

    assert!(result.is_ok(), "Clamped search should succeed: {result:?}");
}

#[tokio::test]
#[traced_test]
async fn test_invalid_search_input_makes_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    assert!(matches!(
        client.search_genes("   ", 20).await,
        Err(NcbiError::InvalidQuery(_))
    ));
    assert!(matches!(
        client.search_genes("BRCA1", 0).await,
        Err(NcbiError::InvalidQuery(_))
    ));
    assert!(matches!(
        client.search_by_gene_symbol("", None).await,
        Err(NcbiError::InvalidQuery(_))
    ));

    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_server_error_maps_to_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1) // no automatic retry
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.search_genes("BRCA1", 5).await.unwrap_err();

    match &err {
        NcbiError::Upstream { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected Upstream error, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
#[traced_test]
async fn test_in_body_error_maps_to_upstream() {
    let body = r#"{"header":{"type":"esearch","version":"0.3"},"esearchresult":{"ERROR":"Invalid query"}}"#;
    let mock_server = setup_endpoint_mock("esearch.fcgi", 200, body).await;
    let client = create_mock_client(&mock_server);

    let err = client.search_genes("BRCA1[", 5).await.unwrap_err();
    assert!(matches!(err, NcbiError::Upstream { status: 200, .. }));
}

#[tokio::test]
#[traced_test]
async fn test_html_page_is_parse_error() {
    let body = "<!DOCTYPE html><html><head><title>Service unavailable</title></head><body></body></html>";
    let mock_server = setup_endpoint_mock("esearch.fcgi", 200, body).await;

    for format in [ResponseFormat::Json, ResponseFormat::Xml] {
        let client = create_mock_client_with_format(&mock_server, format);
        let err = client.search_genes("BRCA1", 5).await.unwrap_err();

        assert!(
            matches!(err, NcbiError::Parse(ParseError::UnexpectedFormat(_))),
            "{format}: {err:?}"
        );
    }
}

#[tokio::test]
#[traced_test]
async fn test_truncated_xml_is_parse_error() {
    let truncated = &BRCA1_SEARCH_XML[..BRCA1_SEARCH_XML.find("<Id>12189").unwrap()];
    let mock_server = setup_endpoint_mock("esearch.fcgi", 200, truncated).await;
    let client = create_mock_client_with_format(&mock_server, ResponseFormat::Xml);

    let err = client.search_genes("BRCA1", 5).await.unwrap_err();
    assert!(matches!(err, NcbiError::Parse(ParseError::Xml(_))));
}

/// Mount an ESummary mock for one gene ID
async fn mount_gene_summary(mock_server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("db", "gene"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
#[traced_test]
async fn test_search_by_gene_symbol_keeps_ranking_and_skips_missing() {
    let mock_server = MockServer::start().await;

    let search_body = r#"{"esearchresult":{"count":"4","retmax":"4","idlist":["7157","0","22059","24842"],"querytranslation":"TP53[gene]"}}"#;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "TP53[gene] AND human[organism]"))
        .and(query_param("retmax", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_gene_summary(&mock_server, "7157", gene_summary_json("7157", "TP53")).await;
    mount_gene_summary(&mock_server, "0", INVALID_UID_SUMMARY_JSON.to_string()).await;
    mount_gene_summary(&mock_server, "22059", gene_summary_json("22059", "Trp53")).await;
    mount_gene_summary(&mock_server, "24842", gene_summary_json("24842", "Tp53")).await;

    let client = create_mock_client(&mock_server);
    let genes = client
        .search_by_gene_symbol("TP53", Some("human"))
        .await
        .expect("Symbol search should succeed");

    let ids: Vec<&str> = genes.iter().map(|g| g.gene_id.as_str()).collect();
    assert_eq!(ids, vec!["7157", "22059", "24842"]);
    assert_eq!(genes[0].name, "TP53");
}

#[tokio::test]
#[traced_test]
async fn test_search_by_gene_symbol_aborts_on_upstream_error() {
    let mock_server = MockServer::start().await;

    let search_body = r#"{"esearchresult":{"count":"2","idlist":["7157","22059"]}}"#;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_body))
        .mount(&mock_server)
        .await;

    mount_gene_summary(&mock_server, "7157", gene_summary_json("7157", "TP53")).await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("id", "22059"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client.search_by_gene_symbol("TP53", None).await.unwrap_err();

    assert!(matches!(err, NcbiError::Upstream { status: 503, .. }));
}

#[tokio::test]
#[traced_test]
async fn test_search_by_gene_symbol_no_hits() {
    let search_body = r#"{"esearchresult":{"count":"0","retmax":"0","idlist":[]}}"#;
    let mock_server = setup_endpoint_mock("esearch.fcgi", 200, search_body).await;
    let client = create_mock_client(&mock_server);

    let genes = client
        .search_by_gene_symbol("NOTAREALGENE", Some("human"))
        .await
        .unwrap();

    assert!(genes.is_empty());
}
