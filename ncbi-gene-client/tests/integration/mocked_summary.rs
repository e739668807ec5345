//! Integration tests for gene/protein records using mocked HTTP responses
//!
//! These tests cover ESummary and EFetch handling through [`GeneClient`] and
//! [`EntrezBridge`] without making real API calls.

#[path = "common/mod.rs"]
mod common;

use ncbi_gene_client::{Database, NcbiError, ParseError, ResponseFormat};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    BRCA1_FASTA, BRCA1_GENE_SUMMARY_JSON, BRCA1_GENE_SUMMARY_XML, BRCA1_PROTEIN_SUMMARY_JSON,
    INVALID_UID_SUMMARY_JSON, create_mock_client, create_mock_client_with_format,
    setup_endpoint_mock,
};

#[tokio::test]
#[traced_test]
async fn test_fetch_gene_info_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("db", "gene"))
        .and(query_param("id", "672"))
        .and(query_param("retmode", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_GENE_SUMMARY_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let gene = client.fetch_gene_info("672").await.expect("Fetch should succeed");

    assert_eq!(gene.gene_id, "672");
    assert_eq!(gene.name, "BRCA1");
    assert_eq!(gene.description, "BRCA1 DNA repair associated");
    assert_eq!(gene.organism, "Homo sapiens");
    assert_eq!(gene.common_name, "human");
    assert_eq!(gene.tax_id, "9606");
    assert_eq!(gene.chromosome, "17");
    assert_eq!(gene.map_location, "17q21.31");
    assert_eq!(gene.gene_type, "genomic");
    assert_eq!(gene.other_aliases.len(), 9);
    assert_eq!(gene.other_aliases[0], "BRCAI");
    assert_eq!(gene.other_designations.len(), 3);
    assert!(gene.summary.contains("nuclear phosphoprotein"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_gene_info_formats_agree() {
    let json_server = setup_endpoint_mock("esummary.fcgi", 200, BRCA1_GENE_SUMMARY_JSON).await;
    let xml_server = setup_endpoint_mock("esummary.fcgi", 200, BRCA1_GENE_SUMMARY_XML).await;

    let from_json = create_mock_client(&json_server)
        .fetch_gene_info("672")
        .await
        .unwrap();
    let from_xml = create_mock_client_with_format(&xml_server, ResponseFormat::Xml)
        .fetch_gene_info("672")
        .await
        .unwrap();

    assert_eq!(from_json, from_xml);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_gene_info_not_found() {
    let mock_server = setup_endpoint_mock("esummary.fcgi", 200, INVALID_UID_SUMMARY_JSON).await;
    let client = create_mock_client(&mock_server);

    let err = client.fetch_gene_info("0").await.unwrap_err();

    match err {
        NcbiError::NotFound { database, id } => {
            assert_eq!(database, Database::Gene);
            assert_eq!(id, "0");
        }
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
#[traced_test]
async fn test_fetch_gene_info_not_found_xml() {
    let body = r#"<?xml version="1.0" ?>
<eSummaryResult>
<DocumentSummarySet status="OK">
<DocumentSummary uid="0"><error>cannot get document summary</error></DocumentSummary>
</DocumentSummarySet>
</eSummaryResult>"#;
    let mock_server = setup_endpoint_mock("esummary.fcgi", 200, body).await;
    let client = create_mock_client_with_format(&mock_server, ResponseFormat::Xml);

    let err = client.fetch_gene_info("0").await.unwrap_err();
    assert!(matches!(err, NcbiError::NotFound { .. }));
}

#[tokio::test]
#[traced_test]
async fn test_truncated_summary_is_parse_error() {
    let cut = BRCA1_GENE_SUMMARY_XML.find("<Organism>").unwrap();
    let mock_server =
        setup_endpoint_mock("esummary.fcgi", 200, &BRCA1_GENE_SUMMARY_XML[..cut]).await;
    let client = create_mock_client_with_format(&mock_server, ResponseFormat::Xml);

    let err = client.fetch_gene_info("672").await.unwrap_err();
    assert!(matches!(err, NcbiError::Parse(ParseError::Xml(_))));
}

#[tokio::test]
#[traced_test]
async fn test_invalid_ids_make_no_request() {
    let mock_server = MockServer::start().await;
    let client = create_mock_client(&mock_server);

    assert!(matches!(
        client.fetch_gene_info("BRCA1").await,
        Err(NcbiError::InvalidId { .. })
    ));
    assert!(matches!(
        client.fetch_protein_info("NP_009225;DROP").await,
        Err(NcbiError::InvalidId { .. })
    ));
    assert!(matches!(
        client.fetch_protein_fasta("").await,
        Err(NcbiError::InvalidId { .. })
    ));

    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_protein_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("db", "protein"))
        .and(query_param("id", "NP_009225.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_PROTEIN_SUMMARY_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let protein = client.fetch_protein_info("NP_009225.1").await.unwrap();

    assert_eq!(protein.protein_id, "NP_009225.1");
    assert_eq!(protein.name, "NP_009225");
    assert!(protein.description.starts_with("breast cancer type 1"));
    assert_eq!(protein.organism, "Homo sapiens");
    assert_eq!(protein.sequence_length, 1863);
    assert_eq!(protein.accession_version, "NP_009225.1");
    assert_eq!(protein.gi, "6552299");
    assert_eq!(protein.mol_type, "aa");
    assert_eq!(protein.tax_id, "9606");
    assert_eq!(protein.source_db, "refseq");
}

#[tokio::test]
#[traced_test]
async fn test_fetch_protein_fasta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "protein"))
        .and(query_param("id", "NP_009225.1"))
        .and(query_param("rettype", "fasta"))
        .and(query_param("retmode", "text"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_FASTA))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let fasta = client.fetch_protein_fasta("NP_009225.1").await.unwrap();

    assert!(fasta.starts_with(">NP_009225.1"));
    assert_eq!(fasta.lines().count(), 3);
}

#[tokio::test]
#[traced_test]
async fn test_fetch_protein_fasta_error_text() {
    let body = "Error: F a i l u r e in retrieving the data.\n";
    let mock_server = setup_endpoint_mock("efetch.fcgi", 200, body).await;
    let client = create_mock_client(&mock_server);

    let err = client.fetch_protein_fasta("XP_999999999").await.unwrap_err();
    assert!(matches!(err, NcbiError::Parse(ParseError::UnexpectedFormat(_))));
}

#[tokio::test]
#[traced_test]
async fn test_raw_summary_passthrough() {
    let mock_server = setup_endpoint_mock("esummary.fcgi", 200, BRCA1_GENE_SUMMARY_JSON).await;
    let client = create_mock_client(&mock_server);

    let fields = client.summary("672", Database::Gene).await.unwrap();

    assert_eq!(fields.text("uid"), "672");
    assert_eq!(fields.text("nomenclaturename"), "BRCA1 DNA repair associated");
    let json = serde_json::to_value(&fields).unwrap();
    assert_eq!(json["organism"]["scientificname"], "Homo sapiens");
}

#[tokio::test]
#[traced_test]
async fn test_rate_limit_status_is_retryable_upstream_error() {
    let body = r#"{"error":"API rate limit exceeded","api-key":"1.2.3.4","count":"11","limit":"10"}"#;
    let mock_server = setup_endpoint_mock("esummary.fcgi", 429, body).await;
    let client = create_mock_client(&mock_server);

    let err = client.fetch_gene_info("672").await.unwrap_err();

    match &err {
        NcbiError::Upstream { status, message } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "API rate limit exceeded");
        }
        other => panic!("Expected Upstream, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
#[traced_test]
async fn test_summaries_batches_large_id_lists() {
    let mock_server = setup_endpoint_mock("esummary.fcgi", 200, BRCA1_GENE_SUMMARY_JSON).await;
    let client = create_mock_client(&mock_server);

    let ids: Vec<String> = (1..=250).map(|i| i.to_string()).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let records = client
        .bridge()
        .summaries(&id_refs, Database::Gene)
        .await
        .unwrap();

    // One record per mocked response, one response per batch
    assert_eq!(records.len(), 2);
    let received_requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 2);
}

#[tokio::test]
#[traced_test]
async fn test_credentials_sent_with_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("email", "researcher@university.edu"))
        .and(query_param("api_key", "test_key_123"))
        .and(query_param("tool", "ncbi-gene-client-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BRCA1_GENE_SUMMARY_JSON))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ncbi_gene_client::ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_tool("ncbi-gene-client-tests")
        .with_email("researcher@university.edu")
        .with_api_key("test_key_123");
    let client = ncbi_gene_client::GeneClient::with_config(config);

    assert!(client.fetch_gene_info("672").await.is_ok());
}
