use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blueflights_core::offer::FlightOffer;
use blueflights_core::place::LocationCategory;
use blueflights_core::repository::{FlightShopping, LocationLookup};
use blueflights_core::search::SearchCriteria;
use blueflights_core::UpstreamError;
use blueflights_provider::AmadeusClient;

async fn mock_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/security/oauth2/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 1799,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

fn criteria() -> SearchCriteria {
    serde_json::from_value(serde_json::json!({
        "originLocationCode": "DEL",
        "destinationLocationCode": "BOM",
        "departureDate": "2025-12-25",
        "children": 1,
        "travelClass": "BUSINESS"
    }))
    .unwrap()
}

fn offer_payload() -> serde_json::Value {
    serde_json::json!({
        "type": "flight-offer",
        "id": "1",
        "source": "GDS",
        "itineraries": [
            {
                "duration": "PT2H15M",
                "segments": [
                    {
                        "departure": { "iataCode": "DEL", "at": "2025-12-25T06:10:00" },
                        "arrival": { "iataCode": "BOM", "at": "2025-12-25T08:25:00" },
                        "carrierCode": "AI",
                        "number": "441",
                        "aircraft": { "code": "32N" },
                        "duration": "PT2H15M",
                        "id": "10",
                        "numberOfStops": 0
                    }
                ]
            }
        ],
        "price": { "currency": "INR", "total": "5432.10" }
    })
}

#[tokio::test]
async fn test_location_search_sends_token_and_parses_places() {
    let server = MockServer::start().await;
    mock_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("keyword", "DEL"))
        .and(query_param("subType", "AIRPORT,CITY"))
        .and(query_param("page[limit]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "ADEL",
                    "name": "INDIRA GANDHI INTL",
                    "iataCode": "DEL",
                    "subType": "AIRPORT",
                    "address": { "cityName": "NEW DELHI", "countryName": "INDIA" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    let places = client.search_locations("DEL", None).await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].iata_code, "DEL");
    assert_eq!(places[0].sub_type, LocationCategory::Airport);
}

#[tokio::test]
async fn test_location_search_with_category_filter() {
    let server = MockServer::start().await;
    mock_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations"))
        .and(query_param("subType", "CITY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    let places = client
        .search_locations("NEW", Some(LocationCategory::City))
        .await
        .unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn test_offer_search_builds_query_and_parses_response() {
    let server = MockServer::start().await;
    mock_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/shopping/flight-offers"))
        .and(query_param("originLocationCode", "DEL"))
        .and(query_param("destinationLocationCode", "BOM"))
        .and(query_param("departureDate", "2025-12-25"))
        .and(query_param("adults", "1"))
        .and(query_param("children", "1"))
        .and(query_param("travelClass", "BUSINESS"))
        .and(query_param("currencyCode", "INR"))
        .and(query_param("max", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [offer_payload()],
            "dictionaries": {
                "carriers": { "AI": "AIR INDIA" },
                "aircraft": { "32N": "AIRBUS A320NEO" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    let response = client.search_offers(&criteria()).await.unwrap();
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].itineraries[0].segments[0].carrier_code, "AI");
    assert_eq!(response.dictionaries.carrier_name("AI"), "AIR INDIA");
}

#[tokio::test]
async fn test_token_is_cached_across_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/security/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-token",
            "expires_in": 1799
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/reference-data/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    client.search_locations("DEL", None).await.unwrap();
    client.search_locations("BOM", None).await.unwrap();
}

#[tokio::test]
async fn test_provider_failure_carries_diagnostic_body() {
    let server = MockServer::start().await;
    mock_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/shopping/flight-offers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [{ "status": 400, "code": 477, "title": "INVALID FORMAT" }]
        })))
        .mount(&server)
        .await;

    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    let err = client.search_offers(&criteria()).await.unwrap_err();
    match err {
        UpstreamError::Provider { status, details } => {
            assert_eq!(status, 400);
            assert_eq!(details["errors"][0]["code"], 477);
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_price_verification_wraps_offer_verbatim() {
    let server = MockServer::start().await;
    mock_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/shopping/flight-offers/pricing"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("flight-offers-pricing"))
        // The unmodeled "source" field must survive into the request body.
        .and(body_string_contains("GDS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": [offer_payload()]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let offer: FlightOffer = serde_json::from_value(offer_payload()).unwrap();
    let client = AmadeusClient::new(&server.uri(), "key", "secret");
    let confirmed = client.verify_price(&offer).await.unwrap();
    assert_eq!(confirmed["type"], "flight-offers-pricing");
    assert_eq!(confirmed["flightOffers"][0]["id"], "1");
}
