use pxparser::reqwest::StatusCode;
use pxparser::{Client, Error, Session, WebEndpoint};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_log() {
    let _ = pretty_env_logger::try_init();
}

fn payload() -> Value {
    json!({
        "timestamp": "2021-08-20T12:00:00+09:00",
        "illust": {
            "12345": {
                "id": "12345",
                "title": "夏",
                "description": "it's <b>hot</b>",
                "createDate": "2021-08-19T15:00:00+00:00",
                "uploadDate": "2021-08-19T15:00:00+00:00",
                "tags": {
                    "authorId": "99",
                    "isLocked": false,
                    "tags": [{"tag": "オリジナル", "locked": true, "deletable": false}]
                },
                "userId": "99",
                "userName": "someone",
                "userAccount": "someone",
                "userIllusts": {
                    "12344": {
                        "id": "12344",
                        "title": "春",
                        "url": "https://i.pximg.net/12344_p0_square1200.jpg",
                        "tags": [],
                        "userId": "99",
                        "userName": "someone",
                        "pageCount": 1,
                        "createDate": "2021-04-01T00:00:00+09:00",
                        "updateDate": "2021-04-01T00:00:00+09:00",
                        "isBookmarkable": true
                    },
                    "12345": null
                },
                "bookmarkCount": 100,
                "likeCount": 50,
                "viewCount": 1000,
                "illustComment": ""
            }
        },
        "user": {
            "99": {
                "userId": "99",
                "name": "someone",
                "image": "https://i.pximg.net/user-profile/99_50.jpg",
                "premium": false,
                "acceptRequest": false
            }
        }
    })
}

fn page(json: &Value) -> String {
    let content = json.to_string().replace('&', "&amp;").replace('\'', "&#39;");
    format!(
        "<!DOCTYPE html><html><head><meta name=\"preload-data\" id=\"meta-preload-data\" content='{content}'></head><body></body></html>"
    )
}

async fn server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artworks/12345"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "PHPSESSID=abc; Path=/")
                .set_body_string(page(&payload())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artworks/99999999999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artworks/500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artworks/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>maintenance</body></html>"))
        .mount(&server)
        .await;
    server
}

async fn connect(server: &MockServer, id: &str) -> pxparser::Result<Client> {
    let endpoint = WebEndpoint::with_host(Some(&server.uri())).unwrap();
    Client::connect_with(Session::new(), endpoint, id).await
}

#[tokio::test]
async fn connect_by_id() {
    init_log();
    let server = server().await;
    let c = connect(&server, "12345").await.unwrap();
    let illust = c.artwork.illust("12345").unwrap();
    assert_eq!(illust.user_id, "99");
    assert_eq!(illust.title, "夏");
    assert_eq!(illust.description_text(), "it's hot");
    assert!(c.artwork.user("99").is_some());
    assert_eq!(illust.user_illusts.len(), 2);
    assert!(illust.user_illusts["12345"].is_none());
    assert_eq!(illust.other_works()[0].title, "春");
}

#[tokio::test]
async fn not_found_is_distinguishable() {
    init_log();
    let server = server().await;
    let e = connect(&server, "99999999999").await.unwrap_err();
    assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
    assert!(e.is_not_found());

    let e = connect(&server, "500").await.unwrap_err();
    assert_eq!(e.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(!e.is_not_found());
}

#[tokio::test]
async fn unreachable_host_has_no_status() {
    init_log();
    let endpoint = WebEndpoint::with_host(Some("http://127.0.0.1:1")).unwrap();
    let e = Client::connect_with(Session::new(), endpoint, "12345")
        .await
        .unwrap_err();
    assert!(matches!(e, Error::Request(_)));
    assert_eq!(e.status(), None);
    assert!(!e.is_not_found());
}

#[tokio::test]
async fn missing_anchor_reports_request_url() {
    init_log();
    let server = server().await;
    match connect(&server, "1").await {
        Err(Error::Extract { id, url, content }) => {
            assert_eq!(id, "1");
            assert_eq!(url, format!("{}/artworks/1", server.uri()));
            assert!(content.contains("maintenance"));
        }
        r => panic!("unexpected {:?}", r.map(|c| c.artwork)),
    }
}

#[tokio::test]
async fn assets_use_referer_and_session_cookies() {
    init_log();
    let server = server().await;
    let root = format!("{}/", server.uri());
    Mock::given(method("GET"))
        .and(path("/img/12344_p0.jpg"))
        .and(header("referer", root.as_str()))
        .and(header("cookie", "PHPSESSID=abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_bytes(vec![0x89, b'P', b'N', b'G']),
        )
        .expect(2)
        .mount(&server)
        .await;

    let c = connect(&server, "12345").await.unwrap();
    let url = format!("{}/img/12344_p0.jpg", server.uri());
    let (a, b) = tokio::join!(c.fetch_asset_bytes(&url), c.fetch_asset_bytes(&url));
    assert_eq!(a.unwrap(), b"\x89PNG");
    assert_eq!(b.unwrap(), b"\x89PNG");

    let e = c
        .fetch_asset_bytes(&format!("{}/img/missing.jpg", server.uri()))
        .await
        .unwrap_err();
    assert!(e.is_not_found());
}

#[tokio::test]
async fn broken_payload_is_a_decode_error() {
    init_log();
    let server = MockServer::start().await;
    let mut bad = payload();
    bad["illust"]["12345"]["viewCount"] = json!("lots");
    Mock::given(method("GET"))
        .and(path("/artworks/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&bad)))
        .mount(&server)
        .await;
    let e = connect(&server, "12345").await.unwrap_err();
    assert!(matches!(e, Error::Json(_)));
    assert_eq!(e.status(), None);
}

#[tokio::test]
async fn final_redirect_status_is_a_failure() {
    init_log();
    let server = server().await;
    Mock::given(method("GET"))
        .and(path("/artworks/7"))
        .respond_with(ResponseTemplate::new(302).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/x.jpg"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let e = connect(&server, "7").await.unwrap_err();
    assert!(matches!(e, Error::Status { .. }), "{e:?}");
    assert_eq!(e.status(), Some(StatusCode::FOUND));

    let c = connect(&server, "12345").await.unwrap();
    let e = c
        .fetch_asset_bytes(&format!("{}/img/x.jpg", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(e, Error::Status { .. }), "{e:?}");
    assert_eq!(e.status(), Some(StatusCode::NOT_MODIFIED));
}
