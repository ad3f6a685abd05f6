use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use blog_frontend::api::{ApiClient, LoginError};
use blog_frontend::models::BlogQuery;
use blog_frontend::web::{app, build_templates, AppState};
use blog_frontend::Config;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn blog_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "Post body",
        "created_at": "2024-01-15T10:30:00",
        "tags": ["rust"],
        "likes_count": 2,
        "comments_count": 1,
        "author": { "id": 1, "username": "alice" }
    })
}

fn page_json(data: Vec<serde_json::Value>, total: u64) -> serde_json::Value {
    json!({ "total": total, "limit": 12, "offset": 0, "data": data })
}

fn test_app(server: &MockServer) -> Router {
    app_for(&server.uri())
}

fn app_for(base_url: &str) -> Router {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    let api = ApiClient::new(&config.api.base_url).expect("Failed to build client");
    let templates = build_templates().expect("Failed to build templates");
    app(Arc::new(AppState::with_client(config, api, templates)))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A local address with nothing listening on it.
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

mod api_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_blogs_sends_only_present_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        api.fetch_blogs(&BlogQuery {
            search: Some("x".to_string()),
            limit: Some(5),
            offset: Some(10),
        })
        .await
        .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let mut pairs: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("offset".to_string(), "10".to_string()),
                ("search".to_string(), "x".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_blogs_without_params_has_empty_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        api.fetch_blogs(&BlogQuery::default()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query().unwrap_or(""), "");
    }

    #[tokio::test]
    async fn test_fetch_blogs_carries_revalidation_hint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .and(header_eq("cache-control", "max-age=60"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![blog_json(2, "b"), blog_json(1, "a")], 2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let page = api.fetch_blogs(&BlogQuery::default()).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.data[0].id, 2);
        assert_eq!(page.data[1].id, 1);
    }

    #[tokio::test]
    async fn test_fetch_blogs_failure_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "detail": "database down" })),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.fetch_blogs(&BlogQuery::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch blogs");
    }

    #[tokio::test]
    async fn test_fetch_blogs_unreachable_server() {
        let api = ApiClient::new(&unreachable_base_url()).unwrap();
        let err = api.fetch_blogs(&BlogQuery::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch blogs");
    }

    #[tokio::test]
    async fn test_fetch_blog_by_id_bypasses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/5"))
            .and(header_eq("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(blog_json(5, "Five")))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let blog = api.fetch_blog_by_id("5").await.unwrap();
        assert_eq!(blog.title, "Five");
        assert_eq!(blog.author_name(), "alice");
    }

    #[tokio::test]
    async fn test_fetch_blog_by_id_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "nope" })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.fetch_blog_by_id("404").await.unwrap_err();
        assert_eq!(err.to_string(), "Blog not found");
        assert_eq!(err.status, Some(StatusCode::NOT_FOUND));
        assert_eq!(err.id, "404");
    }

    #[tokio::test]
    async fn test_login_posts_json_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header_eq("content-type", "application/json"))
            .and(body_json(json!({ "username": "alice", "password": "password123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "a",
                "refresh_token": "b",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let tokens = api.login("alice", "password123").await.unwrap();
        assert_eq!(tokens.access_token, "a");
        assert_eq!(tokens.refresh_token, "b");
        assert_eq!(tokens.token_type, "bearer");
    }

    #[tokio::test]
    async fn test_login_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.login("alice", "password123").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_login_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri()).unwrap();
        let err = api.login("alice", "password123").await.unwrap_err();
        assert!(matches!(err, LoginError::Rejected { detail: None, .. }));
        assert_eq!(err.to_string(), "Login failed");
    }
}

mod page_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_page_renders_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page_json(vec![blog_json(1, "First"), blog_json(2, "Second")], 40)),
            )
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=60"
        );

        let html = body_string(response).await;
        assert!(html.contains("40 total posts"));
        assert!(html.contains(r#"class="grid""#));
        assert!(html.contains(r#"<a href="/blogs/1">First</a>"#));
        assert!(html.contains(r#"<a href="/blogs/2">Second</a>"#));
        assert!(!html.contains("No blogs found."));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("limit=12"));
    }

    #[tokio::test]
    async fn test_list_page_forwards_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(get("/?search=rust"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("search=rust&limit=12"));
    }

    #[tokio::test]
    async fn test_list_page_empty_search_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
            .mount(&server)
            .await;

        test_app(&server).oneshot(get("/?search=")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("limit=12"));
    }

    #[tokio::test]
    async fn test_list_page_empty_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("No blogs found."));
        assert!(html.contains("0 total posts"));
        assert!(!html.contains(r#"class="grid""#));
    }

    #[tokio::test]
    async fn test_list_page_api_failure_inline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );

        let html = body_string(response).await;
        assert!(html.contains("Failed to fetch blogs"));
        assert!(!html.contains(r#"class="grid""#));
    }

    #[tokio::test]
    async fn test_detail_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(blog_json(1, "First")))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/blogs/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );

        let html = body_string(response).await;
        assert!(html.contains("<h1>First</h1>"));
        assert!(html.contains("alice · Jan 15, 2024"));
        assert!(html.contains("Post body"));
    }

    #[tokio::test]
    async fn test_detail_page_anonymous_author() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "title": "No author",
                "created_at": "2024-01-15T10:30:00"
            })))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/blogs/3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Anonymous · Jan 15, 2024"));
        assert!(html.contains(r#"<span class="likes">❤️ 0</span>"#));
        assert!(!html.contains(r#"class="tags""#));
    }

    #[tokio::test]
    async fn test_detail_page_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/blogs/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = body_string(response).await;
        assert!(html.contains("This page could not be found."));
        assert!(!html.contains("Blog not found"));
    }

    #[tokio::test]
    async fn test_detail_page_api_error_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blogs/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let response = test_app(&server).oneshot(get("/blogs/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = MockServer::start().await;
        let response = test_app(&server)
            .oneshot(get("/no/such/page"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let response = test_app(&server).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_security_headers() {
        let server = MockServer::start().await;
        let response = test_app(&server).oneshot(get("/login")).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());
    }
}

mod login_page_tests {
    use super::*;

    fn set_cookies(response: &axum::response::Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_login_page_renders_idle_form() {
        let server = MockServer::start().await;
        let response = test_app(&server).oneshot(get("/login")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("<h1>Sign in</h1>"));
        assert!(html.contains(r#"minlength="8""#));
        assert!(html.contains(r#"<button type="submit">Sign in</button>"#));
        assert!(!html.contains(r#"role="status""#));
    }

    #[tokio::test]
    async fn test_login_success_stores_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "alice", "password": "password123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "a",
                "refresh_token": "b",
                "token_type": "bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(post_form("/login", "username=alice&password=password123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("access_token=a;")));
        assert!(cookies.iter().any(|c| c.starts_with("refresh_token=b;")));

        let html = body_string(response).await;
        assert!(html.contains("Logged in successfully. Tokens stored."));
        assert!(html.contains(r#"class="message success""#));
    }

    #[tokio::test]
    async fn test_login_rejected_shows_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(post_form("/login", "username=alice&password=wrongpass1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&response).is_empty());

        let html = body_string(response).await;
        assert!(html.contains(r#"<p class="message error" role="status">Invalid credentials</p>"#));
        assert!(html.contains(r#"value="alice""#));
    }

    #[tokio::test]
    async fn test_login_short_password_skips_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = test_app(&server)
            .oneshot(post_form("/login", "username=alice&password=short"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(set_cookies(&response).is_empty());

        let html = body_string(response).await;
        assert!(html.contains("Password must be at least 8 characters"));
    }

    #[tokio::test]
    async fn test_login_api_unreachable() {
        let response = app_for(&unreachable_base_url())
            .oneshot(post_form("/login", "username=alice&password=password123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(set_cookies(&response).is_empty());
    }
}
