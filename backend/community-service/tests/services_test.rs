//! Service behaviour against a mocked data endpoint

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use community_service::models::{BoardCategory, BoardDraft, CommentDraft, NewsUpdate};
use community_service::security::{credential_hash, verify_credential};
use community_service::services::{
    ActivityService, AttendanceService, BoardService, CommentService, MediaService,
    MemberDirectory, NewsService,
};
use community_service::AppError;
use remote_store::{RemoteStore, RemoteStoreConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ROSTER_MEMBER: &str = "김종원";

fn store_for(server: &MockServer) -> RemoteStore {
    RemoteStore::new(&RemoteStoreConfig::new(server.uri(), "anon-test-key")).unwrap()
}

fn news_row(id: Uuid, category: &str, password: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": "Summer picnic",
        "content": "Bring snacks",
        "category": category,
        "created_at": "2024-05-10T09:00:00Z",
        "view_count": 4,
        "is_published": true,
        "password_hash": password.map(|p| credential_hash(p).unwrap()),
    })
}

fn comment_row(id: Uuid, news_id: Uuid, parent_id: Option<Uuid>) -> Value {
    json!({
        "id": id,
        "news_id": news_id,
        "parent_id": parent_id,
        "author_name": "Kim",
        "content": "See you there",
        "created_at": "2024-05-10T10:00:00Z",
    })
}

/// Any write other than the ones a test expects is a failure
async fn forbid_writes(server: &MockServer, methods: &[&str]) {
    for m in methods {
        Mock::given(method(*m))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }
}

fn attendance(server: &MockServer) -> AttendanceService {
    AttendanceService::new(
        store_for(server),
        Arc::new(MemberDirectory::builtin().unwrap()),
    )
}

#[tokio::test]
async fn test_duplicate_attendance_is_rejected_without_further_writes() {
    let server = MockServer::start().await;
    let event_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .and(query_param("id", format!("eq.{}", event_id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([news_row(
            event_id, "event", None
        )])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/event_participants"))
        .and(body_partial_json(json!([{ "member_name": ROSTER_MEMBER }])))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"event_participants_pkey\"",
            "details": null,
            "hint": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    forbid_writes(&server, &["PATCH", "DELETE"]).await;

    let err = attendance(&server)
        .add(event_id, ROSTER_MEMBER)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateEntry(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_attendance_requires_roster_member() {
    let server = MockServer::start().await;
    forbid_writes(&server, &["GET", "POST"]).await;

    let err = attendance(&server)
        .add(Uuid::new_v4(), "Not A Member")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_attendance_only_for_event_categories() {
    let server = MockServer::start().await;
    let news_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([news_row(news_id, "general", None)])),
        )
        .mount(&server)
        .await;
    forbid_writes(&server, &["POST"]).await;

    let err = attendance(&server)
        .add(news_id, ROSTER_MEMBER)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_attendance_add_and_remove() {
    let server = MockServer::start().await;
    let event_id = Uuid::new_v4();
    let participant = json!([{
        "event_id": event_id,
        "member_name": ROSTER_MEMBER,
        "created_at": "2024-05-10T11:00:00Z",
    }]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([news_row(event_id, "notice", None)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/event_participants"))
        .respond_with(ResponseTemplate::new(201).set_body_json(participant.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/event_participants"))
        .and(query_param("member_name", format!("eq.{}", ROSTER_MEMBER).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(participant))
        .expect(1)
        .mount(&server)
        .await;

    let service = attendance(&server);
    let added = service.add(event_id, ROSTER_MEMBER).await.unwrap();
    assert_eq!(added.member_name, ROSTER_MEMBER);

    service.remove(event_id, ROSTER_MEMBER).await.unwrap();
}

#[tokio::test]
async fn test_removing_absent_participant_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/event_participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = attendance(&server)
        .remove(Uuid::new_v4(), ROSTER_MEMBER)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_trims_member_name() {
    let server = MockServer::start().await;
    let event_id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/event_participants"))
        .and(query_param("event_id", format!("eq.{}", event_id).as_str()))
        .and(query_param("member_name", format!("eq.{}", ROSTER_MEMBER).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "event_id": event_id,
            "member_name": ROSTER_MEMBER,
            "created_at": "2024-05-10T11:00:00Z",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    attendance(&server)
        .remove(event_id, &format!("  {} ", ROSTER_MEMBER))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_news_detail_counts_view_then_fetches() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/increment_view_count"))
        .and(body_partial_json(json!({ "news_id": id })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .and(query_param("id", format!("eq.{}", id).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([news_row(id, "event", None)])))
        .expect(1)
        .mount(&server)
        .await;

    let item = NewsService::new(store_for(&server)).detail(id).await.unwrap();
    assert_eq!(item.id, id);
    assert_eq!(item.view_count, 4);
}

#[tokio::test]
async fn test_news_list_attaches_comment_counts() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .and(query_param("is_published", "eq.true"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([news_row(id, "event", None)])))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/comments"))
        .and(query_param("news_id", format!("eq.{}", id).as_str()))
        .and(query_param("parent_id", "is.null"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-6/7"))
        .mount(&server)
        .await;

    let list = NewsService::new(store_for(&server)).list_published().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].comment_count, 7);
}

#[tokio::test]
async fn test_news_panel_fetches_twenty_and_keeps_fifteen() {
    let server = MockServer::start().await;
    let rows: Vec<Value> = (0..20).map(|_| news_row(Uuid::new_v4(), "notice", None)).collect();

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .and(query_param("is_published", "eq.true"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(rows)))
        .expect(1)
        .mount(&server)
        .await;

    let items = NewsService::new(store_for(&server)).panel(20, 15).await.unwrap();
    assert_eq!(items.len(), 15);
    assert_eq!(items[0].id.to_string(), rows[0]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_comment_with_blank_content_writes_nothing() {
    let server = MockServer::start().await;
    forbid_writes(&server, &["POST"]).await;

    let draft = CommentDraft {
        author_name: "Kim".into(),
        content: " \n\t ".into(),
    };
    let err = CommentService::new(store_for(&server))
        .create(Uuid::new_v4(), &draft)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_news_update_with_wrong_password_writes_nothing() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/news"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([news_row(id, "event", Some("right"))])),
        )
        .mount(&server)
        .await;
    forbid_writes(&server, &["PATCH", "DELETE"]).await;

    let update = NewsUpdate {
        password: "wrong".into(),
        title: Some("Hijacked".into()),
        content: None,
        category: None,
        badge_text: None,
        badge_color: None,
        image_url: None,
        event_date: None,
        event_location: None,
        is_published: None,
    };

    let service = NewsService::new(store_for(&server));
    let err = service.update(id, &update).await.unwrap_err();
    assert!(matches!(err, AppError::AuthorizationMismatch));

    let err = service.delete(id, "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::AuthorizationMismatch));
}

/// Matches an insert whose first row carries an Argon2id hash of `password`
fn hashed_password(password: &'static str) -> impl Fn(&Request) -> bool + Send + Sync {
    move |req: &Request| {
        let Ok(body) = serde_json::from_slice::<Value>(&req.body) else {
            return false;
        };
        body[0]["password_hash"]
            .as_str()
            .filter(|h| h.starts_with("$argon2id$"))
            .is_some_and(|h| verify_credential(Some(h), password).is_ok())
    }
}

#[tokio::test]
async fn test_board_create_stores_salted_password_hash() {
    let server = MockServer::start().await;
    let stored = credential_hash("s3cret").unwrap();

    Mock::given(method("POST"))
        .and(path("/rest/v1/board_posts"))
        .and(body_partial_json(json!([{
            "category": "share",
            "title": "Free chairs",
        }])))
        .and(hashed_password("s3cret"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": Uuid::new_v4(),
            "category": "share",
            "title": "Free chairs",
            "content": "Four of them",
            "author_name": "Lee",
            "created_at": "2024-05-10T12:00:00Z",
            "password_hash": stored,
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let draft = BoardDraft {
        category: BoardCategory::Share,
        title: " Free chairs ".into(),
        content: "Four of them".into(),
        author_name: "Lee".into(),
        author_img: None,
        password: "s3cret".into(),
    };

    let post = BoardService::new(store_for(&server)).create(&draft).await.unwrap();
    assert_eq!(post.category, BoardCategory::Share);
    assert!(!serde_json::to_string(&post).unwrap().contains(&stored));
}

#[tokio::test]
async fn test_board_create_rejects_blank_text_without_writing() {
    let server = MockServer::start().await;
    forbid_writes(&server, &["POST"]).await;

    let draft = BoardDraft {
        category: BoardCategory::Share,
        title: "   ".into(),
        content: "Four of them".into(),
        author_name: "Lee".into(),
        author_img: None,
        password: "s3cret".into(),
    };

    let err = BoardService::new(store_for(&server)).create(&draft).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_board_filter_by_category() {
    let server = MockServer::start().await;
    let rows: Vec<Value> = (0..20)
        .map(|i| {
            json!({
                "id": Uuid::new_v4(),
                "category": if i % 2 == 0 { "info" } else { "request" },
                "title": format!("post {}", i),
                "author_name": "Park",
                "created_at": "2024-05-10T12:00:00Z",
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/rest/v1/board_posts"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(&server)
        .await;

    let service = BoardService::new(store_for(&server));
    let info = service
        .filter_by_category(Some(BoardCategory::Info), 20, 10)
        .await
        .unwrap();
    assert_eq!(info.len(), 10);
    assert!(info.iter().all(|p| p.category == BoardCategory::Info));

    let none = service
        .filter_by_category(Some(BoardCategory::Share), 20, 10)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_recent_comments_with_total() {
    let server = MockServer::start().await;
    let news_id = Uuid::new_v4();
    let rows: Vec<Value> = (0..3)
        .map(|_| comment_row(Uuid::new_v4(), news_id, None))
        .collect();

    Mock::given(method("GET"))
        .and(path("/rest/v1/comments"))
        .and(query_param("parent_id", "is.null"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/comments"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-2/5"))
        .mount(&server)
        .await;

    let preview = CommentService::new(store_for(&server))
        .recent(news_id, 3)
        .await
        .unwrap();
    assert_eq!(preview.comments.len(), 3);
    assert_eq!(preview.total, 5);
}

#[tokio::test]
async fn test_replies_only_nest_one_level() {
    let server = MockServer::start().await;
    let news_id = Uuid::new_v4();
    let top = Uuid::new_v4();
    let reply = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/comments"))
        .and(query_param("id", format!("eq.{}", reply).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([comment_row(reply, news_id, Some(top))])),
        )
        .mount(&server)
        .await;
    forbid_writes(&server, &["POST"]).await;

    let draft = CommentDraft {
        author_name: "Choi".into(),
        content: "me too".into(),
    };
    let err = CommentService::new(store_for(&server))
        .reply(reply, &draft)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_reply_attaches_to_parent_news() {
    let server = MockServer::start().await;
    let news_id = Uuid::new_v4();
    let top = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([comment_row(top, news_id, None)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/comments"))
        .and(body_partial_json(json!([{ "news_id": news_id, "parent_id": top }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([comment_row(
            Uuid::new_v4(),
            news_id,
            Some(top)
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let draft = CommentDraft {
        author_name: "Choi".into(),
        content: "me too".into(),
    };
    let created = CommentService::new(store_for(&server))
        .reply(top, &draft)
        .await
        .unwrap();

    assert_eq!(created.parent_id, Some(top));
    assert!(!created.is_top_level());
}

#[tokio::test]
async fn test_activity_counts_since_cutoff() {
    let server = MockServer::start().await;
    let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

    Mock::given(method("HEAD"))
        .and(path("/rest/v1/board_posts"))
        .and(query_param("created_at", "gte.2024-05-09T12:00:00Z"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-119/120"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/news"))
        .and(query_param("is_published", "eq.true"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-range", "*/0"))
        .mount(&server)
        .await;

    let counts = ActivityService::new(store_for(&server))
        .new_content(None, now)
        .await
        .unwrap();

    assert_eq!(counts.since, now - ChronoDuration::hours(24));
    assert_eq!(counts.board, 120);
    assert_eq!(counts.news, 0);
}

#[tokio::test]
async fn test_media_rejects_non_images_before_uploading() {
    let server = MockServer::start().await;
    forbid_writes(&server, &["POST"]).await;

    let err = MediaService::new(store_for(&server), 1024)
        .upload("media", "news/a.html", b"<html>".to_vec(), "text/html")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_media_upload_returns_public_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/storage/v1/object/media/news/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "media/news/photo.png" })))
        .expect(1)
        .mount(&server)
        .await;

    let url = MediaService::new(store_for(&server), 1024)
        .upload("media", "news/photo.png", vec![0x89, 0x50, 0x4e, 0x47], "image/png")
        .await
        .unwrap();

    assert_eq!(
        url,
        format!("{}/storage/v1/object/public/media/news/photo.png", server.uri())
    );
}
