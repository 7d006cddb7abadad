use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use barangay_surveys::http::{build_router, AppState};
use barangay_surveys::store::SurveyStore;

async fn spawn_server() -> SocketAddr {
    let db_path = std::env::temp_dir().join(format!("surveys-http-{}.sqlite3", Uuid::new_v4()));
    let store = SurveyStore::open(&db_path).expect("open store");
    // cargo runs integration tests from the crate root, where templates/ lives.
    let tera = tera::Tera::new("templates/**/*.tera").expect("load templates");
    let app = build_router(Arc::new(AppState { store, tera }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let request = match body {
        Some(body) => format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    };
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

#[tokio::test]
async fn create_edit_submit_results_round_trip() {
    let addr = spawn_server().await;

    let (status, head, _) = send_raw(
        addr,
        "POST",
        "/create",
        Some("title=Cleanup+Drive&description=River+cleanup"),
    )
    .await;
    assert_eq!(status, 303);
    let location = header_value(&head, "location").expect("redirect location");
    let survey_id: i64 = location
        .trim_start_matches("/survey/")
        .trim_end_matches("/edit")
        .parse()
        .expect("survey id in location");

    let (status, _, body) = send_raw(
        addr,
        "POST",
        &format!("/survey/{survey_id}/add-question"),
        Some("question_text=Will+you+attend%3F&question_type=single_choice&options=Yes%2CNo&is_required=true"),
    )
    .await;
    assert_eq!(status, 200);
    let payload: serde_json::Value = serde_json::from_str(&body).expect("add-question json");
    assert_eq!(payload["status"], "success");
    let question_id = payload["question_id"].as_i64().expect("question id");

    let (status, _, body) = send_raw(addr, "GET", "/", None).await;
    assert_eq!(status, 200);
    assert!(body.contains("Cleanup Drive"));

    let (status, _, body) = send_raw(addr, "GET", &format!("/survey/{survey_id}"), None).await;
    assert_eq!(status, 200);
    assert!(body.contains("Will you attend?"));
    assert!(body.contains("Yes"));

    let (status, head, _) = send_raw(
        addr,
        "POST",
        &format!("/survey/{survey_id}/submit"),
        Some(&format!("respondent_name=Juan&question_{question_id}=Yes")),
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(
        header_value(&head, "location").expect("thanks location"),
        format!("/survey/{survey_id}/thanks")
    );

    let (status, _, body) = send_raw(
        addr,
        "GET",
        &format!("/survey/{survey_id}/results"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.contains("Juan"));
    assert!(body.contains("Yes"));

    let (status, _, body) = send_raw(
        addr,
        "DELETE",
        &format!("/survey/{survey_id}/question/{question_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let payload: serde_json::Value = serde_json::from_str(&body).expect("delete json");
    assert_eq!(payload["status"], "success");

    let (status, _, _) = send_raw(
        addr,
        "DELETE",
        &format!("/survey/{survey_id}/question/{question_id}/delete"),
        None,
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn missing_survey_returns_404_json() {
    let addr = spawn_server().await;
    let (status, _, body) = send_raw(addr, "GET", "/survey/9999", None).await;
    assert_eq!(status, 404);
    let payload: serde_json::Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(payload["error"], "survey not found");
}

#[tokio::test]
async fn unknown_question_type_is_unprocessable() {
    let addr = spawn_server().await;
    let (status, head, _) = send_raw(addr, "POST", "/create", Some("title=T")).await;
    assert_eq!(status, 303);
    let location = header_value(&head, "location").expect("location");
    let survey_id: i64 = location
        .trim_start_matches("/survey/")
        .trim_end_matches("/edit")
        .parse()
        .expect("survey id");

    let (status, _, body) = send_raw(
        addr,
        "POST",
        &format!("/survey/{survey_id}/add-question"),
        Some("question_text=Q&question_type=checkbox"),
    )
    .await;
    assert_eq!(status, 422);
    let payload: serde_json::Value = serde_json::from_str(&body).expect("error json");
    assert!(payload["error"]
        .as_str()
        .expect("error text")
        .contains("unknown question type"));
}

#[tokio::test]
async fn deactivation_hides_survey_from_home() {
    let addr = spawn_server().await;
    let (_, head, _) = send_raw(addr, "POST", "/create", Some("title=Old+drive")).await;
    let location = header_value(&head, "location").expect("location");
    let survey_id: i64 = location
        .trim_start_matches("/survey/")
        .trim_end_matches("/edit")
        .parse()
        .expect("survey id");

    let (status, head, _) = send_raw(
        addr,
        "POST",
        &format!("/survey/{survey_id}/deactivate"),
        Some(""),
    )
    .await;
    assert_eq!(status, 303);
    assert_eq!(header_value(&head, "location").expect("location"), "/");

    let (status, _, body) = send_raw(addr, "GET", "/", None).await;
    assert_eq!(status, 200);
    assert!(!body.contains("Old drive"));
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let addr = spawn_server().await;
    let (status, _, body) = send_raw(addr, "GET", "/healthz", None).await;
    assert_eq!(status, 200);
    let payload: serde_json::Value = serde_json::from_str(&body).expect("health json");
    assert_eq!(payload["status"], "healthy");
}
