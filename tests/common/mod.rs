#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use mcq_backend::{
    config::{ModelSettings, Settings},
    routes::build_router,
    state::AppState,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Chat-completion stand-in: answers every call with `reply` and records requests.
#[derive(Default)]
pub struct FakeModel {
    pub reply: Mutex<String>,
    pub status: Mutex<u16>,
    pub requests: Mutex<Vec<Value>>,
}

impl FakeModel {
    pub fn set_reply(&self, reply: impl Into<String>) {
        *self.reply.lock().unwrap() = reply.into();
    }

    pub fn set_status(&self, status: u16) {
        *self.status.lock().unwrap() = status;
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Value {
        self.requests.lock().unwrap().last().cloned().expect("no model request recorded")
    }

    pub fn last_user_message(&self) -> String {
        self.last_request()["messages"][1]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

async fn chat_completions(State(fake): State<Arc<FakeModel>>, Json(body): Json<Value>) -> impl IntoResponse {
    fake.requests.lock().unwrap().push(body);
    let status = StatusCode::from_u16(*fake.status.lock().unwrap()).unwrap();
    if !status.is_success() {
        return (status, Json(json!({ "error": { "message": "Invalid API Key" } })));
    }
    let content = fake.reply.lock().unwrap().clone();
    (
        status,
        Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
        })),
    )
}

/// Spawn the fake model on an ephemeral port.
pub async fn spawn_fake_model() -> (Arc<FakeModel>, String) {
    let fake = Arc::new(FakeModel::default());
    fake.set_status(200);
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(fake.clone());
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (fake, format!("http://{}/v1", addr))
}

/// Router wired to a fresh fake model.
pub async fn test_app() -> (Router, Arc<FakeModel>) {
    let (fake, base_url) = spawn_fake_model().await;
    let model = ModelSettings {
        api_key: "test-key".into(),
        base_url,
        model: "test-model".into(),
        timeout_secs: 5,
    };
    let state = AppState::new(Settings::default(), &model).unwrap();
    (build_router(Arc::new(state)), fake)
}

/// JSON array of `n` well-formed questions.
pub fn questions_json(n: usize, tag: &str) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "question": format!("{tag} question {i}?"),
                    "options": ["Chlorophyll", "Mitochondria", "Ribosome", "Nucleus"],
                    "correct_answer": "Chlorophyll",
                })
            })
            .collect(),
    )
}

/// One-page PDF showing `text` in Helvetica.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    pdf_with_pages(&[text])
}

/// PDF with one page per entry of `pages`, each showing its text in Helvetica,
/// with a correct xref table.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for off in offsets {
        out.push_str(&format!("{:010} 00000 n \n", off));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    ));
    out.into_bytes()
}

pub const BOUNDARY: &str = "X-MCQ-TEST-BOUNDARY";

/// multipart/form-data body with a single file field.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
