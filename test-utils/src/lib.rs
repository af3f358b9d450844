use std::{
	net::SocketAddr,
	sync::{Arc, Mutex, OnceLock},
	time::Duration,
};

use axum::{
	Json, Router,
	extract::Multipart,
	http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
	routing::post,
};
use formpost_sdk::notify::Notifier;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::OnceCell};

static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

pub fn rt() -> &'static tokio::runtime::Runtime {
	RUNTIME.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.build()
			.unwrap()
	})
}

/// A local upload endpoint that answers with a fixed envelope per route and
/// echoes back the multipart parts it received.
///
/// | route        | status | body |
/// |--------------|--------|------|
/// | `/success`   | 200    | `{"isSuccess": true, "result": <echo>}` |
/// | `/failure`   | 200    | `{"isSuccess": false, "errorMessage": {"message": ..}}` |
/// | `/malformed` | 200    | `{"result": <echo>}` |
/// | `/error`     | 500    | `{"isSuccess": false, "errorMessage": ..}` |
/// | `/text`      | 200    | `ok` as `text/plain` |
/// | `/slow`      | 200    | like `/success`, after sleeping for the `delay_ms` field |
pub struct EchoServer {
	addr: SocketAddr,
}

pub const FAILURE_MESSAGE: &str = "stream jar is invalid";
pub const ERROR_MESSAGE: &str = "internal error while saving file";

static SERVER: OnceCell<EchoServer> = OnceCell::const_new();

/// Starts the echo server on the current runtime the first time it is called,
/// use it from tests running on [`rt`].
pub async fn server() -> &'static EchoServer {
	SERVER
		.get_or_init(|| async {
			let _ = env_logger::builder().is_test(true).try_init();
			let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
			let addr = listener.local_addr().unwrap();
			tokio::spawn(async move {
				if let Err(e) = axum::serve(listener, router()).await {
					log::error!("echo server stopped: {e}");
				}
			});
			EchoServer { addr }
		})
		.await
}

impl EchoServer {
	pub fn url(&self, path: &str) -> String {
		format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
	}
}

/// An address nothing listens on.
pub async fn refused_url() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);
	format!("http://{addr}/upload")
}

fn router() -> Router {
	Router::new()
		.route("/success", post(success))
		.route("/failure", post(failure))
		.route("/malformed", post(malformed))
		.route("/error", post(server_error))
		.route("/text", post(text))
		.route("/slow", post(slow))
}

type Rejection = (StatusCode, String);

fn bad_request(e: impl std::fmt::Display) -> Rejection {
	(StatusCode::BAD_REQUEST, e.to_string())
}

async fn echo(headers: &HeaderMap, mut multipart: Multipart) -> Result<Value, Rejection> {
	let mut parts = Vec::new();
	while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
		let name = field.name().map(str::to_owned);
		let file_name = field.file_name().map(str::to_owned);
		let content_type = field.content_type().map(str::to_owned);
		let bytes = field.bytes().await.map_err(bad_request)?;
		parts.push(json!({
			"name": name,
			"fileName": file_name,
			"contentType": content_type,
			"size": bytes.len(),
			"text": String::from_utf8_lossy(&bytes),
		}));
	}
	Ok(json!({
		"contentType": headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
		"parts": parts,
	}))
}

async fn success(headers: HeaderMap, multipart: Multipart) -> Result<Json<Value>, Rejection> {
	let result = echo(&headers, multipart).await?;
	Ok(Json(json!({"isSuccess": true, "result": result})))
}

async fn failure(headers: HeaderMap, multipart: Multipart) -> Result<Json<Value>, Rejection> {
	echo(&headers, multipart).await?;
	Ok(Json(json!({
		"isSuccess": false,
		"errorMessage": {"message": FAILURE_MESSAGE},
	})))
}

async fn malformed(headers: HeaderMap, multipart: Multipart) -> Result<Json<Value>, Rejection> {
	let result = echo(&headers, multipart).await?;
	Ok(Json(json!({"result": result})))
}

async fn server_error(
	headers: HeaderMap,
	multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), Rejection> {
	echo(&headers, multipart).await?;
	Ok((
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(json!({"isSuccess": false, "errorMessage": ERROR_MESSAGE})),
	))
}

async fn text(headers: HeaderMap, multipart: Multipart) -> Result<&'static str, Rejection> {
	echo(&headers, multipart).await?;
	Ok("ok")
}

async fn slow(headers: HeaderMap, multipart: Multipart) -> Result<Json<Value>, Rejection> {
	let result = echo(&headers, multipart).await?;
	let delay = result["parts"]
		.as_array()
		.into_iter()
		.flatten()
		.find(|part| part["name"] == "delay_ms")
		.and_then(|part| part["text"].as_str()?.parse().ok())
		.unwrap_or(0);
	tokio::time::sleep(Duration::from_millis(delay)).await;
	Ok(Json(json!({"isSuccess": true, "result": result})))
}

/// Collects every notification, clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
	messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
	pub fn messages(&self) -> Vec<String> {
		self.messages
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.clone()
	}
}

impl Notifier for RecordingNotifier {
	fn notify(&self, message: &str) {
		self.messages
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push(message.to_owned());
	}
}
