use assert_cmd::cargo::cargo_bin_cmd;
use formpost_macros::shared_test_runtime;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn print_help_text() {
	cargo_bin_cmd!("formpost")
		.arg("--help")
		.assert()
		.success()
		.stdout(predicates::str::contains("multipart/form-data").and(predicates::str::contains("upload")));
}

#[test]
fn print_version() {
	cargo_bin_cmd!("formpost")
		.arg("--version")
		.assert()
		.success()
		.stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_endpoint_is_a_usage_error() {
	cargo_bin_cmd!("formpost")
		.env_remove("FORMPOST_ENDPOINT")
		.args(["upload", "--field", "a=b"])
		.assert()
		.failure()
		.stderr(predicates::str::contains("--endpoint"));
}

#[shared_test_runtime]
async fn upload_prints_response() {
	let url = test_utils::server().await.url("success");
	let dir = std::env::temp_dir().join(format!("formpost-cli-{}", std::process::id()));
	std::fs::create_dir_all(&dir).unwrap();
	let jar = dir.join("stream-app.jar");
	std::fs::write(&jar, b"PK\x03\x04").unwrap();

	cargo_bin_cmd!("formpost")
		.args(["upload", "--endpoint", url.as_str(), "-F", "group=wk00"])
		.arg("--file")
		.arg(format!("file={}", jar.display()))
		.assert()
		.success()
		.stdout(
			predicates::str::contains(r#""isSuccess": true"#)
				.and(predicates::str::contains("stream-app.jar"))
				.and(predicates::str::contains("wk00")),
		);

	std::fs::remove_dir_all(&dir).unwrap();
}

#[shared_test_runtime]
async fn endpoint_from_environment() {
	let server = test_utils::server().await;

	cargo_bin_cmd!("formpost")
		.env("FORMPOST_ENDPOINT", server.url("success"))
		.args(["--quiet", "upload", "-F", "name=quiet"])
		.assert()
		.success()
		.stdout(predicates::str::is_empty());
}

#[shared_test_runtime]
async fn application_failure_exits_non_zero() {
	let url = test_utils::server().await.url("failure");

	cargo_bin_cmd!("formpost")
		.args(["upload", "--endpoint", url.as_str(), "-F", "group=wk00"])
		.assert()
		.failure()
		.stderr(
			predicates::str::contains(test_utils::FAILURE_MESSAGE)
				.and(predicates::str::contains("was not successful")),
		);
}

#[shared_test_runtime]
async fn error_status_can_be_accepted() {
	let url = test_utils::server().await.url("error");

	cargo_bin_cmd!("formpost")
		.args(["upload", "--endpoint", url.as_str(), "-F", "group=wk00"])
		.assert()
		.failure()
		.stderr(predicates::str::contains("failed"));

	cargo_bin_cmd!("formpost")
		.args([
			"upload",
			"--accept-error-status",
			"--endpoint",
			url.as_str(),
			"-F",
			"group=wk00",
		])
		.assert()
		.failure()
		.stdout(predicates::str::contains(test_utils::ERROR_MESSAGE))
		.stderr(predicates::str::contains("was not successful"));
}

#[test]
fn unreadable_file_fails_before_upload() {
	cargo_bin_cmd!("formpost")
		.args([
			"upload",
			"--endpoint",
			"http://127.0.0.1:9/upload",
			"--file",
			"file=/definitely/not/here.jar",
		])
		.assert()
		.failure()
		.stderr(predicates::str::contains("/definitely/not/here.jar"));
}

#[shared_test_runtime]
async fn transport_failure_is_reported_once() {
	let url = test_utils::refused_url().await;

	let assert = cargo_bin_cmd!("formpost")
		.env_remove("RUST_LOG")
		.args(["upload", "--endpoint", url.as_str(), "-F", "group=wk00"])
		.assert()
		.failure();

	let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
	assert_eq!(stderr.matches("✗").count(), 1, "stderr was: {stderr}");
	assert!(stderr.contains(&format!("Upload to {url} failed")));
	assert!(!stderr.contains("Caused by"), "stderr was: {stderr}");
}

#[shared_test_runtime]
async fn timeout_flag_applies() {
	let url = test_utils::server().await.url("slow");

	cargo_bin_cmd!("formpost")
		.env_remove("RUST_LOG")
		.args([
			"upload",
			"--timeout",
			"1",
			"--endpoint",
			url.as_str(),
			"-F",
			"delay_ms=3000",
		])
		.assert()
		.failure()
		.stderr(predicates::str::contains("✗ Upload timed out"));
}
