#![cfg(feature = "test")]

// std
use std::{env, fs, process};
// self
use cloud_printer::{
	_preludet::*,
	auth::Credential,
	client::{Client, ClientConfig},
	error::ConfigError,
	model::{ListPrintersRequest, ListPrintersResponse},
	store::{CredentialStore, FileStore},
};

const LISTING: &str = r#"{"code":0,"msg":"ok","data":{"list":[],"total":0}}"#;

fn seed(store: &dyn CredentialStore, token: &str, age: Duration) {
	store
		.store(Credential::new(token, OffsetDateTime::now_utc() - age))
		.expect("Seeding the credential store should succeed.");
}

async fn list(client: &Client<ScriptedTransport>) -> Result<ListPrintersResponse> {
	client.list_printers(&ListPrintersRequest::default()).await
}

#[tokio::test]
async fn credential_younger_than_two_hours_is_reused() {
	let (client, transport, store) = build_scripted_client("https://printer.example.com");

	seed(store.as_ref(), "cached-token", Duration::minutes(119));
	transport.push(ScriptedReply::Body(LISTING.into()));

	list(&client).await.expect("Listing with a cached credential should succeed.");

	let requests = transport.requests();

	assert_eq!(transport.sign_in_calls(), 0);
	assert_eq!(requests[0].authorization().as_deref(), Some("Bearer cached-token"));
}

#[tokio::test]
async fn credential_older_than_two_hours_is_renewed() {
	let (client, transport, store) = build_scripted_client("https://printer.example.com");

	seed(store.as_ref(), "stale-token", Duration::minutes(121));
	transport.push_token("renewed-token");
	transport.push(ScriptedReply::Body(LISTING.into()));

	list(&client).await.expect("Listing after renewal should succeed.");

	assert_eq!(transport.sign_in_calls(), 1);
	assert_eq!(transport.requests()[0].authorization().as_deref(), Some("Bearer renewed-token"));
	assert_eq!(
		store.load().map(|cached| cached.token.expose().to_owned()).as_deref(),
		Some("renewed-token")
	);
}

#[tokio::test]
async fn renewed_credential_is_reused_by_the_next_call() {
	let (client, transport, _store) = build_scripted_client("https://printer.example.com");

	transport.push_token("first-token");
	transport.push(ScriptedReply::Body(LISTING.into()));
	transport.push(ScriptedReply::Body(LISTING.into()));

	list(&client).await.expect("First listing should succeed.");
	list(&client).await.expect("Second listing should succeed.");

	assert_eq!(transport.sign_in_calls(), 1);
	assert_eq!(client.session_metrics.sign_ins(), 1);
	assert_eq!(client.session_metrics.reuses(), 1);
}

#[tokio::test]
async fn invalidate_forces_sign_in_on_next_call() {
	let (client, transport, store) = build_scripted_client("https://printer.example.com");

	seed(store.as_ref(), "recent-token", Duration::seconds(5));
	client.invalidate_credential().expect("Invalidation should succeed.");
	transport.push_token("after-invalidate");
	transport.push(ScriptedReply::Body(LISTING.into()));

	list(&client).await.expect("Listing after invalidation should succeed.");

	assert!(store.load().is_some());
	assert_eq!(transport.sign_in_calls(), 1);
	assert_eq!(
		transport.requests()[0].authorization().as_deref(),
		Some("Bearer after-invalidate")
	);
}

#[tokio::test]
async fn failed_sign_in_never_dispatches_the_original_request() {
	let (client, transport, store) = build_scripted_client("https://printer.example.com");

	transport.push_sign_in(ScriptedReply::Fatal("connection refused by proxy"));
	transport.push(ScriptedReply::Body(LISTING.into()));

	let err = list(&client).await.expect_err("Listing should fail when sign-in fails.");

	assert!(matches!(err, Error::Authentication(_)));
	assert_eq!(transport.calls(), 0);
	assert!(store.load().is_none());
}

#[tokio::test]
async fn sign_in_retries_transient_failures() {
	let (client, transport, _store) = build_scripted_client("https://printer.example.com");

	transport.push_sign_in(ScriptedReply::Transient("reset"));
	transport.push_token("eventually");
	transport.push(ScriptedReply::Body(LISTING.into()));

	list(&client).await.expect("Listing should succeed after a retried sign-in.");

	assert_eq!(transport.sign_in_calls(), 2);
}

#[tokio::test]
async fn concurrent_stale_callers_each_sign_in() {
	let (client, transport, _store) = build_scripted_client("https://printer.example.com");

	transport.push_token("racer-a").push_token("racer-b");
	transport.push(ScriptedReply::Body(LISTING.into())).push(ScriptedReply::Body(LISTING.into()));

	let (first, second) = tokio::join!(list(&client), list(&client));

	first.expect("First concurrent listing should succeed.");
	second.expect("Second concurrent listing should succeed.");

	assert_eq!(transport.sign_in_calls(), 2);
}

#[tokio::test]
async fn coalesced_sign_in_is_shared_by_concurrent_callers() {
	let config = ClientConfig::builder()
		.server_url(Url::parse("https://printer.example.com").expect("Failed to parse URL."))
		.identity(test_identity())
		.coalesce_sign_in(true)
		.build()
		.expect("Config should build.");
	let transport = Arc::new(ScriptedTransport::default());
	let client: Client<ScriptedTransport> = Client::with_transport(config, transport.clone());

	transport.push_token("shared-token").push_token("unused-token");
	transport.push(ScriptedReply::Body(LISTING.into())).push(ScriptedReply::Body(LISTING.into()));

	let (first, second) = tokio::join!(list(&client), list(&client));

	first.expect("First concurrent listing should succeed.");
	second.expect("Second concurrent listing should succeed.");

	assert_eq!(transport.sign_in_calls(), 1);
	assert!(
		transport
			.requests()
			.iter()
			.all(|request| request.authorization().as_deref() == Some("Bearer shared-token"))
	);
}

#[tokio::test]
async fn authorized_call_without_identity_fails_before_dispatch() {
	let config = ClientConfig::builder().build().expect("Config should build.");
	let transport = Arc::new(ScriptedTransport::default());
	let client: Client<ScriptedTransport> = Client::with_transport(config, transport.clone());
	let err = list(&client).await.expect_err("Authorized calls need an identity.");

	assert!(matches!(err, Error::Config(ConfigError::MissingIdentity)));
	assert_eq!(transport.calls() + transport.sign_in_calls(), 0);
}

#[tokio::test]
async fn file_store_shares_credential_across_clients() {
	let path = env::temp_dir().join(format!(
		"cloud_printer_session_it_{}_{}.json",
		process::id(),
		OffsetDateTime::now_utc().unix_timestamp_nanos()
	));
	let (first, first_transport, _store) = build_scripted_client("https://printer.example.com");
	let first = first.with_store(Arc::new(FileStore::open(&path).expect("Failed to open store.")));

	first_transport.push_token("persisted-token");
	first_transport.push(ScriptedReply::Body(LISTING.into()));
	list(&first).await.expect("First client listing should succeed.");

	let (second, second_transport, _store) = build_scripted_client("https://printer.example.com");
	let second =
		second.with_store(Arc::new(FileStore::open(&path).expect("Failed to reopen store.")));

	second_transport.push(ScriptedReply::Body(LISTING.into()));
	list(&second).await.expect("Second client listing should succeed.");

	assert_eq!(second_transport.sign_in_calls(), 0);
	assert_eq!(
		second_transport.requests()[0].authorization().as_deref(),
		Some("Bearer persisted-token")
	);

	fs::remove_file(&path).unwrap_or_else(|e| {
		panic!("Failed to remove temporary credential file {}: {e}", path.display())
	});
}
