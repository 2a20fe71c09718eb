//! Demonstrates binding a printer and submitting a print job through the default reqwest
//! transport, with sign-in handled by the client and the credential reused from memory.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use cloud_printer::{
	client::{ClientConfig, ReqwestClient},
	model::{ListPrintersRequest, PrintRequest, PrinterBindRequest},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let sign_in_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/open/user/signin");
			then.status(200).header("content-type", "application/json").body(
				"{\"code\":0,\"msg\":\"ok\",\"data\":{\"token_value\":\"demo-token\",\"token_type\":\"Bearer\"}}",
			);
		})
		.await;
	let _bind_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/api/printer/bind").header("authorization", "Bearer demo-token");
			then.status(200).body("{\"code\":0,\"msg\":\"ok\",\"data\":{\"printer_id\":\"p-1001\"}}");
		})
		.await;
	let _list_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/api/printer/list").header("authorization", "Bearer demo-token");
			then.status(200).body(
				"{\"code\":0,\"msg\":\"ok\",\"data\":{\"list\":[{\"printer_name\":\"Front desk\",\"host_id\":\"host-7\",\"printer_id\":\"p-1001\",\"printer_type\":\"xp-58\",\"status\":\"online\",\"create_time\":\"2025-06-01 08:00:00\"}],\"total\":1}}",
			);
		})
		.await;
	let _print_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/api/printer/print").header("authorization", "Bearer demo-token");
			then.status(200).body(
				"{\"code\":0,\"msg\":\"queued\",\"data\":{\"printer_name\":\"Front desk\",\"meta_type\":\"url\",\"meta_value\":\"https://files.example.com/receipt.pdf\"}}",
			);
		})
		.await;
	let config = ClientConfig::builder()
		.server_url(Url::parse(&server.base_url())?)
		.credentials("owner@example.com", "owner-secret")?
		.verbose(true)
		.build()?;
	let client = ReqwestClient::new(config)?;
	let bound = client
		.bind_printer(&PrinterBindRequest {
			printer_name: "Front desk".into(),
			host_id: "host-7".into(),
			printer_type: "xp-58".into(),
		})
		.await?;
	let page = client.list_printers(&ListPrintersRequest::default()).await?;

	println!("Bound printer {}; {} printer(s) on the account.", bound.printer_id, page.total);

	let job = client
		.print(&PrintRequest {
			printer_id: bound.printer_id,
			content_type: "application/pdf".into(),
			meta_type: "url".into(),
			meta_value: "https://files.example.com/receipt.pdf".into(),
		})
		.await?;

	println!("Queued {} on {}.", job.meta_value, job.printer_name);

	// One sign-in serves all three authorized calls.
	sign_in_mock.assert_calls_async(1).await;

	Ok(())
}
