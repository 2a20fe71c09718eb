//! Demonstrates plugging a custom [`PrinterTransport`] into the client.
//!
//! The transport below answers from memory and fails the first print attempt with a transient
//! error, so the client's retry loop is visible without a network.

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use cloud_printer::{
	client::{Client, ClientConfig},
	error::TransportError,
	http::{PrinterTransport, TransportFuture, TransportRequest, TransportResponse},
	model::PrintRequest,
};

#[derive(Debug, thiserror::Error)]
#[error("Simulated connection reset.")]
struct ConnectionReset;

#[derive(Debug, Default)]
struct InMemoryTransport {
	print_attempts: AtomicUsize,
}
impl PrinterTransport for InMemoryTransport {
	fn send<'a>(&'a self, request: &'a TransportRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let body = match request.url.path() {
				"/v1/open/user/signin" =>
					"{\"code\":0,\"msg\":\"ok\",\"data\":{\"token_value\":\"local\",\"token_type\":\"Bearer\"}}",
				"/v1/api/printer/print" => {
					if self.print_attempts.fetch_add(1, Ordering::SeqCst) == 0 {
						return Err(TransportError::transient(ConnectionReset));
					}

					"{\"code\":0,\"msg\":\"ok\",\"data\":{\"printer_name\":\"Bench\",\"meta_type\":\"text\",\"meta_value\":\"hello\"}}"
				},
				_ => "{\"code\":404,\"msg\":\"unknown endpoint\",\"data\":null}",
			};

			Ok(TransportResponse { status: 200, body: body.as_bytes().to_vec() })
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transport = Arc::new(InMemoryTransport::default());
	let config = ClientConfig::builder()
		.server_url(Url::parse("https://printer.invalid")?)
		.credentials("bench@example.com", "bench-secret")?
		.build()?;
	let client: Client<InMemoryTransport> = Client::with_transport(config, transport.clone());
	let job = client
		.print(&PrintRequest {
			printer_id: "p-bench".into(),
			content_type: "text/plain".into(),
			meta_type: "text".into(),
			meta_value: "hello".into(),
		})
		.await?;

	println!(
		"Printed `{}` on {} after {} attempt(s).",
		job.meta_value,
		job.printer_name,
		transport.print_attempts.load(Ordering::SeqCst)
	);

	Ok(())
}
