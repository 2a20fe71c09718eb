//! Endpoint catalog: one method per remote operation.

// self
use crate::{
	_prelude::*,
	client::{Client, Operation},
	codec::RequestBody,
	http::PrinterTransport,
	model::{
		ListPrintersRequest, ListPrintersResponse, PrintRequest, PrintResponse, PrinterBindRequest,
		PrinterBindResponse, PrinterUnbindRequest, PrinterUnbindResponse, SignInRequest,
		SignInResponse, SignUpRequest, SignUpResponse, VerifyRequest, VerifyResponse,
	},
	obs::OperationKind,
};

/// Endpoint paths relative to the server address.
pub mod paths {
	/// Verification code request.
	pub const VERIFY: &str = "/v1/open/user/verify";
	/// Account registration.
	pub const SIGN_UP: &str = "/v1/open/user/signup";
	/// Credential exchange.
	pub const SIGN_IN: &str = "/v1/open/user/signin";
	/// Printer binding.
	pub const BIND_PRINTER: &str = "/v1/api/printer/bind";
	/// Printer unbinding.
	pub const UNBIND_PRINTER: &str = "/v1/api/printer/unbind";
	/// Paged printer listing.
	pub const LIST_PRINTERS: &str = "/v1/api/printer/list";
	/// Print job submission.
	pub const PRINT: &str = "/v1/api/printer/print";
}

const VERIFY: Operation<'static> = Operation::post(OperationKind::Verify, paths::VERIFY);
const SIGN_UP: Operation<'static> = Operation::post(OperationKind::SignUp, paths::SIGN_UP);
pub(crate) const SIGN_IN: Operation<'static> =
	Operation::post(OperationKind::SignIn, paths::SIGN_IN).redacted();
const BIND_PRINTER: Operation<'static> =
	Operation::post(OperationKind::BindPrinter, paths::BIND_PRINTER).authorized();
const UNBIND_PRINTER: Operation<'static> =
	Operation::post(OperationKind::UnbindPrinter, paths::UNBIND_PRINTER).authorized();
const LIST_PRINTERS: Operation<'static> =
	Operation::post(OperationKind::ListPrinters, paths::LIST_PRINTERS).authorized();
const PRINT: Operation<'static> = Operation::post(OperationKind::Print, paths::PRINT).authorized();

impl<T> Client<T>
where
	T: ?Sized + PrinterTransport,
{
	/// Requests a verification code; call before [`Client::sign_up`].
	pub async fn verify(&self, request: &VerifyRequest) -> Result<VerifyResponse> {
		self.execute(&VERIFY, RequestBody::structured(request)?).await
	}

	/// Registers a new account.
	pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse> {
		self.execute(&SIGN_UP, RequestBody::structured(request)?).await
	}

	/// Exchanges credentials for a token.
	///
	/// This never touches the credential store; authorized operations sign in on their own
	/// with the configured identity.
	pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
		self.execute(&SIGN_IN, RequestBody::structured(request)?).await
	}

	/// Binds a printer to the account.
	pub async fn bind_printer(&self, request: &PrinterBindRequest) -> Result<PrinterBindResponse> {
		self.execute(&BIND_PRINTER, RequestBody::structured(request)?).await
	}

	/// Unbinds a printer from the account.
	pub async fn unbind_printer(
		&self,
		request: &PrinterUnbindRequest,
	) -> Result<PrinterUnbindResponse> {
		self.execute(&UNBIND_PRINTER, RequestBody::structured(request)?).await
	}

	/// Lists one page of the account's printers.
	pub async fn list_printers(
		&self,
		request: &ListPrintersRequest,
	) -> Result<ListPrintersResponse> {
		self.execute(&LIST_PRINTERS, RequestBody::structured(request)?).await
	}

	/// Submits a print job.
	pub async fn print(&self, request: &PrintRequest) -> Result<PrintResponse> {
		self.execute(&PRINT, RequestBody::structured(request)?).await
	}
}
