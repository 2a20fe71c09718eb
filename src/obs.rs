//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `cloud_printer.operation` with the
//!   `operation` and `stage` fields, plus the engine's retry, sign-in, and verbose dump events.
//! - Enable `metrics` to increment the `cloud_printer_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Remote operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Verification code request.
	Verify,
	/// Account registration.
	SignUp,
	/// Credential exchange.
	SignIn,
	/// Printer binding.
	BindPrinter,
	/// Printer unbinding.
	UnbindPrinter,
	/// Paged printer listing.
	ListPrinters,
	/// Print job submission.
	Print,
	/// Caller-defined operation dispatched through [`Client::execute`](crate::client::Client::execute).
	Custom,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Verify => "verify",
			OperationKind::SignUp => "sign_up",
			OperationKind::SignIn => "sign_in",
			OperationKind::BindPrinter => "bind_printer",
			OperationKind::UnbindPrinter => "unbind_printer",
			OperationKind::ListPrinters => "list_printers",
			OperationKind::Print => "print",
			OperationKind::Custom => "custom",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
