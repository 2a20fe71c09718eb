//! Printer endpoints: binding, unbinding, listing, and printing.

// self
use crate::{_prelude::*, codec::Empty};

/// Binds a printer attached to a host to the signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterBindRequest {
	/// Display name of the printer.
	pub printer_name: String,
	/// Identifier of the host the printer is attached to.
	pub host_id: String,
	/// Printer model or driver family.
	pub printer_type: String,
}

/// Identifier assigned to a newly bound printer.
///
/// A successful bind may come back without a payload; `printer_id` is then empty and the
/// printer can be found through [`ListPrintersResponse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrinterBindResponse {
	/// Service-assigned printer identifier; empty when the service omitted it.
	pub printer_id: String,
}
impl<'de> Deserialize<'de> for PrinterBindResponse {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Payload {
			#[serde(default)]
			printer_id: Option<String>,
		}

		let payload = Option::<Payload>::deserialize(deserializer)?;

		Ok(Self { printer_id: payload.and_then(|payload| payload.printer_id).unwrap_or_default() })
	}
}

/// Removes a printer from the account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterUnbindRequest {
	/// Printer to unbind.
	pub printer_id: String,
}

/// Unbinding carries no payload.
pub type PrinterUnbindResponse = Empty;

/// One page of the account's printers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPrintersRequest {
	/// One-based page number.
	pub page_no: u32,
	/// Number of printers per page.
	pub page_size: u32,
}
impl Default for ListPrintersRequest {
	fn default() -> Self {
		Self { page_no: 1, page_size: 20 }
	}
}

/// Printers on the requested page plus the account-wide total.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPrintersResponse {
	/// Printers on this page.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub list: Vec<PrinterInfo>,
	/// Total number of printers bound to the account.
	pub total: u64,
}

/// Printer as reported by the listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterInfo {
	/// Display name.
	pub printer_name: String,
	/// Host the printer is attached to.
	pub host_id: String,
	/// Service-assigned identifier.
	pub printer_id: String,
	/// Printer model or driver family.
	pub printer_type: String,
	/// Connection status as reported by the service.
	pub status: String,
	/// Creation time as formatted by the service.
	pub create_time: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PrinterInfo>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Vec<PrinterInfo>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Submits a print job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRequest {
	/// Target printer.
	pub printer_id: String,
	/// MIME type of the printed content.
	pub content_type: String,
	/// How `meta_value` is interpreted (for example a URL or inline data).
	pub meta_type: String,
	/// Content reference or inline content.
	pub meta_value: String,
}

/// Echo of an accepted print job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintResponse {
	/// Name of the printer that accepted the job.
	pub printer_name: String,
	/// Echoed `meta_type`.
	pub meta_type: String,
	/// Echoed `meta_value`.
	pub meta_value: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn list_response_decodes_service_layout() {
		let payload = serde_json::json!({
			"list": [{
				"printer_name": "Front desk",
				"host_id": "host-1",
				"printer_id": "p-1",
				"printer_type": "xp-58",
				"status": "online",
				"create_time": "2025-06-01 08:00:00"
			}],
			"total": 1
		});
		let response: ListPrintersResponse =
			serde_json::from_value(payload).expect("Listing payload should decode.");

		assert_eq!(response.total, 1);
		assert_eq!(response.list[0].printer_id, "p-1");
		assert_eq!(response.list[0].status, "online");
	}

	#[test]
	fn bind_response_tolerates_missing_payload() {
		for body in [
			&br#"{"code":0,"msg":"ok","data":null}"#[..],
			br#"{"code":0,"msg":"ok"}"#,
			br#"{"code":0,"msg":"ok","data":{}}"#,
			br#"{"code":0,"msg":"ok","data":{"printer_id":null}}"#,
		] {
			let response = crate::codec::decode_envelope(body)
				.expect("Envelope should decode.")
				.into_payload::<PrinterBindResponse>()
				.expect("Successful binds should decode without a payload.");

			assert!(response.printer_id.is_empty());
		}

		let response = crate::codec::decode_envelope(
			br#"{"code":0,"msg":"ok","data":{"printer_id":"p-7"}}"#,
		)
		.expect("Envelope should decode.")
		.into_payload::<PrinterBindResponse>()
		.expect("Bind payload should decode.");

		assert_eq!(response.printer_id, "p-7");
	}

	#[test]
	fn list_response_tolerates_missing_list() {
		let response: ListPrintersResponse = serde_json::from_value(serde_json::json!({ "total": 0 }))
			.expect("Empty listing payload should decode.");

		assert!(response.list.is_empty());

		let response: ListPrintersResponse =
			serde_json::from_value(serde_json::json!({ "list": null, "total": 0 }))
				.expect("Null listing payload should decode.");

		assert!(response.list.is_empty());
	}
}
