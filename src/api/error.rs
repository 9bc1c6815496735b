use thiserror::Error;

/// Failure of a single API round trip.
///
/// `Display` is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RequestError {
	/// The server answered with a status outside `200..=299`.
	#[error("{message}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, or `HTTP <status>` when the body was blank.
		message: String,
	},
	/// The request could not be sent or no response arrived.
	#[error("{0}")]
	Network(String),
	/// A success response did not hold the expected JSON.
	#[error("unexpected response: {0}")]
	Decode(String),
}

impl RequestError {
	/// Builds the error for a non-success response from its status and body text.
	pub fn from_status(status: u16, body: &str) -> Self {
		let message = if body.trim().is_empty() {
			format!("HTTP {status}")
		} else {
			body.to_owned()
		};
		RequestError::Status { status, message }
	}
}

impl From<gloo_net::Error> for RequestError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => RequestError::Decode(e.to_string()),
			other => RequestError::Network(other.to_string()),
		}
	}
}
