//! JSON envelopes for command results.
//!
//! Every command prints exactly one envelope. Results go to stdout as
//! `{"success":true,"api_version":"..","data":..}`; failures go to stderr
//! with an `error` field in place of `data`, and the process exits with 1.

use serde::Serialize;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Payload<'a, T> {
    Data(&'a T),
    Error(&'a str),
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T> {
    success: bool,
    api_version: &'static str,
    #[serde(flatten)]
    payload: Payload<'a, T>,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    fn data(data: &'a T) -> Self {
        Self {
            success: true,
            api_version: API_VERSION,
            payload: Payload::Data(data),
        }
    }
}

impl<'a> Envelope<'a, ()> {
    fn error(message: &'a str) -> Self {
        Self {
            success: false,
            api_version: API_VERSION,
            payload: Payload::Error(message),
        }
    }
}

/// A list result with its length alongside.
#[derive(Debug, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

pub fn print_data<T: Serialize>(data: T) {
    match serde_json::to_string(&Envelope::data(&data)) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to encode response: {}", e)),
    }
}

pub fn print_list<T: Serialize>(items: Vec<T>) {
    print_data(Listing::from(items));
}

/// Prints an error envelope to stderr and exits with status 1.
pub fn exit_with_error(message: &str) -> ! {
    let json = serde_json::to_string(&Envelope::error(message))
        .unwrap_or_else(|_| format!("{{\"success\":false,\"error\":{:?}}}", message));
    eprintln!("{}", json);
    std::process::exit(1);
}
