//! KYC/AML API Client Library
//!
//! Typed async access to the Dataleon KYC/AML verification REST API: companies,
//! individuals, their documents, and the AML suspicions, checks and risk
//! assessments the API attaches to them.
//!
//! Every model is a typed view over an ordered JSON field map. Accessors
//! decode on read and encode on write, so fields added server-side survive a
//! read-modify-write cycle untouched.
//!
//! # Modules
//!
//! - `client`: `KycClient`, the entry point; caches one service per resource.
//! - `config`: Configuration from arguments or environment.
//! - `endpoint`: The `Endpoint` trait tying params objects to the transport.
//! - `enums`: Open enums mirrored from the API.
//! - `errors`: Error handling types.
//! - `fields`: Ordered field bags and the record/enum declaration macros.
//! - `models`: API resources (Company, Individual, Document, ...).
//! - `params`: Per-operation request parameter objects.
//! - `services`: Company, Individual and Document services.
//! - `transport`: Single-request HTTP execution.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod models;
pub mod params;
pub mod services;
pub mod transport;

pub use client::KycClient;
pub use config::{Config, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use enums::*;
pub use errors::{ApiError, ResultExt};
pub use fields::{Fields, Validate};
pub use models::*;
pub use params::*;
pub use services::{CompanyService, DocumentService, IndividualService, OwnerDocuments};
pub use transport::{ApiTransport, API_KEY_HEADER};
