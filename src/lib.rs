pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod render;
pub mod session;

pub use client::{HttpTransport, RestClient, Transport};
pub use config::{Config, Flavor, ServerSettings};
pub use error::{ClientError, Result};
pub use form::{AddressForm, CustomerForm, FormState};
pub use model::{Address, Customer};
pub use render::ResultsTable;
pub use session::Session;
