//! Forms server client module for REST communication

mod client;
mod error;
mod traits;

pub use client::FormsClient;
pub use traits::FormsApi;

#[cfg(test)]
pub use error::ApiError;
#[cfg(test)]
pub use traits::MockFormsApi;
