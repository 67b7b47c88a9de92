//! Company accounts: records, credential material, tokens, and persistence.
//!
//! Flow Overview: registration generates client credentials and hashes the
//! access code before the record reaches the store; login verifies both and
//! mints a token pair through [`tokens::TokenIssuer`].

pub mod credentials;
pub mod model;
pub mod store;
pub mod tokens;

pub use model::{CompanyAccount, CompanyProfile, NewCompany};
pub use store::{CompanyStore, PgCompanyStore, SharedStore, StoreError};
pub use tokens::{TokenConfig, TokenIssuer};
