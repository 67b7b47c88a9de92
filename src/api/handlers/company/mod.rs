//! Company endpoints: registration, login, logout, and current identity.
//!
//! `/logout` and `/current-user` sit behind [`gate::require_company`], which
//! attaches the authenticated [`crate::company::CompanyProfile`] to the request.

mod cookies;
pub(crate) mod current_user;
pub(crate) mod gate;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
pub(crate) mod types;
mod utils;

pub use gate::require_company;
