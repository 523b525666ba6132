pub mod auth;
pub mod core;
pub mod http;
pub mod provider;
pub mod store;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
