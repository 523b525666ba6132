pub mod api;
pub mod oauth;
pub mod pages;
