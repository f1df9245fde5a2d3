//! Infrastructure adapters

mod reqwest_client;
mod stub_client;

pub use reqwest_client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ReqwestHttpClient};
pub use stub_client::{FIRST_POST_TITLE, StubHttpClient};
