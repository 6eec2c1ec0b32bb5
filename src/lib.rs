pub mod blocking;
pub mod cli;
pub mod config;
pub mod http;
pub mod log;

pub use crate::config::{LightWalletConfig, load_configuration};
pub use crate::http::{ClientConfig, ErrorKind, LightWalletClient, LightWalletError, LightWalletRequest};
