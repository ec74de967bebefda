// src/lib.rs

pub mod api;
pub mod batch;
pub mod error;
pub mod http;
pub mod retry;
pub mod signer;
pub mod transport;

pub use api::GiftCodeApi;
pub use batch::{BatchReport, BatchResult, BatchRunner, PlayerRecord, RunState, parse_fids};
pub use error::Error;
pub use http::{HttpClient, ReqwestClient};
pub use signer::Signer;
pub use transport::Transport;
