pub mod error;
pub mod validate;

pub mod config;
pub mod connection;
pub mod defaults;
pub mod download;
pub mod message;
pub mod session;
pub mod state;
pub mod view_model;

pub use crate::config::SessionConfig;
pub use crate::connection::{ConnectionManager, Link, StatusObserver};
pub use crate::download::DownloadRequest;
pub use crate::message::{FlightCommand, Inbound};
pub use crate::session::Session;
pub use crate::state::{ConnectionState, Controls, FlightState, Snapshot};
pub use crate::view_model::{CommandSink, Confirm, RequestOutcome, TelemetryViewModel, View};
