//! Line-protocol worker: one JSON request per input line, one JSON response per output line.
//!
//! Requests are handled strictly in order. A failing request produces an error
//! response and the loop moves on; only stream I/O errors stop [`serve`].

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod serve;


pub use dispatcher::Dispatcher;
pub use error::WorkerError;
pub use protocol::{
    ClassificationResponse, ErrorResponse, OutputFormat, Request, Response, RetrievalResponse,
    RoundedScores, TASK_CLASSIFY, TASK_RETRIEVE,
};
pub use serve::{ServeStats, serve};
