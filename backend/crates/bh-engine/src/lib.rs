pub mod engine;
pub mod error;
pub mod http_engine;

pub use engine::WorkflowEngine;
pub use error::{EngineError, EngineResult};
pub use http_engine::HttpWorkflowEngine;
