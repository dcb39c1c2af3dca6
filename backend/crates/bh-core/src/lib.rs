pub mod error;
pub mod models;
pub mod reconcile;


pub use error::{CoreError, CoreResult};
pub use models::active_run::ActiveRun;
pub use models::last_error::{FailureKind, LastError};
pub use models::resource::ResourceDescriptor;
pub use models::run::WorkflowRun;
pub use models::run_kind::RunKind;
pub use models::run_status::RunStatus;
pub use models::server_phase::ServerPhase;
pub use models::server_state::ServerState;
pub use reconcile::{Observation, ReconcilePolicy, reconcile};
