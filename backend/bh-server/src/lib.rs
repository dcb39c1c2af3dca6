pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use api::{
    error::{ApiError, Result as ApiResult},
    server::{
        server::{get_server_status, start_server, stop_server},
        server_state_response::{ActiveRunDto, LastErrorDto, ServerStateDto, ServerStateResponse},
    },
};
pub use error::{Result as ServerErrorResult, ServerError};
pub use routes::build_router;
pub use shutdown::ShutdownCoordinator;
pub use state::AppState;
