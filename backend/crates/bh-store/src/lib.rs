pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, connect_in_memory};
pub use error::{StoreError, StoreResult};
pub use repositories::run_repository::RunRepository;
pub use repositories::state_repository::StateRepository;
