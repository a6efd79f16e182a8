pub mod error;
pub mod handler;
pub mod secrets;
pub mod settings;

pub use error::{RunnerError, RunnerResult};
pub use handler::{handle, InvocationResult};
pub use secrets::resolve_token;
pub use settings::{DeployEnv, Settings};
