mod batch;
mod builtins;
mod default_executor;
mod executor;
pub mod launcher;
mod parallel;

pub use batch::run_batch_file;
pub use builtins::Builtin;
pub use default_executor::DefaultExecutor;
pub use executor::{ExecOutcome, ExecStatus, Executor};
pub use launcher::ChildHandle;
pub use parallel::{exec_parallel, split_segments};

pub use crate::error::ExecError;
