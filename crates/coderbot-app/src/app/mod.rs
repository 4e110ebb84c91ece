pub mod commands;
pub mod oneshot;
pub mod repl;
pub mod setup;

pub use oneshot::run_prompt_mode;
pub use repl::run_repl_mode;
pub use setup::{init_tracing, setup_from_cli, AppContext};
