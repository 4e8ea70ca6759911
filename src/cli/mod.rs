/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Modules
-------------------------------------------------------------------------------------------------*/

mod args;
mod core;

pub mod log;

/*--------------------------------------------------------------------------------------
  CLI Module Interface
--------------------------------------------------------------------------------------*/

pub use args::Args;
pub use self::core::build_config;
