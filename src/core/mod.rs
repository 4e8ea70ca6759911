/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod config;
pub mod edl;
pub mod errors;
pub mod fetch;
pub mod index;
pub mod json;
pub mod locator;
pub mod pipeline;
pub mod prefix_type;
