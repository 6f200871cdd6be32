pub mod cli;
pub mod conf;
pub mod control;
pub mod detect;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod retention;
pub mod rotate;
pub mod snapshot;
pub mod source;
