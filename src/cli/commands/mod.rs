mod init;
mod recent;
mod stats;

pub use init::cmd_init;
pub use recent::cmd_recent;
pub use stats::cmd_stats;
