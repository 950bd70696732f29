mod check;
mod init;

pub use check::run_check;
pub use init::run_init;
