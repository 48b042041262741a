pub mod add;
pub mod check;
pub mod init;
pub mod merge;
pub mod sync;
