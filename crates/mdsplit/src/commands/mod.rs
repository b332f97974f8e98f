pub mod batch;
pub mod check;
pub mod init;
pub mod parse;
