pub mod conversion;
pub mod session;
