pub mod enums;
pub mod request;
pub mod result;
