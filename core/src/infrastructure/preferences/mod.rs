pub mod codec;
pub mod mappers;
pub mod repositories;
