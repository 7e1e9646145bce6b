pub mod hold;
pub mod serve;
pub mod share;
pub mod status;
