mod common;
mod init;
mod lookup;
mod validate;

pub use init::{InitArgs, init_config};
pub use lookup::{LookupArgs, lookup_ship};
pub use validate::{ValidateArgs, validate_config};
