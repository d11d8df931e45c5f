pub mod accept_admin;
pub mod minter_update;
pub mod new_gateway;
pub mod new_minter;
pub mod perform_mint;
pub mod transfer_admin;

pub use accept_admin::*;
pub use minter_update::*;
pub use new_gateway::*;
pub use new_minter::*;
pub use perform_mint::*;
pub use transfer_admin::*;
