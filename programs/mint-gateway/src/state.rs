//! State structs.

use crate::*;

/// Gates all minting for one token mint.
///
/// ```ignore
/// seeds = [
///     b"Gateway".as_ref(),
///     base.key().to_bytes().as_ref()
/// ],
/// ```
#[account]
#[derive(Copy, Default, Debug, PartialEq, Eq)]
pub struct Gateway {
    /// Base account used to derive the gateway address.
    pub base: Pubkey,
    /// Bump for allowing the gateway to sign as the mint authority.
    pub bump: u8,
    /// Maximum number of tokens that can ever be issued through the gateway.
    /// Immutable after creation.
    pub hard_cap: u64,

    /// Admin account.
    pub admin: Pubkey,
    /// Pending admin account. [Pubkey::default] if no handoff is in progress.
    pub pending_admin: Pubkey,

    /// Mint of the token.
    pub token_mint: Pubkey,
    /// Number of [Minter]s ever created. Monotone; doubles as the next
    /// minter's index.
    pub num_minters: u64,

    /// Total allowance outstanding across all [Minter]s.
    pub total_allowance: u64,
    /// Total amount of tokens minted through the gateway. Never exceeds
    /// [Gateway::hard_cap].
    pub total_minted: u64,
}

impl Gateway {
    /// Number of bytes that a [Gateway] struct takes up.
    pub const LEN: usize = 32 + 1 + 8 + 32 + 32 + 32 + 8 + 8 + 8;
}

/// One who can mint.
///
/// A minter is never closed: revocation sets its allowance to zero, keeping
/// the [Minter::total_minted] audit trail intact.
///
/// ```ignore
/// seeds = [
///     b"GatewayMinter".as_ref(),
///     gateway.key().to_bytes().as_ref(),
///     authority.key().to_bytes().as_ref()
/// ],
/// ```
#[account]
#[derive(Copy, Default, Debug, PartialEq, Eq)]
pub struct Minter {
    /// The [Gateway].
    pub gateway: Pubkey,
    /// Address that can mint.
    pub authority: Pubkey,
    /// Bump seed.
    pub bump: u8,

    /// Auto-incrementing index of the [Minter].
    pub index: u64,

    /// Remaining number of tokens that this [Minter] can mint.
    pub allowance: u64,
    /// Cumulative sum of the number of tokens ever minted by this [Minter].
    pub total_minted: u64,
}

impl Minter {
    /// Number of bytes that a [Minter] struct takes up.
    pub const LEN: usize = 32 + 32 + 1 + 8 + 8 + 8;
}
