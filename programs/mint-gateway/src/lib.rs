//! Delegated minting gateway for an SPL token mint.
//!
//! The program consists of two types of accounts:
//!
//! - [Gateway], which holds the mint authority of a token and enforces a hard
//!   cap on everything ever issued through it, and
//! - [Minter], which entitles a single authority to mint a bounded allowance
//!   of tokens through the [Gateway].
//!
//! The [Gateway]'s admin creates [Minter]s and adjusts their allowances;
//! allowances are consumed by mints. Admin control changes hands only through
//! a two-step propose/accept handshake, so a fat-fingered transfer can never
//! strand the gateway without an admin.
#![deny(rustdoc::all)]
#![allow(rustdoc::missing_doc_code_examples)]
#![allow(unexpected_cfgs)]

#[macro_use]
mod macros;

mod gateway;
mod state;

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};

pub use state::*;

mod instructions;
pub use instructions::*;

declare_id!("F1cSfwb9AkxDzpyUi2owbh22yKWiQGD39c45FCHWD3w7");

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Mint Gateway",
    project_url: "https://github.com/gatewaylabs/mint-gateway",
    contacts: "email:security@gateway.so",
    policy: "https://github.com/gatewaylabs/mint-gateway/blob/master/SECURITY.md",

    source_code: "https://github.com/gatewaylabs/mint-gateway"
}

/// Program for [mint_gateway].
#[program]
pub mod mint_gateway {
    use super::*;

    // --------------------------------
    // [Gateway] instructions
    // --------------------------------

    /// Creates a new [Gateway].
    ///
    /// The token mint's mint authority and freeze authority must already be
    /// the gateway PDA, so the gateway is the only path through which new
    /// tokens can ever be issued.
    #[access_control(ctx.accounts.validate())]
    pub fn new_gateway(ctx: Context<NewGateway>, hard_cap: u64) -> Result<()> {
        instructions::new_gateway::handler(ctx, hard_cap)
    }

    /// Proposes a new admin of the [Gateway].
    ///
    /// Does not change the admin; the nominee must call [accept_admin].
    /// A second proposal silently replaces the previous nominee.
    #[access_control(ctx.accounts.validate())]
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::transfer_admin::handler(ctx)
    }

    /// Accepts the pending admin nomination of the [Gateway].
    #[access_control(ctx.accounts.validate())]
    pub fn accept_admin(ctx: Context<AcceptAdmin>) -> Result<()> {
        instructions::accept_admin::handler(ctx)
    }

    // --------------------------------
    // [Minter] instructions
    // --------------------------------

    /// Creates a new [Minter] with a zero allowance.
    ///
    /// At most one [Minter] can exist per (gateway, authority) pair; a second
    /// attempt collides on the minter address and fails.
    #[access_control(ctx.accounts.validate())]
    pub fn new_minter(ctx: Context<NewMinter>) -> Result<()> {
        instructions::new_minter::handler(ctx)
    }

    /// Sets a [Minter]'s allowance.
    ///
    /// This is the sole grant and revoke mechanism: revocation is an update
    /// to zero. The record is never closed, preserving its audit counters.
    #[access_control(ctx.accounts.validate())]
    pub fn minter_update(ctx: Context<MinterUpdate>, allowance: u64) -> Result<()> {
        instructions::minter_update::handler(ctx, allowance)
    }

    /// Mints tokens to a destination, consuming allowance and cap headroom.
    #[access_control(ctx.accounts.validate())]
    pub fn perform_mint(ctx: Context<PerformMint>, amount: u64) -> Result<()> {
        instructions::perform_mint::handler(ctx, amount)
    }
}

/// --------------------------------
/// Account structs
/// --------------------------------

/// Accounts shared by all admin-gated instructions.
#[derive(Accounts)]
pub struct OnlyAdmin<'info> {
    /// The [Gateway].
    #[account(mut)]
    pub gateway: Account<'info, Gateway>,
    /// The [Gateway]'s admin.
    pub admin: Signer<'info>,
}

impl<'info> OnlyAdmin<'info> {
    /// Ensures the signer is the gateway's current admin.
    pub fn validate(&self) -> Result<()> {
        self.gateway.check_admin(self.admin.key())?;
        Ok(())
    }
}

/// --------------------------------
/// Error Codes
/// --------------------------------

#[error_code]
pub enum ErrorCode {
    #[msg("You are not authorized to perform this action.")]
    Unauthorized,
    #[msg("No pending admin to accept.")]
    NoPendingAdmin,
    #[msg("Amount must be greater than zero.")]
    InvalidAmount,
    #[msg("Minter allowance exceeded.")]
    AllowanceExceeded,
    #[msg("Cannot mint over hard cap.")]
    HardCapExceeded,
    #[msg("Arithmetic overflow.")]
    ArithmeticOverflow,
}
