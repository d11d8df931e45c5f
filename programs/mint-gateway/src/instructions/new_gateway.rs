use anchor_lang::solana_program::program_option::COption;

use crate::*;

pub fn handler(ctx: Context<NewGateway>, hard_cap: u64) -> Result<()> {
    let gateway = &mut ctx.accounts.gateway;
    gateway.base = ctx.accounts.base.key();
    gateway.bump = ctx.bumps.gateway;
    gateway.hard_cap = hard_cap;
    gateway.admin = ctx.accounts.admin.key();
    gateway.pending_admin = Pubkey::default();
    gateway.token_mint = ctx.accounts.token_mint.key();
    gateway.num_minters = 0;

    gateway.total_allowance = 0;
    gateway.total_minted = 0;

    emit!(NewGatewayEvent {
        gateway: gateway.key(),
        hard_cap,
        admin: ctx.accounts.admin.key(),
        token_mint: ctx.accounts.token_mint.key()
    });

    Ok(())
}

#[derive(Accounts)]
pub struct NewGateway<'info> {
    /// Base account.
    pub base: Signer<'info>,

    /// The [Gateway] to create.
    #[account(
        init,
        seeds = [
            b"Gateway".as_ref(),
            base.key().to_bytes().as_ref()
        ],
        bump,
        payer = payer,
        space = 8 + Gateway::LEN
    )]
    pub gateway: Account<'info, Gateway>,

    /// CHECK: Admin-to-be of the [Gateway].
    pub admin: UncheckedAccount<'info>,

    /// Token mint to gate minting for.
    pub token_mint: Account<'info, Mint>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Payer.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program.
    pub system_program: Program<'info, System>,
}

impl<'info> NewGateway<'info> {
    /// The gateway PDA must already hold both authorities over the mint, so
    /// no one can issue or freeze around the gateway.
    pub fn validate(&self) -> Result<()> {
        match self.token_mint.mint_authority {
            COption::Some(mint_authority) => {
                require_keys_eq!(mint_authority, self.gateway.key(), ErrorCode::Unauthorized);
            }
            COption::None => return Err(error!(ErrorCode::Unauthorized)),
        }
        match self.token_mint.freeze_authority {
            COption::Some(freeze_authority) => {
                require_keys_eq!(freeze_authority, self.gateway.key(), ErrorCode::Unauthorized);
            }
            COption::None => return Err(error!(ErrorCode::Unauthorized)),
        }
        Ok(())
    }
}

/// Emitted when a [Gateway] is created.
#[event]
pub struct NewGatewayEvent {
    /// The [Gateway].
    pub gateway: Pubkey,

    /// Hard cap.
    pub hard_cap: u64,
    /// The admin.
    pub admin: Pubkey,
    /// The [Mint] of the token.
    pub token_mint: Pubkey,
}
