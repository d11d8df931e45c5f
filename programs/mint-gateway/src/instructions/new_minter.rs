use crate::*;

pub fn handler(ctx: Context<NewMinter>) -> Result<()> {
    let index = ctx.accounts.auth.gateway.register_minter()?;

    let minter = &mut ctx.accounts.minter;
    minter.gateway = ctx.accounts.auth.gateway.key();
    minter.authority = ctx.accounts.new_minter_authority.key();
    minter.bump = ctx.bumps.minter;
    minter.index = index;

    // a fresh minter contributes nothing to total_allowance
    minter.allowance = 0;
    minter.total_minted = 0;

    emit!(NewMinterEvent {
        gateway: minter.gateway,
        minter: minter.key(),
        index: minter.index,
        authority: minter.authority,
    });
    Ok(())
}

/// Adds a minter.
#[derive(Accounts)]
pub struct NewMinter<'info> {
    /// Admin of the [Gateway].
    pub auth: OnlyAdmin<'info>,

    /// CHECK: Account to authorize as a minter.
    pub new_minter_authority: UncheckedAccount<'info>,

    /// Information about the minter.
    ///
    /// The address is derived from (gateway, authority), so creating a second
    /// minter for the same authority collides here and fails at `init`.
    #[account(
        init,
        seeds = [
            b"GatewayMinter".as_ref(),
            auth.gateway.key().to_bytes().as_ref(),
            new_minter_authority.key().to_bytes().as_ref()
        ],
        bump,
        payer = payer,
        space = 8 + Minter::LEN
    )]
    pub minter: Account<'info, Minter>,

    /// Payer for creating the minter.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// System program.
    pub system_program: Program<'info, System>,
}

impl<'info> NewMinter<'info> {
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        Ok(())
    }
}

/// Emitted when a [Minter] is created.
#[event]
pub struct NewMinterEvent {
    /// The [Gateway].
    pub gateway: Pubkey,
    /// The [Minter].
    pub minter: Pubkey,

    /// The [Minter]'s index.
    pub index: u64,
    /// The [Minter]'s authority.
    pub authority: Pubkey,
}
