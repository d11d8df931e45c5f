use crate::*;

pub fn handler(ctx: Context<MinterUpdate>, allowance: u64) -> Result<()> {
    let gateway = &mut ctx.accounts.auth.gateway;
    let minter = &mut ctx.accounts.minter;
    let previous_allowance = gateway.set_allowance(minter, allowance)?;

    emit!(MinterAllowanceUpdateEvent {
        gateway: minter.gateway,
        minter: minter.key(),
        previous_allowance,
        allowance: minter.allowance,
    });
    Ok(())
}

/// Updates a minter.
#[derive(Accounts)]
pub struct MinterUpdate<'info> {
    /// Admin of the [Gateway].
    pub auth: OnlyAdmin<'info>,

    /// Information about the minter.
    #[account(mut)]
    pub minter: Account<'info, Minter>,
}

impl<'info> MinterUpdate<'info> {
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        require_keys_eq!(
            self.minter.gateway,
            self.auth.gateway.key(),
            ErrorCode::Unauthorized
        );
        Ok(())
    }
}

/// Emitted when a [Minter]'s allowance is updated.
#[event]
pub struct MinterAllowanceUpdateEvent {
    /// The [Gateway].
    pub gateway: Pubkey,
    /// The [Minter].
    pub minter: Pubkey,

    /// The [Minter]'s previous allowance.
    pub previous_allowance: u64,
    /// The [Minter]'s new allowance.
    pub allowance: u64,
}
