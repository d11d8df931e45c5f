use crate::*;

pub fn handler(ctx: Context<TransferAdmin>) -> Result<()> {
    let gateway = &mut ctx.accounts.gateway;
    gateway.propose_admin(ctx.accounts.next_admin.key());

    emit!(GatewayAdminProposeEvent {
        gateway: gateway.key(),
        current_admin: gateway.admin,
        pending_admin: gateway.pending_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    /// The [Gateway].
    #[account(mut)]
    pub gateway: Account<'info, Gateway>,

    /// The current admin.
    pub admin: Signer<'info>,

    /// CHECK: The proposed next admin.
    pub next_admin: UncheckedAccount<'info>,
}

impl<'info> TransferAdmin<'info> {
    pub fn validate(&self) -> Result<()> {
        self.gateway.check_admin(self.admin.key())?;
        Ok(())
    }
}

/// Emitted when a [Gateway]'s admin is proposed.
#[event]
pub struct GatewayAdminProposeEvent {
    /// The [Gateway].
    pub gateway: Pubkey,

    /// The [Gateway]'s current admin.
    pub current_admin: Pubkey,
    /// The [Gateway]'s pending admin.
    pub pending_admin: Pubkey,
}
