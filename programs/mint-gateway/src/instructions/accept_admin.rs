use crate::*;

pub fn handler(ctx: Context<AcceptAdmin>) -> Result<()> {
    let gateway = &mut ctx.accounts.gateway;
    let previous_admin = gateway.accept_admin()?;

    emit!(GatewayAdminAcceptEvent {
        gateway: gateway.key(),
        previous_admin,
        admin: gateway.admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AcceptAdmin<'info> {
    /// The [Gateway].
    #[account(mut)]
    pub gateway: Account<'info, Gateway>,

    /// The new admin.
    pub pending_admin: Signer<'info>,
}

impl<'info> AcceptAdmin<'info> {
    pub fn validate(&self) -> Result<()> {
        self.gateway.check_pending_admin(self.pending_admin.key())?;
        Ok(())
    }
}

/// Emitted when a [Gateway]'s admin handoff completes.
#[event]
pub struct GatewayAdminAcceptEvent {
    /// The [Gateway].
    pub gateway: Pubkey,

    /// The [Gateway]'s previous admin.
    pub previous_admin: Pubkey,
    /// The [Gateway]'s new admin.
    pub admin: Pubkey,
}
