use crate::*;

pub fn handler(ctx: Context<PerformMint>, amount: u64) -> Result<()> {
    let gateway = &mut ctx.accounts.gateway;
    let minter = &mut ctx.accounts.minter;

    // allowance + hard cap checks and counter updates; the whole instruction
    // reverts if the mint CPI below fails, so these commit atomically with it
    gateway.record_mint(minter, amount)?;

    let expected_supply = ctx
        .accounts
        .token_mint
        .supply
        .checked_add(amount)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    let seeds = gen_gateway_signer_seeds!(gateway);
    let signer_seeds = &[&seeds[..]];
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        token::MintTo {
            mint: ctx.accounts.token_mint.to_account_info(),
            to: ctx.accounts.destination.to_account_info(),
            authority: gateway.to_account_info(),
        },
        signer_seeds,
    );
    token::mint_to(cpi_ctx, amount)?;

    // extra sanity check
    ctx.accounts.token_mint.reload()?;
    require_eq!(
        ctx.accounts.token_mint.supply,
        expected_supply,
        ErrorCode::Unauthorized
    );

    emit!(MinterMintEvent {
        gateway: gateway.key(),
        minter: minter.key(),
        amount,
        destination: ctx.accounts.destination.key(),
    });
    Ok(())
}

/// Accounts for [mint_gateway::perform_mint].
#[derive(Accounts)]
pub struct PerformMint<'info> {
    /// The [Gateway].
    #[account(mut)]
    pub gateway: Account<'info, Gateway>,

    /// The [Minter]'s authority.
    pub minter_authority: Signer<'info>,

    /// The [Minter] information.
    #[account(mut)]
    pub minter: Account<'info, Minter>,

    /// Token [Mint].
    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    /// Destination [TokenAccount] for minted tokens.
    #[account(mut)]
    pub destination: Account<'info, TokenAccount>,

    /// SPL Token program.
    pub token_program: Program<'info, Token>,
}

impl<'info> PerformMint<'info> {
    pub fn validate(&self) -> Result<()> {
        require_keys_eq!(
            self.minter.gateway,
            self.gateway.key(),
            ErrorCode::Unauthorized
        );
        self.minter.check_authority(self.minter_authority.key())?;

        require_keys_eq!(
            self.token_mint.key(),
            self.gateway.token_mint,
            ErrorCode::Unauthorized
        );
        require_keys_eq!(
            self.destination.mint,
            self.token_mint.key(),
            ErrorCode::Unauthorized
        );
        Ok(())
    }
}

/// Emitted when a [Minter] performs a mint.
#[event]
pub struct MinterMintEvent {
    /// The [Gateway].
    pub gateway: Pubkey,
    /// The [Minter].
    pub minter: Pubkey,

    /// Amount minted.
    pub amount: u64,
    /// Mint destination.
    pub destination: Pubkey,
}
