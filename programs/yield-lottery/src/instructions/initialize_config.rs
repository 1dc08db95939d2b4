use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

/// Accounts required to create the program-wide lottery configuration.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Becomes the admin of every future round.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Singleton config PDA, created once.
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + LotteryConfig::INIT_SPACE,
        seeds = [CONFIG_SEED.as_bytes()],
        bump
    )]
    pub config: Account<'info, LotteryConfig>,

    /// CHECK: data-less PDA that owns each round's yield source, only its bump is used.
    #[account(
        seeds = [VAULT_AUTHORITY_SEED.as_bytes()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// System program to create the config account.
    pub system_program: Program<'info, System>,
}

/// Stores the admin, fee and timing settings every round runs under.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `params` - Fee recipient, randomness source, fee bps and dwell times
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    params: ConfigParams,
) -> Result<()> {
    let mut config = LotteryConfig::new(ctx.accounts.admin.key(), &params)?;
    config.bump = ctx.bumps.config;
    config.vault_authority_bump = ctx.bumps.vault_authority;

    msg!(
        "Lottery config initialized, fee {} bps, fee recipient {}",
        config.fee_bps,
        config.fee_recipient
    );
    ctx.accounts.config.set_inner(config);

    Ok(())
}
