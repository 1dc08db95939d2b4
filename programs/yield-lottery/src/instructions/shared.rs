use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::constants::VAULT_AUTHORITY_SEED;

/// Moves `amount` between two token accounts of `mint`, signed by `authority`.
///
/// `signer_seeds` is empty when `authority` signed the transaction itself.
pub fn transfer_tokens<'info>(
    from: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    amount: u64,
    mint: &InterfaceAccount<'info, Mint>,
    authority: AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let transfer_accounts = TransferChecked {
        from: from.to_account_info(),
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority,
    };

    let cpi_context = CpiContext::new_with_signer(
        token_program.to_account_info(),
        transfer_accounts,
        signer_seeds,
    );

    transfer_checked(cpi_context, amount, mint.decimals)
}

/// Pays out of a round's yield source, signing as the vault authority PDA.
pub fn transfer_from_vault<'info>(
    yield_source: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    amount: u64,
    mint: &InterfaceAccount<'info, Mint>,
    vault_authority: AccountInfo<'info>,
    vault_authority_bump: u8,
    token_program: &Interface<'info, TokenInterface>,
) -> Result<()> {
    let seeds = &[VAULT_AUTHORITY_SEED.as_bytes(), &[vault_authority_bump]];
    let signer_seeds = &[&seeds[..]];

    transfer_tokens(
        yield_source,
        to,
        amount,
        mint,
        vault_authority,
        token_program,
        signer_seeds,
    )
}
