//! # PDA導出
//!
//! Vaultプログラムが期待するアドレスを所有者の公開鍵から導出する。
//!
//! 導出は2段階で、順序とシード入力を変えてはならない:
//! 1. `state` = PDA(["state", owner])
//! 2. `vault` = PDA(["vault", state])
//!
//! vault は所有者ではなく state の下に名前空間化されている。

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::error::VaultError;

/// state PDAのシードプレフィックス
pub const STATE_SEED: &[u8] = b"state";

/// vault PDAのシードプレフィックス
pub const VAULT_SEED: &[u8] = b"vault";

/// 所有者ごとの state / vault アドレス。リクエストごとに計算し、キャッシュしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultIdentity {
    pub state: Pubkey,
    pub state_bump: u8,
    pub vault: Pubkey,
    pub vault_bump: u8,
}

/// state PDAを導出する。
/// seeds = [b"state", owner], program = Vault
pub fn derive_state(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STATE_SEED, owner.as_ref()], program_id)
}

/// vault PDAを導出する。
/// seeds = [b"vault", state], program = Vault
pub fn derive_vault(state: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, state.as_ref()], program_id)
}

/// 所有者から state → vault の順に導出する。
pub fn derive_identity(owner: &Pubkey, program_id: &Pubkey) -> VaultIdentity {
    let (state, state_bump) = derive_state(owner, program_id);
    let (vault, vault_bump) = derive_vault(&state, program_id);
    VaultIdentity {
        state,
        state_bump,
        vault,
        vault_bump,
    }
}

/// Base58文字列を公開鍵としてパースする。失敗時は `InvalidKeyFormat(field)`。
pub fn parse_pubkey(field: &'static str, raw: &str) -> Result<Pubkey, VaultError> {
    Pubkey::from_str(raw.trim()).map_err(|_| VaultError::InvalidKeyFormat { field })
}
