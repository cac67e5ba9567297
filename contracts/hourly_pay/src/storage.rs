use soroban_sdk::{contracttype, Address, Env};

use crate::errors::HourlyPayError;
use crate::ledger::EmploymentLedger;

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum StorageKey {
    /// Token used for deposits and payouts
    Token,
    /// The employment ledger record
    Ledger,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&StorageKey::Ledger)
}

pub fn read_ledger(env: &Env) -> Result<EmploymentLedger, HourlyPayError> {
    env.storage()
        .persistent()
        .get(&StorageKey::Ledger)
        .ok_or(HourlyPayError::NotInitialized)
}

pub fn write_ledger(env: &Env, ledger: &EmploymentLedger) {
    env.storage().persistent().set(&StorageKey::Ledger, ledger);
}

pub fn read_token(env: &Env) -> Result<Address, HourlyPayError> {
    env.storage()
        .persistent()
        .get(&StorageKey::Token)
        .ok_or(HourlyPayError::NotInitialized)
}

pub fn write_token(env: &Env, token: &Address) {
    env.storage().persistent().set(&StorageKey::Token, token);
}
