//-----------------------------------------------------------------------------
// Events
//-----------------------------------------------------------------------------

use soroban_sdk::{contractevent, Address, Env, String, Symbol};

#[contractevent]
#[derive(Clone, Debug)]
pub struct LedgerInitialized {
    #[topic]
    pub owner: Address,
    pub token: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct FundsDeposited {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub total_balance: i128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeHired {
    #[topic]
    pub employee: Address,
    pub rate: i128,
    pub day_period_start: u64,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct EmployeeFired {
    #[topic]
    pub employee: Address,
    pub earnings: i128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct WorkStarted {
    #[topic]
    pub employee: Address,
    pub note: String,
    pub started_at: u64,
}

/// Emitted whenever a session is closed, by the employee or by a fire.
#[contractevent]
#[derive(Clone, Debug)]
pub struct WorkStopped {
    #[topic]
    pub employee: Address,
    pub credited_seconds: u64,
    pub forfeited_seconds: u64,
    pub periods_crossed: u32,
    pub amount: i128,
    pub earnings: i128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct EarningsWithdrawn {
    #[topic]
    pub employee: Address,
    pub amount: i128,
    pub next_payday: u64,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct EarningsRefunded {
    #[topic]
    pub by: Address,
    pub amount: i128,
    pub earnings: i128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct ClientWithdrawn {
    #[topic]
    pub owner: Address,
    pub amount: i128,
    pub total_balance: i128,
}

/// Owner changed one of the ledger settings.
#[contractevent]
#[derive(Clone, Debug)]
pub struct SettingUpdated {
    #[topic]
    pub setting: Symbol,
    pub value: u64,
}

pub fn emit_setting_updated(e: &Env, setting: Symbol, value: u64) {
    SettingUpdated { setting, value }.publish(e);
}
