#![no_std]

//! Hourly pay escrow.
//!
//! A client funds a token pool, hires one employee at an hourly rate and the
//! employee records work sessions. Earnings accrue per day period under a daily
//! hour cap and are only released once a full payday interval has passed since
//! the previous payout. The client can reclaim whatever is not yet earned.

pub mod accrual;
pub mod errors;
mod events;
pub mod ledger;
pub mod storage;


use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, String};

pub use crate::accrual::{Settlement, SECONDS_PER_DAY, SECONDS_PER_HOUR};
pub use crate::errors::HourlyPayError;
pub use crate::ledger::EmploymentLedger;

use crate::events::{
    emit_setting_updated, ClientWithdrawn, EarningsRefunded, EarningsWithdrawn, EmployeeFired,
    EmployeeHired, FundsDeposited, LedgerInitialized, WorkStarted, WorkStopped,
};

/// Escrow contract paying one employee by the hour.
///
/// # Security Model
///
/// - Every mutating entry point takes the acting address and requires its auth
/// - Owner-only: hire, fire, settings, client withdrawals
/// - Employee-only: start and stop work, withdraw earnings
/// - Owner or employee: refund earnings back to the unearned pool
/// - Anyone may deposit
#[contract]
pub struct HourlyPayContract;

fn token_client<'a>(env: &Env) -> Result<token::Client<'a>, HourlyPayError> {
    let token = storage::read_token(env)?;
    Ok(token::Client::new(env, &token))
}

fn publish_settlement(env: &Env, employee: Address, settlement: &Settlement, earnings: i128) {
    if settlement.forfeited_seconds > 0 {
        log!(
            env,
            "session forfeited {} seconds across {} period boundaries",
            settlement.forfeited_seconds,
            settlement.periods_crossed
        );
    }
    WorkStopped {
        employee,
        credited_seconds: settlement.credited_seconds,
        forfeited_seconds: settlement.forfeited_seconds,
        periods_crossed: settlement.periods_crossed,
        amount: settlement.amount,
        earnings,
    }
    .publish(env);
}

#[contractimpl]
impl HourlyPayContract {
    /// Creates the ledger.
    ///
    /// # Arguments
    ///
    /// * `owner` - The funding client (must authenticate)
    /// * `token` - Token contract used for deposits and payouts
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` on a second call.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), HourlyPayError> {
        owner.require_auth();

        if storage::is_initialized(&env) {
            return Err(HourlyPayError::AlreadyInitialized);
        }

        storage::write_token(&env, &token);
        storage::write_ledger(&env, &EmploymentLedger::new(owner.clone()));

        LedgerInitialized { owner, token }.publish(&env);
        Ok(())
    }

    /// Tops up the pool. Anyone may deposit.
    ///
    /// # Returns
    ///
    /// The pool balance after the deposit.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<i128, HourlyPayError> {
        from.require_auth();

        let mut ledger = storage::read_ledger(&env)?;
        ledger.deposit(amount)?;

        token_client(&env)?.transfer(&from, &env.current_contract_address(), &amount);
        storage::write_ledger(&env, &ledger);

        FundsDeposited {
            from,
            amount,
            total_balance: ledger.total_balance,
        }
        .publish(&env);
        Ok(ledger.total_balance)
    }

    //-------------------------------------------------------------------------
    // Employment lifecycle
    //-------------------------------------------------------------------------

    /// Hires `employee` at `rate` token units per hour.
    ///
    /// # Requirements
    ///
    /// * Caller is the owner
    /// * No employee is hired and none was ever fired
    /// * The pool holds at least `rate * daily_hour_limit`
    pub fn hire(env: Env, caller: Address, employee: Address, rate: i128) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let now = env.ledger().timestamp();

        let mut ledger = storage::read_ledger(&env)?;
        ledger.hire(&caller, employee.clone(), rate, now)?;
        storage::write_ledger(&env, &ledger);

        EmployeeHired {
            employee,
            rate,
            day_period_start: ledger.current_day_period_start,
        }
        .publish(&env);
        Ok(())
    }

    /// Fires the employee, settling an open session first.
    ///
    /// Earnings already banked stay withdrawable by the fired employee.
    pub fn fire(env: Env, caller: Address) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let now = env.ledger().timestamp();

        let mut ledger = storage::read_ledger(&env)?;
        let employee = ledger.employee.clone();
        let settlement = ledger.fire(&caller, now)?;
        storage::write_ledger(&env, &ledger);

        if let Some(employee) = employee {
            if let Some(settlement) = settlement {
                publish_settlement(&env, employee.clone(), &settlement, ledger.earnings);
            }
            EmployeeFired {
                employee,
                earnings: ledger.earnings,
            }
            .publish(&env);
        }
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Settings (owner only, applied to later accruals)
    //-------------------------------------------------------------------------

    pub fn set_daily_hour_limit(env: Env, caller: Address, hours: u32) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.set_daily_hour_limit(&caller, hours)?;
        storage::write_ledger(&env, &ledger);
        emit_setting_updated(&env, symbol_short!("day_limit"), u64::from(hours));
        Ok(())
    }

    /// Sets where day periods begin, in seconds past midnight UTC.
    pub fn set_begin_time_of_day(env: Env, caller: Address, offset: u64) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.set_begin_time_of_day(&caller, offset)?;
        storage::write_ledger(&env, &ledger);
        emit_setting_updated(&env, symbol_short!("begin_tod"), offset);
        Ok(())
    }

    /// Anchors day periods at an absolute timestamp; a future one delays work.
    pub fn set_begin_timestamp(env: Env, caller: Address, timestamp: u64) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.set_begin_timestamp(&caller, timestamp)?;
        storage::write_ledger(&env, &ledger);
        emit_setting_updated(&env, symbol_short!("begin_ts"), timestamp);
        Ok(())
    }

    pub fn set_contract_duration_days(env: Env, caller: Address, days: u32) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.set_contract_duration_days(&caller, days)?;
        storage::write_ledger(&env, &ledger);
        emit_setting_updated(&env, symbol_short!("duration"), u64::from(days));
        Ok(())
    }

    pub fn set_payday_frequency(env: Env, caller: Address, seconds: u64) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.set_payday_frequency(&caller, seconds)?;
        storage::write_ledger(&env, &ledger);
        emit_setting_updated(&env, symbol_short!("payday"), seconds);
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Work sessions
    //-------------------------------------------------------------------------

    /// Opens a work session. `note` is recorded in the event only.
    ///
    /// # Errors
    ///
    /// `NotEmployed`, `Unauthorized`, `AlreadyWorking`, `TooEarly`,
    /// `ContractExpired`, or `InsufficientUnearnedBalance` when the pool
    /// cannot cover the rest of today's hours.
    pub fn start_work(env: Env, caller: Address, note: String) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let now = env.ledger().timestamp();

        let mut ledger = storage::read_ledger(&env)?;
        ledger.start_work(&caller, now)?;
        storage::write_ledger(&env, &ledger);

        WorkStarted {
            employee: caller,
            note,
            started_at: now,
        }
        .publish(&env);
        Ok(())
    }

    /// Closes the open session and banks its pay.
    ///
    /// # Returns
    ///
    /// Token units added to earnings by this session.
    pub fn stop_work(env: Env, caller: Address) -> Result<i128, HourlyPayError> {
        caller.require_auth();
        let now = env.ledger().timestamp();

        let mut ledger = storage::read_ledger(&env)?;
        let settlement = ledger.stop_work(&caller, now)?;
        storage::write_ledger(&env, &ledger);

        publish_settlement(&env, caller, &settlement, ledger.earnings);
        Ok(settlement.amount)
    }

    //-------------------------------------------------------------------------
    // Payout gate
    //-------------------------------------------------------------------------

    /// Transfers all earnings to the employee once the payday interval has
    /// passed since the last payout (or the hire).
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, HourlyPayError> {
        caller.require_auth();
        let now = env.ledger().timestamp();

        let mut ledger = storage::read_ledger(&env)?;
        let amount = ledger.withdraw(&caller, now)?;

        token_client(&env)?.transfer(&env.current_contract_address(), &caller, &amount);
        storage::write_ledger(&env, &ledger);

        EarningsWithdrawn {
            employee: caller,
            amount,
            next_payday: ledger.next_payday(),
        }
        .publish(&env);
        Ok(amount)
    }

    //-------------------------------------------------------------------------
    // Custody
    //-------------------------------------------------------------------------

    /// Returns `amount` of earnings to the client's unearned pool.
    pub fn refund(env: Env, caller: Address, amount: i128) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.refund(&caller, amount)?;
        storage::write_ledger(&env, &ledger);

        EarningsRefunded {
            by: caller,
            amount,
            earnings: ledger.earnings,
        }
        .publish(&env);
        Ok(())
    }

    pub fn refund_all(env: Env, caller: Address) -> Result<i128, HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        let amount = ledger.refund_all(&caller)?;
        storage::write_ledger(&env, &ledger);

        EarningsRefunded {
            by: caller,
            amount,
            earnings: 0,
        }
        .publish(&env);
        Ok(amount)
    }

    /// Sends unearned pool funds back to the owner.
    pub fn client_withdraw(env: Env, caller: Address, amount: i128) -> Result<(), HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        ledger.client_withdraw(&caller, amount)?;

        token_client(&env)?.transfer(&env.current_contract_address(), &caller, &amount);
        storage::write_ledger(&env, &ledger);

        ClientWithdrawn {
            owner: caller,
            amount,
            total_balance: ledger.total_balance,
        }
        .publish(&env);
        Ok(())
    }

    pub fn client_withdraw_all(env: Env, caller: Address) -> Result<i128, HourlyPayError> {
        caller.require_auth();
        let mut ledger = storage::read_ledger(&env)?;
        let amount = ledger.client_withdraw_all(&caller)?;

        token_client(&env)?.transfer(&env.current_contract_address(), &caller, &amount);
        storage::write_ledger(&env, &ledger);

        ClientWithdrawn {
            owner: caller,
            amount,
            total_balance: ledger.total_balance,
        }
        .publish(&env);
        Ok(amount)
    }

    //-------------------------------------------------------------------------
    // Queries
    //-------------------------------------------------------------------------

    pub fn get_ledger(env: Env) -> Result<EmploymentLedger, HourlyPayError> {
        storage::read_ledger(&env)
    }

    pub fn owner(env: Env) -> Result<Address, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.owner)
    }

    pub fn employee(env: Env) -> Result<Option<Address>, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.employee)
    }

    pub fn hired(env: Env) -> Result<bool, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.hired)
    }

    pub fn working(env: Env) -> Result<bool, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.working)
    }

    pub fn rate(env: Env) -> Result<i128, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.rate)
    }

    pub fn earnings(env: Env) -> Result<i128, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.earnings)
    }

    pub fn total_balance(env: Env) -> Result<i128, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.total_balance)
    }

    pub fn unearned_balance(env: Env) -> Result<i128, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.unearned_balance())
    }

    pub fn daily_hour_limit(env: Env) -> Result<u32, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.daily_hour_limit)
    }

    pub fn begin_time_of_day(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.begin_time_of_day_offset)
    }

    pub fn contract_duration_days(env: Env) -> Result<u32, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.contract_duration_days)
    }

    pub fn payday_frequency(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.payday_frequency_seconds)
    }

    pub fn current_day_period_start(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.current_day_period_start)
    }

    pub fn last_payout_checkpoint(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.last_payout_checkpoint)
    }

    /// Earliest timestamp at which `withdraw` can succeed.
    pub fn next_payday(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.next_payday())
    }

    pub fn can_start_work(env: Env) -> Result<bool, HourlyPayError> {
        let now = env.ledger().timestamp();
        Ok(storage::read_ledger(&env)?.can_start_work(now))
    }

    pub fn has_enough_funds_to_start(env: Env) -> Result<bool, HourlyPayError> {
        let now = env.ledger().timestamp();
        Ok(storage::read_ledger(&env)?.has_enough_funds_to_start(now))
    }

    /// Whether the tracked day period has ended.
    pub fn is_new_day(env: Env) -> Result<bool, HourlyPayError> {
        let now = env.ledger().timestamp();
        Ok(storage::read_ledger(&env)?.is_new_day(now))
    }

    pub fn is_overtime(env: Env) -> Result<bool, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.is_overtime())
    }

    /// Length of the open session, 0 when idle.
    pub fn get_work_seconds_in_progress(env: Env) -> Result<u64, HourlyPayError> {
        let now = env.ledger().timestamp();
        Ok(storage::read_ledger(&env)?.work_seconds_in_progress(now))
    }

    pub fn worked_today_in_seconds(env: Env) -> Result<u64, HourlyPayError> {
        Ok(storage::read_ledger(&env)?.worked_today_in_seconds())
    }
}
