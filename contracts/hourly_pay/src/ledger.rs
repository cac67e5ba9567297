use soroban_sdk::{contracttype, Address};

use crate::accrual::{
    daily_cap_seconds, next_period_start, period_start, wages_for, wages_for_span, Settlement,
    SECONDS_PER_DAY,
};
use crate::errors::HourlyPayError;

pub const DEFAULT_DAILY_HOUR_LIMIT: u32 = 8;
pub const MAX_DAILY_HOUR_LIMIT: u32 = 24;
pub const DEFAULT_PAYDAY_FREQUENCY_SECONDS: u64 = 7 * SECONDS_PER_DAY;
pub const DEFAULT_CONTRACT_DURATION_DAYS: u32 = 365;

/// The single record behind an hourly pay contract.
///
/// Every operation takes the authenticated caller and the current ledger
/// timestamp as arguments; the record never reads a clock on its own.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmploymentLedger {
    pub owner: Address,
    /// Current employee, cleared on fire.
    pub employee: Option<Address>,
    /// Last hired employee; keeps access to banked earnings after a fire.
    pub payee: Option<Address>,
    pub hired: bool,
    pub working: bool,
    pub fired: bool,
    /// Token units per hour of work.
    pub rate: i128,
    pub daily_hour_limit: u32,
    pub payday_frequency_seconds: u64,
    pub begin_time_of_day_offset: u64,
    pub begin_timestamp: u64,
    pub contract_start: u64,
    pub contract_duration_days: u32,
    pub current_day_period_start: u64,
    pub worked_seconds_in_period: u64,
    pub work_session_start: u64,
    pub earnings: i128,
    pub last_payout_checkpoint: u64,
    pub total_balance: i128,
}

impl EmploymentLedger {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            employee: None,
            payee: None,
            hired: false,
            working: false,
            fired: false,
            rate: 0,
            daily_hour_limit: DEFAULT_DAILY_HOUR_LIMIT,
            payday_frequency_seconds: DEFAULT_PAYDAY_FREQUENCY_SECONDS,
            begin_time_of_day_offset: 0,
            begin_timestamp: 0,
            contract_start: 0,
            contract_duration_days: DEFAULT_CONTRACT_DURATION_DAYS,
            current_day_period_start: 0,
            worked_seconds_in_period: 0,
            work_session_start: 0,
            earnings: 0,
            last_payout_checkpoint: 0,
            total_balance: 0,
        }
    }

    //-------------------------------------------------------------------------
    // Roles
    //-------------------------------------------------------------------------

    fn require_owner(&self, caller: &Address) -> Result<(), HourlyPayError> {
        if *caller != self.owner {
            return Err(HourlyPayError::Unauthorized);
        }
        Ok(())
    }

    /// Only the current employee passes. A fired employee gets `NotEmployed`,
    /// anyone else `Unauthorized`.
    fn require_employee(&self, caller: &Address) -> Result<(), HourlyPayError> {
        match &self.employee {
            Some(employee) if self.hired && caller == employee => Ok(()),
            _ if self.is_payee(caller) => Err(HourlyPayError::NotEmployed),
            _ => Err(HourlyPayError::Unauthorized),
        }
    }

    fn is_payee(&self, caller: &Address) -> bool {
        self.payee.as_ref() == Some(caller)
    }

    //-------------------------------------------------------------------------
    // Employment lifecycle
    //-------------------------------------------------------------------------

    pub fn hire(
        &mut self,
        caller: &Address,
        employee: Address,
        rate: i128,
        now: u64,
    ) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if self.fired {
            return Err(HourlyPayError::EmploymentTerminated);
        }
        if self.hired {
            return Err(HourlyPayError::AlreadyEmployed);
        }
        // Settlement multiplies the rate by seconds, up to a full day at the
        // highest limit the owner may set later.
        if rate <= 0 || wages_for(rate, daily_cap_seconds(MAX_DAILY_HOUR_LIMIT)).is_err() {
            return Err(HourlyPayError::InvalidAmount);
        }
        let one_day = wages_for(rate, daily_cap_seconds(self.daily_hour_limit))?;
        if self.total_balance < one_day {
            return Err(HourlyPayError::UnderfundedHire);
        }

        self.employee = Some(employee.clone());
        self.payee = Some(employee);
        self.rate = rate;
        self.hired = true;
        self.working = false;
        self.current_day_period_start =
            period_start(now, self.begin_time_of_day_offset).max(self.begin_timestamp);
        self.worked_seconds_in_period = 0;
        self.last_payout_checkpoint = now;
        self.contract_start = now;
        Ok(())
    }

    /// Ends the employment. An open session is settled first.
    pub fn fire(&mut self, caller: &Address, now: u64) -> Result<Option<Settlement>, HourlyPayError> {
        self.require_owner(caller)?;
        if !self.hired {
            return Err(HourlyPayError::NotEmployed);
        }

        let settlement = if self.working {
            Some(self.settle_session(now)?)
        } else {
            None
        };

        self.working = false;
        self.hired = false;
        self.fired = true;
        self.employee = None;
        Ok(settlement)
    }

    //-------------------------------------------------------------------------
    // Configuration
    //-------------------------------------------------------------------------

    pub fn set_daily_hour_limit(&mut self, caller: &Address, hours: u32) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if hours == 0 || hours > MAX_DAILY_HOUR_LIMIT {
            return Err(HourlyPayError::InvalidConfig);
        }
        self.daily_hour_limit = hours;
        Ok(())
    }

    pub fn set_begin_time_of_day(&mut self, caller: &Address, offset: u64) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if offset >= SECONDS_PER_DAY {
            return Err(HourlyPayError::InvalidConfig);
        }
        self.begin_time_of_day_offset = offset;
        Ok(())
    }

    /// Anchors day periods at an absolute timestamp.
    ///
    /// The time-of-day offset becomes `timestamp mod 86400`. A future anchor
    /// also delays the first period: work cannot start before it.
    pub fn set_begin_timestamp(&mut self, caller: &Address, timestamp: u64) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        self.begin_timestamp = timestamp;
        self.begin_time_of_day_offset = timestamp % SECONDS_PER_DAY;

        // Only an idle employment is moved, and only forward.
        if self.hired && !self.working && timestamp > self.current_day_period_start {
            self.current_day_period_start = timestamp;
            self.worked_seconds_in_period = 0;
        }
        Ok(())
    }

    pub fn set_contract_duration_days(&mut self, caller: &Address, days: u32) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if days == 0 {
            return Err(HourlyPayError::InvalidConfig);
        }
        self.contract_duration_days = days;
        Ok(())
    }

    pub fn set_payday_frequency(&mut self, caller: &Address, seconds: u64) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if seconds == 0 {
            return Err(HourlyPayError::InvalidConfig);
        }
        self.payday_frequency_seconds = seconds;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Work sessions
    //-------------------------------------------------------------------------

    pub fn contract_end(&self) -> u64 {
        self.contract_start
            .saturating_add(u64::from(self.contract_duration_days).saturating_mul(SECONDS_PER_DAY))
    }

    fn check_can_start(&self, now: u64) -> Result<(), HourlyPayError> {
        if !self.hired {
            return Err(HourlyPayError::NotEmployed);
        }
        if self.working {
            return Err(HourlyPayError::AlreadyWorking);
        }
        if now < self.current_day_period_start {
            return Err(HourlyPayError::TooEarly);
        }
        if now >= self.contract_end() {
            return Err(HourlyPayError::ContractExpired);
        }
        Ok(())
    }

    pub fn can_start_work(&self, now: u64) -> bool {
        self.check_can_start(now).is_ok()
    }

    /// Whether the unearned pool covers the rest of today's allowance.
    pub fn has_enough_funds_to_start(&self, now: u64) -> bool {
        let worked = self.worked_in_period_at(now);
        let remaining = daily_cap_seconds(self.daily_hour_limit).saturating_sub(worked);
        match wages_for_span(self.rate, worked, remaining) {
            Ok(needed) => self.unearned_balance() >= needed,
            Err(_) => false,
        }
    }

    pub fn start_work(&mut self, caller: &Address, now: u64) -> Result<(), HourlyPayError> {
        self.require_employee(caller)?;
        self.check_can_start(now)?;
        if !self.has_enough_funds_to_start(now) {
            return Err(HourlyPayError::InsufficientUnearnedBalance);
        }
        self.working = true;
        self.work_session_start = now;
        Ok(())
    }

    pub fn stop_work(&mut self, caller: &Address, now: u64) -> Result<Settlement, HourlyPayError> {
        self.require_employee(caller)?;
        if !self.working {
            return Err(HourlyPayError::NotWorking);
        }
        let settlement = self.settle_session(now)?;
        self.working = false;
        Ok(settlement)
    }

    /// Credits the open session against the day period containing `now`.
    ///
    /// Periods that lapse while the session is open are skipped one boundary
    /// at a time and earn nothing; the whole session is then charged against
    /// the allowance of the period it ended in. A session left open for days
    /// therefore pays at most one period's cap.
    ///
    /// The period the session started in is not consulted. Time worked there
    /// after its cap was reached is still paid when the session ends in a
    /// fresh period, up to that period's cap.
    ///
    /// Pay is the increase of the period total, so several short sessions pay
    /// the same as one session of their combined length.
    fn settle_session(&mut self, now: u64) -> Result<Settlement, HourlyPayError> {
        let elapsed = now.saturating_sub(self.work_session_start);

        let mut period = self.current_day_period_start;
        let mut worked = self.worked_seconds_in_period;
        let mut periods_crossed: u32 = 0;
        loop {
            let period_end = next_period_start(period, self.begin_time_of_day_offset);
            if now < period_end {
                break;
            }
            period = period_end;
            worked = 0;
            periods_crossed = periods_crossed.saturating_add(1);
        }

        let allowance = daily_cap_seconds(self.daily_hour_limit).saturating_sub(worked);
        let credited_seconds = elapsed.min(allowance);

        // Never promise more than the pool holds.
        let amount =
            wages_for_span(self.rate, worked, credited_seconds)?.min(self.unearned_balance());
        let earnings = self
            .earnings
            .checked_add(amount)
            .ok_or(HourlyPayError::ArithmeticOverflow)?;

        self.current_day_period_start = period;
        self.worked_seconds_in_period = worked + credited_seconds;
        self.earnings = earnings;

        Ok(Settlement {
            credited_seconds,
            forfeited_seconds: elapsed - credited_seconds,
            periods_crossed,
            amount,
        })
    }

    pub fn is_new_day(&self, now: u64) -> bool {
        now >= next_period_start(self.current_day_period_start, self.begin_time_of_day_offset)
    }

    pub fn work_seconds_in_progress(&self, now: u64) -> u64 {
        if self.working {
            now.saturating_sub(self.work_session_start)
        } else {
            0
        }
    }

    pub fn worked_today_in_seconds(&self) -> u64 {
        self.worked_seconds_in_period
    }

    pub fn is_overtime(&self) -> bool {
        self.worked_seconds_in_period >= daily_cap_seconds(self.daily_hour_limit)
    }

    /// Seconds already credited to the period containing `now`.
    fn worked_in_period_at(&self, now: u64) -> u64 {
        if self.is_new_day(now) {
            0
        } else {
            self.worked_seconds_in_period
        }
    }

    //-------------------------------------------------------------------------
    // Payout gate
    //-------------------------------------------------------------------------

    pub fn next_payday(&self) -> u64 {
        self.last_payout_checkpoint
            .saturating_add(self.payday_frequency_seconds)
    }

    /// Releases all earnings to the payee. Returns the amount to transfer.
    pub fn withdraw(&mut self, caller: &Address, now: u64) -> Result<i128, HourlyPayError> {
        if !self.is_payee(caller) {
            return Err(HourlyPayError::Unauthorized);
        }
        if self.earnings <= 0 {
            return Err(HourlyPayError::NothingToWithdraw);
        }
        if now < self.next_payday() {
            return Err(HourlyPayError::PaydayNotReached);
        }

        let amount = self.earnings;
        self.total_balance -= amount;
        self.earnings = 0;
        self.last_payout_checkpoint = now;
        Ok(amount)
    }

    //-------------------------------------------------------------------------
    // Custody
    //-------------------------------------------------------------------------

    pub fn unearned_balance(&self) -> i128 {
        self.total_balance - self.earnings
    }

    pub fn deposit(&mut self, amount: i128) -> Result<(), HourlyPayError> {
        if amount <= 0 {
            return Err(HourlyPayError::InvalidAmount);
        }
        self.total_balance = self
            .total_balance
            .checked_add(amount)
            .ok_or(HourlyPayError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Moves `amount` of earnings back to the client's reclaimable pool.
    /// No tokens leave the contract.
    pub fn refund(&mut self, caller: &Address, amount: i128) -> Result<(), HourlyPayError> {
        if *caller != self.owner && !self.is_payee(caller) {
            return Err(HourlyPayError::Unauthorized);
        }
        if amount <= 0 {
            return Err(HourlyPayError::InvalidAmount);
        }
        if amount > self.earnings {
            return Err(HourlyPayError::InsufficientEarnings);
        }
        self.earnings -= amount;
        Ok(())
    }

    pub fn refund_all(&mut self, caller: &Address) -> Result<i128, HourlyPayError> {
        if *caller != self.owner && !self.is_payee(caller) {
            return Err(HourlyPayError::Unauthorized);
        }
        let amount = self.earnings;
        if amount <= 0 {
            return Err(HourlyPayError::InsufficientEarnings);
        }
        self.earnings = 0;
        Ok(amount)
    }

    /// Releases unearned pool funds to the owner. Earned funds stay locked.
    pub fn client_withdraw(&mut self, caller: &Address, amount: i128) -> Result<(), HourlyPayError> {
        self.require_owner(caller)?;
        if amount <= 0 {
            return Err(HourlyPayError::InvalidAmount);
        }
        if amount > self.unearned_balance() {
            return Err(HourlyPayError::InsufficientUnearnedBalance);
        }
        self.total_balance -= amount;
        Ok(())
    }

    pub fn client_withdraw_all(&mut self, caller: &Address) -> Result<i128, HourlyPayError> {
        self.require_owner(caller)?;
        let amount = self.unearned_balance();
        if amount <= 0 {
            return Err(HourlyPayError::InsufficientUnearnedBalance);
        }
        self.total_balance -= amount;
        Ok(amount)
    }
}
