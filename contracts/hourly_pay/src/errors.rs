use soroban_sdk::contracterror;

/// Rejections returned by every entry point of the hourly pay contract.
///
/// A returned error reverts the whole invocation, so the ledger is always left
/// in the state it had before the call.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum HourlyPayError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller does not hold the role the operation requires.
    Unauthorized = 3,
    AlreadyEmployed = 4,
    NotEmployed = 5,
    /// The employee was fired; the ledger cannot hire again.
    EmploymentTerminated = 6,
    AlreadyWorking = 7,
    NotWorking = 8,
    /// The tracked day period has not begun yet.
    TooEarly = 9,
    ContractExpired = 10,
    PaydayNotReached = 11,
    NothingToWithdraw = 12,
    InsufficientEarnings = 13,
    InsufficientUnearnedBalance = 14,
    /// Pool holds less than one day of wages at the requested rate.
    UnderfundedHire = 15,
    InvalidAmount = 16,
    InvalidConfig = 17,
    ArithmeticOverflow = 18,
}
