//! Fixed-rate mortgage amortization with decimal precision.
//!
//! Computes fixed payments, full amortization schedules, and monthly PMI
//! estimates. Extra principal payments can recur on their own cadence
//! (weekly, biweekly, monthly, yearly, or one-time) independent of the
//! regular payment interval; they are merged onto the regular due-date
//! calendar and shorten the schedule accordingly. All money and rate math
//! is carried in `rust_decimal::Decimal`, rounded half-even to the cent
//! only at presentation accessors.

pub mod amortization;
pub mod error;
pub mod extra;
pub mod interval;
pub mod payment;
pub mod period;
pub mod pmi;
pub mod types;

pub use amortization::{AmortizationBuilder, AmortizationTable, PaymentRecord};
pub use error::MortgageError;
pub use extra::{build_extra_payment_map, ExtraPayment, ExtraPaymentMap};
pub use interval::Interval;
pub use payment::PaymentCalculator;
pub use period::PeriodKey;
pub use pmi::PmiCalculator;
pub use types::{round_cents, Money, Rate};

/// Standard result type for all mortgage-core operations
pub type MortgageResult<T> = Result<T, MortgageError>;
