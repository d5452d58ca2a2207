pub mod accrual;
pub mod payslip;

pub use accrual::{Accrual, compute_accrual, money};
pub use payslip::{PayPeriod, payslip_filename, render_payslip};
