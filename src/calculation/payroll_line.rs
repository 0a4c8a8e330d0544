//! Per-employee payroll line calculation.
//!
//! This module turns one employee's attendance count for a month into a
//! [`PayrollLine`] using the configured [`PayrollPolicy`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayrollPolicy;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{Employee, PaymentStatus, PayrollLine};

/// Rounds a monetary amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the base salary used for payroll.
///
/// An employee without a salary on file, or with a zero salary, is paid the
/// policy default.
///
/// # Examples
///
/// ```
/// use hrms_payroll::calculation::resolve_base_salary;
/// use rust_decimal::Decimal;
///
/// let default = Decimal::new(50000, 0);
/// assert_eq!(resolve_base_salary(None, default), default);
/// assert_eq!(resolve_base_salary(Some(Decimal::ZERO), default), default);
/// assert_eq!(resolve_base_salary(Some(Decimal::new(61000, 0)), default), Decimal::new(61000, 0));
/// ```
pub fn resolve_base_salary(salary: Option<Decimal>, default_salary: Decimal) -> Decimal {
    match salary {
        Some(amount) if !amount.is_zero() => amount,
        _ => default_salary,
    }
}

/// Returns `working_days - present_days`.
///
/// The result is negative when an employee has more attendance records than
/// working days, unless `clamp` is set, in which case it never drops below
/// zero.
pub fn calculate_leave_days(working_days: u32, present_days: u32, clamp: bool) -> i64 {
    let leave_days = i64::from(working_days) - i64::from(present_days);
    if clamp { leave_days.max(0) } else { leave_days }
}

/// Calculates an employee's payroll line for a month.
///
/// # Formula
///
/// ```text
/// base        = salary, or the policy default
/// allowances  = allowance_rate * base
/// gross       = base + allowances
/// tax         = tax_rate * gross
/// deductions  = leave_days * (base / working_days)
/// net         = gross - tax - deductions
/// ```
///
/// Allowances, tax and deductions are rounded to cents before the net is
/// taken, so `net == base + allowances - tax - deductions` holds exactly.
///
/// # Errors
///
/// Returns `Internal` if `working_days` is zero or any amount falls outside
/// the range of [`Decimal`].
///
/// # Examples
///
/// ```
/// use hrms_payroll::calculation::calculate_payroll_line;
/// use hrms_payroll::config::PayrollPolicy;
/// use hrms_payroll::models::{Employee, EmployeeStatus};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     employee_id: "EMP-002".to_string(),
///     first_name: "Bob".to_string(),
///     last_name: "Smith".to_string(),
///     department: "Finance".to_string(),
///     position: "Financial Analyst".to_string(),
///     salary: None,
///     status: EmployeeStatus::Active,
/// };
///
/// let line = calculate_payroll_line(&employee, 20, &PayrollPolicy::default()).unwrap();
/// assert_eq!(line.leave_days, 2);
/// assert_eq!(line.deductions, Decimal::from_str("4545.45").unwrap());
/// assert_eq!(line.net_salary, Decimal::from_str("59454.55").unwrap());
/// ```
pub fn calculate_payroll_line(
    employee: &Employee,
    present_days: u32,
    policy: &PayrollPolicy,
) -> HrmsResult<PayrollLine> {
    let out_of_range = || HrmsError::Internal {
        message: format!(
            "payroll amount out of range for employee {}",
            employee.employee_id
        ),
    };

    let working_days = policy.working_days;
    let leave_days = calculate_leave_days(working_days, present_days, policy.clamp_leave_days);

    let base_salary = resolve_base_salary(employee.salary, policy.default_salary);
    let allowances = base_salary
        .checked_mul(policy.allowance_rate)
        .map(round_money)
        .ok_or_else(out_of_range)?;
    let gross_salary = base_salary
        .checked_add(allowances)
        .ok_or_else(out_of_range)?;
    let tax = gross_salary
        .checked_mul(policy.tax_rate)
        .map(round_money)
        .ok_or_else(out_of_range)?;
    let daily_rate = base_salary
        .checked_div(Decimal::from(working_days))
        .ok_or_else(|| HrmsError::Internal {
            message: "payroll policy has zero working days".to_string(),
        })?;
    let deductions = Decimal::from(leave_days)
        .checked_mul(daily_rate)
        .map(round_money)
        .ok_or_else(out_of_range)?;
    let net_salary = gross_salary
        .checked_sub(tax)
        .and_then(|net| net.checked_sub(deductions))
        .ok_or_else(out_of_range)?;

    Ok(PayrollLine {
        employee: employee.snapshot(),
        base_salary,
        allowances,
        deductions,
        tax,
        net_salary,
        working_days,
        present_days,
        leave_days,
        payment_status: PaymentStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_employee(salary: Option<Decimal>) -> Employee {
        Employee {
            employee_id: "EMP-001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Nguyen".to_string(),
            department: "Engineering".to_string(),
            position: "Backend Engineer".to_string(),
            salary,
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_scenario_default_salary_twenty_present_days() {
        let line = calculate_payroll_line(&create_employee(None), 20, &PayrollPolicy::default()).unwrap();

        assert_eq!(line.base_salary, dec("50000"));
        assert_eq!(line.working_days, 22);
        assert_eq!(line.present_days, 20);
        assert_eq!(line.leave_days, 2);
        assert_eq!(line.allowances, dec("10000"));
        assert_eq!(line.tax, dec("6000"));
        assert_eq!(line.deductions, dec("4545.45"));
        assert_eq!(line.net_salary, dec("59454.55"));
        assert_eq!(line.payment_status, PaymentStatus::Pending);
        assert!(line.is_balanced());
    }

    #[test]
    fn test_full_attendance_has_no_deductions() {
        let line = calculate_payroll_line(
            &create_employee(Some(dec("60000"))),
            22,
            &PayrollPolicy::default(),
        )
        .unwrap();
        assert_eq!(line.leave_days, 0);
        assert_eq!(line.deductions, Decimal::ZERO);
        // 60000 + 12000 - 7200
        assert_eq!(line.net_salary, dec("64800"));
    }

    #[test]
    fn test_no_attendance_deducts_whole_base() {
        let line = calculate_payroll_line(&create_employee(None), 0, &PayrollPolicy::default()).unwrap();
        assert_eq!(line.leave_days, 22);
        assert_eq!(line.deductions, dec("50000"));
        // 60000 - 6000 - 50000
        assert_eq!(line.net_salary, dec("4000"));
    }

    #[test]
    fn test_extra_attendance_gives_negative_deduction() {
        let line = calculate_payroll_line(&create_employee(None), 25, &PayrollPolicy::default()).unwrap();
        assert_eq!(line.leave_days, -3);
        assert_eq!(line.deductions, dec("-6818.18"));
        assert_eq!(line.net_salary, dec("60818.18"));
        assert!(line.is_balanced());
    }

    #[test]
    fn test_clamp_policy_stops_bonus() {
        let policy = PayrollPolicy {
            clamp_leave_days: true,
            ..PayrollPolicy::default()
        };
        let line = calculate_payroll_line(&create_employee(None), 25, &policy).unwrap();
        assert_eq!(line.leave_days, 0);
        assert_eq!(line.deductions, Decimal::ZERO);
        assert_eq!(line.net_salary, dec("54000"));
    }

    #[test]
    fn test_zero_salary_uses_default() {
        let line = calculate_payroll_line(
            &create_employee(Some(Decimal::ZERO)),
            22,
            &PayrollPolicy::default(),
        )
        .unwrap();
        assert_eq!(line.base_salary, dec("50000"));
    }

    #[test]
    fn test_line_captures_snapshot() {
        let line = calculate_payroll_line(&create_employee(None), 22, &PayrollPolicy::default()).unwrap();
        assert_eq!(line.employee.employee_id, "EMP-001");
        assert_eq!(line.employee.employee_name, "Alice Nguyen");
        assert_eq!(line.employee.department, "Engineering");
    }

    #[test]
    fn test_zero_working_days_is_an_error() {
        let policy = PayrollPolicy {
            working_days: 0,
            ..PayrollPolicy::default()
        };
        let result = calculate_payroll_line(&create_employee(None), 20, &policy);
        assert!(matches!(result, Err(HrmsError::Internal { .. })));
    }

    #[test]
    fn test_salary_beyond_decimal_range_is_an_error() {
        let result = calculate_payroll_line(
            &create_employee(Some(Decimal::MAX)),
            22,
            &PayrollPolicy::default(),
        );
        match result {
            Err(HrmsError::Internal { message }) => assert!(message.contains("EMP-001")),
            other => panic!("Expected Internal error, got {other:?}"),
        }
    }

    #[test]
    fn test_leave_days_unclamped_and_clamped() {
        assert_eq!(calculate_leave_days(22, 30, false), -8);
        assert_eq!(calculate_leave_days(22, 30, true), 0);
        assert_eq!(calculate_leave_days(22, 10, true), 12);
    }

    proptest! {
        #[test]
        fn prop_line_is_always_balanced(
            salary_cents in 0i64..50_000_000,
            present_days in 0u32..40,
            clamp in any::<bool>(),
        ) {
            let policy = PayrollPolicy { clamp_leave_days: clamp, ..PayrollPolicy::default() };
            let employee = create_employee(Some(Decimal::new(salary_cents, 2)));
            let line = calculate_payroll_line(&employee, present_days, &policy).unwrap();

            prop_assert!(line.is_balanced());
            prop_assert_eq!(line.allowances, round_money(line.base_salary * dec("0.2")));
            prop_assert_eq!(line.tax, round_money((line.base_salary + line.allowances) * dec("0.1")));
            prop_assert_eq!(
                line.deductions,
                round_money(Decimal::from(line.leave_days) * (line.base_salary / Decimal::from(22)))
            );
            if clamp {
                prop_assert!(line.leave_days >= 0);
            } else {
                prop_assert_eq!(line.leave_days, 22 - i64::from(present_days));
            }
        }
    }
}
