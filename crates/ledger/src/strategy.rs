//! Kind-specific posting rules.
//!
//! The strategy set is a closed tagged-variant dispatch: [`post`] matches
//! exhaustively over [`MovementKind`], so adding a kind (transfers, fees)
//! means adding a variant and a posting function, and the compiler finds every
//! site that must change. Unknown kinds only exist at the parse boundary
//! (`MovementKind::from_str`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use corebank_core::{LedgerError, LedgerResult};

use crate::account::Account;
use crate::movement::{MAX_DESCRIPTION_LEN, Movement, MovementKind};

/// Apply a movement of the given kind to the account.
///
/// Validates the shared preconditions, computes the balance transition for
/// the kind, mutates the account balance and returns the movement carrying
/// the before/after snapshots. On any error the account is left untouched.
///
/// `requested` is the unsigned amount for both kinds; withdrawals are
/// negated internally when stored. Callers never pass a negative amount.
pub fn post(
    account: &mut Account,
    kind: MovementKind,
    requested: Decimal,
    description: Option<String>,
    occurred_at: DateTime<Utc>,
) -> LedgerResult<Movement> {
    validate(account, requested, description.as_deref())?;

    match kind {
        MovementKind::Deposit => Ok(deposit(account, requested, description, occurred_at)),
        MovementKind::Withdrawal => withdraw(account, requested, description, occurred_at),
    }
}

/// Preconditions shared by every movement kind.
fn validate(account: &Account, requested: Decimal, description: Option<&str>) -> LedgerResult<()> {
    if requested <= Decimal::ZERO {
        return Err(LedgerError::validation(
            "movement value must be greater than zero",
        ));
    }

    if !account.is_active() {
        return Err(LedgerError::InactiveAccount(account.account_number().clone()));
    }

    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(LedgerError::validation(format!(
                "description exceeds {MAX_DESCRIPTION_LEN} characters"
            )));
        }
    }

    Ok(())
}

fn deposit(
    account: &mut Account,
    requested: Decimal,
    description: Option<String>,
    occurred_at: DateTime<Utc>,
) -> Movement {
    let before = account.current_balance();
    let after = before + requested;

    let movement = Movement::record(
        account.account_number().clone(),
        MovementKind::Deposit,
        requested,
        before,
        after,
        occurred_at,
        description,
    );

    account.set_current_balance(after);
    movement
}

fn withdraw(
    account: &mut Account,
    requested: Decimal,
    description: Option<String>,
    occurred_at: DateTime<Utc>,
) -> LedgerResult<Movement> {
    let before = account.current_balance();

    if requested > before {
        return Err(LedgerError::InsufficientFunds {
            available: before,
            requested,
        });
    }

    let after = before - requested;

    let movement = Movement::record(
        account.account_number().clone(),
        MovementKind::Withdrawal,
        -requested,
        before,
        after,
        occurred_at,
        description,
    );

    account.set_current_balance(after);
    Ok(movement)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use corebank_core::CustomerId;

    use super::*;
    use crate::account::AccountType;

    fn owner() -> CustomerId {
        "CLI-0A1B2C3D".parse().unwrap()
    }

    fn account_with_balance(balance: &str) -> Account {
        Account::open(
            owner(),
            AccountType::Savings,
            balance.parse().unwrap(),
            Utc::now(),
        )
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn deposit_adds_and_snapshots_the_transition() {
        let mut account = account_with_balance("1000.00");

        let movement = post(
            &mut account,
            MovementKind::Deposit,
            dec("500.00"),
            Some("payroll".to_string()),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(account.current_balance(), dec("1500.00"));
        assert_eq!(movement.kind(), MovementKind::Deposit);
        assert_eq!(movement.value(), dec("500.00"));
        assert_eq!(movement.balance_before(), dec("1000.00"));
        assert_eq!(movement.balance_after(), dec("1500.00"));
        assert_eq!(movement.description(), Some("payroll"));
        assert_eq!(movement.account_number(), account.account_number());
    }

    #[test]
    fn withdrawal_subtracts_and_stores_a_negative_value() {
        let mut account = account_with_balance("1000.00");

        let movement = post(
            &mut account,
            MovementKind::Withdrawal,
            dec("300.00"),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(account.current_balance(), dec("700.00"));
        assert_eq!(movement.value(), dec("-300.00"));
        assert_eq!(movement.balance_before(), dec("1000.00"));
        assert_eq!(movement.balance_after(), dec("700.00"));
    }

    #[test]
    fn withdrawal_of_the_full_balance_is_allowed() {
        let mut account = account_with_balance("250.00");

        post(&mut account, MovementKind::Withdrawal, dec("250.00"), None, Utc::now()).unwrap();

        assert_eq!(account.current_balance(), Decimal::ZERO);
    }

    #[test]
    fn overdraft_fails_and_leaves_the_account_untouched() {
        let mut account = account_with_balance("100.00");

        let err = post(
            &mut account,
            MovementKind::Withdrawal,
            dec("100.01"),
            None,
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                available: dec("100.00"),
                requested: dec("100.01"),
            }
        );
        assert_eq!(account.current_balance(), dec("100.00"));
    }

    #[test]
    fn inactive_account_rejects_both_kinds() {
        let mut account = account_with_balance("100.00");
        account.deactivate();

        for kind in [MovementKind::Deposit, MovementKind::Withdrawal] {
            let err = post(&mut account, kind, dec("10.00"), None, Utc::now()).unwrap_err();
            assert_eq!(
                err,
                LedgerError::InactiveAccount(account.account_number().clone())
            );
        }
        assert_eq!(account.current_balance(), dec("100.00"));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let mut account = account_with_balance("100.00");

        for value in ["0", "0.00", "-5.00"] {
            let err = post(
                &mut account,
                MovementKind::Deposit,
                dec(value),
                None,
                Utc::now(),
            )
            .unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)), "value {value}");
        }
    }

    #[test]
    fn description_limit_is_enforced() {
        let mut account = account_with_balance("100.00");

        let at_limit = "x".repeat(MAX_DESCRIPTION_LEN);
        post(
            &mut account,
            MovementKind::Deposit,
            dec("1.00"),
            Some(at_limit),
            Utc::now(),
        )
        .unwrap();

        let over_limit = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let err = post(
            &mut account,
            MovementKind::Deposit,
            dec("1.00"),
            Some(over_limit),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of accepted movements, the balance
        /// equals the opening balance plus the signed sum of movement values,
        /// and the before/after snapshots chain without gaps.
        #[test]
        fn balance_is_derived_from_the_movement_chain(
            ops in prop::collection::vec((any::<bool>(), 1i64..1_000_000i64), 1..40)
        ) {
            let mut account = account_with_balance("500000.00");
            let mut movements = Vec::new();

            for (is_deposit, cents) in ops {
                let kind = if is_deposit {
                    MovementKind::Deposit
                } else {
                    MovementKind::Withdrawal
                };
                let value = Decimal::new(cents, 2);

                // Overdrafts are rejected without side effects; skip them.
                if let Ok(movement) = post(&mut account, kind, value, None, Utc::now()) {
                    movements.push(movement);
                }
            }

            let signed_sum: Decimal = movements.iter().map(|m| m.value()).sum();
            prop_assert_eq!(
                account.current_balance(),
                account.opening_balance() + signed_sum
            );

            for pair in movements.windows(2) {
                prop_assert_eq!(pair[0].balance_after(), pair[1].balance_before());
            }
            if let Some(last) = movements.last() {
                prop_assert_eq!(last.balance_after(), account.current_balance());
            }
        }
    }
}
