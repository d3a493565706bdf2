//! Point-in-time statement generation (read-only).

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use corebank_core::{AccountNumber, CustomerId, LedgerError, LedgerResult};
use corebank_identity::{CustomerDirectory, CustomerProfile, IdentityError};
use corebank_infra::{AccountStore, MovementStore, StoreError};
use corebank_ledger::{Account, AccountType, Movement, MovementKind};

/// One movement line in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLine {
    #[serde(rename = "fecha")]
    pub occurred_at: DateTime<Utc>,
    #[serde(rename = "tipoMovimiento")]
    pub kind: MovementKind,
    #[serde(rename = "valor")]
    pub value: Decimal,
    #[serde(rename = "saldo")]
    pub balance: Decimal,
}

/// Per-account section of a statement.
///
/// `saldoInicial`/`saldoActual` are echoed as stored: the live balance
/// reflects every committed movement, including ones outside the requested
/// window, and is never recomputed from the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatement {
    #[serde(rename = "numeroCuenta")]
    pub account_number: AccountNumber,
    #[serde(rename = "tipoCuenta")]
    pub account_type: AccountType,
    #[serde(rename = "saldoInicial")]
    pub opening_balance: Decimal,
    #[serde(rename = "saldoActual")]
    pub current_balance: Decimal,
    #[serde(rename = "estado")]
    pub active: bool,
    #[serde(rename = "totalDepositos")]
    pub total_deposits: Decimal,
    #[serde(rename = "totalRetiros")]
    pub total_withdrawals: Decimal,
    #[serde(rename = "totalMovimientos")]
    pub movement_count: u32,
    #[serde(rename = "movimientos")]
    pub movements: Vec<MovementLine>,
}

/// Aggregated report of balances and movement totals over a date range.
///
/// Field names are the wire format consumed by existing clients; keep them
/// stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementReport {
    #[serde(rename = "clienteId")]
    pub customer_id: CustomerId,
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "identificacion")]
    pub identification: String,
    #[serde(rename = "fechaInicio")]
    pub from: NaiveDate,
    #[serde(rename = "fechaFin")]
    pub to: NaiveDate,
    #[serde(rename = "fechaGeneracion")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "cuentas")]
    pub accounts: Vec<AccountStatement>,
    #[serde(rename = "saldoTotalGeneral")]
    pub total_balance: Decimal,
    #[serde(rename = "totalCuentas")]
    pub account_count: u32,
}

/// Read-only statement aggregation over the account and movement stores.
///
/// Never mutates state; runs fully concurrently with writes.
#[derive(Debug)]
pub struct StatementGenerator<S, D> {
    store: S,
    directory: D,
}

impl<S, D> StatementGenerator<S, D>
where
    S: AccountStore + MovementStore,
    D: CustomerDirectory,
{
    pub fn new(store: S, directory: D) -> Self {
        Self { store, directory }
    }

    /// Statement over every active account of a customer.
    ///
    /// The window covers `[from start-of-day, to end-of-day]` in the civil
    /// calendar of `tz`, which is threaded explicitly: date boundaries never
    /// depend on process-global timezone state. A customer without accounts
    /// yields an empty statement, not an error.
    pub fn generate_for_customer<Tz: TimeZone>(
        &self,
        customer_id: &CustomerId,
        from: NaiveDate,
        to: NaiveDate,
        tz: &Tz,
    ) -> LedgerResult<StatementReport> {
        debug!(%customer_id, %from, %to, "generating customer statement");

        let (start, end) = window_bounds(from, to, tz)?;
        let profile = self.resolve_customer(customer_id)?;

        let accounts: Vec<Account> = self
            .store
            .find_accounts_by_owner(customer_id)
            .map_err(map_read_error)?
            .into_iter()
            .filter(Account::is_active)
            .collect();

        let numbers: Vec<AccountNumber> = accounts
            .iter()
            .map(|a| a.account_number().clone())
            .collect();
        let movements = if numbers.is_empty() {
            Vec::new()
        } else {
            self.store
                .find_movements_in_range(&numbers, start, end)
                .map_err(map_read_error)?
        };

        let report = assemble(customer_id.clone(), profile, from, to, &accounts, &movements);
        info!(
            %customer_id,
            total_accounts = report.account_count,
            total_balance = %report.total_balance,
            "statement generated"
        );
        Ok(report)
    }

    /// Statement restricted to a single account; the owning customer is
    /// resolved for the report header.
    pub fn generate_for_account<Tz: TimeZone>(
        &self,
        account_number: &AccountNumber,
        from: NaiveDate,
        to: NaiveDate,
        tz: &Tz,
    ) -> LedgerResult<StatementReport> {
        debug!(%account_number, %from, %to, "generating account statement");

        let (start, end) = window_bounds(from, to, tz)?;

        let account = self
            .store
            .find_account(account_number)
            .map_err(map_read_error)?
            .ok_or_else(|| LedgerError::not_found(format!("account {account_number}")))?;

        let profile = self.resolve_customer(account.owner_customer_id())?;

        let movements = self
            .store
            .find_movements_in_range(std::slice::from_ref(account_number), start, end)
            .map_err(map_read_error)?;

        let accounts = [account];
        let report = assemble(
            accounts[0].owner_customer_id().clone(),
            profile,
            from,
            to,
            &accounts,
            &movements,
        );
        Ok(report)
    }

    fn resolve_customer(&self, customer_id: &CustomerId) -> LedgerResult<CustomerProfile> {
        match self.directory.resolve(customer_id) {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => Err(LedgerError::UnknownOrInactiveCustomer(customer_id.clone())),
            Err(IdentityError::Unavailable(msg)) => Err(LedgerError::dependency_unavailable(
                format!("customer directory: {msg}"),
            )),
        }
    }
}

fn map_read_error(err: StoreError) -> LedgerError {
    LedgerError::dependency_unavailable(format!("ledger store: {err}"))
}

fn assemble(
    customer_id: CustomerId,
    profile: CustomerProfile,
    from: NaiveDate,
    to: NaiveDate,
    accounts: &[Account],
    movements: &[Movement],
) -> StatementReport {
    let mut sections = Vec::with_capacity(accounts.len());
    let mut total_balance = Decimal::ZERO;

    for account in accounts {
        let in_window = movements
            .iter()
            .filter(|m| m.account_number() == account.account_number());
        sections.push(account_section(account, in_window));
        total_balance += account.current_balance();
    }

    StatementReport {
        customer_id,
        customer_name: profile.display_name,
        identification: profile.identification_number,
        from,
        to,
        generated_at: Utc::now(),
        account_count: accounts.len() as u32,
        accounts: sections,
        total_balance,
    }
}

fn account_section<'a>(
    account: &Account,
    movements: impl Iterator<Item = &'a Movement>,
) -> AccountStatement {
    let mut total_deposits = Decimal::ZERO;
    let mut total_withdrawals = Decimal::ZERO;
    let mut lines = Vec::new();

    for movement in movements {
        if movement.value() > Decimal::ZERO {
            total_deposits += movement.value();
        } else {
            total_withdrawals += movement.value().abs();
        }

        lines.push(MovementLine {
            occurred_at: movement.occurred_at(),
            kind: movement.kind(),
            value: movement.value(),
            balance: movement.balance_after(),
        });
    }

    AccountStatement {
        account_number: account.account_number().clone(),
        account_type: account.account_type(),
        opening_balance: account.opening_balance(),
        current_balance: account.current_balance(),
        active: account.is_active(),
        total_deposits,
        total_withdrawals,
        movement_count: lines.len() as u32,
        movements: lines,
    }
}

/// Inclusive UTC bounds of `[from start-of-day, to end-of-day]` in `tz`.
fn window_bounds<Tz: TimeZone>(
    from: NaiveDate,
    to: NaiveDate,
    tz: &Tz,
) -> LedgerResult<(DateTime<Utc>, DateTime<Utc>)> {
    if from > to {
        return Err(LedgerError::IllegalDateRange { from, to });
    }

    let start = tz
        .from_local_datetime(&from.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| {
            LedgerError::validation(format!("start of day {from} does not exist in this timezone"))
        })?;

    let end_local = to
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .ok_or_else(|| LedgerError::validation(format!("end of day {to} is not representable")))?;
    let end = tz.from_local_datetime(&end_local).latest().ok_or_else(|| {
        LedgerError::validation(format!("end of day {to} does not exist in this timezone"))
    })?;

    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}
