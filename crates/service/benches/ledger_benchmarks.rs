use std::sync::Arc;

use chrono::{Duration, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;

use corebank_core::CustomerId;
use corebank_events::InMemoryTransport;
use corebank_identity::InMemoryCustomerDirectory;
use corebank_infra::InMemoryLedgerStore;
use corebank_ledger::{AccountEvent, AccountType, MovementKind};
use corebank_service::{LedgerService, StatementGenerator};

type Service = LedgerService<
    Arc<InMemoryLedgerStore>,
    Arc<InMemoryCustomerDirectory>,
    Arc<InMemoryTransport<AccountEvent>>,
>;

fn setup() -> (
    Service,
    StatementGenerator<Arc<InMemoryLedgerStore>, Arc<InMemoryCustomerDirectory>>,
    CustomerId,
) {
    let store = Arc::new(InMemoryLedgerStore::new());
    let directory = Arc::new(InMemoryCustomerDirectory::new());
    let customer: CustomerId = "CLI-0A1B2C3D".parse().unwrap();
    directory.insert_active(customer.clone());

    let service = LedgerService::new(
        store.clone(),
        directory.clone(),
        Arc::new(InMemoryTransport::new()),
    );
    let generator = StatementGenerator::new(store, directory);
    (service, generator, customer)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn bench_post_movement(c: &mut Criterion) {
    let (service, _, customer) = setup();
    let account = service
        .create_account(customer, AccountType::Checking, dec("0.00"))
        .unwrap();
    let number = account.account_number().clone();

    c.bench_function("post_movement/deposit", |b| {
        b.iter(|| {
            service
                .post_movement(&number, MovementKind::Deposit, dec("1.00"), None)
                .unwrap()
        })
    });
}

fn bench_statement_generation(c: &mut Criterion) {
    let (service, generator, customer) = setup();
    let account = service
        .create_account(customer.clone(), AccountType::Savings, dec("0.00"))
        .unwrap();
    for _ in 0..1_000 {
        service
            .post_movement(account.account_number(), MovementKind::Deposit, dec("1.00"), None)
            .unwrap();
    }

    let today = Utc::now().date_naive();
    let from = today - Duration::days(1);
    let to = today + Duration::days(1);

    c.bench_function("statement/customer_1k_movements", |b| {
        b.iter(|| {
            generator
                .generate_for_customer(&customer, from, to, &Utc)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_post_movement, bench_statement_generation);
criterion_main!(benches);
