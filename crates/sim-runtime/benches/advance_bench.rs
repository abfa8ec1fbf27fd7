use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use sim_core::{Product, ProductId, ProductStatus, SimConfig};
use sim_runtime::{GameState, Simulation};

fn bench_advance(c: &mut Criterion) {
    let cfg = SimConfig::default();
    let mut state = GameState::new_game(&cfg.economy).unwrap();
    state.workforce.factory_count = 20;
    state.workforce.employee_count = 5_000;
    state
        .company
        .set_capital(Decimal::new(1_000_000_000, 0), cfg.economy.valuation_multiplier)
        .unwrap();
    for i in 0..50 {
        state
            .products
            .insert(Product {
                id: ProductId(format!("p{i}")),
                name: format!("Product {i}"),
                status: ProductStatus::Active,
                unit_cost: Decimal::new(10, 0),
                selling_price: Decimal::new(25 + i, 0),
                complexity: Decimal::new(20 + i, 0),
                inventory: 0,
                production_level: Decimal::new(60, 0),
                market_demand: Decimal::new(40, 0),
                marketing_spend_per_unit: Decimal::new(3, 0),
            })
            .unwrap();
    }
    let sim = Simulation::new(cfg, state).unwrap();
    c.bench_function("advance_quarter_50_products", |b| {
        b.iter(|| {
            let _ = sim.advance_months(Some(3));
        })
    });
    c.bench_function("advance_ten_years_50_products", |b| {
        b.iter(|| {
            let _ = sim.advance_months(Some(120));
        })
    });
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
