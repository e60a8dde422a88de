use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vc_check::{probe_collections, ContractChecker};
use vc_core::{CopyMode, SampleSet};
use vc_fixtures::{Decimal, PhoneNumber};

fn phone_samples() -> SampleSet<PhoneNumber> {
    let mut samples = SampleSet::new();
    for line in 0..48 {
        let number = PhoneNumber::new(707, 867, line % 24).expect("valid number");
        samples.push(number, vc_core::GroupId::from_raw((line % 24) as u32));
    }
    samples
}

fn decimal_samples() -> SampleSet<Decimal> {
    let mut samples = SampleSet::new();
    for (group, unscaled) in (0..32i64).enumerate() {
        let scale = 1 + (unscaled % 2) as u32;
        let decimal = Decimal::new(unscaled * 10, scale).expect("valid decimal");
        samples.push(decimal, vc_core::GroupId::from_raw(group as u32));
    }
    samples
}

fn bench_check(c: &mut Criterion) {
    let phones = phone_samples();
    let phone_contract = PhoneNumber::contract();
    let decimals = decimal_samples();
    let decimal_contract = Decimal::contract();

    c.bench_function("check_phone_numbers", |b| {
        b.iter(|| {
            let report = ContractChecker::new(&phone_contract)
                .run_with_duplicates(black_box(&phones), &[CopyMode::Deep])
                .expect("report");
            black_box(report.analysis_hash);
        })
    });
    c.bench_function("check_decimals", |b| {
        b.iter(|| {
            let report = ContractChecker::new(&decimal_contract)
                .run(black_box(&decimals))
                .expect("report");
            black_box(report.findings.len());
        })
    });
    c.bench_function("probe_decimals", |b| {
        b.iter(|| probe_collections(&decimal_contract, black_box(&decimals)).expect("probe"))
    });
}

criterion_group!(benches, bench_check);
criterion_main!(benches);
