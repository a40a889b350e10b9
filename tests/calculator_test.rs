use cloud_cost::calculator::{calculate, CalcInput, CalculationResult, Throughput, USD_TO_EUR};
use cloud_cost::rates::RateTable;

fn run(tokens: f64, throughput: u32) -> CalculationResult {
    let input = CalcInput {
        tokens,
        throughput: Throughput::new(throughput).expect("valid throughput"),
    };
    calculate(&input, &RateTable::builtin())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_default_workload() {
    let result = run(200_000_000.0, 50);
    assert!(close(result.total_hours, 1111.11));

    let aws = result.get("AWS").unwrap();
    assert!(close(aws.compute_cost, 531.84));
    assert!(close(aws.total_cost, 538.19));

    let google = result.get("Google Cloud").unwrap();
    assert!(close(google.total_cost, 501.32));

    let azure = result.get("Azure").unwrap();
    assert!(close(azure.total_cost, 531.28));

    assert_eq!(result.cheapest().unwrap().provider_name, "Google Cloud");
}

#[test]
fn test_small_workload_keeps_flat_costs() {
    let result = run(1_000.0, 50);
    let aws = result.get("AWS").unwrap();
    let expected_compute = 1_000.0 / 50.0 / 3600.0 * 0.526 * USD_TO_EUR;
    assert!((aws.compute_cost - expected_compute).abs() < 1e-9);
    assert!(close(aws.storage_cost, 2.15));
    assert!(close(aws.network_cost, 4.20));
}

#[test]
fn test_totals_are_sums() {
    for tokens in [0.0, 1.0, 12_345.0, 5e8, 3e9] {
        for b in run(tokens, 35).iter() {
            let sum = b.compute_cost + b.storage_cost + b.network_cost;
            assert!((b.total_cost - sum).abs() < 1e-9, "{}", b.provider_name);
        }
    }
}

#[test]
fn test_cost_grows_with_tokens() {
    let workloads = [0.0, 1e3, 1e6, 1e8, 1e9, 1e10];
    let results: Vec<_> = workloads.iter().map(|&t| run(t, 50)).collect();
    for pair in results.windows(2) {
        assert!(pair[1].total_hours > pair[0].total_hours);
        for (lo, hi) in pair[0].iter().zip(pair[1].iter()) {
            assert!(hi.total_cost > lo.total_cost);
        }
    }
}

#[test]
fn test_faster_throughput_is_cheaper() {
    let mut previous: Option<CalculationResult> = None;
    for rate in (Throughput::MIN..=Throughput::MAX).step_by(Throughput::STEP as usize) {
        let current = run(2e8, rate);
        if let Some(prev) = &previous {
            assert!(current.total_hours < prev.total_hours);
            for (slow, fast) in prev.iter().zip(current.iter()) {
                assert!(fast.compute_cost < slow.compute_cost);
            }
        }
        previous = Some(current);
    }
}

#[test]
fn test_custom_rate_table() {
    let table = RateTable::from_toml(
        r##"
[[providers]]
name = "Local"
compute = 1.0
storage = 0.0
network = 0.0
color = "#336699"
"##,
    )
    .unwrap();
    let input = CalcInput {
        tokens: 180_000.0,
        throughput: Throughput::DEFAULT,
    };
    let result = calculate(&input, &table);
    assert_eq!(result.breakdowns.len(), 1);
    // 180,000 tokens at 50/s is one hour
    assert!((result.total_hours - 1.0).abs() < 1e-12);
    assert!((result.breakdowns[0].total_cost - USD_TO_EUR).abs() < 1e-12);
}

#[test]
fn test_result_serializes_to_json() {
    let result = run(200_000_000.0, 50);
    let value: serde_json::Value = serde_json::to_value(&result).unwrap();
    let breakdowns = value["breakdowns"].as_array().unwrap();
    assert_eq!(breakdowns.len(), 3);
    assert_eq!(breakdowns[0]["provider_name"], "AWS");
    assert_eq!(value["throughput"], 50);
}
