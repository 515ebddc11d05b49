use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

enum Outcome {
    Success,
    Rejected,
    Failed,
}

#[derive(Clone)]
enum Target {
    Get { name: &'static str, url: String },
    CreateBooking { name: &'static str, url: String, room_ids: Arc<Vec<String>> },
}

impl Target {
    fn name(&self) -> &'static str {
        match self {
            Target::Get { name, .. } | Target::CreateBooking { name, .. } => name,
        }
    }

    fn url(&self) -> &str {
        match self {
            Target::Get { url, .. } | Target::CreateBooking { url, .. } => url,
        }
    }
}

/// Random stay far enough ahead that "today" never interferes, so most
/// rejections are genuine overlaps.
fn random_booking_body(room_ids: &[String]) -> Value {
    let mut rng = rand::thread_rng();
    let room_id = &room_ids[rng.gen_range(0..room_ids.len())];
    let check_in = Utc::now().date_naive() + ChronoDuration::days(rng.gen_range(365..3650));
    let check_out = check_in + ChronoDuration::days(rng.gen_range(1..8));

    json!({
        "guest_details": {
            "first_name": "Bench",
            "last_name": "Guest",
            "email": format!("bench-{}@example.com", Uuid::new_v4()),
        },
        "room_id": room_id,
        "check_in_date": check_in.format("%Y-%m-%d").to_string(),
        "check_out_date": check_out.format("%Y-%m-%d").to_string(),
        "adults": 2,
    })
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Loading rooms...".yellow());
    let room_ids = fetch_room_ids(&client, &base_url).await;
    if room_ids.is_empty() {
        eprintln!("{}", "❌ No available rooms. Seed the database first.".red().bold());
        return;
    }
    println!("{}", format!("✅ {} bookable rooms found.", room_ids.len()).green());

    let probe_in: NaiveDate = Utc::now().date_naive() + ChronoDuration::days(30);
    let probe_out = probe_in + ChronoDuration::days(3);

    let targets = vec![
        Target::Get {
            name: "Health Check",
            url: format!("{}/health", base_url),
        },
        Target::Get {
            name: "Room Search (date filter)",
            url: format!(
                "{}/rooms?check_in={}&check_out={}&guests=2",
                base_url, probe_in, probe_out
            ),
        },
        Target::CreateBooking {
            name: "Create Booking (contended writes)",
            url: format!("{}/bookings", base_url),
            room_ids: Arc::new(room_ids),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(74));
        println!("Benchmarking Endpoint: {}", target.name().cyan().bold());
        println!("URL: {}", target.url());
        println!("{}", "=".repeat(74));

        println!("{:<10} | {:<15} | {:<15} | {:<12} | {:<10}", "RPS", "Mean (ms)", "P99 (ms)", "Success", "Rejected");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<12}-+-{:-<10}", "", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn fetch_room_ids(client: &Client, base_url: &str) -> Vec<String> {
    let res = client.get(format!("{}/rooms", base_url))
        .send()
        .await
        .expect("Failed to list rooms");

    if !res.status().is_success() {
        panic!("Failed to list rooms: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse rooms response");
    body.as_array()
        .map(|rooms| {
            rooms.iter()
                .filter_map(|r| r["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let target = target.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match &target {
                    Target::Get { url, .. } => client.get(url).send().await,
                    Target::CreateBooking { url, room_ids, .. } => {
                        client.post(url).json(&random_booking_body(room_ids)).send().await
                    }
                };
                let latency = req_start.elapsed();

                let outcome = match res {
                    Ok(r) if r.status().is_success() => Outcome::Success,
                    Ok(r) if r.status() == StatusCode::BAD_REQUEST => Outcome::Rejected,
                    _ => Outcome::Failed,
                };

                let _ = tx.send((latency, outcome)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut rejected = 0;
    let mut total = 0;

    while let Some((latency, outcome)) = rx.recv().await {
        total += 1;
        match outcome {
            Outcome::Success => successes += 1,
            Outcome::Rejected => rejected += 1,
            Outcome::Failed => {}
        }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let pct = |n: u64| if total > 0 { (n as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<11.1}% | {:<9.1}%",
        rps,
        mean_ms,
        p99_ms,
        pct(successes),
        pct(rejected)
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
