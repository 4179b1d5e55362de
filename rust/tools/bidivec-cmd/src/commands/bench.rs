//! Bench command implementation

use std::collections::VecDeque;
use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{Result, ensure};
use bidivec::BidiVec;
use bidivec_heap::BinaryHeap;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Workload {
    /// Append `count` elements at the back
    PushBack,
    /// Prepend `count` elements at the front
    PushFront,
    /// Insert `count` elements at the middle position
    InsertMiddle,
    /// Push at the back and pop at the front with a fixed window
    Queue,
    /// Push `count` random values into a max-heap and pop them all
    Heap,
}

const QUEUE_WINDOW: usize = 64;

#[derive(Serialize)]
struct BenchResult {
    workload: Workload,
    container: &'static str,
    count: usize,
    rounds: usize,
    min_ns: u128,
    mean_ns: u128,
    ns_per_op: f64,
}

type Runner = fn(&[u64]) -> u64;

pub fn run(workload: Workload, count: usize, rounds: usize, seed: u64, json: bool) -> Result<()> {
    ensure!(count > 0, "--count must be positive");
    ensure!(rounds > 0, "--rounds must be positive");
    if workload == Workload::InsertMiddle && count > 200_000 {
        tracing::warn!(count, "insert-middle is quadratic, this may take a while");
    }

    let mut rng = fastrand::Rng::with_seed(seed);
    let input: Vec<u64> = (0..count).map(|_| rng.u64(..)).collect();

    let mut results = Vec::new();
    for (container, runner) in runners(workload) {
        tracing::info!(?workload, container, count, rounds, "running");
        let timings = time_rounds(runner, &input, rounds);
        let min = timings.iter().min().copied().unwrap_or_default();
        let total: Duration = timings.iter().sum();
        let mean = total / rounds as u32;
        results.push(BenchResult {
            workload,
            container,
            count,
            rounds,
            min_ns: min.as_nanos(),
            mean_ns: mean.as_nanos(),
            ns_per_op: min.as_nanos() as f64 / count as f64,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }
    Ok(())
}

fn time_rounds(runner: Runner, input: &[u64], rounds: usize) -> Vec<Duration> {
    (0..rounds)
        .map(|_| {
            let start = Instant::now();
            black_box(runner(black_box(input)));
            start.elapsed()
        })
        .collect()
}

fn print_table(results: &[BenchResult]) {
    println!(
        "{:<14} {:<10} {:>10} {:>14} {:>14} {:>10}",
        "workload", "container", "count", "min (ns)", "mean (ns)", "ns/op"
    );
    for r in results {
        let workload = r.workload.to_possible_value().map(|v| v.get_name().to_string());
        println!(
            "{:<14} {:<10} {:>10} {:>14} {:>14} {:>10.2}",
            workload.unwrap_or_default(),
            r.container,
            r.count,
            r.min_ns,
            r.mean_ns,
            r.ns_per_op
        );
    }
}

fn runners(workload: Workload) -> Vec<(&'static str, Runner)> {
    match workload {
        Workload::PushBack => vec![
            ("bidivec", push_back_bidivec as Runner),
            ("vec", push_back_vec as Runner),
            ("vec_deque", push_back_deque as Runner),
        ],
        Workload::PushFront => vec![
            ("bidivec", push_front_bidivec as Runner),
            ("vec_deque", push_front_deque as Runner),
        ],
        Workload::InsertMiddle => vec![
            ("bidivec", insert_middle_bidivec as Runner),
            ("vec", insert_middle_vec as Runner),
            ("vec_deque", insert_middle_deque as Runner),
        ],
        Workload::Queue => vec![
            ("bidivec", queue_bidivec as Runner),
            ("vec_deque", queue_deque as Runner),
        ],
        Workload::Heap => vec![
            ("bidivec", heap_bidivec as Runner),
            ("vec", heap_vec as Runner),
            ("std", heap_std as Runner),
        ],
    }
}

fn push_back_bidivec(input: &[u64]) -> u64 {
    let mut v = BidiVec::new();
    for &x in input {
        v.push_back(x);
    }
    v.back().copied().unwrap_or_default()
}

fn push_back_vec(input: &[u64]) -> u64 {
    let mut v = Vec::new();
    for &x in input {
        v.push(x);
    }
    v.last().copied().unwrap_or_default()
}

fn push_back_deque(input: &[u64]) -> u64 {
    let mut v = VecDeque::new();
    for &x in input {
        v.push_back(x);
    }
    v.back().copied().unwrap_or_default()
}

fn push_front_bidivec(input: &[u64]) -> u64 {
    let mut v = BidiVec::new();
    for &x in input {
        v.push_front(x);
    }
    v.front().copied().unwrap_or_default()
}

fn push_front_deque(input: &[u64]) -> u64 {
    let mut v = VecDeque::new();
    for &x in input {
        v.push_front(x);
    }
    v.front().copied().unwrap_or_default()
}

fn insert_middle_bidivec(input: &[u64]) -> u64 {
    let mut v = BidiVec::new();
    for &x in input {
        v.insert(v.len() / 2, x);
    }
    v.get(v.len() / 2).copied().unwrap_or_default()
}

fn insert_middle_vec(input: &[u64]) -> u64 {
    let mut v = Vec::new();
    for &x in input {
        v.insert(v.len() / 2, x);
    }
    v.get(v.len() / 2).copied().unwrap_or_default()
}

fn insert_middle_deque(input: &[u64]) -> u64 {
    let mut v = VecDeque::new();
    for &x in input {
        v.insert(v.len() / 2, x);
    }
    v.get(v.len() / 2).copied().unwrap_or_default()
}

fn queue_bidivec(input: &[u64]) -> u64 {
    let mut v = BidiVec::new();
    let mut sum = 0u64;
    for &x in input {
        v.push_back(x);
        if v.len() > QUEUE_WINDOW {
            sum = sum.wrapping_add(v.pop_front().unwrap_or_default());
        }
    }
    sum
}

fn queue_deque(input: &[u64]) -> u64 {
    let mut v = VecDeque::new();
    let mut sum = 0u64;
    for &x in input {
        v.push_back(x);
        if v.len() > QUEUE_WINDOW {
            sum = sum.wrapping_add(v.pop_front().unwrap_or_default());
        }
    }
    sum
}

fn heap_bidivec(input: &[u64]) -> u64 {
    let mut heap = BinaryHeap::<u64, BidiVec<u64>>::new();
    heap.extend(input.iter().copied());
    let mut last = 0;
    while let Some(x) = heap.pop() {
        last = x;
    }
    last
}

fn heap_vec(input: &[u64]) -> u64 {
    let mut heap = BinaryHeap::<u64, Vec<u64>>::new();
    heap.extend(input.iter().copied());
    let mut last = 0;
    while let Some(x) = heap.pop() {
        last = x;
    }
    last
}

fn heap_std(input: &[u64]) -> u64 {
    let mut heap = std::collections::BinaryHeap::new();
    heap.extend(input.iter().copied());
    let mut last = 0;
    while let Some(x) = heap.pop() {
        last = x;
    }
    last
}
