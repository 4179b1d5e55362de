//! Trace command implementation

use std::collections::VecDeque;

use anyhow::{Context, Result, ensure};
use bidivec::BidiVec;

#[derive(Debug, Clone, Copy)]
enum Op {
    PushBack(u64),
    PushFront(u64),
    PopBack,
    PopFront,
    Insert(usize, u64),
    Remove(usize),
    Clear,
}

#[derive(Debug, Default)]
struct TraceStats {
    reallocations: usize,
    max_len: usize,
    max_capacity: usize,
}

pub fn run(ops: usize, seed: u64) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut v = BidiVec::new();
    let mut model = VecDeque::new();
    let mut stats = TraceStats::default();

    for step in 0..ops {
        let op = next_op(&mut rng, model.len(), step as u64);
        let capacity = v.capacity();
        apply(&mut v, &mut model, op).with_context(|| format!("step {step}: {op:?}"))?;

        if v.capacity() != capacity {
            stats.reallocations += 1;
            tracing::debug!(
                step,
                len = v.len(),
                capacity = v.capacity(),
                front_slack = v.front_slack(),
                back_slack = v.back_slack(),
                "reallocated"
            );
        }
        stats.max_len = stats.max_len.max(v.len());
        stats.max_capacity = stats.max_capacity.max(v.capacity());
    }

    tracing::info!(ops, seed, ?stats, "trace matched reference deque");
    println!(
        "ops={ops} len={} capacity={} front_slack={} back_slack={} reallocations={} max_len={} max_capacity={}",
        v.len(),
        v.capacity(),
        v.front_slack(),
        v.back_slack(),
        stats.reallocations,
        stats.max_len,
        stats.max_capacity
    );
    Ok(())
}

fn next_op(rng: &mut fastrand::Rng, len: usize, value: u64) -> Op {
    match rng.u32(0..100) {
        0..25 => Op::PushBack(value),
        25..50 => Op::PushFront(value),
        50..60 => Op::PopBack,
        60..70 => Op::PopFront,
        70..85 => Op::Insert(rng.usize(0..=len), value),
        85..99 if len > 0 => Op::Remove(rng.usize(0..len)),
        85..99 => Op::PushBack(value),
        _ => Op::Clear,
    }
}

fn apply(v: &mut BidiVec<u64>, model: &mut VecDeque<u64>, op: Op) -> Result<()> {
    match op {
        Op::PushBack(x) => {
            v.try_push_back(x)?;
            model.push_back(x);
        }
        Op::PushFront(x) => {
            v.try_push_front(x)?;
            model.push_front(x);
        }
        Op::PopBack => ensure!(v.pop_back() == model.pop_back(), "pop_back mismatch"),
        Op::PopFront => ensure!(v.pop_front() == model.pop_front(), "pop_front mismatch"),
        Op::Insert(index, x) => {
            v.try_insert(index, x)?;
            model.insert(index, x);
        }
        Op::Remove(index) => {
            let removed = v.try_remove(index)?;
            ensure!(Some(removed) == model.remove(index), "remove mismatch");
        }
        Op::Clear => {
            v.clear();
            model.clear();
        }
    }

    ensure!(v.len() == model.len(), "length {} != {}", v.len(), model.len());
    ensure!(
        v.len() + v.front_slack() + v.back_slack() == v.capacity(),
        "slack does not add up to capacity"
    );
    ensure!(v.iter().eq(model.iter()), "contents diverged");
    Ok(())
}
