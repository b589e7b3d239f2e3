#![allow(dead_code)]

use std::collections::VecDeque;

use sirnet_core::{RngHandle, Sampler};
use sirnet_graph::ContactNetwork;

/// Replays a fixed list of seeds and exponential draws, ignoring rates.
pub struct ScriptedSampler {
    seeds: Vec<usize>,
    draws: VecDeque<f64>,
}

impl ScriptedSampler {
    pub fn new(seeds: &[usize], draws: &[f64]) -> Self {
        Self {
            seeds: seeds.to_vec(),
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl Sampler for ScriptedSampler {
    fn sample_exponential(&mut self, _rate: f64) -> f64 {
        self.draws.pop_front().expect("draw script exhausted")
    }

    fn sample_without_replacement(&mut self, _population: usize, amount: usize) -> Vec<usize> {
        self.seeds.iter().copied().take(amount).collect()
    }
}

/// Wraps a seeded handle and remembers every value it hands out.
pub struct RecordingSampler {
    inner: RngHandle,
    pub seeds: Vec<usize>,
    pub draws: Vec<f64>,
}

impl RecordingSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: RngHandle::from_seed(seed),
            seeds: Vec::new(),
            draws: Vec::new(),
        }
    }

    pub fn replay(&self) -> ScriptedSampler {
        ScriptedSampler::new(&self.seeds, &self.draws)
    }
}

impl Sampler for RecordingSampler {
    fn sample_exponential(&mut self, rate: f64) -> f64 {
        let draw = self.inner.sample_exponential(rate);
        self.draws.push(draw);
        draw
    }

    fn sample_without_replacement(&mut self, population: usize, amount: usize) -> Vec<usize> {
        let picked = self.inner.sample_without_replacement(population, amount);
        self.seeds.extend(picked.iter().copied());
        picked
    }
}

pub fn path(nodes: usize) -> ContactNetwork {
    let edges: Vec<_> = (1..nodes).map(|node| (node - 1, node)).collect();
    ContactNetwork::from_edges(nodes, &edges).unwrap()
}

pub fn ring(nodes: usize) -> ContactNetwork {
    let edges: Vec<_> = (0..nodes).map(|node| (node, (node + 1) % nodes)).collect();
    ContactNetwork::from_edges(nodes, &edges).unwrap()
}
