//! Execution results.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Measurement outcome frequencies.
///
/// Keys are bitstrings with classical bit 0 as the rightmost character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    inner: BTreeMap<String, u64>,
}

impl Counts {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.inner.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.inner.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.inner.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(bitstring, count)` in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The outcome seen most often; ties go to the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .fold(None, |best: Option<(&str, u64)>, (k, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
    }

    /// Relative frequency of each outcome.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total();
        if total == 0 {
            return BTreeMap::new();
        }
        self.inner
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Format a state / counts / probability table.
    pub fn to_table(&self) -> String {
        let total = self.total().max(1) as f64;
        let mut out = String::new();
        let _ = writeln!(out, "{:<10} | {:<10} | {:<12}", "State", "Counts", "Probability");
        let _ = writeln!(out, "{}", "-".repeat(38));
        for (state, count) in self.iter() {
            let _ = writeln!(out, "{state:<10} | {count:<10} | {:<12.4}", count as f64 / total);
        }
        let _ = writeln!(out, "{}", "-".repeat(38));
        out
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of a sampled execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome frequencies.
    pub counts: Counts,
    /// Shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

/// Full amplitude vector of a coherent state.
///
/// Basis index `i` has qubit `q` in state `(i >> q) & 1`, so qubit 0 is the
/// least significant bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatevectorResult {
    num_qubits: u32,
    amplitudes: Vec<Complex64>,
}

impl StatevectorResult {
    /// Wrap an amplitude vector; its length must be `2^num_qubits`.
    pub fn new(num_qubits: u32, amplitudes: Vec<Complex64>) -> Option<Self> {
        (amplitudes.len() == 1usize << num_qubits).then_some(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// All amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Basis label of `index`, qubit 0 rightmost.
    pub fn basis_label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits as usize)
    }

    /// State fidelity |<self|other>|^2, or `None` if sizes differ.
    pub fn fidelity(&self, other: &StatevectorResult) -> Option<f64> {
        if self.num_qubits != other.num_qubits {
            return None;
        }
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        Some(overlap.norm_sqr())
    }
}
