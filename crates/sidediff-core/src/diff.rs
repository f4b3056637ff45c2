//! Character-level diff engine feeding the pane builder

use crate::pane::{build_panes, DiffOp, Operation, SideBySide};
use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};
use std::time::Duration;

/// Diff algorithm used for the character diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// The diff engine
#[derive(Debug, Clone)]
pub struct DiffEngine {
    algorithm: DiffAlgorithm,
    timeout: Option<Duration>,
    semantic_cleanup: bool,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self {
            algorithm: DiffAlgorithm::Myers,
            timeout: None,
            semantic_cleanup: true,
        }
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Give up on an optimal diff after `timeout`; the result stays valid
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_semantic_cleanup(mut self, enabled: bool) -> Self {
        self.semantic_cleanup = enabled;
        self
    }

    pub fn algorithm(&self) -> DiffAlgorithm {
        self.algorithm
    }

    /// Diff two strings into maximal runs of equal/insert/delete text
    pub fn diff_strings(&self, old: &str, new: &str) -> Vec<DiffOp> {
        let mut config = TextDiff::configure();
        config.algorithm(self.algorithm.into());
        if let Some(timeout) = self.timeout {
            config.timeout(timeout);
        }
        let diff = config.diff_chars(old, new);

        let raw: Vec<DiffOp> = diff
            .iter_all_changes()
            .map(|change| {
                let operation = match change.tag() {
                    ChangeTag::Equal => Operation::Equal,
                    ChangeTag::Insert => Operation::Insert,
                    ChangeTag::Delete => Operation::Delete,
                };
                DiffOp::new(operation, change.value())
            })
            .collect();
        let raw_len = raw.len();

        let ops = if self.semantic_cleanup {
            cleanup_semantic(raw)
        } else {
            merge(raw, false)
        };
        tracing::trace!(
            algorithm = ?self.algorithm,
            changes = raw_len,
            operations = ops.len(),
            "computed character diff"
        );
        ops
    }

    /// Diff two strings and build the aligned panes
    pub fn compare(&self, old: &str, new: &str) -> SideBySide {
        let ops = self.diff_strings(old, new);
        build_panes(ops.iter().map(|op| (op.operation, op.text.as_str())))
    }
}

/// Dissolve short equalities that sit between larger edits, then merge.
///
/// An equality is dissolved when its length is no greater than the larger
/// edit on each side of it. Its text becomes a delete plus an insert, which
/// reads as one replaced phrase instead of a scatter of single characters.
///
/// Runs in one forward pass. Live equalities sit on a stack with the edit
/// weight seen before them; dissolving the top folds its edits into the
/// current run so the one below is re-checked without rescanning.
pub fn cleanup_semantic(ops: Vec<DiffOp>) -> Vec<DiffOp> {
    let ops = merge(ops, false);
    let lens: Vec<usize> = ops.iter().map(|op| op.text.chars().count()).collect();
    let mut dissolved = vec![false; ops.len()];
    let mut equalities: Vec<(usize, EditRun)> = Vec::new();
    let mut run = EditRun::default();

    for (idx, op) in ops.iter().enumerate() {
        match op.operation {
            Operation::Equal => {
                equalities.push((idx, run));
                run = EditRun::default();
                continue;
            }
            Operation::Insert => run.inserted += lens[idx],
            Operation::Delete => run.deleted += lens[idx],
        }
        while let Some(&(eq, before)) = equalities.last() {
            let len = lens[eq];
            if len > before.weight() || len > run.weight() {
                break;
            }
            dissolved[eq] = true;
            equalities.pop();
            run = EditRun {
                inserted: before.inserted + len + run.inserted,
                deleted: before.deleted + len + run.deleted,
            };
        }
    }

    let mut out = Vec::with_capacity(ops.len());
    for (op, dissolved) in ops.into_iter().zip(dissolved) {
        if dissolved {
            out.push(DiffOp::delete(op.text.clone()));
            out.push(DiffOp::insert(op.text));
        } else {
            out.push(op);
        }
    }
    merge(out, true)
}

/// Characters inserted and deleted since the last live equality
#[derive(Debug, Clone, Copy, Default)]
struct EditRun {
    inserted: usize,
    deleted: usize,
}

impl EditRun {
    fn weight(self) -> usize {
        self.inserted.max(self.deleted)
    }
}

/// Coalesce adjacent operations of the same kind, order every edit run as
/// delete then insert, and drop empty operations. With `factor_affixes`,
/// text shared at the start or end of a delete/insert pair moves into the
/// neighbouring equalities.
fn merge(ops: Vec<DiffOp>, factor_affixes: bool) -> Vec<DiffOp> {
    let mut out: Vec<DiffOp> = Vec::with_capacity(ops.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    for op in ops {
        match op.operation {
            Operation::Delete => deleted.push_str(&op.text),
            Operation::Insert => inserted.push_str(&op.text),
            Operation::Equal => {
                let suffix = flush_edits(&mut out, &mut deleted, &mut inserted, factor_affixes);
                push_equal(&mut out, &suffix);
                push_equal(&mut out, &op.text);
            }
        }
    }
    let suffix = flush_edits(&mut out, &mut deleted, &mut inserted, factor_affixes);
    push_equal(&mut out, &suffix);
    out
}

/// Emit the pending edit run; returns the common suffix to prepend to the
/// next equality
fn flush_edits(
    out: &mut Vec<DiffOp>,
    deleted: &mut String,
    inserted: &mut String,
    factor_affixes: bool,
) -> String {
    let mut suffix = String::new();
    if factor_affixes && !deleted.is_empty() && !inserted.is_empty() {
        let prefix_len = common_prefix_len(deleted, inserted);
        if prefix_len > 0 {
            push_equal(out, &deleted[..prefix_len]);
            deleted.drain(..prefix_len);
            inserted.drain(..prefix_len);
        }
        let suffix_len = common_suffix_len(deleted, inserted);
        if suffix_len > 0 {
            suffix = deleted.split_off(deleted.len() - suffix_len);
            inserted.truncate(inserted.len() - suffix_len);
        }
    }
    if !deleted.is_empty() {
        out.push(DiffOp::delete(std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        out.push(DiffOp::insert(std::mem::take(inserted)));
    }
    suffix
}

fn push_equal(out: &mut Vec<DiffOp>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.operation == Operation::Equal => last.text.push_str(text),
        _ => out.push(DiffOp::equal(text)),
    }
}

/// Byte length of the shared prefix, always on a char boundary
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
