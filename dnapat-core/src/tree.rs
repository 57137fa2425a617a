use crate::pattern::PatternRecord;
use std::cmp::Ordering;

/// Ordering key used to place records in the tree: ascending frequency,
/// and within equal frequency descending sequence. A reverse in-order
/// walk over this key yields descending frequency with an ascending
/// sequence tie-break, which is the order every ranked view uses.
fn rank_key(a: &PatternRecord, b: &PatternRecord) -> Ordering {
    a.frequency()
        .cmp(&b.frequency())
        .then_with(|| b.sequence().cmp(a.sequence()))
}

#[derive(Debug, Clone)]
struct Node {
    record: PatternRecord,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree over pattern records, ordered by frequency with
/// higher frequencies toward the right.
///
/// Arena-indexed: nodes live in a `Vec` and link by index. The tree is
/// rebuilt from scratch after every scan pass and never patched
/// incrementally, so node frequencies are final by the time they are
/// placed.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl FrequencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless a record with the same sequence is
    /// already present, in which case this is a no-op.
    ///
    /// The duplicate check walks the whole arena comparing sequences
    /// only. It must stay independent of the ordering key: frequencies
    /// on the shared records drift between tree builds, so a
    /// comparator-driven descent could walk past an existing node whose
    /// rank has shifted since placement.
    pub fn insert(&mut self, record: PatternRecord) {
        if self
            .nodes
            .iter()
            .any(|n| n.record.sequence() == record.sequence())
        {
            return;
        }

        let new_idx = self.nodes.len();
        match self.root {
            None => {
                self.nodes.push(Node {
                    record,
                    left: None,
                    right: None,
                });
                self.root = Some(new_idx);
            }
            Some(mut cur) => {
                loop {
                    // Exact key ties are unreachable past the duplicate
                    // check; if one occurred it would route left.
                    let go_right = rank_key(&record, &self.nodes[cur].record) == Ordering::Greater;
                    let slot = if go_right {
                        self.nodes[cur].right
                    } else {
                        self.nodes[cur].left
                    };
                    match slot {
                        Some(next) => cur = next,
                        None => {
                            self.nodes.push(Node {
                                record,
                                left: None,
                                right: None,
                            });
                            if go_right {
                                self.nodes[cur].right = Some(new_idx);
                            } else {
                                self.nodes[cur].left = Some(new_idx);
                            }
                            break;
                        }
                    }
                }
            }
        }
    }

    /// All records, highest frequency first (ascending sequence within
    /// equal frequency), via a reverse in-order walk.
    pub fn ordered_descending(&self) -> Vec<&PatternRecord> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk_desc(self.root, &mut out);
        out
    }

    fn walk_desc<'a>(&'a self, idx: Option<usize>, out: &mut Vec<&'a PatternRecord>) {
        if let Some(i) = idx {
            self.walk_desc(self.nodes[i].right, out);
            out.push(&self.nodes[i].record);
            self.walk_desc(self.nodes[i].left, out);
        }
    }

    /// Rightmost node: the most frequent record.
    pub fn max_frequency_record(&self) -> Option<&PatternRecord> {
        let mut cur = self.root?;
        while let Some(right) = self.nodes[cur].right {
            cur = right;
        }
        Some(&self.nodes[cur].record)
    }

    /// Leftmost node: the least frequent record.
    pub fn min_frequency_record(&self) -> Option<&PatternRecord> {
        let mut cur = self.root?;
        while let Some(left) = self.nodes[cur].left {
            cur = left;
        }
        Some(&self.nodes[cur].record)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
