use crate::pattern::PatternRecord;

/// Default bucket count, a prime. The table never resizes, so the load
/// factor grows with the number of distinct patterns.
pub const DEFAULT_BUCKETS: usize = 101;

/// Chained hash table keyed by pattern sequence.
///
/// The bucket count is fixed at construction and the polynomial hash
/// below is part of the observable contract: collision counts surface in
/// the collision report, so neither may change.
#[derive(Clone, Debug)]
pub struct HashIndex {
    buckets: Vec<Vec<PatternRecord>>,
    elements: usize,
    collisions: usize,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    pub fn with_buckets(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be non-zero");
        Self {
            buckets: vec![Vec::new(); bucket_count],
            elements: 0,
            collisions: 0,
        }
    }

    /// `h = (h*31 + byte) mod bucket_count`, accumulated left to right.
    fn bucket_of(&self, key: &str) -> usize {
        let m = self.buckets.len();
        let mut h = 0usize;
        for b in key.bytes() {
            h = (h * 31 + b as usize) % m;
        }
        h
    }

    /// Returns the record stored under `key`, creating an empty one if
    /// absent. New records are prepended to their chain (newest first).
    /// The collision counter advances only when a new key lands in an
    /// already occupied bucket.
    pub fn insert_or_get(&mut self, key: &str) -> &mut PatternRecord {
        let idx = self.bucket_of(key);
        let found = self.buckets[idx]
            .iter()
            .position(|r| r.sequence() == key);
        let pos = match found {
            Some(pos) => pos,
            None => {
                if !self.buckets[idx].is_empty() {
                    self.collisions += 1;
                }
                self.buckets[idx].insert(0, PatternRecord::new(key));
                self.elements += 1;
                0
            }
        };
        &mut self.buckets[idx][pos]
    }

    pub fn find(&self, key: &str) -> Option<&PatternRecord> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|r| r.sequence() == key)
    }

    /// All records, bucket order then chain order. Callers must not rely
    /// on this order.
    pub fn records(&self) -> impl Iterator<Item = &PatternRecord> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Per-bucket collision breakdown plus totals. Diagnostic text only.
    pub fn collision_report(&self) -> String {
        let mut report = String::from("Collision report:\n--------\n");
        let mut occupied = 0usize;
        let mut total_collisions = 0usize;

        for (i, chain) in self.buckets.iter().enumerate() {
            if chain.is_empty() {
                continue;
            }
            occupied += 1;
            let in_bucket = chain.len() - 1;
            if in_bucket > 0 {
                report.push_str(&format!("Bucket {i}: {in_bucket} collision(s)\n"));
                total_collisions += in_bucket;
            }
        }

        report.push_str("-----\n");
        report.push_str(&format!("Table size: {}\n", self.buckets.len()));
        report.push_str(&format!("Occupied buckets: {occupied}\n"));
        report.push_str(&format!("Total collisions: {total_collisions}\n"));
        report.push_str(&format!("Total elements: {}\n", self.elements));
        report
    }
}

impl Default for HashIndex {
    fn default() -> Self {
        Self::new()
    }
}
