// Route selector - ranks candidate routes by efficiency
// Keeps the best route and a bounded list of alternatives while the
// optimizer streams candidates in enumeration order
//
// Numan Thabit 2025 Nov

/// A feasible route before it is materialized: legs are indices into the
/// sorted catalog with the amount taken from each
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub legs: Vec<(usize, f64)>,
    pub total_cost: f64,
    pub average_price: f64,
    pub efficiency: f64,
    pub savings: f64,
}

/// Efficiency gap below which two candidates count as tied
pub const EFFICIENCY_TOLERANCE: f64 = 1e-9;

/// Route selection result
#[derive(Debug)]
pub struct RouteSelection {
    pub plan: Candidate,
    pub alternatives: Vec<Candidate>,
    /// Feasible candidates seen, duplicates included
    pub feasible: usize,
}

/// Streaming top-N ranking.
///
/// Order is efficiency descending. Ties, including gaps within
/// [`EFFICIENCY_TOLERANCE`], keep arrival order, so the
/// enumeration sequence is the tie-break: the result equals a stable sort of
/// every candidate truncated to `1 + max_alternatives`. A candidate whose legs
/// equal an already ranked one is skipped, which happens when a larger subset
/// fills the target before reaching its extra members.
#[derive(Debug)]
pub struct RouteSelector {
    capacity: usize,
    ranked: Vec<Candidate>,
    feasible: usize,
}

impl RouteSelector {
    pub fn new(max_alternatives: usize) -> Self {
        let capacity = max_alternatives.saturating_add(1);
        Self {
            capacity,
            ranked: Vec::with_capacity(capacity.min(64)),
            feasible: 0,
        }
    }

    pub fn offer(&mut self, candidate: Candidate) {
        self.feasible += 1;

        if self.ranked.iter().any(|r| r.legs == candidate.legs) {
            return;
        }
        // first slot holding a clearly worse route
        let pos = self
            .ranked
            .iter()
            .position(|r| candidate.efficiency - r.efficiency > EFFICIENCY_TOLERANCE)
            .unwrap_or(self.ranked.len());
        if pos >= self.capacity {
            return;
        }
        self.ranked.insert(pos, candidate);
        self.ranked.truncate(self.capacity);
    }

    /// `None` when no feasible candidate was offered
    pub fn finish(self) -> Option<RouteSelection> {
        let mut ranked = self.ranked.into_iter();
        let plan = ranked.next()?;
        Some(RouteSelection {
            plan,
            alternatives: ranked.collect(),
            feasible: self.feasible,
        })
    }
}
