use serde::{Deserialize, Serialize};

/// Execution intent negotiated once per top-level search and threaded down,
/// unchanged, to every weight and scorer of the query tree.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Every match is visited and scored.
    Complete,
    /// Every match is visited, scores are not computed.
    CompleteNoScores,
    /// Scorers may skip non-competitive hits via
    /// [`Scorer::set_min_competitive_score`](crate::Scorer::set_min_competitive_score).
    TopScores,
    /// Top documents by some other criterion, scores are not computed.
    TopDocs,
    /// Top documents by some other criterion with a secondary sort on score.
    TopDocsWithScores,
}

impl ScoreMode {
    pub const ALL: [ScoreMode; 5] = [
        ScoreMode::Complete,
        ScoreMode::CompleteNoScores,
        ScoreMode::TopScores,
        ScoreMode::TopDocs,
        ScoreMode::TopDocsWithScores,
    ];

    /// Whether scorers built under this mode must compute scores.
    pub fn needs_scores(self) -> bool {
        match self {
            ScoreMode::Complete | ScoreMode::TopScores | ScoreMode::TopDocsWithScores => true,
            ScoreMode::CompleteNoScores | ScoreMode::TopDocs => false,
        }
    }

    /// Whether every matching document must be visited. Pruning is only
    /// permitted when this is `false`.
    pub fn is_exhaustive(self) -> bool {
        match self {
            ScoreMode::Complete | ScoreMode::CompleteNoScores => true,
            ScoreMode::TopScores | ScoreMode::TopDocs | ScoreMode::TopDocsWithScores => false,
        }
    }

    /// Whether a scorer built under this mode accepts a competitive threshold.
    pub fn allows_pruning(self) -> bool {
        self.needs_scores() && !self.is_exhaustive()
    }

    /// Mode used for clauses that only filter (must-not, filter clauses and
    /// the inner query of a constant-score wrapper).
    pub fn without_scores(self) -> ScoreMode {
        if self.is_exhaustive() {
            ScoreMode::CompleteNoScores
        } else {
            ScoreMode::TopDocs
        }
    }
}
