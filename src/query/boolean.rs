use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::scorer::{ConjunctionClause, ConjunctionScorer, DisjunctionSumScorer, ReqExclScorer, ReqOptSumScorer};
use crate::core::{Query, ScoreMode, Scorer, ScorerSupplier, Weight};
use crate::index::SegmentReader;
use crate::reader::IndexSearcher;
use crate::{Result, SearchError};

/// How a clause takes part in a [`BooleanQuery`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// Must match, contributes to the score.
    Must,
    /// Optional, contributes to the score when it matches. A query without
    /// `Must` or `Filter` clauses needs at least one `Should` match.
    Should,
    /// Must match, does not contribute to the score.
    Filter,
    /// Must not match.
    MustNot,
}

impl Occur {
    fn is_required(self) -> bool {
        matches!(self, Occur::Must | Occur::Filter)
    }

    fn is_scoring(self) -> bool {
        matches!(self, Occur::Must | Occur::Should)
    }
}

#[derive(Debug, Default)]
pub struct BooleanQuery {
    clauses: Vec<(Occur, Box<dyn Query>)>,
}

impl BooleanQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, occur: Occur, query: Box<dyn Query>) -> Self {
        self.clauses.push((occur, query));
        self
    }

    pub fn must(self, query: Box<dyn Query>) -> Self {
        self.add(Occur::Must, query)
    }

    pub fn should(self, query: Box<dyn Query>) -> Self {
        self.add(Occur::Should, query)
    }

    pub fn filter(self, query: Box<dyn Query>) -> Self {
        self.add(Occur::Filter, query)
    }

    pub fn must_not(self, query: Box<dyn Query>) -> Self {
        self.add(Occur::MustNot, query)
    }

    pub fn clauses(&self) -> &[(Occur, Box<dyn Query>)] {
        &self.clauses
    }
}

impl Query for BooleanQuery {
    fn create_weight(&self, searcher: &IndexSearcher, score_mode: ScoreMode, boost: f32) -> Result<Box<dyn Weight>> {
        let mut clauses = Vec::with_capacity(self.clauses.len());
        for (occur, query) in &self.clauses {
            let weight = if occur.is_scoring() {
                searcher.create_weight(query.as_ref(), score_mode, boost)?
            } else {
                searcher.create_weight(query.as_ref(), score_mode.without_scores(), 1.0)?
            };
            clauses.push((*occur, weight));
        }
        Ok(Box::new(BooleanWeight { score_mode, clauses }))
    }
}

#[derive(Debug)]
struct BooleanWeight {
    score_mode: ScoreMode,
    clauses: Vec<(Occur, Box<dyn Weight>)>,
}

type Suppliers<'a> = SmallVec<[Box<dyn ScorerSupplier<'a> + 'a>; 4]>;

impl Weight for BooleanWeight {
    fn score_mode(&self) -> ScoreMode {
        self.score_mode
    }

    fn scorer_supplier<'a>(&'a self, segment: &'a SegmentReader) -> Result<Option<Box<dyn ScorerSupplier<'a> + 'a>>> {
        let mut required: SmallVec<[RequiredSupplier<'a>; 4]> = SmallVec::new();
        let mut optional: Suppliers<'a> = SmallVec::new();
        let mut prohibited: Suppliers<'a> = SmallVec::new();
        for (occur, weight) in &self.clauses {
            let supplier = match weight.scorer_supplier(segment)? {
                Some(supplier) => supplier,
                None if occur.is_required() => return Ok(None),
                None => continue,
            };
            match occur {
                Occur::Must | Occur::Filter => required.push(RequiredSupplier {
                    supplier,
                    scoring: *occur == Occur::Must && self.score_mode.needs_scores(),
                }),
                Occur::Should => optional.push(supplier),
                Occur::MustNot => prohibited.push(supplier),
            }
        }
        if !required.is_empty() && !self.score_mode.needs_scores() {
            // optional clauses cannot change the matches, only scores
            optional.clear();
        }
        if required.is_empty() && optional.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(BooleanScorerSupplier { weight: self, required, optional, prohibited })))
    }

    fn is_cacheable(&self, segment: &SegmentReader) -> bool {
        self.clauses.iter().all(|(_, weight)| weight.is_cacheable(segment))
    }
}

struct RequiredSupplier<'a> {
    supplier: Box<dyn ScorerSupplier<'a> + 'a>,
    scoring: bool,
}

struct BooleanScorerSupplier<'a> {
    weight: &'a BooleanWeight,
    required: SmallVec<[RequiredSupplier<'a>; 4]>,
    optional: Suppliers<'a>,
    prohibited: Suppliers<'a>,
}

impl<'a> BooleanScorerSupplier<'a> {
    fn required_scorer(&mut self, lead_cost: u64) -> Result<Option<Box<dyn Scorer + 'a>>> {
        if self.required.is_empty() {
            return Ok(None);
        }
        let score_mode = self.weight.score_mode;
        self.required.sort_by_key(|clause| clause.supplier.cost());
        let mut clauses = Vec::with_capacity(self.required.len());
        for RequiredSupplier { supplier, scoring } in self.required.drain(..) {
            clauses.push(ConjunctionClause { scorer: supplier.get(lead_cost)?, scoring });
        }
        if clauses.len() == 1 && (clauses[0].scoring || !score_mode.needs_scores()) {
            return Ok(clauses.pop().map(|clause| clause.scorer));
        }
        Ok(Some(Box::new(ConjunctionScorer::new(self.weight, score_mode, clauses)?)))
    }

    fn union(
        weight: &'a BooleanWeight,
        score_mode: ScoreMode,
        suppliers: Suppliers<'a>,
        lead_cost: u64,
    ) -> Result<Option<Box<dyn Scorer + 'a>>> {
        let mut scorers = Vec::with_capacity(suppliers.len());
        for supplier in suppliers {
            scorers.push(supplier.get(lead_cost)?);
        }
        Ok(match scorers.len() {
            0 => None,
            1 => scorers.pop(),
            _ => Some(Box::new(DisjunctionSumScorer::new(weight, score_mode, scorers))),
        })
    }
}

impl<'a> ScorerSupplier<'a> for BooleanScorerSupplier<'a> {
    fn cost(&self) -> u64 {
        match self.required.iter().map(|clause| clause.supplier.cost()).min() {
            Some(cost) => cost,
            None => self.optional.iter().map(|supplier| supplier.cost()).fold(0, u64::saturating_add),
        }
    }

    fn get(mut self: Box<Self>, lead_cost: u64) -> Result<Box<dyn Scorer + 'a>> {
        let lead_cost = lead_cost.min(self.cost());
        let weight = self.weight;
        let score_mode = weight.score_mode;

        let required = self.required_scorer(lead_cost)?;
        let optional_lead_cost = required.as_ref().map_or(lead_cost, |scorer| scorer.cost());
        let optional = Self::union(weight, score_mode, std::mem::take(&mut self.optional), optional_lead_cost)?;
        let positive: Box<dyn Scorer + 'a> = match (required, optional) {
            (Some(required), Some(optional)) => Box::new(ReqOptSumScorer::new(weight, required, optional)),
            (Some(required), None) => required,
            (None, Some(optional)) => optional,
            (None, None) => {
                return Err(SearchError::InternalError("boolean supplier without positive clauses".to_string()))
            }
        };

        let prohibited = std::mem::take(&mut self.prohibited);
        match Self::union(weight, score_mode.without_scores(), prohibited, positive.cost())? {
            Some(excluded) => Ok(Box::new(ReqExclScorer::new(weight, positive, excluded))),
            None => Ok(positive),
        }
    }
}
