//! Fleet-wide decision statistics.
//!
//! [`DecisionStats`] is one snapshot read in a single statement. The public
//! report types are projections of that snapshot, so `total` and the derived
//! counts can never come from different points in time.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelCounts {
    pub approved: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PairwiseAgreement {
    pub a_b: u64,
    pub a_c: u64,
    pub b_c: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionStats {
    pub total: u64,
    pub model_a: ModelCounts,
    pub model_b: ModelCounts,
    pub model_c: ModelCounts,
    pub all_approved: u64,
    pub all_rejected: u64,
    pub agreement: PairwiseAgreement,
    /// Records where at least one model approved.
    pub approved_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalsReport {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSuccessEntry {
    pub name: String,
    pub approved: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSuccessReport {
    pub model_a: ModelSuccessEntry,
    pub model_b: ModelSuccessEntry,
    pub model_c: ModelSuccessEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelComparisonReport {
    pub all_approved: u64,
    pub all_rejected: u64,
    pub agreement_a_b: u64,
    pub agreement_a_c: u64,
    pub agreement_b_c: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub total: u64,
    pub approved_total: u64,
    pub rejected_total: u64,
}

impl DecisionStats {
    #[must_use]
    pub const fn totals(&self) -> TotalsReport {
        TotalsReport { total: self.total }
    }

    /// Per-model counts labelled with the configured model names (slot order).
    #[must_use]
    pub fn model_success(&self, names: [&str; 3]) -> ModelSuccessReport {
        let entry = |name: &str, counts: ModelCounts| ModelSuccessEntry {
            name: name.to_string(),
            approved: counts.approved,
            rejected: counts.rejected,
        };
        ModelSuccessReport {
            model_a: entry(names[0], self.model_a),
            model_b: entry(names[1], self.model_b),
            model_c: entry(names[2], self.model_c),
        }
    }

    #[must_use]
    pub const fn model_comparison(&self) -> ModelComparisonReport {
        ModelComparisonReport {
            all_approved: self.all_approved,
            all_rejected: self.all_rejected,
            agreement_a_b: self.agreement.a_b,
            agreement_a_c: self.agreement.a_c,
            agreement_b_c: self.agreement.b_c,
        }
    }

    #[must_use]
    pub const fn summary(&self) -> SummaryReport {
        SummaryReport {
            total: self.total,
            approved_total: self.approved_total,
            rejected_total: self.total.saturating_sub(self.approved_total),
        }
    }

    /// Checks the arithmetic relations every snapshot must satisfy.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let models = [self.model_a, self.model_b, self.model_c];
        let min_approved = models.iter().map(|m| m.approved).min().unwrap_or(0);
        let min_rejected = models.iter().map(|m| m.rejected).min().unwrap_or(0);

        models.iter().all(|m| m.approved + m.rejected == self.total)
            && self.all_approved <= min_approved
            && self.all_rejected <= min_rejected
            && self.approved_total >= self.all_approved
            && self.approved_total <= self.total
            && self.approved_total + self.all_rejected == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Verdicts;

    // Reference fold over verdicts, used to cross-check the projections.
    fn fold(records: &[Verdicts]) -> DecisionStats {
        let mut stats = DecisionStats::default();
        for v in records {
            stats.total += 1;
            for (counts, verdict) in [
                (&mut stats.model_a, v.verdict_a),
                (&mut stats.model_b, v.verdict_b),
                (&mut stats.model_c, v.verdict_c),
            ] {
                if verdict {
                    counts.approved += 1;
                } else {
                    counts.rejected += 1;
                }
            }
            stats.all_approved += u64::from(v.all_approved());
            stats.all_rejected += u64::from(v.all_rejected());
            stats.agreement.a_b += u64::from(v.verdict_a == v.verdict_b);
            stats.agreement.a_c += u64::from(v.verdict_a == v.verdict_c);
            stats.agreement.b_c += u64::from(v.verdict_b == v.verdict_c);
            stats.approved_total += u64::from(v.any_approved());
        }
        stats
    }

    #[test]
    fn test_empty_snapshot_is_all_zero_and_consistent() {
        let stats = DecisionStats::default();
        assert!(stats.is_consistent());
        assert_eq!(stats.summary().rejected_total, 0);
        let success = stats.model_success(["a", "b", "c"]);
        assert_eq!(success.model_a.approved, 0);
        assert_eq!(success.model_c.rejected, 0);
    }

    #[test]
    fn test_every_verdict_pattern_is_consistent() {
        let mut records = Vec::new();
        for bits in 0u8..8 {
            records.push(Verdicts::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0));
        }
        let stats = fold(&records);
        assert!(stats.is_consistent());
        assert_eq!(stats.total, 8);
        assert_eq!(stats.all_approved, 1);
        assert_eq!(stats.all_rejected, 1);
        assert_eq!(stats.agreement.a_b, 4);
        assert_eq!(stats.summary().approved_total, 7);
        assert_eq!(stats.summary().rejected_total, 1);
    }

    #[test]
    fn test_agreement_is_not_derived_from_unanimity() {
        // A and B agree on a rejection while C approves.
        let stats = fold(&[Verdicts::new(false, false, true)]);
        assert_eq!(stats.all_approved + stats.all_rejected, 0);
        assert_eq!(stats.agreement.a_b, 1);
        assert_eq!(stats.agreement.a_c, 0);
    }

    #[test]
    fn test_model_success_uses_slot_names() {
        let stats = fold(&[Verdicts::new(true, false, true)]);
        let report = stats.model_success(["random_forest", "gradient_boosting", "xgboost"]);
        assert_eq!(report.model_b.name, "gradient_boosting");
        assert_eq!(report.model_b.rejected, 1);
        assert_eq!(report.model_a.approved, 1);
    }

    #[test]
    fn test_inconsistent_snapshot_is_detected() {
        let mut stats = fold(&[Verdicts::new(true, true, true)]);
        stats.total = 2;
        assert!(!stats.is_consistent());
    }
}
