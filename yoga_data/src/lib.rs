pub mod model;
pub mod result;
pub mod profile;

#[cfg(test)]
mod tests {
    use super::model::*;
    use super::profile::BestScores;
    use super::result::*;

    #[test]
    fn test_best_scores_serialize_as_plain_array() {
        let best = BestScores::new([5, 7, 0]);
        let json = serde_json::to_string(&best).expect("Failed to serialize best scores");
        assert_eq!(json, "[5,7,0]");

        let restored: BestScores = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(restored, best);
    }

    #[test]
    fn test_best_scores_reject_wrong_length() {
        assert!(serde_json::from_str::<BestScores>("[1,2]").is_err());
        assert!(serde_json::from_str::<BestScores>("[1,2,3,4]").is_err());
    }

    #[test]
    fn test_merge_keeps_per_slot_maximum() {
        let mut best = BestScores::new([5, 0, 0]);
        let improved = best.merge(&ScoreVector::new([3, 7, 0]));
        assert!(improved);
        assert_eq!(best, BestScores::new([5, 7, 0]));

        let improved = best.merge(&ScoreVector::new([1, 1, 0]));
        assert!(!improved);
        assert_eq!(best, BestScores::new([5, 7, 0]));
    }

    #[test]
    fn test_score_vector_increment_and_reset() {
        let pose = PoseClass::new(1).unwrap();
        let mut scores = ScoreVector::default();
        assert!(scores.is_zero());
        assert_eq!(scores.increment(pose), 1);
        assert_eq!(scores.increment(pose), 2);
        assert_eq!(scores.get(pose), 2);
        assert_eq!(scores.to_string(), "[0,2,0]");

        scores.reset();
        assert!(scores.is_zero());
    }

    #[test]
    fn test_pose_class_range() {
        assert!(PoseClass::new(POSE_COUNT - 1).is_some());
        assert!(PoseClass::new(POSE_COUNT).is_none());
        assert!(serde_json::from_str::<PoseClass>("3").is_err());
        assert_eq!(serde_json::from_str::<PoseClass>("2").unwrap().index(), 2);
    }

    #[test]
    fn test_summary_improved() {
        let summary = SessionSummary {
            pose: PoseClass::default(),
            reason: EndReason::Stopped,
            scores: ScoreVector::new([3, 0, 0]),
            best_before: BestScores::new([5, 0, 0]),
            best_after: BestScores::new([5, 0, 0]),
        };
        assert!(!summary.improved());
        assert_eq!(summary.reason.to_string(), "stopped");
    }
}
