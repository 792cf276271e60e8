//! Property tests for the resend decision and the render chain

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use response_extractor::extract::apply_filter;
use response_extractor::render::{RenderChain, RenderPurpose};
use response_extractor::{decide, StoredResponse, TriggerPolicy};

fn policy_strategy() -> impl Strategy<Value = TriggerPolicy> {
    prop::sample::select(TriggerPolicy::ALL.to_vec())
}

fn purpose_strategy() -> impl Strategy<Value = RenderPurpose> {
    prop::sample::select(vec![
        RenderPurpose::Send,
        RenderPurpose::Preview,
        RenderPurpose::General,
    ])
}

proptest! {
    #[test]
    fn request_in_chain_is_never_executed(
        policy in policy_strategy(),
        purpose in purpose_strategy(),
        others in prop::collection::vec("req_[a-z]{1,4}", 0..5),
        position in 0usize..5,
        max_age in -100.0f64..100.0,
        age_ms in 0i64..1_000_000,
        has_cached in any::<bool>(),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut ids = others;
        ids.insert(position.min(ids.len()), "req_target".to_string());
        let chain: RenderChain = ids.into_iter().collect();
        let cached = StoredResponse::new("req_target", 200)
            .with_created(now - Duration::milliseconds(age_ms));

        let decision = decide(
            "req_target",
            policy,
            max_age,
            has_cached.then_some(&cached),
            &chain,
            purpose,
            now,
        );

        prop_assert!(decision.cycle_detected);
        prop_assert!(!decision.execute);
    }

    #[test]
    fn only_send_renders_execute(
        policy in policy_strategy(),
        purpose in purpose_strategy(),
        max_age in 0.0f64..100.0,
        age_ms in 0i64..200_000,
        has_cached in any::<bool>(),
    ) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cached = StoredResponse::new("req_target", 200)
            .with_created(now - Duration::milliseconds(age_ms));
        let cached = has_cached.then_some(&cached);

        let decision = decide(
            "req_target",
            policy,
            max_age,
            cached,
            &RenderChain::new(),
            purpose,
            now,
        );

        prop_assert_eq!(decision.policy_resend, policy.should_resend(cached, max_age, now));
        prop_assert_eq!(decision.execute, decision.policy_resend && purpose.is_send());
    }

    #[test]
    fn when_expired_is_strictly_greater(max_age_secs in 0i64..10_000, delta_ms in -2_000i64..2_000) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let age_ms = max_age_secs * 1000 + delta_ms;
        let cached = StoredResponse::new("req_target", 200)
            .with_created(now - Duration::milliseconds(age_ms));

        let expired = TriggerPolicy::WhenExpired.should_resend(Some(&cached), max_age_secs as f64, now);
        prop_assert_eq!(expired, delta_ms > 0);
    }

    #[test]
    fn extending_a_chain_copies_it(
        ids in prop::collection::vec("req_[a-z]{1,3}", 0..6),
        next in "req_[a-z]{1,3}",
    ) {
        let chain: RenderChain = ids.into_iter().collect();
        let before = chain.clone();
        let extended = chain.extended(&next);

        prop_assert_eq!(&chain, &before);
        prop_assert!(extended.contains(&next));
        let mut deduped = extended.ids().to_vec();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), extended.len());
    }

    #[test]
    fn single_group_extracts_the_number(prefix in "[a-z ]{0,10}", number in 0u32..1_000_000) {
        let body = format!("{}id={} active", prefix, number);
        prop_assert_eq!(apply_filter(&body, r"id=(\d+)").unwrap(), number.to_string());
    }
}
