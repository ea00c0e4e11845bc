pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod engine;
pub mod srs;
pub mod store;

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod flow_tests {
    //! Full submit flow against a file-backed database: serve, verify,
    //! classify, record, enqueue retry, update rule progress.

    use chrono::{Duration, Utc};

    use crate::db;
    use crate::domain::{GrammarModule, Payload};
    use crate::engine::{self, Placement, Submission};
    use crate::store::TemplateStore;
    use crate::testing::TestEnv;

    #[test]
    fn test_failed_attempt_flows_into_retry_and_srs() {
        let env = TestEnv::new().unwrap();
        let conn = &env.conn;
        let store = TemplateStore::seeded();

        db::get_or_create_user(conn, "learner").unwrap();

        let template = store.get("a2_dass_01").unwrap();
        let exercise = engine::materialize(template).unwrap();
        db::mark_sentence_shown(conn, "learner", &template.id).unwrap();

        // Submit with the verb in the wrong place
        let mut placements: Vec<Placement> = exercise
            .slots
            .iter()
            .map(|s| Placement { slot_index: s.index, word: s.word.clone() })
            .collect();
        let verb_slot = exercise.answer_positions[0];
        placements[verb_slot].word = placements[2].word.clone();

        let feedback = engine::check(template, &Submission::Placements(placements.clone())).unwrap();
        assert!(!feedback.overall_correct);
        assert!(!feedback.errors.is_empty());

        // Persist the attempt with its classified errors
        let positions_json = serde_json::to_string(&placements).unwrap();
        let errors_json = serde_json::to_string(&feedback.errors).unwrap();
        db::record_attempt(
            conn,
            &db::NewAttempt {
                user_token: "learner",
                template_id: &template.id,
                positions_json: &positions_json,
                correct: false,
                errors_json: Some(&errors_json),
                module: template.module,
                kind: template.kind(),
            },
        )
        .unwrap();

        let error = &feedback.errors[0];
        let error_id =
            db::log_error(conn, "learner", &template.id, error.category, Some(&error.detail))
                .unwrap();

        let today = Utc::now().date_naive();
        let retry_id =
            db::schedule_retry(conn, "learner", &template.id, Some(error_id), today).unwrap();

        // Not due today, due after the fixed 2-day delay
        assert!(db::get_due_retry(conn, "learner", today).unwrap().is_none());
        let due = db::get_due_retry(conn, "learner", today + Duration::days(2))
            .unwrap()
            .unwrap();
        assert_eq!(due.id, retry_id);
        assert_eq!(due.template_id, template.id);
        assert_eq!(due.source_error_id, Some(error_id));

        // Rule progress initialized by the wrong first attempt
        let rule_id = match &template.payload {
            Payload::Reconstruction { clause_type, .. } => clause_type.clone(),
            _ => panic!("expected reconstruction seed"),
        };
        let progress =
            db::update_rule_progress(conn, "learner", template.module, &rule_id, false).unwrap();
        assert_eq!(progress.times_tested, 1);
        assert_eq!(progress.times_correct, 0);
        assert!((progress.interval_days - 1.0).abs() < f64::EPSILON);

        // The learner retries successfully two days later
        db::complete_retry(conn, retry_id).unwrap();
        assert!(db::get_due_retry(conn, "learner", today + Duration::days(2))
            .unwrap()
            .is_none());

        let progress =
            db::update_rule_progress(conn, "learner", template.module, &rule_id, true).unwrap();
        assert_eq!(progress.times_tested, 2);
        assert!(progress.interval_days > 1.0);

        let summary = db::get_user_summary(conn, "learner").unwrap();
        assert_eq!(summary.total_attempts, 1);
        assert_eq!(summary.pending_retries, 0);

        // The served sentence is excluded from the unseen pool
        let shown = db::get_shown_template_ids(conn, "learner").unwrap();
        assert!(shown.contains("a2_dass_01"));
        for _ in 0..20 {
            let next = store.random_unseen(Some(1), &shown).unwrap();
            if next.level == 1 {
                assert_ne!(next.id, "a2_dass_01");
            }
        }
    }

    #[test]
    fn test_module_mismatch_does_not_cross_users() {
        let env = TestEnv::new().unwrap();
        let conn = &env.conn;
        let store = TemplateStore::seeded();

        db::get_or_create_user(conn, "a").unwrap();
        db::get_or_create_user(conn, "b").unwrap();

        let template = store.get("praep_001").unwrap();
        let mut answers = std::collections::HashMap::new();
        answers.insert("gap_1".to_string(), "auf dem".to_string());

        let feedback = engine::check(template, &Submission::Answers(answers)).unwrap();
        assert!(!feedback.overall_correct);

        let error = &feedback.errors[0];
        db::log_error(conn, "a", &template.id, error.category, Some(&error.detail)).unwrap();
        db::update_rule_progress(conn, "a", GrammarModule::Praepositionen, &template.topic, false)
            .unwrap();

        assert!(db::get_error_stats(conn, "b").unwrap().is_empty());
        assert!(db::get_rule_progress(conn, "b", &template.topic).unwrap().is_none());
    }
}
