use iota_lib::{
    config::Config, context::reports::Report, context::Context, io::files::KnowledgeBase,
    structures::formula::Formula,
};

fn kb_with_concept(concept: &str) -> KnowledgeBase {
    KnowledgeBase {
        concept: vec![concept.to_string()],
        ..Default::default()
    }
}

fn solved(kb: KnowledgeBase) -> (Report, Context) {
    let mut ctx = Context::from_kb(&kb, Config::default()).expect("buildable input");
    let report = ctx.solve();
    (report, ctx)
}

mod propositional {
    use super::*;

    #[test]
    fn empty_input_is_satisfiable() {
        let (report, _) = solved(KnowledgeBase::new());
        assert_eq!(report, Report::Satisfiable);
    }

    #[test]
    fn contradiction() {
        let (report, ctx) = solved(kb_with_concept("A & ~A"));
        assert_eq!(report, Report::Unsatisfiable);
        assert_eq!(ctx.verdict(), (false, Some(false), 1, 2));
    }

    #[test]
    fn plain_conjunction() {
        let (report, ctx) = solved(kb_with_concept("A & B"));
        assert_eq!(report, Report::Satisfiable);
        let ip = ctx.interpretation();
        let w0 = ip.world_with_name("w0").unwrap();
        assert!(ip.world(w0).contains(&Formula::atom("A")));
        assert!(ip.world(w0).contains(&Formula::atom("B")));
    }

    #[test]
    fn negated_conjunction_explores_both_disjuncts() {
        // the left disjunct clashes, the right saturates
        let (report, ctx) = solved(kb_with_concept("A & ~(A & B)"));
        assert_eq!(report, Report::Satisfiable);
        assert!(ctx.counters().closed_branches >= 1);
        let ip = ctx.interpretation();
        let w0 = ip.world_with_name("w0").unwrap();
        assert!(ip
            .world(w0)
            .contains(&Formula::negation(Formula::atom("B"))));
    }

    #[test]
    fn double_negation() {
        let (report, ctx) = solved(kb_with_concept("~~A & ~A"));
        assert_eq!(report, Report::Unsatisfiable);
        assert!(ctx.counters().closed_branches >= 1);
    }
}

mod roles {
    use super::*;

    #[test]
    fn an_existential_restriction_is_witnessed() {
        let (report, ctx) = solved(kb_with_concept("Ǝ r A"));
        assert_eq!(report, Report::Satisfiable);
        let ip = ctx.interpretation();
        assert_eq!(ip.world_count(), 2);
        let w0 = ip.world_with_name("w0").unwrap();
        let witness = ip.related_worlds(w0, "r")[0];
        assert!(ip.world(witness).contains(&Formula::atom("A")));
    }

    #[test]
    fn terminology_reaches_the_witness() {
        let kb = KnowledgeBase {
            concept: vec!["Ǝ r A".to_string()],
            tbox: vec!["A -> B".to_string()],
            ..Default::default()
        };
        let (report, ctx) = solved(kb);
        assert_eq!(report, Report::Satisfiable);

        let ip = ctx.interpretation();
        let satisfier = ip.worlds().find(|&w| {
            ip.world(w).contains(&Formula::atom("A")) && ip.world(w).contains(&Formula::atom("B"))
        });
        assert!(satisfier.is_some());
    }

    #[test]
    fn conflicting_restrictions() {
        let (report, ctx) = solved(kb_with_concept("Ǝ r A & ~Ǝ r A"));
        assert_eq!(report, Report::Unsatisfiable);
        assert!(ctx.counters().closed_branches >= 1);
    }

    #[test]
    fn an_asserted_successor_is_reused() {
        let mut kb = KnowledgeBase::new();
        kb.abox.insert("w1".to_string(), vec!["Ǝ r A".to_string()]);
        kb.abox.insert("w2".to_string(), vec!["A".to_string()]);
        kb.rbox
            .insert("r".to_string(), vec![("w1".to_string(), "w2".to_string())]);

        let (report, ctx) = solved(kb);
        assert_eq!(report, Report::Satisfiable);
        assert_eq!(ctx.interpretation().world_count(), 2);
    }

    #[test]
    fn universals_propagate_to_asserted_successors() {
        let mut kb = KnowledgeBase::new();
        kb.abox
            .insert("w1".to_string(), vec!["~Ǝ r A".to_string()]);
        kb.abox.insert("w2".to_string(), vec!["A".to_string()]);
        kb.rbox
            .insert("r".to_string(), vec![("w1".to_string(), "w2".to_string())]);

        let (report, _) = solved(kb);
        assert_eq!(report, Report::Unsatisfiable);
    }
}

mod limits {
    use super::*;

    #[test]
    fn a_spent_clock_reports_unknown() {
        let config = Config {
            time_limit: std::time::Duration::ZERO,
            ..Config::default()
        };
        let mut ctx = Context::from_kb(&kb_with_concept("A & B"), config).unwrap();
        let report = ctx.solve();
        assert_eq!(report, Report::Unknown);
        assert!(ctx.timed_out());
        assert_eq!(ctx.verdict().1, None);
    }
}
