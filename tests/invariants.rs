mod common;

use std::collections::BTreeMap;

use polis_sim::model::AgentStatus;
use polis_sim::{LawStatus, ResearchStatus};

#[test]
fn thousand_tick_run_holds_every_invariant() {
    let mut engine = common::engine(42, 50);
    let config = engine.config().clone();
    let mut law_status: BTreeMap<u64, LawStatus> = BTreeMap::new();
    let mut deceased: Vec<u64> = Vec::new();
    let mut agent_count = engine.world().agents.len();
    let mut births = 0;

    for expected in 1..=1_000u64 {
        let delta = engine.tick();

        assert_eq!(delta.tick(), expected);

        // Population
        assert!(delta.population.active <= config.max_population as usize);
        assert!(delta.agents.len() >= agent_count, "agents are append-only");
        agent_count = delta.agents.len();
        for (i, agent) in delta.agents.iter().enumerate() {
            assert_eq!(agent.id, i as u64 + 1);
            if agent.status == AgentStatus::Deceased {
                assert!(agent.died_at.is_some());
            }
        }
        for id in &deceased {
            assert_eq!(delta.agents[*id as usize - 1].status, AgentStatus::Deceased);
        }
        deceased.extend(&delta.removed_agent_ids);
        births += delta.new_agents.len();

        // Laws
        for law in &delta.laws {
            if law.is_constitutional {
                assert_eq!(law.status, LawStatus::Active);
                assert_eq!(law.history.len(), 1);
            }
            if let Some(previous) = law_status.insert(law.id, law.status) {
                assert!(previous <= law.status, "law {} moved backwards", law.id);
            }
            if law.status == LawStatus::Repealed {
                assert_eq!(law.history.len(), 2, "repeal comes straight from ACTIVE");
            }
        }

        // Bounded collections
        assert!(delta.logs.len() <= config.log_capacity);
        assert!(delta.economy.market_events.len() <= config.market_event_capacity);
        assert!(delta.population.history.len() <= config.history_capacity);
        assert!(delta.economy.history.len() <= config.history_capacity);
        assert!(engine.snapshots().len() <= config.snapshot_capacity);

        // Scores
        let clock = &delta.clock;
        assert!((0.0..=1.0).contains(&clock.stability_index));
        assert!((0.5..=1.0).contains(&clock.ethical_integrity));
        assert!((0.0..=1.0).contains(&delta.economy.inequality_index));
        assert!(delta.economy.taxation_level <= 0.3 + 1e-12);
        assert!(delta.economy.currency_supply >= config.min_currency_supply);
        assert!(delta.economy.resource_distribution.values().all(|v| *v >= 0.0));

        // Research
        assert!(delta.research.count(ResearchStatus::InProgress) <= 1);
        for node in &delta.research.nodes {
            assert!((0.0..=1.0).contains(&node.progress));
        }
    }

    assert!(agent_count >= 50);
    assert!(births > 0);
    assert!(engine.world().population.total_births > 0);
    assert_eq!(engine.snapshots().len(), 100);
}

#[test]
fn new_logs_are_exactly_this_ticks_entries() {
    let mut engine = common::engine(5, 50);
    for _ in 0..200 {
        let delta = engine.tick();
        for log in &delta.new_logs {
            assert_eq!(log.tick, delta.tick());
        }
        let in_full = delta.logs.iter().filter(|l| l.tick == delta.tick()).count();
        assert_eq!(in_full, delta.new_logs.len());
    }
}

#[test]
fn emitted_deltas_do_not_alias_engine_state() {
    let mut engine = common::engine(9, 20);
    let delta = engine.tick();
    let before = delta.agents[0].money;
    engine.world_mut().agents[0].money = -1.0;
    assert_eq!(delta.agents[0].money, before);
}
