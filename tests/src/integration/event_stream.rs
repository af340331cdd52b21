//! # Event Stream Flows
//!
//! Registry events delivered to the in-memory history and to async
//! subscribers over a broadcast channel, with their EVM log rendering.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use chore_escrow::prelude::*;
    use chore_telemetry::log_chore_event;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    type StreamingRegistry = ChoreRegistry<
        Arc<InMemoryTokenDirectory>,
        Arc<ManualClock>,
        (Arc<InMemoryEventLog>, Arc<BroadcastEventSink>),
    >;

    struct Streaming {
        registry: Arc<StreamingRegistry>,
        history: Arc<InMemoryEventLog>,
        stream: Arc<BroadcastEventSink>,
        token: Arc<InMemoryToken>,
    }

    fn streaming_setup() -> Streaming {
        chore_telemetry::init_test_logging();
        let config = RegistryConfig::default();
        let directory = Arc::new(InMemoryTokenDirectory::new());
        let history = Arc::new(InMemoryEventLog::new());
        let stream = Arc::new(BroadcastEventSink::with_capacity(
            config.event_channel_capacity,
        ));

        let token = Arc::new(InMemoryToken::new(TOKEN));
        token.mint(PARENT, U256::from(1_000));
        token.approve(PARENT, config.registry_address, U256::from(1_000));
        directory.register(token.clone());

        let registry = Arc::new(ChoreRegistry::new(
            config,
            directory,
            Arc::new(ManualClock::default()),
            (history.clone(), stream.clone()),
        ));
        Streaming {
            registry,
            history,
            stream,
            token,
        }
    }

    fn run_full_lifecycle(registry: &StreamingRegistry) -> (ChoreId, ChoreId) {
        let approved = registry
            .create_chore(PARENT, "Dishes", "", U256::from(100), TOKEN)
            .unwrap();
        let rejected = registry
            .create_chore(PARENT, "Laundry", "", U256::from(40), TOKEN)
            .unwrap();
        for id in [approved, rejected] {
            registry.accept_chore(CHILD_A, id).unwrap();
            registry.submit_proof(CHILD_A, id, "ipfs://proof").unwrap();
        }
        registry.approve_chore(PARENT, approved).unwrap();
        registry.reject_chore(PARENT, rejected).unwrap();
        log_chore_event!(info, approved, "lifecycle complete", rejected = %rejected);
        (approved, rejected)
    }

    #[tokio::test]
    async fn test_subscriber_sees_every_event_in_order() {
        let env = streaming_setup();
        let mut rx = env.stream.subscribe();

        let registry = env.registry.clone();
        let (approved, rejected) = tokio::task::spawn_blocking(move || run_full_lifecycle(&registry))
            .await
            .unwrap();

        let mut received = Vec::new();
        while received.len() < env.history.len() {
            let next = timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("event within timeout")
                .expect("channel open");
            received.push(next);
        }

        assert_eq!(received, env.history.entries());
        let sequences: Vec<u64> = received.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, (1..=received.len() as u64).collect::<Vec<_>>());

        let names: Vec<&str> = received.iter().map(|e| e.event.name()).collect();
        assert_eq!(
            names,
            vec![
                "ChoreCreated",
                "ChoreCreated",
                "ChoreAccepted",
                "ChoreSubmitted",
                "ChoreAccepted",
                "ChoreSubmitted",
                "ChoreApproved",
                "ChoreRejected",
                "ChoreRefunded",
            ]
        );
        assert_eq!(env.history.events_for(approved).len(), 4);
        assert_eq!(env.history.events_for(rejected).len(), 5);
        assert_eq!(env.stream.delivered(), received.len() as u64);
    }

    #[tokio::test]
    async fn test_failed_calls_emit_nothing() {
        let env = streaming_setup();
        let mut rx = env.stream.subscribe();

        let id = env
            .registry
            .create_chore(PARENT, "Dishes", "", U256::from(100), TOKEN)
            .unwrap();
        assert_eq!(
            env.registry.submit_proof(CHILD_A, id, "early"),
            Err(ChoreError::NotChild)
        );
        assert_eq!(
            env.registry.approve_chore(PARENT, id),
            Err(ChoreError::InvalidStatus)
        );

        let first = rx.recv().await.unwrap();
        assert!(matches!(first.event, ChoreEvent::ChoreCreated { .. }));
        assert!(rx.try_recv().is_err());
        assert_eq!(env.history.len(), 1);
    }

    #[test]
    fn test_logs_decode_to_event_fields() {
        let env = streaming_setup();
        let (approved, _) = run_full_lifecycle(&env.registry);

        let logs = env.history.logs();
        assert_eq!(logs.len(), env.history.len());
        assert!(logs.iter().all(|l| l.address == env.registry.address()));

        let approval = env
            .history
            .entries()
            .into_iter()
            .find(|e| matches!(e.event, ChoreEvent::ChoreApproved { .. }))
            .and_then(|e| e.log)
            .unwrap();

        assert_eq!(approval.topics[0], event_topic(signatures::CHORE_APPROVED));
        assert_eq!(approval.topics[1].as_bytes()[31], approved.get() as u8);
        assert_eq!(&approval.topics[2].as_bytes()[12..], PARENT.as_bytes());
        assert_eq!(&approval.topics[3].as_bytes()[12..], CHILD_A.as_bytes());
        assert_eq!(
            hex::encode(&approval.data),
            format!("{:064x}", 100)
        );
        assert_eq!(env.token.balance_of(CHILD_A), U256::from(100));
    }

    #[test]
    fn test_history_exports_json() {
        let env = streaming_setup();
        run_full_lifecycle(&env.registry);

        let json = env.history.to_json().unwrap();
        let parsed: Vec<EmittedEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, env.history.entries());

        let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(raw[0]["event"]["event"], "ChoreCreated");
    }
}
