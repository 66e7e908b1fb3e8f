//! # Integration Test Flows
//!
//! Drives signed requests through `QueryPoolService` the way a node does:
//!
//! 1. **Sequencer → Pool**: requests accepted in chain order after authentication
//! 2. **Pool → Executors**: tracker handles executed on worker threads, out of order
//! 3. **Pool → Block Producer**: ready prefix drained into blocks, in order
//! 4. **Liveness**: stuck executions failed so the prefix can advance

#[cfg(test)]
mod tests {
    use super::super::{executed, service, Client, ManualClock};
    use parking_lot::Mutex;
    use rand::seq::SliceRandom;
    use sc_01_query_pool::{
        PoolConfig, PoolError, QueryBlock, QueryPoolApi, QueryTracker, TimeSource,
        EXECUTION_TIMEOUT,
    };
    use shared_types::{ContentDigest, NodeId, Query, QueryType, ResponsePayload};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use tracing::info;

    const EXECUTOR: NodeId = NodeId([0xE0; 32]);

    // =============================================================================
    // FULL PIPELINE
    // =============================================================================

    #[test]
    fn test_concurrent_execution_commits_in_sequence_order() {
        let config = PoolConfig::default();
        let clock = Arc::new(ManualClock::new(1_000));
        let pool = service(config.clone(), clock.clone());
        let clients: Vec<_> = (1..=4).map(|c| Client::new(&config, "ledger", c)).collect();

        let total = 400u64;
        let (job_tx, job_rx) = mpsc::channel::<(u64, Arc<QueryTracker>)>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let executors: Vec<_> = (0..4)
            .map(|_| {
                let job_rx = Arc::clone(&job_rx);
                let clock = Arc::clone(&clock);
                thread::spawn(move || loop {
                    let job = job_rx.lock().recv();
                    let Ok((_, tracker)) = job else { break };
                    let response = executed(tracker.request(), EXECUTOR, clock.now());
                    tracker.update_resp(response);
                })
            })
            .collect();

        let committed = Arc::new(Mutex::new(Vec::<QueryBlock>::new()));
        let producer = {
            let pool = Arc::clone(&pool);
            let committed = Arc::clone(&committed);
            thread::spawn(move || {
                let mut seen = 0u64;
                while seen < total {
                    match pool.produce_block(64) {
                        Some(block) => {
                            seen += block.len() as u64;
                            committed.lock().push(block);
                        }
                        None => thread::yield_now(),
                    }
                }
            })
        };

        for seq in 1..=total {
            let client = &clients[(seq % 4) as usize];
            let request = client.write(seq, "INSERT INTO entries VALUES (1)");
            let tracker = pool.accept(seq, request).unwrap();
            job_tx.send((seq, tracker)).unwrap();
        }
        drop(job_tx);

        for executor in executors {
            executor.join().unwrap();
        }
        producer.join().unwrap();

        let blocks = committed.lock();
        info!(blocks = blocks.len(), "committed");
        let mut expected = 1u64;
        for block in blocks.iter() {
            assert!(block.len() <= 64);
            assert_eq!(block.first_sequence, expected);
            for query in &block.queries {
                assert_eq!(query.seq, expected);
                assert_eq!(query.response.header.request_hash, query.request.content_digest());
                expected += 1;
            }
            assert_eq!(block.last_sequence, expected - 1);
        }
        assert_eq!(expected, total + 1);
        assert_eq!(pool.status().in_flight, 0);
    }

    #[test]
    fn test_out_of_order_responses_hold_back_block() {
        let config = PoolConfig::default();
        let clock = Arc::new(ManualClock::new(0));
        let pool = service(config.clone(), clock);
        let client = Client::new(&config, "ledger", 1);

        let requests: Vec<_> = (1..=20)
            .map(|seq| {
                let request = client.write(seq, "UPDATE t SET v = v + 1");
                pool.accept(seq, request.clone()).unwrap();
                (seq, request)
            })
            .collect();

        let mut order: Vec<_> = requests.iter().skip(1).collect();
        order.shuffle(&mut rand::thread_rng());
        for (seq, request) in order {
            pool.attach_response(*seq, executed(request, EXECUTOR, 5)).unwrap();
        }
        assert!(pool.produce_block(100).is_none());
        assert_eq!(pool.status().ready, 19);

        pool.attach_response(1, executed(&requests[0].1, EXECUTOR, 6)).unwrap();
        let block = pool.produce_block(100).unwrap();
        assert_eq!((block.first_sequence, block.last_sequence), (1, 20));
    }

    // =============================================================================
    // SEQUENCE CONFLICTS
    // =============================================================================

    #[test]
    fn test_reused_sequence_detected_and_rejected() {
        let config = PoolConfig::default();
        let pool = service(config.clone(), Arc::new(ManualClock::new(0)));
        let honest = Client::new(&config, "ledger", 1);
        let other = Client::new(&config, "ledger", 2);

        let original = honest.write(10, "INSERT INTO t VALUES (1)");
        let conflicting = other.write(10, "DELETE FROM t");
        pool.accept(10, original.clone()).unwrap();

        assert!(pool.match_last(10));
        assert!(pool.match_request(10, &original));
        assert!(!pool.match_request(10, &conflicting));
        assert_eq!(
            pool.accept(10, conflicting).unwrap_err(),
            PoolError::DuplicateSequence { seq: 10 }
        );
        assert!(pool.match_request(10, &original));
    }

    #[test]
    fn test_sequences_stay_monotonic_after_commit() {
        let config = PoolConfig::default();
        let clock = Arc::new(ManualClock::new(0));
        let pool = service(config.clone(), clock);
        let client = Client::new(&config, "ledger", 1);

        for seq in [3, 4, 5] {
            let request = client.write(seq, "INSERT INTO t VALUES (2)");
            let response = executed(&request, EXECUTOR, 1);
            pool.accept(seq, request).unwrap().update_resp(response);
        }
        assert_eq!(pool.produce_block(2).unwrap().last_sequence, 4);
        assert!(!pool.match_last(4));
        assert!(pool.match_last(5));

        assert_eq!(
            pool.accept(4, client.write(4, "SELECT 1")).unwrap_err(),
            PoolError::SequenceOutOfOrder { seq: 4, last: 5 }
        );
        pool.accept(6, client.write(6, "SELECT 1")).unwrap();
        assert!(pool.match_last(6));
    }

    // =============================================================================
    // AUTHENTICATION
    // =============================================================================

    #[test]
    fn test_batched_request_authenticated_as_a_whole() {
        let config = PoolConfig {
            testnet: true,
            ..PoolConfig::default()
        };
        let pool = service(config.clone(), Arc::new(ManualClock::new(0)));
        let client = Client::new(&config, "ledger", 7);

        let batch = vec![
            Query::new("INSERT INTO t VALUES (:a)").with_arg("a", "1"),
            Query::new("INSERT INTO t VALUES (:a)").with_arg("a", "2"),
            Query::new("SELECT count(*) FROM t"),
        ];
        let request = client.request(QueryType::Write, 1, batch);
        assert_eq!(request.header().batch_count, 3);
        pool.accept(1, request).unwrap();

        let strict_client = Client::new(&PoolConfig::default(), "ledger", 8);
        let bypass_client = Client::new(
            &PoolConfig {
                bypass_signature: true,
                ..PoolConfig::default()
            },
            "ledger",
            9,
        );
        pool.accept(2, strict_client.write(2, "SELECT 1")).unwrap();
        assert!(matches!(
            pool.accept(3, bypass_client.write(3, "SELECT 1")),
            Err(PoolError::Authentication(_))
        ));
        assert_eq!(pool.status().in_flight, 2);
    }

    #[test]
    fn test_bypassed_node_accepts_unsigned_clients() {
        let config = PoolConfig {
            bypass_signature: true,
            ..PoolConfig::default()
        };
        let pool = service(config.clone(), Arc::new(ManualClock::new(0)));
        let client = Client::new(&config, "scratch", 1);

        pool.accept(1, client.write(1, "CREATE TABLE t (v INT)")).unwrap();
        assert!(pool.match_last(1));
    }

    // =============================================================================
    // LIVENESS
    // =============================================================================

    #[test]
    fn test_stuck_execution_failed_after_timeout() {
        let config = PoolConfig {
            ready_timeout_ms: 1_000,
            ..PoolConfig::default()
        };
        let clock = Arc::new(ManualClock::new(50_000));
        let pool = service(config.clone(), clock.clone());
        let client = Client::new(&config, "ledger", 1);

        let requests: Vec<_> = (1..=3)
            .map(|seq| client.write(seq, "INSERT INTO t VALUES (3)"))
            .collect();
        for (seq, request) in (1..).zip(&requests) {
            pool.accept(seq, request.clone()).unwrap();
        }
        for seq in [2, 3] {
            let request = &requests[seq as usize - 1];
            pool.attach_response(seq, executed(request, EXECUTOR, 1)).unwrap();
        }

        clock.advance(999);
        assert_eq!(pool.fail_stale(), 0);
        assert!(pool.produce_block(10).is_none());

        clock.advance(1);
        assert_eq!(pool.stale_sequences(), vec![1]);
        assert_eq!(pool.fail_stale(), 1);
        let failed = pool.tracker(1).unwrap().response().unwrap();
        assert_eq!(failed.header.node_id, NodeId([0xA0; 32]));

        let block = pool.produce_block(10).unwrap();
        assert_eq!(block.len(), 3);
        assert!(matches!(
            block.queries[0].response.payload,
            ResponsePayload::Error { code, .. } if code == EXECUTION_TIMEOUT
        ));
        assert_eq!(
            block.queries[0].response.header.request_hash,
            requests[0].content_digest()
        );
        assert!(block.queries[1..].iter().all(|q| !q.response.is_error()));
    }
}
