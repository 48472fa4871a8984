use std::collections::HashMap;
use std::time::Duration;

use rendezvous_rt::tasks::{self as rt, timeout};

use crate::tasks::{fan_in, fan_in_all, Generator, MessageStream};
use crate::{GeneratorOptions, StreamError};

fn quick(label: &str) -> MessageStream {
    Generator::new(GeneratorOptions::new(label).max_delay(Duration::from_millis(5))).start()
}

/// Receives `count` messages, acknowledging each, grouped by label.
async fn collect_by_label(merged: &mut MessageStream, count: usize) -> HashMap<String, Vec<u64>> {
    let mut seen: HashMap<String, Vec<u64>> = HashMap::new();
    for _ in 0..count {
        let message = merged.next().await.unwrap();
        seen.entry(message.label().to_string())
            .or_default()
            .push(message.index());
        message.acknowledge().unwrap();
    }
    seen
}

fn assert_each_source_in_order(seen: &HashMap<String, Vec<u64>>) {
    for (label, indices) in seen {
        let expected: Vec<u64> = (0..indices.len() as u64).collect();
        assert_eq!(indices, &expected, "messages from {label} out of order");
    }
}

#[test]
pub fn test_fan_in_interleaves_both_sources() {
    let runtime = rt::Runtime::new().unwrap();
    runtime.block_on(async move {
        let mut merged = fan_in(quick("Joe"), quick("Ann"));

        let seen = collect_by_label(&mut merged, 10).await;

        assert_eq!(seen.values().map(Vec::len).sum::<usize>(), 10);
        assert!(seen.contains_key("Joe"));
        assert!(seen.contains_key("Ann"));
        assert_each_source_in_order(&seen);
    })
}

#[test]
pub fn test_fan_in_all_merges_every_source() {
    let runtime = rt::Runtime::new().unwrap();
    runtime.block_on(async move {
        let mut merged = fan_in_all(vec![quick("Joe"), quick("Ann"), quick("Karl")]);

        let seen = collect_by_label(&mut merged, 15).await;

        assert_eq!(seen.len(), 3);
        assert_eq!(seen.values().map(Vec::len).sum::<usize>(), 15);
        assert_each_source_in_order(&seen);
    })
}

#[test]
pub fn test_fan_in_all_without_sources_is_closed() {
    let runtime = rt::Runtime::new().unwrap();
    runtime.block_on(async move {
        let mut merged = fan_in_all(Vec::new());
        let next = timeout(Duration::from_secs(1), merged.next()).await.unwrap();
        assert!(next.is_none());
    })
}

#[test]
pub fn test_fan_in_all_closes_when_sources_quit() {
    let runtime = rt::Runtime::new().unwrap();
    runtime.block_on(async move {
        let options = |label: &str| GeneratorOptions::new(label).max_delay(Duration::from_millis(5));
        let (joe, quit_joe) = Generator::new(options("Joe")).start_quitable();
        let (ann, quit_ann) = Generator::new(options("Ann")).start_quitable();
        let mut merged = fan_in_all(vec![joe, ann]);

        assert!(merged.next().await.is_some());
        assert!(quit_joe.quit("Done").await.is_ok());
        assert!(quit_ann.quit("Done").await.is_ok());

        // At most one message per source may still be in flight.
        let mut leftovers = 0;
        while timeout(Duration::from_secs(1), merged.next())
            .await
            .unwrap()
            .is_some()
        {
            leftovers += 1;
        }
        assert!(leftovers <= 2);
    })
}

#[test]
pub fn test_dropping_merged_stream_stops_sources() {
    let runtime = rt::Runtime::new().unwrap();
    runtime.block_on(async move {
        let mut merged = fan_in(quick("Joe"), quick("Ann"));
        let message = merged.next().await.unwrap();

        drop(merged);
        rt::sleep(Duration::from_millis(100)).await;

        assert_eq!(message.acknowledge(), Err(StreamError::ProducerGone));
    })
}
