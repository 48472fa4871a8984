use std::time::Duration;

use rendezvous_rt::threads as rt;

use crate::threads::{Generator, MessageTimeout};
use crate::{GeneratorOptions, StreamError};

fn quick(label: &str) -> GeneratorOptions {
    GeneratorOptions::new(label).max_delay(Duration::from_millis(5))
}

#[test]
pub fn test_generator_yields_indices_in_order() {
    let mut joe = Generator::new(quick("Joe")).start();

    for expected in 0..5u64 {
        let message = joe.next().unwrap();
        assert_eq!(message.index(), expected);
        assert_eq!(message.payload(), format!("Joe {expected}"));
        message.acknowledge().unwrap();
    }
}

#[test]
pub fn test_generator_waits_for_acknowledgment() {
    let options = GeneratorOptions::new("Joe").max_delay(Duration::from_millis(1));
    let mut joe = Generator::new(options).start();
    let first = joe.next().unwrap();

    let mut waiting = MessageTimeout::new(&mut joe, Duration::from_millis(200));
    assert_eq!(waiting.next().unwrap_err(), StreamError::MessageTimeout);

    first.acknowledge().unwrap();
    assert_eq!(joe.next().unwrap().index(), 1);
}

#[test]
pub fn test_acknowledging_a_message_twice_releases_one_step() {
    let mut ann = Generator::new(quick("Ann")).start();

    let first = ann.next().unwrap();
    first.acknowledge().unwrap();
    let second = ann.next().unwrap();
    assert_eq!(second.index(), 1);

    first.acknowledge().unwrap();
    first.clone().acknowledge().unwrap();
    let mut waiting = MessageTimeout::new(&mut ann, Duration::from_millis(200));
    assert_eq!(waiting.next().unwrap_err(), StreamError::MessageTimeout);

    second.acknowledge().unwrap();
    assert_eq!(ann.next().unwrap().index(), 2);
}

#[test]
pub fn test_dropping_the_stream_stops_the_generator() {
    let mut joe = Generator::new(quick("Joe")).start();
    let message = joe.next().unwrap();

    drop(joe);
    rt::sleep(Duration::from_millis(100));

    assert_eq!(message.acknowledge(), Err(StreamError::ProducerGone));
}

#[test]
pub fn test_cancel_closes_the_stream() {
    let mut joe = Generator::new(quick("Joe")).start();
    joe.next().unwrap().acknowledge().unwrap();

    joe.cancel();
    assert!(joe.cancellation_token().is_cancelled());
    assert!(joe.next().is_none());
}

#[test]
pub fn test_quit_returns_farewell_and_ends_the_stream() {
    let (mut joe, quit) = Generator::new(quick("Joe")).start_quitable();

    let received: Vec<u64> = joe.by_ref().take(3).map(|message| message.index()).collect();
    assert_eq!(received, vec![0, 1, 2]);

    assert_eq!(quit.quit("Terminating...").unwrap(), "See you!");
    assert!(joe.next().is_none());
}

#[test]
pub fn test_quit_after_stream_dropped_reports_producer_gone() {
    let (joe, quit) = Generator::new(quick("Joe")).start_quitable();
    drop(joe);
    rt::sleep(Duration::from_millis(50));

    assert_eq!(quit.quit("Hello?"), Err(StreamError::ProducerGone));
}

#[test]
pub fn test_dropped_quit_handle_keeps_producing() {
    let (joe, quit) = Generator::new(quick("Ann")).start_quitable();
    drop(quit);

    let received: Vec<u64> = joe.take(3).map(|message| message.index()).collect();
    assert_eq!(received, vec![0, 1, 2]);
}
