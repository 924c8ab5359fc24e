//! Property-based tests for the dump/load round trip and the leaf grammars.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ini::{duration, from_node, from_str, load, load_into, to_string, Node};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
struct Server {
    port: u16,
    hosts: Vec<String>,
    weights: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
struct Record {
    id: u32,
    score: i64,
    ratio: f64,
    enabled: bool,
    name: String,
    tags: Vec<String>,
    timeout: Duration,
    server: Server,
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}"
}

fn server() -> impl Strategy<Value = Server> {
    (
        any::<u16>(),
        prop::collection::vec(word(), 0..5),
        prop::collection::vec(any::<i32>(), 0..5),
    )
        .prop_map(|(port, hosts, weights)| Server {
            port,
            hosts,
            weights,
        })
}

fn record() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        any::<i64>(),
        -1.0e9..1.0e9f64,
        any::<bool>(),
        word(),
        prop::collection::vec(word(), 0..5),
        (0u64..1_000_000, 0u32..1_000_000_000),
        server(),
    )
        .prop_map(
            |(id, score, ratio, enabled, name, tags, (secs, nanos), server)| Record {
                id,
                score,
                ratio,
                enabled,
                name,
                tags,
                timeout: Duration::new(secs, nanos),
                server,
            },
        )
}

fn roundtrip(value: &Record) -> bool {
    let text = match to_string(value) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            return false;
        }
    };
    let mut decoded = Record::default();
    match load_into(&text, &mut decoded) {
        Ok(()) => *value == decoded,
        Err(e) => {
            eprintln!("Deserialize failed: {}", e);
            eprintln!("Serialized was: {}", text);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_record_roundtrip(value in record()) {
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_record_from_str_with_lists(mut value in record(), tag in word(), host in word()) {
        value.tags.push(tag);
        value.server.hosts.push(host);
        value.server.weights.push(1);
        let text = to_string(&value).unwrap();
        prop_assert_eq!(from_str::<Record>(&text).unwrap(), value);
    }

    #[test]
    fn prop_values_split(tokens in prop::collection::vec(word(), 1..10)) {
        let node = Node::leaf(tokens.join(" ,  "));
        prop_assert_eq!(node.values().unwrap(), tokens);
    }

    #[test]
    fn prop_duration_format_parse(secs in 0u64..10_000_000_000, nanos in 0u32..1_000_000_000) {
        let value = Duration::new(secs, nanos);
        prop_assert_eq!(duration::parse(&duration::format(value)).unwrap(), value);
    }

    #[test]
    fn prop_narrowing(n in any::<i64>()) {
        let node = Node::leaf(n.to_string());
        let narrowed = from_node::<i8>(&node);
        prop_assert_eq!(narrowed.is_ok(), i8::try_from(n).is_ok());
        prop_assert_eq!(from_node::<i64>(&node).unwrap(), n);
    }

    #[test]
    fn prop_load_never_panics(text in "\\PC{0,200}") {
        let _ = load(&text);
    }
}
