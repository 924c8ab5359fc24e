use serde::Deserialize;
use serde_ini::{from_node, ini, to_string, Node};

#[test]
fn test_ini_macro_scalars() {
    assert_eq!(ini!(true), Node::leaf("true"));
    assert_eq!(ini!(false), Node::leaf("false"));
    assert_eq!(ini!(42), Node::leaf("42"));
    assert_eq!(ini!(-123), Node::leaf("-123"));
    assert_eq!(ini!(3.5), Node::leaf("3.5"));
    assert_eq!(ini!("hello world"), Node::leaf("hello world"));
    assert!(ini!("").is_empty());
}

#[test]
fn test_ini_macro_lists() {
    let empty = ini!([]);
    assert!(empty.values().unwrap().is_empty());

    let numbers = ini!([1, 2, 3]);
    assert_eq!(numbers.value().unwrap(), "1, 2, 3");
    assert_eq!(numbers.ints().unwrap(), vec![1, 2, 3]);

    let mixed = ini!(["a", 2, true]);
    assert_eq!(mixed.values().unwrap(), vec!["a", "2", "true"]);
}

#[test]
fn test_ini_macro_sections() {
    let root = ini!({
        "name": "demo",
        "debug": false,
        "server": {
            "port": 8080,
            "timeout": "1m30s",
            "hosts": ["alpha", "beta"]
        },
    });

    assert!(root.is_section());
    assert_eq!(root["name"].value().unwrap(), "demo");
    assert!(!root["debug"].bool().unwrap());
    assert_eq!(root["server"]["port"].int().unwrap(), 8080);
    assert_eq!(root["server"]["timeout"].duration().unwrap().as_secs(), 90);
    assert_eq!(
        root.get_path(["server", "hosts"]).values().unwrap(),
        vec!["alpha", "beta"]
    );
    assert!(root["server"]["missing"].is_empty());
}

#[test]
fn test_ini_macro_keeps_insertion_order() {
    let root = ini!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<&str> = root
        .children()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_ini_macro_decodes() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Server {
        port: u16,
        hosts: Vec<String>,
    }

    let node = ini!({ "port": 80, "hosts": ["a", "b"] });
    let server: Server = from_node(&node).unwrap();
    assert_eq!(
        server,
        Server {
            port: 80,
            hosts: vec!["a".to_string(), "b".to_string()],
        }
    );
}

#[test]
fn test_ini_macro_dumps() {
    let root = ini!({
        "s": { "b": 2 },
        "a": 1
    });
    assert_eq!(to_string(&root).unwrap(), "a = 1\n\n[s]\nb = 2\n");
}

#[test]
fn test_ini_macro_negative_and_computed_values() {
    let base = 40;
    let root = ini!({
        "offset": -1,
        "limit": base + 2,
        "bounds": [-5, 5],
        "nested": { "low": -0.5, "levels": [[1, 2], 3] },
    });

    assert_eq!(root["offset"].int().unwrap(), -1);
    assert_eq!(root["limit"].int().unwrap(), 42);
    assert_eq!(root["bounds"].ints().unwrap(), vec![-5, 5]);
    assert_eq!(root["nested"]["low"].float().unwrap(), -0.5);
    assert_eq!(root["nested"]["levels"].ints().unwrap(), vec![1, 2, 3]);
}
