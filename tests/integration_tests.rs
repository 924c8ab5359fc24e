use serde::{Deserialize, Serialize};
use serde_ini::{
    from_node, from_str, load, load_file, load_file_into, load_into, to_string,
    to_string_with_options, Error, IniOptions, Node,
};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::time::Duration;

const CONTENT: &str = "
root1 = 1
root2 = me ss age
# comment
; comment
root 3 = true # comment
root4 = 10s ; comment

[section1]
Sec1 = 10.9
Sec2 = 1,2,3,4

[section2]
sec = message
sec2 = false
";

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct Section1 {
    #[serde(rename = "Sec1")]
    sec1: f64,
    #[serde(rename = "Sec2")]
    sec2: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct Content {
    root1: i32,
    root2: String,
    #[serde(rename = "root 3")]
    root3: bool,
    root4: Duration,
    section1: Section1,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct I1 {
    #[serde(rename = "A")]
    a: i32,
    #[serde(rename = "B")]
    b: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct I2 {
    #[serde(rename = "A")]
    a: String,
    #[serde(rename = "B")]
    b: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct I {
    r1: i32,
    #[serde(rename = "R2")]
    r2: String,
    #[serde(skip)]
    r3: f64,
    #[serde(skip)]
    r4: i32,
    #[serde(rename = "R5")]
    r5: Duration,
    #[serde(rename = "S1")]
    s1: I1,
    #[serde(rename = "section2")]
    s2: I2,
}

fn sample_i() -> I {
    I {
        r1: 1,
        r2: "test".to_string(),
        r3: 1.23,
        r4: 10,
        r5: Duration::from_secs(60),
        s1: I1 { a: 10, b: 20.1 },
        s2: I2 {
            a: "hello".to_string(),
            b: vec!["Tim".to_string(), "Tom".to_string()],
        },
    }
}

fn sample_options() -> IniOptions {
    IniOptions::new().with_comments("I", "r1", "root item 1")
}

#[test]
fn test_accessors_on_loaded_content() {
    let root = load(CONTENT).unwrap();

    assert_eq!(root.get("root1").must_int(0), 1);
    assert_eq!(root.get("root2").value().unwrap(), "me ss age");
    assert!(root.get("root 3").bool().unwrap());
    assert_eq!(root.get("root4").duration().unwrap(), Duration::from_secs(10));
    assert_eq!(root["section1"]["Sec2"].ints().unwrap(), vec![1, 2, 3, 4]);
    assert!(!root.get_path(["section2", "sec2"]).bool().unwrap());
    assert!(root.get("noexists").int().is_err());
}

#[test]
fn test_decode_scalar_node() {
    let root = load(CONTENT).unwrap();
    let mut n: u16 = 0;
    root["root1"].mapto(&mut n).unwrap();
    assert_eq!(n, 1);
}

#[test]
fn test_decode_non_string_keys_fails() {
    let root = load(CONTENT).unwrap();
    let mut map: HashMap<i32, i32> = HashMap::new();
    match root.mapto(&mut map).unwrap_err() {
        Error::UnsupportedMapKey(kind) => assert_eq!(kind, "i32"),
        other => panic!("Expected unsupported map key, got {other:?}"),
    }
    assert!(map.is_empty());
}

#[test]
fn test_decode_string_map() {
    let root = load(CONTENT).unwrap();
    let mut map: HashMap<String, String> = HashMap::new();
    root["section2"].mapto(&mut map).unwrap();
    assert_eq!(map["sec2"], "false");
    assert_eq!(map["sec"], "message");
}

#[test]
fn test_decode_map_of_nodes() {
    let root = load(CONTENT).unwrap();
    let map: HashMap<String, Node> = from_node(&root["section2"]).unwrap();
    assert!(!map["sec2"].must_bool(true));

    let whole: BTreeMap<String, Node> = from_node(&root).unwrap();
    assert!(whole["section1"].is_section());
    assert!(whole["root1"].is_leaf());
}

#[test]
fn test_decode_sequence() {
    let root = load(CONTENT).unwrap();
    let mut list: Vec<i32> = Vec::new();
    root.get_path(["section1", "Sec2"]).mapto(&mut list).unwrap();
    assert_eq!(list, vec![1, 2, 3, 4]);
}

#[test]
fn test_decode_record() {
    let root = load(CONTENT).unwrap();
    let mut content = Content::default();
    root.mapto(&mut content).unwrap();
    assert_eq!(content.root1, 1);
    assert_eq!(content.root2, "me ss age");
    assert!(content.root3);
    assert_eq!(content.root4, Duration::from_secs(10));
    assert_eq!(content.section1.sec1, 10.9);
    assert_eq!(content.section1.sec2[0], 1);

    let typed: Content = from_str(CONTENT).unwrap();
    assert_eq!(typed, content);
}

#[test]
fn test_decode_into_any_value() {
    let value: serde_json::Value = from_str(CONTENT).unwrap();
    assert_eq!(value["root1"], "1");
    assert_eq!(value["section1"]["Sec2"], "1,2,3,4");
}

#[test]
fn test_overflow() {
    let root = load("small = 30\nbig = 300").unwrap();

    let mut value: u8 = 0;
    root["small"].mapto(&mut value).unwrap();
    assert_eq!(value, 30);

    match root["big"].mapto(&mut value).unwrap_err() {
        Error::Overflow { value, target } => {
            assert_eq!(value, "300");
            assert_eq!(target, "u8");
        }
        other => panic!("Expected overflow, got {other:?}"),
    }
    assert_eq!(value, 30);
}

#[test]
fn test_dump_struct_round_trip() {
    let source = sample_i();
    let text = to_string_with_options(&source, sample_options()).unwrap();

    let root = load(&text).unwrap();
    let mut decoded = I::default();
    root.mapto(&mut decoded).unwrap();

    assert_eq!(decoded.r1, 1);
    assert_eq!(decoded.r2, "test");
    assert_eq!(decoded.r3, 0.0);
    assert_eq!(decoded.r4, 0);
    assert_eq!(decoded.r5, Duration::from_secs(60));
    assert_eq!(decoded.s1, I1 { a: 10, b: 20.1 });
    assert_eq!(decoded.s2.b, vec!["Tim", "Tom"]);
}

#[test]
fn test_dump_example_text() {
    let text = to_string_with_options(&sample_i(), sample_options()).unwrap();
    assert_eq!(
        text,
        "; root item 1\nr1 = 1\nR2 = test\nR5 = 1m0s\n\n[S1]\nA = 10\nB = 20.1\n\n[section2]\nA = hello\nB = Tim, Tom\n"
    );
}

#[test]
fn test_excluded_fields_ignore_source_keys() {
    let mut decoded = I::default();
    load_into("r1 = 5\nr3 = 9.5\nr4 = 7", &mut decoded).unwrap();
    assert_eq!(decoded.r1, 5);
    assert_eq!(decoded.r3, 0.0);
    assert_eq!(decoded.r4, 0);

    let text = to_string(&sample_i()).unwrap();
    assert!(!text.contains("r3"));
    assert!(!text.contains("r4"));
}

#[test]
fn test_excluded_fields_left_untouched() {
    let mut decoded = sample_i();
    load_into("r1 = 5\nr3 = 9.5\nr4 = 7\n[S1]\nA = 11", &mut decoded).unwrap();
    assert_eq!(decoded.r1, 5);
    assert_eq!(decoded.r3, 1.23);
    assert_eq!(decoded.r4, 10);
    assert_eq!(decoded.s1, I1 { a: 11, b: 20.1 });

    #[derive(Serialize, Deserialize, Debug, Default)]
    struct Conf {
        port: u16,
        #[serde(skip)]
        secret: String,
    }

    let mut conf = Conf {
        port: 1,
        secret: "keep-me".to_string(),
    };
    load_into("port = 2\nsecret = fromtext", &mut conf).unwrap();
    assert_eq!(conf.port, 2);
    assert_eq!(conf.secret, "keep-me");
}

#[test]
fn test_unmentioned_fields_keep_exact_values() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Tagged {
        port: u16,
        tags: Vec<String>,
        label: Option<String>,
        limits: BTreeMap<String, String>,
    }

    let mut tagged = Tagged {
        port: 1,
        tags: vec!["a,b".to_string(), " padded ".to_string()],
        label: Some(String::new()),
        limits: BTreeMap::from([("max".to_string(), "x, y".to_string())]),
    };
    load_into("port = 2\ntags =\n[limits]\nmin = 0", &mut tagged).unwrap();
    assert_eq!(tagged.port, 2);
    assert_eq!(tagged.tags, vec!["a,b", " padded "]);
    assert_eq!(tagged.label, Some(String::new()));
    assert_eq!(tagged.limits["max"], "x, y");
    assert_eq!(tagged.limits["min"], "0");
}

#[test]
fn test_dump_map_round_trip() {
    let mut map: BTreeMap<&str, Node> = BTreeMap::new();
    map.insert("item1", Node::leaf("1"));
    map.insert("item2", Node::leaf("test"));
    map.insert("item3", Node::leaf("false"));

    let text = to_string(&map).unwrap();
    let root = load(&text).unwrap();
    assert_eq!(root.get("item1").must_int(0), 1);
    assert_eq!(root.get("item2").must_value(""), "test");
    assert!(!root.get("item3").must_bool(true));
}

#[test]
fn test_dump_loaded_tree() {
    let root = load(CONTENT).unwrap();
    let text = to_string(&root).unwrap();
    assert_eq!(load(&text).unwrap(), root);
}

#[test]
fn test_section_declared_before_scalar_is_reordered() {
    #[derive(Serialize)]
    struct Reordered {
        #[serde(rename = "S1")]
        s1: I1,
        #[serde(rename = "R1")]
        r1: i32,
    }

    let text = to_string(&Reordered {
        s1: I1 { a: 1, b: 2.5 },
        r1: 7,
    })
    .unwrap();
    assert_eq!(text, "R1 = 7\n\n[S1]\nA = 1\nB = 2.5\n");
}

#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONTENT.as_bytes()).unwrap();

    let root = load_file(file.path()).unwrap();
    assert_eq!(root["section2"]["sec"].value().unwrap(), "message");

    let mut content = Content::default();
    load_file_into(file.path(), &mut content).unwrap();
    assert_eq!(content.root4, Duration::from_secs(10));
}

#[test]
fn test_load_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    match load_file(dir.path().join("absent.ini")).unwrap_err() {
        Error::Io(err) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected io error, got {other:?}"),
    }
}

#[test]
fn test_load_file_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"a = 1\nno delimiter here\n").unwrap();
    match load_file(file.path()).unwrap_err() {
        Error::MissingDelimiter { line, context } => {
            assert_eq!(line, 2);
            assert_eq!(context, "no delimiter here");
        }
        other => panic!("Expected missing delimiter, got {other:?}"),
    }
}

#[test]
fn test_load_into_map_keeps_entries() {
    let mut map: HashMap<String, i32> = HashMap::new();
    map.insert("kept".to_string(), 1);
    map.insert("replaced".to_string(), 2);
    load_into("replaced = 20\nadded = 30", &mut map).unwrap();
    assert_eq!(map["kept"], 1);
    assert_eq!(map["replaced"], 20);
    assert_eq!(map["added"], 30);
}

#[test]
fn test_optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Optional {
        name: Option<String>,
        limit: Option<u32>,
    }

    let parsed: Optional = from_str("name = x\nlimit =").unwrap();
    assert_eq!(
        parsed,
        Optional {
            name: Some("x".to_string()),
            limit: None,
        }
    );
    assert_eq!(to_string(&parsed).unwrap(), "name = x\n");
}

#[test]
fn test_unit_enum_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Level {
        Debug,
        Warn,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Logging {
        level: Level,
        fallbacks: Vec<Level>,
    }

    let logging = Logging {
        level: Level::Warn,
        fallbacks: vec![Level::Debug, Level::Warn],
    };
    let text = to_string(&logging).unwrap();
    assert_eq!(text, "level = Warn\nfallbacks = Debug, Warn\n");
    assert_eq!(from_str::<Logging>(&text).unwrap(), logging);
}
