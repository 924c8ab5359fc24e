/// Builds a [`Node`](crate::Node) tree from a literal.
///
/// Objects become sections, arrays become comma-separated leaves and every other
/// expression becomes a leaf holding its `Display` text.
///
/// ```rust
/// use serde_ini::ini;
///
/// let root = ini!({
///     "name": "demo",
///     "server": { "port": 8080, "hosts": ["a", "b"] }
/// });
/// assert_eq!(root["name"].value().unwrap(), "demo");
/// assert_eq!(root["server"]["port"].int().unwrap(), 8080);
/// assert_eq!(root["server"]["hosts"].values().unwrap(), vec!["a", "b"]);
/// ```
#[macro_export]
macro_rules! ini {
    // Section children, one `key: value` at a time
    (@section $section:ident ()) => {};

    (@section $section:ident ($key:literal : { $($inner:tt)* } $(, $($rest:tt)*)?)) => {
        $section.insert($key, $crate::ini!({ $($inner)* }));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    (@section $section:ident ($key:literal : [ $($inner:tt)* ] $(, $($rest:tt)*)?)) => {
        $section.insert($key, $crate::ini!([ $($inner)* ]));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    (@section $section:ident ($key:literal : $value:expr $(, $($rest:tt)*)?)) => {
        $section.insert($key, $crate::ini!($value));
        $crate::ini!(@section $section ($($($rest)*)?));
    };

    // List elements
    (@list $items:ident ()) => {};

    (@list $items:ident ([ $($inner:tt)* ] $(, $($rest:tt)*)?)) => {
        $items.push($crate::ini!([ $($inner)* ]).data().to_string());
        $crate::ini!(@list $items ($($($rest)*)?));
    };

    (@list $items:ident ($elem:expr $(, $($rest:tt)*)?)) => {
        $items.push($crate::ini!($elem).data().to_string());
        $crate::ini!(@list $items ($($($rest)*)?));
    };

    // Empty section
    ({}) => {
        $crate::Node::section()
    };

    // Section with children
    ({ $($body:tt)+ }) => {{
        let mut section = $crate::Node::section();
        $crate::ini!(@section section ($($body)+));
        section
    }};

    // Empty list
    ([]) => {
        $crate::Node::leaf("")
    };

    // List leaf
    ([ $($body:tt)+ ]) => {{
        let mut items: ::std::vec::Vec<::std::string::String> = ::std::vec::Vec::new();
        $crate::ini!(@list items ($($body)+));
        $crate::Node::leaf(items.join(", "))
    }};

    ($value:expr) => {
        $crate::Node::leaf(($value).to_string())
    };
}

#[cfg(test)]
mod tests {
    use crate::Node;

    #[test]
    fn test_ini_macro_leaves() {
        assert_eq!(ini!("hello"), Node::leaf("hello"));
        assert_eq!(ini!(42), Node::leaf("42"));
        assert_eq!(ini!(3.5), Node::leaf("3.5"));
        assert_eq!(ini!(true), Node::leaf("true"));
    }

    #[test]
    fn test_ini_macro_lists() {
        assert_eq!(ini!([]), Node::leaf(""));
        assert_eq!(ini!([1, 2, 3]), Node::leaf("1, 2, 3"));
        assert_eq!(ini!([1, 2, 3]).ints().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ini_macro_sections() {
        assert_eq!(ini!({}), Node::section());

        let root = ini!({
            "root1": 1,
            "section1": { "Sec1": 10.9, "Sec2": [1, 2, 3, 4] }
        });
        assert_eq!(root.children().map(|c| c.len()), Some(2));
        assert_eq!(root["section1"]["Sec1"].float().unwrap(), 10.9);
        assert_eq!(
            root.get_path(["section1", "Sec2"]).ints().unwrap(),
            vec![1, 2, 3, 4]
        );
    }
}
