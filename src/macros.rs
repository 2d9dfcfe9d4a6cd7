/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Object keys must be string literals, so attribute (`"-id"`) and inline
/// text (`"#text"`) keys are written exactly as they appear in JSON.
/// Anything that is not `null`, `true`, `false`, an array or an object is
/// converted with [`to_value`](crate::to_value).
///
/// The macro evaluates to a bare [`Value`](crate::Value), so a conversion
/// that fails (a map keyed by a sequence, or a custom `Serialize` impl that
/// returns an error) becomes [`Value::Null`](crate::Value::Null) and renders
/// as an empty element. Call [`to_value`](crate::to_value) directly when
/// the error matters.
///
/// Negative literals inside arrays and objects must be parenthesized, as in
/// `value!([(-1), 2])`, because each element is matched as a single token
/// tree.
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_string_with_root, value};
///
/// let note = value!({ "-id": "7", "#text": "Hello" });
/// assert_eq!(to_string_with_root(&note, "note").unwrap(), r#"<note id="7">Hello</note>"#);
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Failed conversions become null, see the macro docs.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
