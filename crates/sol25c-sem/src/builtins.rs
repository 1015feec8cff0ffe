//! Built-in class hierarchy and method tables.
//!
//! `Object` is the root; the six other built-in classes inherit from it
//! directly. The tables are fixed, read-only, and encoded literally.

/// Names of all built-in classes.
pub const CLASSES: [&str; 7] = [
    "Object", "Nil", "Integer", "String", "Block", "True", "False",
];

/// True if `name` is a built-in class.
pub fn is_builtin(name: &str) -> bool {
    CLASSES.contains(&name)
}

/// Parent of a built-in class; `None` for `Object` and unknown names.
pub fn parent(name: &str) -> Option<&'static str> {
    match name {
        "Nil" | "Integer" | "String" | "Block" | "True" | "False" => Some("Object"),
        _ => None,
    }
}

/// Selectors understood by a built-in class itself, not counting inherited
/// ones. Unknown names have no methods.
pub fn methods(name: &str) -> &'static [&'static str] {
    match name {
        "Object" => &[
            "new",
            "from:",
            "identicalTo:",
            "equalTo:",
            "asString",
            "isNumber",
            "isString",
            "isBlock",
            "isNil",
        ],
        "Nil" => &["asString"],
        "Integer" => &[
            "equalTo:",
            "greaterThan:",
            "plus:",
            "minus:",
            "multiplyBy:",
            "divBy:",
            "asString",
            "asInteger",
            "timesRepeat:",
        ],
        "String" => &[
            "read",
            "print",
            "equalTo:",
            "asString",
            "asInteger",
            "concatenateWith:",
            "startsWith:",
            "endsBefore:",
        ],
        "Block" => &["value", "value:", "value:value:"],
        "True" | "False" => &["not", "and:", "or:", "ifTrue:ifFalse:"],
        _ => &[],
    }
}

/// Resolve `selector` against built-in class `name`, walking the parent
/// chain up to `Object`.
pub fn lookup(name: &str, selector: &str) -> bool {
    if methods(name).contains(&selector) {
        return true;
    }
    match parent(name) {
        Some(parent) => lookup(parent, selector),
        None => false,
    }
}
