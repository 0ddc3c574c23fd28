//! Canonicalization of raw style records.
//!
//! Per-edge properties are folded into shorthands and properties holding
//! their initial value are dropped. The result is a fixed point: simplifying
//! it again changes nothing.

use rnflow_core::{StyleMap, StyleValue};

/// Two-step edge merge: `(first, second) -> merged`.
struct EdgePair {
    first: &'static str,
    second: &'static str,
    merged: &'static str,
}

const fn pair(first: &'static str, second: &'static str, merged: &'static str) -> EdgePair {
    EdgePair { first, second, merged }
}

/// Properties that cascade top/bottom -> vertical, left/right -> horizontal,
/// then vertical/horizontal -> shorthand.
const CASCADES: &[[EdgePair; 3]] = &[
    [
        pair("marginTop", "marginBottom", "marginVertical"),
        pair("marginLeft", "marginRight", "marginHorizontal"),
        pair("marginVertical", "marginHorizontal", "margin"),
    ],
    [
        pair("paddingTop", "paddingBottom", "paddingVertical"),
        pair("paddingLeft", "paddingRight", "paddingHorizontal"),
        pair("paddingVertical", "paddingHorizontal", "padding"),
    ],
    [
        pair("borderTopStyle", "borderBottomStyle", "borderVerticalStyle"),
        pair("borderLeftStyle", "borderRightStyle", "borderHorizontalStyle"),
        pair("borderVerticalStyle", "borderHorizontalStyle", "borderStyle"),
    ],
    [
        pair("borderTopColor", "borderBottomColor", "borderVerticalColor"),
        pair("borderLeftColor", "borderRightColor", "borderHorizontalColor"),
        pair("borderVerticalColor", "borderHorizontalColor", "borderColor"),
    ],
];

/// Properties that only merge when all four edges agree.
const FOUR_WAY: &[([&str; 4], &str)] = &[
    (
        ["borderTopWidth", "borderRightWidth", "borderBottomWidth", "borderLeftWidth"],
        "borderWidth",
    ),
    (
        [
            "borderTopLeftRadius",
            "borderTopRightRadius",
            "borderBottomRightRadius",
            "borderBottomLeftRadius",
        ],
        "borderRadius",
    ),
];

enum Initial {
    Number(f64),
    Str(&'static str),
}

/// Properties dropped when they hold their initial value.
const INITIAL_VALUES: &[(&str, Initial)] = &[
    ("margin", Initial::Number(0.0)),
    ("padding", Initial::Number(0.0)),
    ("borderWidth", Initial::Number(0.0)),
    ("borderRadius", Initial::Number(0.0)),
    ("borderStyle", Initial::Str("solid")),
    ("borderColor", Initial::Str("transparent")),
    ("background", Initial::Str("transparent")),
    ("display", Initial::Str("flex")),
    ("position", Initial::Str("relative")),
    ("flexGrow", Initial::Number(0.0)),
    ("flexBasis", Initial::Str("auto")),
    ("flexWrap", Initial::Str("nowrap")),
    ("flexDirection", Initial::Str("column")),
    ("alignSelf", Initial::Str("auto")),
    ("alignItems", Initial::Str("flex-start")),
    ("justifyContent", Initial::Str("flex-start")),
];

/// Simplify a raw style record.
pub fn simplify(style: &StyleMap) -> StyleMap {
    let mut out = style.clone();

    for cascade in CASCADES {
        for step in cascade {
            merge(&mut out, &[step.first, step.second], step.merged);
        }
    }
    for (edges, merged) in FOUR_WAY {
        merge(&mut out, edges, merged);
    }

    for (key, initial) in INITIAL_VALUES {
        let is_initial = match (out.get(key), initial) {
            (Some(value), Initial::Number(n)) => value.is_number(*n),
            (Some(value), Initial::Str(s)) => value.is_str(s),
            (None, _) => false,
        };
        if is_initial {
            out.remove(key);
        }
    }

    drop_default_offset(&mut out, "top", "bottom");
    drop_default_offset(&mut out, "left", "right");

    out
}

/// Replace `keys` by `merged` when every key is present with the same value.
/// The merged key takes the position of the first key.
fn merge(style: &mut StyleMap, keys: &[&str], merged: &str) {
    let Some(value) = common_value(style, keys) else {
        return;
    };
    style.remove(merged);
    let index = keys
        .iter()
        .filter_map(|key| style.index_of(key))
        .min()
        .unwrap_or(style.len());
    for key in keys {
        style.remove(key);
    }
    style.insert_at(index, merged, value);
}

fn common_value(style: &StyleMap, keys: &[&str]) -> Option<StyleValue> {
    let (first, rest) = keys.split_first()?;
    let value = style.get(first)?;
    rest.iter()
        .all(|key| style.get(key) == Some(value))
        .then(|| value.clone())
}

/// `top: 0` without `bottom` is the default placement.
fn drop_default_offset(style: &mut StyleMap, near: &str, far: &str) {
    if style.get(near).is_some_and(|v| v.is_number(0.0)) && !style.contains_key(far) {
        style.remove(near);
    }
}
