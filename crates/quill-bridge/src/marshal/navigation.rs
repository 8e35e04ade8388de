//! Navigation tree conversion.

use serde_json::Value;

use crate::errors::MarshalError;
use crate::raw::RawNavigationTree;
use crate::records::{NavigationTree, TextSpan};

use super::{convert_each, decode};

/// Converts a whole raw navigation tree eagerly.
pub(crate) fn convert(raw: Value) -> Result<NavigationTree, MarshalError> {
    if raw.is_null() {
        return Err(MarshalError::Missing {
            item: "navigation tree",
        });
    }
    let root: RawNavigationTree = decode("navigation tree", raw)?;
    Ok(convert_node(root))
}

fn convert_node(raw: RawNavigationTree) -> NavigationTree {
    let span = raw
        .name_span
        .or_else(|| raw.spans.first().copied())
        .map(TextSpan::from);
    let children = convert_each("navigation node", raw.child_items, |value| {
        decode::<RawNavigationTree>("navigation node", value).map(convert_node)
    });

    NavigationTree {
        text: raw.text,
        kind: raw.kind,
        kind_modifiers: raw.kind_modifiers,
        span,
        children,
    }
}
