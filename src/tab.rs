//! See [`Tab`].

use serde::{Deserialize, Serialize};

/// A named tablature string.
///
/// The server never parses or validates `tab`, and `read_only` is advisory: clients decide whether
/// to let users edit a read-only tab.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// The tab's display label.
    pub name: String,

    /// The tablature notation.
    pub tab: String,

    /// Whether clients should treat the tab as read-only.
    pub read_only: bool,
}

/// The tabs served when no tabs file can be loaded.
pub fn default_tabs() -> Vec<Tab> {
    vec![
        Tab {
            name: "Basic Scale".to_owned(),
            tab: "def#gabc#".to_owned(),
            read_only: true,
        },
        Tab {
            name: "Extended Scale".to_owned(),
            tab: "def# gab c#\nd+e+f#+ g+a+b+ c#+\nd++e++f#++ g++a++b++ c#++".to_owned(),
            read_only: true,
        },
    ]
}
