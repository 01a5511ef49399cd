//! Override commands posted to the fleet manager.

/// Load override request for one instance.
///
/// With `force` set, the fleet manager pins its view of the instance at
/// `load` and stops accepting the instance's own reports until a clearing
/// command arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideCommand {
    /// Host key of the target instance.
    pub name: String,

    /// Load level to pin; only sent when forcing.
    pub load: Option<u32>,

    pub force: bool,
}

impl OverrideCommand {
    /// Pin `host` at `load`.
    pub fn force_set(host: impl Into<String>, load: u32) -> Self {
        Self {
            name: host.into(),
            load: Some(load),
            force: true,
        }
    }

    /// Clear the pin on `host` so regular load reports resume.
    pub fn reset(host: impl Into<String>) -> Self {
        Self {
            name: host.into(),
            load: None,
            force: false,
        }
    }

    /// Form pairs in the exact wire encoding: `force` is `"1"`/`"0"` and
    /// `load` is present only when set.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("name", self.name.clone())];
        if let Some(load) = self.load {
            pairs.push(("load", load.to_string()));
        }
        pairs.push(("force", if self.force { "1" } else { "0" }.to_string()));
        pairs
    }
}
