use serde::{Deserialize, Serialize};

use super::{ComponentBase, ComponentContext};

/// Work handed to the host's script runtime; this crate never executes scripts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScriptRequest {
    Run { chunk: String, key: i32 },
    Assign { variable: String, value: i32 },
}

/// Runs a script chunk whenever its track reaches a key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptCodeComponent {
    pub runs: u32,
}

impl ScriptCodeComponent {
    pub(super) fn set_key(
        &mut self,
        base: &ComponentBase,
        value: i32,
        ctx: &mut ComponentContext<'_>,
    ) {
        self.runs += 1;
        ctx.scripts.push(ScriptRequest::Run {
            chunk: base.name.clone(),
            key: value,
        });
    }
}

/// Mirrors a script variable; keys assign it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptVarComponent {
    pub value: Option<i32>,
}

impl ScriptVarComponent {
    pub(super) fn set_key(
        &mut self,
        base: &ComponentBase,
        value: i32,
        ctx: &mut ComponentContext<'_>,
    ) {
        self.value = Some(value);
        ctx.scripts.push(ScriptRequest::Assign {
            variable: base.name.clone(),
            value,
        });
    }
}
