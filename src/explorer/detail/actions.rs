//! Actions tab.

use crate::program::{ActionEntry, ActionParam, StageInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCard {
    pub name: String,
    pub parameters: Vec<ActionParam>,
    pub body_preview: Option<String>,
}

impl ActionCard {
    /// `name(type param, ...)`, or just the name for parameterless actions
    pub fn signature(&self) -> String {
        if self.parameters.is_empty() {
            return self.name.clone();
        }
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.ty.is_empty() {
                    p.name.clone()
                } else {
                    format!("{} {}", p.ty, p.name)
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl From<&ActionEntry> for ActionCard {
    fn from(entry: &ActionEntry) -> Self {
        match entry {
            ActionEntry::Name(name) => ActionCard {
                name: name.clone(),
                parameters: Vec::new(),
                body_preview: None,
            },
            ActionEntry::Detailed(info) => ActionCard {
                name: info.name.clone(),
                parameters: info.parameters.clone(),
                body_preview: info.body_preview.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsView {
    pub actions: Vec<ActionCard>,
}

impl ActionsView {
    pub fn render(stage: &StageInfo) -> Self {
        Self {
            actions: stage.actions().iter().map(ActionCard::from).collect(),
        }
    }
}
