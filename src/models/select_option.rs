use serde::Serialize;

/// One selectable entry of a dropdown, as returned by the option loaders.
/// `public` carries the network visibility tag and stays `None` for every
/// other selector.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            public: None,
        }
    }

    pub fn tagged(value: impl Into<String>, label: impl Into<String>, public: bool) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            public: Some(public),
        }
    }
}

/// Template-facing projection of a `SelectOption`: selection and visibility
/// resolved, ready to render.
#[derive(Clone, Debug)]
pub struct SelectOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub hidden: bool,
}

/// Project options for the template, marking the currently selected value.
pub fn option_views(options: &[SelectOption], selected: &str) -> Vec<SelectOptionView> {
    options
        .iter()
        .map(|opt| SelectOptionView {
            value: opt.value.clone(),
            label: opt.label.clone(),
            selected: !selected.is_empty() && opt.value == selected,
            hidden: false,
        })
        .collect()
}
