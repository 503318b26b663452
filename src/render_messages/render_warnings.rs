#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderWarning {
    pub msg: String,
    pub line: Option<i64>,
    pub warning_kind: WarningKind,
}

impl RenderWarning {
    pub fn new(msg: impl Into<String>, line: Option<i64>, warning_kind: WarningKind) -> Self {
        RenderWarning {
            msg: msg.into(),
            line,
            warning_kind,
        }
    }
}

/// Constructs the dispatchers could not find a converter for.
/// The rendering still completes with sentinel text in their place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    UnsupportedExpression,
    UnsupportedType,
    UnsupportedForm,
    UnsupportedAttribute,
}

pub fn warning_kind_to_str(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::UnsupportedExpression => "Unsupported expression",
        WarningKind::UnsupportedType => "Unsupported type",
        WarningKind::UnsupportedForm => "Unsupported form",
        WarningKind::UnsupportedAttribute => "Unsupported attribute",
    }
}
