pub enum DiagnosticKind {
    // Resolution
    UndefinedIdentifier(String),
    UndefinedFunction(String),
    UndefinedProperty(String),
    NotCallable(String),
    NotAnObject(String),

    // Types
    TypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    InvalidConditionType(String),
    InvalidUnaryOperand {
        op: char,
        expected: String,
    },
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    // Runtime
    DivisionByZero,
    RecursionLimitExceeded,
    TopLevelBreakContinue,
    UnexpectedControlFlowInFunction(&'static str),

    // Custom
    Raw(String),
}

pub struct DiagnosticsFormatter;

impl DiagnosticsFormatter {
    fn format_en(kind: &DiagnosticKind) -> String {
        match kind {
            DiagnosticKind::UndefinedIdentifier(name) => {
                format!("Undefined identifier: {}", name)
            }
            DiagnosticKind::UndefinedFunction(name) => format!("Undefined function: {}", name),
            DiagnosticKind::UndefinedProperty(name) => format!("Undefined property: {}", name),
            DiagnosticKind::NotCallable(ty) => format!("'{}' is not callable", ty),
            DiagnosticKind::NotAnObject(ty) => {
                format!("Property access requires an object, but got {}", ty)
            }

            DiagnosticKind::TypeMismatch { op, left, right } => {
                format!("Type mismatch: '{}' is not defined for {} and {}", op, left, right)
            }
            DiagnosticKind::InvalidConditionType(actual) => {
                format!("Condition must be of type bool, but got {}", actual)
            }
            DiagnosticKind::InvalidUnaryOperand { op, expected } => {
                format!("Unary operator '{}' expects {} type", op, expected)
            }
            DiagnosticKind::ArgumentCountMismatch {
                name,
                expected,
                actual,
            } => format!(
                "Argument count mismatch for '{}': expected {} but got {}",
                name, expected, actual
            ),

            DiagnosticKind::DivisionByZero => "Division by zero".into(),
            DiagnosticKind::RecursionLimitExceeded => "Recursion limit exceeded".into(),
            DiagnosticKind::TopLevelBreakContinue => {
                "Break or continue is not allowed at top level".into()
            }
            DiagnosticKind::UnexpectedControlFlowInFunction(op) => {
                format!("Unexpected {} in function", op)
            }

            DiagnosticKind::Raw(s) => s.clone(),
        }
    }

    pub fn format(kind: &DiagnosticKind) -> String {
        Self::format_en(kind)
    }
}
