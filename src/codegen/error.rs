use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind};

use std::fmt;
use std::ops::Range;

type FileSpan = (String, Range<usize>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// The tree holds no functions.
    EmptyProgram,
    DuplicateFunction {
        name: String,
        span: Range<usize>,
        /// `None` when the earlier declaration is a built-in.
        previous: Option<Range<usize>>,
    },
    DuplicateParameter {
        name: String,
        span: Range<usize>,
        function: String,
    },
    ReservedName {
        name: String,
        span: Range<usize>,
    },
    NameClash {
        name: String,
        span: Range<usize>,
    },
    UndeclaredVariable {
        name: String,
        span: Range<usize>,
        function: String,
        is_function: bool,
    },
    UndeclaredFunction {
        name: String,
        span: Range<usize>,
        declared_later: bool,
    },
    ArityMismatch {
        name: String,
        span: Range<usize>,
        expected: usize,
        found: usize,
        declaration: Option<Range<usize>>,
    },
}

impl SemanticError {
    pub fn name(&self) -> &str {
        match self {
            SemanticError::EmptyProgram => "",
            SemanticError::DuplicateFunction { name, .. }
            | SemanticError::DuplicateParameter { name, .. }
            | SemanticError::ReservedName { name, .. }
            | SemanticError::NameClash { name, .. }
            | SemanticError::UndeclaredVariable { name, .. }
            | SemanticError::UndeclaredFunction { name, .. }
            | SemanticError::ArityMismatch { name, .. } => name,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            SemanticError::EmptyProgram => 0..0,
            SemanticError::DuplicateFunction { span, .. }
            | SemanticError::DuplicateParameter { span, .. }
            | SemanticError::ReservedName { span, .. }
            | SemanticError::NameClash { span, .. }
            | SemanticError::UndeclaredVariable { span, .. }
            | SemanticError::UndeclaredFunction { span, .. }
            | SemanticError::ArityMismatch { span, .. } => span.clone(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            SemanticError::EmptyProgram => "Empty Program",
            SemanticError::DuplicateFunction { .. } => "Duplicate Function",
            SemanticError::DuplicateParameter { .. } => "Duplicate Parameter",
            SemanticError::ReservedName { .. } => "Reserved Name",
            SemanticError::NameClash { .. } => "Name Clash",
            SemanticError::UndeclaredVariable { .. } => "Undeclared Variable",
            SemanticError::UndeclaredFunction { .. } => "Undeclared Function",
            SemanticError::ArityMismatch { .. } => "Arity Mismatch",
        }
    }

    pub fn report(&self, file: &str) -> Report<'static, FileSpan> {
        let here = (file.to_string(), self.span());
        let name = Fmt::fg(self.name(), Color::Blue);

        let mut report = Report::build(ReportKind::Error, here.clone())
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code(self.code())
            .with_message(self.to_string());

        match self {
            SemanticError::EmptyProgram => {
                report =
                    report.with_help("declare at least one function, such as `main(){ write(1); }`");
            }
            SemanticError::DuplicateFunction { previous, .. } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message(format!("function `{}` declared again here", name))
                        .with_color(Color::Red),
                );
                report = match previous {
                    Some(previous) => report.with_label(
                        Label::new((file.to_string(), previous.clone()))
                            .with_message("first declared here")
                            .with_color(Color::Yellow),
                    ),
                    None => report.with_note(format!("`{}` is a built-in function", name)),
                };
            }
            SemanticError::DuplicateParameter { function, .. } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message(format!(
                            "`{}` is already a parameter of `{}`",
                            name,
                            Fmt::fg(function, Color::Blue)
                        ))
                        .with_color(Color::Red),
                );
            }
            SemanticError::ReservedName { .. } => {
                report = report
                    .with_label(
                        Label::new(here)
                            .with_message("reserved for the numeric type")
                            .with_color(Color::Red),
                    )
                    .with_help("pick another name");
            }
            SemanticError::NameClash { .. } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message(format!("`{}` already names a function", name))
                        .with_color(Color::Red),
                );
            }
            SemanticError::UndeclaredVariable { is_function, .. } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message("not a parameter of the enclosing function")
                        .with_color(Color::Red),
                );
                if *is_function {
                    report = report.with_help(format!(
                        "`{}` is a function; call it as `{}(...)`",
                        name, name
                    ));
                }
            }
            SemanticError::UndeclaredFunction { declared_later, .. } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message("no function with this name is declared above")
                        .with_color(Color::Red),
                );
                if *declared_later {
                    report = report.with_help(format!(
                        "`{}` is declared further down; functions can only call themselves and functions declared before them",
                        name
                    ));
                }
            }
            SemanticError::ArityMismatch {
                expected,
                found,
                declaration,
                ..
            } => {
                report = report.with_label(
                    Label::new(here)
                        .with_message(format!(
                            "called with {} argument(s)",
                            Fmt::fg(found, Color::Red)
                        ))
                        .with_color(Color::Red),
                );
                if let Some(declaration) = declaration {
                    report = report.with_label(
                        Label::new((file.to_string(), declaration.clone()))
                            .with_message(format!(
                                "declared with {} parameter(s)",
                                Fmt::fg(expected, Color::Green)
                            ))
                            .with_color(Color::Yellow),
                    );
                }
            }
        }

        report.finish()
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::EmptyProgram => write!(f, "the program declares no functions"),
            SemanticError::DuplicateFunction { name, .. } => {
                write!(f, "function `{}` is already declared", name)
            }
            SemanticError::DuplicateParameter { name, function, .. } => {
                write!(f, "parameter `{}` of `{}` is declared twice", name, function)
            }
            SemanticError::ReservedName { name, .. } => {
                write!(f, "`{}` is a reserved name", name)
            }
            SemanticError::NameClash { name, .. } => {
                write!(f, "parameter `{}` has the same name as a function", name)
            }
            SemanticError::UndeclaredVariable { name, function, .. } => {
                write!(f, "use of undeclared variable `{}` in `{}`", name, function)
            }
            SemanticError::UndeclaredFunction { name, .. } => {
                write!(f, "call to undeclared function `{}`", name)
            }
            SemanticError::ArityMismatch {
                name,
                expected,
                found,
                ..
            } => write!(
                f,
                "`{}` takes {} argument(s) but {} were supplied",
                name, expected, found
            ),
        }
    }
}

impl std::error::Error for SemanticError {}

/// Every semantic error of a failed run plus whatever had been emitted. The
/// partial program is for diagnostics only.
#[derive(Debug, Clone)]
pub struct CodegenFailure {
    pub errors: Vec<SemanticError>,
    pub partial: String,
}

impl CodegenFailure {
    pub fn reports(&self, file: &str) -> Vec<Report<'static, FileSpan>> {
        self.errors.iter().map(|error| error.report(file)).collect()
    }
}

impl fmt::Display for CodegenFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} semantic error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodegenFailure {}
